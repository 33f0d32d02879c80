//! Reactive view of the client cache.
//!
//! The cache itself is plain shared state inside [`Client`]; components
//! subscribe to [`CacheWatch`] and re-read the cache whenever a write is
//! announced through [`CacheWatch::notify`].

use explorer_client::Client;
use explorer_types::LocalState;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct CacheWatch {
    revision: RwSignal<u64>,
    results: RwSignal<u64>,
}

impl CacheWatch {
    pub fn new() -> Self {
        Self {
            revision: RwSignal::new(0),
            results: RwSignal::new(0),
        }
    }

    /// Subscribes the current reactive scope to cache writes.
    pub fn track(&self) {
        self.revision.track();
    }

    pub fn notify(&self) {
        self.revision.update(|r| *r += 1);
    }

    /// Subscribes to server-result invalidation only.
    pub fn track_results(&self) {
        self.results.track();
    }

    /// Announces that cached server results were dropped, e.g. after a
    /// mutation, so views holding fetched data refetch.
    pub fn invalidate_results(&self) {
        self.results.update(|r| *r += 1);
        self.notify();
    }
}

impl Default for CacheWatch {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_client() -> Client {
    expect_context::<Client>()
}

pub fn use_cache_watch() -> CacheWatch {
    expect_context::<CacheWatch>()
}

/// Reactive `LocalState`, re-read from the cache on every announced write.
pub fn use_local_state() -> Signal<LocalState> {
    let client = use_client();
    let watch = use_cache_watch();
    Signal::derive(move || {
        watch.track();
        client.read_local()
    })
}
