//! Where the auth token lives between requests.
//!
//! Links receive a [`TokenStore`] at construction instead of reaching for
//! browser storage directly, so the same chain runs against local storage in
//! the browser and an in-memory store in tests.

use std::sync::{PoisonError, RwLock};

use explorer_types::AuthToken;

use crate::error::ClientError;

pub trait TokenStore: Send + Sync {
    /// The stored token. An empty stored value counts as no token.
    fn load(&self) -> Option<AuthToken>;

    fn save(&self, token: &AuthToken) -> Result<(), ClientError>;

    fn clear(&self) -> Result<(), ClientError>;
}

/// Token store held in process memory.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<AuthToken>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(AuthToken(token.into()))),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<AuthToken> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .filter(|t| !t.is_empty())
    }

    fn save(&self, token: &AuthToken) -> Result<(), ClientError> {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// Token store backed by `window.localStorage`.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct LocalStorageTokenStore {
    key: String,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageTokenStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Result<web_sys::Storage, ClientError> {
        web_sys::window()
            .ok_or_else(|| ClientError::Storage("no window".into()))?
            .local_storage()
            .map_err(|e| ClientError::Storage(format!("{e:?}")))?
            .ok_or_else(|| ClientError::Storage("local storage unavailable".into()))
    }
}

#[cfg(target_arch = "wasm32")]
impl Default for LocalStorageTokenStore {
    fn default() -> Self {
        Self::new(explorer_types::AUTH_TOKEN_KEY)
    }
}

#[cfg(target_arch = "wasm32")]
impl TokenStore for LocalStorageTokenStore {
    fn load(&self) -> Option<AuthToken> {
        let storage = match Self::storage() {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!("failed to open token storage: {e}");
                return None;
            }
        };
        match storage.get_item(&self.key) {
            Ok(value) => value.filter(|v| !v.is_empty()).map(AuthToken),
            Err(e) => {
                tracing::warn!("failed to read {}: {e:?}", self.key);
                None
            }
        }
    }

    fn save(&self, token: &AuthToken) -> Result<(), ClientError> {
        Self::storage()?
            .set_item(&self.key, token.as_str())
            .map_err(|e| ClientError::Storage(format!("{e:?}")))
    }

    fn clear(&self) -> Result<(), ClientError> {
        Self::storage()?
            .remove_item(&self.key)
            .map_err(|e| ClientError::Storage(format!("{e:?}")))
    }
}
