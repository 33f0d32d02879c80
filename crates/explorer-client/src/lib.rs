#![allow(non_snake_case)]

//! GraphQL client for the Space Explorer web app.
//!
//! Requests pass through a chain of links: errors are reported once, the
//! stored token is attached as a bearer credential, and a token rotated by
//! the server is written back to the store before the response reaches the
//! caller. `isLoggedIn` and `cartItems` are answered from the local cache.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod link;
pub mod queries;
pub mod store;

pub use cache::ClientCache;
pub use client::{Booking, Client, ClientBuilder, FetchPolicy};
pub use config::ClientConfig;
pub use error::{ClientError, GraphQLError};
pub use link::{FetchResult, Forward, Link, LinkChain, Operation, Transport};
#[cfg(target_arch = "wasm32")]
pub use store::LocalStorageTokenStore;
pub use store::{MemoryTokenStore, TokenStore};
