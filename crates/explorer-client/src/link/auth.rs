use std::sync::Arc;

use ::http::header::{HeaderValue, AUTHORIZATION};
use async_trait::async_trait;

use super::{FetchResult, Forward, Link, Operation};
use crate::error::ClientError;
use crate::store::TokenStore;

/// Sets `Authorization: Bearer <token>` from the token store on every
/// operation, or strips the header when no token is stored.
pub struct AuthLink {
    store: Arc<dyn TokenStore>,
}

impl AuthLink {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self { store }
    }
}

#[async_trait(?Send)]
impl Link for AuthLink {
    async fn request(
        &self,
        mut operation: Operation,
        forward: Forward<'_>,
    ) -> Result<FetchResult, ClientError> {
        match self.store.load().filter(|t| !t.is_empty()) {
            Some(token) => {
                let headerValue = HeaderValue::from_str(&token.bearer())?;
                operation.headers.insert(AUTHORIZATION, headerValue);
            }
            None => {
                operation.headers.remove(AUTHORIZATION);
            }
        }

        forward.run(operation).await
    }
}
