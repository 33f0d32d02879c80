use std::sync::Arc;

use async_trait::async_trait;
use explorer_types::{AuthToken, REFRESH_TOKEN_HEADER};

use super::{FetchResult, Forward, Link, Operation};
use crate::error::ClientError;
use crate::store::TokenStore;

/// Persists a rotated token handed back in the `refreshToken` response header.
pub struct RefreshTokenLink {
    store: Arc<dyn TokenStore>,
}

impl RefreshTokenLink {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self { store }
    }
}

#[async_trait(?Send)]
impl Link for RefreshTokenLink {
    async fn request(
        &self,
        operation: Operation,
        forward: Forward<'_>,
    ) -> Result<FetchResult, ClientError> {
        let result = forward.run(operation).await?;

        // HeaderMap lookups are case-insensitive
        let rotated = result
            .headers
            .get(REFRESH_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        if let Some(token) = rotated {
            tracing::debug!("storing rotated auth token");
            self.store.save(&AuthToken(token.to_string()))?;
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use ::http::header::HeaderValue;
    use ::http::HeaderMap;

    use super::*;
    use crate::link::testing::{operation, MockTransport};
    use crate::link::LinkChain;
    use crate::store::MemoryTokenStore;

    fn result_with_header(value: &'static str) -> FetchResult {
        let mut headers = HeaderMap::new();
        headers.insert("refreshtoken", HeaderValue::from_static(value));
        FetchResult {
            data: Some(serde_json::json!({})),
            errors: Vec::new(),
            headers,
        }
    }

    #[tokio::test]
    async fn rotated_token_overwrites_store() {
        let transport = Arc::new(MockTransport::default());
        transport.push(Ok(result_with_header("rotated")));
        let store = Arc::new(MemoryTokenStore::with_token("old"));
        let chain = LinkChain::new(transport).with(RefreshTokenLink::new(store.clone()));

        chain.execute(operation()).await.unwrap();

        assert_eq!(store.load(), Some(AuthToken("rotated".into())));
    }

    #[tokio::test]
    async fn absent_header_leaves_store_alone() {
        let transport = Arc::new(MockTransport::default());
        let store = Arc::new(MemoryTokenStore::with_token("old"));
        let chain = LinkChain::new(transport).with(RefreshTokenLink::new(store.clone()));

        chain.execute(operation()).await.unwrap();

        assert_eq!(store.load(), Some(AuthToken("old".into())));
    }

    #[tokio::test]
    async fn empty_header_is_ignored() {
        let transport = Arc::new(MockTransport::default());
        transport.push(Ok(result_with_header("")));
        let store = Arc::new(MemoryTokenStore::with_token("old"));
        let chain = LinkChain::new(transport).with(RefreshTokenLink::new(store.clone()));

        chain.execute(operation()).await.unwrap();

        assert_eq!(store.load(), Some(AuthToken("old".into())));
    }

    #[tokio::test]
    async fn failed_request_does_not_touch_store() {
        let transport = Arc::new(MockTransport::default());
        transport.push(Err(ClientError::Status {
            status: 502,
            body: "bad gateway".into(),
        }));
        let store = Arc::new(MemoryTokenStore::with_token("old"));
        let chain = LinkChain::new(transport).with(RefreshTokenLink::new(store.clone()));

        assert!(chain.execute(operation()).await.is_err());
        assert_eq!(store.load(), Some(AuthToken("old".into())));
    }
}
