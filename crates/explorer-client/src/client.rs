use std::sync::Arc;

use explorer_types::{AuthToken, LaunchPage, LocalState};
use graphql_client::GraphQLQuery;
use tracing::{debug, info};

use crate::cache::{result_key, ClientCache};
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::link::{
    error_handler, log_failure, AuthLink, ErrorHandler, ErrorLink, HttpLink, Link, LinkChain,
    Operation, RefreshTokenLink, Transport,
};
use crate::queries::{self, book_trips, get_launches, login, BookTrips, GetLaunches, Login};
use crate::store::TokenStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchPolicy {
    /// Answer from the cache when a result for the same variables exists.
    CacheFirst,
    NetworkOnly,
}

/// Outcome of booking the cart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Booking {
    pub success: bool,
    pub message: Option<String>,
}

/// GraphQL client for the Space Explorer API.
///
/// Built once per application and shared by cloning. Every operation runs
/// through `ErrorLink -> AuthLink -> RefreshTokenLink -> <extra links> -> transport`.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    chain: LinkChain,
    cache: ClientCache,
    store: Arc<dyn TokenStore>,
}

impl Client {
    pub fn new(config: &ClientConfig, store: Arc<dyn TokenStore>) -> Result<Self, ClientError> {
        Self::builder(config.clone()).token_store(store).build()
    }

    pub fn builder(config: ClientConfig) -> ClientBuilder {
        ClientBuilder::new(config)
    }

    pub fn cache(&self) -> &ClientCache {
        &self.inner.cache
    }

    pub fn read_local(&self) -> LocalState {
        self.inner.cache.local()
    }

    pub fn is_logged_in(&self) -> bool {
        self.inner.cache.is_logged_in()
    }

    /// Resolves a client-only field such as `isLoggedIn` without a network
    /// round trip.
    pub fn resolve_local(&self, field: &str) -> Option<serde_json::Value> {
        self.inner.cache.resolve_local(field)
    }

    /// Cache-first typed query.
    pub async fn query<Q: GraphQLQuery>(
        &self,
        variables: Q::Variables,
    ) -> Result<Q::ResponseData, ClientError> {
        self.execute::<Q>(variables, FetchPolicy::CacheFirst).await
    }

    /// Network-only typed mutation. Cached query results are dropped on
    /// success since the server state they reflect has changed.
    pub async fn mutate<Q: GraphQLQuery>(
        &self,
        variables: Q::Variables,
    ) -> Result<Q::ResponseData, ClientError> {
        let data = self.execute::<Q>(variables, FetchPolicy::NetworkOnly).await?;
        self.inner.cache.evict_results();
        Ok(data)
    }

    pub async fn execute<Q: GraphQLQuery>(
        &self,
        variables: Q::Variables,
        policy: FetchPolicy,
    ) -> Result<Q::ResponseData, ClientError> {
        let body = Q::build_query(variables);
        let variables = serde_json::to_value(&body.variables)?;
        let key = result_key(body.operation_name, &variables);

        if policy == FetchPolicy::CacheFirst {
            if let Some(cached) = self.inner.cache.read_result(&key) {
                debug!(operation = body.operation_name, "answered from cache");
                return Ok(serde_json::from_value(cached)?);
            }
        }

        let operation = Operation::new(body.operation_name, body.query, variables);
        let result = self.inner.chain.execute(operation).await?;

        // Already reported once by ErrorLink
        if result.has_errors() {
            return Err(ClientError::GraphQL(result.errors));
        }

        let data = result.data.ok_or(ClientError::EmptyResponse)?;
        let typed: Q::ResponseData = serde_json::from_value(data.clone())?;

        if policy == FetchPolicy::CacheFirst {
            self.inner.cache.write_result(key, data);
        }

        Ok(typed)
    }

    pub async fn launches(&self, after: Option<String>) -> Result<LaunchPage, ClientError> {
        let data = self
            .query::<GetLaunches>(get_launches::Variables { after })
            .await?;
        Ok(queries::launch_page(data))
    }

    /// Exchanges an email for a token, stores it and flips `isLoggedIn`.
    pub async fn log_in(&self, email: &str) -> Result<AuthToken, ClientError> {
        let data = self
            .mutate::<Login>(login::Variables {
                email: email.to_string(),
            })
            .await?;

        let token = data
            .login
            .filter(|t| !t.is_empty())
            .map(AuthToken)
            .ok_or(ClientError::EmptyResponse)?;

        self.inner.store.save(&token)?;
        self.inner.cache.set_logged_in(true);
        info!("logged in");
        Ok(token)
    }

    pub fn log_out(&self) -> Result<(), ClientError> {
        self.inner.store.clear()?;
        self.inner.cache.reset();
        info!("logged out");
        Ok(())
    }

    pub fn cart_items(&self) -> Vec<String> {
        self.inner.cache.cart_items()
    }

    pub fn add_to_cart(&self, launchId: &str) -> bool {
        self.inner.cache.add_to_cart(launchId)
    }

    pub fn remove_from_cart(&self, launchId: &str) -> bool {
        self.inner.cache.remove_from_cart(launchId)
    }

    /// Books every launch in the cart; the cart is emptied only on success.
    pub async fn book_cart(&self) -> Result<Booking, ClientError> {
        let launchIds = self.cart_items().into_iter().map(Some).collect();
        let data = self
            .mutate::<BookTrips>(book_trips::Variables {
                launch_ids: launchIds,
            })
            .await?;

        let booking = Booking {
            success: data.book_trips.success,
            message: data.book_trips.message,
        };
        if booking.success {
            self.inner.cache.clear_cart();
        }
        Ok(booking)
    }
}

pub struct ClientBuilder {
    config: ClientConfig,
    store: Option<Arc<dyn TokenStore>>,
    transport: Option<Arc<dyn Transport>>,
    handler: Option<ErrorHandler>,
    extra: Vec<Arc<dyn Link>>,
}

impl ClientBuilder {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            store: None,
            transport: None,
            handler: None,
            extra: Vec::new(),
        }
    }

    pub fn token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Replaces the HTTP transport.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn error_handler(mut self, handler: ErrorHandler) -> Self {
        self.handler = Some(handler);
        self
    }

    /// Adds a link between the refresh link and the transport.
    pub fn link(mut self, link: impl Link + 'static) -> Self {
        self.extra.push(Arc::new(link));
        self
    }

    pub fn build(self) -> Result<Client, ClientError> {
        let store = match self.store {
            Some(store) => store,
            None => default_store(&self.config),
        };
        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpLink::new(&self.config)?),
        };
        let handler = self.handler.unwrap_or_else(|| error_handler(log_failure));

        let mut chain = LinkChain::new(transport)
            .with(ErrorLink::new(handler))
            .with(AuthLink::new(store.clone()))
            .with(RefreshTokenLink::new(store.clone()));
        for link in self.extra {
            chain = chain.with_arc(link);
        }

        let hasToken = store.load().is_some_and(|t| !t.is_empty());
        let cache = ClientCache::new(LocalState::logged_in(hasToken));
        debug!(uri = %self.config.uri, links = chain.len(), "client built");

        Ok(Client {
            inner: Arc::new(ClientInner {
                chain,
                cache,
                store,
            }),
        })
    }
}

#[cfg(target_arch = "wasm32")]
fn default_store(config: &ClientConfig) -> Arc<dyn TokenStore> {
    Arc::new(crate::store::LocalStorageTokenStore::new(config.token_key.clone()))
}

#[cfg(not(target_arch = "wasm32"))]
fn default_store(_config: &ClientConfig) -> Arc<dyn TokenStore> {
    Arc::new(crate::store::MemoryTokenStore::new())
}

#[cfg(test)]
mod tests {
    use ::http::header::{HeaderValue, AUTHORIZATION};
    use ::http::HeaderMap;

    use super::*;
    use crate::error::GraphQLError;
    use crate::link::testing::MockTransport;
    use crate::link::FetchResult;
    use crate::store::MemoryTokenStore;

    fn client_with(transport: Arc<MockTransport>, store: Arc<MemoryTokenStore>) -> Client {
        Client::builder(ClientConfig::default())
            .token_store(store)
            .transport(transport)
            .build()
            .unwrap()
    }

    fn data(value: serde_json::Value) -> Result<FetchResult, ClientError> {
        Ok(FetchResult {
            data: Some(value),
            errors: Vec::new(),
            headers: HeaderMap::new(),
        })
    }

    fn launches_json() -> serde_json::Value {
        serde_json::json!({
            "launches": {
                "cursor": "c1",
                "hasMore": false,
                "launches": [
                    { "id": "1", "site": null, "isBooked": false, "rocket": null, "mission": null }
                ]
            }
        })
    }

    #[test]
    fn logged_in_flag_follows_stored_token() {
        let transport = Arc::new(MockTransport::default());
        let loggedOut = client_with(transport.clone(), Arc::new(MemoryTokenStore::new()));
        assert!(!loggedOut.is_logged_in());
        assert_eq!(loggedOut.resolve_local("isLoggedIn"), Some(serde_json::json!(false)));

        let store = Arc::new(MemoryTokenStore::with_token("t"));
        let loggedIn = client_with(transport, store);
        assert!(loggedIn.is_logged_in());
    }

    #[tokio::test]
    async fn empty_stored_token_is_logged_out_and_unauthenticated() {
        let transport = Arc::new(MockTransport::default());
        transport.push(data(launches_json()));
        let store = Arc::new(MemoryTokenStore::with_token(""));
        let client = client_with(transport.clone(), store);

        assert!(!client.is_logged_in());
        client.launches(None).await.unwrap();
        assert!(transport.seen()[0].headers.get(AUTHORIZATION).is_none());
    }

    #[tokio::test]
    async fn login_stores_token_and_sets_flag() {
        let transport = Arc::new(MockTransport::default());
        transport.push(data(serde_json::json!({ "login": "dG9rZW4=" })));
        let store = Arc::new(MemoryTokenStore::new());
        let client = client_with(transport.clone(), store.clone());

        let token = client.log_in("astro@example.com").await.unwrap();

        assert_eq!(token, AuthToken("dG9rZW4=".into()));
        assert_eq!(store.load(), Some(token));
        assert!(client.is_logged_in());
        assert!(transport.seen()[0].headers.get(AUTHORIZATION).is_none());
    }

    #[tokio::test]
    async fn login_without_token_is_an_error() {
        let transport = Arc::new(MockTransport::default());
        transport.push(data(serde_json::json!({ "login": null })));
        let client = client_with(transport, Arc::new(MemoryTokenStore::new()));

        let result = client.log_in("nobody@example.com").await;

        assert!(matches!(result, Err(ClientError::EmptyResponse)));
        assert!(!client.is_logged_in());
    }

    #[tokio::test]
    async fn rotated_token_used_by_next_request() {
        let transport = Arc::new(MockTransport::default());
        let mut headers = HeaderMap::new();
        headers.insert("refreshtoken", HeaderValue::from_static("fresh"));
        transport.push(Ok(FetchResult {
            data: Some(launches_json()),
            errors: Vec::new(),
            headers,
        }));
        transport.push(data(serde_json::json!({ "login": "other" })));
        let store = Arc::new(MemoryTokenStore::with_token("stale"));
        let client = client_with(transport.clone(), store);

        client.launches(None).await.unwrap();
        client
            .mutate::<Login>(login::Variables {
                email: "x@y.z".into(),
            })
            .await
            .unwrap();

        let seen = transport.seen();
        assert_eq!(seen[0].headers.get(AUTHORIZATION).unwrap(), "Bearer stale");
        assert_eq!(seen[1].headers.get(AUTHORIZATION).unwrap(), "Bearer fresh");
    }

    #[tokio::test]
    async fn queries_are_cache_first() {
        let transport = Arc::new(MockTransport::default());
        transport.push(data(launches_json()));
        let client = client_with(transport.clone(), Arc::new(MemoryTokenStore::new()));

        let first = client.launches(None).await.unwrap();
        let second = client.launches(None).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(transport.seen().len(), 1);
    }

    #[tokio::test]
    async fn graphql_errors_surface_to_caller() {
        let transport = Arc::new(MockTransport::default());
        transport.push(Ok(FetchResult {
            data: None,
            errors: vec![GraphQLError {
                message: "You must be logged in".into(),
                path: vec![serde_json::json!("launches")],
            }],
            headers: HeaderMap::new(),
        }));
        let client = client_with(transport, Arc::new(MemoryTokenStore::new()));

        let result = client.launches(None).await;

        assert!(matches!(result, Err(ClientError::GraphQL(errors)) if errors.len() == 1));
    }

    #[tokio::test]
    async fn logout_clears_token_and_cache() {
        let transport = Arc::new(MockTransport::default());
        let store = Arc::new(MemoryTokenStore::with_token("t"));
        let client = client_with(transport, store.clone());
        client.add_to_cart("3");

        client.log_out().unwrap();

        assert_eq!(store.load(), None);
        assert!(!client.is_logged_in());
        assert!(client.cart_items().is_empty());
    }

    #[tokio::test]
    async fn successful_booking_empties_cart() {
        let transport = Arc::new(MockTransport::default());
        transport.push(data(serde_json::json!({
            "bookTrips": { "success": true, "message": "trips booked successfully", "launches": [] }
        })));
        let store = Arc::new(MemoryTokenStore::with_token("t"));
        let client = client_with(transport.clone(), store);
        client.add_to_cart("1");
        client.add_to_cart("2");

        let booking = client.book_cart().await.unwrap();

        assert!(booking.success);
        assert!(client.cart_items().is_empty());
        assert_eq!(
            transport.seen()[0].variables,
            serde_json::json!({ "launchIds": ["1", "2"] })
        );
    }

    #[tokio::test]
    async fn booking_refetches_cached_launches() {
        let transport = Arc::new(MockTransport::default());
        transport.push(data(launches_json()));
        transport.push(data(serde_json::json!({
            "bookTrips": { "success": true, "message": "trips booked successfully", "launches": [] }
        })));
        transport.push(data(launches_json()));
        let client = client_with(transport.clone(), Arc::new(MemoryTokenStore::with_token("t")));

        client.launches(None).await.unwrap();
        client.launches(None).await.unwrap();
        assert_eq!(transport.seen().len(), 1);

        client.add_to_cart("1");
        client.book_cart().await.unwrap();
        client.launches(None).await.unwrap();

        let seen = transport.seen();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[2].operation_name, "GetLaunches");
    }

    #[tokio::test]
    async fn failed_booking_keeps_cart() {
        let transport = Arc::new(MockTransport::default());
        transport.push(data(serde_json::json!({
            "bookTrips": { "success": false, "message": "already booked", "launches": null }
        })));
        let client = client_with(transport, Arc::new(MemoryTokenStore::with_token("t")));
        client.add_to_cart("1");

        let booking = client.book_cart().await.unwrap();

        assert!(!booking.success);
        assert_eq!(client.cart_items(), vec!["1"]);
    }
}
