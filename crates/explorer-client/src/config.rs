use explorer_types::{
    AUTH_TOKEN_KEY, DEFAULT_CLIENT_NAME, DEFAULT_CLIENT_VERSION, DEFAULT_GRAPHQL_URI,
};
use serde::Deserialize;

/// Endpoint and identity for a [`crate::Client`].
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    pub uri: String,
    pub client_name: String,
    pub client_version: String,
    /// Key the auth token is stored under.
    pub token_key: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            uri: DEFAULT_GRAPHQL_URI.into(),
            client_name: DEFAULT_CLIENT_NAME.into(),
            client_version: DEFAULT_CLIENT_VERSION.into(),
            token_key: AUTH_TOKEN_KEY.into(),
        }
    }
}

impl ClientConfig {
    /// Defaults, with the endpoint taken from `EXPLORER_GRAPHQL_URI` when it
    /// was set at compile time.
    pub fn from_build_env() -> Self {
        let mut config = Self::default();
        if let Some(uri) = option_env!("EXPLORER_GRAPHQL_URI").filter(|u| !u.is_empty()) {
            config.uri = uri.into();
        }
        config
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = uri.into();
        self
    }
}
