pub mod launch;
pub mod session;
pub use launch::*;
pub use session::*;

/// Local storage key the auth token lives under.
pub const AUTH_TOKEN_KEY: &str = "AUTH_TOKEN";

/// Response header carrying a rotated token.
pub const REFRESH_TOKEN_HEADER: &str = "refreshToken";

pub const DEFAULT_GRAPHQL_URI: &str = "http://localhost:4000/graphql";
pub const DEFAULT_CLIENT_NAME: &str = "Space Explorer [web]";
pub const DEFAULT_CLIENT_VERSION: &str = "1.0.0";

/// Auth token wrapper, stored in the browser and sent as a bearer credential.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthToken(pub String);

impl AuthToken {
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for AuthToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_prefixes_token() {
        let token = AuthToken("abc123".into());
        assert_eq!(token.bearer(), "Bearer abc123");
    }
}
