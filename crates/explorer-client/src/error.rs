use thiserror::Error;

/// Errors produced by the GraphQL client and its links.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The transport failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response carried GraphQL errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] http::header::InvalidHeaderValue),

    /// Reading or writing the token store failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// The response had neither data nor errors.
    #[error("response contained no data")]
    EmptyResponse,
}

/// A GraphQL error returned in a response body.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphQLError {
    pub message: String,
    /// Path to the failing field in the response.
    pub path: Vec<serde_json::Value>,
}

impl From<graphql_client::Error> for GraphQLError {
    fn from(error: graphql_client::Error) -> Self {
        Self {
            message: error.message,
            path: error.path.map_or_else(Vec::new, |p| {
                p.into_iter()
                    .map(|fragment| match fragment {
                        graphql_client::PathFragment::Key(s) => serde_json::Value::String(s),
                        graphql_client::PathFragment::Index(i) => {
                            serde_json::Value::Number(i.into())
                        }
                    })
                    .collect()
            }),
        }
    }
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(|e| e.message.clone())
        .collect::<Vec<_>>()
        .join("; ")
}
