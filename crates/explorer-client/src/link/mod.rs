//! Request/response pipeline.
//!
//! An [`Operation`] enters the first [`Link`], which may edit it, hand it on
//! through [`Forward`], and inspect what comes back. The last stage is a
//! [`Transport`] that actually performs the request.

pub mod auth;
pub mod error;
pub mod http;
pub mod refresh;

use std::sync::Arc;

use async_trait::async_trait;
use ::http::HeaderMap;

use crate::error::{ClientError, GraphQLError};

pub use self::auth::AuthLink;
pub use self::error::{error_handler, log_failure, ErrorHandler, ErrorLink, LinkFailure};
pub use self::http::HttpLink;
pub use self::refresh::RefreshTokenLink;

/// A GraphQL operation on its way to the server.
#[derive(Clone, Debug)]
pub struct Operation {
    pub operation_name: String,
    pub query: String,
    pub variables: serde_json::Value,
    /// Headers to send with this operation only.
    pub headers: HeaderMap,
}

impl Operation {
    pub fn new(
        operationName: impl Into<String>,
        query: impl Into<String>,
        variables: serde_json::Value,
    ) -> Self {
        Self {
            operation_name: operationName.into(),
            query: query.into(),
            variables,
            headers: HeaderMap::new(),
        }
    }
}

/// What came back for an operation.
#[derive(Clone, Debug, Default)]
pub struct FetchResult {
    pub data: Option<serde_json::Value>,
    pub errors: Vec<GraphQLError>,
    /// Response headers as seen by the transport.
    pub headers: HeaderMap,
}

impl FetchResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[async_trait(?Send)]
pub trait Link: Send + Sync {
    async fn request(
        &self,
        operation: Operation,
        forward: Forward<'_>,
    ) -> Result<FetchResult, ClientError>;
}

/// The terminating stage of a chain.
#[async_trait(?Send)]
pub trait Transport: Send + Sync {
    async fn execute(&self, operation: Operation) -> Result<FetchResult, ClientError>;
}

/// The remainder of the chain after the current link.
pub struct Forward<'a> {
    links: &'a [Arc<dyn Link>],
    transport: &'a dyn Transport,
}

impl Forward<'_> {
    pub async fn run(self, operation: Operation) -> Result<FetchResult, ClientError> {
        match self.links.split_first() {
            Some((head, rest)) => {
                head.request(
                    operation,
                    Forward {
                        links: rest,
                        transport: self.transport,
                    },
                )
                .await
            }
            None => self.transport.execute(operation).await,
        }
    }
}

/// Links composed in order in front of a transport.
#[derive(Clone)]
pub struct LinkChain {
    links: Vec<Arc<dyn Link>>,
    transport: Arc<dyn Transport>,
}

impl LinkChain {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            links: Vec::new(),
            transport,
        }
    }

    /// Appends a link after the ones already present.
    pub fn with(mut self, link: impl Link + 'static) -> Self {
        self.links.push(Arc::new(link));
        self
    }

    pub fn with_arc(mut self, link: Arc<dyn Link>) -> Self {
        self.links.push(link);
        self
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub async fn execute(&self, operation: Operation) -> Result<FetchResult, ClientError> {
        Forward {
            links: &self.links,
            transport: self.transport.as_ref(),
        }
        .run(operation)
        .await
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Transport that records operations and replays queued outcomes.
    #[derive(Default)]
    pub struct MockTransport {
        pub seen: Mutex<Vec<Operation>>,
        pub outcomes: Mutex<Vec<Result<FetchResult, ClientError>>>,
    }

    impl MockTransport {
        pub fn push(&self, outcome: Result<FetchResult, ClientError>) {
            self.outcomes.lock().unwrap().push(outcome);
        }

        pub fn seen(&self) -> Vec<Operation> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait(?Send)]
    impl Transport for MockTransport {
        async fn execute(&self, operation: Operation) -> Result<FetchResult, ClientError> {
            self.seen.lock().unwrap().push(operation);
            let mut outcomes = self.outcomes.lock().unwrap();
            if outcomes.is_empty() {
                Ok(FetchResult::default())
            } else {
                outcomes.remove(0)
            }
        }
    }

    pub fn operation() -> Operation {
        Operation::new(
            "GetLaunches",
            "query GetLaunches { launches { cursor } }",
            serde_json::json!({}),
        )
    }
}
