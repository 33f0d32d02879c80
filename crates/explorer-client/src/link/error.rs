use std::sync::Arc;

use async_trait::async_trait;

use super::{FetchResult, Forward, Link, Operation};
use crate::error::{ClientError, GraphQLError};

/// A failed operation as reported to an [`ErrorHandler`].
#[derive(Debug)]
pub enum LinkFailure<'a> {
    /// The request never produced a GraphQL response.
    Network {
        operation_name: &'a str,
        error: &'a ClientError,
    },
    /// A response arrived but carried GraphQL errors.
    GraphQL {
        operation_name: &'a str,
        errors: &'a [GraphQLError],
    },
}

pub type ErrorHandler = Arc<dyn Fn(&LinkFailure<'_>) + Send + Sync>;

pub fn error_handler(f: impl Fn(&LinkFailure<'_>) + Send + Sync + 'static) -> ErrorHandler {
    Arc::new(f)
}

/// Logs through `tracing`.
pub fn log_failure(failure: &LinkFailure<'_>) {
    match failure {
        LinkFailure::Network {
            operation_name,
            error,
        } => {
            tracing::error!(operation = %operation_name, error = %error, "network error");
        }
        LinkFailure::GraphQL {
            operation_name,
            errors,
        } => {
            for e in errors.iter() {
                tracing::error!(
                    operation = %operation_name,
                    path = ?e.path,
                    "graphql error: {}",
                    e.message
                );
            }
        }
    }
}

/// Reports every failing operation exactly once, then passes the outcome
/// through untouched. Never retries.
pub struct ErrorLink {
    handler: ErrorHandler,
}

impl ErrorLink {
    pub fn new(handler: ErrorHandler) -> Self {
        Self { handler }
    }
}

impl Default for ErrorLink {
    fn default() -> Self {
        Self::new(Arc::new(log_failure))
    }
}

#[async_trait(?Send)]
impl Link for ErrorLink {
    async fn request(
        &self,
        operation: Operation,
        forward: Forward<'_>,
    ) -> Result<FetchResult, ClientError> {
        let operationName = operation.operation_name.clone();
        let result = forward.run(operation).await;

        match &result {
            Err(error) => (self.handler)(&LinkFailure::Network {
                operation_name: &operationName,
                error,
            }),
            Ok(fetched) if fetched.has_errors() => (self.handler)(&LinkFailure::GraphQL {
                operation_name: &operationName,
                errors: &fetched.errors,
            }),
            Ok(_) => {}
        }

        result
    }
}
