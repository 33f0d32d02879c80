use ::http::header::{HeaderMap, HeaderName, HeaderValue};
use async_trait::async_trait;
use serde::Serialize;

use super::{FetchResult, Operation, Transport};
use crate::config::ClientConfig;
use crate::error::{ClientError, GraphQLError};

const CLIENT_NAME_HEADER: &str = "client-name";
const CLIENT_VERSION_HEADER: &str = "client-version";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestBody<'a> {
    operation_name: &'a str,
    query: &'a str,
    variables: &'a serde_json::Value,
}

/// Terminating link: POSTs the operation as JSON to the GraphQL endpoint.
#[derive(Clone, Debug)]
pub struct HttpLink {
    client: reqwest::Client,
    uri: String,
}

impl HttpLink {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut defaultHeaders = HeaderMap::new();
        defaultHeaders.insert(
            HeaderName::from_static(CLIENT_NAME_HEADER),
            HeaderValue::from_str(&config.client_name)?,
        );
        defaultHeaders.insert(
            HeaderName::from_static(CLIENT_VERSION_HEADER),
            HeaderValue::from_str(&config.client_version)?,
        );

        let client = reqwest::Client::builder()
            .default_headers(defaultHeaders)
            .build()?;

        Ok(Self {
            client,
            uri: config.uri.clone(),
        })
    }
}

#[async_trait(?Send)]
impl Transport for HttpLink {
    async fn execute(&self, operation: Operation) -> Result<FetchResult, ClientError> {
        let body = RequestBody {
            operation_name: &operation.operation_name,
            query: &operation.query,
            variables: &operation.variables,
        };

        let response = self
            .client
            .post(&self.uri)
            .headers(operation.headers.clone())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let headers = response.headers().clone();
        let responseText = response.text().await?;

        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: responseText.chars().take(200).collect(),
            });
        }

        let parsed: graphql_client::Response<serde_json::Value> =
            serde_json::from_str(&responseText)?;

        let errors: Vec<GraphQLError> = parsed
            .errors
            .unwrap_or_default()
            .into_iter()
            .map(GraphQLError::from)
            .collect();

        if parsed.data.is_none() && errors.is_empty() {
            return Err(ClientError::EmptyResponse);
        }

        Ok(FetchResult {
            data: parsed.data,
            errors,
            headers,
        })
    }
}
