//! Client layer: builds requests from models and decodes responses back into them.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use reqwest::header::ACCEPT;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::domain::{ApiKey, ValidationError};
use crate::model::{Model, ModelError};
use crate::resources::{ApiError, ApiErrorResponse};

mod services;

const DEFAULT_BASE_URL: &str = "https://api.telnyx.com/v2/";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpRequest {
    method: Method,
    url: Url,
    api_key: ApiKey,
    body: Option<Value>,
}

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> BoxFuture<'_, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> BoxFuture<'_, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let mut builder = self
                .client
                .request(request.method, request.url)
                .bearer_auth(request.api_key.as_str())
                .header(ACCEPT, "application/json");
            if let Some(body) = &request.body {
                builder = builder.json(body);
            }
            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`TelnyxClient`].
///
/// This error preserves:
/// - HTTP-level failures (non-2xx status or transport failures),
/// - API-level failures (the `errors` document of a failed call),
/// - model failures on either side of the wire.
pub enum TelnyxError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status without a readable `errors` document.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// The API rejected the call and said why.
    #[error(
        "API error (HTTP {status}): {}",
        .errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
    )]
    Api { status: u16, errors: Vec<ApiError> },

    /// Response body is not JSON.
    #[error("parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// A request model is incomplete or a response does not fit its model.
    #[error("model error: {0}")]
    Model(#[from] ModelError),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone)]
/// Builder for [`TelnyxClient`].
///
/// Use this when you need to customize the base URL, timeout, or user-agent.
pub struct TelnyxClientBuilder {
    api_key: ApiKey,
    base_url: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl TelnyxClientBuilder {
    /// Create a builder with the default base URL and no timeout/user-agent override.
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Override the API base URL (e.g. a mock server). Resource paths are appended to it.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`TelnyxClient`].
    pub fn build(self) -> Result<TelnyxClient, TelnyxError> {
        let base_url = parse_base_url(&self.base_url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| TelnyxError::Transport(Box::new(err)))?;

        Ok(TelnyxClient {
            api_key: self.api_key,
            base_url,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// High-level Telnyx client.
///
/// Request bodies are encoded from models (so incomplete models are rejected
/// before anything is sent) and responses are decoded into models.
pub struct TelnyxClient {
    api_key: ApiKey,
    base_url: Url,
    http: Arc<dyn HttpTransport>,
}

impl TelnyxClient {
    /// Create a client for `https://api.telnyx.com/v2/`.
    ///
    /// For more customization, use [`TelnyxClient::builder`].
    pub fn new(api_key: ApiKey) -> Result<Self, TelnyxError> {
        TelnyxClientBuilder::new(api_key).build()
    }

    /// Start building a client with custom settings.
    pub fn builder(api_key: ApiKey) -> TelnyxClientBuilder {
        TelnyxClientBuilder::new(api_key)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str], query: &[(String, String)]) -> Url {
        let mut url = self.base_url.clone();
        // `parse_base_url` only accepts URLs that can carry a path.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter());
        }
        url
    }

    async fn execute<T: Model>(
        &self,
        method: Method,
        segments: &[&str],
        query: Vec<(String, String)>,
        body: Option<Value>,
    ) -> Result<T, TelnyxError> {
        let url = self.endpoint(segments, &query);
        tracing::debug!(%method, path = url.path(), "sending request");

        let response = self
            .http
            .execute(HttpRequest {
                method,
                url,
                api_key: self.api_key.clone(),
                body,
            })
            .await
            .map_err(TelnyxError::Transport)?;

        if !(200..=299).contains(&response.status) {
            return Err(status_error(response));
        }

        let payload: Value = serde_json::from_str(&response.body).map_err(TelnyxError::Parse)?;
        Ok(T::parse(&payload)?)
    }
}

fn parse_base_url(input: &str) -> Result<Url, TelnyxError> {
    let url = Url::parse(input)?;
    if url.cannot_be_a_base() {
        return Err(TelnyxError::InvalidUrl(
            url::ParseError::RelativeUrlWithCannotBeABaseBase,
        ));
    }
    Ok(url)
}

/// Flatten a serializable parameter struct into query pairs, skipping nulls.
fn query_pairs<Q: Serialize>(query: &Q) -> Result<Vec<(String, String)>, TelnyxError> {
    let Value::Object(object) = serde_json::to_value(query).map_err(ModelError::Json)? else {
        return Err(ModelError::Json(serde::ser::Error::custom(
            "query parameters must serialize to an object",
        ))
        .into());
    };
    Ok(object
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::Null => None,
            Value::String(s) => Some((key, s)),
            other => Some((key, other.to_string())),
        })
        .collect())
}

fn status_error(response: HttpResponse) -> TelnyxError {
    let errors = serde_json::from_str::<Value>(&response.body)
        .ok()
        .and_then(|payload| ApiErrorResponse::parse(&payload).ok())
        .map(|document| document.errors())
        .filter(|errors| !errors.is_empty());

    match errors {
        Some(errors) => {
            tracing::warn!(
                status = response.status,
                errors = errors.len(),
                "request rejected by the API"
            );
            TelnyxError::Api {
                status: response.status,
                errors,
            }
        }
        None => {
            tracing::warn!(status = response.status, "request failed");
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            TelnyxError::HttpStatus {
                status: response.status,
                body,
            }
        }
    }
}
