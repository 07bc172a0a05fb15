//! Base HTTP client.

use reqwest::{Method, RequestBuilder, Response};
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer};

use hrms_auth::SessionState;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("not signed in")]
    Unauthenticated,
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("API error ({0}): {1}")]
    Api(u16, String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Body of an API response: either the bare resource or `{"data": ...}`.
///
/// The envelope is only recognised when the `data` key is present, so a bare
/// body never decodes as an empty envelope when `T` is an `Option`.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for ApiResponse<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        if let Some(data) = value.get("data") {
            if let Ok(data) = T::deserialize(data) {
                return Ok(ApiResponse::Wrapped { data });
            }
        }
        T::deserialize(value).map(ApiResponse::Bare).map_err(de::Error::custom)
    }
}

impl<T> ApiResponse<T> {
    pub fn into_inner(self) -> T {
        match self {
            ApiResponse::Wrapped { data } => data,
            ApiResponse::Bare(data) => data,
        }
    }
}

/// HTTP client bound to one API base URL and, optionally, one bearer token.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn with_token(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Self::new(base_url)
        }
    }

    /// Client carrying the session's token, if it has one.
    pub fn for_session(base_url: impl Into<String>, session: &SessionState) -> Self {
        match session.token() {
            Some(token) => Self::with_token(base_url, token),
            None => Self::new(base_url),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Start an authenticated request. Fails without a token rather than
    /// sending an anonymous request to a protected endpoint.
    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let token = self.token.as_deref().ok_or(ClientError::Unauthenticated)?;
        Ok(self
            .http
            .request(method, self.url(path))
            .bearer_auth(token)
            .header(reqwest::header::ACCEPT, "application/json"))
    }

    /// Send and decode a JSON response.
    pub async fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ClientError> {
        let resp = self.send(req).await?;
        let body = resp.text().await?;
        serde_json::from_str::<ApiResponse<T>>(&body)
            .map(ApiResponse::into_inner)
            .map_err(|e| ClientError::Parse(e.to_string()))
    }

    /// Send and check the status, discarding the body.
    pub async fn send_empty(&self, req: RequestBuilder) -> Result<(), ClientError> {
        self.send(req).await.map(|_| ())
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response, ClientError> {
        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "API request failed");
            return Err(ClientError::Api(status.as_u16(), body));
        }
        Ok(resp)
    }
}
