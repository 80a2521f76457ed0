//! HTTP implementation of the [`PortalApi`] trait over `reqwest`.
//!
//! This file contains the complete concrete implementation of the remote
//! boundary: request construction, bearer-token injection from the token
//! store, status-code classification, and extraction of backend error
//! details into [`ApiError`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use crate::errors::ApiError;
use crate::store::TokenStore;
use crate::PortalApi;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection parameters for [`HttpApiClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the journal backend, e.g. `https://journal.example/api`.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Authenticated REST client for the journal backend.
pub struct HttpApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl HttpApiClient {
    pub fn new(config: ClientConfig, tokens: Arc<dyn TokenStore>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| ApiError::Connection(err.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            tokens,
        })
    }

    /// Builds a request for `path`, attaching the stored access token when
    /// one is present. Requests without a token are still sent; the backend
    /// answers those with 401 and the error path takes over.
    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let mut req = self.http.request(method, format!("{}{path}", self.base_url));
        if let Some(token) = self.tokens.access_token() {
            req = req.bearer_auth(token);
        }
        req
    }

    async fn send_json(&self, req: reqwest::RequestBuilder) -> Result<Value, ApiError> {
        let resp = req
            .send()
            .await
            .map_err(|err| ApiError::Connection(err.to_string()))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|err| ApiError::Connection(err.to_string()))?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                detail: extract_detail(&body, status.as_u16()),
            });
        }
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|err| ApiError::Malformed(err.to_string()))
    }
}

/// Pulls a human-readable message out of an error body.
///
/// The backend answers errors with `{"detail": ...}`, `{"message": ...}`, or
/// a bare string, depending on which layer rejected the request.
fn extract_detail(body: &str, status: u16) -> String {
    let fallback = || format!("request failed with status {status}");
    match serde_json::from_str::<Value>(body) {
        Ok(value) => value
            .get("detail")
            .or_else(|| value.get("message"))
            .and_then(Value::as_str)
            .map(str::to_owned)
            .or_else(|| value.as_str().map(str::to_owned))
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    fallback()
                } else {
                    body.to_owned()
                }
            }),
        Err(_) => {
            if body.trim().is_empty() {
                fallback()
            } else {
                body.to_owned()
            }
        }
    }
}

#[async_trait]
impl PortalApi for HttpApiClient {
    async fn login(&self, phone: &str, password: &str) -> Result<Value, ApiError> {
        let req = self
            .request(Method::POST, "/auth/login/")
            .json(&serde_json::json!({ "phone": phone, "password": password }));
        self.send_json(req).await
    }

    async fn profile(&self) -> Result<Value, ApiError> {
        self.send_json(self.request(Method::GET, "/auth/profile/"))
            .await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.send_json(self.request(Method::POST, "/auth/logout/"))
            .await
            .map(|_| ())
    }

    async fn notifications(&self) -> Result<Value, ApiError> {
        self.send_json(self.request(Method::GET, "/notifications/"))
            .await
    }

    async fn mark_read(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("/notifications/{id}/read/");
        self.send_json(self.request(Method::POST, &path))
            .await
            .map(|_| ())
    }

    async fn mark_all_read(&self) -> Result<(), ApiError> {
        self.send_json(self.request(Method::POST, "/notifications/read-all/"))
            .await
            .map(|_| ())
    }
}
