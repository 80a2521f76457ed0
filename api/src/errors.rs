//! Custom error types specific to the `journal-api` crate.
//!
//! This module defines errors that can occur during requests to the journal
//! backend or while persisting session tokens, providing a unified error
//! handling mechanism for the whole remote boundary.

use thiserror::Error;

/// Failure of a remote API call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (DNS, TLS, timeout, ...).
    #[error("connection error: {0}")]
    Connection(String),
    /// The backend answered with a non-success status code.
    #[error("request failed with status {status}: {detail}")]
    Status { status: u16, detail: String },
    /// The response arrived but its body could not be decoded.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl ApiError {
    /// Collapses any failure shape into a single human-readable message
    /// suitable for display next to a form.
    ///
    /// Backend error bodies carry `detail` or `message` fields or plain
    /// strings; [`http`](crate::http) already folds those into the `detail`
    /// of [`ApiError::Status`], so this only has to choose the wording per
    /// variant.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { detail, .. } => detail.clone(),
            ApiError::Connection(_) => "Could not reach the server. Please try again.".to_owned(),
            ApiError::Malformed(_) => "The server returned an unexpected response.".to_owned(),
        }
    }
}

/// Failure while reading or writing the durable token store.
#[derive(Debug, Error)]
pub enum TokenStoreError {
    #[error("token storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("token storage encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}
