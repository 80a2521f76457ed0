//! Core `journal-api` crate for abstracting journal-portal REST interactions.
//!
//! This crate defines the `PortalApi` trait, which outlines the remote
//! operations the portal core depends on (authentication, profile,
//! notifications), and provides the concrete HTTP implementation together
//! with the wire-level response normalization and the durable token store.

pub mod errors;
pub mod http;
pub mod models;
pub mod store;

// Re-exports for convenience
pub use errors::*;
pub use http::*;
pub use models::*;
pub use store::*;

use async_trait::async_trait;
use serde_json::Value;

/// Remote operations the portal core performs against the journal backend.
///
/// Payload-bearing calls return untyped JSON: the backend is inconsistent
/// about envelopes and field casing, so decoding into canonical records is
/// the job of [`models`], not of the transport. Implementations must be
/// shareable across tasks; the portal clones an `Arc` of the client into
/// fire-and-forget sync tasks.
#[async_trait]
pub trait PortalApi: Send + Sync {
    /// Authenticates with phone and password, returning the raw login payload.
    async fn login(&self, phone: &str, password: &str) -> Result<Value, ApiError>;

    /// Fetches the current user's profile using the stored access token.
    async fn profile(&self) -> Result<Value, ApiError>;

    /// Informs the backend that the session ended.
    async fn logout(&self) -> Result<(), ApiError>;

    /// Fetches the notification list, possibly wrapped in a `data` envelope.
    async fn notifications(&self) -> Result<Value, ApiError>;

    /// Flags a single notification as read. Idempotent on the backend.
    async fn mark_read(&self, id: &str) -> Result<(), ApiError>;

    /// Flags every notification as read. Idempotent on the backend.
    async fn mark_all_read(&self) -> Result<(), ApiError>;
}
