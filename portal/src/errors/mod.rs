//! Global application error types.
//!
//! This module defines the error type surfaced when wiring the portal core
//! fails. Runtime failures inside the session and feed flows do not travel
//! through here: session-threatening ones collapse the session to
//! unauthenticated state, auxiliary ones are logged and absorbed.

use journal_api::{ApiError, TokenStoreError};
use thiserror::Error;

/// Failure to construct the portal core.
#[derive(Debug, Error)]
pub enum PortalError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    TokenStore(#[from] TokenStoreError),
}
