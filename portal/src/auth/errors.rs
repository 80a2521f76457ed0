//! Custom error types specific to authentication failures.

use thiserror::Error;

/// Session-level failures surfaced to the user or logged during bootstrap.
///
/// The display strings double as the user-visible error text, so they are
/// written as full sentences.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The login call succeeded but no token could be found in any of the
    /// recognized response fields.
    #[error("Server response did not include access token")]
    MissingAccessToken,
    /// A profile response could not be turned into a user record.
    #[error("profile response was malformed: {0}")]
    MalformedProfile(String),
}
