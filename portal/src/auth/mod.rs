//! Authentication module for managing the session lifecycle and identity.
//!
//! This module provides the public interface for session-related
//! functionalities such as bootstrap, login, logout, and role resolution.

pub mod errors;
pub mod models;
pub mod service;

// Re-exports for convenience
pub use errors::*;
pub use models::*;
pub use service::*;
