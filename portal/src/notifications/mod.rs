//! Notification module for the user-visible feed.
//!
//! This module provides the canonical notification record and the feed that
//! owns the list, applying mutations optimistically with a best-effort
//! backend sync.

pub mod feed;
pub mod models;

// Re-exports for convenience
pub use feed::*;
pub use models::*;
