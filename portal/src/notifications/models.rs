//! Data structures for notification entities.

use journal_api::RawNotification;
use serde::Serialize;

/// One entry of the notification feed.
///
/// Ids are unique within the feed: server-assigned for fetched entries,
/// locally generated (monotonic) for client-side emissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub id: i64,
    pub message: String,
    pub read: bool,
    /// Optional navigation target shown as the entry's action.
    pub link: Option<String>,
}

impl From<RawNotification> for Notification {
    fn from(raw: RawNotification) -> Self {
        Self {
            id: raw.id,
            message: raw.message,
            read: raw.read,
            link: raw.link,
        }
    }
}
