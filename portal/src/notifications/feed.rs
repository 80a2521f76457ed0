//! Owner of the notification list with optimistic local mutation.
//!
//! Local state is the source of truth: read-flag mutations apply
//! synchronously and in call order, then a fire-and-forget task informs the
//! backend. A failed sync is logged, never rolled back; the backend writes
//! are idempotent set-flag operations, so out-of-order completions are
//! harmless.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use journal_api::{models, ApiError, PortalApi};

use crate::notifications::models::Notification;
use crate::utils::spawn_detached;

/// The feed keeps only this many entries, newest first.
pub const FEED_CAPACITY: usize = 20;

/// Ordered notification list plus the local id sequence.
pub struct NotificationFeed {
    api: Arc<dyn PortalApi>,
    items: Vec<Notification>,
    next_local_id: i64,
}

impl NotificationFeed {
    /// Creates an empty feed.
    ///
    /// The local id sequence is seeded from the unix-millis clock so that
    /// client-generated ids do not collide with server-assigned ones within
    /// a session.
    pub fn new(api: Arc<dyn PortalApi>) -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as i64)
            .unwrap_or(1);
        Self {
            api,
            items: Vec::new(),
            next_local_id: seed,
        }
    }

    /// Entries, newest first.
    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    /// Count of unread entries, recomputed per call.
    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|item| !item.read).count()
    }

    /// Replaces the feed with the backend's list.
    ///
    /// On failure the feed is left untouched (empty at bootstrap) and the
    /// error returned for the caller to log; a failed fetch never blocks the
    /// session.
    pub async fn refresh(&mut self) -> Result<(), ApiError> {
        let body = self.api.notifications().await?;
        let mut items: Vec<Notification> = models::parse_notifications(body)
            .into_iter()
            .map(Notification::from)
            .collect();
        items.truncate(FEED_CAPACITY);
        if let Some(max_id) = items.iter().map(|item| item.id).max() {
            // Keep the local sequence ahead of every server-assigned id.
            self.next_local_id = self.next_local_id.max(max_id + 1);
        }
        self.items = items;
        Ok(())
    }

    /// Prepends a client-side notification, evicting the oldest entry when
    /// the feed is full. Returns the generated id.
    pub fn add(&mut self, message: impl Into<String>, link: Option<String>) -> i64 {
        let id = self.next_local_id;
        self.next_local_id += 1;
        self.items.insert(
            0,
            Notification {
                id,
                message: message.into(),
                read: false,
                link,
            },
        );
        self.items.truncate(FEED_CAPACITY);
        id
    }

    /// Flags one entry as read locally (unknown id: local no-op) and informs
    /// the backend without awaiting the outcome.
    pub fn mark_read(&mut self, id: i64) {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.read = true;
        }
        let api = Arc::clone(&self.api);
        spawn_detached(async move {
            if let Err(err) = api.mark_read(&id.to_string()).await {
                tracing::warn!(id, error = %err, "notification read sync failed");
            }
        });
    }

    /// Flags every entry as read locally and informs the backend without
    /// awaiting the outcome. Idempotent.
    pub fn mark_all_read(&mut self) {
        for item in &mut self.items {
            item.read = true;
        }
        let api = Arc::clone(&self.api);
        spawn_detached(async move {
            if let Err(err) = api.mark_all_read().await {
                tracing::warn!(error = %err, "notification read-all sync failed");
            }
        });
    }
}
