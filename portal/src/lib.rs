//! Client-side core for the journal management portal.
//!
//! This crate owns the stateful heart of the portal: the session manager
//! (authentication lifecycle, token handling, role resolution), the
//! notification feed (optimistic local mutation with best-effort backend
//! sync), and the role-based navigation configuration. Rendering and the
//! individual screens consume these pieces through their public interfaces.

pub mod auth;
pub mod config;
pub mod errors;
pub mod navigation;
pub mod notifications;
pub mod testing;
mod utils;

use std::sync::Arc;

use journal_api::{ClientConfig, FileTokenStore, HttpApiClient, PortalApi, TokenStore};

use crate::auth::SessionManager;
use crate::config::PortalConfig;
use crate::errors::PortalError;
use crate::navigation::Navigator;
use crate::notifications::NotificationFeed;

/// Fully wired portal core: session manager plus notification feed sharing
/// one API client and one token store.
///
/// There is exactly one `Portal` per process. All session and feed mutation
/// goes through the accessors here; consumers hold the rest of the state
/// read-only.
pub struct Portal {
    session: SessionManager,
    feed: NotificationFeed,
}

impl Portal {
    /// Wires the file-backed token store and the HTTP client according to
    /// `config` and hands both to the stateful components.
    pub fn new(config: &PortalConfig, navigator: Arc<dyn Navigator>) -> Result<Self, PortalError> {
        let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::open(&config.token_store_path)?);
        let client = HttpApiClient::new(
            ClientConfig {
                base_url: config.api_base_url.clone(),
                timeout_secs: config.request_timeout_secs,
            },
            Arc::clone(&tokens),
        )?;
        let api: Arc<dyn PortalApi> = Arc::new(client);
        Ok(Self {
            session: SessionManager::new(Arc::clone(&api), tokens, navigator),
            feed: NotificationFeed::new(api),
        })
    }

    /// Restores a previous session if a token is stored; runs once at startup.
    pub async fn bootstrap(&mut self) {
        let Self { session, feed } = self;
        session.bootstrap(feed).await;
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionManager {
        &mut self.session
    }

    pub fn feed(&self) -> &NotificationFeed {
        &self.feed
    }

    pub fn feed_mut(&mut self) -> &mut NotificationFeed {
        &mut self.feed
    }
}
