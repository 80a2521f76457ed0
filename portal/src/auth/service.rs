//! Core business logic for the session lifecycle.
//!
//! This service handles session bootstrap, login, logout, token handling,
//! and role resolution. It orchestrates the remote API, the durable token
//! store, and the navigation collaborator, and is the only write path to
//! the current-user state.

use std::sync::Arc;

use journal_api::{models, LoginPayload, PortalApi, TokenStore};

use crate::auth::errors::AuthError;
use crate::auth::models::{SessionStatus, User};
use crate::navigation::{Navigator, Route};
use crate::notifications::NotificationFeed;
use crate::utils::spawn_detached;

/// Owner of the authentication lifecycle and the current identity.
pub struct SessionManager {
    api: Arc<dyn PortalApi>,
    tokens: Arc<dyn TokenStore>,
    navigator: Arc<dyn Navigator>,
    user: Option<User>,
    status: SessionStatus,
    error: Option<String>,
}

impl SessionManager {
    pub fn new(
        api: Arc<dyn PortalApi>,
        tokens: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            api,
            tokens,
            navigator,
            user: None,
            status: SessionStatus::Unknown,
            error: None,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_authenticated(&self) -> bool {
        self.status == SessionStatus::Authenticated
    }

    /// Last user-visible error from a login attempt.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Attempts to restore a previous session from the stored access token.
    ///
    /// Runs once at startup. Without a stored token this settles to
    /// unauthenticated immediately. With one, the profile fetch decides:
    /// success populates the user and then fills the feed (a feed failure is
    /// logged and otherwise ignored); any failure, including a malformed
    /// profile body, clears the stored tokens and forces the login view.
    /// The status leaves `Loading` on every path.
    pub async fn bootstrap(&mut self, feed: &mut NotificationFeed) {
        self.status = SessionStatus::Loading;
        if self.tokens.access_token().is_none() {
            self.status = SessionStatus::Unauthenticated;
            return;
        }
        match self.api.profile().await {
            Ok(body) => match models::parse_user(body) {
                Ok(raw) => {
                    self.user = Some(User::from(raw));
                    if let Err(err) = feed.refresh().await {
                        tracing::warn!(error = %err, "initial notification fetch failed");
                    }
                    self.status = SessionStatus::Authenticated;
                }
                Err(err) => {
                    let err = AuthError::MalformedProfile(err.to_string());
                    tracing::warn!(error = %err, "stored session rejected");
                    self.drop_session();
                }
            },
            Err(err) => {
                tracing::debug!(error = %err, "profile fetch failed, clearing stored session");
                self.drop_session();
            }
        }
    }

    /// Authenticates with phone and password. Returns whether a session was
    /// established; on failure the reason is available via [`Self::error`].
    ///
    /// A response that embeds a user record with an id is adopted without a
    /// second round trip. Otherwise a follow-up profile fetch is attempted,
    /// and its failure only logged: the tokens are valid, so the session
    /// proceeds to the dashboard regardless.
    pub async fn login(&mut self, phone: &str, password: &str) -> bool {
        self.status = SessionStatus::Loading;
        self.error = None;

        let body = match self.api.login(phone, password).await {
            Ok(body) => body,
            Err(err) => {
                self.error = Some(err.user_message());
                self.status = SessionStatus::Unauthenticated;
                return false;
            }
        };

        let payload = LoginPayload::from_value(body);
        let Some(access) = payload.access else {
            self.error = Some(AuthError::MissingAccessToken.to_string());
            self.status = SessionStatus::Unauthenticated;
            return false;
        };
        if let Err(err) = self.tokens.store(&access, payload.refresh.as_deref()) {
            tracing::warn!(error = %err, "failed to persist session tokens");
        }

        match payload.user.filter(|raw| !raw.id.is_empty()) {
            Some(raw) => self.user = Some(User::from(raw)),
            None => match self.api.profile().await.and_then(models::parse_user) {
                Ok(raw) => self.user = Some(User::from(raw)),
                Err(err) => {
                    tracing::warn!(error = %err, "profile fetch after login failed");
                }
            },
        }

        self.status = SessionStatus::Authenticated;
        self.navigator.navigate(Route::Dashboard);
        true
    }

    /// Ends the session: clears tokens and identity, tells the backend on a
    /// best-effort basis, and forces the login view. Idempotent.
    pub fn logout(&mut self) {
        if let Err(err) = self.tokens.clear() {
            tracing::warn!(error = %err, "failed to clear stored tokens");
        }
        self.user = None;
        self.error = None;
        self.status = SessionStatus::Unauthenticated;

        let api = Arc::clone(&self.api);
        spawn_detached(async move {
            if let Err(err) = api.logout().await {
                tracing::debug!(error = %err, "backend logout failed");
            }
        });
        self.navigator.navigate(Route::Login);
    }

    /// Collapses to a clean unauthenticated state: tokens gone, user gone,
    /// login view forced. Never leaves the session half-authenticated.
    fn drop_session(&mut self) {
        if let Err(err) = self.tokens.clear() {
            tracing::warn!(error = %err, "failed to clear stored tokens");
        }
        self.user = None;
        self.status = SessionStatus::Unauthenticated;
        self.navigator.navigate(Route::Login);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::Role;
    use crate::testing::{RecordingNavigator, StubApi};
    use journal_api::MemoryTokenStore;
    use serde_json::json;

    struct Harness {
        api: Arc<StubApi>,
        tokens: Arc<MemoryTokenStore>,
        navigator: Arc<RecordingNavigator>,
        session: SessionManager,
        feed: NotificationFeed,
    }

    fn harness(api: StubApi) -> Harness {
        let api = Arc::new(api);
        let tokens = Arc::new(MemoryTokenStore::new());
        let navigator = Arc::new(RecordingNavigator::new());
        let session = SessionManager::new(
            Arc::clone(&api) as Arc<dyn PortalApi>,
            Arc::clone(&tokens) as Arc<dyn TokenStore>,
            Arc::clone(&navigator) as Arc<dyn Navigator>,
        );
        let feed = NotificationFeed::new(Arc::clone(&api) as Arc<dyn PortalApi>);
        Harness {
            api,
            tokens,
            navigator,
            session,
            feed,
        }
    }

    #[tokio::test]
    async fn login_adopts_embedded_user_and_stores_token() {
        let mut h = harness(StubApi::new().with_login(json!({
            "access": "tok123",
            "user": {"id": "u1", "first_name": "Ali", "last_name": "Valiyev", "role": "author"}
        })));

        assert!(h.session.login("+998901234567", "secret").await);

        let user = h.session.user().expect("session user");
        assert_eq!(user.id, "u1");
        assert_eq!(user.first_name, "Ali");
        assert_eq!(user.last_name, "Valiyev");
        assert_eq!(user.role, Role::Author);
        assert_eq!(user.email, "");
        assert_eq!(h.tokens.access_token().as_deref(), Some("tok123"));
        assert_eq!(h.navigator.routes(), vec![Route::Dashboard]);
        // The embedded user made the profile round trip unnecessary.
        assert_eq!(h.api.calls(), vec!["login"]);
    }

    #[tokio::test]
    async fn login_without_access_token_fails_in_place() {
        let mut h = harness(StubApi::new().with_login(json!({})));

        assert!(!h.session.login("+998901234567", "secret").await);

        assert_eq!(
            h.session.error(),
            Some("Server response did not include access token")
        );
        assert!(h.tokens.access_token().is_none());
        assert!(h.navigator.routes().is_empty());
        assert_eq!(h.session.status(), SessionStatus::Unauthenticated);
    }

    #[tokio::test]
    async fn login_error_is_normalized_for_display() {
        let mut h = harness(StubApi::new());

        assert!(!h.session.login("+998901234567", "wrong").await);

        assert_eq!(h.session.error(), Some("Invalid credentials"));
        assert!(h.navigator.routes().is_empty());
    }

    #[tokio::test]
    async fn login_without_embedded_user_fetches_profile() {
        let mut h = harness(
            StubApi::new()
                .with_login(json!({"access_token": "tok", "refresh_token": "ref"}))
                .with_profile(json!({"id": 5, "firstName": "Laylo", "role": "reviewer"})),
        );

        assert!(h.session.login("+998", "pw").await);

        let user = h.session.user().expect("fetched user");
        assert_eq!(user.id, "5");
        assert_eq!(user.role, Role::Reviewer);
        assert_eq!(h.tokens.refresh_token().as_deref(), Some("ref"));
        assert_eq!(h.api.calls(), vec!["login", "profile"]);
    }

    #[tokio::test]
    async fn login_survives_failed_follow_up_profile_fetch() {
        // Tokens are valid, so the session proceeds without a user record.
        let mut h = harness(StubApi::new().with_login(json!({"access": "tok"})));

        assert!(h.session.login("+998", "pw").await);

        assert!(h.session.user().is_none());
        assert!(h.session.error().is_none());
        assert_eq!(h.session.status(), SessionStatus::Authenticated);
        assert_eq!(h.navigator.routes(), vec![Route::Dashboard]);
    }

    #[tokio::test]
    async fn bootstrap_without_token_settles_unauthenticated() {
        let mut h = harness(StubApi::new());

        let Harness { session, feed, .. } = &mut h;
        session.bootstrap(feed).await;

        assert_eq!(h.session.status(), SessionStatus::Unauthenticated);
        assert!(h.api.calls().is_empty());
        assert!(h.navigator.routes().is_empty());
    }

    #[tokio::test]
    async fn bootstrap_restores_session_and_fills_feed() {
        let mut h = harness(
            StubApi::new()
                .with_profile(json!({"id": "u1", "first_name": "Ali", "role": "journal_admin"}))
                .with_notifications(json!({"data": [
                    {"id": 1, "message": "review assigned", "is_read": false}
                ]})),
        );
        h.tokens.store("tok", None).unwrap();

        let Harness { session, feed, .. } = &mut h;
        session.bootstrap(feed).await;

        assert_eq!(h.session.status(), SessionStatus::Authenticated);
        assert_eq!(h.session.user().unwrap().role, Role::JournalAdmin);
        assert_eq!(h.feed.items().len(), 1);
        assert_eq!(h.feed.unread_count(), 1);
        // Profile strictly precedes the notification fetch.
        assert_eq!(h.api.calls(), vec!["profile", "notifications"]);
    }

    #[tokio::test]
    async fn bootstrap_with_rejected_profile_clears_everything() {
        let mut h = harness(StubApi::new());
        h.tokens.store("stale", Some("ref")).unwrap();

        let Harness { session, feed, .. } = &mut h;
        session.bootstrap(feed).await;

        assert!(h.session.user().is_none());
        assert!(h.tokens.access_token().is_none());
        assert!(h.tokens.refresh_token().is_none());
        assert_eq!(h.session.status(), SessionStatus::Unauthenticated);
        assert_eq!(h.navigator.routes(), vec![Route::Login]);
    }

    #[tokio::test]
    async fn bootstrap_tolerates_notification_failure() {
        let mut h = harness(
            StubApi::new()
                .with_profile(json!({"id": "u1"}))
                .failing_notifications(),
        );
        h.tokens.store("tok", None).unwrap();

        let Harness { session, feed, .. } = &mut h;
        session.bootstrap(feed).await;

        assert_eq!(h.session.status(), SessionStatus::Authenticated);
        assert!(h.feed.items().is_empty());
        assert!(h.navigator.routes().is_empty());
    }

    #[tokio::test]
    async fn logout_clears_tokens_and_user_and_is_idempotent() {
        let mut h = harness(StubApi::new().with_login(json!({
            "access": "tok",
            "user": {"id": "u1"}
        })));
        assert!(h.session.login("+998", "pw").await);

        h.session.logout();
        h.session.logout();

        assert!(h.session.user().is_none());
        assert!(h.tokens.access_token().is_none());
        assert_eq!(h.session.status(), SessionStatus::Unauthenticated);
        assert_eq!(
            h.navigator.routes(),
            vec![Route::Dashboard, Route::Login, Route::Login]
        );
    }
}
