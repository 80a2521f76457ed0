//! End-to-end session flows against the stubbed backend: login, restart
//! with a persisted token, bootstrap restore, and logout.

use std::sync::Arc;

use journal_api::{FileTokenStore, PortalApi, TokenStore};
use journal_portal::auth::{Role, SessionManager, SessionStatus};
use journal_portal::navigation::{self, Navigator, Route};
use journal_portal::notifications::NotificationFeed;
use journal_portal::testing::{RecordingNavigator, StubApi};
use serde_json::json;
use tempfile::TempDir;

fn wire(
    api: Arc<StubApi>,
    tokens: Arc<dyn TokenStore>,
    navigator: Arc<RecordingNavigator>,
) -> (SessionManager, NotificationFeed) {
    let session = SessionManager::new(
        Arc::clone(&api) as Arc<dyn PortalApi>,
        tokens,
        navigator as Arc<dyn Navigator>,
    );
    let feed = NotificationFeed::new(api as Arc<dyn PortalApi>);
    (session, feed)
}

#[tokio::test]
async fn login_then_restart_restores_the_session() {
    let dir = TempDir::new().unwrap();
    let token_path = dir.path().join("tokens.json");

    // First run: sign in. The embedded user is adopted directly.
    {
        let api = Arc::new(StubApi::new().with_login(json!({
            "access": "tok123",
            "refresh": "ref456",
            "user": {"id": "u1", "first_name": "Ali", "last_name": "Valiyev", "role": "journal_admin"}
        })));
        let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::open(&token_path).unwrap());
        let navigator = Arc::new(RecordingNavigator::new());
        let (mut session, _feed) = wire(api, tokens, Arc::clone(&navigator));

        assert!(session.login("+998901234567", "secret").await);
        assert_eq!(session.user().unwrap().role, Role::JournalAdmin);
        assert_eq!(navigator.routes(), vec![Route::Dashboard]);
    }

    // Second run: the persisted token restores the session from the profile
    // endpoint and the feed is filled in the same pass.
    let api = Arc::new(
        StubApi::new()
            .with_profile(json!({"id": "u1", "first_name": "Ali", "role": "journal_admin"}))
            .with_notifications(json!({"data": [
                {"id": 1, "message": "review assigned", "is_read": false},
                {"id": 2, "message": "article accepted", "is_read": true}
            ]})),
    );
    let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::open(&token_path).unwrap());
    let navigator = Arc::new(RecordingNavigator::new());
    let (mut session, mut feed) = wire(Arc::clone(&api), Arc::clone(&tokens), navigator);

    session.bootstrap(&mut feed).await;

    assert_eq!(session.status(), SessionStatus::Authenticated);
    assert_eq!(feed.items().len(), 2);
    assert_eq!(feed.unread_count(), 1);
    assert_eq!(api.calls(), vec!["profile", "notifications"]);

    // The restored role drives the navigation entries the shell renders.
    let nav = navigation::entries(session.user().map(|user| user.role));
    assert!(nav.iter().any(|entry| entry.destination == "/udk-requests"));

    // Logout clears the persisted pair for good.
    session.logout();
    assert!(tokens.access_token().is_none());
    drop(session);
    let reopened = FileTokenStore::open(&token_path).unwrap();
    assert!(reopened.access_token().is_none());
    assert!(reopened.refresh_token().is_none());
}

#[tokio::test]
async fn stale_token_falls_back_to_login_view() {
    let dir = TempDir::new().unwrap();
    let tokens: Arc<dyn TokenStore> =
        Arc::new(FileTokenStore::open(dir.path().join("tokens.json")).unwrap());
    tokens.store("expired", None).unwrap();

    let api = Arc::new(StubApi::new());
    let navigator = Arc::new(RecordingNavigator::new());
    let (mut session, mut feed) = wire(api, Arc::clone(&tokens), Arc::clone(&navigator));

    session.bootstrap(&mut feed).await;

    assert_eq!(session.status(), SessionStatus::Unauthenticated);
    assert!(session.user().is_none());
    assert!(tokens.access_token().is_none());
    assert_eq!(navigator.routes(), vec![Route::Login]);
}
