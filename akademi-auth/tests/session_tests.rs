mod common;

use akademi_auth::{
    AuthState, BINDING_KEY_PREFIX, CODE_MASK_KEY, SESSION_KEY, Session, SessionStore, TOKEN_KEY,
};
use akademi_license::MASK_PLACEHOLDER;
use akademi_storage::{MemoryStore, ProfileStore};
use akademi_types::Clock;
use chrono::TimeDelta;
use common::{device, manual_clock, single_profile_service};
use pretty_assertions::assert_eq;
use std::sync::Arc;

#[tokio::test]
async fn session_expires_lazily_after_24_hours() {
    let store = Arc::new(MemoryStore::new());
    let clock = manual_clock();
    let auth = single_profile_service(store.clone(), device(1), clock.clone());

    assert!(auth.redeem("SA-AAAA-BBBB-CCCC").await.ok);
    assert!(auth.is_authed());

    clock.advance(TimeDelta::hours(23) + TimeDelta::minutes(59));
    assert!(auth.is_authed(), "still inside the 24h window");

    clock.advance(TimeDelta::minutes(1));
    assert!(!auth.is_authed(), "now >= expiresAt means expired");

    // the implicit cleanup cleared every session key
    assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    assert_eq!(store.get(CODE_MASK_KEY).unwrap(), None);
    assert_eq!(store.get(SESSION_KEY).unwrap(), None);

    // but the binding survives
    let key = format!("{BINDING_KEY_PREFIX}SA-AAAA-BBBB-CCCC");
    assert!(store.get(&key).unwrap().is_some());
}

#[tokio::test]
async fn status_is_a_pure_query() {
    let store = Arc::new(MemoryStore::new());
    let clock = manual_clock();
    let auth = single_profile_service(store.clone(), device(1), clock.clone());

    assert!(auth.redeem("SA-AAAA-BBBB-CCCC").await.ok);
    clock.advance(TimeDelta::hours(25));

    assert!(matches!(auth.status(), AuthState::Expired(_)));
    // querying did not clear anything
    assert!(store.get(TOKEN_KEY).unwrap().is_some());
    assert!(matches!(auth.status(), AuthState::Expired(_)));
}

#[tokio::test]
async fn purge_expired_is_the_explicit_cleanup() {
    let store = Arc::new(MemoryStore::new());
    let clock = manual_clock();
    let auth = single_profile_service(store.clone(), device(1), clock.clone());

    assert!(!auth.purge_expired(), "nothing to purge while anonymous");

    assert!(auth.redeem("SA-AAAA-BBBB-CCCC").await.ok);
    assert!(!auth.purge_expired(), "nothing to purge while active");

    clock.advance(TimeDelta::hours(25));
    assert!(auth.purge_expired());
    assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    assert!(!auth.purge_expired(), "second purge finds nothing");
}

#[tokio::test]
async fn status_tristate_transitions() {
    let store = Arc::new(MemoryStore::new());
    let clock = manual_clock();
    let auth = single_profile_service(store, device(1), clock.clone());

    assert_eq!(auth.status(), AuthState::Anonymous);

    assert!(auth.redeem("SA-DEMO-2024").await.ok);
    match auth.status() {
        AuthState::Active(Some(session)) => assert!(session.code.is_demo()),
        other => panic!("expected active session, got {other:?}"),
    }

    clock.advance(TimeDelta::hours(24));
    assert!(matches!(auth.status(), AuthState::Expired(_)));

    auth.logout().await;
    assert_eq!(auth.status(), AuthState::Anonymous);
}

#[tokio::test]
async fn token_without_session_still_counts_as_logged_in() {
    let store = Arc::new(MemoryStore::new());
    let auth = single_profile_service(store.clone(), device(1), manual_clock());

    // a stale token with no session record; expiry cannot be observed
    store.set(TOKEN_KEY, "demo-token-123").unwrap();
    assert_eq!(auth.status(), AuthState::Active(None));
    assert!(auth.is_authed());
}

#[tokio::test]
async fn malformed_session_is_treated_as_absent() {
    let store = Arc::new(MemoryStore::new());
    let auth = single_profile_service(store.clone(), device(1), manual_clock());

    store.set(TOKEN_KEY, "demo-token-123").unwrap();
    store.set(SESSION_KEY, "{definitely not json").unwrap();

    assert!(auth.session().is_none());
    assert_eq!(auth.status(), AuthState::Active(None));
}

#[tokio::test]
async fn logout_clears_everything_and_is_idempotent() {
    let store = Arc::new(MemoryStore::new());
    let auth = single_profile_service(store.clone(), device(1), manual_clock());

    assert!(auth.redeem("SA-AAAA-BBBB-CCCC").await.ok);
    auth.logout().await;

    assert!(auth.session().is_none());
    assert!(!auth.is_authed());
    assert_eq!(auth.code_mask(), MASK_PLACEHOLDER);
    assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    assert_eq!(store.get(CODE_MASK_KEY).unwrap(), None);
    assert_eq!(store.get(SESSION_KEY).unwrap(), None);

    // logging out again is a no-op
    auth.logout().await;
    assert!(auth.session().is_none());
}

#[tokio::test]
async fn session_store_roundtrips_camel_case_json() {
    let store: Arc<dyn ProfileStore> = Arc::new(MemoryStore::new());
    let sessions = SessionStore::new(store.clone());
    let clock = manual_clock();

    let session = Session {
        user_id: "demo-user-00000001".to_string().into(),
        code: "SA-AAAA-BBBB-CCCC".parse().unwrap(),
        device_id: device(1),
        login_at: clock.now(),
        package: akademi_auth::Package::PremiumPro,
        expires_at: clock.now() + TimeDelta::hours(24),
    };

    sessions.save("demo-token-42", &session).unwrap();

    let raw = store.get(SESSION_KEY).unwrap().unwrap();
    assert!(raw.contains("\"userId\""));
    assert!(raw.contains("\"deviceId\""));
    assert!(raw.contains("\"loginAt\""));
    assert!(raw.contains("\"expiresAt\""));
    assert!(raw.contains("\"premium-pro\""));

    assert_eq!(sessions.load().unwrap(), Some(session));
    assert_eq!(sessions.token().unwrap(), Some("demo-token-42".to_string()));

    sessions.clear().unwrap();
    assert_eq!(sessions.load().unwrap(), None);
    assert_eq!(sessions.token().unwrap(), None);
    assert_eq!(sessions.code_mask().unwrap(), None);
}
