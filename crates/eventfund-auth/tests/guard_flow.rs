//! End-to-end login, route checks and logout.

use eventfund_auth::{
    login, logout, AccessGuard, AccessPolicy, AuthApi, Credentials, DenyReason, FileStore,
    HttpAuthApi, MockAuthApi, Role, RouteOutcome, RouteTable, Session, SessionStore,
    TokenVerifier,
};
use eventfund_common_http::{HttpClient, HttpConfig};
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn file_store(dir: &TempDir) -> Arc<FileStore> {
    Arc::new(FileStore::new(dir.path().join("session.json")))
}

#[tokio::test]
async fn test_login_then_dashboard_routes() {
    let dir = TempDir::new().unwrap();
    let store = file_store(&dir);
    let api = Arc::new(MockAuthApi::new());

    let session = login(
        api.as_ref(),
        store.as_ref(),
        &Credentials::new("officer@eventfund.io", "officer123"),
    )
    .await
    .unwrap();
    assert_eq!(session.role, Role::Officer);

    let guard = AccessGuard::new(store.clone()).with_verifier(api.clone());
    let table = RouteTable::dashboard();

    assert!(table.authorize(&guard, "/officer/dashboard").await.is_allowed());
    assert!(table.authorize(&guard, "/proposals/7").await.is_allowed());
    assert!(!table.authorize(&guard, "/events").await.is_allowed());
    assert_eq!(table.authorize(&guard, "/").await, RouteOutcome::Public);

    // The session survives in a fresh store over the same file.
    let reopened = FileStore::new(dir.path().join("session.json"));
    assert_eq!(Session::load(&reopened).unwrap(), Some(session));

    logout(store.as_ref()).unwrap();
    assert!(!table.authorize(&guard, "/officer").await.is_allowed());
}

#[tokio::test]
async fn test_revoked_token_clears_file_session() {
    let dir = TempDir::new().unwrap();
    let store = file_store(&dir);
    let api = Arc::new(MockAuthApi::new());

    login(
        api.as_ref(),
        store.as_ref(),
        &Credentials::new("admin@eventfund.io", "admin123"),
    )
    .await
    .unwrap();
    api.revoke("mock-token-admin");

    let guard = AccessGuard::new(store.clone()).with_verifier(api.clone());
    let decision = guard.authorize(&AccessPolicy::only(Role::Admin)).await;
    assert_eq!(decision.reason(), Some(DenyReason::VerificationFailed));
    assert_eq!(store.get("auth_token").unwrap(), None);
    assert_eq!(store.get("user_role").unwrap(), None);
}

#[tokio::test]
async fn test_guard_over_http_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"token": "jwt-1", "role": "ORGANIZER"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("authorization", "Bearer jwt-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "9",
            "email": "org@eventfund.io",
            "name": "Org",
            "role": "organizer"
        })))
        .mount(&server)
        .await;

    let api = Arc::new(HttpAuthApi::new(HttpClient::new(HttpConfig::new(server.uri())).unwrap()));
    let dir = TempDir::new().unwrap();
    let store = file_store(&dir);

    let auth: &dyn AuthApi = api.as_ref();
    let session = login(auth, store.as_ref(), &Credentials::new("org@eventfund.io", "pw"))
        .await
        .unwrap();
    assert_eq!(session.role, Role::Organizer);

    let verifier: Arc<dyn TokenVerifier> = api.clone();
    let guard = AccessGuard::new(store).with_verifier(verifier);
    assert!(guard
        .authorize(&AccessPolicy::new([Role::Organizer, Role::Admin]))
        .await
        .is_allowed());
}
