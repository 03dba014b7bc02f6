//! Интеграционные тесты жизненного цикла сессии против тестового стенда.

mod common;

use axum::Json;
use axum::Router;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use serde_json::{Value, json};

use ownblog_client::{ApiClient, MemoryTokenStore, Session, TokenStore};

/// Стенд с двумя ручками: `signin` принимает только пароль `secret` и выдаёт
/// токен `T`, `users/me` отвечает профилем только на `Bearer T`.
fn auth_router() -> Router {
    Router::new()
        .route(
            "/auth/signin",
            post(|Json(body): Json<Value>| async move {
                if body["password"] == "secret" {
                    Json(json!({ "accessToken": "T" })).into_response()
                } else {
                    (StatusCode::UNAUTHORIZED, "Invalid credentials").into_response()
                }
            }),
        )
        .route(
            "/users/me",
            get(|headers: HeaderMap| async move {
                let auth = headers
                    .get(header::AUTHORIZATION)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or_default();
                if auth == "Bearer T" {
                    Json(json!({ "id": "u1", "name": "Alice", "email": "a@example.com" }))
                        .into_response()
                } else {
                    (StatusCode::UNAUTHORIZED, "Invalid token").into_response()
                }
            }),
        )
}

async fn spawn_session() -> (Session<MemoryTokenStore>, MemoryTokenStore) {
    let base_url = common::spawn(auth_router()).await;
    let store = MemoryTokenStore::new();
    (
        Session::new(ApiClient::new(base_url), store.clone()),
        store,
    )
}

#[tokio::test]
async fn initialize_without_stored_token_just_finishes_loading() {
    let (mut session, store) = spawn_session().await;
    session.initialize().await;

    assert!(!session.is_loading());
    assert!(!session.is_authenticated());
    assert!(session.token().is_none());
    assert!(store.load().is_none());
}

#[tokio::test]
async fn initialize_with_valid_stored_token_authenticates() {
    let (mut session, store) = spawn_session().await;
    store.save("T").expect("save must succeed");

    session.initialize().await;

    assert!(!session.is_loading());
    assert!(session.is_authenticated());
    assert_eq!(session.token(), Some("T"));
    assert_eq!(session.user().map(|user| user.name.as_str()), Some("Alice"));
}

#[tokio::test]
async fn initialize_with_rejected_token_clears_store_and_state() {
    let (mut session, store) = spawn_session().await;
    store.save("stale").expect("save must succeed");

    session.initialize().await;

    assert!(!session.is_loading());
    assert!(!session.is_authenticated());
    assert!(session.token().is_none());
    assert!(session.user().is_none());
    assert!(store.load().is_none());
}

#[tokio::test]
async fn login_success_authenticates_and_persists_token() {
    let (mut session, store) = spawn_session().await;
    session.initialize().await;

    let ok = session.login("a@example.com", "secret").await;

    assert!(ok);
    assert!(session.is_authenticated());
    assert!(!session.is_loading());
    assert_eq!(session.token(), Some("T"));
    assert_eq!(store.load().as_deref(), Some("T"));
    assert_eq!(session.user().map(|user| user.name.as_str()), Some("Alice"));
}

#[tokio::test]
async fn rejected_login_leaves_state_untouched() {
    let (mut session, store) = spawn_session().await;
    session.initialize().await;

    let ok = session.login("a@example.com", "wrong").await;

    assert!(!ok);
    assert!(!session.is_authenticated());
    assert!(!session.is_loading());
    assert!(session.token().is_none());
    assert!(store.load().is_none());
}

#[tokio::test]
async fn login_with_empty_token_response_fails_without_persisting() {
    let app = Router::new().route(
        "/auth/signin",
        post(|| async { Json(json!({ "accessToken": "" })) }),
    );
    let base_url = common::spawn(app).await;
    let store = MemoryTokenStore::new();
    let mut session = Session::new(ApiClient::new(base_url), store.clone());
    session.initialize().await;

    let ok = session.login("a@example.com", "secret").await;

    assert!(!ok);
    assert!(!session.is_authenticated());
    assert!(session.token().is_none());
    assert!(store.load().is_none());
}

#[tokio::test]
async fn logout_clears_token_everywhere() {
    let (mut session, store) = spawn_session().await;
    session.initialize().await;
    assert!(session.login("a@example.com", "secret").await);

    session.logout();

    assert!(!session.is_authenticated());
    assert!(session.token().is_none());
    assert!(session.user().is_none());
    assert!(store.load().is_none());
}
