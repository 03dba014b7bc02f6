//! Интеграционные тесты HTTP-клиента против встроенного тестового стенда.

mod common;

use axum::Json;
use axum::Router;
use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::{delete, get, post, put};
use serde_json::{Value, json};

use ownblog_client::{ApiClient, ClientError, EMPTY_BODY_PLACEHOLDER, ObjectId};

const BLOG_ID: &str = "507f1f77bcf86cd799439011";
const COMMENT_ID: &str = "507f1f77bcf86cd799439012";
const TAG_ID: &str = "507f1f77bcf86cd799439013";

fn object_id(raw: &str) -> ObjectId {
    ObjectId::parse(raw).expect("test id must be a valid object id")
}

#[tokio::test]
async fn sign_in_posts_credentials_and_reads_access_token() {
    let app = Router::new().route(
        "/auth/signin",
        post(|Json(body): Json<Value>| async move {
            // стенд возвращает полученные поля обратно, чтобы тест их проверил
            let token = format!("issued-for-{}", body["email"].as_str().unwrap_or("?"));
            Json(json!({ "accessToken": token }))
        }),
    );
    let base_url = common::spawn(app).await;

    let client = ApiClient::new(base_url);
    let auth = client
        .sign_in("user@example.com", "secret")
        .await
        .expect("sign_in must succeed");
    assert_eq!(auth.access_token, "issued-for-user@example.com");
}

#[tokio::test]
async fn sign_up_always_sends_user_role() {
    let app = Router::new().route(
        "/auth/signup",
        post(|Json(body): Json<Value>| async move {
            format!(
                "role={} name={}",
                body["role"].as_str().unwrap_or("?"),
                body["name"].as_str().unwrap_or("?")
            )
        }),
    );
    let base_url = common::spawn(app).await;

    let client = ApiClient::new(base_url);
    let response = client
        .sign_up("Alice", "alice@example.com", "secret")
        .await
        .expect("sign_up must succeed");
    assert_eq!(response, "role=user name=Alice");
}

#[tokio::test]
async fn profile_request_carries_bearer_token() {
    let app = Router::new().route(
        "/users/me",
        get(|headers: HeaderMap| async move {
            let auth = headers
                .get(header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default()
                .to_string();
            Json(json!({ "id": "u1", "name": auth, "email": "a@example.com" }))
        }),
    );
    let base_url = common::spawn(app).await;

    let client = ApiClient::new(base_url);
    let user = client
        .get_profile("T")
        .await
        .expect("get_profile must succeed");
    assert_eq!(user.name, "Bearer T");
}

#[tokio::test]
async fn tag_catalogue_requests_carry_no_token() {
    let app = Router::new().route(
        "/tags",
        get(|headers: HeaderMap| async move {
            let name = if headers.contains_key(header::AUTHORIZATION) {
                "with-auth"
            } else {
                "anonymous"
            };
            Json(json!([{ "id": TAG_ID, "name": name }]))
        }),
    );
    let base_url = common::spawn(app).await;

    let client = ApiClient::new(base_url);
    let tags = client.list_tags().await.expect("list_tags must succeed");
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].name, "anonymous");
}

#[tokio::test]
async fn unauthorized_status_maps_to_unauthorized() {
    let app = Router::new().route(
        "/blogs",
        get(|| async { (StatusCode::UNAUTHORIZED, "Invalid token") }),
    );
    let base_url = common::spawn(app).await;

    let client = ApiClient::new(base_url);
    let err = client
        .list_blogs("bad")
        .await
        .expect_err("list_blogs must fail");
    assert!(matches!(err, ClientError::Unauthorized));
}

#[tokio::test]
async fn missing_blog_maps_to_not_found() {
    let app = Router::new().route(
        "/blogs/{id}",
        get(|| async { (StatusCode::NOT_FOUND, "Blog not found") }),
    );
    let base_url = common::spawn(app).await;

    let client = ApiClient::new(base_url);
    let err = client
        .get_blog("T", &object_id(BLOG_ID))
        .await
        .expect_err("get_blog must fail");
    assert!(matches!(err, ClientError::NotFound));
}

#[tokio::test]
async fn backend_error_body_surfaces_as_api_message() {
    let app = Router::new().route(
        "/blogs",
        post(|| async { (StatusCode::BAD_REQUEST, "Title must not be empty") }),
    );
    let base_url = common::spawn(app).await;

    let client = ApiClient::new(base_url);
    let err = client
        .create_blog("T", "", "body", &[])
        .await
        .expect_err("create_blog must fail");
    match err {
        ClientError::Api(message) => assert_eq!(message, "Title must not be empty"),
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_success_body_becomes_placeholder() {
    let app = Router::new().route("/blogs/{id}", put(|| async { StatusCode::NO_CONTENT }));
    let base_url = common::spawn(app).await;

    let client = ApiClient::new(base_url);
    let response = client
        .update_blog("T", &object_id(BLOG_ID), "title", "body")
        .await
        .expect("update_blog must succeed");
    assert_eq!(response, EMPTY_BODY_PLACEHOLDER);
}

#[tokio::test]
async fn malformed_success_body_maps_to_decode_error() {
    let app = Router::new().route("/tags", get(|| async { "definitely not json" }));
    let base_url = common::spawn(app).await;

    let client = ApiClient::new(base_url);
    let err = client.list_tags().await.expect_err("list_tags must fail");
    assert!(matches!(err, ClientError::Decode(_)));
}

#[tokio::test]
async fn create_blog_sends_tag_ids_in_camel_case() {
    let app = Router::new().route(
        "/blogs",
        post(|Json(body): Json<Value>| async move {
            // первый tagId уходит в title ответа, чтобы тест проверил формат
            let first_tag = body["tagIds"][0].as_str().unwrap_or("missing").to_string();
            Json(json!({
                "id": BLOG_ID,
                "title": first_tag,
                "body": body["body"],
                "userId": "507f1f77bcf86cd799439014",
            }))
        }),
    );
    let base_url = common::spawn(app).await;

    let client = ApiClient::new(base_url);
    let created = client
        .create_blog("T", "title", "body", &[TAG_ID.to_string()])
        .await
        .expect("create_blog must succeed");
    assert_eq!(created.title, TAG_ID);
    assert!(created.tags.is_empty());
}

#[tokio::test]
async fn comment_routes_use_nested_paths() {
    let app = Router::new()
        .route(
            "/blogs/{blog_id}/comments",
            get(|Path(blog_id): Path<String>| async move {
                Json(json!([{
                    "id": COMMENT_ID,
                    "body": "hello",
                    "blogId": blog_id,
                    "user": { "id": "u1", "name": "Alice" },
                }]))
            }),
        )
        .route(
            "/blogs/{blog_id}/comments/{comment_id}",
            delete(
                |Path((blog_id, comment_id)): Path<(String, String)>| async move {
                    format!("deleted {blog_id}/{comment_id}")
                },
            ),
        );
    let base_url = common::spawn(app).await;

    let client = ApiClient::new(base_url);
    let blog_id = object_id(BLOG_ID);

    let comments = client
        .list_comments("T", &blog_id)
        .await
        .expect("list_comments must succeed");
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].blog_id, BLOG_ID);
    assert_eq!(comments[0].user.name, "Alice");

    let response = client
        .delete_comment("T", &blog_id, &object_id(COMMENT_ID))
        .await
        .expect("delete_comment must succeed");
    assert_eq!(response, format!("deleted {BLOG_ID}/{COMMENT_ID}"));
}

#[tokio::test]
async fn tag_attach_and_detach_use_expected_routes() {
    let app = Router::new()
        .route(
            "/blogs/{blog_id}/add-tag",
            put(|Json(body): Json<Value>| async move {
                format!("attached {}", body["tagId"].as_str().unwrap_or("missing"))
            }),
        )
        .route(
            "/blogs/{blog_id}/delete-tag/{tag_id}",
            delete(|Path((_, tag_id)): Path<(String, String)>| async move {
                format!("detached {tag_id}")
            }),
        );
    let base_url = common::spawn(app).await;

    let client = ApiClient::new(base_url);
    let blog_id = object_id(BLOG_ID);

    let attached = client
        .add_tag_to_blog("T", &blog_id, TAG_ID)
        .await
        .expect("add_tag_to_blog must succeed");
    assert_eq!(attached, format!("attached {TAG_ID}"));

    let detached = client
        .remove_tag_from_blog("T", &blog_id, TAG_ID)
        .await
        .expect("remove_tag_from_blog must succeed");
    assert_eq!(detached, format!("detached {TAG_ID}"));
}
