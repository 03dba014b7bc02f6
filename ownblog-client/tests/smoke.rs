//! Сквозной сценарий против реального backend'а. Запускается вручную:
//! `OWNBLOG_SERVER=http://127.0.0.1:3000 cargo test -p ownblog-client -- --ignored`

use std::time::{SystemTime, UNIX_EPOCH};

use ownblog_client::{ApiClient, ClientError, MemoryTokenStore, ObjectId, Session};

fn unique_suffix() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock must be after unix epoch")
        .as_nanos();
    format!("{nanos}")
}

#[tokio::test]
#[ignore = "requires running blog backend"]
async fn full_blog_flow() {
    let base_url =
        std::env::var("OWNBLOG_SERVER").unwrap_or_else(|_| "http://127.0.0.1:3000".to_string());
    let client = ApiClient::new(base_url);

    let suffix = unique_suffix();
    let name = format!("smoke_user_{suffix}");
    let email = format!("smoke_{suffix}@example.com");
    let password = "password123";

    client
        .sign_up(&name, &email, password)
        .await
        .expect("sign_up must succeed");

    let mut session = Session::new(client, MemoryTokenStore::new());
    session.initialize().await;
    assert!(
        session.login(&email, password).await,
        "login must authenticate"
    );
    let token = session
        .token()
        .expect("authenticated session must hold a token")
        .to_string();
    let client = session.client().clone();

    let tag = client
        .create_tag(&format!("smoke-{suffix}"))
        .await
        .expect("create_tag must succeed");

    let created = client
        .create_blog(&token, "smoke title", "smoke body", &[tag.id.clone()])
        .await
        .expect("create_blog must succeed");
    assert_eq!(created.title, "smoke title");
    let blog_id = ObjectId::parse(&created.id).expect("backend must return a valid blog id");

    let fetched = client
        .get_blog(&token, &blog_id)
        .await
        .expect("get_blog must succeed");
    assert_eq!(fetched.id, created.id);

    let listed = client
        .list_blogs(&token)
        .await
        .expect("list_blogs must succeed");
    assert!(listed.iter().any(|blog| blog.id == created.id));

    client
        .update_blog(&token, &blog_id, "smoke title updated", "smoke body updated")
        .await
        .expect("update_blog must succeed");

    client
        .remove_tag_from_blog(&token, &blog_id, &tag.id)
        .await
        .expect("remove_tag_from_blog must succeed");
    client
        .add_tag_to_blog(&token, &blog_id, &tag.id)
        .await
        .expect("add_tag_to_blog must succeed");

    let comment = client
        .add_comment(&token, &blog_id, "smoke comment")
        .await
        .expect("add_comment must succeed");
    let comment_id = ObjectId::parse(&comment.id).expect("backend must return a valid comment id");

    let comments = client
        .list_comments(&token, &blog_id)
        .await
        .expect("list_comments must succeed");
    assert!(comments.iter().any(|item| item.id == comment.id));

    client
        .delete_comment(&token, &blog_id, &comment_id)
        .await
        .expect("delete_comment must succeed");

    client
        .delete_blog(&token, &blog_id)
        .await
        .expect("delete_blog must succeed");
    let after_delete = client.get_blog(&token, &blog_id).await;
    assert!(matches!(after_delete, Err(ClientError::NotFound)));

    session.logout();
    assert!(!session.is_authenticated());
}
