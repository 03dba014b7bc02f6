use gloo_net::http::Request;
use serde::de::DeserializeOwned;

use crate::models::{
    AddCommentRequest, AddTagRequest, Blog, Comment, CreateBlogRequest, CreateTagRequest,
    SignInRequest, SignInResponse, SignUpRequest, Tag, UpdateBlogRequest, UpdateProfileRequest,
    User,
};

const API_BASE_URL: &str = match option_env!("WASM_API_BASE_URL") {
    Some(value) => value,
    None => "http://127.0.0.1:3000",
};

/// Роль, с которой регистрируются новые пользователи.
const SIGNUP_ROLE: &str = "user";

#[derive(Debug, Clone)]
pub(crate) enum ApiError {
    Network(String),
    Http { status: u16, message: String },
    Decode(String),
}

impl core::fmt::Display for ApiError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "network error: {msg}"),
            Self::Http { status, message } => write!(f, "http error {status}: {message}"),
            Self::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

fn endpoint(path: &str) -> String {
    format!(
        "{}/{}",
        API_BASE_URL.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

async fn parse_json<T: DeserializeOwned>(
    response: gloo_net::http::Response,
) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|err| ApiError::Decode(err.to_string()))
}

async fn parse_error_body(response: gloo_net::http::Response) -> ApiError {
    let status = response.status();
    let text = response
        .text()
        .await
        .unwrap_or_else(|_| "request failed".to_string());

    let fallback = match status {
        400 => "Некорректный запрос".to_string(),
        401 => "Требуется авторизация".to_string(),
        403 => "Недостаточно прав для этой операции".to_string(),
        404 => "Ресурс не найден".to_string(),
        409 => "Конфликт данных (например, пользователь уже существует)".to_string(),
        500..=599 => "Ошибка сервера".to_string(),
        _ => format!("HTTP ошибка {status}"),
    };

    let message = if text.trim().is_empty() { fallback } else { text };

    ApiError::Http { status, message }
}

pub(crate) async fn sign_in(email: &str, password: &str) -> Result<SignInResponse, ApiError> {
    let payload = SignInRequest {
        email: email.to_string(),
        password: password.to_string(),
    };

    let response = Request::post(&endpoint("/auth/signin"))
        .json(&payload)
        .map_err(|err| ApiError::Network(err.to_string()))?
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;

    if !response.ok() {
        return Err(parse_error_body(response).await);
    }

    parse_json(response).await
}

pub(crate) async fn sign_up(name: &str, email: &str, password: &str) -> Result<(), ApiError> {
    let payload = SignUpRequest {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        role: SIGNUP_ROLE.to_string(),
    };

    let response = Request::post(&endpoint("/auth/signup"))
        .json(&payload)
        .map_err(|err| ApiError::Network(err.to_string()))?
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;

    if !response.ok() {
        return Err(parse_error_body(response).await);
    }

    Ok(())
}

pub(crate) async fn get_profile(token: &str) -> Result<User, ApiError> {
    let response = Request::get(&endpoint("/users/me"))
        .header("Authorization", &format!("Bearer {token}"))
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;

    if !response.ok() {
        return Err(parse_error_body(response).await);
    }

    parse_json(response).await
}

pub(crate) async fn update_profile(token: &str, name: &str) -> Result<User, ApiError> {
    let payload = UpdateProfileRequest {
        name: name.to_string(),
    };

    let response = Request::put(&endpoint("/users/update-profile"))
        .header("Authorization", &format!("Bearer {token}"))
        .json(&payload)
        .map_err(|err| ApiError::Network(err.to_string()))?
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;

    if !response.ok() {
        return Err(parse_error_body(response).await);
    }

    parse_json(response).await
}

pub(crate) async fn list_blogs(token: &str) -> Result<Vec<Blog>, ApiError> {
    let response = Request::get(&endpoint("/blogs"))
        .header("Authorization", &format!("Bearer {token}"))
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;

    if !response.ok() {
        return Err(parse_error_body(response).await);
    }

    parse_json(response).await
}

pub(crate) async fn get_blog(token: &str, id: &str) -> Result<Blog, ApiError> {
    let response = Request::get(&endpoint(&format!("/blogs/{id}")))
        .header("Authorization", &format!("Bearer {token}"))
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;

    if !response.ok() {
        return Err(parse_error_body(response).await);
    }

    parse_json(response).await
}

pub(crate) async fn create_blog(
    token: &str,
    title: &str,
    body: &str,
    tag_ids: Vec<String>,
) -> Result<Blog, ApiError> {
    let payload = CreateBlogRequest {
        title: title.to_string(),
        body: body.to_string(),
        tag_ids,
    };

    let response = Request::post(&endpoint("/blogs"))
        .header("Authorization", &format!("Bearer {token}"))
        .json(&payload)
        .map_err(|err| ApiError::Network(err.to_string()))?
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;

    if !response.ok() {
        return Err(parse_error_body(response).await);
    }

    parse_json(response).await
}

pub(crate) async fn update_blog(
    token: &str,
    id: &str,
    title: &str,
    body: &str,
) -> Result<(), ApiError> {
    let payload = UpdateBlogRequest {
        title: title.to_string(),
        body: body.to_string(),
    };

    let response = Request::put(&endpoint(&format!("/blogs/{id}")))
        .header("Authorization", &format!("Bearer {token}"))
        .json(&payload)
        .map_err(|err| ApiError::Network(err.to_string()))?
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;

    if !response.ok() {
        return Err(parse_error_body(response).await);
    }

    Ok(())
}

pub(crate) async fn delete_blog(token: &str, id: &str) -> Result<(), ApiError> {
    let response = Request::delete(&endpoint(&format!("/blogs/{id}")))
        .header("Authorization", &format!("Bearer {token}"))
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;

    if !response.ok() {
        return Err(parse_error_body(response).await);
    }

    Ok(())
}

pub(crate) async fn add_tag_to_blog(
    token: &str,
    blog_id: &str,
    tag_id: &str,
) -> Result<(), ApiError> {
    let payload = AddTagRequest {
        tag_id: tag_id.to_string(),
    };

    let response = Request::put(&endpoint(&format!("/blogs/{blog_id}/add-tag")))
        .header("Authorization", &format!("Bearer {token}"))
        .json(&payload)
        .map_err(|err| ApiError::Network(err.to_string()))?
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;

    if !response.ok() {
        return Err(parse_error_body(response).await);
    }

    Ok(())
}

pub(crate) async fn remove_tag_from_blog(
    token: &str,
    blog_id: &str,
    tag_id: &str,
) -> Result<(), ApiError> {
    let response = Request::delete(&endpoint(&format!("/blogs/{blog_id}/delete-tag/{tag_id}")))
        .header("Authorization", &format!("Bearer {token}"))
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;

    if !response.ok() {
        return Err(parse_error_body(response).await);
    }

    Ok(())
}

pub(crate) async fn list_comments(token: &str, blog_id: &str) -> Result<Vec<Comment>, ApiError> {
    let response = Request::get(&endpoint(&format!("/blogs/{blog_id}/comments")))
        .header("Authorization", &format!("Bearer {token}"))
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;

    if !response.ok() {
        return Err(parse_error_body(response).await);
    }

    parse_json(response).await
}

pub(crate) async fn add_comment(
    token: &str,
    blog_id: &str,
    body: &str,
) -> Result<Comment, ApiError> {
    let payload = AddCommentRequest {
        body: body.to_string(),
    };

    let response = Request::post(&endpoint(&format!("/blogs/{blog_id}/comments")))
        .header("Authorization", &format!("Bearer {token}"))
        .json(&payload)
        .map_err(|err| ApiError::Network(err.to_string()))?
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;

    if !response.ok() {
        return Err(parse_error_body(response).await);
    }

    parse_json(response).await
}

pub(crate) async fn delete_comment(
    token: &str,
    blog_id: &str,
    comment_id: &str,
) -> Result<(), ApiError> {
    let response = Request::delete(&endpoint(&format!("/blogs/{blog_id}/comments/{comment_id}")))
        .header("Authorization", &format!("Bearer {token}"))
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;

    if !response.ok() {
        return Err(parse_error_body(response).await);
    }

    Ok(())
}

pub(crate) async fn list_tags() -> Result<Vec<Tag>, ApiError> {
    let response = Request::get(&endpoint("/tags"))
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;

    if !response.ok() {
        return Err(parse_error_body(response).await);
    }

    parse_json(response).await
}

pub(crate) async fn create_tag(name: &str) -> Result<Tag, ApiError> {
    let payload = CreateTagRequest {
        name: name.to_string(),
    };

    let response = Request::post(&endpoint("/tags"))
        .json(&payload)
        .map_err(|err| ApiError::Network(err.to_string()))?
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;

    if !response.ok() {
        return Err(parse_error_body(response).await);
    }

    parse_json(response).await
}
