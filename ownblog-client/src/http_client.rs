use std::time::Duration;

use reqwest::{Client, Method, header};
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::error::{ClientError, ClientResult};
use crate::models::{Blog, Comment, ObjectId, SignInResponse, Tag, User};

/// Фиксированное значение успеха для пустого тела ответа (в том числе 204).
pub const EMPTY_BODY_PLACEHOLDER: &str = "ok";

/// Роль, с которой регистрируются новые пользователи.
const SIGNUP_ROLE: &str = "user";

#[derive(Debug, Serialize)]
struct SignInRequestDto<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct SignUpRequestDto<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
    role: &'a str,
}

#[derive(Debug, Serialize)]
struct UpdateProfileRequestDto<'a> {
    name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateBlogRequestDto<'a> {
    title: &'a str,
    body: &'a str,
    tag_ids: &'a [String],
}

#[derive(Debug, Serialize)]
struct UpdateBlogRequestDto<'a> {
    title: &'a str,
    body: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddTagRequestDto<'a> {
    tag_id: &'a str,
}

#[derive(Debug, Serialize)]
struct AddCommentRequestDto<'a> {
    body: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateTagRequestDto<'a> {
    name: &'a str,
}

#[derive(Debug, Clone)]
/// HTTP-клиент для работы с REST API блог-сервиса.
///
/// Одна попытка на запрос: без повторов и backoff. Любая транспортная
/// ошибка превращается в [`ClientError`] и не выходит наружу паникой.
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    /// Создаёт новый HTTP-клиент с базовым URL сервера.
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()
            .expect("failed to build reqwest client");

        Self {
            base_url: base_url.into(),
            client,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// универсальный helper: собирает запрос, отправляет и проверяет статус
    async fn send<TReq>(
        &self,
        method: Method,
        path: &str,
        body: Option<&TReq>,
        token: Option<&str>,
    ) -> ClientResult<reqwest::Response>
    where
        TReq: Serialize + ?Sized,
    {
        let url = self.endpoint(path);
        debug!(%method, %url, "api request");

        let mut request = self
            .client
            .request(method, url)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(ClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }
        Ok(response)
    }

    async fn decode_error(response: reqwest::Response) -> ClientError {
        let status = response.status();
        let body = response.text().await.ok();
        ClientError::from_http_status(status, body)
    }

    /// первый шаг разбора успешного ответа: тело как типизированный JSON
    async fn decode_json<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let text = response.text().await.map_err(ClientError::from_reqwest)?;
        serde_json::from_str(&text).map_err(|err| ClientError::Decode(err.to_string()))
    }

    /// второй шаг разбора: сырой текст, пустое тело — фиксированный placeholder
    async fn decode_text(response: reqwest::Response) -> ClientResult<String> {
        let text = response.text().await.map_err(ClientError::from_reqwest)?;
        if text.trim().is_empty() {
            return Ok(EMPTY_BODY_PLACEHOLDER.to_string());
        }
        Ok(text)
    }

    /// Выполняет вход по email и паролю, возвращает bearer-токен.
    pub async fn sign_in(&self, email: &str, password: &str) -> ClientResult<SignInResponse> {
        let payload = SignInRequestDto { email, password };
        let response = self
            .send(Method::POST, "/auth/signin", Some(&payload), None)
            .await?;
        Self::decode_json(response).await
    }

    /// Регистрирует пользователя (роль всегда `user`), возвращает ответ
    /// backend'а как есть.
    pub async fn sign_up(&self, name: &str, email: &str, password: &str) -> ClientResult<String> {
        let payload = SignUpRequestDto {
            name,
            email,
            password,
            role: SIGNUP_ROLE,
        };
        let response = self
            .send(Method::POST, "/auth/signup", Some(&payload), None)
            .await?;
        Self::decode_text(response).await
    }

    /// Возвращает профиль владельца токена.
    pub async fn get_profile(&self, token: &str) -> ClientResult<User> {
        let response = self
            .send(Method::GET, "/users/me", None::<&()>, Some(token))
            .await?;
        Self::decode_json(response).await
    }

    /// Меняет отображаемое имя и возвращает обновлённый профиль.
    pub async fn update_profile(&self, token: &str, name: &str) -> ClientResult<User> {
        let payload = UpdateProfileRequestDto { name };
        let response = self
            .send(
                Method::PUT,
                "/users/update-profile",
                Some(&payload),
                Some(token),
            )
            .await?;
        Self::decode_json(response).await
    }

    /// Возвращает все посты владельца токена.
    pub async fn list_blogs(&self, token: &str) -> ClientResult<Vec<Blog>> {
        let response = self
            .send(Method::GET, "/blogs", None::<&()>, Some(token))
            .await?;
        Self::decode_json(response).await
    }

    /// Возвращает пост по идентификатору.
    pub async fn get_blog(&self, token: &str, id: &ObjectId) -> ClientResult<Blog> {
        let response = self
            .send(
                Method::GET,
                &format!("/blogs/{id}"),
                None::<&()>,
                Some(token),
            )
            .await?;
        Self::decode_json(response).await
    }

    /// Создаёт пост с привязанными тегами.
    pub async fn create_blog(
        &self,
        token: &str,
        title: &str,
        body: &str,
        tag_ids: &[String],
    ) -> ClientResult<Blog> {
        let payload = CreateBlogRequestDto {
            title,
            body,
            tag_ids,
        };
        let response = self
            .send(Method::POST, "/blogs", Some(&payload), Some(token))
            .await?;
        Self::decode_json(response).await
    }

    /// Обновляет заголовок и текст поста.
    pub async fn update_blog(
        &self,
        token: &str,
        id: &ObjectId,
        title: &str,
        body: &str,
    ) -> ClientResult<String> {
        let payload = UpdateBlogRequestDto { title, body };
        let response = self
            .send(
                Method::PUT,
                &format!("/blogs/{id}"),
                Some(&payload),
                Some(token),
            )
            .await?;
        Self::decode_text(response).await
    }

    /// Удаляет пост по идентификатору.
    pub async fn delete_blog(&self, token: &str, id: &ObjectId) -> ClientResult<String> {
        let response = self
            .send(
                Method::DELETE,
                &format!("/blogs/{id}"),
                None::<&()>,
                Some(token),
            )
            .await?;
        Self::decode_text(response).await
    }

    /// Привязывает тег к посту.
    pub async fn add_tag_to_blog(
        &self,
        token: &str,
        blog_id: &ObjectId,
        tag_id: &str,
    ) -> ClientResult<String> {
        let payload = AddTagRequestDto { tag_id };
        let response = self
            .send(
                Method::PUT,
                &format!("/blogs/{blog_id}/add-tag"),
                Some(&payload),
                Some(token),
            )
            .await?;
        Self::decode_text(response).await
    }

    /// Отвязывает тег от поста.
    pub async fn remove_tag_from_blog(
        &self,
        token: &str,
        blog_id: &ObjectId,
        tag_id: &str,
    ) -> ClientResult<String> {
        let response = self
            .send(
                Method::DELETE,
                &format!("/blogs/{blog_id}/delete-tag/{tag_id}"),
                None::<&()>,
                Some(token),
            )
            .await?;
        Self::decode_text(response).await
    }

    /// Возвращает комментарии поста.
    pub async fn list_comments(
        &self,
        token: &str,
        blog_id: &ObjectId,
    ) -> ClientResult<Vec<Comment>> {
        let response = self
            .send(
                Method::GET,
                &format!("/blogs/{blog_id}/comments"),
                None::<&()>,
                Some(token),
            )
            .await?;
        Self::decode_json(response).await
    }

    /// Добавляет комментарий к посту.
    pub async fn add_comment(
        &self,
        token: &str,
        blog_id: &ObjectId,
        body: &str,
    ) -> ClientResult<Comment> {
        let payload = AddCommentRequestDto { body };
        let response = self
            .send(
                Method::POST,
                &format!("/blogs/{blog_id}/comments"),
                Some(&payload),
                Some(token),
            )
            .await?;
        Self::decode_json(response).await
    }

    /// Удаляет комментарий поста.
    pub async fn delete_comment(
        &self,
        token: &str,
        blog_id: &ObjectId,
        comment_id: &ObjectId,
    ) -> ClientResult<String> {
        let response = self
            .send(
                Method::DELETE,
                &format!("/blogs/{blog_id}/comments/{comment_id}"),
                None::<&()>,
                Some(token),
            )
            .await?;
        Self::decode_text(response).await
    }

    /// Возвращает общий каталог тегов. Авторизация не требуется.
    pub async fn list_tags(&self) -> ClientResult<Vec<Tag>> {
        let response = self.send(Method::GET, "/tags", None::<&()>, None).await?;
        Self::decode_json(response).await
    }

    /// Создаёт тег в общем каталоге. Авторизация не требуется.
    pub async fn create_tag(&self, name: &str) -> ClientResult<Tag> {
        let payload = CreateTagRequestDto { name };
        let response = self
            .send(Method::POST, "/tags", Some(&payload), None)
            .await?;
        Self::decode_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_normalizes_slashes() {
        let client = ApiClient::new("http://localhost:3000/");
        let full = client.endpoint("/blogs");
        assert_eq!(full, "http://localhost:3000/blogs");
    }

    #[test]
    fn endpoint_keeps_nested_paths() {
        let client = ApiClient::new("http://localhost:3000");
        let full = client.endpoint("/blogs/507f1f77bcf86cd799439011/comments");
        assert_eq!(
            full,
            "http://localhost:3000/blogs/507f1f77bcf86cd799439011/comments"
        );
    }

    #[test]
    fn create_blog_request_serializes_tag_ids_camel_case() {
        let tag_ids = vec!["507f1f77bcf86cd799439013".to_string()];
        let payload = CreateBlogRequestDto {
            title: "t",
            body: "b",
            tag_ids: &tag_ids,
        };
        let raw = serde_json::to_string(&payload).expect("payload should serialize");
        assert!(raw.contains("\"tagIds\""));
    }

    #[test]
    fn add_tag_request_serializes_tag_id_camel_case() {
        let payload = AddTagRequestDto {
            tag_id: "507f1f77bcf86cd799439013",
        };
        let raw = serde_json::to_string(&payload).expect("payload should serialize");
        assert_eq!(raw, r#"{"tagId":"507f1f77bcf86cd799439013"}"#);
    }
}
