use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Публичный профиль пользователя.
pub struct User {
    /// Идентификатор пользователя.
    pub id: String,
    /// Отображаемое имя.
    pub name: String,
    /// Email.
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Тег из общего каталога.
pub struct Tag {
    /// Идентификатор тега.
    pub id: String,
    /// Название тега.
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Пост блога, принадлежащий пользователю.
pub struct Blog {
    /// Идентификатор поста.
    pub id: String,
    /// Заголовок.
    pub title: String,
    /// Текст поста.
    pub body: String,
    /// Идентификатор владельца.
    pub user_id: String,
    /// Теги, привязанные к посту.
    #[serde(default)]
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Краткие данные автора комментария.
pub struct CommentAuthor {
    /// Идентификатор автора.
    pub id: String,
    /// Отображаемое имя автора.
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Комментарий к посту.
pub struct Comment {
    /// Идентификатор комментария.
    pub id: String,
    /// Текст комментария.
    pub body: String,
    /// Идентификатор поста, к которому относится комментарий.
    pub blog_id: String,
    /// Автор комментария.
    pub user: CommentAuthor,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Ответ после успешного входа.
pub struct SignInResponse {
    /// Bearer-токен для последующих запросов.
    pub access_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
/// Идентификатор сущности backend'а: строка из 24 шестнадцатеричных символов.
///
/// Конструируется только через [`ObjectId::parse`], поэтому методы клиента,
/// принимающие `&ObjectId`, не могут отправить запрос с некорректным id.
pub struct ObjectId(String);

impl ObjectId {
    /// Разбирает строку как идентификатор. Возвращает `None`, если строка
    /// не состоит ровно из 24 шестнадцатеричных символов.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.len() == 24 && raw.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Some(Self(raw.to_string()));
        }
        None
    }

    /// Строковое представление идентификатора.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
