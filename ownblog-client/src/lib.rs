//! Клиентская библиотека для блог-сервиса ownblog.
//!
//! Состоит из двух слоёв:
//! - [`ApiClient`] — типизированный HTTP-клиент (`reqwest`) поверх REST API:
//!   авторизация, профиль, посты, комментарии и каталог тегов;
//! - [`Session`] — жизненный цикл авторизации поверх [`ApiClient`] и
//!   [`TokenStore`]: подъём сохранённого токена при старте, вход, выход.
//!
//! Токен — единственный персистентный артефакт авторизации. Профиль
//! запрашивается заново при каждом старте сессии и не сохраняется.
#![warn(missing_docs)]

mod error;
mod http_client;
mod models;
mod session;

pub use error::{ClientError, ClientResult};
pub use http_client::{ApiClient, EMPTY_BODY_PLACEHOLDER};
pub use models::{Blog, Comment, CommentAuthor, ObjectId, SignInResponse, Tag, User};
pub use session::{FileTokenStore, MemoryTokenStore, Session, TokenStore};
