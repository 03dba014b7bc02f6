use thiserror::Error;

#[derive(Debug, Error)]
/// Ошибки клиентской библиотеки `ownblog-client`.
pub enum ClientError {
    /// Ошибка HTTP-транспорта (`reqwest`): сеть, DNS, таймаут.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Требуется авторизация (отсутствует/некорректен токен).
    #[error("unauthorized")]
    Unauthorized,

    /// Запрошенный ресурс не найден.
    #[error("not found")]
    NotFound,

    /// Ответ backend'а с не-успешным статусом; текст — тело ответа
    /// либо статусная строка, если тело пустое.
    #[error("{0}")]
    Api(String),

    /// Успешный статус, но тело не удалось разобрать как ожидаемый JSON.
    #[error("decode error: {0}")]
    Decode(String),
}

/// Результат операций `ownblog-client`.
pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    pub(crate) fn from_http_status(status: reqwest::StatusCode, message: Option<String>) -> Self {
        match status {
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                Self::Unauthorized
            }
            reqwest::StatusCode::NOT_FOUND => Self::NotFound,
            _ => {
                let message = message
                    .filter(|text| !text.trim().is_empty())
                    .unwrap_or_else(|| format!("http status {status}"));
                Self::Api(message)
            }
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::from_http_status(status, None);
        }
        Self::Http(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_statuses_map_to_unauthorized() {
        let err = ClientError::from_http_status(
            reqwest::StatusCode::UNAUTHORIZED,
            Some("Invalid credentials".to_string()),
        );
        assert!(matches!(err, ClientError::Unauthorized));

        let err = ClientError::from_http_status(reqwest::StatusCode::FORBIDDEN, None);
        assert!(matches!(err, ClientError::Unauthorized));
    }

    #[test]
    fn not_found_status_maps_to_not_found() {
        let err = ClientError::from_http_status(reqwest::StatusCode::NOT_FOUND, None);
        assert!(matches!(err, ClientError::NotFound));
    }

    #[test]
    fn other_statuses_keep_response_body_text() {
        let err = ClientError::from_http_status(
            reqwest::StatusCode::BAD_REQUEST,
            Some("Title must not be empty".to_string()),
        );
        match err {
            ClientError::Api(message) => assert_eq!(message, "Title must not be empty"),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn blank_body_falls_back_to_status_line() {
        let err = ClientError::from_http_status(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            Some("   ".to_string()),
        );
        match err {
            ClientError::Api(message) => {
                assert_eq!(message, "http status 500 Internal Server Error");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }
}
