use leptos::logging::warn;
use leptos::prelude::*;

use crate::api;
use crate::models::User;
use crate::storage;

/// Сессия пользователя, разделяемая через `provide_context`.
///
/// `authenticated` взводится только после успешного запроса профиля с текущим
/// токеном. Выход и отклонённый токен очищают и сигналы, и localStorage.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SessionContext {
    pub(crate) token: RwSignal<Option<String>>,
    pub(crate) user: RwSignal<Option<User>>,
    pub(crate) authenticated: RwSignal<bool>,
    pub(crate) loading: RwSignal<bool>,
}

impl SessionContext {
    /// Флаг загрузки взведён до первого [`SessionContext::initialize`].
    pub(crate) fn new() -> Self {
        Self {
            token: RwSignal::new(None),
            user: RwSignal::new(None),
            authenticated: RwSignal::new(false),
            loading: RwSignal::new(true),
        }
    }

    /// Одноразовая инициализация при старте приложения: поднимает токен из
    /// localStorage и проверяет его запросом профиля.
    pub(crate) async fn initialize(&self) {
        match storage::load_token() {
            Some(token) => {
                self.token.set(Some(token.clone()));
                self.refresh_profile(token).await;
            }
            None => self.loading.set(false),
        }
    }

    async fn refresh_profile(&self, token: String) {
        match api::get_profile(&token).await {
            Ok(user) => {
                self.user.set(Some(user));
                self.authenticated.set(true);
            }
            Err(err) => {
                warn!("profile fetch failed, resetting session: {err}");
                if let Err(err) = storage::clear_token() {
                    warn!("failed to clear stored token: {err}");
                }
                self.token.set(None);
                self.user.set(None);
                self.authenticated.set(false);
            }
        }
        self.loading.set(false);
    }

    /// Входит по email и паролю. Возвращает итоговое состояние авторизации
    /// после загрузки профиля; при любой неудаче прежнее состояние не меняется.
    pub(crate) async fn login(&self, email: &str, password: &str) -> bool {
        self.loading.set(true);

        match api::sign_in(email, password).await {
            Ok(auth) if !auth.access_token.is_empty() => {
                if let Err(err) = storage::save_token(&auth.access_token) {
                    warn!("failed to persist token: {err}");
                    self.loading.set(false);
                    return false;
                }
                self.token.set(Some(auth.access_token.clone()));
                self.refresh_profile(auth.access_token).await;
                self.authenticated.get_untracked()
            }
            Ok(_) | Err(_) => {
                self.loading.set(false);
                false
            }
        }
    }

    /// Выходит из сессии: чистит localStorage и сигналы. Никогда не падает.
    pub(crate) fn logout(&self) {
        if let Err(err) = storage::clear_token() {
            warn!("failed to clear stored token: {err}");
        }
        self.token.set(None);
        self.user.set(None);
        self.authenticated.set(false);
    }
}
