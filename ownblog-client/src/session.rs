use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use crate::http_client::ApiClient;
use crate::models::User;

/// Долговременное хранилище bearer-токена.
///
/// Единственный ключ: токен есть или его нет. Читается при старте сессии,
/// записывается при входе, очищается при выходе и при отклонённом токене.
pub trait TokenStore {
    /// Читает сохранённый токен. `None` — пользователь не авторизован.
    fn load(&self) -> Option<String>;
    /// Сохраняет токен.
    fn save(&self, token: &str) -> io::Result<()>;
    /// Удаляет сохранённый токен.
    fn clear(&self) -> io::Result<()>;
}

fn parse_token(raw: &str) -> Option<String> {
    let token = raw.trim().to_string();
    if token.is_empty() {
        return None;
    }
    Some(token)
}

#[derive(Debug, Clone)]
/// Хранилище токена в файле. Используется CLI.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Создаёт хранилище поверх указанного файла.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Путь к файлу с токеном.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        if !self.path.exists() {
            return None;
        }
        let raw = fs::read_to_string(&self.path).ok()?;
        parse_token(&raw)
    }

    fn save(&self, token: &str) -> io::Result<()> {
        fs::write(&self.path, token)
    }

    fn clear(&self) -> io::Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
/// Хранилище токена в памяти. Клоны разделяют одно значение.
pub struct MemoryTokenStore {
    token: Arc<Mutex<Option<String>>>,
}

impl MemoryTokenStore {
    /// Создаёт пустое хранилище.
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.lock().expect("token store lock poisoned").clone()
    }

    fn save(&self, token: &str) -> io::Result<()> {
        *self.token.lock().expect("token store lock poisoned") = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> io::Result<()> {
        *self.token.lock().expect("token store lock poisoned") = None;
        Ok(())
    }
}

#[derive(Debug)]
/// Сессия пользователя: токен, профиль и признак авторизации.
///
/// Инвариант: `authenticated == true` только после успешного запроса профиля
/// с текущим токеном. Токен в хранилище и токен в памяти не расходятся после
/// завершения любой операции: выход и отклонённый токен очищают и то и другое.
///
/// Все операции принимают `&mut self`, поэтому два `login` не могут идти
/// параллельно над одной сессией.
pub struct Session<S: TokenStore> {
    client: ApiClient,
    store: S,
    token: Option<String>,
    user: Option<User>,
    authenticated: bool,
    loading: bool,
}

impl<S: TokenStore> Session<S> {
    /// Создаёт сессию поверх клиента и хранилища токена.
    ///
    /// Флаг загрузки взведён до первого [`Session::initialize`].
    pub fn new(client: ApiClient, store: S) -> Self {
        Self {
            client,
            store,
            token: None,
            user: None,
            authenticated: false,
            loading: true,
        }
    }

    /// Одноразовая инициализация при старте: поднимает сохранённый токен
    /// и проверяет его запросом профиля. Без токена просто завершает загрузку.
    pub async fn initialize(&mut self) {
        match self.store.load() {
            Some(token) => {
                self.token = Some(token.clone());
                self.refresh_profile(token).await;
            }
            None => {
                self.loading = false;
            }
        }
    }

    /// Запрашивает профиль по токену. Успех делает сессию авторизованной;
    /// любая ошибка трактуется как недействительный токен: хранилище и
    /// состояние очищаются. Флаг загрузки снимается в обоих случаях.
    async fn refresh_profile(&mut self, token: String) {
        match self.client.get_profile(&token).await {
            Ok(user) => {
                self.user = Some(user);
                self.authenticated = true;
            }
            Err(err) => {
                warn!("profile fetch failed, resetting session: {err}");
                if let Err(err) = self.store.clear() {
                    warn!("failed to clear stored token: {err}");
                }
                self.token = None;
                self.user = None;
                self.authenticated = false;
            }
        }
        self.loading = false;
    }

    /// Входит по email и паролю.
    ///
    /// Возвращает итоговое состояние авторизации после загрузки профиля,
    /// а не только успех `signin`. При любой неудаче (отказ backend'а,
    /// сетевая ошибка, пустой токен в ответе) прежнее состояние не меняется
    /// и частичный токен не сохраняется.
    pub async fn login(&mut self, email: &str, password: &str) -> bool {
        self.loading = true;

        match self.client.sign_in(email, password).await {
            Ok(auth) if !auth.access_token.is_empty() => {
                if let Err(err) = self.store.save(&auth.access_token) {
                    warn!("failed to persist token: {err}");
                    self.loading = false;
                    return false;
                }
                self.token = Some(auth.access_token.clone());
                self.refresh_profile(auth.access_token).await;
                self.loading = false;
                self.authenticated
            }
            Ok(_) => {
                debug!("sign-in response carried no access token");
                self.loading = false;
                false
            }
            Err(err) => {
                debug!("sign-in failed: {err}");
                self.loading = false;
                false
            }
        }
    }

    /// Выходит из сессии: очищает хранилище и состояние. Никогда не падает.
    pub fn logout(&mut self) {
        if let Err(err) = self.store.clear() {
            warn!("failed to clear stored token: {err}");
        }
        self.token = None;
        self.user = None;
        self.authenticated = false;
    }

    /// `true`, если профиль успешно получен с текущим токеном.
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// `true`, пока идёт инициализация или вход.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Текущий профиль, если сессия авторизована.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Текущий bearer-токен.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Клиент API для запросов за пределами жизненного цикла сессии.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }
}
