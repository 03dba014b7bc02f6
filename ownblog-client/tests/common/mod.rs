use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;

/// Поднимает тестовый стенд на свободном порту и возвращает его базовый URL.
///
/// Сервер живёт в фоновой задаче до конца теста.
pub async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("test server must bind to a free port");
    let addr: SocketAddr = listener
        .local_addr()
        .expect("listener must report local address");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("test server must not fail");
    });

    format!("http://{addr}")
}
