use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::session::SessionContext;

/// Оборачивает защищённые страницы: пока сессия грузится, показывает
/// заглушку; неавторизованного пользователя уводит на страницу входа.
#[component]
pub(crate) fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let navigate = use_navigate();

    Effect::new(move || {
        if !session.loading.get() && !session.authenticated.get() {
            navigate("/auth/signin", NavigateOptions::default());
        }
    });

    view! {
        <Show
            when=move || session.authenticated.get()
            fallback=|| view! { <p>"Загрузка..."</p> }
        >
            {children()}
        </Show>
    }
}
