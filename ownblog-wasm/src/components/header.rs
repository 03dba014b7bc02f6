use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::session::SessionContext;

#[component]
pub(crate) fn Header() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let navigate = use_navigate();

    let user_name = move || {
        session
            .user
            .get()
            .map(|user| user.name)
            .unwrap_or_default()
    };

    view! {
        <header class="site-header">
            <a href="/" class="site-header__brand">"OwnBlog"</a>
            <nav class="site-header__nav">
                <Show
                    when=move || session.authenticated.get()
                    fallback=|| view! {
                        <a href="/auth/signin">"Войти"</a>
                        <a href="/auth/signup">"Регистрация"</a>
                    }
                >
                    <a href="/blogs">"Мои посты"</a>
                    <a href="/profile">"Профиль"</a>
                    <span class="site-header__user">{user_name}</span>
                    <button
                        on:click={
                            let navigate = navigate.clone();
                            move |_| {
                                session.logout();
                                navigate("/", NavigateOptions::default());
                            }
                        }
                        disabled=move || session.loading.get()
                    >
                        "Выйти"
                    </button>
                </Show>
            </nav>
        </header>
    }
}
