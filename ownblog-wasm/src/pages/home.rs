use leptos::prelude::*;

use crate::session::SessionContext;

#[component]
pub(crate) fn HomePage() -> impl IntoView {
    let session = expect_context::<SessionContext>();

    view! {
        <h1>"OwnBlog"</h1>
        <p>"Личный блог: посты, теги и комментарии."</p>
        <Show
            when=move || session.authenticated.get()
            fallback=|| view! { <a href="/auth/signin">"Войти, чтобы начать"</a> }
        >
            <a href="/blogs">"Перейти к моим постам"</a>
        </Show>
    }
}
