use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::session::SessionContext;

#[component]
pub(crate) fn SignInPage() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        error.set(None);

        let email_value = email.get().trim().to_string();
        let password_value = password.get().trim().to_string();

        if email_value.is_empty() || password_value.is_empty() {
            error.set(Some("Заполните email и пароль".to_string()));
            return;
        }

        let navigate = navigate.clone();
        spawn_local(async move {
            if session.login(&email_value, &password_value).await {
                navigate("/blogs", NavigateOptions::default());
            } else {
                error.set(Some("Неверный email или пароль".to_string()));
            }
        });
    };

    view! {
        <h1>"Вход"</h1>
        <form on:submit=on_submit>
            <input
                placeholder="email"
                prop:value=move || email.get()
                on:input=move |ev| email.set(event_target_value(&ev))
            />
            <input
                placeholder="пароль"
                type="password"
                prop:value=move || password.get()
                on:input=move |ev| password.set(event_target_value(&ev))
            />
            <button type="submit" disabled=move || session.loading.get()>"Войти"</button>
        </form>

        <Show when=move || error.get().is_some()>
            <div class="error-banner">
                <strong>"Ошибка: "</strong>
                {move || error.get().unwrap_or_default()}
            </div>
        </Show>

        <p>
            "Нет аккаунта? "
            <a href="/auth/signup">"Зарегистрироваться"</a>
        </p>
    }
}
