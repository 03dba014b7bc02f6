use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::api;
use crate::session::SessionContext;

fn validate_signup(name: &str, email: &str, password: &str) -> Result<(), &'static str> {
    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Err("Заполните все поля регистрации");
    }
    if password.len() < 6 {
        return Err("Пароль должен быть не короче 6 символов");
    }
    Ok(())
}

#[component]
pub(crate) fn SignUpPage() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let navigate = use_navigate();

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let submitting = RwSignal::new(false);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        error.set(None);

        let name_value = name.get().trim().to_string();
        let email_value = email.get().trim().to_string();
        let password_value = password.get().trim().to_string();

        if let Err(message) = validate_signup(&name_value, &email_value, &password_value) {
            error.set(Some(message.to_string()));
            return;
        }

        submitting.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::sign_up(&name_value, &email_value, &password_value).await {
                Ok(()) => navigate("/auth/signin", NavigateOptions::default()),
                Err(err) => error.set(Some(err.to_string())),
            }
            submitting.set(false);
        });
    };

    view! {
        <h1>"Регистрация"</h1>
        <form on:submit=on_submit>
            <input
                placeholder="имя"
                prop:value=move || name.get()
                on:input=move |ev| name.set(event_target_value(&ev))
            />
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
            <button
                type="submit"
                disabled=move || submitting.get() || session.loading.get()
            >
                "Зарегистрироваться"
            </button>
        </form>

        <Show when=move || error.get().is_some()>
            <div class="error-banner">
                <strong>"Ошибка: "</strong>
                {move || error.get().unwrap_or_default()}
            </div>
        </Show>

        <p>
            "Уже есть аккаунт? "
            <a href="/auth/signin">"Войти"</a>
        </p>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_signup_accepts_filled_fields() {
        assert!(validate_signup("Alice", "a@example.com", "secret1").is_ok());
    }

    #[test]
    fn validate_signup_rejects_empty_fields() {
        assert_eq!(
            validate_signup("", "a@example.com", "secret1"),
            Err("Заполните все поля регистрации")
        );
    }

    #[test]
    fn validate_signup_rejects_short_password() {
        assert_eq!(
            validate_signup("Alice", "a@example.com", "123"),
            Err("Пароль должен быть не короче 6 символов")
        );
    }
}
