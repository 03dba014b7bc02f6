use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::session::SessionContext;

#[component]
pub(crate) fn ProfilePage() -> impl IntoView {
    let session = expect_context::<SessionContext>();

    let name = RwSignal::new(
        session
            .user
            .get_untracked()
            .map(|user| user.name)
            .unwrap_or_default(),
    );
    let error = RwSignal::new(None::<String>);
    let notice = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let email = move || {
        session
            .user
            .get()
            .map(|user| user.email)
            .unwrap_or_default()
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        error.set(None);
        notice.set(None);

        let name_value = name.get().trim().to_string();
        if name_value.is_empty() {
            error.set(Some("Имя не может быть пустым".to_string()));
            return;
        }
        let Some(token) = session.token.get_untracked() else {
            return;
        };

        busy.set(true);
        spawn_local(async move {
            match api::update_profile(&token, &name_value).await {
                Ok(updated) => {
                    session.user.set(Some(updated));
                    notice.set(Some("Профиль обновлён".to_string()));
                }
                Err(err) => error.set(Some(err.to_string())),
            }
            busy.set(false);
        });
    };

    view! {
        <h1>"Профиль"</h1>

        <Show when=move || error.get().is_some()>
            <div class="error-banner">
                <strong>"Ошибка: "</strong>
                {move || error.get().unwrap_or_default()}
            </div>
        </Show>

        <Show when=move || notice.get().is_some()>
            <div class="notice-banner">
                {move || notice.get().unwrap_or_default()}
            </div>
        </Show>

        <p>"Email: " {email}</p>

        <form on:submit=on_submit>
            <input
                placeholder="отображаемое имя"
                prop:value=move || name.get()
                on:input=move |ev| name.set(event_target_value(&ev))
            />
            <button type="submit" disabled=move || busy.get()>"Сохранить"</button>
        </form>
    }
}
