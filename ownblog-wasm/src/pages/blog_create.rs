use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::api;
use crate::models::Tag;
use crate::session::SessionContext;

fn validate_blog_fields(title: &str, body: &str) -> Result<(), &'static str> {
    if title.trim().is_empty() || body.trim().is_empty() {
        return Err("Заполните заголовок и текст поста");
    }
    Ok(())
}

fn toggle_tag(selected: &mut Vec<String>, tag_id: &str) {
    if let Some(pos) = selected.iter().position(|id| id == tag_id) {
        selected.remove(pos);
    } else {
        selected.push(tag_id.to_string());
    }
}

#[component]
pub(crate) fn BlogCreatePage() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let navigate = use_navigate();

    let title = RwSignal::new(String::new());
    let body = RwSignal::new(String::new());
    let tags = RwSignal::new(Vec::<Tag>::new());
    let selected = RwSignal::new(Vec::<String>::new());
    let new_tag = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    // каталог тегов общий, авторизация не нужна
    spawn_local(async move {
        match api::list_tags().await {
            Ok(list) => tags.set(list),
            Err(err) => error.set(Some(err.to_string())),
        }
    });

    let on_create_tag = move |_| {
        error.set(None);

        let name = new_tag.get().trim().to_string();
        if name.is_empty() {
            error.set(Some("Название тега не может быть пустым".to_string()));
            return;
        }

        busy.set(true);
        spawn_local(async move {
            match api::create_tag(&name).await {
                Ok(created) => {
                    // новый тег сразу отмечен выбранным
                    selected.update(|ids| ids.push(created.id.clone()));
                    tags.update(|list| list.push(created));
                    new_tag.set(String::new());
                }
                Err(err) => error.set(Some(err.to_string())),
            }
            busy.set(false);
        });
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        error.set(None);

        let title_value = title.get().trim().to_string();
        let body_value = body.get().trim().to_string();
        if let Err(message) = validate_blog_fields(&title_value, &body_value) {
            error.set(Some(message.to_string()));
            return;
        }
        let Some(token) = session.token.get_untracked() else {
            return;
        };

        busy.set(true);
        let tag_ids = selected.get();
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::create_blog(&token, &title_value, &body_value, tag_ids).await {
                Ok(created) => {
                    navigate(&format!("/blogs/{}", created.id), NavigateOptions::default());
                }
                Err(err) => error.set(Some(err.to_string())),
            }
            busy.set(false);
        });
    };

    view! {
        <h1>"Новый пост"</h1>

        <Show when=move || error.get().is_some()>
            <div class="error-banner">
                <strong>"Ошибка: "</strong>
                {move || error.get().unwrap_or_default()}
            </div>
        </Show>

        <form on:submit=on_submit>
            <input
                placeholder="заголовок"
                prop:value=move || title.get()
                on:input=move |ev| title.set(event_target_value(&ev))
            />
            <textarea
                placeholder="текст поста"
                prop:value=move || body.get()
                on:input=move |ev| body.set(event_target_value(&ev))
            ></textarea>

            <h3>"Теги"</h3>
            <div class="tag-options">
                <For
                    each=move || tags.get()
                    key=|tag| tag.id.clone()
                    children=move |tag| {
                        let toggle_id = tag.id.clone();
                        let checked_id = tag.id.clone();
                        view! {
                            <label class="tag-option">
                                <input
                                    type="checkbox"
                                    prop:checked=move || selected.get().contains(&checked_id)
                                    on:change=move |_| {
                                        selected.update(|ids| toggle_tag(ids, &toggle_id))
                                    }
                                />
                                {tag.name.clone()}
                            </label>
                        }
                    }
                />
            </div>
            <div>
                <input
                    placeholder="новый тег"
                    prop:value=move || new_tag.get()
                    on:input=move |ev| new_tag.set(event_target_value(&ev))
                />
                <button type="button" on:click=on_create_tag disabled=move || busy.get()>
                    "Добавить тег"
                </button>
            </div>

            <button type="submit" disabled=move || busy.get()>"Опубликовать"</button>
        </form>

        <p>
            <a href="/blogs">"К списку постов"</a>
        </p>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_blog_fields_accepts_non_blank_values() {
        assert!(validate_blog_fields("title", "body").is_ok());
    }

    #[test]
    fn validate_blog_fields_rejects_blank_values() {
        assert_eq!(
            validate_blog_fields("  ", "body"),
            Err("Заполните заголовок и текст поста")
        );
    }

    #[test]
    fn toggle_tag_adds_missing_id() {
        let mut selected = vec!["a".to_string()];
        toggle_tag(&mut selected, "b");
        assert_eq!(selected, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn toggle_tag_removes_present_id() {
        let mut selected = vec!["a".to_string(), "b".to_string()];
        toggle_tag(&mut selected, "a");
        assert_eq!(selected, vec!["b".to_string()]);
    }
}
