use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::api;
use crate::ids;
use crate::models::{Blog, Tag};
use crate::session::SessionContext;

fn load_blog(
    session: SessionContext,
    blog_id: String,
    blog: RwSignal<Option<Blog>>,
    title: RwSignal<String>,
    body: RwSignal<String>,
    error: RwSignal<Option<String>>,
    busy: RwSignal<bool>,
) {
    let Some(token) = session.token.get_untracked() else {
        return;
    };

    busy.set(true);
    spawn_local(async move {
        match api::get_blog(&token, &blog_id).await {
            Ok(found) => {
                title.set(found.title.clone());
                body.set(found.body.clone());
                blog.set(Some(found));
            }
            Err(err) => error.set(Some(err.to_string())),
        }
        busy.set(false);
    });
}

#[component]
pub(crate) fn BlogEditPage() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let navigate = use_navigate();
    let params = use_params_map();

    let raw_id = params.read_untracked().get("id").unwrap_or_default();
    let Some(blog_id) = ids::parse_object_id(&raw_id) else {
        return view! {
            <h1>"Пост не найден"</h1>
            <p>"Некорректный идентификатор поста."</p>
            <a href="/blogs">"К списку постов"</a>
        }
        .into_any();
    };

    let blog = RwSignal::new(None::<Blog>);
    let title = RwSignal::new(String::new());
    let body = RwSignal::new(String::new());
    let catalogue = RwSignal::new(Vec::<Tag>::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    load_blog(
        session,
        blog_id.clone(),
        blog,
        title,
        body,
        error,
        busy,
    );

    spawn_local(async move {
        match api::list_tags().await {
            Ok(list) => catalogue.set(list),
            Err(err) => error.set(Some(err.to_string())),
        }
    });

    let on_save = {
        let blog_id = blog_id.clone();
        let navigate = navigate.clone();
        move |ev: SubmitEvent| {
            ev.prevent_default();
            error.set(None);

            let title_value = title.get().trim().to_string();
            let body_value = body.get().trim().to_string();
            if title_value.is_empty() || body_value.is_empty() {
                error.set(Some("Заполните заголовок и текст поста".to_string()));
                return;
            }
            let Some(token) = session.token.get_untracked() else {
                return;
            };

            busy.set(true);
            let blog_id = blog_id.clone();
            let navigate = navigate.clone();
            spawn_local(async move {
                match api::update_blog(&token, &blog_id, &title_value, &body_value).await {
                    Ok(()) => {
                        navigate(&format!("/blogs/{blog_id}"), NavigateOptions::default());
                    }
                    Err(err) => error.set(Some(err.to_string())),
                }
                busy.set(false);
            });
        }
    };

    let on_add_tag = Callback::new({
        let blog_id = blog_id.clone();
        move |tag_id: String| {
            error.set(None);
            let Some(token) = session.token.get_untracked() else {
                return;
            };

            busy.set(true);
            let blog_id = blog_id.clone();
            spawn_local(async move {
                match api::add_tag_to_blog(&token, &blog_id, &tag_id).await {
                    Ok(()) => {
                        let added = catalogue
                            .get_untracked()
                            .into_iter()
                            .find(|tag| tag.id == tag_id);
                        if let Some(added) = added {
                            blog.update(|maybe| {
                                if let Some(blog) = maybe {
                                    blog.tags.push(added);
                                }
                            });
                        }
                    }
                    Err(err) => error.set(Some(err.to_string())),
                }
                busy.set(false);
            });
        }
    });

    let on_remove_tag = Callback::new({
        let blog_id = blog_id.clone();
        move |tag_id: String| {
            error.set(None);
            let Some(token) = session.token.get_untracked() else {
                return;
            };

            busy.set(true);
            let blog_id = blog_id.clone();
            spawn_local(async move {
                match api::remove_tag_from_blog(&token, &blog_id, &tag_id).await {
                    Ok(()) => blog.update(|maybe| {
                        if let Some(blog) = maybe {
                            blog.tags.retain(|tag| tag.id != tag_id);
                        }
                    }),
                    Err(err) => error.set(Some(err.to_string())),
                }
                busy.set(false);
            });
        }
    });

    view! {
        <h1>"Редактирование поста"</h1>

        <Show when=move || error.get().is_some()>
            <div class="error-banner">
                <strong>"Ошибка: "</strong>
                {move || error.get().unwrap_or_default()}
            </div>
        </Show>

        <Show when=move || busy.get() && blog.get().is_none()>
            <p>"Загрузка..."</p>
        </Show>

        <Show when=move || blog.get().is_some()>
            <form on:submit=on_save.clone()>
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
                <button type="submit" disabled=move || busy.get()>"Сохранить"</button>
            </form>

            <h3>"Теги поста"</h3>
            <ul class="tag-list">
                <For
                    each=move || blog.get().map(|blog| blog.tags).unwrap_or_default()
                    key=|tag| tag.id.clone()
                    children=move |tag| {
                        let tag_id = tag.id.clone();
                        view! {
                            <li>
                                {tag.name.clone()}
                                <button
                                    on:click=move |_| on_remove_tag.run(tag_id.clone())
                                    disabled=move || busy.get()
                                >
                                    "Убрать"
                                </button>
                            </li>
                        }
                    }
                />
            </ul>

            <h3>"Доступные теги"</h3>
            <ul class="tag-list">
                <For
                    each=move || {
                        let attached = blog
                            .get()
                            .map(|blog| {
                                blog.tags.iter().map(|tag| tag.id.clone()).collect::<Vec<_>>()
                            })
                            .unwrap_or_default();
                        catalogue
                            .get()
                            .into_iter()
                            .filter(|tag| !attached.contains(&tag.id))
                            .collect::<Vec<_>>()
                    }
                    key=|tag| tag.id.clone()
                    children=move |tag| {
                        let tag_id = tag.id.clone();
                        view! {
                            <li>
                                {tag.name.clone()}
                                <button
                                    on:click=move |_| on_add_tag.run(tag_id.clone())
                                    disabled=move || busy.get()
                                >
                                    "Добавить"
                                </button>
                            </li>
                        }
                    }
                />
            </ul>
        </Show>

        <p>
            <a href="/blogs">"К списку постов"</a>
        </p>
    }
    .into_any()
}
