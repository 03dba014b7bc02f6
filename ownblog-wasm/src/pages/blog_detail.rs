use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params_map;

use crate::api;
use crate::ids;
use crate::models::{Blog, Comment};
use crate::session::SessionContext;

#[component]
pub(crate) fn BlogDetailPage() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let params = use_params_map();

    let raw_id = params.read_untracked().get("id").unwrap_or_default();
    // с некорректным id из адресной строки в сеть не ходим
    let Some(blog_id) = ids::parse_object_id(&raw_id) else {
        return view! {
            <h1>"Пост не найден"</h1>
            <p>"Некорректный идентификатор поста."</p>
            <a href="/blogs">"К списку постов"</a>
        }
        .into_any();
    };

    let blog = RwSignal::new(None::<Blog>);
    let comments = RwSignal::new(Vec::<Comment>::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);
    let comment_body = RwSignal::new(String::new());

    {
        let blog_id = blog_id.clone();
        if let Some(token) = session.token.get_untracked() {
            busy.set(true);
            spawn_local(async move {
                match api::get_blog(&token, &blog_id).await {
                    Ok(found) => blog.set(Some(found)),
                    Err(err) => {
                        error.set(Some(err.to_string()));
                        busy.set(false);
                        return;
                    }
                }
                match api::list_comments(&token, &blog_id).await {
                    Ok(list) => comments.set(list),
                    Err(err) => error.set(Some(err.to_string())),
                }
                busy.set(false);
            });
        }
    }

    let on_add_comment = {
        let blog_id = blog_id.clone();
        move |ev: SubmitEvent| {
            ev.prevent_default();
            error.set(None);

            let body = comment_body.get().trim().to_string();
            if body.is_empty() {
                error.set(Some("Комментарий не может быть пустым".to_string()));
                return;
            }
            let Some(token) = session.token.get_untracked() else {
                return;
            };

            busy.set(true);
            let blog_id = blog_id.clone();
            spawn_local(async move {
                match api::add_comment(&token, &blog_id, &body).await {
                    Ok(created) => {
                        comments.update(|list| list.push(created));
                        comment_body.set(String::new());
                    }
                    Err(err) => error.set(Some(err.to_string())),
                }
                busy.set(false);
            });
        }
    };

    let on_delete_comment = Callback::new({
        let blog_id = blog_id.clone();
        move |comment_id: String| {
            error.set(None);
            let Some(token) = session.token.get_untracked() else {
                return;
            };

            busy.set(true);
            let blog_id = blog_id.clone();
            spawn_local(async move {
                match api::delete_comment(&token, &blog_id, &comment_id).await {
                    Ok(()) => comments.update(|list| list.retain(|item| item.id != comment_id)),
                    Err(err) => error.set(Some(err.to_string())),
                }
                busy.set(false);
            });
        }
    });

    view! {
        <Show when=move || error.get().is_some()>
            <div class="error-banner">
                <strong>"Ошибка: "</strong>
                {move || error.get().unwrap_or_default()}
            </div>
        </Show>

        <Show when=move || busy.get() && blog.get().is_none()>
            <p>"Загрузка..."</p>
        </Show>

        {move || {
            blog.get().map(|blog| {
                let tag_names = blog
                    .tags
                    .iter()
                    .map(|tag| tag.name.clone())
                    .collect::<Vec<_>>()
                    .join(", ");

                view! {
                    <article class="blog-detail">
                        <h1>{blog.title.clone()}</h1>
                        <Show when={
                            let tag_names = tag_names.clone();
                            move || !tag_names.is_empty()
                        }>
                            <small>{format!("Теги: {tag_names}")}</small>
                        </Show>
                        <p>{blog.body.clone()}</p>
                        <a href=format!("/blogs/edit/{}", blog.id)>"Редактировать"</a>
                    </article>
                }
            })
        }}

        <h2>"Комментарии"</h2>
        <ul class="comment-list">
            <For
                each=move || comments.get()
                key=|comment| comment.id.clone()
                children=move |comment| {
                    let comment_id = comment.id.clone();
                    let author_id = comment.user.id.clone();

                    view! {
                        <li class="comment-list__item">
                            <strong>{comment.user.name.clone()}</strong>
                            <div>{comment.body.clone()}</div>
                            <Show when={
                                let author_id = author_id.clone();
                                move || {
                                    session.user.get().map(|user| user.id)
                                        == Some(author_id.clone())
                                }
                            }>
                                <button
                                    on:click={
                                        let comment_id = comment_id.clone();
                                        move |_| on_delete_comment.run(comment_id.clone())
                                    }
                                    disabled=move || busy.get()
                                >
                                    "Удалить"
                                </button>
                            </Show>
                        </li>
                    }
                }
            />
        </ul>

        <form on:submit=on_add_comment>
            <input
                placeholder="ваш комментарий"
                prop:value=move || comment_body.get()
                on:input=move |ev| comment_body.set(event_target_value(&ev))
            />
            <button type="submit" disabled=move || busy.get()>"Отправить"</button>
        </form>

        <p>
            <a href="/blogs">"К списку постов"</a>
        </p>
    }
    .into_any()
}
