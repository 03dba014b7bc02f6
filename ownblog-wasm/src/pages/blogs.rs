use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::models::Blog;
use crate::session::SessionContext;

fn load_blogs(
    session: SessionContext,
    blogs: RwSignal<Vec<Blog>>,
    error: RwSignal<Option<String>>,
    busy: RwSignal<bool>,
) {
    let Some(token) = session.token.get_untracked() else {
        return;
    };

    busy.set(true);
    spawn_local(async move {
        match api::list_blogs(&token).await {
            Ok(list) => blogs.set(list),
            Err(err) => error.set(Some(err.to_string())),
        }
        busy.set(false);
    });
}

#[component]
pub(crate) fn BlogsPage() -> impl IntoView {
    let session = expect_context::<SessionContext>();

    let blogs = RwSignal::new(Vec::<Blog>::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    load_blogs(session, blogs, error, busy);

    let on_delete = Callback::new(move |blog_id: String| {
        error.set(None);
        let Some(token) = session.token.get_untracked() else {
            return;
        };

        busy.set(true);
        spawn_local(async move {
            match api::delete_blog(&token, &blog_id).await {
                Ok(()) => blogs.update(|list| list.retain(|blog| blog.id != blog_id)),
                Err(err) => error.set(Some(err.to_string())),
            }
            busy.set(false);
        });
    });

    view! {
        <h1>"Мои посты"</h1>
        <p>
            <a href="/blogs/create">"Написать пост"</a>
        </p>

        <Show when=move || error.get().is_some()>
            <div class="error-banner">
                <strong>"Ошибка: "</strong>
                {move || error.get().unwrap_or_default()}
            </div>
        </Show>

        <Show when=move || busy.get()>
            <p>"Загрузка..."</p>
        </Show>

        <Show when=move || !busy.get() && blogs.get().is_empty() && error.get().is_none()>
            <p>"Постов пока нет."</p>
        </Show>

        <ul class="blog-list">
            <For
                each=move || blogs.get()
                key=|blog| blog.id.clone()
                children=move |blog| {
                    let blog_id = blog.id.clone();
                    let delete_id = blog.id.clone();
                    let tag_names = blog
                        .tags
                        .iter()
                        .map(|tag| tag.name.clone())
                        .collect::<Vec<_>>()
                        .join(", ");

                    view! {
                        <li class="blog-list__item">
                            <a href=format!("/blogs/{blog_id}")>
                                <strong>{blog.title.clone()}</strong>
                            </a>
                            <Show when={
                                let tag_names = tag_names.clone();
                                move || !tag_names.is_empty()
                            }>
                                <small>{format!(" [{tag_names}]")}</small>
                            </Show>
                            <div>
                                <a href=format!("/blogs/edit/{blog_id}")>"Редактировать"</a>
                                <button
                                    on:click=move |_| on_delete.run(delete_id.clone())
                                    disabled=move || busy.get()
                                >
                                    "Удалить"
                                </button>
                            </div>
                        </li>
                    }
                }
            />
        </ul>
    }
}
