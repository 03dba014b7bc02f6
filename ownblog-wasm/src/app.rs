use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::header::Header;
use crate::guard::RequireAuth;
use crate::pages::blog_create::BlogCreatePage;
use crate::pages::blog_detail::BlogDetailPage;
use crate::pages::blog_edit::BlogEditPage;
use crate::pages::blogs::BlogsPage;
use crate::pages::home::HomePage;
use crate::pages::profile::ProfilePage;
use crate::pages::signin::SignInPage;
use crate::pages::signup::SignUpPage;
use crate::session::SessionContext;

#[component]
pub fn App() -> impl IntoView {
    let session = SessionContext::new();
    provide_context(session);

    // один раз на старте: поднять токен из localStorage и проверить его
    spawn_local(async move { session.initialize().await });

    view! {
        <Router>
            <main class="page">
                <Header/>
                <section class="container">
                    <Routes fallback=|| "Страница не найдена.".into_view()>
                        <Route path=StaticSegment("") view=HomePage/>
                        <Route
                            path=(StaticSegment("auth"), StaticSegment("signin"))
                            view=SignInPage
                        />
                        <Route
                            path=(StaticSegment("auth"), StaticSegment("signup"))
                            view=SignUpPage
                        />
                        <Route
                            path=StaticSegment("blogs")
                            view=|| view! { <RequireAuth><BlogsPage/></RequireAuth> }
                        />
                        <Route
                            path=(StaticSegment("blogs"), StaticSegment("create"))
                            view=|| view! { <RequireAuth><BlogCreatePage/></RequireAuth> }
                        />
                        <Route
                            path=(StaticSegment("blogs"), StaticSegment("edit"), ParamSegment("id"))
                            view=|| view! { <RequireAuth><BlogEditPage/></RequireAuth> }
                        />
                        <Route
                            path=(StaticSegment("blogs"), ParamSegment("id"))
                            view=|| view! { <RequireAuth><BlogDetailPage/></RequireAuth> }
                        />
                        <Route
                            path=StaticSegment("profile")
                            view=|| view! { <RequireAuth><ProfilePage/></RequireAuth> }
                        />
                    </Routes>
                </section>
            </main>
        </Router>
    }
}
