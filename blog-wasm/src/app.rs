use crate::create_post::CreatePost;
use crate::posts::Posts;
use blog_client::Route;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq)]
pub enum AppRoute {
    #[at("/")]
    Home,
    #[at("/posts")]
    Posts,
    #[at("/posts/new")]
    CreatePost,
    #[at("/posts/:id")]
    PostDetail { id: i64 },
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl From<Route> for AppRoute {
    fn from(route: Route) -> Self {
        match route {
            Route::Home => AppRoute::Home,
            Route::Posts => AppRoute::Posts,
            Route::CreatePost => AppRoute::CreatePost,
            Route::PostDetail(id) => AppRoute::PostDetail { id },
        }
    }
}

/// Pushes a route chosen by one of the view state machines.
pub fn navigate<C: Component>(ctx: &Context<C>, route: Route) {
    match ctx.link().navigator() {
        Some(navigator) => navigator.push(&AppRoute::from(route)),
        None => log::warn!("No router in scope, cannot navigate to {}", route),
    }
}

fn switch(route: AppRoute) -> Html {
    match route {
        AppRoute::Home => html! {
            <div class="landing">
                <h1>{ "Blog" }</h1>
                <p>{ "Sign in to manage your posts." }</p>
            </div>
        },
        AppRoute::Posts => html! { <Posts /> },
        AppRoute::CreatePost => html! { <CreatePost /> },
        // Страница поста живёт вне этого клиента
        AppRoute::PostDetail { id } => html! {
            <div class="post-detail">
                <NavigationBar />
                <p>{ format!("Post #{}", id) }</p>
            </div>
        },
        AppRoute::NotFound => html! { <p>{ "Page not found" }</p> },
    }
}

#[function_component(NavigationBar)]
pub fn navigation_bar() -> Html {
    html! {
        <nav class="navigation">
            <Link<AppRoute> to={AppRoute::Posts}>{ "Posts" }</Link<AppRoute>>
            <Link<AppRoute> to={AppRoute::CreatePost}>{ "New post" }</Link<AppRoute>>
        </nav>
    }
}

pub struct App;

impl Component for App {
    type Message = ();
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {
            <BrowserRouter>
                <Switch<AppRoute> render={switch} />
            </BrowserRouter>
        }
    }
}
