use crate::api::{load_session, ApiClient};
use crate::app::{navigate, NavigationBar};
use blog_client::listing::{StatusChange, EMPTY_MESSAGE, LOADING_MESSAGE};
use blog_client::{
    BlogClientError, ListDisplay, ListOutcome, Post, PostEntry, PostListView, PostsApi, Route,
    StatusSync,
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

pub enum Msg {
    Loaded(Result<Vec<Post>, BlogClientError>),
    ChangeStatus(i64),
    StatusChanged(StatusChange, Result<(), BlogClientError>),
    DismissError,
    ViewDetails(i64),
}

pub struct Posts {
    view: PostListView,
    api: ApiClient,
}

impl Component for Posts {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let mut posts = Self {
            view: PostListView::new(),
            api: ApiClient::new(),
        };

        // Загружаем посты при монтировании
        match posts.view.begin_load(&load_session()) {
            Ok(token) => {
                let api = posts.api.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = api.list_posts(&token).await;
                    link.send_message(Msg::Loaded(result));
                });
            }
            Err(route) => navigate(ctx, route),
        }

        posts
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Loaded(result) => {
                self.view.finish_load(result);
                true
            }

            Msg::ChangeStatus(post_id) => match self.view.begin_toggle(&load_session(), post_id) {
                Ok(Some((token, change))) => {
                    let api = self.api.clone();
                    let link = ctx.link().clone();
                    spawn_local(async move {
                        let result = api
                            .set_published(&token, change.post_id, change.published)
                            .await;
                        link.send_message(Msg::StatusChanged(change, result));
                    });
                    true
                }
                Ok(None) => false,
                Err(route) => {
                    navigate(ctx, route);
                    false
                }
            },

            Msg::StatusChanged(change, result) => {
                if let ListOutcome::Failed(message) = self.view.finish_toggle(change, result) {
                    log::warn!("Status change for post {} reverted: {}", change.post_id, message);
                }
                true
            }

            Msg::DismissError => {
                self.view.dismiss_error();
                true
            }

            Msg::ViewDetails(id) => {
                navigate(ctx, Route::PostDetail(id));
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        match self.view.display() {
            ListDisplay::Loading => html! { <p>{ LOADING_MESSAGE }</p> },
            ListDisplay::Error(message) => html! {
                <div class="error">
                    <p>{ message }</p>
                    if !self.view.posts().is_empty() {
                        <button onclick={ctx.link().callback(|_| Msg::DismissError)}>
                            { "Back to posts" }
                        </button>
                    }
                </div>
            },
            ListDisplay::Empty => self.view_page(html! {
                <p class="empty">{ EMPTY_MESSAGE }</p>
            }),
            ListDisplay::Cards(cards) => self.view_page(html! {
                <div class="posts-grid">
                    { for cards.iter().map(|entry| self.view_card(entry, ctx)) }
                </div>
            }),
        }
    }
}

impl Posts {
    fn view_page(&self, body: Html) -> Html {
        html! {
            <div class="posts-page">
                <NavigationBar />
                <div class="container">
                    <h1>{ "Published Posts" }</h1>
                    { body }
                </div>
            </div>
        }
    }

    fn view_card(&self, entry: &PostEntry, ctx: &Context<Self>) -> Html {
        let post_id = entry.post.id;
        let summary = Html::from_html_unchecked(AttrValue::from(entry.summary_html()));
        let status_class = match entry.sync {
            StatusSync::Committed => "status",
            StatusSync::Pending => "status pending",
            StatusSync::Reverted => "status reverted",
        };

        let change_status = ctx.link().callback(move |e: MouseEvent| {
            e.stop_propagation();
            Msg::ChangeStatus(post_id)
        });
        let view_details = ctx.link().callback(move |_| Msg::ViewDetails(post_id));

        html! {
            <div class="post-card" key={post_id}>
                <h2>{ &entry.post.title }</h2>
                <p class="byline">{ entry.byline() }</p>
                <img src={entry.post.image.clone()} alt={entry.post.title.clone()} />
                <div class="summary">{ summary }</div>
                <p class={status_class}>{ format!("Status: {}", entry.status_label()) }</p>
                <button onclick={change_status}>{ "Change status" }</button>
                <button onclick={view_details}>{ "View Details" }</button>
            </div>
        }
    }
}
