use crate::api::{load_session, read_image, ApiClient};
use crate::app::navigate;
use blog_client::{BlogClientError, ComposeStatus, PostComposer, PostsApi, SubmitOutcome};
use wasm_bindgen_futures::spawn_local;
use web_sys::{File, HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

const INITIAL_CONTENT: &str = "<p>Start writing your post...</p>";

pub enum Msg {
    UpdateTitle(String),
    UpdateContent(String),
    SelectImage(Option<File>),
    Submit,
    Submitted(Result<(), BlogClientError>),
}

pub struct CreatePost {
    composer: PostComposer,
    // Файл читается только при отправке
    image_file: Option<File>,
    api: ApiClient,
}

impl Component for CreatePost {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            composer: PostComposer::new(),
            image_file: None,
            api: ApiClient::new(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::UpdateTitle(val) => {
                self.composer.set_title(val);
                true
            }
            Msg::UpdateContent(val) => {
                self.composer.set_content(val);
                false
            }
            Msg::SelectImage(file) => {
                self.image_file = file;
                false
            }

            Msg::Submit => match self.composer.begin_submit(&load_session()) {
                Ok((token, mut draft)) => {
                    let api = self.api.clone();
                    let file = self.image_file.clone();
                    let link = ctx.link().clone();

                    spawn_local(async move {
                        let result = async {
                            if let Some(file) = file {
                                draft.image = Some(read_image(&file).await?);
                            }
                            api.create_post(&token, &draft).await
                        }
                        .await;
                        link.send_message(Msg::Submitted(result));
                    });

                    true
                }
                Err(SubmitOutcome::Redirect(route)) => {
                    navigate(ctx, route);
                    false
                }
                Err(_) => false,
            },

            Msg::Submitted(result) => match self.composer.finish_submit(result) {
                SubmitOutcome::Navigate(route) => {
                    self.image_file = None;
                    navigate(ctx, route);
                    false
                }
                _ => true,
            },
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let submitting = *self.composer.status() == ComposeStatus::Submitting;
        let submit_label = if submitting { "Submitting..." } else { "Submit" };

        html! {
            <div class="container">
                <h1>{ "Create New Post" }</h1>
                <input
                    type="text"
                    placeholder="Post Title"
                    value={self.composer.draft().title.clone()}
                    oninput={ctx.link().callback(|e: InputEvent| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        Msg::UpdateTitle(input.value())
                    })}
                />
                <textarea
                    rows="16"
                    placeholder={INITIAL_CONTENT}
                    oninput={ctx.link().callback(|e: InputEvent| {
                        let input: HtmlTextAreaElement = e.target_unchecked_into();
                        Msg::UpdateContent(input.value())
                    })}
                />
                <input
                    type="file"
                    accept="image/*"
                    onchange={ctx.link().callback(|e: Event| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        Msg::SelectImage(input.files().and_then(|files| files.get(0)))
                    })}
                />
                if let Some(error) = self.composer.error() {
                    <p class="error">{ error }</p>
                }
                <button disabled={submitting} onclick={ctx.link().callback(|_| Msg::Submit)}>
                    { submit_label }
                </button>
            </div>
        }
    }
}
