use async_trait::async_trait;
use blog_client::api::{decode_post_list, post_path, PostsApi, POSTS_PATH};
use blog_client::config::DEFAULT_BACKEND_URL;
use blog_client::models::{DraftPost, ErrorResponse, ImageUpload, Post, StatusUpdateRequest};
use blog_client::{AuthToken, BlogClientError, ClientConfig, Session};
use gloo_net::http::{Request, Response};
use gloo_storage::{LocalStorage, Storage};
use js_sys::{Array, Uint8Array};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, File, FormData};

const TOKEN_KEY: &str = "token";

/// Session from local storage. The login flow stores the raw token string,
/// not JSON, so the raw storage API is used.
pub fn load_session() -> Session {
    let token = LocalStorage::raw().get_item(TOKEN_KEY).ok().flatten();
    Session::from_stored(token)
}

fn js_error(err: JsValue) -> BlogClientError {
    BlogClientError::Transport(format!("{:?}", err))
}

fn transport_error(err: gloo_net::Error) -> BlogClientError {
    BlogClientError::Transport(err.to_string())
}

/// Reads a picked file into memory for the multipart upload.
pub async fn read_image(file: &File) -> Result<ImageUpload, BlogClientError> {
    let buffer = JsFuture::from(file.array_buffer()).await.map_err(js_error)?;
    let bytes = Uint8Array::new(&buffer).to_vec();

    let image = ImageUpload::new(file.name(), bytes);
    let mime_type = file.type_();
    if mime_type.is_empty() {
        Ok(image)
    } else {
        Ok(image.with_mime_type(mime_type))
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ClientConfig,
}

impl ApiClient {
    pub fn new() -> Self {
        // Адрес бэкенда задаётся при сборке
        let base_url = option_env!("BLOG_BACKEND_URL").unwrap_or(DEFAULT_BACKEND_URL);
        Self {
            config: ClientConfig::new(base_url),
        }
    }

    fn form_data(draft: &DraftPost) -> Result<FormData, BlogClientError> {
        let form = FormData::new().map_err(js_error)?;
        form.append_with_str("title", &draft.title).map_err(js_error)?;
        form.append_with_str("content", &draft.content)
            .map_err(js_error)?;

        if let Some(image) = &draft.image {
            let bytes = Uint8Array::from(image.bytes.as_slice());
            let parts = Array::of1(&bytes);
            let options = BlobPropertyBag::new();
            options.set_type(&image.mime_type);
            let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
                .map_err(js_error)?;
            form.append_with_blob_and_filename("image", &blob, &image.file_name)
                .map_err(js_error)?;
        }

        Ok(form)
    }

    async fn check_status(response: Response) -> Result<Response, BlogClientError> {
        if response.ok() {
            return Ok(response);
        }

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        log::error!("Error response {}: {}", status, text);

        Err(BlogClientError::Http {
            status,
            message: ErrorResponse::message_from_body(&text),
        })
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl PostsApi for ApiClient {
    async fn create_post(&self, token: &AuthToken, draft: &DraftPost) -> Result<(), BlogClientError> {
        // Content-Type с boundary браузер выставит сам
        let request = Request::post(&self.config.url(POSTS_PATH))
            .header("Authorization", &token.bearer_header())
            .body(Self::form_data(draft)?)
            .map_err(transport_error)?;

        let response = request.send().await.map_err(transport_error)?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn list_posts(&self, token: &AuthToken) -> Result<Vec<Post>, BlogClientError> {
        let response = Request::get(&self.config.url(POSTS_PATH))
            .header("Authorization", &token.bearer_header())
            .send()
            .await
            .map_err(transport_error)?;

        let response = Self::check_status(response).await?;
        let text = response.text().await.map_err(transport_error)?;
        let body: serde_json::Value = serde_json::from_str(&text)
            .map_err(|_| BlogClientError::UnexpectedFormat(text.clone()))?;

        decode_post_list(body)
    }

    async fn set_published(
        &self,
        token: &AuthToken,
        post_id: i64,
        published: bool,
    ) -> Result<(), BlogClientError> {
        let request = Request::patch(&self.config.url(&post_path(post_id)))
            .header("Authorization", &token.bearer_header())
            .json(&StatusUpdateRequest { published })
            .map_err(transport_error)?;

        let response = request.send().await.map_err(transport_error)?;
        Self::check_status(response).await?;
        Ok(())
    }
}
