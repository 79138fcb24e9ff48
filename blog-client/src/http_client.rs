use crate::api::{decode_post_list, post_path, PostsApi, POSTS_PATH};
use crate::config::ClientConfig;
use crate::error::BlogClientError;
use crate::models::{DraftPost, ErrorResponse, Post, StatusUpdateRequest};
use crate::session::AuthToken;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use std::time::Duration;

/// reqwest-backed `PostsApi` for native front-ends.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    config: ClientConfig,
}

impl HttpClient {
    pub fn new(config: ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, config }
    }

    fn multipart_form(draft: &DraftPost) -> Result<Form, BlogClientError> {
        let mut form = Form::new()
            .text("title", draft.title.clone())
            .text("content", draft.content.clone());

        if let Some(image) = &draft.image {
            let part = Part::bytes(image.bytes.clone())
                .file_name(image.file_name.clone())
                .mime_str(&image.mime_type)?;
            form = form.part("image", part);
        }

        Ok(form)
    }

    async fn check_status(response: Response) -> Result<Response, BlogClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_text = response.text().await.unwrap_or_default();
        let message = ErrorResponse::message_from_body(&error_text);
        tracing::error!("Error response {}: {}", status, error_text);

        Err(BlogClientError::Http {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait(?Send)]
impl PostsApi for HttpClient {
    async fn create_post(&self, token: &AuthToken, draft: &DraftPost) -> Result<(), BlogClientError> {
        let url = self.config.url(POSTS_PATH);
        let form = Self::multipart_form(draft)?;

        tracing::debug!(
            "Creating post '{}' (image attached: {})",
            draft.title,
            draft.image.is_some()
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(token.as_str())
            .multipart(form)
            .send()
            .await?;

        Self::check_status(response).await?;
        Ok(())
    }

    async fn list_posts(&self, token: &AuthToken) -> Result<Vec<Post>, BlogClientError> {
        let url = self.config.url(POSTS_PATH);
        tracing::debug!("Fetching posts from {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(token.as_str())
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        let text = response.text().await?;
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
        let url = self.config.url(&post_path(post_id));
        tracing::debug!("Setting post {} published={}", post_id, published);

        let response = self
            .client
            .patch(&url)
            .bearer_auth(token.as_str())
            .json(&StatusUpdateRequest { published })
            .send()
            .await?;

        Self::check_status(response).await?;
        Ok(())
    }
}
