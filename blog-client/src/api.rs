use crate::error::BlogClientError;
use crate::models::{DraftPost, Post};
use crate::session::AuthToken;
use async_trait::async_trait;

pub const POSTS_PATH: &str = "/api/posts";

pub fn post_path(id: i64) -> String {
    format!("{}/{}", POSTS_PATH, id)
}

/// Backend surface the views talk to.
///
/// Every call takes an `AuthToken`, not a `Session`: the caller has already
/// branched on the session by the time a request can be built. Futures are not
/// required to be `Send` so the browser's fetch-based client fits too.
#[async_trait(?Send)]
pub trait PostsApi {
    /// `POST /api/posts` as multipart form data.
    async fn create_post(&self, token: &AuthToken, draft: &DraftPost) -> Result<(), BlogClientError>;

    /// `GET /api/posts`. A body that is not a JSON array is a format error.
    async fn list_posts(&self, token: &AuthToken) -> Result<Vec<Post>, BlogClientError>;

    /// `PATCH /api/posts/:id` with `{ "published": .. }`.
    async fn set_published(
        &self,
        token: &AuthToken,
        post_id: i64,
        published: bool,
    ) -> Result<(), BlogClientError>;
}

/// Decodes a listing body, rejecting anything that is not an array before
/// looking at individual posts.
pub fn decode_post_list(body: serde_json::Value) -> Result<Vec<Post>, BlogClientError> {
    if !body.is_array() {
        tracing::warn!("Unexpected data format: {}", body);
        return Err(BlogClientError::UnexpectedFormat(body.to_string()));
    }
    Ok(serde_json::from_value(body)?)
}
