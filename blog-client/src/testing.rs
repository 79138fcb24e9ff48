use crate::api::PostsApi;
use crate::error::BlogClientError;
use crate::models::{DraftPost, Post};
use crate::session::AuthToken;
use async_trait::async_trait;
use std::cell::RefCell;

#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Create {
        token: String,
        title: String,
        content: String,
        image: Option<String>,
    },
    List {
        token: String,
    },
    SetPublished {
        token: String,
        post_id: i64,
        published: bool,
    },
}

/// In-memory backend that records every call. Each configured failure is
/// returned once.
#[derive(Default)]
pub struct FakeApi {
    posts: Vec<Post>,
    calls: RefCell<Vec<RecordedCall>>,
    create_error: RefCell<Option<BlogClientError>>,
    list_error: RefCell<Option<BlogClientError>>,
    patch_error: RefCell<Option<BlogClientError>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_posts(mut self, posts: Vec<Post>) -> Self {
        self.posts = posts;
        self
    }

    pub fn fail_create(self, err: BlogClientError) -> Self {
        *self.create_error.borrow_mut() = Some(err);
        self
    }

    pub fn fail_list(self, err: BlogClientError) -> Self {
        *self.list_error.borrow_mut() = Some(err);
        self
    }

    pub fn fail_patch(self, err: BlogClientError) -> Self {
        *self.patch_error.borrow_mut() = Some(err);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }
}

#[async_trait(?Send)]
impl PostsApi for FakeApi {
    async fn create_post(&self, token: &AuthToken, draft: &DraftPost) -> Result<(), BlogClientError> {
        self.calls.borrow_mut().push(RecordedCall::Create {
            token: token.as_str().to_string(),
            title: draft.title.clone(),
            content: draft.content.clone(),
            image: draft.image.as_ref().map(|image| image.file_name.clone()),
        });
        match self.create_error.borrow_mut().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn list_posts(&self, token: &AuthToken) -> Result<Vec<Post>, BlogClientError> {
        self.calls.borrow_mut().push(RecordedCall::List {
            token: token.as_str().to_string(),
        });
        match self.list_error.borrow_mut().take() {
            Some(err) => Err(err),
            None => Ok(self.posts.clone()),
        }
    }

    async fn set_published(
        &self,
        token: &AuthToken,
        post_id: i64,
        published: bool,
    ) -> Result<(), BlogClientError> {
        self.calls.borrow_mut().push(RecordedCall::SetPublished {
            token: token.as_str().to_string(),
            post_id,
            published,
        });
        match self.patch_error.borrow_mut().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

pub fn post(id: i64, published: bool) -> Post {
    Post {
        id,
        title: format!("Post {}", id),
        content: format!("<p>Body of post {}</p>", id),
        author_name: "author".to_string(),
        created_at: "2024-01-01T12:00:00Z".to_string(),
        published,
        image: format!("https://cdn.example.com/{}.png", id),
    }
}
