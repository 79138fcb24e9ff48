use crate::api::PostsApi;
use crate::error::BlogClientError;
use crate::models::{DraftPost, ImageUpload};
use crate::routes::Route;
use crate::session::{AuthToken, Session};

pub const CREATE_FAILED_MESSAGE: &str = "Failed to create post. Please try again.";

#[derive(Debug, Clone, PartialEq)]
pub enum ComposeStatus {
    Editing,
    Submitting,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Post created; leave the form.
    Navigate(Route),
    /// No session; nothing was sent.
    Redirect(Route),
    /// A submission is already in flight.
    Ignored,
    Failed(String),
}

/// State behind the create-post form.
#[derive(Debug, Clone)]
pub struct PostComposer {
    draft: DraftPost,
    status: ComposeStatus,
}

impl PostComposer {
    pub fn new() -> Self {
        Self {
            draft: DraftPost::default(),
            status: ComposeStatus::Editing,
        }
    }

    pub fn draft(&self) -> &DraftPost {
        &self.draft
    }

    pub fn status(&self) -> &ComposeStatus {
        &self.status
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            ComposeStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.draft.content = content.into();
    }

    pub fn set_image(&mut self, image: Option<ImageUpload>) {
        self.draft.image = image;
    }

    /// Checks the session and moves to `Submitting`.
    ///
    /// Returns the token and a snapshot of the draft to send. No validation of
    /// empty fields happens here; the backend decides.
    pub fn begin_submit(&mut self, session: &Session) -> Result<(AuthToken, DraftPost), SubmitOutcome> {
        if self.status == ComposeStatus::Submitting {
            return Err(SubmitOutcome::Ignored);
        }

        let Some(token) = session.token() else {
            tracing::warn!("Create post attempted without a session, redirecting");
            return Err(SubmitOutcome::Redirect(Route::Home));
        };

        self.status = ComposeStatus::Submitting;
        Ok((token.clone(), self.draft.clone()))
    }

    pub fn finish_submit(&mut self, result: Result<(), BlogClientError>) -> SubmitOutcome {
        match result {
            Ok(()) => {
                self.draft = DraftPost::default();
                self.status = ComposeStatus::Editing;
                SubmitOutcome::Navigate(Route::Posts)
            }
            Err(err) => {
                tracing::error!("Failed to create post: {}", err);
                let message = err.user_message(CREATE_FAILED_MESSAGE);
                self.status = ComposeStatus::Failed(message.clone());
                SubmitOutcome::Failed(message)
            }
        }
    }

    /// Runs a whole submission against `api`.
    pub async fn submit<A>(&mut self, api: &A, session: &Session) -> SubmitOutcome
    where
        A: PostsApi + ?Sized,
    {
        let (token, draft) = match self.begin_submit(session) {
            Ok(ready) => ready,
            Err(outcome) => return outcome,
        };

        let result = api.create_post(&token, &draft).await;
        self.finish_submit(result)
    }
}

impl Default for PostComposer {
    fn default() -> Self {
        Self::new()
    }
}
