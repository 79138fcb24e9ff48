use crate::api::PostsApi;
use crate::content::{display_date, summary_html};
use crate::error::BlogClientError;
use crate::models::Post;
use crate::routes::Route;
use crate::session::{AuthToken, Session};

pub const LOADING_MESSAGE: &str = "Loading...";
pub const EMPTY_MESSAGE: &str = "No published posts available.";
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load posts. Please try again.";
pub const STATUS_FAILED_MESSAGE: &str = "Failed to change post status. Please try again.";

/// Where a card's `published` flag stands relative to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusSync {
    /// Matches what the server last confirmed.
    Committed,
    /// Flipped locally, PATCH still in flight.
    Pending,
    /// PATCH failed and the local flip was undone.
    Reverted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostEntry {
    pub post: Post,
    pub sync: StatusSync,
}

impl PostEntry {
    fn new(post: Post) -> Self {
        Self {
            post,
            sync: StatusSync::Committed,
        }
    }

    pub fn summary_html(&self) -> String {
        summary_html(&self.post.content)
    }

    /// `"<author> at <date>"`
    pub fn byline(&self) -> String {
        format!(
            "{} at {}",
            self.post.author_name,
            display_date(&self.post.created_at)
        )
    }

    pub fn status_label(&self) -> &'static str {
        if self.post.published {
            "Published"
        } else {
            "Hidden"
        }
    }

    pub fn detail_route(&self) -> Route {
        Route::PostDetail(self.post.id)
    }
}

/// A status change applied locally and waiting for the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub post_id: i64,
    pub published: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    Loading,
    Ready,
}

/// What the view should draw right now, in precedence order.
#[derive(Debug, PartialEq)]
pub enum ListDisplay<'a> {
    Loading,
    Error(&'a str),
    Empty,
    Cards(&'a [PostEntry]),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListOutcome {
    Ready,
    Redirect(Route),
    Failed(String),
}

/// State behind the post listing.
#[derive(Debug, Clone)]
pub struct PostListView {
    phase: LoadPhase,
    posts: Vec<PostEntry>,
    error: Option<String>,
}

impl PostListView {
    pub fn new() -> Self {
        Self {
            phase: LoadPhase::Idle,
            posts: Vec::new(),
            error: None,
        }
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn posts(&self) -> &[PostEntry] {
        &self.posts
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn display(&self) -> ListDisplay<'_> {
        if self.phase != LoadPhase::Ready {
            return ListDisplay::Loading;
        }
        if let Some(error) = &self.error {
            return ListDisplay::Error(error);
        }
        if self.posts.is_empty() {
            ListDisplay::Empty
        } else {
            ListDisplay::Cards(&self.posts)
        }
    }

    /// Starts a fetch. Without a session the view redirects home and stays
    /// idle, so no request is ever built.
    pub fn begin_load(&mut self, session: &Session) -> Result<AuthToken, Route> {
        let Some(token) = session.token() else {
            tracing::warn!("No session for post listing, redirecting");
            return Err(Route::Home);
        };

        self.phase = LoadPhase::Loading;
        self.error = None;
        Ok(token.clone())
    }

    pub fn finish_load(&mut self, result: Result<Vec<Post>, BlogClientError>) -> ListOutcome {
        self.phase = LoadPhase::Ready;

        match result {
            Ok(posts) => {
                tracing::info!("Loaded {} posts", posts.len());
                self.posts = posts.into_iter().map(PostEntry::new).collect();
                ListOutcome::Ready
            }
            Err(err) => {
                tracing::error!("Failed to load posts: {}", err);
                let message = err.user_message(LOAD_FAILED_MESSAGE);
                self.error = Some(message.clone());
                ListOutcome::Failed(message)
            }
        }
    }

    /// Flips the post's flag right away and marks it pending.
    ///
    /// Returns `Ok(None)` when the id is not in the list.
    pub fn begin_toggle(
        &mut self,
        session: &Session,
        post_id: i64,
    ) -> Result<Option<(AuthToken, StatusChange)>, Route> {
        let Some(token) = session.token() else {
            tracing::warn!("No session for status change, redirecting");
            return Err(Route::Home);
        };

        let Some(entry) = self.posts.iter_mut().find(|entry| entry.post.id == post_id) else {
            return Ok(None);
        };

        entry.post.published = !entry.post.published;
        entry.sync = StatusSync::Pending;

        Ok(Some((
            token.clone(),
            StatusChange {
                post_id,
                published: entry.post.published,
            },
        )))
    }

    /// Commits the change, or undoes it when the server refused.
    ///
    /// The undo only applies while the card still shows the value this change
    /// set; a later toggle on the same post takes precedence.
    pub fn finish_toggle(
        &mut self,
        change: StatusChange,
        result: Result<(), BlogClientError>,
    ) -> ListOutcome {
        let entry = self
            .posts
            .iter_mut()
            .find(|entry| entry.post.id == change.post_id);

        match result {
            Ok(()) => {
                if let Some(entry) = entry {
                    if entry.post.published == change.published {
                        entry.sync = StatusSync::Committed;
                    }
                }
                ListOutcome::Ready
            }
            Err(err) => {
                tracing::error!(
                    "Failed to change status of post {}: {}",
                    change.post_id,
                    err
                );
                if let Some(entry) = entry {
                    if entry.post.published == change.published {
                        entry.post.published = !change.published;
                        entry.sync = StatusSync::Reverted;
                    }
                }
                let message = err.user_message(STATUS_FAILED_MESSAGE);
                self.error = Some(message.clone());
                ListOutcome::Failed(message)
            }
        }
    }

    pub async fn load<A>(&mut self, api: &A, session: &Session) -> ListOutcome
    where
        A: PostsApi + ?Sized,
    {
        let token = match self.begin_load(session) {
            Ok(token) => token,
            Err(route) => return ListOutcome::Redirect(route),
        };

        let result = api.list_posts(&token).await;
        self.finish_load(result)
    }

    pub async fn change_post_status<A>(
        &mut self,
        api: &A,
        session: &Session,
        post_id: i64,
    ) -> ListOutcome
    where
        A: PostsApi + ?Sized,
    {
        let (token, change) = match self.begin_toggle(session, post_id) {
            Ok(Some(ready)) => ready,
            Ok(None) => return ListOutcome::Ready,
            Err(route) => return ListOutcome::Redirect(route),
        };

        let result = api
            .set_published(&token, change.post_id, change.published)
            .await;
        self.finish_toggle(change, result)
    }
}

impl Default for PostListView {
    fn default() -> Self {
        Self::new()
    }
}
