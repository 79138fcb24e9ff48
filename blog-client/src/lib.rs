//! Client side of the blog: data model, session context, content rendering,
//! and the state machines behind the create-post form and the post listing.
//!
//! The `http` feature (on by default) adds a reqwest-backed [`PostsApi`].
//! Browser builds turn it off and bring their own fetch-based implementation.

pub mod api;
pub mod composer;
pub mod config;
pub mod content;
pub mod error;
#[cfg(feature = "http")]
pub mod http_client;
pub mod listing;
pub mod models;
pub mod routes;
pub mod session;

#[cfg(test)]
mod testing;

pub use api::PostsApi;
pub use composer::{ComposeStatus, PostComposer, SubmitOutcome};
pub use config::ClientConfig;
pub use error::BlogClientError;
#[cfg(feature = "http")]
pub use http_client::HttpClient;
pub use listing::{ListDisplay, ListOutcome, PostEntry, PostListView, StatusSync};
pub use models::{DraftPost, ImageUpload, Post};
pub use routes::Route;
pub use session::{AuthToken, Session};
