use std::fmt;

/// Client-side destinations the views can send the user to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Posts,
    CreatePost,
    PostDetail(i64),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Posts => "/posts".to_string(),
            Route::CreatePost => "/posts/new".to_string(),
            Route::PostDetail(id) => format!("/posts/{}", id),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
