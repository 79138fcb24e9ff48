use thiserror::Error;

pub const UNEXPECTED_FORMAT_MESSAGE: &str =
    "Received unexpected data format. Please contact support.";
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again.";

#[derive(Debug, Error)]
pub enum BlogClientError {
    // Сервер ответил ошибкой
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Http { status: u16, message: Option<String> },

    // Запрос не дошёл до сервера
    #[error("Transport error: {0}")]
    Transport(String),

    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    // Тело ответа не того вида
    #[error("Unexpected response format: {0}")]
    UnexpectedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl BlogClientError {
    /// Text shown to the user in place of the view.
    ///
    /// A message sent by the server wins. Failures that happened on the wire
    /// without one fall back to `fallback`; everything else gets the generic
    /// message.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            BlogClientError::Http {
                message: Some(message),
                ..
            } => message.clone(),
            BlogClientError::Http { message: None, .. } | BlogClientError::Transport(_) => {
                fallback.to_string()
            }
            #[cfg(feature = "http")]
            BlogClientError::Request(_) => fallback.to_string(),
            BlogClientError::UnexpectedFormat(_) => UNEXPECTED_FORMAT_MESSAGE.to_string(),
            BlogClientError::Serialization(_) => UNEXPECTED_ERROR_MESSAGE.to_string(),
        }
    }
}

impl From<serde_json::Error> for BlogClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
