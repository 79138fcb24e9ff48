use std::fmt;

/// Bearer token taken from persisted session state.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

// Токен не должен попадать в логи целиком
impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix: String = self.0.chars().take(6).collect();
        write!(f, "AuthToken({}…)", prefix)
    }
}

/// Session context handed to every privileged action.
///
/// Callers have to match on it before building a request, so a missing token
/// is always handled by the view instead of reaching the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated(AuthToken),
}

impl Session {
    /// Builds a session from whatever the storage returned. Blank tokens are
    /// treated as no session at all.
    pub fn from_stored(token: Option<String>) -> Self {
        match token {
            Some(token) if !token.trim().is_empty() => {
                Session::Authenticated(AuthToken(token.trim().to_string()))
            }
            _ => Session::Anonymous,
        }
    }

    pub fn authenticated(token: impl Into<String>) -> Self {
        Self::from_stored(Some(token.into()))
    }

    pub fn token(&self) -> Option<&AuthToken> {
        match self {
            Session::Authenticated(token) => Some(token),
            Session::Anonymous => None,
        }
    }
}
