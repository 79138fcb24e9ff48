use anyhow::{Context, Result};
use blog_client::Session;
use std::fs;
use std::path::{Path, PathBuf};

/// Persisted session state for the terminal: one token in a file.
pub struct TokenStore {
    token_path: PathBuf,
}

impl TokenStore {
    pub fn new(custom_path: Option<PathBuf>) -> Result<Self> {
        let token_path = match custom_path {
            Some(path) => path,
            None => {
                let home = dirs::home_dir().context("Failed to get home directory")?;
                home.join(".blog_token")
            }
        };

        Ok(Self { token_path })
    }

    pub fn path(&self) -> &Path {
        &self.token_path
    }

    pub fn save_token(&self, token: &str) -> Result<()> {
        fs::write(&self.token_path, token.trim())
            .with_context(|| format!("Failed to save token to {:?}", self.token_path))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&self.token_path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&self.token_path, perms)?;
        }

        tracing::debug!("Token saved to {:?}", self.token_path);
        Ok(())
    }

    /// Reads the session. A missing file is simply no session.
    pub fn load_session(&self) -> Result<Session> {
        match fs::read_to_string(&self.token_path) {
            Ok(token) => Ok(Session::from_stored(Some(token))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Session::Anonymous),
            Err(e) => Err(e).context("Failed to read token file"),
        }
    }

    /// Returns whether a token file was actually removed.
    pub fn clear_token(&self) -> Result<bool> {
        if !self.token_path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.token_path)
            .with_context(|| format!("Failed to remove token file {:?}", self.token_path))?;
        Ok(true)
    }
}
