use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::warn;

use crate::{config, error::StoreError, spotify, types::Token};

use super::{read_json, write_json};

/// Seconds before expiry at which a token is already treated as expired.
const EXPIRY_MARGIN_SECS: u64 = 240;

/// Persists the OAuth token and refreshes it when it is about to expire.
pub struct TokenManager {
    token: Token,
    path: PathBuf,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        Self::with_path(token, Self::token_path())
    }

    pub fn with_path(token: Token, path: impl Into<PathBuf>) -> Self {
        TokenManager {
            token,
            path: path.into(),
        }
    }

    pub async fn load() -> Result<Self, StoreError> {
        Self::load_from(Self::token_path()).await
    }

    pub async fn load_from(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let token: Token = read_json(&path).await?;
        Ok(Self { token, path })
    }

    pub async fn persist(&self) -> Result<(), StoreError> {
        write_json(&self.path, &self.token).await
    }

    /// Removes the stored token, signing the user out.
    pub async fn clear(&self) -> Result<(), StoreError> {
        Self::remove(&self.path).await
    }

    /// Removes the token stored at the default location, if there is one.
    pub async fn clear_stored() -> Result<(), StoreError> {
        Self::remove(&Self::token_path()).await
    }

    /// Returns an access token, refreshing it first when it is about to expire.
    ///
    /// A failed refresh is only logged. The stale token is returned and the next
    /// API call reports it as unauthorized.
    pub async fn get_valid_token(&mut self) -> String {
        if self.is_expired() {
            match spotify::auth::refresh_token(&self.token.refresh_token).await {
                Ok(new_token) => {
                    self.token = new_token;
                    if let Err(e) = self.persist().await {
                        warn!(error = %e, "Failed to persist refreshed token");
                    }
                }
                Err(e) => warn!(error = %e, "Failed to refresh access token"),
            }
        }

        self.token.access_token.clone()
    }

    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now >= (self.token.obtained_at + self.token.expires_in).saturating_sub(EXPIRY_MARGIN_SECS)
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }

    async fn remove(path: &Path) -> Result<(), StoreError> {
        match async_fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn token_path() -> PathBuf {
        config::data_dir().join("cache/token.json")
    }
}
