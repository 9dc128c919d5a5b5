use std::path::PathBuf;

use chrono::Utc;

use crate::{
    spotify,
    types::{AppToken, Token},
};

/// Seconds before nominal expiry at which a token is treated as expired.
const EXPIRY_BUFFER: u64 = 240;

/// Owns the user's PKCE token and keeps it fresh.
///
/// The token is held in memory and mirrored to `cache/token.json`. Callers
/// ask for a valid access token through [`get_valid_token`], which
/// refreshes transparently when the stored token is within the expiry
/// buffer.
///
/// [`get_valid_token`]: TokenManager::get_valid_token
pub struct TokenManager {
    token: Token,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager { token }
    }

    pub async fn load() -> Result<Self, String> {
        let path = Self::token_path();
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| e.to_string())?;
        let token: Token = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self { token })
    }

    pub async fn persist(&self) -> Result<(), String> {
        let path = Self::token_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        async_fs::write(path, json).await.map_err(|e| e.to_string())
    }

    /// Returns an access token that is valid right now, refreshing and
    /// re-persisting first when needed.
    pub async fn get_valid_token(&mut self) -> String {
        if self.is_expired() {
            if let Ok(new_token) = spotify::auth::refresh_token(&self.token.refresh_token).await {
                self.token = new_token;
                let _ = self.persist().await;
            }
        }

        self.token.access_token.clone()
    }

    fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now >= self.token.obtained_at + self.token.expires_in - EXPIRY_BUFFER
    }

    fn token_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("collagefm/cache/token.json");
        path
    }
}

/// Owns the client-credentials token used for catalog search.
///
/// Unlike the user token there is no refresh token; an expired app token
/// is replaced by requesting a new one.
pub struct AppTokenManager {
    token: AppToken,
}

impl AppTokenManager {
    /// Loads the cached app token, requesting a fresh one when the cache
    /// is missing or unreadable.
    pub async fn load_or_request() -> Result<Self, String> {
        let path = Self::token_path();
        if let Ok(content) = async_fs::read_to_string(&path).await {
            if let Ok(token) = serde_json::from_str::<AppToken>(&content) {
                return Ok(Self { token });
            }
        }

        let token = spotify::auth::request_app_token().await?;
        let manager = Self { token };
        let _ = manager.persist().await;
        Ok(manager)
    }

    pub async fn persist(&self) -> Result<(), String> {
        let path = Self::token_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        async_fs::write(path, json).await.map_err(|e| e.to_string())
    }

    pub async fn get_valid_token(&mut self) -> Result<String, String> {
        if self.is_expired() {
            self.token = spotify::auth::request_app_token().await?;
            let _ = self.persist().await;
        }

        Ok(self.token.access_token.clone())
    }

    fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now >= self.token.obtained_at + self.token.expires_in - EXPIRY_BUFFER
    }

    fn token_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("collagefm/cache/app-token.json");
        path
    }
}
