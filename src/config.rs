//! Configuration management for the Last.fm Collage Generator.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and `.env` files. It provides a centralized way to
//! manage application configuration including the Last.fm API key, Spotify
//! credentials, endpoint URLs, and the local callback server address.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (endpoint URLs only; credentials have none)

use dotenv;
use std::{env, path::PathBuf};

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from `collagefm/.env` in the platform-specific
/// local data directory. Variables already present in the environment keep
/// their values. A missing `.env` file is not an error; credentials may come
/// from the process environment directly.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/collagefm/.env`
/// - macOS: `~/Library/Application Support/collagefm/.env`
/// - Windows: `%LOCALAPPDATA%/collagefm/.env`
///
/// # Errors
///
/// Returns an error string if the parent directory cannot be created.
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("collagefm/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    // An absent file is fine; the variables may already be set.
    let _ = dotenv::from_path(path);
    Ok(())
}

/// Returns the Last.fm API key.
///
/// # Panics
///
/// Panics if the `LASTFM_API_KEY` environment variable is not set.
pub fn lastfm_api_key() -> String {
    env::var("LASTFM_API_KEY").expect("LASTFM_API_KEY must be set")
}

/// Returns the Last.fm API base URL.
///
/// Defaults to the public audioscrobbler endpoint when `LASTFM_API_URL`
/// is not set.
pub fn lastfm_api_url() -> String {
    env::var("LASTFM_API_URL").unwrap_or_else(|_| "https://ws.audioscrobbler.com/2.0/".to_string())
}

/// Returns the server address for the local OAuth callback server.
///
/// # Panics
///
/// Panics if the `SERVER_ADDRESS` environment variable is not set.
///
/// # Example
///
/// ```
/// let addr = server_addr(); // e.g., "127.0.0.1:8080"
/// ```
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").expect("SERVER_ADDRESS must be set")
}

/// Returns the Spotify application client ID.
///
/// Used for both the client-credentials token exchange (cover-art search)
/// and the PKCE user flow (playlist export).
///
/// # Panics
///
/// Panics if the `SPOTIFY_CLIENT_ID` environment variable is not set.
pub fn spotify_client_id() -> String {
    env::var("SPOTIFY_CLIENT_ID").expect("SPOTIFY_CLIENT_ID must be set")
}

/// Returns the Spotify client ID and secret, or an error naming the
/// missing variable.
///
/// Used where Spotify is optional: the cover-art search degrades to
/// Last.fm-only artwork when no credentials are configured, so the
/// client-credentials grant must not panic on an absent variable.
pub fn spotify_client_credentials() -> Result<(String, String), String> {
    let id =
        env::var("SPOTIFY_CLIENT_ID").map_err(|_| "SPOTIFY_CLIENT_ID is not set".to_string())?;
    let secret = env::var("SPOTIFY_CLIENT_SECRET")
        .map_err(|_| "SPOTIFY_CLIENT_SECRET is not set".to_string())?;
    Ok((id, secret))
}

/// Returns the Spotify OAuth redirect URI.
///
/// Must match the redirect URI registered in the Spotify application
/// settings and resolve to the local callback server.
///
/// # Panics
///
/// Panics if the `SPOTIFY_REDIRECT_URI` environment variable is not set.
pub fn spotify_redirect_uri() -> String {
    env::var("SPOTIFY_REDIRECT_URI").expect("SPOTIFY_REDIRECT_URI must be set")
}

/// Returns the Spotify API scope permissions requested during the PKCE flow.
///
/// # Panics
///
/// Panics if the `SPOTIFY_SCOPE` environment variable is not set.
///
/// # Example
///
/// ```
/// let scope = spotify_scope(); // e.g., "playlist-modify-private"
/// ```
pub fn spotify_scope() -> String {
    env::var("SPOTIFY_SCOPE").expect("SPOTIFY_SCOPE must be set")
}

/// Returns the Spotify OAuth authorization URL.
pub fn spotify_auth_url() -> String {
    env::var("SPOTIFY_AUTH_URL")
        .unwrap_or_else(|_| "https://accounts.spotify.com/authorize".to_string())
}

/// Returns the Spotify OAuth token exchange URL.
pub fn spotify_token_url() -> String {
    env::var("SPOTIFY_TOKEN_URL")
        .unwrap_or_else(|_| "https://accounts.spotify.com/api/token".to_string())
}

/// Returns the Spotify Web API base URL.
pub fn spotify_api_url() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| "https://api.spotify.com/v1".to_string())
}

/// Returns the configured collage font path, if any.
///
/// When `COLLAGE_FONT` is unset the rasterizer falls back to a candidate
/// list of common system font locations.
pub fn collage_font() -> Option<PathBuf> {
    env::var("COLLAGE_FONT").ok().map(PathBuf::from)
}
