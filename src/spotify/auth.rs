use std::{sync::Arc, time::Duration};

use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::Utc;
use reqwest::Client;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::{
    config, error,
    management::TokenManager,
    server::start_api_server,
    success,
    types::{AppToken, PkceToken, Token},
    utils, warning,
};

/// Runs the complete OAuth 2.0 PKCE authentication flow.
///
/// Generates the PKCE verifier and challenge, starts the local callback
/// server, opens the authorization URL in the user's browser, waits for
/// the callback handler to exchange the code, and persists the token.
///
/// # Arguments
///
/// * `shared_state` - State shared with the callback handler; carries the
///   code verifier out and the exchanged token back
///
/// # Error Handling
///
/// - Browser launch failures fall back to printing the URL for manual use
/// - Token persistence failures terminate the program with an error
/// - A 60 second timeout without a callback terminates with an error
pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    let server_state = Arc::clone(&shared_state);
    tokio::spawn(async move {
        start_api_server(server_state).await;
    });

    let auth_url = format!(
        "{spotify_auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&code_challenge={code_challenge}&code_challenge_method=S256&scope={scope}",
        spotify_auth_url = &config::spotify_auth_url(),
        client_id = &config::spotify_client_id(),
        redirect_uri = &config::spotify_redirect_uri(),
        code_challenge = code_challenge,
        scope = &config::spotify_scope()
    );

    // The verifier must be visible to the callback handler before the
    // browser can possibly hit it.
    {
        let mut lock = shared_state.lock().await;
        *lock = Some(PkceToken {
            code_verifier: code_verifier.clone(),
            token: None,
        });
    }

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let token = wait_for_token(shared_state).await;

    match token {
        Some(t) => {
            let token_manager = TokenManager::new(t.clone());
            if let Err(e) = token_manager.persist().await {
                error!("Failed to save token to cache: {}", e);
            }

            success!("Authentication successful!");
        }
        None => {
            error!("Authentication failed or timed out.");
        }
    }
}

/// Polls the shared state for a completed token, up to 60 seconds.
async fn wait_for_token(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Option<Token> {
    use std::time::Instant;

    let max_wait = Duration::from_secs(60);
    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_state.lock().await;
        if let Some(pkce_token) = lock.as_ref() {
            if let Some(token) = &pkce_token.token {
                return Some(token.clone());
            }
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Exchanges an authorization code for an access token using PKCE.
///
/// The code verifier proves that the client completing the flow is the one
/// that started it. Authorization codes are single-use and short-lived, so
/// the exchange happens directly from the callback handler.
pub async fn exchange_code_pkce(code: &str, verifier: &str) -> Result<Token, reqwest::Error> {
    let client_id = &config::spotify_client_id();
    let redirect_uri = &config::spotify_redirect_uri();

    let client = Client::new();
    let res = client
        .post(&config::spotify_token_url())
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", client_id),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", redirect_uri),
        ])
        .send()
        .await?;

    let json: Value = res.json().await?;

    Ok(Token {
        access_token: json["access_token"]
            .as_str()
            .unwrap_or_default()
            .to_string(),
        refresh_token: json["refresh_token"]
            .as_str()
            .unwrap_or_default()
            .to_string(),
        scope: json["scope"].as_str().unwrap_or_default().to_string(),
        expires_in: json["expires_in"].as_i64().unwrap_or(3600) as u64,
        obtained_at: Utc::now().timestamp() as u64,
    })
}

/// Refreshes an expired user token using its refresh token.
pub async fn refresh_token(refresh_token: &str) -> Result<Token, String> {
    let client = Client::new();
    let res = client
        .post(&config::spotify_token_url())
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", &config::spotify_client_id()),
        ])
        .send()
        .await
        .map_err(|e| e.to_string())?;

    let json: Value = res.json().await.map_err(|e| e.to_string())?;

    Ok(Token {
        access_token: json["access_token"]
            .as_str()
            .unwrap_or_default()
            .to_string(),
        // Spotify may rotate the refresh token; keep the old one when the
        // response omits it.
        refresh_token: json["refresh_token"]
            .as_str()
            .unwrap_or(refresh_token)
            .to_string(),
        scope: json["scope"].as_str().unwrap_or_default().to_string(),
        expires_in: json["expires_in"].as_i64().unwrap_or(3600) as u64,
        obtained_at: Utc::now().timestamp() as u64,
    })
}

/// Requests an application token through the client-credentials grant.
///
/// This token authorizes catalog search only. It involves no user
/// interaction and no refresh token; when it expires, a new one is simply
/// requested.
pub async fn request_app_token() -> Result<AppToken, String> {
    let (client_id, client_secret) = config::spotify_client_credentials()?;
    let credentials = STANDARD.encode(format!("{}:{}", client_id, client_secret));

    let client = Client::new();
    let res = client
        .post(&config::spotify_token_url())
        .header("Authorization", format!("Basic {}", credentials))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await
        .map_err(|e| e.to_string())?;

    let json: Value = res.json().await.map_err(|e| e.to_string())?;

    match json["access_token"].as_str() {
        Some(access_token) => Ok(AppToken {
            access_token: access_token.to_string(),
            expires_in: json["expires_in"].as_i64().unwrap_or(3600) as u64,
            obtained_at: Utc::now().timestamp() as u64,
        }),
        None => Err(format!(
            "token endpoint returned no access token: {}",
            json["error_description"].as_str().unwrap_or("unknown")
        )),
    }
}
