use reqwest::Client;

use crate::{
    config, error,
    management::TokenManager,
    types::{
        AddTracksRequest, AddTracksResponse, CreatePlaylistRequest, CreatePlaylistResponse,
        SpotifyMeResponse, UserPlaylistsResponse,
    },
};

/// Checks whether the authenticated user already owns a playlist with the
/// given name. Only the first page of playlists is inspected; fifty entries
/// cover the duplicate-run case this guards against.
pub async fn exists(playlist_name: &str) -> Result<bool, reqwest::Error> {
    let mut token_mgr = match TokenManager::load().await {
        Ok(manager) => manager,
        Err(e) => {
            error!(
                "Failed to load token. Please run collagefm auth\n Error: {}",
                e
            );
        }
    };
    let token = token_mgr.get_valid_token().await;

    let api_url = format!("{}/me/playlists?limit=50", config::spotify_api_url());
    let client = Client::new();
    let response = client
        .get(&api_url)
        .bearer_auth(token)
        .send()
        .await?
        .error_for_status()?;

    let json = response.json::<UserPlaylistsResponse>().await?;

    Ok(json.items.iter().any(|p| p.name == playlist_name))
}

/// Creates a private playlist in the authenticated user's library.
pub async fn create(name: String) -> Result<CreatePlaylistResponse, reqwest::Error> {
    let mut token_mgr = match TokenManager::load().await {
        Ok(manager) => manager,
        Err(e) => {
            error!(
                "Failed to load token. Please run collagefm auth\n Error: {}",
                e
            );
        }
    };
    let token = token_mgr.get_valid_token().await;
    let client = Client::new();

    let me_url = format!("{}/me", config::spotify_api_url());
    let me = client
        .get(&me_url)
        .bearer_auth(&token)
        .send()
        .await?
        .error_for_status()?
        .json::<SpotifyMeResponse>()
        .await?;

    let api_url = format!("{}/users/{}/playlists", config::spotify_api_url(), me.id);
    let body = CreatePlaylistRequest {
        name,
        description: "Created by collagefm from a Last.fm top-tracks chart.".to_string(),
        public: false,
        collaborative: false,
    };

    let response = client
        .post(&api_url)
        .bearer_auth(&token)
        .json(&body)
        .send()
        .await?
        .error_for_status()?;

    response.json::<CreatePlaylistResponse>().await
}

/// Adds a batch of track URIs to a playlist. The API caps one request at
/// 100 tracks, so the caller chunks accordingly.
pub async fn add_tracks(playlist_id: String, uris: Vec<String>) -> Result<(), reqwest::Error> {
    let mut token_mgr = match TokenManager::load().await {
        Ok(manager) => manager,
        Err(e) => {
            error!(
                "Failed to load token. Please run collagefm auth\n Error: {}",
                e
            );
        }
    };
    let token = token_mgr.get_valid_token().await;

    let api_url = format!(
        "{}/playlists/{}/tracks",
        config::spotify_api_url(),
        playlist_id
    );
    let client = Client::new();
    client
        .post(&api_url)
        .bearer_auth(token)
        .json(&AddTracksRequest { uris })
        .send()
        .await?
        .error_for_status()?
        .json::<AddTracksResponse>()
        .await?;

    Ok(())
}
