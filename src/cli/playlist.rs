use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;

use crate::{
    error, info,
    lastfm::user,
    management::{SearchHistory, TokenManager},
    spotify, success,
    types::{ItemKind, Period},
    warning,
};

/// Exports a user's top-tracks chart as a private Spotify playlist.
///
/// Requires a prior `collagefm auth`. Tracks that cannot be matched on
/// Spotify are skipped with a warning count rather than failing the
/// export.
pub async fn playlist(username: Option<String>, period: Period, limit: u32, name: Option<String>) {
    let history = SearchHistory::load().await;
    let username = match username.or_else(|| history.last_username().map(str::to_string)) {
        Some(u) => u,
        None => {
            error!("No username given and no previous one to fall back on.");
        }
    };

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

    let playlist_name =
        name.unwrap_or_else(|| format!("{} top tracks ({})", username, period.label()));

    let playlist_exists = match spotify::playlist::exists(&playlist_name).await {
        Ok(exists) => exists,
        Err(e) => {
            warning!("Failed to check if playlist exists: {}", e);
            false
        }
    };

    if playlist_exists {
        info!("Playlist {} already exists", playlist_name);
        return;
    }

    let client = Client::new();
    let tracks = match user::fetch_top_items(&client, &username, ItemKind::Tracks, period, limit)
        .await
    {
        Ok(tracks) => tracks,
        Err(e) => error!("Failed to load top tracks for {}: {}", username, e),
    };

    if tracks.is_empty() {
        warning!("{} has no top tracks in this period.", username);
        return;
    }

    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Matching {} tracks on Spotify...", tracks.len()));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let mut uris = Vec::new();
    let mut missed = 0;
    for track in &tracks {
        match spotify::search::track_uri(&client, &token, &track.primary_artist, &track.name).await
        {
            Ok(Some(uri)) => uris.push(uri),
            Ok(None) => missed += 1,
            Err(e) => {
                missed += 1;
                warning!("Lookup failed for {}: {}", track.name, e);
            }
        }
    }
    pb.finish_and_clear();

    if missed > 0 {
        warning!("{} of {} tracks could not be matched.", missed, tracks.len());
    }

    if uris.is_empty() {
        error!("None of the tracks could be matched on Spotify.");
    }

    let playlist_id = match spotify::playlist::create(playlist_name.clone()).await {
        Ok(resp) => resp.id,
        Err(e) => error!("Failed to create playlist: {}", e),
    };

    for chunk in uris.chunks(100) {
        if let Err(e) = spotify::playlist::add_tracks(playlist_id.clone(), chunk.to_vec()).await {
            error!("Failed to add tracks to playlist: {}", e);
        }
    }

    success!(
        "Playlist {} created with {} tracks.",
        playlist_name,
        uris.len()
    );
}
