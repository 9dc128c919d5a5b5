use reqwest::Client;

use crate::{
    config,
    types::{SpotifyArtistSearchResponse, SpotifyTrackSearchResponse},
};

/// Searches for an artist and returns their largest profile image, if any.
///
/// Takes the first search hit only. A miss (no hit, or a hit without
/// imagery) is `Ok(None)`; the caller decides whether that matters.
pub async fn artist_image(
    client: &Client,
    token: &str,
    name: &str,
) -> Result<Option<String>, reqwest::Error> {
    let api_url = format!("{}/search", config::spotify_api_url());
    let response = client
        .get(&api_url)
        .query(&[("q", name), ("type", "artist"), ("limit", "1")])
        .bearer_auth(token)
        .send()
        .await?
        .error_for_status()?;

    let json = response.json::<SpotifyArtistSearchResponse>().await?;

    Ok(json
        .artists
        .items
        .first()
        .and_then(|artist| artist.images.first())
        .map(|img| img.url.clone()))
}

/// Searches for a track and returns its album cover, if any.
pub async fn track_image(
    client: &Client,
    token: &str,
    artist: &str,
    track: &str,
) -> Result<Option<String>, reqwest::Error> {
    Ok(search_track(client, token, artist, track)
        .await?
        .and_then(|t| t.album.images.first().map(|img| img.url.clone())))
}

/// Searches for a track and returns its Spotify URI, for playlist export.
pub async fn track_uri(
    client: &Client,
    token: &str,
    artist: &str,
    track: &str,
) -> Result<Option<String>, reqwest::Error> {
    Ok(search_track(client, token, artist, track)
        .await?
        .map(|t| t.uri))
}

async fn search_track(
    client: &Client,
    token: &str,
    artist: &str,
    track: &str,
) -> Result<Option<crate::types::SpotifyTrack>, reqwest::Error> {
    let api_url = format!("{}/search", config::spotify_api_url());
    let query = format!("track:{} artist:{}", track, artist);
    let response = client
        .get(&api_url)
        .query(&[("q", query.as_str()), ("type", "track"), ("limit", "1")])
        .bearer_auth(token)
        .send()
        .await?
        .error_for_status()?;

    let json = response.json::<SpotifyTrackSearchResponse>().await?;

    Ok(json.tracks.items.into_iter().next())
}
