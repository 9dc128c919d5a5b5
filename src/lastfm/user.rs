use reqwest::Client;

use crate::{
    error::ApiError,
    lastfm::request,
    types::{
        CompareResponse, ImageRef, Item, ItemKind, Period, RecentTracksResponse, SizeTag,
        TopAlbumsResponse, TopArtistsResponse, TopTracksResponse, UserInfoResponse, WireImage,
        WireRecentTrack, WireUser,
    },
};

/// Fetches a user's top chart for one kind and period, translated into
/// domain items.
///
/// The returned vector preserves the chart order exactly as the service
/// delivered it. Items without usable artwork are kept here; dropping them
/// is the layout engine's decision, not the fetcher's.
///
/// # Arguments
///
/// * `client` - Shared HTTP client
/// * `username` - Last.fm account to chart
/// * `kind` - Which chart to fetch (albums, artists or tracks)
/// * `period` - Chart window
/// * `limit` - Maximum number of entries to request
pub async fn fetch_top_items(
    client: &Client,
    username: &str,
    kind: ItemKind,
    period: Period,
    limit: u32,
) -> Result<Vec<Item>, ApiError> {
    let limit_str = limit.to_string();
    let params = [
        ("user", username),
        ("period", period.as_api_str()),
        ("limit", limit_str.as_str()),
    ];

    let items = match kind {
        ItemKind::Albums => {
            let resp: TopAlbumsResponse = request(client, "user.gettopalbums", &params).await?;
            resp.topalbums
                .album
                .into_iter()
                .map(|a| Item {
                    name: a.name,
                    primary_artist: a.artist.name,
                    playcount: parse_count(&a.playcount),
                    rank: a.attr.and_then(|attr| attr.rank.parse().ok()),
                    images: translate_images(a.image),
                    album_images: Vec::new(),
                })
                .collect()
        }
        ItemKind::Artists => {
            let resp: TopArtistsResponse = request(client, "user.gettopartists", &params).await?;
            resp.topartists
                .artist
                .into_iter()
                .map(|a| Item {
                    primary_artist: a.name.clone(),
                    name: a.name,
                    playcount: parse_count(&a.playcount),
                    rank: a.attr.and_then(|attr| attr.rank.parse().ok()),
                    images: translate_images(a.image),
                    album_images: Vec::new(),
                })
                .collect()
        }
        ItemKind::Tracks => {
            let resp: TopTracksResponse = request(client, "user.gettoptracks", &params).await?;
            resp.toptracks
                .track
                .into_iter()
                .map(|t| Item {
                    name: t.name,
                    primary_artist: t.artist.name,
                    playcount: parse_count(&t.playcount),
                    rank: t.attr.and_then(|attr| attr.rank.parse().ok()),
                    images: translate_images(t.image),
                    album_images: t
                        .album
                        .map(|a| translate_images(a.image))
                        .unwrap_or_default(),
                })
                .collect()
        }
    };

    Ok(items)
}

/// Fetches account-level profile data (play counts, registration date,
/// avatar) for the profile card.
pub async fn user_info(client: &Client, username: &str) -> Result<WireUser, ApiError> {
    let resp: UserInfoResponse = request(client, "user.getinfo", &[("user", username)]).await?;
    Ok(resp.user)
}

/// Fetches a user's most recent scrobbles, newest first.
pub async fn recent_tracks(
    client: &Client,
    username: &str,
    limit: u32,
) -> Result<Vec<WireRecentTrack>, ApiError> {
    let limit_str = limit.to_string();
    let resp: RecentTracksResponse = request(
        client,
        "user.getrecenttracks",
        &[("user", username), ("limit", limit_str.as_str())],
    )
    .await?;
    Ok(resp.recenttracks.track)
}

/// Compares the musical taste of two users.
///
/// Returns the compatibility score in `[0, 1]` together with the shared
/// artists the service reports.
pub async fn compare(
    client: &Client,
    first: &str,
    second: &str,
) -> Result<(f64, Vec<String>), ApiError> {
    let resp: CompareResponse = request(
        client,
        "tasteometer.compare",
        &[
            ("type1", "user"),
            ("value1", first),
            ("type2", "user"),
            ("value2", second),
        ],
    )
    .await?;

    let score = resp.comparison.result.score.parse().unwrap_or(0.0);
    let shared = resp
        .comparison
        .result
        .artists
        .map(|a| a.artist.into_iter().map(|a| a.name).collect())
        .unwrap_or_default();

    Ok((score, shared))
}

fn parse_count(s: &str) -> u64 {
    s.parse().unwrap_or(0)
}

fn translate_images(images: Vec<WireImage>) -> Vec<ImageRef> {
    images
        .into_iter()
        .map(|img| ImageRef {
            size: SizeTag::from_api_str(&img.size),
            url: img.url,
        })
        .collect()
}
