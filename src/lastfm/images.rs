use reqwest::Client;

use crate::{
    error::ApiError,
    lastfm::request,
    types::{AlbumInfoResponse, SizeTag, TopAlbumsResponse, TrackInfoResponse, WireImage},
};

/// Looks up a replacement cover URL through `album.getInfo`.
pub async fn album_art(
    client: &Client,
    artist: &str,
    album: &str,
) -> Result<Option<String>, ApiError> {
    let resp: AlbumInfoResponse = request(
        client,
        "album.getinfo",
        &[("artist", artist), ("album", album)],
    )
    .await?;
    Ok(pick_largest(&resp.album.image))
}

/// Looks up artist imagery through the artist's single most-played album.
/// Last.fm stopped serving real artist photos, so the top album's cover is
/// the best stand-in the service itself offers.
pub async fn artist_top_album_art(
    client: &Client,
    artist: &str,
) -> Result<Option<String>, ApiError> {
    let resp: TopAlbumsResponse = request(
        client,
        "artist.gettopalbums",
        &[("artist", artist), ("limit", "1")],
    )
    .await?;
    Ok(resp
        .topalbums
        .album
        .first()
        .and_then(|album| pick_largest(&album.image)))
}

/// Looks up a track's parent-album cover through `track.getInfo`.
pub async fn track_album_art(
    client: &Client,
    artist: &str,
    track: &str,
) -> Result<Option<String>, ApiError> {
    let resp: TrackInfoResponse = request(
        client,
        "track.getinfo",
        &[("artist", artist), ("track", track)],
    )
    .await?;
    Ok(resp
        .track
        .album
        .as_ref()
        .and_then(|album| pick_largest(&album.image)))
}

/// Picks the largest non-empty URL, preferring `mega` over `extralarge`.
/// Smaller sizes are not worth replacing an existing URL with.
fn pick_largest(images: &[WireImage]) -> Option<String> {
    for wanted in [SizeTag::Mega, SizeTag::ExtraLarge] {
        if let Some(img) = images
            .iter()
            .find(|img| SizeTag::from_api_str(&img.size) == wanted && !img.url.is_empty())
        {
            return Some(img.url.clone());
        }
    }
    None
}
