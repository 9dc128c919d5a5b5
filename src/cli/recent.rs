use chrono::DateTime;
use reqwest::Client;
use tabled::Table;

use crate::{error, lastfm::user, types::RecentTrackRow};

/// Prints the latest scrobbles as a table, newest first. A track still
/// playing shows up without a timestamp.
pub async fn recent(username: String, limit: u32) {
    let client = Client::new();

    let tracks = match user::recent_tracks(&client, &username, limit).await {
        Ok(tracks) => tracks,
        Err(e) => error!("Failed to load recent tracks for {}: {}", username, e),
    };

    let rows: Vec<RecentTrackRow> = tracks
        .into_iter()
        .map(|track| {
            let now_playing = track
                .attr
                .as_ref()
                .is_some_and(|attr| attr.nowplaying == "true");

            let played = if now_playing {
                "now playing".to_string()
            } else {
                track
                    .date
                    .as_ref()
                    .and_then(|d| d.uts.parse::<i64>().ok())
                    .and_then(|ts| DateTime::from_timestamp(ts, 0))
                    .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_default()
            };

            RecentTrackRow {
                played,
                name: track.name,
                artist: track.artist.text,
            }
        })
        .collect();

    println!("{}", Table::new(rows));
}
