use chrono::DateTime;
use colored::Colorize;
use reqwest::Client;
use tabled::Table;

use crate::{
    error,
    lastfm::user,
    types::{ChartTableRow, ItemKind, Period},
    utils,
};

/// Prints a profile card: account statistics followed by the top artists
/// and tracks of the chosen period.
pub async fn profile(username: String, period: Period) {
    let client = Client::new();

    let info = match user::user_info(&client, &username).await {
        Ok(info) => info,
        Err(e) => error!("Failed to load profile for {}: {}", username, e),
    };

    let registered = info
        .registered
        .unixtime
        .parse::<i64>()
        .ok()
        .and_then(|ts| DateTime::from_timestamp(ts, 0))
        .map(|dt| dt.format("%B %Y").to_string())
        .unwrap_or_else(|| "unknown".to_string());

    println!();
    println!("  {}", info.name.bold());
    println!("  scrobbling since {}", registered);
    println!();
    println!(
        "  {} scrobbles",
        utils::group_thousands(info.playcount.parse().unwrap_or(0)).bold()
    );
    if let Some(artists) = count(&info.artist_count) {
        println!("  {} artists", artists);
    }
    if let Some(albums) = count(&info.album_count) {
        println!("  {} albums", albums);
    }
    if let Some(tracks) = count(&info.track_count) {
        println!("  {} tracks", tracks);
    }
    println!();

    let top_artists = user::fetch_top_items(&client, &username, ItemKind::Artists, period, 5)
        .await
        .unwrap_or_default();

    if !top_artists.is_empty() {
        println!("  {}", format!("Top artists ({})", period.label()).bold());
        let rows: Vec<ChartTableRow> = top_artists
            .into_iter()
            .map(|item| ChartTableRow {
                rank: item.rank.map(|r| format!("#{}", r)).unwrap_or_default(),
                name: item.name,
                artist: String::new(),
                plays: utils::group_thousands(item.playcount),
            })
            .collect();
        println!("{}", Table::new(rows));
        println!();
    }

    let top_tracks = user::fetch_top_items(&client, &username, ItemKind::Tracks, period, 5)
        .await
        .unwrap_or_default();

    if !top_tracks.is_empty() {
        println!("  {}", format!("Top tracks ({})", period.label()).bold());
        let rows: Vec<ChartTableRow> = top_tracks
            .into_iter()
            .map(|item| ChartTableRow {
                rank: item.rank.map(|r| format!("#{}", r)).unwrap_or_default(),
                name: item.name,
                artist: item.primary_artist,
                plays: utils::group_thousands(item.playcount),
            })
            .collect();
        println!("{}", Table::new(rows));
    }
}

fn count(field: &Option<String>) -> Option<String> {
    field
        .as_ref()
        .and_then(|s| s.parse::<u64>().ok())
        .map(utils::group_thousands)
}
