//! # Cover-Art Enrichment
//!
//! Last.fm charts frequently arrive with missing artwork or with the grey
//! placeholder star, artist charts especially. This module fills those
//! gaps before layout: a secondary Last.fm lookup first, then a Spotify
//! catalog search as fallback.
//!
//! Enrichment is best-effort end to end. Every lookup failure is
//! swallowed; an item that cannot be enriched simply keeps the images it
//! had. Lookups for all items run concurrently, and results are applied
//! back by position so the chart order is never disturbed.

use futures::future::join_all;
use reqwest::Client;

use crate::{
    lastfm,
    management::AppTokenManager,
    spotify,
    types::{ImageRef, Item, ItemKind, SizeTag},
    utils, warning,
};

/// MD5 fragment of Last.fm's placeholder star image.
pub const PLACEHOLDER_FRAGMENT: &str = "2a96cbd8b46e442fc41c2b86b821562f";

/// Applies a per-item lookup across all items concurrently, replacing
/// display-size image URLs where the lookup produced one.
///
/// The lookup receives a clone of the item and returns the replacement URL
/// or `None`. Results are joined in order, so whatever the lookup does
/// internally, item `i` of the output corresponds to item `i` of the
/// input.
pub async fn enrich_with<F, Fut>(items: &mut [Item], lookup: F)
where
    F: Fn(Item) -> Fut,
    Fut: Future<Output = Option<String>>,
{
    let lookups: Vec<_> = items.iter().map(|item| lookup(item.clone())).collect();
    let replacements = join_all(lookups).await;

    for (item, replacement) in items.iter_mut().zip(replacements) {
        if let Some(url) = replacement {
            apply_replacement(item, &url);
        }
    }
}

/// Enriches a fetched chart with the lookup chain for its kind.
///
/// Albums only ever need the Last.fm `album.getInfo` lookup. Artists and
/// tracks fall back to a Spotify catalog search when Last.fm has nothing,
/// which needs a client-credentials token; when no token can be obtained
/// the Spotify leg is skipped with a warning and the Last.fm leg still
/// runs.
pub async fn enrich(client: &Client, items: &mut [Item], kind: ItemKind) {
    let app_token = match kind {
        ItemKind::Albums => None,
        _ => match AppTokenManager::load_or_request().await {
            Ok(mut manager) => manager.get_valid_token().await.ok(),
            Err(e) => {
                warning!("Spotify cover-art fallback unavailable: {}", e);
                None
            }
        },
    };

    enrich_with(items, |item| {
        let token = app_token.clone();
        async move {
            if !needs_art(&item) {
                return None;
            }

            match kind {
                ItemKind::Albums => lastfm::images::album_art(client, &item.primary_artist, &item.name)
                    .await
                    .ok()
                    .flatten(),
                ItemKind::Artists => {
                    if let Ok(Some(url)) =
                        lastfm::images::artist_top_album_art(client, &item.name).await
                    {
                        return Some(url);
                    }
                    let token = token?;
                    spotify::search::artist_image(client, &token, &item.name)
                        .await
                        .ok()
                        .flatten()
                }
                ItemKind::Tracks => {
                    if let Ok(Some(url)) =
                        lastfm::images::track_album_art(client, &item.primary_artist, &item.name)
                            .await
                    {
                        return Some(url);
                    }
                    let token = token?;
                    spotify::search::track_image(client, &token, &item.primary_artist, &item.name)
                        .await
                        .ok()
                        .flatten()
                }
            }
        }
    })
    .await;
}

/// An item needs enrichment when it has no display-size artwork or only
/// the placeholder star.
pub fn needs_art(item: &Item) -> bool {
    let usable = |img: &ImageRef| {
        matches!(img.size, SizeTag::Large | SizeTag::ExtraLarge | SizeTag::Mega)
            && !img.url.is_empty()
            && !img.url.contains(PLACEHOLDER_FRAGMENT)
    };

    !item.images.iter().any(usable) && !item.album_images.iter().any(usable)
}

/// Replaces the URLs of the display-size entries with the found artwork,
/// normalized to a secure scheme. Items whose image list carries no
/// display-size slot get one appended so the artwork is not lost.
fn apply_replacement(item: &mut Item, url: &str) {
    let secure = utils::secure_url(url);

    let mut replaced = false;
    for img in item.images.iter_mut() {
        if matches!(img.size, SizeTag::Large | SizeTag::ExtraLarge) {
            img.url = secure.clone();
            replaced = true;
        }
    }

    if !replaced {
        item.images.push(ImageRef {
            size: SizeTag::ExtraLarge,
            url: secure,
        });
    }
}
