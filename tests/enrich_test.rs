use std::env;

use reqwest::Client;

use collagefm::config;
use collagefm::enrich::enrich;
use collagefm::types::{Item, ItemKind};

// Environment mutation is process-global, so this scenario lives in its
// own test binary.
#[tokio::test]
async fn test_enrich_degrades_without_spotify_credentials() {
    unsafe {
        env::remove_var("SPOTIFY_CLIENT_ID");
        env::remove_var("SPOTIFY_CLIENT_SECRET");
        env::set_var("LASTFM_API_KEY", "not-a-real-key");
        // Nothing listens on these; every lookup fails as a transport
        // error, which enrichment swallows.
        env::set_var("LASTFM_API_URL", "http://127.0.0.1:1/");
        env::set_var("SPOTIFY_TOKEN_URL", "http://127.0.0.1:1/");
        env::set_var("SPOTIFY_API_URL", "http://127.0.0.1:1/");
    }

    assert!(config::spotify_client_credentials().is_err());

    let mut items = vec![Item {
        name: "Massive Attack".to_string(),
        primary_artist: "Massive Attack".to_string(),
        playcount: 1,
        rank: Some(1),
        images: Vec::new(),
        album_images: Vec::new(),
    }];

    // Must complete and leave the item untouched, never abort the run.
    enrich(&Client::new(), &mut items, ItemKind::Artists).await;

    assert!(items[0].images.is_empty());
}
