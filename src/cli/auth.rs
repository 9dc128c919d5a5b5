use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{spotify, types::PkceToken};

/// Runs the Spotify PKCE flow. Only needed for playlist export; collage
/// generation works without it.
pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) {
    spotify::auth::auth(shared_state).await;
}
