//! # Local Callback Server
//!
//! A minimal axum server that exists only for the duration of the auth
//! flow. It binds the configured address, serves the OAuth `/callback`
//! redirect plus a `/health` probe, and is dropped together with the
//! process once authentication completes.

use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::sync::Mutex;

use crate::{api, config, error, types::PkceToken};

pub async fn start_api_server(state: Arc<Mutex<Option<PkceToken>>>) {
    let app = Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(state)));

    let addr = match SocketAddr::from_str(&config::server_addr()) {
        Ok(addr) => addr,
        Err(e) => error!("Failed to parse server address: {}", e),
    };

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => error!("Failed to bind callback server on {}: {}", addr, e),
    };

    if let Err(e) = axum::serve(listener, app).await {
        error!("Callback server failed: {}", e);
    }
}
