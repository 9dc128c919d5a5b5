//! # Spotify Integration Module
//!
//! This module talks to the Spotify Web API for the two jobs collagefm
//! needs it for: finding cover art that Last.fm no longer serves, and
//! exporting a top-tracks chart as a playlist.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI, Enrichment)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (OAuth 2.0 PKCE + client credentials)
//!     ├── Catalog Search (artist imagery, track art, track URIs)
//!     └── Playlist Operations (create, add tracks)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Two Token Flavors
//!
//! - **Client credentials** ([`search`]) authorize catalog search without
//!   any user interaction. Cover-art enrichment only needs public catalog
//!   data, so it never asks the user to log in.
//! - **PKCE user tokens** ([`auth`]) are required for playlist export,
//!   which writes to the user's library. The flow runs a temporary local
//!   callback server, opens the authorization page in the browser, and
//!   exchanges the returned code together with the PKCE verifier.
//!
//! Both token kinds are cached on disk and refreshed ahead of expiry by
//! the managers in [`crate::management`].

pub mod auth;
pub mod playlist;
pub mod search;
