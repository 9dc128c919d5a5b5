//! # Management Module
//!
//! Local persistence for everything collagefm keeps between runs: Spotify
//! tokens and the search history. All state lives as pretty-printed JSON
//! under the platform data directory:
//!
//! ```text
//! <data_local_dir>/collagefm/
//! ├── cache/
//! │   ├── token.json       (user PKCE token)
//! │   └── app-token.json   (client-credentials token)
//! └── state/
//!     └── search-history.json
//! ```
//!
//! Each manager owns one file. Loading a missing file is an error for the
//! token managers (the caller decides whether to re-authenticate or to
//! request a fresh app token) and a clean empty state for the history.

pub mod auth;
pub mod history;

pub use auth::{AppTokenManager, TokenManager};
pub use history::SearchHistory;
