//! Last.fm Collage Generator Library
//!
//! This library turns a Last.fm user's listening statistics into a visual
//! grid ("collage") of album, artist, or track art rendered to a PNG file.
//! Cover art is optionally upgraded through the Spotify Web API, and the
//! user's top tracks can be exported to a Spotify playlist.
//!
//! # Modules
//!
//! - `api` - HTTP API endpoints for the local OAuth callback server
//! - `cli` - Command-line interface implementations
//! - `collage` - Grid layout, templates, text truncation, and rasterization
//! - `config` - Configuration management and environment variables
//! - `enrich` - Best-effort cover-art enrichment pipeline
//! - `error` - Error taxonomy shared across the pipeline
//! - `lastfm` - Last.fm API client
//! - `management` - Token and search-history persistence
//! - `pipeline` - Session validation and fetch/enrich/layout staging
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client (auth, search, playlists)
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use collagefm::{config, pipeline};
//!
//! #[tokio::main]
//! async fn main() -> collagefm::Res<()> {
//!     config::load_env().await?;
//!     // Build a Session and run the pipeline...
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod collage;
pub mod config;
pub mod enrich;
pub mod error;
pub mod lastfm;
pub mod management;
pub mod pipeline;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern for CLI-level glue using a
/// boxed dynamic error trait object with Send + Sync bounds for async
/// contexts. Pipeline internals use the typed enums in [`error`] instead.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// The macro accepts the same arguments as `println!`.
///
/// # Example
///
/// ```
/// info!("Fetching top albums for {}...", username);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// The macro accepts the same arguments as `println!`.
///
/// # Example
///
/// ```
/// success!("Collage saved to {}", path.display());
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Used for unrecoverable errors at the outermost CLI layer only; library
/// code propagates typed errors instead. The program exits with code 1
/// immediately after printing.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues, e.g. a single cover image that failed to
/// load and will be left blank in the rendered collage.
///
/// # Example
///
/// ```
/// warning!("Could not fetch better quality image for {}", item.name);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
