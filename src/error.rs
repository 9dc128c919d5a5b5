//! Error taxonomy for the collage pipeline.
//!
//! Failures fall into four classes with different handling at the CLI
//! boundary: validation errors are rejected before any network call, remote
//! API errors abort the current stage without retry, transport errors are
//! retried with bounded linear backoff at the fetcher only, and render
//! errors surface without offering a partial output file. Enrichment
//! failures never appear here; they are swallowed at their source.

use thiserror::Error;

/// Errors raised while fetching or validating listening data.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad input rejected before any network call (empty username,
    /// out-of-range grid size).
    #[error("{0}")]
    Validation(String),

    /// The upstream service returned an explicit error envelope.
    /// Not retried; the upstream message is surfaced verbatim.
    #[error("last.fm error {code}: {message}")]
    Remote { code: i64, message: String },

    /// Network or HTTP-status failure after all retry attempts.
    #[error("request failed after {attempts} attempts: {source}")]
    Transport {
        attempts: u32,
        #[source]
        source: reqwest::Error,
    },

    /// A response arrived but did not have the expected shape.
    #[error("unexpected response shape: {0}")]
    Decode(String),
}

/// Errors raised while rasterizing a collage to a bitmap.
#[derive(Debug, Error)]
pub enum RenderError {
    /// No usable TTF font could be located.
    #[error("no collage font could be loaded (set COLLAGE_FONT): {0}")]
    Font(String),

    /// Every cell image failed to load; there is nothing to draw.
    #[error("none of the {0} cell images could be loaded")]
    NoImages(usize),

    /// PNG encoding or file I/O failed. No partial file is left behind.
    #[error("failed to write collage image: {0}")]
    Save(#[from] image::ImageError),
}
