//! # Generation Pipeline
//!
//! Ties the stages together: validate the request, fetch the chart,
//! enrich the artwork, lay out the grid. The rasterizer is deliberately
//! not part of the pipeline; callers decide whether an empty layout is
//! worth rendering at all.

use std::sync::atomic::{AtomicU64, Ordering};

use reqwest::Client;

use crate::{
    collage, enrich,
    error::ApiError,
    lastfm,
    types::{CollageResult, GridSpec, ItemKind, Period, Template},
};

/// One validated collage request. Immutable once built; a changed
/// parameter means a new session, never a mutated one, so a generation in
/// flight can never observe half-updated inputs.
#[derive(Debug, Clone)]
pub struct Session {
    username: String,
    kind: ItemKind,
    period: Period,
    grid: GridSpec,
    template: Template,
    enrich_art: bool,
}

impl Session {
    /// Validates and freezes the request parameters.
    ///
    /// The username is trimmed first; a blank one is rejected before any
    /// network traffic happens. Grid validation is delegated to
    /// [`GridSpec`].
    pub fn new(
        username: &str,
        kind: ItemKind,
        period: Period,
        grid_width: u32,
        grid_height: u32,
        template: Template,
    ) -> Result<Self, ApiError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ApiError::Validation(
                "username must not be empty".to_string(),
            ));
        }

        Ok(Session {
            username: username.to_string(),
            kind,
            period,
            grid: GridSpec::new(grid_width, grid_height)?,
            template,
            enrich_art: true,
        })
    }

    /// Returns the session with artwork enrichment turned off; only the
    /// art Last.fm itself delivers is used.
    pub fn without_enrichment(mut self) -> Self {
        self.enrich_art = false;
        self
    }

    pub fn enrich_art(&self) -> bool {
        self.enrich_art
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn grid(&self) -> GridSpec {
        self.grid
    }

    pub fn template(&self) -> Template {
        self.template
    }
}

/// Runs fetch, enrichment, and layout for one session.
///
/// Fetch failures abort the generation; enrichment failures never do.
pub async fn generate(client: &Client, session: &Session) -> Result<CollageResult, ApiError> {
    let mut items = lastfm::user::fetch_top_items(
        client,
        session.username(),
        session.kind(),
        session.period(),
        session.grid().limit(),
    )
    .await?;

    if session.enrich_art() {
        enrich::enrich(client, &mut items, session.kind()).await;
    }

    Ok(collage::layout::layout(
        items,
        session.grid(),
        session.template(),
        session.kind(),
    ))
}

/// Monotonic generation token source.
///
/// Each generation draws a fresh token before starting; a result is only
/// worth presenting while its token is still the latest one drawn.
/// Superseded generations notice through [`is_current`] and drop their
/// output instead of overwriting a newer result.
///
/// [`is_current`]: GenerationCounter::is_current
#[derive(Debug, Default)]
pub struct GenerationCounter {
    current: AtomicU64,
}

impl GenerationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws the next generation token, superseding all earlier ones.
    pub fn next(&self) -> u64 {
        self.current.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether the given token is still the latest one drawn.
    pub fn is_current(&self, generation: u64) -> bool {
        self.current.load(Ordering::SeqCst) == generation
    }
}
