//! # Collage Engine
//!
//! Everything between a fetched-and-enriched chart and a PNG on disk:
//!
//! - [`layout`] places items into grid cells, applying the per-kind image
//!   selection rules and dropping items without usable artwork
//! - [`template`] is the registry of visual styles (gaps, backgrounds,
//!   framing) keyed by [`crate::types::Template`]
//! - [`text`] measures and truncates overlay text
//! - [`render`] downloads cell images and rasterizes the final canvas
//!
//! Layout and text are pure and synchronous; only rendering touches the
//! network and the filesystem.

pub mod layout;
pub mod render;
pub mod template;
pub mod text;
