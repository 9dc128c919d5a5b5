//! # CLI Module
//!
//! One submodule per subcommand. Argument parsing stays in `main.rs`;
//! these functions receive already-typed options, drive the relevant
//! services, and own all terminal output (spinners, tables, and the
//! status macros).

mod auth;
mod collage;
mod compare;
mod history;
mod playlist;
mod profile;
mod recent;

pub use auth::auth;
pub use collage::{CollageRequest, collage};
pub use compare::compare;
pub use history::history;
pub use playlist::playlist;
pub use profile::profile;
pub use recent::recent;
