use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Utc;
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::types::{ItemKind, Period, Template};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Rewrites a plain-http URL to https. Idempotent; URLs that are already
/// secure (or use some other scheme) pass through unchanged.
pub fn secure_url(url: &str) -> String {
    match url.strip_prefix("http://") {
        Some(rest) => format!("https://{}", rest),
        None => url.to_string(),
    }
}

pub fn parse_period(s: &str) -> Result<Period, String> {
    match s.to_lowercase().as_str() {
        "7day" | "7days" | "week" => Ok(Period::SevenDay),
        "1month" | "month" => Ok(Period::OneMonth),
        "3month" => Ok(Period::ThreeMonth),
        "6month" => Ok(Period::SixMonth),
        "12month" | "year" => Ok(Period::TwelveMonth),
        "overall" | "all" => Ok(Period::Overall),
        other => Err(format!(
            "unknown period '{}' (expected 7day, 1month, 3month, 6month, 12month or overall)",
            other
        )),
    }
}

pub fn parse_kind(s: &str) -> Result<ItemKind, String> {
    match s.to_lowercase().as_str() {
        "albums" | "album" => Ok(ItemKind::Albums),
        "artists" | "artist" => Ok(ItemKind::Artists),
        "tracks" | "track" => Ok(ItemKind::Tracks),
        other => Err(format!(
            "unknown chart kind '{}' (expected albums, artists or tracks)",
            other
        )),
    }
}

pub fn parse_template(s: &str) -> Result<Template, String> {
    match s.to_lowercase().as_str() {
        "classic" => Ok(Template::Classic),
        "polaroid" => Ok(Template::Polaroid),
        "minimal" => Ok(Template::Minimal),
        "mosaic" => Ok(Template::Mosaic),
        "vinyl" => Ok(Template::Vinyl),
        other => Err(format!(
            "unknown template '{}' (expected classic, polaroid, minimal, mosaic or vinyl)",
            other
        )),
    }
}

/// Inserts thousands separators into a play count for display.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Default output filename for a rendered collage, stamped with the current
/// UTC time so repeated runs never overwrite each other.
pub fn collage_filename(template: Template) -> String {
    format!(
        "collagefm-{}-{}.png",
        template,
        Utc::now().format("%Y%m%d%H%M%S")
    )
}
