//! Best-effort URL normalization for facility websites.
//!
//! Source website values range from full URLs to bare host names. A direct
//! parse is attempted first; values that fail get one retry with an `http://`
//! prefix. Values that still fail are dropped with a warning, never failing
//! the record.

use crate::constants::URL_FALLBACK_SCHEME;
use tracing::warn;
use url::Url;

/// Normalize a raw website value into a URL, or `None` if it cannot be
/// salvaged.
pub fn normalize(raw: &str) -> Option<Url> {
    match Url::parse(raw) {
        Ok(url) => Some(url),
        Err(_) => match Url::parse(&format!("{}{}", URL_FALLBACK_SCHEME, raw)) {
            Ok(url) => Some(url),
            Err(_) => {
                warn!("failed to decode string as URL: '{}', skipping value", raw);
                None
            }
        },
    }
}
