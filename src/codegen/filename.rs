//! Safe, timestamped filenames for persisted artifacts
//!
//! Names look like `<slug>_<unix-seconds>.<ext>`. Two calls with the same
//! description in the same second produce the same name; that collision is
//! accepted and the later write replaces the earlier file.

use regex::Regex;
use std::sync::LazyLock;
use std::time::{SystemTime, UNIX_EPOCH};

/// Maximum slug length taken from the description
pub const SLUG_MAX_LEN: usize = 30;

static NON_ALNUM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9]").unwrap());

/// Current time as whole seconds since the epoch
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Filename for a code artifact generated from `description`
pub fn synthesize(description: &str, extension: &str, now: u64) -> String {
    let slug = slugify(description);
    let slug = if slug.is_empty() { "untitled" } else { slug.as_str() };
    timestamped_name(slug, extension, now)
}

/// `<label>_<now>.<extension>`
pub fn timestamped_name(label: &str, extension: &str, now: u64) -> String {
    format!("{}_{}.{}", label, now, extension)
}

/// Lower-case, map each non-alphanumeric to `_`, cap at `SLUG_MAX_LEN`
pub fn slugify(description: &str) -> String {
    let lowered = description.trim().to_lowercase();
    let replaced = NON_ALNUM_RE.replace_all(&lowered, "_");
    // Only ASCII survives the replacement, so byte slicing is char-safe
    let capped = &replaced[..replaced.len().min(SLUG_MAX_LEN)];
    capped.trim_matches('_').to_string()
}
