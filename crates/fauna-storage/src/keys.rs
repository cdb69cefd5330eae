//! Shared key generation for storage backends.
//!
//! Key format: `uploads/{owner_id}/{unix_millis}-{blob_id}-{filename}`.
//!
//! `blob_id` is a fresh UUID per put, so two puts never share a key even within one
//! millisecond and with the same filename.

use std::sync::LazyLock;

use regex::Regex;
use uuid::Uuid;

const KEY_PREFIX: &str = "uploads";
const FALLBACK_SEGMENT: &str = "image";

static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9._-]+").expect("segment regex is valid"));
static DOT_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.{2,}").expect("dot regex is valid"));

/// Make one path segment safe for every backend.
///
/// Anything outside `[A-Za-z0-9._-]` collapses to `_`, runs of dots collapse to one, and
/// leading dots are dropped, so a segment never contains `..`.
pub fn sanitize_segment(raw: &str) -> String {
    let replaced = UNSAFE_CHARS.replace_all(raw.trim(), "_");
    let collapsed = DOT_RUNS.replace_all(&replaced, ".");
    let trimmed = collapsed.trim_start_matches('.');
    if trimmed.is_empty() {
        FALLBACK_SEGMENT.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Generate a storage key for the given owner and filename at `unix_millis`.
pub fn generate_storage_key_at(
    owner_id: &str,
    filename: &str,
    unix_millis: i64,
    blob_id: Uuid,
) -> String {
    format!(
        "{}/{}/{}-{}-{}",
        KEY_PREFIX,
        sanitize_segment(owner_id),
        unix_millis,
        blob_id.simple(),
        sanitize_segment(filename)
    )
}

/// Generate a fresh storage key for the given owner and filename.
///
/// All backends must use this format for consistency.
pub fn generate_storage_key(owner_id: &str, filename: &str) -> String {
    generate_storage_key_at(
        owner_id,
        filename,
        chrono::Utc::now().timestamp_millis(),
        Uuid::new_v4(),
    )
}
