//! Shared constants.

/// Default number of feed entries returned when the caller does not ask for a limit.
pub const DEFAULT_FEED_LIMIT: u32 = 20;

/// Upper bound for a single feed page.
pub const MAX_FEED_LIMIT: u32 = 100;

/// Default maximum upload size (1 MiB).
pub const DEFAULT_MAX_FILE_SIZE_BYTES: usize = 1024 * 1024;

/// Content types accepted for analysis.
pub const DEFAULT_ALLOWED_CONTENT_TYPES: &[&str] = &["image/png", "image/jpeg", "image/jpg"];

/// Upper end of the species prefix range: `[term, term + MAX_SUFFIX)`.
pub const PREFIX_RANGE_SUFFIX: char = '\u{f8ff}';

/// Message surfaced when an analysis is a rejection sentinel.
pub const NOT_AN_ANIMAL: &str = "not an animal";
