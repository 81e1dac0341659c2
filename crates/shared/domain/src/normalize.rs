//! Turns free-form text into a canonical code fragment.
//!
//! The transform lowercases its input, maps every character outside
//! `[a-z0-9]` (whitespace, `_`, `.`, punctuation, non-ASCII letters) to `-`,
//! collapses dash runs and trims dashes from both ends. An empty outcome is
//! reported as `None`, meaning "no code supplied".

/// Normalizes a single code fragment.
///
/// Total and idempotent: `normalize(&normalize(s)?) == normalize(s)`.
///
/// ```rust
/// use errata_domain::normalize;
///
/// assert_eq!(normalize("  File_Not Found!! ").as_deref(), Some("file-not-found"));
/// assert_eq!(normalize("db.query").as_deref(), Some("db-query"));
/// assert_eq!(normalize("__ . __"), None);
/// ```
#[must_use]
pub fn normalize(raw: &str) -> Option<String> {
    let mut out = String::with_capacity(raw.len());

    for ch in raw.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            out.push(ch);
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }

    while out.ends_with('-') {
        out.pop();
    }

    (!out.is_empty()).then_some(out)
}

/// Normalizes each `.`-separated segment of `raw`, dropping segments that
/// normalize to nothing.
///
/// Used by resolution, where the dots of a user-supplied code still carry
/// structure even though [`normalize`] itself treats `.` as a separator.
///
/// ```rust
/// use errata_domain::normalize_segments;
///
/// assert_eq!(normalize_segments("Billing . Invoice_Total"), ["billing", "invoice-total"]);
/// assert!(normalize_segments(" . ").is_empty());
/// ```
#[must_use]
pub fn normalize_segments(raw: &str) -> Vec<String> {
    raw.split('.').filter_map(normalize).collect()
}
