//! Internal helpers for text normalization.
//!
//! These utilities are **not** part of the public API. They centralize the
//! matching rules used for driver names and expense labels so that chat input
//! and form input resolve the same way.

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Lower-cases, strips accents and collapses every non-alphanumeric run into a
/// single space. Returns `None` for blank input.
///
/// `"Combustível"`, `" COMBUSTIVEL "` and `"combustivel"` all map to
/// `"combustivel"`.
pub(crate) fn normalize_key(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut out = String::new();
    let mut prev_space = false;
    for ch in trimmed.nfkd() {
        if is_combining_mark(ch) {
            continue;
        }
        if ch.is_alphanumeric() {
            for lower in ch.to_lowercase() {
                out.push(lower);
            }
            prev_space = false;
        } else if !out.is_empty() && !prev_space {
            out.push(' ');
            prev_space = true;
        }
    }
    let normalized = out.trim();
    if normalized.is_empty() {
        None
    } else {
        Some(normalized.to_string())
    }
}

/// Trims and drops empty strings.
pub(crate) fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}
