//! Normalization for loosely-formatted source data.
//!
//! Room names and measurement units arrive from the store with inconsistent
//! casing and padding. That is a documented data-quality tolerance, not a
//! bug: comparisons apply the same normalization at every site instead of
//! rejecting mismatches. Names are trimmed and case-folded; units are only
//! trimmed, since their casing is meaningful (`°C` vs `°c`).

/// Comparison key for room names: trimmed, case-folded.
#[must_use]
pub fn name_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Canonical form of a unit string: whitespace stripped.
#[must_use]
pub fn unit(raw: &str) -> &str {
    raw.trim()
}
