//! Approximate string equality with a fixed similarity threshold

use strsim::normalized_levenshtein;

/// Ratio at or above which two strings are considered the same text.
pub const DEFAULT_MATCH_RATIO: u8 = 90;

/// Normalized edit-similarity ratio between two strings, 0-100.
pub fn ratio(a: &str, b: &str) -> u8 {
    (normalized_levenshtein(a, b) * 100.0).round() as u8
}

/// Symmetric approximate equality.
///
/// Returns false if either input is absent. Both strings are lower-cased and
/// the ratio is checked in both directions; a metric may weigh reference vs.
/// candidate differently when lengths differ sharply (truncated titles), so
/// either direction clearing the threshold counts as a match.
pub fn fuzzy_eq(a: Option<&str>, b: Option<&str>, threshold: u8) -> bool {
    let (Some(a), Some(b)) = (a, b) else {
        return false;
    };
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    ratio(&a, &b) >= threshold || ratio(&b, &a) >= threshold
}

/// `fuzzy_eq` at the default threshold.
pub fn strings_fuzzy_match(a: Option<&str>, b: Option<&str>) -> bool {
    fuzzy_eq(a, b, DEFAULT_MATCH_RATIO)
}
