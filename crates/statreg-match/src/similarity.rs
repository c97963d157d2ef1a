//! String similarity scoring for header-to-field matching.
//!
//! The score is a pure function of the two strings with no knowledge of
//! the target schema: exact match after normalization wins outright,
//! substring containment scores a fixed 0.8, and everything else falls
//! back to the Jaccard index over character bigrams.

use std::collections::BTreeSet;

/// Scores how well two strings match, in `[0, 1]`.
///
/// Both inputs are normalized to lowercase alphanumeric characters
/// first, so `"First Name"` and `"firstname"` are identical. Symmetric
/// in its arguments.
pub fn similarity(a: &str, b: &str) -> f64 {
    let left = normalize(a);
    let right = normalize(b);

    if left == right {
        return 1.0;
    }
    if !left.is_empty() && !right.is_empty() && (left.contains(&right) || right.contains(&left)) {
        return 0.8;
    }

    let left_pairs = bigrams(&left);
    let right_pairs = bigrams(&right);
    let union = left_pairs.union(&right_pairs).count();
    if union == 0 {
        // Neither side yields a bigram; no discriminative value.
        return 0.0;
    }
    let intersection = left_pairs.intersection(&right_pairs).count();
    intersection as f64 / union as f64
}

/// Lowercases and strips everything that is not an ASCII letter or digit.
fn normalize(value: &str) -> String {
    value
        .to_lowercase()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// The set of overlapping two-character windows of a normalized string.
///
/// Strings shorter than two characters produce an empty set.
fn bigrams(value: &str) -> BTreeSet<[u8; 2]> {
    let bytes = value.as_bytes();
    (0..bytes.len().saturating_sub(1))
        .map(|i| [bytes[i], bytes[i + 1]])
        .collect()
}
