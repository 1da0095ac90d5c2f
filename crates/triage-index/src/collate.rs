//! Display ordering for symptom ids

use std::cmp::Ordering;

/// Compare two labels for display
///
/// A case-folded total order, not a locale collation: case-folded
/// comparison first, raw comparison as the tie-break, so `s-1` and `S-1`
/// sit together (uppercase first) and the order is still total. Accented
/// letters compare by code point.
#[must_use]
pub fn collate(left: &str, right: &str) -> Ordering {
    let l = left.chars().flat_map(char::to_lowercase);
    let r = right.chars().flat_map(char::to_lowercase);
    l.cmp(r).then_with(|| left.cmp(right))
}
