//! Step order prefixes
//!
//! Maintenance steps carry their position as a leading `<digits>_`
//! prefix, e.g. `2_Replace filter`.

/// Order of text without a prefix; sorts after any realistic step
pub const NO_ORDER: u64 = 999;

/// Parse the leading `<digits>_` prefix of a step
///
/// Total: text without the prefix yields [`NO_ORDER`], and a prefix too
/// large for `u64` saturates.
#[must_use]
pub fn order_prefix(text: &str) -> u64 {
    let digits = text.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 || text.as_bytes().get(digits) != Some(&b'_') {
        return NO_ORDER;
    }
    text[..digits].parse().unwrap_or(u64::MAX)
}

/// Order of an optional step text
#[inline]
#[must_use]
pub(crate) fn order_of(action: Option<&str>) -> u64 {
    order_prefix(action.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_leading_prefix() {
        assert_eq!(order_prefix("1_Check pressure"), 1);
        assert_eq!(order_prefix("12_Replace filter"), 12);
        assert_eq!(order_prefix("007_Zeros"), 7);
    }

    #[test]
    fn missing_prefix_sorts_last() {
        assert_eq!(order_prefix("Replace filter"), NO_ORDER);
        assert_eq!(order_prefix("3 Replace"), NO_ORDER);
        assert_eq!(order_prefix("_1 Replace"), NO_ORDER);
        assert_eq!(order_prefix(" 1_Replace"), NO_ORDER);
        assert_eq!(order_prefix("12"), NO_ORDER);
        assert_eq!(order_prefix(""), NO_ORDER);
        assert_eq!(order_of(None), NO_ORDER);
    }

    #[test]
    fn huge_prefix_saturates() {
        assert_eq!(order_prefix("99999999999999999999999_x"), u64::MAX);
    }
}
