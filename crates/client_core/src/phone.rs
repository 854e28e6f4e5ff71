//! Progressive North American phone mask applied while the user types.

/// Longest string [`format_phone`] produces: `(XXX) YYY-ZZZZ`.
pub const PHONE_MAX_LEN: usize = 14;

const PHONE_MAX_DIGITS: usize = 10;

/// Strips everything but ASCII digits and re-renders what is left.
///
/// Up to three digits come back bare, four to six render as `(XXX) Y..`, and
/// seven or more as `(XXX) YYY-ZZZZ`. Digits past the tenth are dropped, so
/// feeding the output back in is a no-op.
pub fn format_phone(raw: &str) -> String {
    let digits: String = raw
        .chars()
        .filter(char::is_ascii_digit)
        .take(PHONE_MAX_DIGITS)
        .collect();

    match digits.len() {
        0..=3 => digits,
        4..=6 => format!("({}) {}", &digits[..3], &digits[3..]),
        _ => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]),
    }
}
