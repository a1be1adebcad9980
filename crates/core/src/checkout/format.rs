//! Pure string formatters for payment card input.
//!
//! Each formatter is deterministic and side-effect free, and is applied to
//! the raw posted value before it is stored on the checkout state. They
//! are all idempotent: re-formatting already-formatted input returns the
//! same string.

/// Maximum formatted card number length: 16 digits in groups of 4 plus
/// the 3 separating spaces.
pub const CARD_NUMBER_MAX_LEN: usize = 19;

/// Maximum expiry length: "MM/YY".
pub const EXPIRY_MAX_LEN: usize = 5;

/// Maximum CVV length (American Express uses 4 digits).
pub const CVV_MAX_LEN: usize = 4;

/// Format a card number: digits only, grouped in 4s, truncated to 19
/// characters.
///
/// ```
/// use sundrift_core::format_card_number;
///
/// assert_eq!(format_card_number("4111111111111111"), "4111 1111 1111 1111");
/// assert_eq!(format_card_number("4111 1111 1111 1111"), "4111 1111 1111 1111");
/// ```
#[must_use]
pub fn format_card_number(input: &str) -> String {
    let mut out = String::with_capacity(CARD_NUMBER_MAX_LEN);
    for c in input.chars().filter(char::is_ascii_digit) {
        if !out.is_empty() && out.chars().filter(char::is_ascii_digit).count() % 4 == 0 {
            out.push(' ');
        }
        out.push(c);
        if out.len() >= CARD_NUMBER_MAX_LEN {
            break;
        }
    }
    out
}

/// Format an expiry date: digits only, `/` inserted after the month,
/// truncated to 5 characters.
///
/// ```
/// use sundrift_core::format_expiry;
///
/// assert_eq!(format_expiry("1229"), "12/29");
/// assert_eq!(format_expiry("12/29"), "12/29");
/// ```
#[must_use]
pub fn format_expiry(input: &str) -> String {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();
    let mut out = String::with_capacity(EXPIRY_MAX_LEN);
    for (i, c) in digits.chars().enumerate() {
        if i == 2 {
            out.push('/');
        }
        out.push(c);
        if out.len() >= EXPIRY_MAX_LEN {
            break;
        }
    }
    out
}

/// Format a CVV: digits only, truncated to 4 characters.
#[must_use]
pub fn format_cvv(input: &str) -> String {
    input
        .chars()
        .filter(char::is_ascii_digit)
        .take(CVV_MAX_LEN)
        .collect()
}

/// Count the digits in a (possibly formatted) card number.
#[must_use]
pub fn card_digit_count(input: &str) -> usize {
    input.chars().filter(char::is_ascii_digit).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_number_groups_in_fours() {
        assert_eq!(format_card_number("4111111111111111"), "4111 1111 1111 1111");
        assert_eq!(format_card_number("41111111"), "4111 1111");
        assert_eq!(format_card_number("411"), "411");
        assert_eq!(format_card_number(""), "");
    }

    #[test]
    fn test_card_number_strips_non_digits() {
        assert_eq!(format_card_number("4111-1111 2222x3333"), "4111 1111 2222 3333");
    }

    #[test]
    fn test_card_number_truncates_to_19_chars() {
        let long = "4".repeat(30);
        let formatted = format_card_number(&long);
        assert_eq!(formatted.len(), CARD_NUMBER_MAX_LEN);
        assert_eq!(formatted, "4444 4444 4444 4444");
    }

    #[test]
    fn test_card_number_idempotent() {
        let once = format_card_number("4111111111111111");
        assert_eq!(format_card_number(&once), once);

        let partial = format_card_number("41112222");
        assert_eq!(format_card_number(&partial), partial);
    }

    #[test]
    fn test_expiry_inserts_slash() {
        assert_eq!(format_expiry("1"), "1");
        assert_eq!(format_expiry("12"), "12");
        assert_eq!(format_expiry("122"), "12/2");
        assert_eq!(format_expiry("1229"), "12/29");
    }

    #[test]
    fn test_expiry_truncates_and_is_idempotent() {
        assert_eq!(format_expiry("122934"), "12/29");
        assert_eq!(format_expiry("12/29"), "12/29");
        assert_eq!(format_expiry("ab12cd29"), "12/29");
    }

    #[test]
    fn test_cvv_digits_only_max_four() {
        assert_eq!(format_cvv("123"), "123");
        assert_eq!(format_cvv("12345"), "1234");
        assert_eq!(format_cvv("1a2b3c"), "123");
        assert_eq!(format_cvv(""), "");
    }

    #[test]
    fn test_card_digit_count() {
        assert_eq!(card_digit_count("4111 1111 1111 1111"), 16);
        assert_eq!(card_digit_count(""), 0);
        assert_eq!(card_digit_count("no digits"), 0);
    }
}
