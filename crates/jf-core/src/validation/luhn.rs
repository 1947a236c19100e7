//! Mod-10 (Luhn) card checksum.

/// Accepted card number length, in digits.
pub const CARD_DIGITS: std::ops::RangeInclusive<usize> = 13..=19;

/// Luhn sum of a digit string, or `None` if it contains anything else.
///
/// Every second digit from the rightmost is doubled; doubled values above 9
/// have 9 subtracted.
pub fn checksum(digits: &str) -> Option<u32> {
    let mut sum = 0;
    for (i, c) in digits.chars().rev().enumerate() {
        let mut digit = c.to_digit(10)?;
        if i % 2 == 1 {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        sum += digit;
    }
    Some(sum)
}

/// Whether `number` is a plausible card number.
///
/// Separators are ignored; the remaining digits must be 13–19 long and pass
/// the checksum.
pub fn is_valid(number: &str) -> bool {
    let digits: String = number.chars().filter(char::is_ascii_digit).collect();
    if !CARD_DIGITS.contains(&digits.len()) {
        return false;
    }
    checksum(&digits).is_some_and(|sum| sum % 10 == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_vectors() {
        assert!(is_valid("4242424242424242"));
        assert!(!is_valid("4242424242424241"));
        assert!(is_valid("4242 4242 4242 4242"));
        assert!(is_valid("378282246310005"));
        assert!(is_valid("4222222222222"));
    }

    #[test]
    fn length_bounds() {
        // "0" repeated has checksum 0, so only the length decides.
        assert!(!is_valid(&"0".repeat(12)));
        assert!(is_valid(&"0".repeat(13)));
        assert!(is_valid(&"0".repeat(19)));
        assert!(!is_valid(&"0".repeat(20)));
    }

    #[test]
    fn validity_matches_checksum_for_every_check_digit() {
        for len in CARD_DIGITS {
            let body = "7".repeat(len - 1);
            for check in 0..10 {
                let number = format!("{body}{check}");
                let sum = checksum(&number).unwrap();
                assert_eq!(is_valid(&number), sum % 10 == 0, "{number}");
            }
        }
    }

    #[test]
    fn checksum_rejects_non_digits() {
        assert_eq!(checksum("42a2"), None);
        assert_eq!(checksum("18"), Some(10));
        assert_eq!(checksum("19"), Some(11));
    }
}
