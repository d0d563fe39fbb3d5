//! Input validation and sanitization.
//!
//! Everything the user types passes through here before it reaches the
//! backend or the chat log.

use crate::constants::{MAX_MESSAGE_LENGTH, MOBILE_NUMBER_LENGTH};
use crate::error::ValidationError;

/// Validate a mobile number and return it trimmed.
///
/// Checks run in a fixed order: empty, then length, then digits. A
/// non-digit string of the wrong length reports the length error.
pub fn validate_mobile_number(input: &str) -> Result<&str, ValidationError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::MobileRequired);
    }

    if trimmed.chars().count() != MOBILE_NUMBER_LENGTH {
        return Err(ValidationError::MobileLength);
    }

    if !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::MobileDigits);
    }

    Ok(trimmed)
}

/// Validate free-text chat input against a character limit.
pub fn validate_query(query: &str, max_length: usize) -> Result<(), ValidationError> {
    if query.trim().is_empty() {
        return Err(ValidationError::QueryEmpty);
    }

    if query.chars().count() > max_length {
        return Err(ValidationError::QueryTooLong { max: max_length });
    }

    Ok(())
}

/// Trim, strip angle brackets, and cap at [`MAX_MESSAGE_LENGTH`] characters.
pub fn sanitize_input(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|c| !matches!(c, '<' | '>'))
        .take(MAX_MESSAGE_LENGTH)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_ten_digits_and_trims() {
        assert_eq!(validate_mobile_number(" 9876543210 "), Ok("9876543210"));
    }

    #[test]
    fn reports_each_failure_cause() {
        assert_eq!(validate_mobile_number(""), Err(ValidationError::MobileRequired));
        assert_eq!(validate_mobile_number("   "), Err(ValidationError::MobileRequired));
        assert_eq!(validate_mobile_number("12345"), Err(ValidationError::MobileLength));
        assert_eq!(validate_mobile_number("98765abcde"), Err(ValidationError::MobileDigits));
    }

    #[test]
    fn length_is_checked_before_digits() {
        assert_eq!(validate_mobile_number("abc"), Err(ValidationError::MobileLength));
    }

    #[test]
    fn messages_are_human_readable() {
        assert_eq!(
            ValidationError::MobileLength.to_string(),
            "Mobile number must be exactly 10 digits"
        );
        assert_eq!(
            ValidationError::MobileDigits.to_string(),
            "Mobile number must contain only digits"
        );
    }

    #[test]
    fn sanitize_strips_brackets_and_caps_length() {
        let input = format!("<script>hi</script>{}", "x".repeat(600));
        let clean = sanitize_input(&input);

        assert!(!clean.contains('<'));
        assert!(!clean.contains('>'));
        assert!(clean.chars().count() <= 500);
        assert!(clean.starts_with("scripthi/script"));
    }

    #[test]
    fn sanitize_trims_before_stripping() {
        assert_eq!(sanitize_input("   <b>hello</b>  "), "bhello/b");
    }

    #[test]
    fn query_validation() {
        assert_eq!(validate_query("  ", 500), Err(ValidationError::QueryEmpty));
        assert_eq!(
            validate_query(&"a".repeat(501), 500),
            Err(ValidationError::QueryTooLong { max: 500 })
        );
        assert_eq!(validate_query("What is my balance?", 500), Ok(()));
    }

    proptest! {
        #[test]
        fn any_ten_digit_string_is_valid(digits in "[0-9]{10}") {
            prop_assert_eq!(validate_mobile_number(&digits), Ok(digits.as_str()));
        }

        #[test]
        fn anything_else_is_rejected_with_a_message(input in "\\PC{0,15}") {
            let trimmed = input.trim();
            let ten_digits = trimmed.chars().count() == 10
                && trimmed.chars().all(|c| c.is_ascii_digit());
            prop_assume!(!ten_digits);

            let err = validate_mobile_number(&input).unwrap_err();
            prop_assert!(!err.to_string().is_empty());
        }

        #[test]
        fn sanitized_output_is_bounded_and_bracket_free(input in "\\PC{0,800}") {
            let clean = sanitize_input(&input);
            prop_assert!(clean.chars().count() <= 500);
            prop_assert!(!clean.contains('<') && !clean.contains('>'));
        }
    }
}
