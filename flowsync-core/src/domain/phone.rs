use validator::ValidationError;

const MIN_DIGITS: usize = 9;
const MAX_DIGITS: usize = 11;

/// Format free-form input as a dashed phone number while the user types.
///
/// Non-digits are dropped and input is capped at 11 digits. Up to three
/// digits stay bare, four to seven become `3-rest`, and anything longer
/// becomes `3-4-rest`.
pub fn format_phone_number(input: &str) -> String {
    let digits: String = input
        .chars()
        .filter(char::is_ascii_digit)
        .take(MAX_DIGITS)
        .collect();

    match digits.len() {
        0..=3 => digits,
        4..=7 => format!("{}-{}", &digits[..3], &digits[3..]),
        _ => format!("{}-{}-{}", &digits[..3], &digits[3..7], &digits[7..]),
    }
}

/// Validator hook for phone-number fields.
pub fn validate_phone_number(value: &str) -> Result<(), ValidationError> {
    let well_formed = value.chars().all(|c| c.is_ascii_digit() || c == '-');
    let digit_count = value.chars().filter(char::is_ascii_digit).count();

    if well_formed && (MIN_DIGITS..=MAX_DIGITS).contains(&digit_count) {
        Ok(())
    } else {
        Err(ValidationError::new("phone_number"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "")]
    #[case("010", "010")]
    #[case("0101", "010-1")]
    #[case("0101234", "010-1234")]
    #[case("01012345", "010-1234-5")]
    #[case("01012345678", "010-1234-5678")]
    #[case("010-1234-5678", "010-1234-5678")]
    #[case("010 1234 5678 99", "010-1234-5678")]
    #[case("tel: (010) 1234", "010-1234")]
    fn test_format_phone_number(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(format_phone_number(input), expected);
    }

    #[test]
    fn test_validate_phone_number() {
        assert!(validate_phone_number("010-1234-5678").is_ok());
        assert!(validate_phone_number("02-123-4567").is_ok());
        assert!(validate_phone_number("010-1234").is_err());
        assert!(validate_phone_number("010.1234.5678").is_err());
    }
}
