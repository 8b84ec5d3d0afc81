//! Calendar date helpers for the `MM/DD/YYYY` text format.

use chrono::{Local, NaiveDate};

use crate::error::ParseError;

/// Text format used by user input and by the pantry file.
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// Parse an expiration date written as `MM/DD/YYYY`.
///
/// Single-digit months and days (`1/5/2025`) are accepted. Surrounding
/// whitespace is ignored.
pub fn parse_date(input: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|_| ParseError::invalid_date(input))
}

/// Render a date as zero-padded `MM/DD/YYYY`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Today's date on the local clock, evaluated at call time.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_padded_and_unpadded_dates() {
        let expected = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        assert_eq!(parse_date("01/05/2025").unwrap(), expected);
        assert_eq!(parse_date("1/5/2025").unwrap(), expected);
        assert_eq!(parse_date(" 01/05/2025 ").unwrap(), expected);
    }

    #[test]
    fn rejects_other_layouts() {
        for input in ["2025-01-05", "13/01/2025", "02/30/2025", "", "tomorrow"] {
            let err = parse_date(input).unwrap_err();
            assert_eq!(err, ParseError::invalid_date(input));
        }
    }

    #[test]
    fn format_is_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(format_date(date), "03/09/2024");
    }
}
