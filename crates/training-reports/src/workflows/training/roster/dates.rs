use super::super::domain::MalformedDateError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATE_FORMATS: [&str; 5] = [
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
];
const DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Parses a roster date string into a calendar date, dropping any time of day.
///
/// RFC 3339 values keep the calendar date written in their own offset. The year
/// must be written with four digits, so `1/1/23` is rejected rather than read as
/// the year 23.
pub(crate) fn parse_date(value: &str) -> Result<NaiveDate, MalformedDateError> {
    let trimmed = value.trim();
    let malformed = || MalformedDateError {
        value: value.to_string(),
    };

    if !has_four_digit_year(trimmed) {
        return Err(malformed());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.date_naive());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(dt.date());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date);
        }
    }

    Err(malformed())
}

fn has_four_digit_year(value: &str) -> bool {
    value
        .split(|c: char| !c.is_ascii_digit())
        .any(|digits| digits.len() == 4)
}

/// Treats missing or blank expiration values as "never expires".
pub(crate) fn parse_optional_date(
    value: Option<&str>,
) -> Result<Option<NaiveDate>, MalformedDateError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => parse_date(raw).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn accepts_us_and_iso_formats() {
        assert_eq!(parse_date("10/1/2023").expect("us"), date(2023, 10, 1));
        assert_eq!(parse_date("01/05/2024").expect("padded"), date(2024, 1, 5));
        assert_eq!(parse_date("2023-10-01").expect("iso"), date(2023, 10, 1));
        assert_eq!(parse_date(" 2023-10-01 ").expect("trimmed"), date(2023, 10, 1));
    }

    #[test]
    fn accepts_month_names() {
        assert_eq!(parse_date("Oct 1, 2023").expect("short"), date(2023, 10, 1));
        assert_eq!(
            parse_date("October 1, 2023").expect("long"),
            date(2023, 10, 1)
        );
    }

    #[test]
    fn drops_time_of_day() {
        assert_eq!(
            parse_date("2023-06-30T23:59:59Z").expect("rfc3339"),
            date(2023, 6, 30)
        );
        assert_eq!(
            parse_date("2023-06-30T23:59:59-05:00").expect("offset"),
            date(2023, 6, 30)
        );
        assert_eq!(
            parse_date("2023-07-01T08:15:00").expect("naive datetime"),
            date(2023, 7, 1)
        );
    }

    #[test]
    fn rejects_garbage_with_original_value() {
        let error = parse_date("not-a-date").expect_err("garbage rejected");
        assert_eq!(error.value, "not-a-date");
        assert!(parse_date("   ").is_err());
        assert!(parse_date("13/45/2023").is_err());
    }

    #[test]
    fn rejects_years_not_written_with_four_digits() {
        let error = parse_date("1/1/23").expect_err("two-digit year rejected");
        assert_eq!(error.value, "1/1/23");
        assert!(parse_date("1/1/223").is_err());
        assert!(parse_date("23-01-01").is_err());
        assert!(parse_date("1/1/20231").is_err());
        assert!(parse_date("Oct 1, 23").is_err());
        assert_eq!(parse_date("1/1/2023").expect("four digits"), date(2023, 1, 1));
    }

    #[test]
    fn blank_optional_dates_are_absent() {
        assert_eq!(parse_optional_date(None).expect("none"), None);
        assert_eq!(parse_optional_date(Some("  ")).expect("blank"), None);
        assert_eq!(
            parse_optional_date(Some("8/1/2025")).expect("present"),
            Some(date(2025, 8, 1))
        );
    }
}
