// ============================================================
// CELL PARSERS
// ============================================================
// Single-cell text to typed values for the election sheets

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone};

use crate::domain::election::Person;
use crate::domain::error::{AppError, Result};

/// Ballotpedia marks sitting officeholders with this suffix.
pub const INCUMBENT_MARK: &str = " (i)";

/// Sheet date format, e.g. "March 3, 2020".
pub const DATE_FORMAT: &str = "%B %d, %Y";

/// UTC-12:00, the westernmost zone. A deadline anchored here has not passed
/// anywhere else on earth.
const WESTERNMOST_OFFSET_SECS: i32 = 12 * 3600;

/// Split a multi-person cell into one `Person` per non-blank line.
pub fn parse_persons(cell: &str) -> Vec<Person> {
    cell.split('\n')
        .filter(|entry| !entry.trim().is_empty())
        .map(|entry| {
            let entry = entry.trim_end_matches('\r');
            let incumbent = entry.contains(INCUMBENT_MARK).then_some(true);
            Person::new(entry.replace(INCUMBENT_MARK, ""), incumbent)
        })
        .collect()
}

pub fn parse_date(cell: &str) -> Result<NaiveDate> {
    let date = NaiveDate::parse_from_str(cell, DATE_FORMAT).map_err(|e| {
        AppError::ParseError(format!(
            "'{}' is not a date like \"March 3, 2020\": {}",
            cell, e
        ))
    })?;

    // chrono's %B also takes "Mar" and its spaces match zero or more whitespace
    let full_month = date.format("%B").to_string();
    let month_ok = cell
        .split(' ')
        .next()
        .is_some_and(|month| month.eq_ignore_ascii_case(&full_month));
    if !month_ok || !cell.contains(", ") {
        return Err(AppError::ParseError(format!(
            "'{}' is not a date like \"March 3, 2020\"",
            cell
        )));
    }

    Ok(date)
}

/// Midnight of `date` in UTC-12:00.
pub fn deadline_instant(date: NaiveDate) -> Result<DateTime<FixedOffset>> {
    let offset = FixedOffset::west_opt(WESTERNMOST_OFFSET_SECS)
        .ok_or_else(|| AppError::Internal("UTC-12:00 offset out of range".to_string()))?;
    offset
        .from_local_datetime(&date.and_time(NaiveTime::MIN))
        .single()
        .ok_or_else(|| AppError::Internal(format!("No single instant for {}", date)))
}

/// Thousands-separated non-negative integer; blank reads as 0.
pub fn parse_number(cell: &str) -> Result<u64> {
    let digits: String = cell.trim().chars().filter(|c| *c != ',').collect();
    if digits.is_empty() {
        return Ok(0);
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::ParseError(format!("'{}' is not a number", cell)));
    }
    digits
        .parse::<u64>()
        .map_err(|e| AppError::ParseError(format!("'{}' is out of range: {}", cell, e)))
}

/// Blank district cells (statewide races) are `None`, never 0.
pub fn parse_district(cell: &str) -> Result<Option<u64>> {
    if cell.trim().is_empty() {
        Ok(None)
    } else {
        parse_number(cell).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_persons_single() {
        assert_eq!(
            parse_persons("Bill Brannon"),
            vec![Person::new("Bill Brannon", None)]
        );
    }

    #[test]
    fn test_parse_persons_multiple_keep_order() {
        assert_eq!(
            parse_persons("Janet Dudding\nRaza Rahman"),
            vec![
                Person::new("Janet Dudding", None),
                Person::new("Raza Rahman", None),
            ]
        );
    }

    #[test]
    fn test_parse_persons_incumbent() {
        assert_eq!(
            parse_persons("Joe Deshotel (i)"),
            vec![Person::new("Joe Deshotel", Some(true))]
        );
    }

    #[test]
    fn test_parse_persons_trailing_blank_line() {
        assert_eq!(
            parse_persons("Ron Reynolds (i)\nByron Ross\n"),
            vec![
                Person::new("Ron Reynolds", Some(true)),
                Person::new("Byron Ross", None),
            ]
        );
    }

    #[test]
    fn test_parse_persons_empty_and_blank_cells() {
        assert!(parse_persons("").is_empty());
        assert!(parse_persons(" \n\n  \n").is_empty());
    }

    #[test]
    fn test_parse_persons_marker_anywhere() {
        assert_eq!(
            parse_persons("Ann (i) Smith"),
            vec![Person::new("Ann Smith", Some(true))]
        );
    }

    #[test]
    fn test_parse_persons_crlf() {
        assert_eq!(
            parse_persons("Ryan Guillen (i)\r\nTravis Boldt\r\n"),
            vec![
                Person::new("Ryan Guillen", Some(true)),
                Person::new("Travis Boldt", None),
            ]
        );
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("December 9, 2019").unwrap(),
            NaiveDate::from_ymd_opt(2019, 12, 9).unwrap()
        );
        assert_eq!(
            parse_date("March 3, 2020").unwrap(),
            NaiveDate::from_ymd_opt(2020, 3, 3).unwrap()
        );
        assert_eq!(
            parse_date("August 18, 2020").unwrap(),
            NaiveDate::from_ymd_opt(2020, 8, 18).unwrap()
        );
    }

    #[test]
    fn test_parse_date_rejects_other_formats() {
        for cell in [
            "2020-03-03",
            "3/3/2020",
            "",
            "March 3 2020",
            "Smarch 3, 2020",
            "Mar 3, 2020",
            "Dec 9, 2019",
            "March 3,2020",
            " March 3, 2020",
        ] {
            assert!(
                matches!(parse_date(cell), Err(AppError::ParseError(_))),
                "{cell:?} should not parse"
            );
        }
    }

    #[test]
    fn test_parse_date_month_name_case_insensitive() {
        assert_eq!(
            parse_date("march 3, 2020").unwrap(),
            NaiveDate::from_ymd_opt(2020, 3, 3).unwrap()
        );
    }

    #[test]
    fn test_deadline_instant_is_westernmost_midnight() {
        let date = NaiveDate::from_ymd_opt(2019, 12, 9).unwrap();
        let instant = deadline_instant(date).unwrap();

        assert_eq!(instant.to_rfc3339(), "2019-12-09T00:00:00-12:00");
        assert_eq!(instant.date_naive(), date);
        assert_eq!(
            instant.naive_utc(),
            date.and_hms_opt(12, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("14,350,000").unwrap(), 14_350_000);
        assert_eq!(parse_number("191,333").unwrap(), 191_333);
        assert_eq!(parse_number("27").unwrap(), 27);
        assert_eq!(parse_number("").unwrap(), 0);
    }

    #[test]
    fn test_parse_number_rejects_non_digits() {
        for cell in ["12a", "-5", "+5", "1.5", "n/a"] {
            assert!(
                matches!(parse_number(cell), Err(AppError::ParseError(_))),
                "{cell:?} should not parse"
            );
        }
    }

    #[test]
    fn test_parse_district() {
        assert_eq!(parse_district("").unwrap(), None);
        assert_eq!(parse_district("31").unwrap(), Some(31));
        assert!(parse_district("at-large").is_err());
    }
}
