//! Free-text date parsing for report metadata fields.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Date-only formats, tried in order. Month-first slash dates come before
/// day-first ones because reports are issued in US format.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",  // US: 09/15/2021
    "%d/%m/%Y",  // European: 15/09/2021
    "%m-%d-%Y",  // 09-15-2021
    "%d.%m.%Y",  // German: 15.09.2021
    "%d-%b-%Y",  // 15-Sep-2021
    "%d-%B-%Y",  // 15-September-2021
    "%b %d, %Y", // Sep 15, 2021
    "%B %d, %Y", // September 15, 2021
    "%d %b %Y",  // 15 Sep 2021
    "%d %B %Y",  // 15 September 2021
    "%Y%m%d",    // Compact: 20210915
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Parse a calendar date from common date and datetime text forms.
///
/// Time components and offsets are discarded. Returns `None` for empty or
/// unrecognized input.
pub fn parse_report_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
            return Some(date);
        }
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(datetime.date());
        }
    }

    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|datetime| datetime.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_iso_date() {
        assert_eq!(parse_report_date("2021-09-15"), Some(ymd(2021, 9, 15)));
        assert_eq!(parse_report_date("  2021-09-15 "), Some(ymd(2021, 9, 15)));
    }

    #[test]
    fn test_datetime_forms_keep_the_date() {
        assert_eq!(
            parse_report_date("2021-09-15T10:30:00"),
            Some(ymd(2021, 9, 15))
        );
        assert_eq!(
            parse_report_date("2021-09-15 10:30:00.123"),
            Some(ymd(2021, 9, 15))
        );
        assert_eq!(
            parse_report_date("2021-09-15T23:30:00-05:00"),
            Some(ymd(2021, 9, 15))
        );
    }

    #[test]
    fn test_slash_dates_prefer_month_first() {
        assert_eq!(parse_report_date("09/15/2021"), Some(ymd(2021, 9, 15)));
        assert_eq!(parse_report_date("01/02/2021"), Some(ymd(2021, 1, 2)));
        assert_eq!(parse_report_date("15/09/2021"), Some(ymd(2021, 9, 15)));
    }

    #[test]
    fn test_month_names() {
        assert_eq!(parse_report_date("15-Sep-2021"), Some(ymd(2021, 9, 15)));
        assert_eq!(parse_report_date("Sep 15, 2021"), Some(ymd(2021, 9, 15)));
        assert_eq!(
            parse_report_date("15 September 2021"),
            Some(ymd(2021, 9, 15))
        );
    }

    #[test]
    fn test_unparseable() {
        assert_eq!(parse_report_date(""), None);
        assert_eq!(parse_report_date("unknown"), None);
        assert_eq!(parse_report_date("2021-13-01"), None);
        assert_eq!(parse_report_date("2021-02-30"), None);
    }
}
