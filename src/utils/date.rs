use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Parse a `YYYY-MM-DD` command-line argument.
pub fn parse_date_arg(s: &str) -> AppResult<NaiveDate> {
    parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

/// `2025-06-01` → `2025_06_01`, the form used in export file names.
pub fn file_stamp(date: NaiveDate) -> String {
    date.format("%Y_%m_%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_dates_only() {
        assert_eq!(parse_date("2025-06-01"), NaiveDate::from_ymd_opt(2025, 6, 1));
        assert_eq!(parse_date("01/06/2025"), None);
        assert!(matches!(parse_date_arg("2025-13-01"), Err(AppError::InvalidDate(_))));
    }

    #[test]
    fn file_stamp_uses_underscores() {
        let d = NaiveDate::from_ymd_opt(2025, 1, 9).unwrap();
        assert_eq!(file_stamp(d), "2025_01_09");
    }
}
