//! Best-effort date parsing for the formats the backend and old app
//! versions produced.
//!
//! Profile birth dates arrive as `YYYY-MM-DD`, `DD/MM/YYYY`, `MM/DD/YYYY`,
//! or `DD-MM-YYYY` depending on the device locale that wrote them.
//! Unrecognized input yields `None` rather than an error; the callers treat
//! an unparseable date as absent.

use chrono::NaiveDate;

/// Formats tried in order. `%d/%m/%Y` before `%m/%d/%Y`: for ambiguous
/// values like `04/05/1990` the day-first reading wins because most of the
/// store's locales write day-first.
const FORMATS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%d-%m-%Y"];

/// Parse a date from any of the known historical formats.
#[must_use]
pub fn parse_flexible_date(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_iso() {
        assert_eq!(parse_flexible_date("1990-05-04"), Some(date(1990, 5, 4)));
    }

    #[test]
    fn test_day_first_slash() {
        assert_eq!(parse_flexible_date("04/05/1990"), Some(date(1990, 5, 4)));
    }

    #[test]
    fn test_month_first_when_day_first_impossible() {
        // 13 cannot be a month, so the month-first format matches
        assert_eq!(parse_flexible_date("05/13/1990"), Some(date(1990, 5, 13)));
    }

    #[test]
    fn test_day_first_dash() {
        assert_eq!(parse_flexible_date("25-12-1990"), Some(date(1990, 12, 25)));
    }

    #[test]
    fn test_unrecognized_returns_none() {
        assert_eq!(parse_flexible_date("May 4th, 1990"), None);
        assert_eq!(parse_flexible_date(""), None);
        assert_eq!(parse_flexible_date("  "), None);
        assert_eq!(parse_flexible_date("1990/05/04"), None);
    }

    #[test]
    fn test_whitespace_trimmed() {
        assert_eq!(parse_flexible_date(" 1990-05-04 "), Some(date(1990, 5, 4)));
    }
}
