//! Day/month/year date handling for register data.
//!
//! Every date in an uploaded file is textual `DD/MM/YYYY`. Parsing is
//! strict about the shape (two digits, two digits, four digits) so that
//! a parsed date always reformats to the exact original string.

use chrono::{Datelike, Months, NaiveDate};

use statreg_model::DateRule;

/// Absolute window outside which no register date is credible.
const MIN_CALENDAR_DATE: (i32, u32, u32) = (1900, 1, 1);
const MAX_CALENDAR_DATE: (i32, u32, u32) = (2100, 12, 31);

/// How far into the future a date may lie when future dates are allowed.
const MAX_YEARS_IN_FUTURE: u32 = 1;

/// Parses a strict `DD/MM/YYYY` date.
///
/// Returns `None` for any other shape, for out-of-calendar values such
/// as `31/02/2024`, and for non-zero-padded components.
pub fn parse_dmy(value: &str) -> Option<NaiveDate> {
    let mut parts = value.trim().split('/');
    let day = parts.next()?;
    let month = parts.next()?;
    let year = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    if day.len() != 2 || month.len() != 2 || year.len() != 4 {
        return None;
    }

    let day: u32 = day.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    let year: i32 = year.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Formats a date back into `DD/MM/YYYY`.
pub fn format_dmy(date: NaiveDate) -> String {
    format!("{:02}/{:02}/{:04}", date.day(), date.month(), date.year())
}

/// Checks a date against the register's plausibility window.
///
/// The date must fall within the absolute 1900–2100 calendar window,
/// may not lie more than `rule.max_years_in_past` years before `today`,
/// and may not lie in the future unless the rule allows it (and then at
/// most one year ahead).
pub fn within_statutory_range(date: NaiveDate, today: NaiveDate, rule: &DateRule) -> bool {
    let (min_y, min_m, min_d) = MIN_CALENDAR_DATE;
    let (max_y, max_m, max_d) = MAX_CALENDAR_DATE;
    let Some(calendar_min) = NaiveDate::from_ymd_opt(min_y, min_m, min_d) else {
        return false;
    };
    let Some(calendar_max) = NaiveDate::from_ymd_opt(max_y, max_m, max_d) else {
        return false;
    };
    if date < calendar_min || date > calendar_max {
        return false;
    }

    let years_back = u32::try_from(rule.max_years_in_past.max(0)).unwrap_or(0);
    let Some(earliest) = today.checked_sub_months(Months::new(years_back * 12)) else {
        return false;
    };
    if date < earliest {
        return false;
    }

    if rule.allow_future {
        match today.checked_add_months(Months::new(MAX_YEARS_IN_FUTURE * 12)) {
            Some(latest) => date <= latest,
            None => false,
        }
    } else {
        date <= today
    }
}

/// Adds whole years to a date, clamping 29 February onto 28 February in
/// non-leap years.
pub fn add_years(date: NaiveDate, years: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(years * 12))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_strict_dmy() {
        assert_eq!(parse_dmy("15/03/1984"), Some(date(1984, 3, 15)));
        assert_eq!(parse_dmy(" 01/01/2025 "), Some(date(2025, 1, 1)));
    }

    #[test]
    fn rejects_loose_or_foreign_shapes() {
        assert_eq!(parse_dmy("1/1/2025"), None);
        assert_eq!(parse_dmy("2025-01-01"), None);
        assert_eq!(parse_dmy("01/01/25"), None);
        assert_eq!(parse_dmy("01/01/2025/extra"), None);
        assert_eq!(parse_dmy(""), None);
        assert_eq!(parse_dmy("aa/bb/cccc"), None);
    }

    #[test]
    fn rejects_out_of_calendar_dates() {
        assert_eq!(parse_dmy("31/02/2024"), None);
        assert_eq!(parse_dmy("29/02/2023"), None);
        assert_eq!(parse_dmy("29/02/2024"), Some(date(2024, 2, 29)));
        assert_eq!(parse_dmy("00/01/2024"), None);
        assert_eq!(parse_dmy("01/13/2024"), None);
    }

    #[test]
    fn future_dates_depend_on_the_rule() {
        let today = date(2025, 6, 1);
        let next_month = date(2025, 7, 1);
        let strict = DateRule::default();
        let lenient = DateRule {
            allow_future: true,
            ..DateRule::default()
        };

        assert!(!within_statutory_range(next_month, today, &strict));
        assert!(within_statutory_range(next_month, today, &lenient));
        // Even a lenient rule caps the future at one year out.
        assert!(!within_statutory_range(date(2026, 7, 1), today, &lenient));
    }

    #[test]
    fn birth_dates_older_than_a_lifetime_are_rejected() {
        let today = date(2025, 6, 1);
        let rule = DateRule::birth_date();
        assert!(within_statutory_range(date(1930, 1, 1), today, &rule));
        assert!(!within_statutory_range(date(1900, 1, 1), today, &rule));
        assert!(!within_statutory_range(date(2026, 1, 1), today, &rule));
    }

    #[test]
    fn calendar_window_is_absolute() {
        let today = date(2025, 6, 1);
        let rule = DateRule {
            allow_future: false,
            max_years_in_past: 10_000,
        };
        assert!(!within_statutory_range(date(1899, 12, 31), today, &rule));
    }

    #[test]
    fn leap_day_plus_a_year_clamps() {
        assert_eq!(add_years(date(2024, 2, 29), 1), Some(date(2025, 2, 28)));
        assert_eq!(add_years(date(2024, 2, 29), 4), Some(date(2028, 2, 29)));
    }

    proptest! {
        /// Parsing then reformatting reproduces the original string for
        /// every valid calendar date.
        #[test]
        fn round_trips_every_valid_date(
            year in 1900i32..=2100,
            month in 1u32..=12,
            day in 1u32..=31,
        ) {
            prop_assume!(NaiveDate::from_ymd_opt(year, month, day).is_some());
            let original = format!("{day:02}/{month:02}/{year:04}");
            let parsed = parse_dmy(&original).unwrap();
            prop_assert_eq!(format_dmy(parsed), original);
        }
    }
}
