//! Localized and ISO-8601 date conversion.
//!
//! # Responsibility
//! - Read and render `d <month> yyyy` display dates for supported locales.
//! - Read and render `YYYY-MM-DD` wire dates.
//! - Map the "no deadline" sentinel to an absent date.
//!
//! # Invariants
//! - `parse_localized(format_localized(d, l), l) == Ok(Some(d))`.
//! - `from_iso(&to_iso(d)) == Ok(Some(d))`.
//! - The sentinel is never reported as a parse failure.

use super::locale::Locale;
use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Date without time-of-day or timezone.
pub type CalendarDate = NaiveDate;

const ISO_FORMAT: &str = "%Y-%m-%d";
const LOCALIZED_PATTERN_HINT: &str = "<day> <month> <year>";
const ISO_PATTERN_HINT: &str = "YYYY-MM-DD";

static LOCALIZED_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})\s+(\p{L}+)\.?\s+([+-]?\d{4,6})$").expect("valid localized date regex")
});
static ISO_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([+-]?\d{4,6})-(\d{2})-(\d{2})$").expect("valid iso date regex")
});

/// Typed failure for malformed date text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Input is blank.
    Empty,
    /// Input does not match the expected shape.
    Malformed {
        input: String,
        expected: &'static str,
    },
    /// Month name is not known for the requested locale.
    UnknownMonth { name: String, locale: Locale },
    /// Components parse but do not form a real calendar date.
    InvalidDate { year: i32, month: u32, day: u32 },
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "date text is empty"),
            Self::Malformed { input, expected } => {
                write!(f, "date `{input}` does not match `{expected}`")
            }
            Self::UnknownMonth { name, locale } => {
                write!(f, "unknown month name `{name}` for locale `{locale}`")
            }
            Self::InvalidDate { year, month, day } => {
                write!(f, "{year:04}-{month:02}-{day:02} is not a valid calendar date")
            }
        }
    }
}

impl Error for ParseError {}

/// Returns whether `text` is the "no deadline" sentinel in any supported locale.
pub fn is_no_deadline(text: &str) -> bool {
    let normalized = text.trim().to_lowercase();
    Locale::ALL
        .iter()
        .any(|locale| locale.no_deadline_label().to_lowercase() == normalized)
}

/// Parses localized display text such as `6 May 2025` or `6 мая 2025`.
///
/// Returns `Ok(None)` for the no-deadline sentinel.
///
/// # Errors
/// - `Empty` for blank input.
/// - `Malformed` when the day/month/year shape does not match.
/// - `UnknownMonth` when the month name is not valid for `locale`.
/// - `InvalidDate` for impossible dates such as 31 April.
pub fn parse_localized(text: &str, locale: Locale) -> Result<Option<CalendarDate>, ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }
    if is_no_deadline(trimmed) {
        return Ok(None);
    }

    let caps = LOCALIZED_DATE_RE
        .captures(trimmed)
        .ok_or_else(|| ParseError::Malformed {
            input: trimmed.to_string(),
            expected: LOCALIZED_PATTERN_HINT,
        })?;

    let day = parse_component::<u32>(&caps[1], trimmed, LOCALIZED_PATTERN_HINT)?;
    let month_name = &caps[2];
    let month = locale
        .month_number(month_name)
        .ok_or_else(|| ParseError::UnknownMonth {
            name: month_name.to_string(),
            locale,
        })?;
    let year = parse_component::<i32>(&caps[3], trimmed, LOCALIZED_PATTERN_HINT)?;

    build_date(year, month, day).map(Some)
}

/// Renders `date` as `d <month> yyyy` for `locale`.
pub fn format_localized(date: CalendarDate, locale: Locale) -> String {
    format!(
        "{} {} {}",
        date.day(),
        locale.month_name(date.month()),
        format_year(date.year())
    )
}

/// Renders an optional deadline, using the sentinel label when absent.
pub fn format_deadline(deadline: Option<CalendarDate>, locale: Locale) -> String {
    match deadline {
        Some(date) => format_localized(date, locale),
        None => locale.no_deadline_label().to_string(),
    }
}

/// Renders `date` as `YYYY-MM-DD`.
pub fn to_iso(date: CalendarDate) -> String {
    date.format(ISO_FORMAT).to_string()
}

/// Parses a `YYYY-MM-DD` date. Returns `Ok(None)` for the no-deadline sentinel.
///
/// # Errors
/// - `Empty` for blank input.
/// - `Malformed` when the text is not an ISO calendar date.
/// - `InvalidDate` when components are out of calendar range.
pub fn from_iso(text: &str) -> Result<Option<CalendarDate>, ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }
    if is_no_deadline(trimmed) {
        return Ok(None);
    }

    let caps = ISO_DATE_RE
        .captures(trimmed)
        .ok_or_else(|| ParseError::Malformed {
            input: trimmed.to_string(),
            expected: ISO_PATTERN_HINT,
        })?;

    let year = parse_component::<i32>(&caps[1], trimmed, ISO_PATTERN_HINT)?;
    let month = parse_component::<u32>(&caps[2], trimmed, ISO_PATTERN_HINT)?;
    let day = parse_component::<u32>(&caps[3], trimmed, ISO_PATTERN_HINT)?;

    build_date(year, month, day).map(Some)
}

/// Reads a deadline shown to the user, accepting ISO or localized text.
///
/// Any failure degrades to `None` so a malformed value behaves like
/// "no deadline" instead of failing the caller.
pub fn parse_deadline_lenient(text: &str, locale: Locale) -> Option<CalendarDate> {
    from_iso(text)
        .or_else(|_| parse_localized(text, locale))
        .ok()
        .flatten()
}

fn parse_component<T: std::str::FromStr>(
    raw: &str,
    input: &str,
    expected: &'static str,
) -> Result<T, ParseError> {
    raw.parse::<T>().map_err(|_| ParseError::Malformed {
        input: input.to_string(),
        expected,
    })
}

fn build_date(year: i32, month: u32, day: u32) -> Result<CalendarDate, ParseError> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or(ParseError::InvalidDate { year, month, day })
}

fn format_year(year: i32) -> String {
    if (0..=9999).contains(&year) {
        format!("{year:04}")
    } else {
        format!("{year:+05}")
    }
}

#[cfg(test)]
mod tests {
    use super::{
        format_deadline, format_localized, from_iso, is_no_deadline, parse_deadline_lenient,
        parse_localized, to_iso, CalendarDate, ParseError,
    };
    use crate::date::Locale;

    fn date(year: i32, month: u32, day: u32) -> CalendarDate {
        CalendarDate::from_ymd_opt(year, month, day).expect("valid test date")
    }

    #[test]
    fn parses_english_display_date() {
        assert_eq!(
            parse_localized("6 May 2025", Locale::English),
            Ok(Some(date(2025, 5, 6)))
        );
        assert_eq!(
            parse_localized("  16 december 2022 ", Locale::English),
            Ok(Some(date(2022, 12, 16)))
        );
    }

    #[test]
    fn parses_russian_display_date_in_both_month_forms() {
        assert_eq!(
            parse_localized("6 мая 2025", Locale::Russian),
            Ok(Some(date(2025, 5, 6)))
        );
        assert_eq!(
            parse_localized("1 Январь 2024", Locale::Russian),
            Ok(Some(date(2024, 1, 1)))
        );
    }

    #[test]
    fn rejects_impossible_calendar_date() {
        assert_eq!(
            parse_localized("31 April 2025", Locale::English),
            Err(ParseError::InvalidDate {
                year: 2025,
                month: 4,
                day: 31
            })
        );
        assert!(matches!(
            parse_localized("29 февраля 2023", Locale::Russian),
            Err(ParseError::InvalidDate { .. })
        ));
        assert_eq!(
            parse_localized("29 February 2024", Locale::English),
            Ok(Some(date(2024, 2, 29)))
        );
    }

    #[test]
    fn rejects_month_from_other_locale_and_bad_shapes() {
        assert!(matches!(
            parse_localized("6 мая 2025", Locale::English),
            Err(ParseError::UnknownMonth { .. })
        ));
        assert!(matches!(
            parse_localized("May 6 2025", Locale::English),
            Err(ParseError::Malformed { .. })
        ));
        assert!(matches!(
            parse_localized("6 May 25", Locale::English),
            Err(ParseError::Malformed { .. })
        ));
        assert_eq!(parse_localized("   ", Locale::English), Err(ParseError::Empty));
    }

    #[test]
    fn sentinel_is_absent_not_error() {
        for locale in Locale::ALL {
            assert_eq!(parse_localized("No deadline", locale), Ok(None));
            assert_eq!(parse_localized("Без срока", locale), Ok(None));
        }
        assert_eq!(from_iso("no deadline"), Ok(None));
        assert_eq!(from_iso("без срока"), Ok(None));
        assert!(is_no_deadline(" No Deadline "));
        assert!(!is_no_deadline("deadline"));
    }

    #[test]
    fn localized_round_trip_holds_for_sampled_dates() {
        let samples = [
            date(2025, 5, 6),
            date(2024, 2, 29),
            date(1999, 12, 31),
            date(2000, 1, 1),
            date(33, 7, 4),
            date(12345, 3, 9),
            date(-44, 3, 15),
        ];
        for locale in Locale::ALL {
            for sample in samples {
                let text = format_localized(sample, locale);
                assert_eq!(
                    parse_localized(&text, locale),
                    Ok(Some(sample)),
                    "round trip failed for `{text}`"
                );
            }
        }
    }

    #[test]
    fn formats_without_leading_zero_and_with_locale_month() {
        assert_eq!(format_localized(date(2025, 5, 6), Locale::English), "6 May 2025");
        assert_eq!(format_localized(date(2025, 5, 6), Locale::Russian), "6 мая 2025");
        assert_eq!(format_deadline(None, Locale::Russian), "Без срока");
        assert_eq!(format_deadline(None, Locale::English), "No deadline");
    }

    #[test]
    fn iso_round_trip_and_failures() {
        for sample in [date(2025, 5, 6), date(2024, 2, 29), date(1, 1, 1)] {
            assert_eq!(from_iso(&to_iso(sample)), Ok(Some(sample)));
        }
        assert_eq!(to_iso(date(2025, 5, 6)), "2025-05-06");
        assert!(matches!(from_iso("2025-5-6"), Err(ParseError::Malformed { .. })));
        assert!(matches!(from_iso("06.05.2025"), Err(ParseError::Malformed { .. })));
        assert!(matches!(from_iso("2025-04-31"), Err(ParseError::InvalidDate { .. })));
        assert!(matches!(from_iso("2025-13-01"), Err(ParseError::InvalidDate { .. })));
    }

    #[test]
    fn lenient_parse_degrades_to_absent() {
        assert_eq!(
            parse_deadline_lenient("2025-05-06", Locale::Russian),
            Some(date(2025, 5, 6))
        );
        assert_eq!(
            parse_deadline_lenient("6 мая 2025", Locale::Russian),
            Some(date(2025, 5, 6))
        );
        assert_eq!(parse_deadline_lenient("soon", Locale::English), None);
        assert_eq!(parse_deadline_lenient("Без срока", Locale::English), None);
    }
}
