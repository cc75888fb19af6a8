//! Calendar date handling for deadlines.
//!
//! # Responsibility
//! - Convert between localized display text and ISO-8601 calendar dates.
//! - Own the "no deadline" sentinel so callers never compare raw strings.
//!
//! # Invariants
//! - Functions here are pure and hold no shared state.
//! - Malformed text is a typed `ParseError`, never a panic.

mod codec;
mod locale;

pub use codec::{
    format_deadline, format_localized, from_iso, is_no_deadline, parse_deadline_lenient,
    parse_localized, to_iso, CalendarDate, ParseError,
};
pub use locale::{Locale, LocaleError};
