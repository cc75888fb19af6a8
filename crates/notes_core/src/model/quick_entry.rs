//! Quick-entry title macros.
//!
//! # Responsibility
//! - Extract `!1`..`!4` priority and `!before <d.MM.yyyy>` deadline macros
//!   from a typed title.
//! - Enforce the minimum title length accepted by the task service.
//!
//! # Invariants
//! - Explicitly chosen priority/deadline values win over macros.
//! - Macro tokens never remain in the stored title.
//! - On error the task is left untouched.

use crate::date::CalendarDate;
use crate::model::task::{Priority, Task, TaskValidationError};
use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum title length, in characters, after macros are stripped.
pub const MIN_TITLE_CHARS: usize = 4;

const BARE_DEADLINE_MACRO: &str = "!before";

static PRIORITY_MACRO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!([1-4])").expect("valid priority macro regex"));
static DEADLINE_MACRO_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"!before\s+((\d{1,2})([.\-])(\d{1,2})([.\-])(\d{4}))")
        .expect("valid deadline macro regex")
});
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Applies title macros to `task` in place.
///
/// Rules:
/// - `!N` (1-4) sets priority Low..Critical when none is set; otherwise the
///   priority defaults to `Medium` when unset.
/// - `!before d.MM.yyyy` (or `d-MM-yyyy`) sets the deadline when none is set.
///   The month has two digits and both separators are the same.
/// - Any other `!before` occurrence sets the deadline to `today` when none
///   is set, and is removed from the title.
///
/// # Errors
/// - `InvalidMacroDate` when the `!before` date has the wrong shape or is not
///   a calendar date.
/// - `EmptyTitle` / `TitleTooShort` when fewer than `MIN_TITLE_CHARS` remain.
pub fn apply_title_macros(task: &mut Task, today: CalendarDate) -> Result<(), TaskValidationError> {
    let mut title = task.title.clone();
    let mut priority = task.priority;
    let mut deadline = task.deadline;

    if let Some(caps) = PRIORITY_MACRO_RE.captures(&title) {
        if priority.is_none() {
            priority = caps[1].parse::<u8>().ok().and_then(Priority::from_level);
        }
        title = PRIORITY_MACRO_RE.replace_all(&title, " ").into_owned();
    }
    if priority.is_none() {
        priority = Some(Priority::Medium);
    }

    if let Some(caps) = DEADLINE_MACRO_RE.captures(&title) {
        if deadline.is_none() {
            deadline = Some(macro_date(&caps)?);
        }
        title = DEADLINE_MACRO_RE.replace_all(&title, " ").into_owned();
    } else if title.contains(BARE_DEADLINE_MACRO) {
        if deadline.is_none() {
            deadline = Some(today);
        }
        title = title.replace(BARE_DEADLINE_MACRO, " ");
    }

    let title = WHITESPACE_RE.replace_all(title.trim(), " ").into_owned();
    let actual = title.chars().count();
    if actual == 0 {
        return Err(TaskValidationError::EmptyTitle);
    }
    if actual < MIN_TITLE_CHARS {
        return Err(TaskValidationError::TitleTooShort {
            min_chars: MIN_TITLE_CHARS,
            actual,
        });
    }

    task.title = title;
    task.priority = priority;
    task.deadline = deadline;
    Ok(())
}

/// Reads a `d.MM.yyyy` / `d-MM-yyyy` capture of `DEADLINE_MACRO_RE`.
fn macro_date(caps: &regex::Captures<'_>) -> Result<CalendarDate, TaskValidationError> {
    let invalid = || TaskValidationError::InvalidMacroDate(caps[1].to_string());

    if caps[3] != caps[5] || caps[4].len() != 2 {
        return Err(invalid());
    }
    let day = caps[2].parse::<u32>().map_err(|_| invalid())?;
    let month = caps[4].parse::<u32>().map_err(|_| invalid())?;
    let year = caps[6].parse::<i32>().map_err(|_| invalid())?;

    CalendarDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}
