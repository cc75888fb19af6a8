use crate::date::CalendarDate;
use crate::model::task::DisplayStatus;

/// Days ahead (inclusive) during which a deadline counts as due soon.
pub const DUE_SOON_DAYS: i64 = 2;

/// How close an open deadline is, relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeadlineUrgency {
    /// No deadline set.
    None,
    /// Deadline already passed.
    Overdue,
    /// Deadline is today or within `DUE_SOON_DAYS`.
    DueSoon,
    /// Deadline further out.
    Later,
}

/// Derives the display status of a task.
///
/// Rules, first match wins:
/// - completed, past deadline -> `Late`
/// - completed -> `Completed`
/// - open, past deadline -> `Overdue`
/// - open -> `Active`
///
/// "Past" means `today > deadline`; `today == deadline` is on time.
pub fn resolve_status(
    completed: bool,
    deadline: Option<CalendarDate>,
    today: CalendarDate,
) -> DisplayStatus {
    let past_deadline = deadline.is_some_and(|deadline| today > deadline);
    match (completed, past_deadline) {
        (true, true) => DisplayStatus::Late,
        (true, false) => DisplayStatus::Completed,
        (false, true) => DisplayStatus::Overdue,
        (false, false) => DisplayStatus::Active,
    }
}

/// Classifies a deadline by the number of days left until it.
pub fn deadline_urgency(deadline: Option<CalendarDate>, today: CalendarDate) -> DeadlineUrgency {
    let Some(deadline) = deadline else {
        return DeadlineUrgency::None;
    };

    let days_left = deadline.signed_duration_since(today).num_days();
    if days_left < 0 {
        DeadlineUrgency::Overdue
    } else if days_left <= DUE_SOON_DAYS {
        DeadlineUrgency::DueSoon
    } else {
        DeadlineUrgency::Later
    }
}

#[cfg(test)]
mod tests {
    use super::{deadline_urgency, resolve_status, DeadlineUrgency};
    use crate::date::CalendarDate;
    use crate::model::task::DisplayStatus;
    use chrono::Days;

    fn today() -> CalendarDate {
        CalendarDate::from_ymd_opt(2025, 5, 7).unwrap()
    }

    fn yesterday() -> CalendarDate {
        today().checked_sub_days(Days::new(1)).unwrap()
    }

    fn tomorrow() -> CalendarDate {
        today().checked_add_days(Days::new(1)).unwrap()
    }

    #[test]
    fn deadline_day_is_on_time() {
        assert_eq!(
            resolve_status(false, Some(today()), today()),
            DisplayStatus::Active
        );
        assert_eq!(
            resolve_status(true, Some(today()), today()),
            DisplayStatus::Completed
        );
    }

    #[test]
    fn past_deadline_is_overdue_or_late() {
        assert_eq!(
            resolve_status(false, Some(yesterday()), today()),
            DisplayStatus::Overdue
        );
        assert_eq!(
            resolve_status(true, Some(yesterday()), today()),
            DisplayStatus::Late
        );
    }

    #[test]
    fn future_deadline_is_on_time() {
        assert_eq!(
            resolve_status(false, Some(tomorrow()), today()),
            DisplayStatus::Active
        );
        assert_eq!(
            resolve_status(true, Some(tomorrow()), today()),
            DisplayStatus::Completed
        );
    }

    #[test]
    fn absent_deadline_depends_on_completion_only() {
        assert_eq!(resolve_status(true, None, today()), DisplayStatus::Completed);
        assert_eq!(resolve_status(false, None, today()), DisplayStatus::Active);
    }

    #[test]
    fn urgency_buckets_follow_days_left() {
        let in_days = |n: u64| today().checked_add_days(Days::new(n)).unwrap();

        assert_eq!(deadline_urgency(None, today()), DeadlineUrgency::None);
        assert_eq!(
            deadline_urgency(Some(yesterday()), today()),
            DeadlineUrgency::Overdue
        );
        assert_eq!(
            deadline_urgency(Some(today()), today()),
            DeadlineUrgency::DueSoon
        );
        assert_eq!(
            deadline_urgency(Some(in_days(2)), today()),
            DeadlineUrgency::DueSoon
        );
        assert_eq!(
            deadline_urgency(Some(in_days(3)), today()),
            DeadlineUrgency::Later
        );
    }
}
