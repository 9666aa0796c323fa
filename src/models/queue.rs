//! Due-queue selection: which problems should be reviewed today, and in what
//! order.
//!
//! Dueness is a calendar-day comparison in UTC, not an instant comparison: a
//! problem scheduled for any time today is due all day, not only after its
//! exact timestamp has passed.

use super::Problem;
use chrono::{DateTime, Utc};

/// A due problem together with how many whole days overdue it is.
#[derive(Clone, Debug)]
pub struct DueEntry<'a> {
    pub problem: &'a Problem,
    pub days_overdue: i64,
}

/// Returns the problems due on or before `now`'s calendar day, most urgent
/// first. Priority: most overdue, then problems whose last attempt had
/// errors, then earliest scheduled review.
pub fn due_queue(problems: &[Problem], now: DateTime<Utc>) -> Vec<DueEntry<'_>> {
    let today = now.date_naive();

    let mut due: Vec<DueEntry> = problems
        .iter()
        .filter(|p| p.next_review.date_naive() <= today)
        .map(|p| DueEntry {
            problem: p,
            days_overdue: (today - p.next_review.date_naive()).num_days().max(0),
        })
        .collect();

    due.sort_by(|a, b| {
        b.days_overdue
            .cmp(&a.days_overdue)
            .then(b.problem.has_errors.cmp(&a.problem.has_errors))
            .then(a.problem.next_review.cmp(&b.problem.next_review))
    });

    due
}

/// The single most urgent due problem, or `None` when nothing is due.
pub fn next_problem(problems: &[Problem], now: DateTime<Utc>) -> Option<&Problem> {
    due_queue(problems, now).first().map(|entry| entry.problem)
}
