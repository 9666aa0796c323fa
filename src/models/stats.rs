//! Summary counts shown in the training UI.
//!
//! These are recency-based: `reviewed_today`/`to_review` look at when a
//! problem was last attempted, not at when it is next scheduled. That is a
//! different axis than the due queue, and the two views intentionally do not
//! have to add up.

use super::Problem;
use chrono::NaiveDate;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    /// Never attempted.
    pub new_today: usize,
    /// Attempted at least once, most recently today.
    pub reviewed_today: usize,
    /// Attempted at least once, but not yet today.
    pub to_review: usize,
}

/// Recomputes the summary from scratch against `today`.
pub fn collect_stats(problems: &[Problem], today: NaiveDate) -> Stats {
    let mut stats = Stats {
        total: problems.len(),
        ..Stats::default()
    };

    for problem in problems {
        if problem.repetitions == 0 {
            stats.new_today += 1;
            continue;
        }

        let last_review_day = problem
            .last_reviewed
            .unwrap_or(problem.created_at)
            .date_naive();

        if last_review_day == today {
            stats.reviewed_today += 1;
        } else {
            stats.to_review += 1;
        }
    }

    stats
}
