//! Spaced-repetition scheduling formulas.
//!
//! Two policies coexist and are selected per completion event:
//! - Four-grade: the learner reports `again`/`hard`/`good`/`easy` after a
//!   lesson, Anki-style. Interval growth follows the classic 1 day → 6 days →
//!   ease-multiplier progression; the ease factor has a 1.3 floor and no
//!   ceiling.
//! - Pass/fail: used when only success or failure is known. Success multiplies
//!   the interval by the ease factor, failure resets it; the ease factor is
//!   clamped to [1.3, 2.5].
//!
//! Both are kept as documented: they are deliberate behavioral variants, not
//! one algorithm with a bug in the other.

use super::{MIN_EASE_FACTOR, Problem};
use chrono::{DateTime, Duration, Utc};

/// Ceiling for the ease factor under the pass/fail policy only.
const MAX_EASE_FACTOR_PASS_FAIL: f64 = 2.5;

/// Learner-reported outcome under the four-grade policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Grade {
    Again,
    Hard,
    Good,
    Easy,
}

/// Outcome of a review attempt, tagged by scheduling policy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Performance {
    FourGrade(Grade),
    PassFail { passed: bool },
}

/// New scheduling parameters computed from one review.
#[derive(Clone, Debug)]
pub struct ReviewResult {
    pub interval: f64,
    pub ease_factor: f64,
    pub repetitions: u32,
    pub next_review: DateTime<Utc>,
}

/// Calculates updated scheduling parameters for one completed review.
/// Pure: the caller applies the result to the owned record and persists.
pub fn calculate_next_review(
    problem: &Problem,
    performance: Performance,
    now: DateTime<Utc>,
) -> ReviewResult {
    match performance {
        Performance::FourGrade(grade) => calculate_four_grade(problem, grade, now),
        Performance::PassFail { passed } => calculate_pass_fail(problem, passed, now),
    }
}

/// A long success streak can push the interval past chrono's representable
/// date range; such reviews are pinned to the far future instead of
/// overflowing.
fn next_review_date(now: DateTime<Utc>, interval_days: f64) -> DateTime<Utc> {
    Duration::try_days(interval_days as i64)
        .and_then(|days| now.checked_add_signed(days))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

fn calculate_four_grade(problem: &Problem, grade: Grade, now: DateTime<Utc>) -> ReviewResult {
    let (interval, ease_factor, repetitions) = match grade {
        // Failed recall: back to the start. Repetitions reset to zero so the
        // problem counts as new again.
        Grade::Again => (
            1.0,
            (problem.ease_factor - 0.2).max(MIN_EASE_FACTOR),
            0,
        ),
        Grade::Hard => (
            (problem.interval * 1.2).floor().max(1.0),
            (problem.ease_factor - 0.15).max(MIN_EASE_FACTOR),
            problem.repetitions + 1,
        ),
        Grade::Good => {
            let interval = match problem.repetitions {
                0 => 1.0,
                1 => 6.0,
                _ => (problem.interval * problem.ease_factor).floor(),
            };
            (interval, problem.ease_factor, problem.repetitions + 1)
        }
        // No ceiling on the ease factor here.
        Grade::Easy => (
            (problem.interval * problem.ease_factor * 1.3).floor(),
            problem.ease_factor + 0.15,
            problem.repetitions + 1,
        ),
    };

    ReviewResult {
        interval,
        ease_factor,
        repetitions,
        next_review: next_review_date(now, interval),
    }
}

fn calculate_pass_fail(problem: &Problem, passed: bool, now: DateTime<Utc>) -> ReviewResult {
    let (interval, ease_factor) = if passed {
        (
            problem.interval * problem.ease_factor,
            (problem.ease_factor + 0.1).min(MAX_EASE_FACTOR_PASS_FAIL),
        )
    } else {
        (1.0, (problem.ease_factor - 0.2).max(MIN_EASE_FACTOR))
    };

    ReviewResult {
        interval,
        ease_factor,
        repetitions: problem.repetitions + 1,
        next_review: next_review_date(now, interval.ceil()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn problem_with(interval: f64, ease_factor: f64, repetitions: u32) -> Problem {
        let mut problem = Problem::new("Test Lesson", Utc::now());
        problem.interval = interval;
        problem.ease_factor = ease_factor;
        problem.repetitions = repetitions;
        problem
    }

    #[test]
    fn test_first_completion_good() {
        let now = Utc::now();
        let problem = problem_with(1.0, 2.5, 0);

        let result = calculate_next_review(&problem, Performance::FourGrade(Grade::Good), now);
        assert_eq!(result.interval, 1.0);
        assert_eq!(result.repetitions, 1);
        assert_eq!(result.next_review, now + Duration::days(1));
    }

    #[test]
    fn test_second_completion_good() {
        let now = Utc::now();
        let problem = problem_with(1.0, 2.5, 1);

        let result = calculate_next_review(&problem, Performance::FourGrade(Grade::Good), now);
        assert_eq!(result.interval, 6.0);
        assert_eq!(result.next_review, now + Duration::days(6));
    }

    #[test]
    fn test_third_completion_good_multiplies_by_ease() {
        let problem = problem_with(6.0, 2.5, 2);

        let result =
            calculate_next_review(&problem, Performance::FourGrade(Grade::Good), Utc::now());
        // floor(6 * 2.5) = 15
        assert_eq!(result.interval, 15.0);
        assert_eq!(result.repetitions, 3);
    }

    #[test]
    fn test_again_resets_progress() {
        let problem = problem_with(20.0, 2.0, 5);

        let result =
            calculate_next_review(&problem, Performance::FourGrade(Grade::Again), Utc::now());
        assert_eq!(result.interval, 1.0);
        assert_eq!(result.repetitions, 0);
        assert!((result.ease_factor - 1.8).abs() < 1e-9);
    }

    #[test]
    fn test_hard_grows_slowly_and_penalizes_ease() {
        let problem = problem_with(10.0, 2.5, 3);

        let result =
            calculate_next_review(&problem, Performance::FourGrade(Grade::Hard), Utc::now());
        // floor(10 * 1.2) = 12
        assert_eq!(result.interval, 12.0);
        assert!((result.ease_factor - 2.35).abs() < 1e-9);
        assert_eq!(result.repetitions, 4);
    }

    #[test]
    fn test_hard_interval_never_drops_below_one() {
        // A fresh problem graded hard stays at the 1-day interval.
        let problem = problem_with(0.5, 2.5, 0);

        let result =
            calculate_next_review(&problem, Performance::FourGrade(Grade::Hard), Utc::now());
        assert_eq!(result.interval, 1.0);
    }

    #[test]
    fn test_easy_boosts_interval_and_ease() {
        let problem = problem_with(6.0, 2.5, 2);

        let result =
            calculate_next_review(&problem, Performance::FourGrade(Grade::Easy), Utc::now());
        // floor(6 * 2.5 * 1.3) = 19
        assert_eq!(result.interval, 19.0);
        assert!((result.ease_factor - 2.65).abs() < 1e-9);
    }

    #[test]
    fn test_ease_floor_under_repeated_failure() {
        let mut problem = problem_with(10.0, 2.5, 5);

        for _ in 0..10 {
            let result =
                calculate_next_review(&problem, Performance::FourGrade(Grade::Again), Utc::now());
            problem.interval = result.interval;
            problem.ease_factor = result.ease_factor;
            problem.repetitions = result.repetitions;
        }

        assert!(problem.ease_factor >= MIN_EASE_FACTOR);
        assert!((problem.ease_factor - MIN_EASE_FACTOR).abs() < 1e-9);
    }

    #[test]
    fn test_pass_fail_failure_resets() {
        let problem = problem_with(12.0, 2.4, 4);

        let result = calculate_next_review(
            &problem,
            Performance::PassFail { passed: false },
            Utc::now(),
        );
        assert_eq!(result.interval, 1.0);
        assert!((result.ease_factor - 2.2).abs() < 1e-9);
        // Pass/fail always counts the attempt.
        assert_eq!(result.repetitions, 5);
    }

    #[test]
    fn test_pass_fail_success_multiplies_interval() {
        let now = Utc::now();
        let problem = problem_with(2.0, 2.0, 2);

        let result = calculate_next_review(&problem, Performance::PassFail { passed: true }, now);
        assert_eq!(result.interval, 4.0);
        assert!((result.ease_factor - 2.1).abs() < 1e-9);
        assert_eq!(result.next_review, now + Duration::days(4));
    }

    #[test]
    fn test_pass_fail_rounds_fractional_interval_up() {
        let now = Utc::now();
        let problem = problem_with(1.0, 2.3, 1);

        let result = calculate_next_review(&problem, Performance::PassFail { passed: true }, now);
        assert_eq!(result.interval, 2.3);
        // ceil(2.3) = 3 days out
        assert_eq!(result.next_review, now + Duration::days(3));
    }

    #[test]
    fn test_ease_ceiling_applies_only_to_pass_fail() {
        let problem = problem_with(6.0, 2.5, 2);

        let passed =
            calculate_next_review(&problem, Performance::PassFail { passed: true }, Utc::now());
        assert!((passed.ease_factor - 2.5).abs() < 1e-9);

        let easy = calculate_next_review(&problem, Performance::FourGrade(Grade::Easy), Utc::now());
        assert!(easy.ease_factor > 2.5);
    }

    #[test]
    fn test_long_good_streak_saturates_instead_of_overflowing() {
        let now = Utc::now();
        let mut problem = problem_with(1.0, 2.5, 0);

        // Enough consecutive passes to push the interval far past the
        // representable date range.
        for _ in 0..30 {
            let result = calculate_next_review(&problem, Performance::FourGrade(Grade::Good), now);
            assert!(result.next_review > now);
            problem.interval = result.interval;
            problem.ease_factor = result.ease_factor;
            problem.repetitions = result.repetitions;
            problem.next_review = result.next_review;
        }

        assert_eq!(problem.next_review, DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn test_long_pass_streak_saturates_instead_of_overflowing() {
        let now = Utc::now();
        let mut problem = problem_with(1.0, 2.5, 0);

        for _ in 0..40 {
            let result =
                calculate_next_review(&problem, Performance::PassFail { passed: true }, now);
            assert!(result.next_review > now);
            problem.interval = result.interval;
            problem.ease_factor = result.ease_factor;
            problem.repetitions = result.repetitions;
            problem.next_review = result.next_review;
        }

        assert_eq!(problem.next_review, DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn test_interval_grows_monotonically_under_good() {
        let now = Utc::now();
        let mut problem = problem_with(1.0, 2.5, 0);
        let mut previous_next_review = now;

        for i in 0..6 {
            let result = calculate_next_review(&problem, Performance::FourGrade(Grade::Good), now);
            assert!(result.next_review > previous_next_review);
            previous_next_review = result.next_review;

            match i {
                0 => assert_eq!(result.interval, 1.0),
                1 => assert_eq!(result.interval, 6.0),
                _ => assert!(result.interval > 6.0),
            }

            problem.interval = result.interval;
            problem.ease_factor = result.ease_factor;
            problem.repetitions = result.repetitions;
        }

        // After six good reviews the interval should be substantial.
        assert!(problem.interval > 30.0);
    }
}
