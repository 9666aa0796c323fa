//! Problem is one lesson tracked under spaced repetition. The scheduler treats
//! it as an opaque unit of review work; it carries no chess content of its own.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Hard floor for the ease factor. Keeps intervals from collapsing after a
/// long streak of failed reviews.
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Initial ease factor for a freshly added problem.
pub const INITIAL_EASE_FACTOR: f64 = 2.5;

/// Derives the stable problem id from a lesson title: lowercased, runs of
/// whitespace collapsed to underscores. The same title always yields the
/// same id, which is what makes catalog sync idempotent.
pub fn problem_id(lesson_title: &str) -> String {
    let normalized = lesson_title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    format!("problem_{}", normalized.to_lowercase())
}

/// One lesson under spaced repetition.
///
/// Serialized with camelCase field names so the payload matches what earlier
/// builds of the app wrote to the store.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub id: String,
    pub lesson_title: String,
    pub created_at: DateTime<Utc>,
    /// `None` means the problem has never been attempted.
    pub last_reviewed: Option<DateTime<Utc>>,
    /// The problem is due once today's calendar day reaches this day.
    pub next_review: DateTime<Utc>,
    /// Days until the next review after a pass. Whole-valued under the
    /// four-grade policy, real-valued under pass/fail.
    pub interval: f64,
    pub ease_factor: f64,
    pub repetitions: u32,
    #[serde(default)]
    pub error_count: u32,
    #[serde(default)]
    pub has_errors: bool,
}

impl Problem {
    /// Creates a problem with default scheduling parameters, due immediately.
    pub fn new(lesson_title: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: problem_id(lesson_title),
            lesson_title: lesson_title.to_string(),
            created_at: now,
            last_reviewed: None,
            next_review: now,
            interval: 1.0,
            ease_factor: INITIAL_EASE_FACTOR,
            repetitions: 0,
            error_count: 0,
            has_errors: false,
        }
    }
}
