//! The spaced-repetition service: owns the problem set, applies the
//! scheduling formulas, and keeps the durable store in sync.
//!
//! One instance is constructed at startup and handed to the UI layer. The UI
//! only reads derived views (stats, due queue); every mutation goes through
//! this service. The in-memory set is authoritative for the session: a failed
//! save is logged and the session continues.

use crate::database::db;
use crate::models::{
    Lesson, Performance, Problem, Stats, calculate_next_review, collect_stats, due_queue,
    next_problem, problem_id,
};
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use tracing::{debug, info, warn};

/// Persisted envelope around the problem set.
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredData {
    problems: Vec<Problem>,
    last_updated: DateTime<Utc>,
}

pub struct SpacedRepetitionService {
    conn: Connection,
    problems: Vec<Problem>,
}

impl SpacedRepetitionService {
    /// Creates a service backed by `conn` and loads any persisted problem set.
    pub fn new(conn: Connection) -> Self {
        let mut service = Self {
            conn,
            problems: Vec::new(),
        };
        service.load_from_storage();
        service
    }

    /// Read-only view of the owned problem set, in insertion order.
    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    /// Loads the problem set from the durable store. A missing, unreadable,
    /// or unparsable value loads as the empty set.
    pub fn load_from_storage(&mut self) {
        let stored = match db::read_value(&self.conn, db::STORAGE_KEY) {
            Ok(stored) => stored,
            Err(e) => {
                warn!("failed to read problem set from storage: {e}");
                self.problems = Vec::new();
                return;
            }
        };

        self.problems = match stored.as_deref() {
            Some(raw) => parse_problems(raw),
            None => Vec::new(),
        };
        debug!("loaded {} problems from storage", self.problems.len());
    }

    /// Writes the full problem set to the durable store. A failed write is
    /// logged and otherwise ignored: the in-memory set stays authoritative.
    pub fn save_to_storage(&self) {
        let data = StoredData {
            problems: self.problems.clone(),
            last_updated: Utc::now(),
        };

        let payload = match serde_json::to_string(&data) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("failed to serialize problem set: {e}");
                return;
            }
        };

        if let Err(e) = db::write_value(&self.conn, db::STORAGE_KEY, &payload) {
            warn!("failed to save problem set to storage: {e}");
        } else {
            debug!("saved {} problems to storage", self.problems.len());
        }
    }

    /// Reconciles the lesson catalog with the problem set: every lesson whose
    /// title is not yet tracked gets a fresh record appended. Existing records
    /// are never touched, so repeated syncs are idempotent.
    pub fn sync_from_catalog(&mut self, lessons: &[Lesson]) {
        let now = Utc::now();
        let mut added = 0;

        for lesson in lessons {
            let id = problem_id(&lesson.title);
            if !self.problems.iter().any(|p| p.id == id) {
                self.problems.push(Problem::new(&lesson.title, now));
                added += 1;
            }
        }

        if added > 0 {
            info!("catalog sync added {added} new problems");
            self.save_to_storage();
        }
    }

    /// Adds a single lesson to the repetition set. Returns false if a problem
    /// with that title already exists.
    pub fn add_problem(&mut self, lesson_title: &str) -> bool {
        if self.is_in_repetition(lesson_title) {
            debug!("problem already tracked, ignoring: {lesson_title:?}");
            return false;
        }

        self.problems.push(Problem::new(lesson_title, Utc::now()));
        self.save_to_storage();
        info!("added problem: {lesson_title:?}");
        true
    }

    /// Removes the problem with the given title. Returns false if not found.
    pub fn remove_problem(&mut self, lesson_title: &str) -> bool {
        let before = self.problems.len();
        self.problems.retain(|p| p.lesson_title != lesson_title);

        if self.problems.len() == before {
            debug!("problem not found, nothing removed: {lesson_title:?}");
            return false;
        }

        self.save_to_storage();
        info!("removed problem: {lesson_title:?}");
        true
    }

    pub fn is_in_repetition(&self, lesson_title: &str) -> bool {
        self.problems.iter().any(|p| p.lesson_title == lesson_title)
    }

    /// Records one completed review attempt and reschedules the problem.
    /// Returns false if no problem with that title is tracked.
    ///
    /// The time spent is part of the completion event but does not feed the
    /// scheduling formulas.
    pub fn record_completion(
        &mut self,
        lesson_title: &str,
        performance: Performance,
        had_errors: bool,
        _time_spent_secs: u64,
    ) -> bool {
        let now = Utc::now();

        let Some(problem) = self
            .problems
            .iter_mut()
            .find(|p| p.lesson_title == lesson_title)
        else {
            warn!("completion for untracked problem ignored: {lesson_title:?}");
            return false;
        };

        let result = calculate_next_review(problem, performance, now);
        problem.interval = result.interval;
        problem.ease_factor = result.ease_factor;
        problem.repetitions = result.repetitions;
        problem.next_review = result.next_review;
        problem.last_reviewed = Some(now);

        if had_errors {
            problem.error_count += 1;
            problem.has_errors = true;
        } else {
            problem.has_errors = false;
        }

        debug!(
            "recorded completion for {lesson_title:?}: interval {} days, next review {}",
            problem.interval, problem.next_review
        );
        self.save_to_storage();
        true
    }

    /// Summary counts against the current UTC day, recomputed per call.
    pub fn get_stats(&self) -> Stats {
        collect_stats(&self.problems, Utc::now().date_naive())
    }

    /// Problems due on or before `now`'s calendar day, most urgent first.
    pub fn due_queue(&self, now: DateTime<Utc>) -> Vec<crate::models::DueEntry<'_>> {
        due_queue(&self.problems, now)
    }

    /// The most urgent due problem, or `None` when the queue is empty.
    pub fn next_problem(&self, now: DateTime<Utc>) -> Option<&Problem> {
        next_problem(&self.problems, now)
    }

    /// Clears the in-memory set and removes the persisted value.
    pub fn reset(&mut self) {
        self.problems.clear();
        if let Err(e) = db::delete_value(&self.conn, db::STORAGE_KEY) {
            warn!("failed to clear persisted problem set: {e}");
        }
        info!("spaced repetition data reset");
    }
}

/// Parses a persisted payload. Accepts the current envelope shape and the
/// bare-array shape written by earlier builds; anything else is treated as an
/// empty set.
fn parse_problems(raw: &str) -> Vec<Problem> {
    if let Ok(data) = serde_json::from_str::<StoredData>(raw) {
        return data.problems;
    }
    if let Ok(problems) = serde_json::from_str::<Vec<Problem>>(raw) {
        return problems;
    }
    warn!("unparsable problem set payload, starting with an empty set");
    Vec::new()
}
