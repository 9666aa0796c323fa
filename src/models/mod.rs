pub mod lesson;
pub mod problem;
pub mod queue;
pub mod scheduler;
pub mod stats;

pub use lesson::Lesson;
pub use problem::{INITIAL_EASE_FACTOR, MIN_EASE_FACTOR, Problem, problem_id};
pub use queue::{DueEntry, due_queue, next_problem};
pub use scheduler::{Grade, Performance, ReviewResult, calculate_next_review};
pub use stats::{Stats, collect_stats};
