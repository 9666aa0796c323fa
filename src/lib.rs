pub mod database;
pub mod models;
pub mod service;

pub use models::{Grade, Lesson, Performance, Problem, Stats};
pub use service::SpacedRepetitionService;
