//! Catalog descriptor consumed by sync. The course catalog supplies these;
//! only the title matters to the scheduler.
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Lesson {
    pub title: String,
}

impl Lesson {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
        }
    }
}
