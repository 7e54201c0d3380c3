use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row per (habit, anchor). Created on the first toggle with done=true,
/// flipped on later toggles, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Completion {
    pub id: Option<i64>,
    pub habit_id: i64,
    pub anchor: NaiveDate,
    pub done: bool,
}
