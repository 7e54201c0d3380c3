use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One slot of the trailing window: the anchor and whether a done
/// completion exists for it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WindowMark {
    pub anchor: NaiveDate,
    pub done: bool,
}

/// Grading verdict over a window. Derived, never stored.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Progress {
    pub passed: bool,
    pub done_count: u32,
    pub total: u32,
    pub percent: u32,
}
