use chrono::NaiveDate;

use crate::models::{Cadence, WindowMark};

/// Human label for an anchor: the day itself for daily habits, the week it
/// opens for weekly ones.
pub fn anchor_label(cadence: Cadence, anchor: NaiveDate) -> String {
    match cadence {
        Cadence::Daily => anchor.format("%a %Y-%m-%d").to_string(),
        Cadence::Weekly => format!("week of {}", anchor.format("%Y-%m-%d")),
    }
}

/// Create a simple ASCII progress bar
pub fn progress_bar(filled: u32, total: u32, width: usize) -> String {
    if total == 0 {
        return "░".repeat(width);
    }
    let ratio = (filled as f64 / total as f64).min(1.0);
    let filled_count = (ratio * width as f64).round() as usize;
    let empty_count = width.saturating_sub(filled_count);
    format!("{}{}", "█".repeat(filled_count), "░".repeat(empty_count))
}

/// Dot strip for a window, newest-first marks as stored.
pub fn window_dots(marks: &[WindowMark]) -> String {
    marks
        .iter()
        .map(|m| if m.done { "●" } else { "○" })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_is_empty_for_zero_total() {
        assert_eq!(progress_bar(0, 0, 4), "░░░░");
    }

    #[test]
    fn bar_fills_proportionally() {
        assert_eq!(progress_bar(2, 4, 4), "██░░");
        assert_eq!(progress_bar(4, 4, 4), "████");
    }

    #[test]
    fn dots_mark_done_slots() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let marks = [
            WindowMark { anchor: day, done: true },
            WindowMark { anchor: day, done: false },
        ];
        assert_eq!(window_dots(&marks), "● ○");
    }

    #[test]
    fn weekly_label_names_the_week() {
        let monday = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert_eq!(anchor_label(Cadence::Weekly, monday), "week of 2025-03-10");
        assert_eq!(anchor_label(Cadence::Daily, monday), "Mon 2025-03-10");
    }
}
