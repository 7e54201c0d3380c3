//! Period arithmetic and grading. Pure functions over `NaiveDate`, no I/O.
//!
//! Every date stored for a habit is an anchor: the day itself for daily
//! habits, the Monday of the week for weekly ones. Streaks and pass/fail
//! grading are computed here from anchor lists the repository supplies.

use chrono::{Datelike, Duration, NaiveDate};

use crate::models::{Cadence, Progress, Strategy, WindowMark};

/// Canonical anchor for `date` under the given cadence. Daily habits anchor
/// on the day itself; weekly habits on the Monday on or before `date`.
pub fn anchor_for(cadence: Cadence, date: NaiveDate) -> NaiveDate {
    match cadence {
        Cadence::Daily => date,
        Cadence::Weekly => date - Duration::days(date.weekday().num_days_from_monday() as i64),
    }
}

/// The trailing window of `len` anchors ending at `today_anchor`, newest
/// first, spaced one cadence step apart.
pub fn window_anchors(cadence: Cadence, today_anchor: NaiveDate, len: u32) -> Vec<NaiveDate> {
    let step = cadence.step_days();
    (0..len as i64)
        .map(|i| today_anchor - Duration::days(i * step))
        .collect()
}

/// Length of the unbroken run at the head of a newest-first list of done
/// anchors. The step is inferred from the first gap and only a 1-day or
/// 7-day step is accepted; anything else falls back to 1 day, so an
/// irregular first gap breaks the run immediately.
pub fn consecutive_run(done_anchors_desc: &[NaiveDate]) -> u32 {
    if done_anchors_desc.is_empty() {
        return 0;
    }
    if done_anchors_desc.len() == 1 {
        return 1;
    }

    let first_gap = (done_anchors_desc[0] - done_anchors_desc[1]).num_days();
    let step = if first_gap == 1 || first_gap == 7 {
        first_gap
    } else {
        1
    };

    let mut run = 1;
    for pair in done_anchors_desc.windows(2) {
        if (pair[0] - pair[1]).num_days() == step {
            run += 1;
        } else {
            break;
        }
    }
    run
}

/// Pair each window anchor with whether a done completion exists for it.
/// `done_anchors` may be in any order; the output follows `anchors`.
pub fn window_marks(anchors: &[NaiveDate], done_anchors: &[NaiveDate]) -> Vec<WindowMark> {
    anchors
        .iter()
        .map(|&anchor| WindowMark {
            anchor,
            done: done_anchors.contains(&anchor),
        })
        .collect()
}

/// Grade a window. Strict passes only on a full window; flexible passes at
/// or above `flexible_threshold` (a ratio, e.g. 0.70).
pub fn evaluate(marks: &[WindowMark], strategy: Strategy, flexible_threshold: f64) -> Progress {
    let total = marks.len() as u32;
    let done_count = marks.iter().filter(|m| m.done).count() as u32;

    if total == 0 {
        return Progress::default();
    }

    let ratio = done_count as f64 / total as f64;
    let passed = match strategy {
        Strategy::Strict => done_count == total,
        Strategy::Flexible => ratio >= flexible_threshold,
    };

    Progress {
        passed,
        done_count,
        total,
        percent: (ratio * 100.0).round() as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn marks(done: u32, total: u32) -> Vec<WindowMark> {
        let today = d("2025-03-10");
        (0..total)
            .map(|i| WindowMark {
                anchor: today - Duration::days(i as i64),
                done: i < done,
            })
            .collect()
    }

    #[test]
    fn daily_anchor_is_identity() {
        for offset in 0..14 {
            let date = d("2025-03-01") + Duration::days(offset);
            assert_eq!(anchor_for(Cadence::Daily, date), date);
        }
    }

    #[test]
    fn weekly_anchor_is_monday_on_or_before() {
        for offset in 0..14 {
            let date = d("2025-03-01") + Duration::days(offset);
            let anchor = anchor_for(Cadence::Weekly, date);
            assert_eq!(anchor.weekday(), Weekday::Mon);
            assert!(anchor <= date);
            assert!((date - anchor).num_days() < 7);
        }
    }

    #[test]
    fn weekly_anchor_of_monday_is_itself() {
        let monday = d("2025-03-10");
        assert_eq!(monday.weekday(), Weekday::Mon);
        assert_eq!(anchor_for(Cadence::Weekly, monday), monday);
    }

    #[test]
    fn daily_window_is_seven_consecutive_days() {
        let anchors = window_anchors(Cadence::Daily, d("2025-03-10"), 7);
        assert_eq!(anchors.len(), 7);
        assert_eq!(anchors[0], d("2025-03-10"));
        assert_eq!(anchors[6], d("2025-03-04"));
        for pair in anchors.windows(2) {
            assert_eq!((pair[0] - pair[1]).num_days(), 1);
        }
    }

    #[test]
    fn weekly_window_is_four_mondays_seven_days_apart() {
        let anchors = window_anchors(Cadence::Weekly, d("2025-03-10"), 4);
        assert_eq!(anchors.len(), 4);
        for anchor in &anchors {
            assert_eq!(anchor.weekday(), Weekday::Mon);
        }
        for pair in anchors.windows(2) {
            assert_eq!((pair[0] - pair[1]).num_days(), 7);
        }
    }

    #[test]
    fn run_of_empty_is_zero_and_single_is_one() {
        assert_eq!(consecutive_run(&[]), 0);
        assert_eq!(consecutive_run(&[d("2025-03-10")]), 1);
    }

    #[test]
    fn run_breaks_at_first_irregular_gap() {
        // days 10, 9, 8, 5 — the 8→5 gap breaks the run at length 3
        let anchors = [d("2025-03-10"), d("2025-03-09"), d("2025-03-08"), d("2025-03-05")];
        assert_eq!(consecutive_run(&anchors), 3);
    }

    #[test]
    fn run_counts_weekly_steps() {
        let anchors = [d("2025-03-10"), d("2025-03-03"), d("2025-02-24")];
        assert_eq!(consecutive_run(&anchors), 3);
    }

    #[test]
    fn irregular_first_gap_defaults_to_daily_step() {
        // first gap of 3 days is neither 1 nor 7, so the run stops at 1
        let anchors = [d("2025-03-10"), d("2025-03-07"), d("2025-03-06")];
        assert_eq!(consecutive_run(&anchors), 1);
    }

    #[test]
    fn strict_requires_full_window() {
        let p = evaluate(&marks(6, 7), Strategy::Strict, 0.70);
        assert!(!p.passed);
        assert_eq!(p.percent, 86);

        let p = evaluate(&marks(7, 7), Strategy::Strict, 0.70);
        assert!(p.passed);
        assert_eq!(p.percent, 100);
    }

    #[test]
    fn flexible_passes_at_threshold() {
        // 5/7 = 71.4% passes; 4/7 = 57.1% fails
        let p = evaluate(&marks(5, 7), Strategy::Flexible, 0.70);
        assert!(p.passed);
        assert_eq!(p.percent, 71);

        let p = evaluate(&marks(4, 7), Strategy::Flexible, 0.70);
        assert!(!p.passed);
        assert_eq!(p.percent, 57);
    }

    #[test]
    fn empty_window_grades_to_zero() {
        let p = evaluate(&[], Strategy::Flexible, 0.70);
        assert!(!p.passed);
        assert_eq!(p.done_count, 0);
        assert_eq!(p.total, 0);
        assert_eq!(p.percent, 0);
    }

    #[test]
    fn window_marks_follow_anchor_order() {
        let anchors = window_anchors(Cadence::Daily, d("2025-03-10"), 3);
        let done = vec![d("2025-03-08"), d("2025-03-10")];
        let marked = window_marks(&anchors, &done);
        assert_eq!(
            marked.iter().map(|m| m.done).collect::<Vec<_>>(),
            vec![true, false, true]
        );
    }
}
