use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use std::str::FromStr;

use crate::models::{Cadence, Completion, Habit, Progress, Strategy, WindowMark};
use crate::period;

const ANCHOR_FMT: &str = "%Y-%m-%d";

fn parse_anchor(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, ANCHOR_FMT).map_err(|e| anyhow!("Bad anchor '{}': {}", s, e))
}

fn anchor_str(d: NaiveDate) -> String {
    d.format(ANCHOR_FMT).to_string()
}

// ─── Habit repo ──────────────────────────────────────────────────────────────

pub struct HabitRepo;

impl HabitRepo {
    pub fn insert(
        conn: &Connection,
        name: &str,
        cadence: Cadence,
        strategy: Strategy,
    ) -> Result<i64> {
        conn.execute(
            "INSERT INTO habits (name, cadence, strategy) VALUES (?1, ?2, ?3)",
            params![name, cadence.as_str(), strategy.as_str()],
        )?;
        Ok(conn.last_insert_rowid())
    }

    pub fn get(conn: &Connection, id: i64) -> Result<Option<Habit>> {
        let row = conn
            .query_row(
                "SELECT id, name, cadence, strategy, created_at FROM habits WHERE id = ?1",
                params![id],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                    ))
                },
            )
            .optional()?;

        row.map(Self::from_row).transpose()
    }

    pub fn find_by_name(conn: &Connection, name: &str) -> Result<Option<Habit>> {
        let row = conn
            .query_row(
                "SELECT id, name, cadence, strategy, created_at
                 FROM habits WHERE name = ?1 COLLATE NOCASE",
                params![name],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                    ))
                },
            )
            .optional()?;

        row.map(Self::from_row).transpose()
    }

    pub fn list(conn: &Connection) -> Result<Vec<Habit>> {
        let mut stmt = conn.prepare(
            "SELECT id, name, cadence, strategy, created_at FROM habits ORDER BY name",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;

        let mut result = Vec::new();
        for r in rows {
            result.push(Self::from_row(r?)?);
        }
        Ok(result)
    }

    pub fn rename(conn: &Connection, id: i64, new_name: &str) -> Result<()> {
        let changed = conn.execute(
            "UPDATE habits SET name = ?1 WHERE id = ?2",
            params![new_name, id],
        )?;
        if changed == 0 {
            return Err(anyhow!("No habit with id {}", id));
        }
        Ok(())
    }

    fn from_row(row: (i64, String, String, String, String)) -> Result<Habit> {
        let (id, name, cadence, strategy, created_at) = row;
        Ok(Habit {
            id,
            name,
            cadence: Cadence::from_str(&cadence)?,
            strategy: Strategy::from_str(&strategy)?,
            created_at,
        })
    }
}

// ─── Completion repo ─────────────────────────────────────────────────────────

pub struct CompletionRepo;

impl CompletionRepo {
    pub fn get(conn: &Connection, habit_id: i64, anchor: NaiveDate) -> Result<Option<Completion>> {
        let row = conn
            .query_row(
                "SELECT id, done FROM completions WHERE habit_id = ?1 AND anchor = ?2",
                params![habit_id, anchor_str(anchor)],
                |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i32>(1)?)),
            )
            .optional()?;

        Ok(row.map(|(id, done)| Completion {
            id: Some(id),
            habit_id,
            anchor,
            done: done != 0,
        }))
    }

    /// Flip the completion for (habit, anchor), creating it done on first
    /// touch. The upsert keeps the read-modify-write inside one statement,
    /// so concurrent callers cannot produce duplicate rows. Returns the new
    /// done state.
    pub fn toggle(conn: &Connection, habit_id: i64, anchor: NaiveDate) -> Result<bool> {
        conn.execute(
            "INSERT INTO completions (habit_id, anchor, done) VALUES (?1, ?2, 1)
             ON CONFLICT(habit_id, anchor) DO UPDATE SET done = NOT done",
            params![habit_id, anchor_str(anchor)],
        )?;

        let done: i32 = conn.query_row(
            "SELECT done FROM completions WHERE habit_id = ?1 AND anchor = ?2",
            params![habit_id, anchor_str(anchor)],
            |row| row.get(0),
        )?;
        Ok(done != 0)
    }

    /// Anchors of done completions, newest first. Feeds the streak run.
    pub fn done_anchors_desc(conn: &Connection, habit_id: i64) -> Result<Vec<NaiveDate>> {
        let mut stmt = conn.prepare(
            "SELECT anchor FROM completions
             WHERE habit_id = ?1 AND done = 1
             ORDER BY anchor DESC",
        )?;

        let rows: Vec<String> = stmt
            .query_map(params![habit_id], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.iter().map(|s| parse_anchor(s)).collect()
    }

    pub fn history(conn: &Connection, habit_id: i64, limit: u32) -> Result<Vec<Completion>> {
        let mut stmt = conn.prepare(
            "SELECT id, anchor, done FROM completions
             WHERE habit_id = ?1 ORDER BY anchor DESC LIMIT ?2",
        )?;

        let rows = stmt.query_map(params![habit_id, limit], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i32>(2)?,
            ))
        })?;

        let mut result = Vec::new();
        for r in rows {
            let (id, anchor, done) = r?;
            result.push(Completion {
                id: Some(id),
                habit_id,
                anchor: parse_anchor(&anchor)?,
                done: done != 0,
            });
        }
        Ok(result)
    }
}

// ─── Stats repo ──────────────────────────────────────────────────────────────

/// Everything the list, detail, and dashboard views need for one habit.
#[derive(Debug, Clone)]
pub struct HabitStatus {
    pub anchor: NaiveDate,
    pub today_done: bool,
    pub streak: u32,
    pub marks: Vec<WindowMark>,
    pub progress: Progress,
}

pub struct StatsRepo;

impl StatsRepo {
    /// Assemble the derived view of a habit as of `today`: current anchor,
    /// trailing window, consecutive run, and the grading verdict.
    pub fn habit_status(
        conn: &Connection,
        habit: &Habit,
        today: NaiveDate,
        window_len: u32,
        flexible_threshold: f64,
    ) -> Result<HabitStatus> {
        let anchor = period::anchor_for(habit.cadence, today);
        let done_anchors = CompletionRepo::done_anchors_desc(conn, habit.id)?;

        let anchors = period::window_anchors(habit.cadence, anchor, window_len);
        let marks = period::window_marks(&anchors, &done_anchors);
        let progress = period::evaluate(&marks, habit.strategy, flexible_threshold);

        Ok(HabitStatus {
            anchor,
            today_done: done_anchors.contains(&anchor),
            streak: period::consecutive_run(&done_anchors),
            marks,
            progress,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use tempfile::TempDir;

    fn open_db() -> (TempDir, Connection) {
        let dir = TempDir::new().unwrap();
        let conn = Connection::open(dir.path().join("stride.db")).unwrap();
        run_migrations(&conn).unwrap();
        (dir, conn)
    }

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn insert_and_find_by_name_is_case_insensitive() {
        let (_dir, conn) = open_db();
        let id = HabitRepo::insert(&conn, "Read", Cadence::Daily, Strategy::Strict).unwrap();

        let habit = HabitRepo::find_by_name(&conn, "read").unwrap().unwrap();
        assert_eq!(habit.id, id);
        assert_eq!(habit.cadence, Cadence::Daily);
        assert_eq!(habit.strategy, Strategy::Strict);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let (_dir, conn) = open_db();
        HabitRepo::insert(&conn, "Run", Cadence::Daily, Strategy::Flexible).unwrap();
        assert!(HabitRepo::insert(&conn, "Run", Cadence::Daily, Strategy::Flexible).is_err());
    }

    #[test]
    fn list_orders_by_name() {
        let (_dir, conn) = open_db();
        HabitRepo::insert(&conn, "Stretch", Cadence::Daily, Strategy::Strict).unwrap();
        HabitRepo::insert(&conn, "Journal", Cadence::Weekly, Strategy::Flexible).unwrap();

        let names: Vec<String> = HabitRepo::list(&conn)
            .unwrap()
            .into_iter()
            .map(|h| h.name)
            .collect();
        assert_eq!(names, vec!["Journal", "Stretch"]);
    }

    #[test]
    fn rename_updates_and_missing_id_errors() {
        let (_dir, conn) = open_db();
        let id = HabitRepo::insert(&conn, "Gym", Cadence::Weekly, Strategy::Strict).unwrap();

        HabitRepo::rename(&conn, id, "Lift").unwrap();
        assert_eq!(HabitRepo::get(&conn, id).unwrap().unwrap().name, "Lift");
        assert!(HabitRepo::rename(&conn, id + 99, "Nope").is_err());
    }

    #[test]
    fn toggle_creates_done_then_flips() {
        let (_dir, conn) = open_db();
        let id = HabitRepo::insert(&conn, "Read", Cadence::Daily, Strategy::Strict).unwrap();
        let anchor = d("2025-03-10");

        assert!(CompletionRepo::get(&conn, id, anchor).unwrap().is_none());
        assert!(CompletionRepo::toggle(&conn, id, anchor).unwrap());
        assert!(!CompletionRepo::toggle(&conn, id, anchor).unwrap());
        assert!(CompletionRepo::toggle(&conn, id, anchor).unwrap());

        // still a single row for the anchor
        let history = CompletionRepo::history(&conn, id, 10).unwrap();
        assert_eq!(history.len(), 1);
        assert!(history[0].done);
    }

    #[test]
    fn done_anchors_come_back_newest_first() {
        let (_dir, conn) = open_db();
        let id = HabitRepo::insert(&conn, "Read", Cadence::Daily, Strategy::Strict).unwrap();

        for day in ["2025-03-08", "2025-03-10", "2025-03-09"] {
            CompletionRepo::toggle(&conn, id, d(day)).unwrap();
        }

        let anchors = CompletionRepo::done_anchors_desc(&conn, id).unwrap();
        assert_eq!(anchors, vec![d("2025-03-10"), d("2025-03-09"), d("2025-03-08")]);

        // flipped back off — must not appear in the done feed
        CompletionRepo::toggle(&conn, id, d("2025-03-09")).unwrap();
        let anchors = CompletionRepo::done_anchors_desc(&conn, id).unwrap();
        assert_eq!(anchors, vec![d("2025-03-10"), d("2025-03-08")]);
    }

    #[test]
    fn habit_status_grades_a_daily_window() {
        let (_dir, conn) = open_db();
        let id = HabitRepo::insert(&conn, "Read", Cadence::Daily, Strategy::Flexible).unwrap();
        let habit = HabitRepo::get(&conn, id).unwrap().unwrap();

        // 5 of the 7 trailing days done, consecutive from today
        for day in ["2025-03-10", "2025-03-09", "2025-03-08", "2025-03-07", "2025-03-06"] {
            CompletionRepo::toggle(&conn, id, d(day)).unwrap();
        }

        let status = StatsRepo::habit_status(&conn, &habit, d("2025-03-10"), 7, 0.70).unwrap();
        assert_eq!(status.anchor, d("2025-03-10"));
        assert!(status.today_done);
        assert_eq!(status.streak, 5);
        assert_eq!(status.progress.done_count, 5);
        assert_eq!(status.progress.total, 7);
        assert_eq!(status.progress.percent, 71);
        assert!(status.progress.passed);
    }

    #[test]
    fn habit_status_for_weekly_habit_uses_monday_anchor() {
        let (_dir, conn) = open_db();
        let id = HabitRepo::insert(&conn, "Review", Cadence::Weekly, Strategy::Strict).unwrap();
        let habit = HabitRepo::get(&conn, id).unwrap().unwrap();

        // mark the current and previous week
        CompletionRepo::toggle(&conn, id, d("2025-03-10")).unwrap();
        CompletionRepo::toggle(&conn, id, d("2025-03-03")).unwrap();

        // Wednesday resolves to the Monday anchor
        let status = StatsRepo::habit_status(&conn, &habit, d("2025-03-12"), 4, 0.70).unwrap();
        assert_eq!(status.anchor, d("2025-03-10"));
        assert!(status.today_done);
        assert_eq!(status.streak, 2);
        assert_eq!(status.progress.done_count, 2);
        assert_eq!(status.progress.total, 4);
        assert!(!status.progress.passed);
    }
}
