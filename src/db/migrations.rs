use anyhow::Result;
use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS habits (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL UNIQUE,
            cadence     TEXT NOT NULL CHECK(cadence IN ('daily','weekly')),
            strategy    TEXT NOT NULL CHECK(strategy IN ('strict','flexible')),
            created_at  TEXT DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS completions (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            habit_id    INTEGER NOT NULL REFERENCES habits(id),
            anchor      TEXT NOT NULL,
            done        INTEGER NOT NULL DEFAULT 1,
            created_at  TEXT DEFAULT (datetime('now')),
            UNIQUE(habit_id, anchor)
        );

        CREATE INDEX IF NOT EXISTS idx_completions_habit_done
            ON completions(habit_id, done, anchor);
    ",
    )?;
    Ok(())
}
