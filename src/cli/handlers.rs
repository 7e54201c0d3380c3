use anyhow::{anyhow, Result};
use chrono::{Local, NaiveDate};
use rusqlite::Connection;
use serde::Serialize;
use std::str::FromStr;

use crate::config::AppConfig;
use crate::db::repository::{CompletionRepo, HabitRepo, HabitStatus, StatsRepo};
use crate::models::{Cadence, Habit, Strategy};
use crate::utils::format::{anchor_label, progress_bar, window_dots};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const TEAL: &str = "\x1b[38;2;78;154;150m";

fn find_habit(conn: &Connection, name: &str) -> Result<Habit> {
    HabitRepo::find_by_name(conn, name)?
        .ok_or_else(|| anyhow!("No habit named '{}'. See `stride list`", name))
}

fn status_for(conn: &Connection, config: &AppConfig, habit: &Habit, today: NaiveDate) -> Result<HabitStatus> {
    StatsRepo::habit_status(
        conn,
        habit,
        today,
        config.grading.window_len(habit.cadence),
        config.grading.flexible_threshold,
    )
}

// ─── Add ─────────────────────────────────────────────────────────────────────

pub fn handle_add(conn: &Connection, name: &str, cadence: &str, strategy: &str) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(anyhow!("Habit name cannot be empty"));
    }
    let cadence = Cadence::from_str(cadence)?;
    let strategy = Strategy::from_str(strategy)?;

    if HabitRepo::find_by_name(conn, name)?.is_some() {
        return Err(anyhow!("A habit named '{}' already exists", name));
    }

    HabitRepo::insert(conn, name, cadence, strategy)?;
    log::info!("created habit '{}' ({}, {})", name, cadence.as_str(), strategy.as_str());
    println_colored!(
        GREEN,
        "  ✓ Added '{}' — {} habit, {} grading",
        name,
        cadence.as_str(),
        strategy.as_str()
    );
    Ok(())
}

// ─── List ────────────────────────────────────────────────────────────────────

pub fn handle_list(conn: &Connection, config: &AppConfig) -> Result<()> {
    let habits = HabitRepo::list(conn)?;
    if habits.is_empty() {
        println_colored!(DIM, "  No habits yet. Try `stride add \"Read 10 pages\"`");
        return Ok(());
    }

    let today = Local::now().date_naive();
    println!();
    println_colored!(TEAL, "  Habits — {}", today.format("%Y-%m-%d"));
    println!();

    for habit in &habits {
        let status = status_for(conn, config, habit, today)?;
        let verdict = if status.progress.passed {
            format!("{}pass\x1b[0m", GREEN)
        } else {
            format!("{}fail\x1b[0m", RED)
        };
        let today_icon = if status.today_done {
            format!("{}●\x1b[0m", GREEN)
        } else {
            format!("{}○\x1b[0m", DIM)
        };

        println!(
            "  {} {:<20} {:<7} {:<9} {}  {:>3}%  {}  streak {}",
            today_icon,
            habit.name,
            habit.cadence.as_str(),
            habit.strategy.as_str(),
            window_dots(&status.marks),
            status.progress.percent,
            verdict,
            status.streak
        );
    }
    println!();
    Ok(())
}

// ─── Toggle ──────────────────────────────────────────────────────────────────

pub fn handle_toggle(conn: &Connection, config: &AppConfig, name: &str) -> Result<()> {
    let habit = find_habit(conn, name)?;
    let today = Local::now().date_naive();
    let anchor = crate::period::anchor_for(habit.cadence, today);

    let now_done = CompletionRepo::toggle(conn, habit.id, anchor)?;
    log::debug!("toggled '{}' at {} -> done={}", habit.name, anchor, now_done);
    let status = status_for(conn, config, &habit, today)?;

    if now_done {
        if status.streak > 1 {
            println_colored!(
                GREEN,
                "  ✓ {} done for {} — 🔥 {}-period streak",
                habit.name,
                anchor_label(habit.cadence, anchor),
                status.streak
            );
        } else {
            println_colored!(
                GREEN,
                "  ✓ {} done for {} — streak starts at 1",
                habit.name,
                anchor_label(habit.cadence, anchor)
            );
        }
    } else {
        println_colored!(
            AMBER,
            "  ○ {} unmarked for {} — do it later today",
            habit.name,
            anchor_label(habit.cadence, anchor)
        );
    }
    Ok(())
}

// ─── Show ────────────────────────────────────────────────────────────────────

pub fn handle_show(conn: &Connection, config: &AppConfig, name: &str) -> Result<()> {
    let habit = find_habit(conn, name)?;
    let today = Local::now().date_naive();
    let status = status_for(conn, config, &habit, today)?;

    println!();
    println_colored!(BOLD, "  {}", habit.name);
    println_colored!(
        DIM,
        "  {} · {} grading · since {}",
        habit.cadence.display_name(),
        habit.strategy.as_str(),
        habit.created_at
    );
    println!();

    let current = CompletionRepo::get(conn, habit.id, status.anchor)?;
    let state = match &current {
        Some(c) if c.done => format!("{}done\x1b[0m", GREEN),
        Some(_) => format!("{}unmarked\x1b[0m", AMBER),
        None => format!("{}open\x1b[0m", DIM),
    };
    println!(
        "  Current period:  {}  {}",
        anchor_label(habit.cadence, status.anchor),
        state
    );
    println!("  Streak:          {} periods", status.streak);
    println!();

    let window_label = match habit.cadence {
        Cadence::Daily => format!("last {} days", status.marks.len()),
        Cadence::Weekly => format!("last {} weeks", status.marks.len()),
    };
    println!("  Window ({}, newest first)", window_label);
    for mark in &status.marks {
        let icon = if mark.done {
            format!("{}●\x1b[0m", GREEN)
        } else {
            format!("{}○\x1b[0m", DIM)
        };
        println!("    {}  {}", icon, anchor_label(habit.cadence, mark.anchor));
    }
    println!();

    let p = &status.progress;
    let bar = progress_bar(p.done_count, p.total, 12);
    if p.passed {
        println_colored!(
            GREEN,
            "  {}  {}/{} ({}%) — passing",
            bar, p.done_count, p.total, p.percent
        );
    } else {
        println_colored!(
            RED,
            "  {}  {}/{} ({}%) — not passing",
            bar, p.done_count, p.total, p.percent
        );
    }

    let history = CompletionRepo::history(conn, habit.id, config.ui.history_limit)?;
    if !history.is_empty() {
        println!();
        println_colored!(DIM, "  History (last {})", history.len());
        for c in &history {
            let state = if c.done { "done" } else { "skipped" };
            println!("    {}  {}", c.anchor.format("%Y-%m-%d"), state);
        }
    }
    println!();
    Ok(())
}

// ─── Rename ──────────────────────────────────────────────────────────────────

pub fn handle_rename(conn: &Connection, name: &str, new_name: &str) -> Result<()> {
    let new_name = new_name.trim();
    if new_name.is_empty() {
        return Err(anyhow!("New name cannot be empty"));
    }
    let habit = find_habit(conn, name)?;
    if HabitRepo::find_by_name(conn, new_name)?.is_some_and(|h| h.id != habit.id) {
        return Err(anyhow!("A habit named '{}' already exists", new_name));
    }

    HabitRepo::rename(conn, habit.id, new_name)?;
    println_colored!(GREEN, "  ✓ Renamed '{}' to '{}'", habit.name, new_name);
    Ok(())
}

// ─── Stats ───────────────────────────────────────────────────────────────────

pub fn handle_stats(conn: &Connection, config: &AppConfig, week: bool) -> Result<()> {
    let habits = HabitRepo::list(conn)?;
    let today = Local::now().date_naive();

    let mut passing = 0u32;
    let mut best_streak: Option<(&Habit, u32)> = None;
    let mut statuses = Vec::new();

    for habit in &habits {
        let status = status_for(conn, config, habit, today)?;
        if status.progress.passed {
            passing += 1;
        }
        if best_streak.is_none_or(|(_, s)| status.streak > s) {
            best_streak = Some((habit, status.streak));
        }
        statuses.push(status);
    }

    println!();
    println_colored!(TEAL, "  Statistics");
    println!();
    println_colored!(
        BOLD,
        "  Habits:   {} total  |  {} passing",
        habits.len(),
        passing
    );
    match best_streak {
        Some((habit, streak)) if streak > 0 => {
            println_colored!(GREEN, "  Best run: {} — {} periods", habit.name, streak);
        }
        _ => {
            println_colored!(DIM, "  Best run: none yet");
        }
    }

    if week {
        println!();
        println_colored!(DIM, "  Windows (● done, ○ open, newest first)");
        println!();
        for (habit, status) in habits.iter().zip(&statuses) {
            println!("  {:<20} {}", habit.name, window_dots(&status.marks));
        }
    }

    println!();
    Ok(())
}

// ─── Export ──────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct HabitSummary {
    name: String,
    cadence: &'static str,
    strategy: &'static str,
    streak: u32,
    passed: bool,
    done_count: u32,
    total: u32,
    percent: u32,
}

#[derive(Serialize)]
struct ExportSummary {
    date: String,
    habits: Vec<HabitSummary>,
}

pub fn handle_export(conn: &Connection, config: &AppConfig, json: bool) -> Result<()> {
    let habits = HabitRepo::list(conn)?;
    let today = Local::now().date_naive();
    let today_str = today.format("%Y-%m-%d").to_string();

    let mut summaries = Vec::new();
    for habit in &habits {
        let status = status_for(conn, config, habit, today)?;
        summaries.push(HabitSummary {
            name: habit.name.clone(),
            cadence: habit.cadence.as_str(),
            strategy: habit.strategy.as_str(),
            streak: status.streak,
            passed: status.progress.passed,
            done_count: status.progress.done_count,
            total: status.progress.total,
            percent: status.progress.percent,
        });
    }

    if json {
        let summary = ExportSummary {
            date: today_str,
            habits: summaries,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("# stride — Summary");
    println!("# {}", today_str);
    println!();
    for s in &summaries {
        let bar = progress_bar(s.done_count, s.total, 10);
        let verdict = if s.passed { "pass" } else { "fail" };
        println!(
            "  {:<20} {:<7} {:<9} {}  {}/{} ({:>3}%)  {}  streak {}",
            s.name, s.cadence, s.strategy, bar, s.done_count, s.total, s.percent, verdict, s.streak
        );
    }
    Ok(())
}
