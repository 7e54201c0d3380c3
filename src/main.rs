mod cli;
mod config;
mod db;
mod models;
mod period;
mod tui;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;
use rusqlite::Connection;

use cli::args::{Cli, Commands};
use cli::handlers;
use config::AppConfig;
use db::migrations::run_migrations;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Loading config")?;

    // Write the defaults on first run so the file is there to edit
    if !AppConfig::config_path()?.exists() {
        config.save().context("Writing default config")?;
    }

    // Ensure data directory exists and open DB
    AppConfig::ensure_data_dir()?;
    let db_path = AppConfig::db_path()?;
    let conn = Connection::open(&db_path)
        .with_context(|| format!("Opening database at {:?}", db_path))?;

    // Enable WAL mode for better concurrent access
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;

    // Run migrations on every startup
    run_migrations(&conn)?;

    match cli.command {
        Some(Commands::Add {
            name,
            cadence,
            strategy,
        }) => {
            handlers::handle_add(&conn, &name, &cadence, &strategy)?;
        }
        Some(Commands::List) => {
            handlers::handle_list(&conn, &config)?;
        }
        Some(Commands::Toggle { name }) => {
            handlers::handle_toggle(&conn, &config, &name)?;
        }
        Some(Commands::Show { name }) => {
            handlers::handle_show(&conn, &config, &name)?;
        }
        Some(Commands::Rename { name, new_name }) => {
            handlers::handle_rename(&conn, &name, &new_name)?;
        }
        Some(Commands::Stats { week }) => {
            handlers::handle_stats(&conn, &config, week)?;
        }
        Some(Commands::Export { json }) => {
            handlers::handle_export(&conn, &config, json)?;
        }

        // No subcommand → launch TUI
        None => {
            tui::app::run(conn, config)?;
        }
    }

    Ok(())
}
