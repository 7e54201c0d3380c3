use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "stride", version, about = "A terminal habit tracker with streaks and strict or flexible grading")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a habit
    Add {
        /// Habit name
        name: String,
        /// Cadence: daily or weekly
        #[arg(long, default_value = "daily")]
        cadence: String,
        /// Grading strategy: strict (full window) or flexible (70% of it)
        #[arg(long, default_value = "flexible")]
        strategy: String,
    },
    /// List habits with streaks and window progress
    List,
    /// Toggle today's completion for a habit
    Toggle {
        /// Habit name
        name: String,
    },
    /// Show one habit: anchor, window, streak, history
    Show {
        /// Habit name
        name: String,
    },
    /// Rename a habit
    Rename {
        /// Current name
        name: String,
        /// New name
        new_name: String,
    },
    /// Show statistics across all habits
    Stats {
        /// Include a per-habit window strip
        #[arg(long)]
        week: bool,
    },
    /// Export a summary to stdout
    Export {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}
