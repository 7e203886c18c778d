//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Longest span the `week` command will summarize.
pub const MAX_SUMMARY_DAYS: i64 = 366;

/// Meal and activity log.
///
/// Classifies free-text food entries into categories and tracks them
/// against daily goals.
#[derive(Debug, Parser)]
#[command(name = "mlog", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Day selection shared by several commands.
#[derive(Debug, Clone, Args)]
pub struct DateArg {
    /// Day to use: YYYY-MM-DD, "today", "yesterday" or "N days ago".
    #[arg(short, long)]
    pub date: Option<String>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log something eaten. Items may be separated by commas.
    AddFood {
        /// What was eaten, e.g. "rice, miso soup".
        text: String,

        #[command(flatten)]
        date: DateArg,

        /// Clock time (HH:MM).
        #[arg(short, long)]
        time: Option<String>,

        /// Amount or free-form note.
        #[arg(short, long)]
        amount: Option<String>,
    },

    /// Log an activity.
    AddActivity {
        /// What was done, e.g. "30 min walk".
        text: String,

        #[command(flatten)]
        date: DateArg,

        /// Clock time (HH:MM).
        #[arg(short, long)]
        time: Option<String>,
    },

    /// Delete a log entry by ID.
    Delete {
        /// Entry ID as shown by `show`.
        id: String,
    },

    /// Show a day's log and goal progress.
    Show {
        #[command(flatten)]
        date: DateArg,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the categories of some food text without logging it.
    Classify {
        text: String,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show or set the comment for a day.
    Comment {
        /// New comment. Prints the current comment when omitted; an empty
        /// string removes it.
        text: Option<String>,

        #[command(flatten)]
        date: DateArg,
    },

    /// Manage daily goals.
    #[command(subcommand)]
    Goals(GoalsAction),

    /// Summarize recent days.
    Week {
        /// Last day of the summary (defaults to today).
        #[arg(long)]
        end: Option<String>,

        /// Number of days to include (1 to 366).
        #[arg(
            long,
            default_value_t = 7,
            value_parser = clap::value_parser!(u32).range(1..=MAX_SUMMARY_DAYS)
        )]
        days: u32,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Export all entries as CSV.
    Export {
        /// Write to a file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Re-tag every entry with the current category rules.
    Reclassify,

    /// Show configuration and storage status.
    Status,

    /// Delete all entries, comments and extracted foods, and reset goals.
    Clear {
        /// Confirm the deletion.
        #[arg(long)]
        yes: bool,
    },
}

/// Goal management actions.
#[derive(Debug, Subcommand)]
pub enum GoalsAction {
    /// List goals.
    Show,
    /// Set a goal. Non-numeric values restore the default.
    Set {
        /// Category, e.g. "vegetable" or "staple-grain".
        tag: String,
        value: String,
    },
    /// Stop tracking a category against a goal.
    Unset { tag: String },
    /// Restore the default goals.
    Reset,
}
