use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mlog_cli::commands::{
    add, classify, clear, comment, delete, export, goals, reclassify, show, status, util, week,
};
use mlog_cli::{Cli, Commands, Config};
use mlog_db::Database;

/// Load config and open database, ensuring the parent directory exists.
fn open_database(config_path: Option<&Path>) -> Result<(Database, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let db = Database::open(&config.database_path)
        .with_context(|| format!("failed to open {}", config.database_path.display()))?;
    Ok((db, config))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so command output stays pipeable
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let (mut db, config) = open_database(cli.config.as_deref())?;
    let classifier = util::load_classifier(&config)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Commands::AddFood {
            text,
            date,
            time,
            amount,
        } => {
            let input = add::FoodInput {
                date: util::resolve_date(date.date.as_deref())?,
                time: util::parse_time(time.as_deref())?,
                text: text.as_str(),
                amount: amount.as_deref(),
            };
            add::food(&mut out, &mut db, &classifier, input)?;
        }
        Commands::AddActivity { text, date, time } => {
            let date = util::resolve_date(date.date.as_deref())?;
            let time = util::parse_time(time.as_deref())?;
            add::activity(&mut out, &mut db, date, time, text)?;
        }
        Commands::Delete { id } => {
            delete::run(&mut out, &mut db, id)?;
        }
        Commands::Show { date, json } => {
            let date = util::resolve_date(date.date.as_deref())?;
            let journal = db.load_journal()?;
            show::run(&mut out, &journal, &classifier, date, *json)?;
        }
        Commands::Classify { text, json } => {
            classify::run(&mut out, &classifier, text, *json)?;
        }
        Commands::Comment { text, date } => {
            let date = util::resolve_date(date.date.as_deref())?;
            comment::run(&mut out, &mut db, date, text.as_deref())?;
        }
        Commands::Goals(action) => {
            goals::run(&mut out, &mut db, action)?;
        }
        Commands::Week { end, days, json } => {
            let end = util::resolve_date(end.as_deref())?;
            let journal = db.load_journal()?;
            week::run(&mut out, &journal, &classifier, end, *days, *json)?;
        }
        Commands::Export { output } => {
            let journal = db.load_journal()?;
            if let Some(path) = output {
                let file = File::create(path)
                    .with_context(|| format!("failed to create {}", path.display()))?;
                let mut writer = BufWriter::new(file);
                export::run(&mut writer, &journal)?;
                writer.flush()?;
                tracing::info!(path = %path.display(), entries = journal.entries.len(), "exported");
            } else {
                export::run(&mut out, &journal)?;
            }
        }
        Commands::Reclassify => {
            reclassify::run(&mut out, &mut db, &classifier)?;
        }
        Commands::Status => {
            status::run(&mut out, &db, &config, &classifier)?;
        }
        Commands::Clear { yes } => {
            clear::run(&mut out, &mut db, *yes)?;
        }
    }

    Ok(())
}
