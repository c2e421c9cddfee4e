// src/bin/rotate_salt.rs
//! Daily salt rotation: one-shot for external cron, or a built-in daemon

use std::path::PathBuf;
use std::thread;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use daily_salt::config::Config;
use daily_salt::salt::fingerprint;
use daily_salt::{
    current_salt, date_key, load_config, run_scheduled, salt_status, RotationOutcome,
    SqliteSaltReader, SystemClock,
};
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// TOML config file (default: $DAILY_SALT_CONFIG or daily-salt.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Rotate once now and print the outcome
    Run,
    /// Sleep until each scheduled instant and rotate
    Daemon {
        /// Also rotate once at startup
        #[arg(long)]
        immediately: bool,
    },
    /// Show whether today's salt is present
    Show,
    /// Print the next scheduled rotation instant
    Next,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => load_config().context("Failed to load config")?.clone(),
    };

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => {
            let outcome = run_scheduled(&config);
            print_outcome(&outcome)?;
            if !outcome.success {
                std::process::exit(1);
            }
        }
        Command::Daemon { immediately } => daemon(&config, immediately)?,
        Command::Show => show(&config)?,
        Command::Next => {
            let schedule = config.daily_schedule()?;
            println!("{}", schedule.next_after(Utc::now()).to_rfc3339());
        }
    }

    Ok(())
}

fn daemon(config: &Config, immediately: bool) -> Result<()> {
    let schedule = config
        .daily_schedule()
        .context("Invalid [schedule] cron expression")?;
    info!(schedule = %schedule, "Salt rotation daemon started (UTC)");

    if immediately {
        print_outcome(&run_scheduled(config))?;
    }

    loop {
        let now = Utc::now();
        info!(next = %schedule.next_after(now), "Waiting for next rotation");
        thread::sleep(schedule.until_next(now));

        let outcome = run_scheduled(config);
        if !outcome.success {
            warn!("Rotation failed; previous salt stays in place until the next run");
        }
        print_outcome(&outcome)?;
    }
}

fn show(config: &Config) -> Result<()> {
    let reader = SqliteSaltReader::from_config(config).context("Failed to open salt store")?;
    let status = salt_status(&reader, &SystemClock)?;
    let current = current_salt(&reader, &SystemClock)?;

    let report = json!({
        "today": date_key(Utc::now()),
        "status": status,
        "fingerprint": current.as_ref().map(|r| fingerprint(&r.salt)),
        "createdAt": current.as_ref().map(|r| r.created_at_text()),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn print_outcome(outcome: &RotationOutcome) -> Result<()> {
    println!("{}", serde_json::to_string(outcome)?);
    Ok(())
}
