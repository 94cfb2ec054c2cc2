//! `slots` CLI — find meeting slots and check conflicts against a calendar snapshot.
//!
//! ## Usage
//!
//! ```sh
//! # Rank half-hour slots for one day
//! slots find -c calendar.json --owner alice --duration 30 \
//!     --from 2026-03-17T00:00:00Z --to 2026-03-18T00:00:00Z
//!
//! # Include a participant's free/busy data and a custom window
//! slots find -c calendar.json --owner alice --duration 60 \
//!     --from 2026-03-17T00:00:00Z --to 2026-03-20T00:00:00Z \
//!     --preferred-start 10:00 --preferred-end 16:00 --participant bob@example.com
//!
//! # Check a proposed meeting; prints alternatives on conflict
//! slots check -c calendar.json --owner alice \
//!     --start 2026-03-17T10:00:00Z --end 2026-03-17T11:00:00Z
//!
//! # Override engine settings
//! slots --config engine.toml find ...
//! ```
//!
//! Logs go to stderr; set `RUST_LOG` or pass `-v` for more detail.

use std::io::{self, Read};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use slot_engine::{CalendarSnapshot, ConflictCheck, EngineConfig, SchedulingEngine, SlotRequest};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Find meeting slots and check conflicts against a calendar snapshot"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Engine configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank available meeting slots in a date range
    Find {
        /// Calendar snapshot JSON (reads from stdin if omitted)
        #[arg(short, long)]
        calendar: Option<String>,
        /// Calendar owner to search
        #[arg(long)]
        owner: String,
        /// Meeting length in minutes
        #[arg(short, long)]
        duration: i64,
        /// Range start (RFC 3339)
        #[arg(long)]
        from: DateTime<Utc>,
        /// Range end (RFC 3339)
        #[arg(long)]
        to: DateTime<Utc>,
        /// Earliest slot start each day (HH:MM, UTC)
        #[arg(long, default_value = "09:00")]
        preferred_start: String,
        /// Latest slot end each day (HH:MM, UTC)
        #[arg(long, default_value = "17:00")]
        preferred_end: String,
        /// Participant whose busy time must be avoided (repeatable)
        #[arg(short, long = "participant")]
        participants: Vec<String>,
        /// Minutes kept clear around existing events
        #[arg(short, long)]
        buffer: Option<i64>,
    },
    /// Check a proposed meeting for conflicts
    Check {
        /// Calendar snapshot JSON (reads from stdin if omitted)
        #[arg(short, long)]
        calendar: Option<String>,
        /// Calendar owner to check
        #[arg(long)]
        owner: String,
        /// Proposed start (RFC 3339)
        #[arg(long)]
        start: DateTime<Utc>,
        /// Proposed end (RFC 3339)
        #[arg(long)]
        end: DateTime<Utc>,
        /// Participant whose busy time alternatives must avoid (repeatable)
        #[arg(short, long = "participant")]
        participants: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match cli.config.as_deref() {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path))?,
        None => EngineConfig::default(),
    };
    debug!(config = ?config, "engine configuration");

    match cli.command {
        Commands::Find {
            calendar,
            owner,
            duration,
            from,
            to,
            preferred_start,
            preferred_end,
            participants,
            buffer,
        } => {
            let engine = build_engine(calendar.as_deref(), config)?;
            let mut request = SlotRequest::new(duration, from, to)
                .with_preferred_hours(preferred_start, preferred_end)
                .with_participants(participants);
            if let Some(buffer) = buffer {
                request = request.with_buffer_minutes(buffer);
            }

            let slots = engine
                .find_available_slots(&owner, &request)
                .await
                .context("Failed to find available slots")?;
            println!("{}", serde_json::to_string_pretty(&slots)?);
        }
        Commands::Check {
            calendar,
            owner,
            start,
            end,
            participants,
        } => {
            let engine = build_engine(calendar.as_deref(), config)?;
            let check = ConflictCheck::new(start, end).with_participants(participants);

            let result = engine
                .check_conflicts(&owner, &check)
                .await
                .context("Failed to check conflicts")?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn build_engine(calendar: Option<&str>, config: EngineConfig) -> Result<SchedulingEngine> {
    let raw = read_input(calendar)?;
    let snapshot = Arc::new(
        CalendarSnapshot::from_json(&raw).context("Failed to parse calendar snapshot")?,
    );
    debug!(
        owners = snapshot.events.len(),
        recurring_owners = snapshot.recurring.len(),
        participants = snapshot.free_busy.len(),
        "loaded calendar snapshot"
    );
    SchedulingEngine::new(snapshot.clone(), snapshot, config).context("Invalid engine configuration")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
