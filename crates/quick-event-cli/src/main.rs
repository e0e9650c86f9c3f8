//! `quick-event` CLI: turn natural-language event text into calendar URLs.
//!
//! ## Usage
//!
//! ```sh
//! # One URL per event, primary first
//! quick-event url "Gym tomorrow 2pm; Lunch Friday 1pm to 2pm"
//!
//! # Read text from stdin
//! echo "Standup every Monday 9am @work" | quick-event url --calendars calendars.json
//!
//! # Show the parsed events as JSON
//! quick-event parse --tz America/New_York "Dinner tonight l(Home)"
//!
//! # Reproducible output with a fixed "now"
//! quick-event url --now 2026-10-20T09:00:00Z "Call mom Monday 5pm"
//!
//! # Settings file (language, timezone, base_url, calendars)
//! quick-event url --config settings.json "Review 10am on Friday"
//! ```
//!
//! Logging goes to stderr; set `RUST_LOG=quick_event=debug` to see how each
//! event was read.

use std::collections::HashMap;
use std::io::{self, Read};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use quick_event::{QuickEvent, Settings};

#[derive(Parser)]
#[command(
    name = "quick-event",
    version,
    about = "Natural-language quick-add for calendars"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    options: GlobalOptions,
}

#[derive(Args)]
struct GlobalOptions {
    /// Language code used to read dates (defaults to "en")
    #[arg(long, global = true, env = "QUICK_EVENT_LANG")]
    lang: Option<String>,

    /// IANA timezone for wall-clock times (defaults to "UTC")
    #[arg(long, global = true, env = "QUICK_EVENT_TZ")]
    tz: Option<String>,

    /// Reference instant as RFC 3339 (defaults to the current time)
    #[arg(long, global = true)]
    now: Option<String>,

    /// JSON file mapping calendar nicknames to calendar ids
    #[arg(long, global = true)]
    calendars: Option<String>,

    /// JSON settings file
    #[arg(long, global = true, env = "QUICK_EVENT_CONFIG")]
    config: Option<String>,

    /// Calendar template endpoint
    #[arg(long, global = true)]
    base_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one calendar URL per event, primary first
    Url {
        /// Event text (reads from stdin if omitted)
        text: Vec<String>,
    },
    /// Print the parsed events as JSON
    Parse {
        /// Event text (reads from stdin if omitted)
        text: Vec<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = load_settings(&cli.options)?;
    let quick = QuickEvent::from_settings(settings).context("Invalid settings")?;
    let now = reference_time(cli.options.now.as_deref())?;

    match cli.command {
        Commands::Url { text } => {
            let text = read_text(&text)?;
            for url in quick.create_event_urls(&text, now)? {
                println!("{url}");
            }
        }
        Commands::Parse { text } => {
            let text = read_text(&text)?;
            let events = quick.parse_all(&text, now)?;
            println!("{}", serde_json::to_string_pretty(&events)?);
        }
    }

    Ok(())
}

/// Settings file first, then individual flags on top.
fn load_settings(options: &GlobalOptions) -> Result<Settings> {
    let mut settings = match options.config.as_deref() {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read settings file: {}", path))?;
            Settings::from_json(&json)
                .with_context(|| format!("Failed to load settings from {}", path))?
        }
        None => Settings::default(),
    };

    if let Some(lang) = &options.lang {
        settings.language = lang.clone();
    }
    if let Some(tz) = &options.tz {
        settings.timezone = tz.clone();
    }
    if let Some(base_url) = &options.base_url {
        settings.base_url = base_url.clone();
    }
    if let Some(path) = options.calendars.as_deref() {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read calendars file: {}", path))?;
        let calendars: HashMap<String, String> = serde_json::from_str(&json)
            .with_context(|| format!("Calendars file must be a JSON object: {}", path))?;
        settings.calendars.extend(calendars);
    }

    tracing::debug!(
        language = %settings.language,
        timezone = %settings.timezone,
        calendars = settings.calendars.len(),
        "loaded settings"
    );
    Ok(settings)
}

fn reference_time(now: Option<&str>) -> Result<DateTime<Utc>> {
    match now {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .with_context(|| format!("Invalid --now '{}': expected RFC 3339", raw)),
        None => Ok(Utc::now()),
    }
}

/// Positional words joined by spaces, or all of stdin when there are none.
fn read_text(words: &[String]) -> Result<String> {
    if !words.is_empty() {
        return Ok(words.join(" "));
    }
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read from stdin")?;
    Ok(buf)
}
