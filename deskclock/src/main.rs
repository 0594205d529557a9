//! deskclock - Command-line desk clock
//!
//! One-shot queries (time, date, world clock) and watching commands
//! (countdown timer, alarm, stopwatch) that run until done or Ctrl-C.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use chrono::{Local, Utc};
use clap::{Parser, Subcommand};
use crossbeam_channel::Receiver;
use libdeskclock::format::{format_clock, format_localized_date, format_elapsed};
use libdeskclock::geometry::HandAngles;
use libdeskclock::logging;
use libdeskclock::{
    Alarm, AlarmEvent, ClockError, Config, CountdownTimer, CueStrength, HourFormat, Language, Lap,
    Stopwatch, TimerEvent, TimezoneSet, ZoneTime,
};
use serde::Serialize;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "deskclock")]
#[command(version)]
#[command(about = "Desk clock: time, localized date, world clock, timer, alarm and stopwatch")]
#[command(long_about = "\
deskclock - Command-line desk clock

COMMANDS:
    now         Show the current time and localized date
    date        Show the localized date only
    zones       Show the time in several time zones
    timer       Count down a duration, then ring
    alarm       Wait for a time of day, then ring
    stopwatch   Run a stopwatch; Enter records a lap, Ctrl-C stops

USAGE EXAMPLES:
    deskclock now --lang en --twelve-hour
    deskclock now --format json
    deskclock zones Europe/Madrid Asia/Tokyo
    deskclock timer 25m
    deskclock timer 0:01:30
    deskclock alarm 07:30 --message \"Stand-up\"
    deskclock stopwatch --format json > laps.json

CONFIGURATION:
    Configuration file: ~/.config/deskclock/config.toml
    Override with DESKCLOCK_CONFIG or --config.
    Logging: DESKCLOCK_LOG_FORMAT (text, json, pretty), DESKCLOCK_LOG_LEVEL.

EXIT CODES:
    0 - Success (including Ctrl-C on watching commands)
    1 - Other failure (I/O)
    2 - Configuration error
    3 - Invalid input (time, duration, zone or language)
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ~/.config/deskclock/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the current time and localized date
    Now {
        /// Date language: es, en, pt or fr
        #[arg(short, long)]
        lang: Option<String>,

        /// Use a 12 hour clock
        #[arg(long)]
        twelve_hour: bool,

        /// Output format: text or json
        #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// Keep printing every second until Ctrl-C
        #[arg(short, long)]
        watch: bool,
    },

    /// Show the localized date
    Date {
        /// Date language: es, en, pt or fr
        #[arg(short, long)]
        lang: Option<String>,
    },

    /// Show the time in several time zones
    Zones {
        /// IANA zone identifiers (defaults to the configured list)
        zones: Vec<String>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Count down, then ring
    Timer {
        /// H:MM:SS or a duration such as 90s, 5m, 1h 30m
        duration: String,
    },

    /// Ring at a time of day
    Alarm {
        /// Time of day, HH:MM (24 hour)
        time: String,

        /// Message shown when the alarm goes off
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Stopwatch with laps
    Stopwatch {
        /// Output format for the final summary: text or json
        #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    logging::init_from_env(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(exit_code(&e));
    }
}

/// Clock errors carry their own exit code; anything else is 1
fn exit_code(error: &anyhow::Error) -> i32 {
    error
        .downcast_ref::<ClockError>()
        .map(ClockError::exit_code)
        .unwrap_or(1)
}

fn load_config(path: Option<&PathBuf>) -> libdeskclock::Result<Config> {
    match path {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    }
}

/// `--lang` if given (must be supported), otherwise the configured language
fn language(lang: Option<&str>, config: &Config) -> libdeskclock::Result<Language> {
    match lang {
        Some(code) => code.parse(),
        None => Ok(config.display.language),
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_ref())?;
    debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Now { lang, twelve_hour, format, watch } => {
            let language = language(lang.as_deref(), &config)?;
            let hour_format = if twelve_hour {
                HourFormat::Twelve
            } else {
                config.display.hour_format()
            };
            run_now(language, hour_format, &format, watch).await
        }
        Commands::Date { lang } => {
            let language = language(lang.as_deref(), &config)?;
            println!("{}", format_localized_date(&Local::now(), language));
            Ok(())
        }
        Commands::Zones { zones, format } => {
            let table = if zones.is_empty() {
                TimezoneSet::from_names(&config.zones.list)
            } else {
                let mut table = TimezoneSet::new();
                for zone in &zones {
                    table.add_zone(zone)?;
                }
                table
            };
            print_zones(&table.refresh(Utc::now()), &format)
        }
        Commands::Timer { duration } => {
            let mut timer = CountdownTimer::new();
            timer.start_from_str(&duration)?;
            run_timer(timer).await
        }
        Commands::Alarm { time, message } => {
            let mut alarm = Alarm::new();
            let message = message.unwrap_or_else(|| config.alarm.default_message.clone());
            alarm.arm_from_str(&time, message)?;
            run_alarm(alarm).await
        }
        Commands::Stopwatch { format } => run_stopwatch(&format, config.cadence.stopwatch()).await,
    }
}

#[derive(Debug, Serialize)]
struct NowOutput {
    time: String,
    date: String,
    language: String,
    hands: HandAngles,
}

fn now_output(language: Language, hour_format: HourFormat) -> NowOutput {
    let now = Local::now();
    NowOutput {
        time: format_clock(&now, hour_format, true),
        date: format_localized_date(&now, language),
        language: language.code().to_string(),
        hands: HandAngles::from_time(&now),
    }
}

async fn run_now(language: Language, hour_format: HourFormat, format: &str, watch: bool) -> Result<()> {
    if !watch {
        let output = now_output(language, hour_format);
        if format == "json" {
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}\n{}", output.time, output.date);
        }
        return Ok(());
    }

    let shutdown = shutdown_flag()?;
    let mut ticker = interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    while !shutdown.load(Ordering::Relaxed) {
        ticker.tick().await;
        let output = now_output(language, hour_format);
        if format == "json" {
            println!("{}", serde_json::to_string(&output)?);
        } else {
            print!("\r{}  {}", output.time, output.date);
            std::io::stdout().flush()?;
        }
    }
    println!();
    Ok(())
}

fn print_zones(rows: &[ZoneTime], format: &str) -> Result<()> {
    if format == "json" {
        println!("{}", serde_json::to_string_pretty(rows)?);
        return Ok(());
    }

    let width = rows.iter().map(|r| r.zone.len()).max().unwrap_or(0);
    for row in rows {
        println!("{:<width$}  {}  (UTC{})", row.zone, row.time, row.offset, width = width);
    }
    Ok(())
}

/// Ring the terminal bell for every queued cue
fn ring(cues: &Receiver<CueStrength>) -> Result<()> {
    let mut stdout = std::io::stdout();
    for cue in cues.try_iter() {
        for _ in 0..cue.beeps() {
            stdout.write_all(b"\x07")?;
        }
    }
    stdout.flush()?;
    Ok(())
}

async fn run_timer(mut timer: CountdownTimer) -> Result<()> {
    let shutdown = shutdown_flag()?;
    let (cue_tx, cue_rx) = crossbeam_channel::bounded(16);

    let mut ticker = interval(Duration::from_secs(1));
    // The first tick completes immediately
    ticker.tick().await;
    print!("\r{} ", timer.display());
    std::io::stdout().flush()?;

    loop {
        ticker.tick().await;
        if shutdown.load(Ordering::Relaxed) {
            println!("\nTimer cancelled with {} left", timer.display());
            return Ok(());
        }

        let event = timer.tick(&cue_tx);
        print!("\r{} ", timer.display());
        ring(&cue_rx)?;
        if event == TimerEvent::Expired {
            println!("\nTime's up!");
            info!(total = timer.total(), "timer finished");
            return Ok(());
        }
    }
}

async fn run_alarm(mut alarm: Alarm) -> Result<()> {
    let shutdown = shutdown_flag()?;
    let (cue_tx, cue_rx) = crossbeam_channel::bounded(16);
    println!("{}", alarm.status_text());

    let mut ticker = interval(Duration::from_millis(200));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        ticker.tick().await;
        if shutdown.load(Ordering::Relaxed) {
            println!("Alarm cancelled");
            return Ok(());
        }

        let event = alarm.evaluate(&Local::now(), &cue_tx);
        ring(&cue_rx)?;
        if let AlarmEvent::Fired { message } = event {
            if message.is_empty() {
                println!("Alarm!");
            } else {
                println!("{}", message);
            }
            return Ok(());
        }
    }
}

#[derive(Debug, Serialize)]
struct StopwatchSummary<'a> {
    total: String,
    laps: &'a [Lap],
}

async fn run_stopwatch(format: &str, redraw: Duration) -> Result<()> {
    let shutdown = shutdown_flag()?;
    let mut stopwatch = Stopwatch::new();
    stopwatch.toggle(Instant::now());
    eprintln!("Stopwatch running. Enter records a lap, Ctrl-C stops.");

    let mut lines = stdin_lines();
    let mut stdin_open = true;
    let mut ticker = interval(redraw);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    while !shutdown.load(Ordering::Relaxed) {
        tokio::select! {
            _ = ticker.tick() => {
                eprint!("\r{}", stopwatch.display(Instant::now()));
            }
            line = lines.recv(), if stdin_open => {
                match line {
                    Some(line) => {
                        line?;
                        let lap = stopwatch.lap(Instant::now());
                        eprintln!("\r{}", lap.describe());
                    }
                    None => stdin_open = false,
                }
            }
        }
    }

    let now = Instant::now();
    stopwatch.toggle(now);
    eprintln!();

    let total = format_elapsed(stopwatch.current_total(now).as_secs_f64());
    if format == "json" {
        let summary = StopwatchSummary {
            total,
            laps: stopwatch.laps(),
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Total {}", total);
        for lap in stopwatch.laps() {
            println!("{}", lap.describe());
        }
    }
    Ok(())
}

/// Lines typed on stdin, read on a plain thread so a pending read never delays exit
fn stdin_lines() -> UnboundedReceiver<std::io::Result<String>> {
    let (tx, rx) = unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// A flag set once SIGINT or SIGTERM arrives
#[cfg(unix)]
fn shutdown_flag() -> Result<Arc<AtomicBool>> {
    use signal_hook::consts::{SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;

    let shutdown = Arc::new(AtomicBool::new(false));
    let mut signals = Signals::new([SIGINT, SIGTERM])?;

    let flag = shutdown.clone();
    std::thread::spawn(move || {
        if let Some(sig) = signals.forever().next() {
            debug!(signal = sig, "shutdown requested");
            flag.store(true, Ordering::Relaxed);
        }
    });

    Ok(shutdown)
}

#[cfg(not(unix))]
fn shutdown_flag() -> Result<Arc<AtomicBool>> {
    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            flag.store(true, Ordering::Relaxed);
        }
    });
    Ok(shutdown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_mapping() {
        let validation = anyhow::Error::from(ClockError::Validation("x".to_string()));
        assert_eq!(exit_code(&validation), 3);

        let io = anyhow::Error::from(std::io::Error::new(std::io::ErrorKind::Other, "x"));
        assert_eq!(exit_code(&io), 1);
    }

    #[test]
    fn test_language_flag_is_strict() {
        let config = Config::default();
        assert_eq!(language(None, &config).unwrap(), Language::Es);
        assert_eq!(language(Some("fr"), &config).unwrap(), Language::Fr);
        assert!(matches!(
            language(Some("xx"), &config),
            Err(ClockError::UnsupportedLanguage(_))
        ));
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["deskclock", "alarm", "07:30", "-m", "Tea"]).unwrap();
        match cli.command {
            Commands::Alarm { time, message } => {
                assert_eq!(time, "07:30");
                assert_eq!(message.as_deref(), Some("Tea"));
            }
            other => panic!("unexpected command {:?}", other),
        }

        assert!(Cli::try_parse_from(["deskclock", "zones", "--format", "xml"]).is_err());
    }
}
