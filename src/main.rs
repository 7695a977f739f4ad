//! Command line entry point for the kickabout scorekeeper
//!
//! Loads match history exported from the team spreadsheet and prints
//! ratings, balanced team proposals, player statistics, team sheets or the
//! fund balance.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use kickabout::config::AppConfig;
use kickabout::funds::{funds_tally, latest, load_ledger};
use kickabout::history::{MatchHistory, TeamSheet};
use kickabout::rating::{RatingCalculator, RatingEngine};
use kickabout::split::{Roster, TeamSplitter};
use kickabout::utils::parse_date;
use kickabout::ScorekeeperError;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Kickabout - ratings and balanced teams for a weekly game
#[derive(Parser)]
#[command(
    name = "kickabout",
    version,
    about = "Player ratings and balanced team splits from recorded match history",
    long_about = "Kickabout replays recorded matches through a team Elo model to rate every \
                 player, then searches every six-a-side split of a twelve-player roster for \
                 the teams with the closest mean rating."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print every player's rating, lowest first
    Ratings {
        #[arg(long, value_name = "FILE", help = "Match history (JSON array of rows)")]
        history: PathBuf,
    },
    /// Propose the most balanced teams for a roster of twelve
    Split {
        #[arg(long, value_name = "FILE", help = "Match history (JSON array of rows)")]
        history: PathBuf,
        #[arg(long, value_name = "FILE", help = "Roster, one player per line")]
        roster: PathBuf,
        #[arg(long, value_name = "N", help = "Number of proposals to show")]
        top_k: Option<usize>,
    },
    /// Print win/draw/loss records and appearances
    Stats {
        #[arg(long, value_name = "FILE", help = "Match history (JSON array of rows)")]
        history: PathBuf,
        #[arg(long, value_name = "DATE", value_parser = parse_date_arg, help = "Only count appearances on or after this date")]
        since: Option<NaiveDate>,
    },
    /// Print the team sheet for one match date
    Sheet {
        #[arg(long, value_name = "FILE", help = "Match history (JSON array of rows)")]
        history: PathBuf,
        #[arg(long, value_name = "DATE", value_parser = parse_date_arg)]
        date: NaiveDate,
    },
    /// Print the fund balance by date
    Funds {
        #[arg(long, value_name = "FILE", help = "Ledger (JSON array of entries)")]
        ledger: PathBuf,
    },
    /// Validate configuration and exit
    Check,
}

fn parse_date_arg(value: &str) -> std::result::Result<NaiveDate, String> {
    parse_date(value).map_err(|e| e.to_string())
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    kickabout::config::validate_config(&config)?;
    Ok(config)
}

fn load_history(path: &Path) -> Result<MatchHistory> {
    let history = MatchHistory::load_json(path)?;
    info!(
        "Loaded {} match rows over {} dates from {}",
        history.len(),
        history.dates().len(),
        path.display()
    );
    Ok(history)
}

fn print_ratings(config: &AppConfig, history_path: &Path) -> Result<()> {
    let history = load_history(history_path)?;
    let engine = RatingEngine::new(config.rating.clone());
    debug!("Rating model: {}", engine.calculator().config());
    let report = engine.replay_with_report(&history)?;

    for skipped in &report.skipped {
        println!("skipped {}: {}", skipped.date, skipped.reason);
    }
    for entry in report.ratings.iter() {
        println!("{:>9.2}  {}", entry.rating, entry.name);
    }
    Ok(())
}

fn print_splits(
    config: &AppConfig,
    history_path: &Path,
    roster_path: &Path,
    top_k: Option<usize>,
) -> Result<()> {
    let history = load_history(history_path)?;
    let ratings = RatingEngine::new(config.rating.clone()).replay(&history)?;

    let raw = std::fs::read_to_string(roster_path)
        .with_context(|| format!("Failed to read roster {}", roster_path.display()))?;
    let roster = Roster::parse(&raw)?;
    debug!("Roster: {:?}", roster.names());

    let splitter = TeamSplitter::new(config.split.clone());
    let splits = match splitter.split(&roster, &ratings, top_k.unwrap_or(config.split.top_k)) {
        Ok(splits) => splits,
        Err(e) => {
            if let Some(ScorekeeperError::MissingPlayers { names }) =
                e.downcast_ref::<ScorekeeperError>()
            {
                eprintln!("These players have no rating yet:");
                for name in names {
                    eprintln!("  {}", name);
                }
            }
            return Err(e);
        }
    };

    for (i, split) in splits.iter().enumerate() {
        println!(
            "Option {} - score {:.4} (means {:.2} / {:.2})",
            i + 1,
            split.fairness,
            split.team_a_mean,
            split.team_b_mean
        );
        for row in 0..split.team_a.len().max(split.team_b.len()) {
            println!(
                "  {:<24}{}",
                split.team_a.get(row).map(String::as_str).unwrap_or(""),
                split.team_b.get(row).map(String::as_str).unwrap_or("")
            );
        }
    }
    Ok(())
}

fn print_stats(history_path: &Path, since: Option<NaiveDate>) -> Result<()> {
    let history = load_history(history_path)?;

    println!("{:<24}{:>4}{:>4}{:>4}{:>8}", "Player", "W", "D", "L", "Win %");
    for record in history.player_records() {
        println!(
            "{:<24}{:>4}{:>4}{:>4}{:>7.1}%",
            record.name,
            record.wins,
            record.draws,
            record.losses,
            record.win_rate() * 100.0
        );
    }

    println!();
    println!("{:<24}{:>8}{:>8}", "Player", "Matches", "Goals");
    for entry in history.appearances(since) {
        println!("{:<24}{:>8}{:>8}", entry.name, entry.matches, entry.goals);
    }
    Ok(())
}

fn print_team(sheet: &TeamSheet) {
    println!("Team {} - {}", sheet.team, sheet.total_goals);
    for entry in &sheet.entries {
        println!("  {:<24}{}", entry.name, entry.goals);
    }
}

fn print_sheet(history_path: &Path, date: NaiveDate) -> Result<()> {
    let history = load_history(history_path)?;
    let sheet = history.team_sheet(date);
    if sheet.is_empty() {
        println!("No match recorded on {}", date);
        return Ok(());
    }

    println!("{}", sheet.date);
    print_team(&sheet.team_a);
    print_team(&sheet.team_b);
    Ok(())
}

fn print_funds(ledger_path: &Path) -> Result<()> {
    let tallies = funds_tally(&load_ledger(ledger_path)?);

    for tally in &tallies {
        println!(
            "{}  {:>+10.2}  {:>10.2}  {}",
            tally.date, tally.amount, tally.total, tally.description
        );
    }
    if let Some(last) = latest(&tallies) {
        println!("Balance as of {}: {:.2}", last.date, last.total);
    }
    Ok(())
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration (CLI args can override environment/config file)
    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    // Initialize logging early (before any other operations)
    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!(
        "Starting {} v{} (log level {})",
        config.service.name,
        kickabout::VERSION,
        config.service.log_level
    );

    match &args.command {
        Command::Ratings { history } => print_ratings(&config, history),
        Command::Split {
            history,
            roster,
            top_k,
        } => print_splits(&config, history, roster, *top_k),
        Command::Stats { history, since } => print_stats(history, *since),
        Command::Sheet { history, date } => print_sheet(history, *date),
        Command::Funds { ledger } => print_funds(ledger),
        Command::Check => {
            info!("Configuration validation successful");
            println!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
    }
}
