use std::{path::PathBuf, time::Duration};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use crawler::CrawlOptions;
use games::{Game, GameTable};
use model::{Country, StoreRecord};
use overrides::Overrides;

mod catalog;
mod crawler;
mod dedup;
mod error;
mod games;
mod model;
mod overrides;
mod page;
mod targets;
mod utils;

/// Crawls arcade location pages per game and finds the stores every game shares.
#[derive(Debug, Parser)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Game table (YAML); defaults to the built-in table
    #[arg(long = "games", value_name = "PATH", global = true)]
    game_table: Option<PathBuf>,

    /// Coordinate overrides (YAML); defaults to the built-in table
    #[arg(long, value_name = "PATH", global = true)]
    overrides: Option<PathBuf>,

    /// Directory catalogs and the duplicate file are written to
    #[arg(long, value_name = "DIR", default_value = "json", global = true)]
    output: PathBuf,

    /// Requests in flight at once
    #[arg(long, default_value_t = 4, global = true)]
    jobs: usize,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 30, global = true)]
    timeout: u64,

    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Crawl location pages and write one catalog per game
    Crawl {
        /// Only crawl these games
        #[arg(value_name = "GAME")]
        only: Vec<String>,
    },
    /// Find stores present in every game's catalog
    Dedup,
    /// Crawl, then dedup
    All,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let games = match &cli.game_table {
        Some(path) => GameTable::load(path)?,
        None => GameTable::builtin()?,
    };
    let options = CrawlOptions {
        jobs: cli.jobs,
        timeout: Duration::from_secs(cli.timeout),
        quiet: cli.quiet,
    };

    match cli.command.clone().unwrap_or(Command::All) {
        Command::Crawl { only } => crawl(&cli, &games, &options, &only)?,
        Command::Dedup => dedup::run(&games, &cli.output)?,
        Command::All => {
            crawl(&cli, &games, &options, &[])?;
            dedup::run(&games, &cli.output)?;
        }
    }

    Ok(())
}

fn crawl(cli: &Cli, games: &GameTable, options: &CrawlOptions, only: &[String]) -> Result<()> {
    let overrides = match &cli.overrides {
        Some(path) => Overrides::load(path)?,
        None => Overrides::builtin()?,
    };
    info!(overrides = overrides.len(), jobs = options.jobs, "starting crawl");

    crawler::run(games, &overrides, options, only, &cli.output)
}

fn init_tracing(quiet: bool, verbose: bool) -> Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("STOREMAP_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing subscriber: {e}"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_all() {
        let cli = Cli::parse_from(["storemap"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.output, PathBuf::from("json"));
        assert_eq!(cli.jobs, 4);
        assert_eq!(cli.timeout, 30);
    }

    #[test]
    fn crawl_selected_games() {
        let cli = Cli::parse_from(["storemap", "crawl", "ongeki", "maimai", "--jobs", "1"]);
        match cli.command {
            Some(Command::Crawl { only }) => assert_eq!(only, ["ongeki", "maimai"]),
            x => panic!("unexpected command {x:?}"),
        }
        assert_eq!(cli.jobs, 1);
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["storemap", "-v", "-q"]).is_err());
    }
}
