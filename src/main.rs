//! Checkers self-play runner
//!
//! Plays a batch of games between two configured players and prints the
//! win/loss/tie tally from black's point of view.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use checkers::{run_games, Color, ExperimentConfig, GameStats};

#[derive(Parser, Debug)]
#[command(author, version, about = "Checkers alpha-beta self-play", long_about = None)]
struct Cli {
    /// TOML experiment configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of games to play
    #[arg(short, long)]
    games: Option<u32>,

    /// Worker threads
    #[arg(short, long)]
    threads: Option<usize>,

    /// Base seed; game i uses seed + i
    #[arg(long)]
    seed: Option<u64>,

    /// Search depth for black
    #[arg(long)]
    black_depth: Option<u32>,

    /// Search depth for white
    #[arg(long)]
    white_depth: Option<u32>,

    /// Rounds before a game is drawn
    #[arg(long)]
    rounds: Option<u32>,

    /// Print the PDN transcript of every game
    #[arg(long)]
    pdn: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn load_config(&self) -> Result<ExperimentConfig> {
        let mut config = match &self.config {
            Some(path) => ExperimentConfig::from_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => ExperimentConfig::default(),
        };

        if let Some(games) = self.games {
            config.game.games = games;
        }
        if let Some(threads) = self.threads {
            config.game.threads = threads;
        }
        if let Some(seed) = self.seed {
            config.game.seed = seed;
        }
        if let Some(rounds) = self.rounds {
            config.game.max_rounds = rounds;
        }
        if self.black_depth.is_some() {
            config.black.max_depth = self.black_depth;
        }
        if self.white_depth.is_some() {
            config.white.max_depth = self.white_depth;
        }
        if self.pdn {
            config.game.record_pdn = true;
        }

        config.validate().context("invalid options")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .init();

    let config = cli.load_config()?;
    log::info!(
        "playing {} games on {} threads: black {} depth {} vs white {} depth {}",
        config.game.games,
        config.game.threads,
        config.black.build_evaluator().name(),
        config.black.depth_for(Color::Black),
        config.white.build_evaluator().name(),
        config.white.depth_for(Color::White),
    );

    let results = run_games(&config);
    for (index, result) in results.iter().enumerate() {
        match result {
            Ok(record) => {
                if cli.pdn {
                    if let Some(pdn) = &record.pdn {
                        println!("{}\n", pdn);
                    }
                }
            }
            Err(err) => log::error!("game {} failed: {}", index, err),
        }
    }

    let stats = GameStats::from_results(&results);
    println!("{}", stats);
    Ok(())
}
