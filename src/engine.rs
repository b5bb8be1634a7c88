//! Self-play driver
//!
//! An [`Experiment`] owns the authoritative board and one [`Searcher`] per
//! side, and plays complete games between them. Black searches first each
//! round; a side with no legal move, or with no pieces left, loses. A game
//! that reaches the round limit is a draw.
//!
//! # Example
//!
//! ```
//! use checkers::config::ExperimentConfig;
//! use checkers::engine::Experiment;
//!
//! let mut config = ExperimentConfig::default();
//! config.game.max_rounds = 3;
//! config.black.max_depth = Some(2);
//!
//! let mut experiment = Experiment::new(&config, config.game.seed);
//! let record = experiment.play_game().unwrap();
//! println!("{} after {} plies", record.outcome, record.plies);
//! ```

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::board::{Board, Color, PieceCounts};
use crate::config::ExperimentConfig;
use crate::error::{CheckersError, CheckersResult};
use crate::moves::GameLog;
use crate::rules::{apply_move, winner_to_move};
use crate::search::Searcher;

/// How a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    BlackWin,
    WhiteWin,
    Draw,
}

impl GameOutcome {
    fn won_by(color: Color) -> Self {
        match color {
            Color::Black => GameOutcome::BlackWin,
            Color::White => GameOutcome::WhiteWin,
        }
    }

    pub fn winner(self) -> Option<Color> {
        match self {
            GameOutcome::BlackWin => Some(Color::Black),
            GameOutcome::WhiteWin => Some(Color::White),
            GameOutcome::Draw => None,
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::BlackWin => write!(f, "black wins"),
            GameOutcome::WhiteWin => write!(f, "white wins"),
            GameOutcome::Draw => write!(f, "draw"),
        }
    }
}

/// Summary of one finished game
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub outcome: GameOutcome,
    /// Rounds started, the deciding one included
    pub rounds: u32,
    /// Moves actually played
    pub plies: usize,
    pub final_counts: PieceCounts,
    /// Transcript, when recording is enabled
    pub pdn: Option<String>,
}

/// Win/loss/tie tally from black's point of view.
///
/// Renders as `"wins losses ties"` and parses back from the same text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameStats {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

impl GameStats {
    pub fn record(&mut self, outcome: GameOutcome) {
        match outcome {
            GameOutcome::BlackWin => self.wins += 1,
            GameOutcome::WhiteWin => self.losses += 1,
            GameOutcome::Draw => self.ties += 1,
        }
    }

    /// Tally the games that finished; aborted ones are skipped
    pub fn from_results(results: &[CheckersResult<GameRecord>]) -> Self {
        let mut stats = Self::default();
        for record in results.iter().flatten() {
            stats.record(record.outcome);
        }
        stats
    }

    pub fn games(&self) -> u32 {
        self.wins + self.losses + self.ties
    }
}

impl fmt::Display for GameStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.wins, self.losses, self.ties)
    }
}

impl FromStr for GameStats {
    type Err = CheckersError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CheckersError::InvalidStats(s.to_string());
        let counts: Vec<u32> = s
            .split_whitespace()
            .map(|part| part.parse().map_err(|_| invalid()))
            .collect::<Result<_, _>>()?;
        match counts[..] {
            [wins, losses, ties] => Ok(Self { wins, losses, ties }),
            _ => Err(invalid()),
        }
    }
}

/// Search settings copied out of a player's config for one ply
#[derive(Debug, Clone, Copy)]
struct PlySettings {
    max_depth: u32,
    time_limit: Option<Duration>,
    second_best_chance: f64,
}

/// One self-play pairing with its own board, searchers and random stream.
pub struct Experiment {
    board: Board,
    black: Searcher,
    white: Searcher,
    black_settings: PlySettings,
    white_settings: PlySettings,
    max_rounds: u32,
    record_pdn: bool,
    rng: Xoshiro256PlusPlus,
    log: GameLog,
}

impl Experiment {
    /// Build both players from `config`; `seed` drives second-best choices.
    #[must_use]
    pub fn new(config: &ExperimentConfig, seed: u64) -> Self {
        let searcher = |color: Color| {
            let player = config.player(color);
            Searcher::with_cache(player.build_evaluator(), player.use_cache)
        };
        let settings = |color: Color| {
            let player = config.player(color);
            PlySettings {
                max_depth: player.depth_for(color),
                time_limit: player.time_limit(),
                second_best_chance: player.second_best_chance,
            }
        };

        Self {
            board: Board::new(),
            black: searcher(Color::Black),
            white: searcher(Color::White),
            black_settings: settings(Color::Black),
            white_settings: settings(Color::White),
            max_rounds: config.game.max_rounds,
            record_pdn: config.game.record_pdn,
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
            log: GameLog::new(config.game.event.clone()),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn log(&self) -> &GameLog {
        &self.log
    }

    /// The searcher playing `color`, e.g. to swap in a new evaluator
    pub fn searcher_mut(&mut self, color: Color) -> &mut Searcher {
        match color {
            Color::Black => &mut self.black,
            Color::White => &mut self.white,
        }
    }

    /// Play one game from the standard starting position
    pub fn play_game(&mut self) -> CheckersResult<GameRecord> {
        self.play_from(Board::new())
    }

    /// Play one game from `start`, black to move.
    ///
    /// Both caches are cleared first, so leaf scores never leak between
    /// games.
    pub fn play_from(&mut self, start: Board) -> CheckersResult<GameRecord> {
        for (color, settings) in [
            (Color::Black, self.black_settings),
            (Color::White, self.white_settings),
        ] {
            if !(0.0..=1.0).contains(&settings.second_best_chance) {
                return Err(CheckersError::InvalidConfig(format!(
                    "{} second_best_chance {} is outside [0, 1]",
                    color, settings.second_best_chance
                )));
            }
        }
        start.validate()?;
        self.board = start;
        self.black.clear_cache();
        self.white.clear_cache();
        self.log.clear();

        let mut outcome = GameOutcome::Draw;
        let mut rounds = self.max_rounds;
        'game: for round in 1..=self.max_rounds {
            for color in [Color::Black, Color::White] {
                if let Some(winner) = self.play_ply(color)? {
                    outcome = GameOutcome::won_by(winner);
                    rounds = round;
                    break 'game;
                }
            }
        }

        log::info!(
            "{} after {} rounds ({} plies), final position {} black / {} white",
            outcome,
            rounds,
            self.log.len(),
            self.board.piece_count(Color::Black),
            self.board.piece_count(Color::White),
        );

        Ok(GameRecord {
            outcome,
            rounds,
            plies: self.log.len(),
            final_counts: self.board.count_pieces(),
            pdn: self.record_pdn.then(|| self.log.to_pdn()),
        })
    }

    /// Search and play one move for `color`.
    ///
    /// # Returns
    /// The winner if the game ended with this ply
    fn play_ply(&mut self, color: Color) -> CheckersResult<Option<Color>> {
        let (searcher, settings) = match color {
            Color::Black => (&mut self.black, self.black_settings),
            Color::White => (&mut self.white, self.white_settings),
        };
        let result = searcher.search(
            &mut self.board,
            color,
            settings.max_depth,
            settings.time_limit,
        )?;

        let Some(best) = result.best_move else {
            log::trace!("{} has no legal move", color);
            return Ok(Some(color.opponent()));
        };
        let mut chosen = match result.second_best_move {
            Some(second)
                if settings.second_best_chance > 0.0
                    && self.rng.random_bool(settings.second_best_chance) =>
            {
                second
            }
            _ => best,
        };

        apply_move(&mut self.board, &mut chosen)?;
        self.log.push(&chosen);
        log::trace!("{} plays {} (score {})", color, chosen, result.score);

        Ok(winner_to_move(&self.board, color.opponent()))
    }
}

/// Play `config.game.games` independent games on `config.game.threads`
/// worker threads.
///
/// Game `i` runs in its own [`Experiment`] seeded with `seed + i`, so the
/// results do not depend on the thread count. Results come back in game
/// order; a game that fails aborts alone. An invalid config fails every
/// game slot without starting a worker.
pub fn run_games(config: &ExperimentConfig) -> Vec<CheckersResult<GameRecord>> {
    let games = config.game.games as usize;
    if let Err(err) = config.validate() {
        log::error!("not running {} games: {}", games, err);
        let message = err.to_string();
        return (0..games)
            .map(|_| Err(CheckersError::InvalidConfig(message.clone())))
            .collect();
    }
    let threads = config.game.threads.min(games).max(1);

    let play = |index: usize| {
        let seed = config.game.seed.wrapping_add(index as u64);
        let result = Experiment::new(config, seed).play_game();
        if let Err(err) = &result {
            log::warn!("game {} aborted: {}", index, err);
        }
        (index, result)
    };

    let mut finished: Vec<(usize, CheckersResult<GameRecord>)> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..threads)
            .map(|worker| {
                let play = &play;
                scope.spawn(move || {
                    (worker..games)
                        .step_by(threads)
                        .map(play)
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
            })
            .collect()
    });

    finished.sort_by_key(|(index, _)| *index);
    finished.into_iter().map(|(_, result)| result).collect()
}
