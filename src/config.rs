//! Experiment configuration
//!
//! Loaded from TOML; every field has a default so an empty file is a
//! valid configuration.
//!
//! ```toml
//! [game]
//! max_rounds = 170
//! games = 4
//! threads = 2
//!
//! [black]
//! evaluator = "network"
//! max_depth = 4
//! second_best_chance = 0.1
//!
//! [white]
//! evaluator = "heuristic"
//! bias = "left"
//! max_depth = 2
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::board::Color;
use crate::error::{CheckersError, CheckersResult};
use crate::eval::{
    Bias, HeuristicEvaluator, LeafEvaluator, LinearNetwork, MaterialEvaluator, NetworkEvaluator,
};

/// Search depth used when a player leaves `max_depth` unset
pub const DEFAULT_BLACK_DEPTH: u32 = 4;
pub const DEFAULT_WHITE_DEPTH: u32 = 2;

/// Leaf evaluator a player searches with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluatorKind {
    #[default]
    Heuristic,
    Material,
    Network,
}

/// Game loop settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Rounds (black ply + white ply) before the game is drawn
    pub max_rounds: u32,
    pub games: u32,
    pub threads: usize,
    /// Game `i` is seeded with `seed + i`
    pub seed: u64,
    pub record_pdn: bool,
    pub event: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_rounds: 170,
            games: 1,
            threads: 1,
            seed: 1000,
            record_pdn: true,
            event: "checkers self-play".to_string(),
        }
    }
}

/// Per-side search settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub evaluator: EvaluatorKind,
    /// Only used by the heuristic evaluator
    pub bias: Bias,
    /// Only used by the network evaluator
    pub network_seed: u64,
    pub max_depth: Option<u32>,
    /// Enables iterative deepening when set
    pub time_limit_ms: Option<u64>,
    pub use_cache: bool,
    /// Probability of playing the second-best root move
    pub second_best_chance: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            evaluator: EvaluatorKind::Heuristic,
            bias: Bias::None,
            network_seed: 0,
            max_depth: None,
            time_limit_ms: None,
            use_cache: true,
            second_best_chance: 0.0,
        }
    }
}

impl PlayerConfig {
    /// Configured depth, or the side's default
    pub fn depth_for(&self, color: Color) -> u32 {
        self.max_depth.unwrap_or(match color {
            Color::Black => DEFAULT_BLACK_DEPTH,
            Color::White => DEFAULT_WHITE_DEPTH,
        })
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_ms.map(Duration::from_millis)
    }

    /// Build the configured leaf evaluator.
    ///
    /// The heuristic always scores leaves with white to move, the way the
    /// benchmark opponent was tuned.
    pub fn build_evaluator(&self) -> Box<dyn LeafEvaluator> {
        match self.evaluator {
            EvaluatorKind::Heuristic => Box::new(HeuristicEvaluator::new(Color::White, self.bias)),
            EvaluatorKind::Material => Box::new(MaterialEvaluator),
            EvaluatorKind::Network => {
                Box::new(NetworkEvaluator::new(LinearNetwork::random(self.network_seed)))
            }
        }
    }

    fn validate(&self, color: Color) -> CheckersResult<()> {
        if self.max_depth == Some(0) {
            return Err(CheckersError::InvalidConfig(format!(
                "{} max_depth must be at least 1",
                color
            )));
        }
        if !(0.0..=1.0).contains(&self.second_best_chance) {
            return Err(CheckersError::InvalidConfig(format!(
                "{} second_best_chance {} is outside [0, 1]",
                color, self.second_best_chance
            )));
        }
        Ok(())
    }
}

/// Full self-play configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub game: GameConfig,
    pub black: PlayerConfig,
    pub white: PlayerConfig,
}

impl ExperimentConfig {
    /// Read and validate a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> CheckersResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| CheckersError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Parse and validate TOML text
    pub fn from_toml_str(text: &str) -> CheckersResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn player(&self, color: Color) -> &PlayerConfig {
        match color {
            Color::Black => &self.black,
            Color::White => &self.white,
        }
    }

    pub fn validate(&self) -> CheckersResult<()> {
        if self.game.threads == 0 {
            return Err(CheckersError::InvalidConfig(
                "threads must be at least 1".to_string(),
            ));
        }
        if self.game.max_rounds == 0 {
            return Err(CheckersError::InvalidConfig(
                "max_rounds must be at least 1".to_string(),
            ));
        }
        self.black.validate(Color::Black)?;
        self.white.validate(Color::White)
    }
}
