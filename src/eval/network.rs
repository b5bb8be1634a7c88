//! Neural-network substrate as a leaf evaluator
//!
//! The network itself is opaque: anything implementing [`Network`] can be
//! plugged in. This module only fixes how a board becomes input values
//! and how the output becomes a score.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use super::{LeafEvaluator, Score};
use crate::board::{Board, Square, BLACK, BOARD_SIZE, KING, MAN, WHITE};
use crate::error::{CheckersError, CheckersResult};

/// Number of substrate inputs, one per board cell
pub const INPUT_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

const MAN_INPUT: f32 = 0.5;
const KING_INPUT: f32 = 0.75;

/// An evaluated neural network
pub trait Network: Send {
    /// Run the network on `inputs` and return its single output
    fn activate(&mut self, inputs: &[f32]) -> f32;
}

/// Encode a board as substrate inputs, indexed `x * 8 + y`.
///
/// Black men are `0.5`, black kings `0.75`, white pieces the negatives;
/// empty and light squares are `0`.
///
/// # Errors
/// `Evaluator` if a cell carries a color but no rank.
pub fn encode_board(board: &Board, inputs: &mut [f32; INPUT_COUNT]) -> CheckersResult<()> {
    inputs.fill(0.0);
    for sq in Square::dark_squares() {
        let cell = board.get(sq);
        let sign = if cell & BLACK != 0 {
            1.0
        } else if cell & WHITE != 0 {
            -1.0
        } else {
            continue;
        };
        let magnitude = if cell & KING != 0 {
            KING_INPUT
        } else if cell & MAN != 0 {
            MAN_INPUT
        } else {
            return Err(CheckersError::Evaluator(format!(
                "could not determine piece type of cell {} at {}",
                cell, sq
            )));
        };
        inputs[sq.x as usize * BOARD_SIZE + sq.y as usize] = sign * magnitude;
    }
    Ok(())
}

/// Round a network output to three decimals
#[inline]
pub fn round_output(output: f32) -> Score {
    ((output * 1000.0 + 0.50001).floor()) / 1000.0
}

/// [`LeafEvaluator`] feeding boards through a [`Network`]
pub struct NetworkEvaluator<N> {
    network: N,
    inputs: [f32; INPUT_COUNT],
}

impl<N: Network> NetworkEvaluator<N> {
    pub fn new(network: N) -> Self {
        Self {
            network,
            inputs: [0.0; INPUT_COUNT],
        }
    }

    pub fn network(&self) -> &N {
        &self.network
    }
}

impl<N: Network> LeafEvaluator for NetworkEvaluator<N> {
    fn evaluate(&mut self, board: &Board) -> CheckersResult<Score> {
        encode_board(board, &mut self.inputs)?;
        Ok(round_output(self.network.activate(&self.inputs)))
    }

    fn name(&self) -> &str {
        "network"
    }
}

/// Single-layer network with a `tanh` output.
///
/// Stands in for an evolved substrate when running self-play without one.
#[derive(Debug, Clone)]
pub struct LinearNetwork {
    weights: Vec<f32>,
    bias: f32,
}

impl LinearNetwork {
    pub fn new(weights: Vec<f32>, bias: f32) -> Self {
        debug_assert_eq!(weights.len(), INPUT_COUNT);
        Self { weights, bias }
    }

    /// Random weights in `[-1, 1)`, reproducible from `seed`
    pub fn random(seed: u64) -> Self {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let weights = (0..INPUT_COUNT).map(|_| rng.random_range(-1.0..1.0)).collect();
        let bias = rng.random_range(-0.1..0.1);
        Self::new(weights, bias)
    }
}

impl Network for LinearNetwork {
    fn activate(&mut self, inputs: &[f32]) -> f32 {
        let sum: f32 = self
            .weights
            .iter()
            .zip(inputs)
            .map(|(w, i)| w * i)
            .sum();
        (sum + self.bias).tanh()
    }
}
