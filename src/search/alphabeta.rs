//! Alpha-beta search over a single shared board
//!
//! Black is the maximizing side and white the minimizing side; scores are
//! always read from black's point of view.
//!
//! # Features
//!
//! - One board mutated and restored in place through [`AppliedMove`]
//! - One move buffer shared by every frame, each frame owning a slice
//! - Forced jumps extend the search past the depth limit
//! - Best and second-best root moves
//! - Optional leaf-score cache
//! - Iterative deepening under a wall-clock budget
//!
//! # Example
//!
//! ```
//! use checkers::board::{Board, Color};
//! use checkers::eval::MaterialEvaluator;
//! use checkers::search::Searcher;
//!
//! let mut searcher = Searcher::new(Box::new(MaterialEvaluator));
//! let mut board = Board::new();
//!
//! let result = searcher.search(&mut board, Color::Black, 4, None).unwrap();
//! if let Some(best_move) = result.best_move {
//!     println!("Best move: {}", best_move);
//! }
//! ```

use std::time::{Duration, Instant};

use crate::board::{Board, Color};
use crate::error::CheckersResult;
use crate::eval::{LeafEvaluator, Score, LOSS_SCORE, WIN_SCORE};
use crate::moves::Move;
use crate::rules::{generate_moves_into, winner, AppliedMove};

use super::cache::{BoardCache, CacheStats};

/// Score with the index of the leaf evaluation that produced it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub score: Score,
    /// Sequence number of the leaf call, `None` for terminal or forced results
    pub leaf: Option<u64>,
}

impl Evaluation {
    #[inline]
    fn terminal(score: Score) -> Self {
        Self { score, leaf: None }
    }

    /// Result of a root with a single legal move
    #[inline]
    fn forced() -> Self {
        Self::terminal(0.0)
    }
}

/// Search statistics for diagnostics and tuning.
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    /// Nodes entered (calls to the max/min routines)
    pub nodes: u64,
    /// Leaf evaluations requested, cached or not
    pub leaf_evaluations: u64,
    /// Siblings skipped by alpha-beta cutoffs
    pub cutoffs: u64,
    /// Cache counters for this search
    pub cache: CacheStats,
}

impl SearchStats {
    /// Cache hit rate over the leaf evaluations, in percent
    pub fn cache_hit_rate(&self) -> f64 {
        self.cache.hit_rate()
    }
}

/// Search result containing the chosen moves and associated statistics.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best move found, `None` when the side to move has no legal move
    pub best_move: Option<Move>,
    /// Runner-up root move (equal to the best move if there is only one)
    pub second_best_move: Option<Move>,
    /// Score of the root position
    pub score: Score,
    /// Index of the leaf evaluation behind the score
    pub leaf: Option<u64>,
    /// Deepest completed search depth
    pub depth: u32,
    /// Search diagnostics
    pub stats: SearchStats,
}

/// Alpha-beta searcher with its own leaf evaluator, cache and move buffer.
pub struct Searcher {
    evaluator: Box<dyn LeafEvaluator>,
    cache: Option<BoardCache>,
    /// Shared by all frames; each frame truncates back to its base on exit
    moves: Vec<Move>,
    best_move: Option<Move>,
    second_best_move: Option<Move>,
    second_best_score: Score,
    stats: SearchStats,
}

impl Searcher {
    /// Create a searcher with a leaf-score cache
    #[must_use]
    pub fn new(evaluator: Box<dyn LeafEvaluator>) -> Self {
        Self::with_cache(evaluator, true)
    }

    #[must_use]
    pub fn with_cache(evaluator: Box<dyn LeafEvaluator>, use_cache: bool) -> Self {
        Self {
            evaluator,
            cache: use_cache.then(BoardCache::new),
            moves: Vec::with_capacity(1024),
            best_move: None,
            second_best_move: None,
            second_best_score: LOSS_SCORE,
            stats: SearchStats::default(),
        }
    }

    /// Replace the leaf evaluator. Cached scores belonged to the old one
    /// and are dropped.
    pub fn set_evaluator(&mut self, evaluator: Box<dyn LeafEvaluator>) {
        self.evaluator = evaluator;
        self.clear_cache();
    }

    pub fn evaluator_name(&self) -> &str {
        self.evaluator.name()
    }

    pub fn clear_cache(&mut self) {
        if let Some(cache) = &mut self.cache {
            cache.clear();
        }
    }

    pub fn cache(&self) -> Option<&BoardCache> {
        self.cache.as_ref()
    }

    /// Best root move of the last search
    pub fn best_move(&self) -> Option<&Move> {
        self.best_move.as_ref()
    }

    /// Second-best root move of the last search
    pub fn second_best_move(&self) -> Option<&Move> {
        self.second_best_move.as_ref()
    }

    /// Search for `color`: black maximizes, white minimizes.
    pub fn search(
        &mut self,
        board: &mut Board,
        color: Color,
        max_depth: u32,
        time_limit: Option<Duration>,
    ) -> CheckersResult<SearchResult> {
        match color {
            Color::Black => self.first_evaluate_max(board, max_depth, time_limit),
            Color::White => self.first_evaluate_min(board, max_depth, time_limit),
        }
    }

    /// Root search for black.
    ///
    /// Without a time limit this is a single search to `max_depth`. With
    /// one, depths of the same parity as `max_depth` are searched in
    /// increasing order until the next would exceed `max_depth` or the
    /// budget is spent; the clock is only checked between depths.
    pub fn first_evaluate_max(
        &mut self,
        board: &mut Board,
        max_depth: u32,
        time_limit: Option<Duration>,
    ) -> CheckersResult<SearchResult> {
        self.run_root(board, max_depth, time_limit, |s, b, depth| {
            s.evaluate_max(b, Score::INFINITY, 0, depth)
        })
    }

    /// Root search for white, mirror of [`Self::first_evaluate_max`]
    pub fn first_evaluate_min(
        &mut self,
        board: &mut Board,
        max_depth: u32,
        time_limit: Option<Duration>,
    ) -> CheckersResult<SearchResult> {
        self.run_root(board, max_depth, time_limit, |s, b, depth| {
            s.evaluate_min(b, Score::NEG_INFINITY, 0, depth)
        })
    }

    fn run_root<F>(
        &mut self,
        board: &mut Board,
        max_depth: u32,
        time_limit: Option<Duration>,
        mut root: F,
    ) -> CheckersResult<SearchResult>
    where
        F: FnMut(&mut Self, &mut Board, u32) -> CheckersResult<Evaluation>,
    {
        let max_depth = max_depth.max(1);
        self.best_move = None;
        self.second_best_move = None;
        self.stats = SearchStats::default();
        let cache_before = self.cache.as_ref().map(|c| c.stats()).unwrap_or_default();

        let (eval, depth) = match time_limit {
            None => (root(&mut *self, &mut *board, max_depth)?, max_depth),
            Some(limit) => {
                let start = Instant::now();
                let mut depth = if max_depth % 2 == 1 { 1 } else { 2 };
                loop {
                    let eval = root(&mut *self, &mut *board, depth)?;
                    if depth + 2 > max_depth || start.elapsed() > limit {
                        break (eval, depth);
                    }
                    depth += 2;
                }
            }
        };

        if let Some(cache) = &self.cache {
            let now = cache.stats();
            self.stats.cache = CacheStats {
                hits: now.hits - cache_before.hits,
                misses: now.misses - cache_before.misses,
                inserts: now.inserts - cache_before.inserts,
                rejected: now.rejected - cache_before.rejected,
            };
        }

        log::debug!(
            "{} search depth {}: score {} best {} second {} ({} nodes, {} leaves, {} cutoffs)",
            self.evaluator.name(),
            depth,
            eval.score,
            self.best_move.as_ref().map_or("none".to_string(), |m| m.to_string()),
            self.second_best_move.as_ref().map_or("none".to_string(), |m| m.to_string()),
            self.stats.nodes,
            self.stats.leaf_evaluations,
            self.stats.cutoffs,
        );

        Ok(SearchResult {
            best_move: self.best_move.clone(),
            second_best_move: self.second_best_move.clone(),
            score: eval.score,
            leaf: eval.leaf,
            depth,
            stats: self.stats.clone(),
        })
    }

    /// Maximizing node (black to move).
    ///
    /// `parent_beta` is the minimizing parent's current bound; once a
    /// child reaches it the remaining siblings cannot matter.
    pub fn evaluate_max(
        &mut self,
        board: &mut Board,
        parent_beta: Score,
        depth: u32,
        max_depth: u32,
    ) -> CheckersResult<Evaluation> {
        if depth == 0 {
            self.moves.clear();
        }
        let base = self.moves.len();
        let result = self.max_node(board, parent_beta, depth, max_depth, base);
        self.moves.truncate(base);
        result
    }

    /// Minimizing node (white to move), mirror of [`Self::evaluate_max`]
    pub fn evaluate_min(
        &mut self,
        board: &mut Board,
        parent_alpha: Score,
        depth: u32,
        max_depth: u32,
    ) -> CheckersResult<Evaluation> {
        if depth == 0 {
            self.moves.clear();
        }
        let base = self.moves.len();
        let result = self.min_node(board, parent_alpha, depth, max_depth, base);
        self.moves.truncate(base);
        result
    }

    fn max_node(
        &mut self,
        board: &mut Board,
        parent_beta: Score,
        depth: u32,
        max_depth: u32,
        base: usize,
    ) -> CheckersResult<Evaluation> {
        self.stats.nodes += 1;
        let forced_jump = generate_moves_into(board, Color::Black, &mut self.moves)?;
        let count = self.moves.len() - base;

        if count == 0 {
            return Ok(Evaluation::terminal(LOSS_SCORE));
        }
        if depth == 0 && count == 1 {
            self.set_root_moves(base);
            return Ok(Evaluation::forced());
        }
        if depth >= max_depth && !forced_jump {
            return self.evaluate_leaf(board);
        }
        if depth == 0 {
            self.set_root_moves(base);
            self.second_best_score = LOSS_SCORE;
        }

        let mut alpha = Evaluation::terminal(Score::NEG_INFINITY);
        for i in 0..count {
            let mut mv = self.moves[base + i].clone();
            let child = {
                let mut applied = AppliedMove::new(board, &mut mv)?;
                if winner(applied.board()) == Some(Color::Black) {
                    None
                } else {
                    Some(self.evaluate_min(applied.board_mut(), alpha.score, depth + 1, max_depth)?)
                }
            };

            let Some(child) = child else {
                if depth == 0 {
                    self.best_move = Some(mv.clone());
                    self.second_best_move = Some(mv);
                }
                return Ok(Evaluation::terminal(WIN_SCORE));
            };

            if child.score > alpha.score {
                if depth == 0 {
                    self.second_best_move = self.best_move.take();
                    self.second_best_score = alpha.score;
                    self.best_move = Some(mv);
                } else if parent_beta <= child.score {
                    self.stats.cutoffs += (count - i - 1) as u64;
                    return Ok(child);
                }
                alpha = child;
            } else if depth == 0 && child.score > self.second_best_score {
                self.second_best_move = Some(mv);
                self.second_best_score = child.score;
            }
        }
        Ok(alpha)
    }

    fn min_node(
        &mut self,
        board: &mut Board,
        parent_alpha: Score,
        depth: u32,
        max_depth: u32,
        base: usize,
    ) -> CheckersResult<Evaluation> {
        self.stats.nodes += 1;
        let forced_jump = generate_moves_into(board, Color::White, &mut self.moves)?;
        let count = self.moves.len() - base;

        if count == 0 {
            return Ok(Evaluation::terminal(WIN_SCORE));
        }
        if depth == 0 && count == 1 {
            self.set_root_moves(base);
            return Ok(Evaluation::forced());
        }
        if depth >= max_depth && !forced_jump {
            return self.evaluate_leaf(board);
        }
        if depth == 0 {
            self.set_root_moves(base);
            self.second_best_score = WIN_SCORE;
        }

        let mut beta = Evaluation::terminal(Score::INFINITY);
        for i in 0..count {
            let mut mv = self.moves[base + i].clone();
            let child = {
                let mut applied = AppliedMove::new(board, &mut mv)?;
                if winner(applied.board()) == Some(Color::White) {
                    None
                } else {
                    Some(self.evaluate_max(applied.board_mut(), beta.score, depth + 1, max_depth)?)
                }
            };

            let Some(child) = child else {
                if depth == 0 {
                    self.best_move = Some(mv.clone());
                    self.second_best_move = Some(mv);
                }
                return Ok(Evaluation::terminal(LOSS_SCORE));
            };

            if child.score < beta.score {
                if depth == 0 {
                    self.second_best_move = self.best_move.take();
                    self.second_best_score = beta.score;
                    self.best_move = Some(mv);
                } else if parent_alpha >= child.score {
                    self.stats.cutoffs += (count - i - 1) as u64;
                    return Ok(child);
                }
                beta = child;
            } else if depth == 0 && child.score < self.second_best_score {
                self.second_best_move = Some(mv);
                self.second_best_score = child.score;
            }
        }
        Ok(beta)
    }

    /// Point best and second best at the first move of the root slice
    fn set_root_moves(&mut self, base: usize) {
        let first = self.moves[base].clone();
        self.second_best_move = Some(first.clone());
        self.best_move = Some(first);
    }

    fn evaluate_leaf(&mut self, board: &Board) -> CheckersResult<Evaluation> {
        let leaf = self.stats.leaf_evaluations;
        self.stats.leaf_evaluations += 1;

        if let Some(score) = self.cache.as_mut().and_then(|c| c.lookup(board)) {
            return Ok(Evaluation {
                score,
                leaf: Some(leaf),
            });
        }
        let score = self.evaluator.evaluate(board)?;
        if let Some(cache) = &mut self.cache {
            cache.insert(board, score);
        }
        Ok(Evaluation {
            score,
            leaf: Some(leaf),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Square, BLACK_KING, BLACK_MAN, WHITE_KING, WHITE_MAN};
    use crate::eval::{FnEvaluator, HeuristicEvaluator, MaterialEvaluator};
    use crate::rules::{apply_move, generate_moves, reverse_move};

    fn sq(x: u8, y: u8) -> Square {
        Square::new(x, y)
    }

    fn material() -> Box<dyn LeafEvaluator> {
        Box::new(MaterialEvaluator)
    }

    /// Plain minimax over the same tree, without pruning
    fn minimax(
        board: &mut Board,
        eval: &mut dyn LeafEvaluator,
        color: Color,
        depth: u32,
        max_depth: u32,
    ) -> (Score, Option<Move>) {
        let generated = generate_moves(board, color).unwrap();
        if generated.moves.is_empty() {
            let lost = match color {
                Color::Black => LOSS_SCORE,
                Color::White => WIN_SCORE,
            };
            return (lost, None);
        }
        if depth == 0 && generated.moves.len() == 1 {
            return (0.0, generated.moves.into_iter().next());
        }
        if depth >= max_depth && !generated.forced_jump {
            return (eval.evaluate(board).unwrap(), None);
        }

        let maximizing = color == Color::Black;
        let mut best: Option<(Score, Move)> = None;
        for mut mv in generated.moves {
            apply_move(board, &mut mv).unwrap();
            let immediate = winner(board) == Some(color);
            let score = if immediate {
                if maximizing {
                    WIN_SCORE
                } else {
                    LOSS_SCORE
                }
            } else {
                minimax(board, eval, color.opponent(), depth + 1, max_depth).0
            };
            reverse_move(board, &mv);
            if immediate {
                return (score, Some(mv));
            }
            let better = match &best {
                None => true,
                Some((s, _)) if maximizing => score > *s,
                Some((s, _)) => score < *s,
            };
            if better {
                best = Some((score, mv));
            }
        }
        let (score, mv) = best.unwrap();
        (score, Some(mv))
    }

    /// Midgame position with captures available for both sides
    fn tactical_board() -> Board {
        let mut board = Board::empty();
        for (x, y) in [(0, 0), (2, 0), (1, 1), (3, 3), (4, 2), (6, 2), (5, 1)] {
            board.place(sq(x, y), BLACK_MAN);
        }
        board.place(sq(2, 4), BLACK_KING);
        for (x, y) in [(4, 4), (6, 4), (1, 5), (5, 5), (7, 7), (3, 7), (0, 6)] {
            board.place(sq(x, y), WHITE_MAN);
        }
        board.place(sq(5, 3), WHITE_KING);
        board
    }

    #[test]
    fn test_starting_position_depth_one() {
        let mut board = Board::new();
        let before = board;
        let mut searcher = Searcher::new(Box::new(FnEvaluator(|b: &Board| {
            -(b.piece_count(Color::White) as Score - b.piece_count(Color::Black) as Score)
        })));

        let result = searcher.first_evaluate_max(&mut board, 1, None).unwrap();
        assert_eq!(result.score, 0.0);
        let best = result.best_move.unwrap();
        assert!(!best.is_jump());
        assert_eq!(best.from().y, 2);
        assert_eq!(best.destination().y, 3);

        let legal = generate_moves(&mut board, Color::Black).unwrap().moves;
        assert!(legal.contains(&best));
        assert_eq!(board, before);
    }

    #[test]
    fn test_alpha_beta_matches_minimax() {
        for max_depth in 1..=4 {
            for color in [Color::Black, Color::White] {
                for start in [Board::new(), tactical_board()] {
                    let mut board = start;
                    let mut reference_eval = HeuristicEvaluator::default();
                    let (expected_score, expected_move) =
                        minimax(&mut board, &mut reference_eval, color, 0, max_depth);

                    let mut searcher = Searcher::with_cache(
                        Box::new(HeuristicEvaluator::default()),
                        false,
                    );
                    let result = searcher.search(&mut board, color, max_depth, None).unwrap();

                    assert_eq!(result.score, expected_score, "depth {} {}", max_depth, color);
                    assert_eq!(result.best_move, expected_move, "depth {} {}", max_depth, color);
                    assert_eq!(board, start);
                }
            }
        }
    }

    #[test]
    fn test_cache_does_not_change_result() {
        let mut board = tactical_board();
        let mut cached = Searcher::new(Box::new(HeuristicEvaluator::default()));
        let mut plain = Searcher::with_cache(Box::new(HeuristicEvaluator::default()), false);

        let a = cached.first_evaluate_max(&mut board, 4, None).unwrap();
        let b = plain.first_evaluate_max(&mut board, 4, None).unwrap();
        assert_eq!(a.score, b.score);
        assert_eq!(a.best_move, b.best_move);
        assert!(cached.cache().unwrap().len() > 0);

        // Same search again is served from the cache
        let again = cached.first_evaluate_max(&mut board, 4, None).unwrap();
        assert_eq!(again.score, a.score);
        assert_eq!(again.stats.cache.misses, 0);
        assert!(again.stats.cache.hits > 0);
    }

    #[test]
    fn test_pruning_visits_fewer_nodes() {
        let mut board = Board::new();
        let mut searcher = Searcher::with_cache(material(), false);
        let result = searcher.first_evaluate_max(&mut board, 4, None).unwrap();
        assert!(result.stats.cutoffs > 0);
        assert!(result.stats.nodes > 0);
    }

    #[test]
    fn test_single_move_is_forced() {
        let mut board = Board::empty();
        board.place(sq(0, 0), BLACK_MAN);
        board.place(sq(7, 7), WHITE_MAN);

        let mut searcher = Searcher::new(material());
        let result = searcher.first_evaluate_max(&mut board, 6, None).unwrap();
        assert_eq!(result.best_move, Some(Move::new(sq(0, 0), sq(1, 1))));
        assert_eq!(result.second_best_move, result.best_move);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.leaf, None);
        assert_eq!(result.stats.leaf_evaluations, 0);
    }

    #[test]
    fn test_no_move_returns_loss() {
        let mut board = Board::empty();
        board.place(sq(0, 6), BLACK_MAN);
        board.place(sq(1, 7), WHITE_MAN);

        let mut searcher = Searcher::new(material());
        let result = searcher.first_evaluate_max(&mut board, 4, None).unwrap();
        assert!(result.best_move.is_none());
        assert_eq!(result.score, LOSS_SCORE);
    }

    #[test]
    fn test_takes_winning_capture() {
        // Two men can take the last white piece
        let mut board = Board::empty();
        board.place(sq(2, 2), BLACK_MAN);
        board.place(sq(4, 2), BLACK_MAN);
        board.place(sq(3, 3), WHITE_MAN);

        let mut searcher = Searcher::new(material());
        let result = searcher.first_evaluate_max(&mut board, 4, None).unwrap();
        assert_eq!(result.best_move, Some(Move::new(sq(2, 2), sq(4, 4))));
        assert_eq!(result.second_best_move, result.best_move);
        assert_eq!(result.score, WIN_SCORE);
        assert_eq!(result.leaf, None);

        let mut board = Board::empty();
        board.place(sq(4, 4), WHITE_KING);
        board.place(sq(2, 4), WHITE_MAN);
        board.place(sq(3, 3), BLACK_MAN);
        let result = searcher.first_evaluate_min(&mut board, 2, None).unwrap();
        assert_eq!(result.best_move, Some(Move::new(sq(2, 4), sq(4, 2))));
        assert_eq!(result.score, LOSS_SCORE);
    }

    #[test]
    fn test_forced_jump_extends_past_depth() {
        // (2,2)-(3,3) hangs the man to (4,4); at depth 1 that is only
        // visible because white's capture is searched past the horizon
        let mut board = Board::empty();
        board.place(sq(2, 2), BLACK_MAN);
        board.place(sq(5, 1), BLACK_MAN);
        board.place(sq(4, 4), WHITE_MAN);
        board.place(sq(7, 7), WHITE_MAN);

        let mut searcher = Searcher::with_cache(material(), false);
        let result = searcher.first_evaluate_max(&mut board, 1, None).unwrap();
        assert_eq!(result.best_move, Some(Move::new(sq(2, 2), sq(1, 3))));
        assert_eq!(result.second_best_move, Some(Move::new(sq(5, 1), sq(6, 2))));
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_second_best_tracking() {
        let mut board = Board::new();
        let mut searcher = Searcher::new(Box::new(HeuristicEvaluator::default()));
        let result = searcher.first_evaluate_max(&mut board, 3, None).unwrap();
        let best = result.best_move.unwrap();
        let second = result.second_best_move.unwrap();
        assert_ne!(best, second);

        let legal = generate_moves(&mut board, Color::Black).unwrap().moves;
        assert!(legal.contains(&second));
        assert_eq!(searcher.best_move(), Some(&best));
        assert_eq!(searcher.second_best_move(), Some(&second));
    }

    #[test]
    fn test_iterative_deepening_parity() {
        let mut board = Board::new();
        let mut searcher = Searcher::new(material());

        // Generous budget: runs all the way to max_depth
        let result = searcher
            .first_evaluate_max(&mut board, 5, Some(Duration::from_secs(60)))
            .unwrap();
        assert_eq!(result.depth, 5);

        // Exhausted budget: stops after the first iteration
        let result = searcher
            .first_evaluate_max(&mut board, 6, Some(Duration::ZERO))
            .unwrap();
        assert_eq!(result.depth, 2);
        let result = searcher
            .first_evaluate_min(&mut board, 7, Some(Duration::ZERO))
            .unwrap();
        assert_eq!(result.depth, 1);
        assert!(result.best_move.is_some());
    }

    #[test]
    fn test_zero_depth_searches_one_ply() {
        let mut board = Board::new();
        let mut searcher = Searcher::new(material());
        let result = searcher.first_evaluate_max(&mut board, 0, None).unwrap();
        assert_eq!(result.depth, 1);
        assert!(result.best_move.is_some());
    }

    #[test]
    fn test_set_evaluator_clears_cache() {
        let mut board = Board::new();
        let mut searcher = Searcher::new(material());
        searcher.first_evaluate_max(&mut board, 2, None).unwrap();
        assert!(!searcher.cache().unwrap().is_empty());

        searcher.set_evaluator(Box::new(HeuristicEvaluator::default()));
        assert!(searcher.cache().unwrap().is_empty());
        assert_eq!(searcher.evaluator_name(), "heuristic");
    }

    #[test]
    fn test_evaluator_error_propagates() {
        struct Failing;
        impl LeafEvaluator for Failing {
            fn evaluate(&mut self, _board: &Board) -> CheckersResult<Score> {
                Err(crate::error::CheckersError::Evaluator("broken".into()))
            }
            fn name(&self) -> &str {
                "failing"
            }
        }

        let mut board = Board::new();
        let before = board;
        let mut searcher = Searcher::new(Box::new(Failing));
        assert!(searcher.first_evaluate_max(&mut board, 3, None).is_err());
        // Every applied move was reversed on the way out
        assert_eq!(board, before);
    }
}
