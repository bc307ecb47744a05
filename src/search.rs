//! Depth-bounded minimax search with alpha-beta pruning
//!
//! The search always plays the AI as the maximizing side and scores leaves
//! from the AI's perspective. Trial moves are made on the caller's board and
//! undone before the next sibling is tried, so no board is ever copied.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::board::{Board, Piece};
use crate::error::SearchError;
use crate::evaluator;
use crate::win::has_line;

/// Score of a position won by the AI
pub const WIN_SCORE: i32 = 1_000_000;
/// Score of a position won by the human
pub const LOSS_SCORE: i32 = -WIN_SCORE;
/// Score of a full board with no line
pub const DRAW_SCORE: i32 = 0;

/// Optional bounds on how long a search may run
///
/// Both limits are checked on entry to every node. The timeout is measured
/// from the start of each search, so one `SearchLimits` can be reused for
/// every move of a game. The default imposes no limit at all.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchLimits {
    pub timeout: Option<Duration>,
    pub node_budget: Option<u64>,
}

impl SearchLimits {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            node_budget: None,
        }
    }

    pub fn with_node_budget(node_budget: u64) -> Self {
        Self {
            timeout: None,
            node_budget: Some(node_budget),
        }
    }
}

/// The outcome of a completed search
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    /// The best column for the side to move, `None` at a terminal position
    pub column: Option<usize>,
    pub score: i32,
    /// The number of nodes visited
    pub nodes: u64,
}

/// Minimax searcher over a shared, mutable board
pub struct SearchEngine<'a> {
    board: &'a mut Board,
    connect_length: usize,
    limits: SearchLimits,
    deadline: Option<Instant>,

    /// The number of nodes searched by this `SearchEngine` so far (for diagnostics only)
    pub node_count: u64,
}

impl<'a> SearchEngine<'a> {
    pub fn new(board: &'a mut Board, connect_length: usize) -> Self {
        Self {
            board,
            connect_length,
            limits: SearchLimits::unlimited(),
            deadline: None,
            node_count: 0,
        }
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Searches `depth` plies with alpha-beta pruning, the AI to move
    pub fn search(&mut self, depth: u32) -> Result<SearchResult, SearchError> {
        self.root(depth, true)
    }

    /// Plain minimax without pruning, returns the same column and score as [`search`](Self::search)
    pub fn minimax(&mut self, depth: u32) -> Result<SearchResult, SearchError> {
        self.root(depth, false)
    }

    fn root(&mut self, depth: u32, prune: bool) -> Result<SearchResult, SearchError> {
        if depth < 1 {
            return Err(SearchError::InvalidDepth(depth));
        }
        let start = Instant::now();
        self.deadline = self.limits.timeout.map(|timeout| start + timeout);
        self.node_count = 0;

        let (column, score) = self.alpha_beta(depth, i32::MIN, i32::MAX, true, prune)?;

        debug!(
            depth,
            ?column,
            score,
            nodes = self.node_count,
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "search finished"
        );
        Ok(SearchResult {
            column,
            score,
            nodes: self.node_count,
        })
    }

    fn check_limits(&self) -> Result<(), SearchError> {
        let exhausted = self
            .limits
            .node_budget
            .map_or(false, |budget| self.node_count > budget)
            || self
                .deadline
                .map_or(false, |deadline| Instant::now() >= deadline);
        if exhausted {
            Err(SearchError::Aborted {
                nodes: self.node_count,
            })
        } else {
            Ok(())
        }
    }

    /// The score of a node where the search stops
    fn leaf_score(&self, ai_line: bool, human_line: bool) -> i32 {
        if ai_line {
            WIN_SCORE
        } else if human_line {
            LOSS_SCORE
        } else if self.board.is_full() {
            DRAW_SCORE
        } else {
            evaluator::score(self.board, Piece::Ai, self.connect_length)
        }
    }

    /// Returns the best column and its value for the side to move
    ///
    /// The board is always restored before returning, including when the
    /// search is aborted part way through.
    fn alpha_beta(
        &mut self,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        prune: bool,
    ) -> Result<(Option<usize>, i32), SearchError> {
        self.node_count += 1;
        self.check_limits()?;

        let valid = self.board.ordered_columns();
        let ai_line = has_line(self.board, Piece::Ai, self.connect_length);
        let human_line = has_line(self.board, Piece::Human, self.connect_length);
        let terminal = valid.is_empty() || ai_line || human_line;

        if depth == 0 || terminal {
            return Ok((None, self.leaf_score(ai_line, human_line)));
        }

        let piece = if maximizing { Piece::Ai } else { Piece::Human };
        let mut best_column = None;
        let mut best_value = if maximizing { i32::MIN } else { i32::MAX };

        for column in valid {
            // `valid` only holds playable columns
            let row = match self.board.place(column, piece) {
                Ok(row) => row,
                Err(_) => continue,
            };
            let result = self.alpha_beta(depth - 1, alpha, beta, !maximizing, prune);
            self.board.remove(column, row);
            let (_, value) = result?;

            // strict comparisons keep the first column on ties
            if maximizing {
                if best_column.is_none() || value > best_value {
                    best_value = value;
                    best_column = Some(column);
                }
                alpha = alpha.max(best_value);
            } else {
                if best_column.is_none() || value < best_value {
                    best_value = value;
                    best_column = Some(column);
                }
                beta = beta.min(best_value);
            }
            if prune && alpha >= beta {
                break;
            }
        }

        Ok((best_column, best_value))
    }
}
