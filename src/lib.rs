//! An agent for playing generalized 'Connect 4' against a human
//!
//! The board may have any number of rows and columns, and a game is won by
//! the first player to get `connect_length` pieces in a row. The AI picks its
//! moves with a depth-bounded minimax search using alpha-beta pruning and a
//! positional heuristic at the leaves.
//!
//! # Basic Usage
//!
//! ```
//! use connectk_ai::session::GameSession;
//!
//! let mut session = GameSession::default();
//! assert!(session.set_pos("1,7,2,7,3"));
//!
//! // the AI blocks the open end of the human's three in a row
//! assert_eq!(session.get_best_move(Some(2)), Some(3));
//! assert!(session.play_ai(None, Some(2)));
//! assert_eq!(session.get_pos(), "1,7,2,7,3,4");
//! assert_eq!(session.winner(), None);
//! ```

use static_assertions::*;

pub mod error;

pub mod board;

pub mod win;

pub mod evaluator;

pub mod search;

pub mod config;

pub mod session;


/// The default height of the game board in tiles
pub const DEFAULT_ROWS: usize = 6;

/// The default width of the game board in tiles
pub const DEFAULT_COLUMNS: usize = 7;

/// The default number of pieces in a row needed to win
pub const DEFAULT_CONNECT_LENGTH: usize = 4;

/// The default number of plies the AI searches
pub const DEFAULT_SEARCH_DEPTH: u32 = 7;

// ensure the default game is a valid configuration
const_assert!(DEFAULT_CONNECT_LENGTH >= config::MIN_DIMENSION);
const_assert!(DEFAULT_CONNECT_LENGTH <= DEFAULT_ROWS);
const_assert!(DEFAULT_CONNECT_LENGTH <= DEFAULT_COLUMNS);
const_assert!(DEFAULT_SEARCH_DEPTH >= 1);
