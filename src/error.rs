//! Error types for every fallible operation of the engine

use thiserror::Error;

/// Errors raised by the gravity-drop board primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("column {column} out of range, columns must be between 0 and {columns}")]
    ColumnOutOfRange { column: usize, columns: usize },

    #[error("column {0} is full")]
    ColumnFull(usize),
}

/// Errors raised when changing the game configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown configuration key '{0}'")]
    UnknownKey(String),

    #[error("{key} = {value} is out of bounds: {reason}")]
    OutOfBounds {
        key: &'static str,
        value: usize,
        reason: &'static str,
    },
}

/// Errors raised by the search engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("search depth must be at least 1, got {0}")]
    InvalidDepth(u32),

    #[error("search aborted after {nodes} nodes")]
    Aborted { nodes: u64 },

    #[error("no move available, the game is over")]
    NoMove,
}

/// Errors raised when loading a position from its move-list encoding
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("could not parse '{0}' as a valid move")]
    Parse(String),

    #[error("position has {moves} moves but the board only holds {capacity}")]
    TooLong { moves: usize, capacity: usize },

    #[error("a position must start with a player's piece")]
    NoStartingPiece,

    #[error("illegal move {index} in position: {source}")]
    Illegal {
        index: usize,
        #[source]
        source: BoardError,
    },
}

/// Any error a [`GameSession`](crate::session::GameSession) operation can report
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("invalid column: {0}")]
    Board(#[from] BoardError),

    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),

    #[error("search failed: {0}")]
    Search(#[from] SearchError),

    #[error("invalid position: {0}")]
    Position(#[from] PositionError),
}
