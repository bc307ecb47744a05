//! A single game between a human and the AI
//!
//! [`GameSession`] owns the board, the configuration and the move history.
//! The spec-level operations report failure with `false`/`None`; each has a
//! `try_` counterpart returning the typed [`GameError`].

use std::fmt;

use tracing::{debug, info, trace};

use crate::board::{Board, Piece};
use crate::config::{Config, ConfigKey};
use crate::error::{BoardError, GameError, PositionError, SearchError};
use crate::search::{SearchEngine, SearchLimits, SearchResult};
use crate::win::has_line;

/// The piece that makes the first move of a replayed position
pub const STARTING_PIECE: Piece = Piece::Human;

/// A move that has been played
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Move {
    pub column: usize,
    pub row: usize,
    pub piece: Piece,
}

/// The moves of a game in the order they were played
#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct MoveHistory(Vec<Move>);

impl MoveHistory {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, new_move: Move) {
        self.0.push(new_move)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&Move> {
        self.0.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.0.iter()
    }

    /// Parses a comma separated list of 1-indexed columns into 0-indexed columns
    pub fn parse_columns(moves: &str) -> Result<Vec<usize>, PositionError> {
        if moves.trim().is_empty() {
            return Ok(Vec::new());
        }
        moves
            .split(',')
            .map(|entry| match entry.trim().parse::<usize>() {
                Ok(column) if column >= 1 => Ok(column - 1),
                _ => Err(PositionError::Parse(entry.to_string())),
            })
            .collect()
    }
}

impl fmt::Display for MoveHistory {
    /// The 1-indexed columns of every move, separated by commas
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, played) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", played.column + 1)?;
        }
        Ok(())
    }
}

/// Board, configuration and history of one game
#[derive(Clone, Debug)]
pub struct GameSession {
    board: Board,
    config: Config,
    history: MoveHistory,
    limits: SearchLimits,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl GameSession {
    pub fn new(config: Config) -> Self {
        Self {
            board: Board::new(config.rows(), config.columns()),
            config,
            history: MoveHistory::new(),
            limits: SearchLimits::unlimited(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    /// Sets the limits applied to every following AI search
    ///
    /// A timeout applies to each search separately, measured from its start.
    pub fn set_search_limits(&mut self, limits: SearchLimits) {
        self.limits = limits;
    }

    /// Clears the board and the history
    pub fn new_game(&mut self) {
        info!(
            rows = self.config.rows(),
            columns = self.config.columns(),
            connect_length = self.config.connect_length(),
            "new game"
        );
        self.board = Board::new(self.config.rows(), self.config.columns());
        self.history = MoveHistory::new();
    }

    pub fn can_play(&self, column: usize) -> bool {
        self.board.is_column_playable(column)
    }

    /// Playable columns in ascending order
    pub fn valid_columns(&self) -> Vec<usize> {
        self.board.valid_columns()
    }

    /// A copy of the grid, row 0 is the top row
    pub fn display_board(&self) -> Vec<Vec<Piece>> {
        self.board.cells()
    }

    fn apply(&mut self, column: usize, piece: Piece) -> Result<Move, BoardError> {
        let row = self.board.place(column, piece)?;
        let played = Move { column, row, piece };
        trace!(column, row, ?piece, "move played");
        self.history.push(played);
        Ok(played)
    }

    pub fn try_play_human(&mut self, column: usize) -> Result<Move, GameError> {
        Ok(self.apply(column, Piece::Human)?)
    }

    pub fn play_human(&mut self, column: usize) -> bool {
        log_rejection("play_human", self.try_play_human(column)).is_some()
    }

    /// Runs a search for the AI without changing the game
    pub fn best_move(&mut self, depth: Option<u32>) -> Result<SearchResult, GameError> {
        let depth = depth.unwrap_or_else(|| self.config.search_depth());
        let result = SearchEngine::new(&mut self.board, self.config.connect_length())
            .with_limits(self.limits)
            .search(depth)?;
        Ok(result)
    }

    pub fn get_best_move(&mut self, depth: Option<u32>) -> Option<usize> {
        log_rejection("get_best_move", self.best_move(depth)).and_then(|result| result.column)
    }

    /// Plays the AI in `column`, or in the column found by a search of `depth` plies
    pub fn try_play_ai(
        &mut self,
        column: Option<usize>,
        depth: Option<u32>,
    ) -> Result<Move, GameError> {
        let column = match column {
            Some(column) => column,
            None => self
                .best_move(depth)?
                .column
                .ok_or(SearchError::NoMove)?,
        };
        Ok(self.apply(column, Piece::Ai)?)
    }

    pub fn play_ai(&mut self, column: Option<usize>, depth: Option<u32>) -> bool {
        log_rejection("play_ai", self.try_play_ai(column, depth)).is_some()
    }

    /// Changes a configuration setting by name
    ///
    /// Changing `rows`, `columns` or `connect_length` discards the game in
    /// progress, including its history, and starts a new one under the new
    /// shape. Changing `search_depth` keeps the current game.
    pub fn try_set(&mut self, key: &str, value: usize) -> Result<(), GameError> {
        let key: ConfigKey = key.parse()?;
        if self.config.get(key) == value {
            return Ok(());
        }
        self.config.set(key, value)?;
        if key.resets_game() {
            self.new_game();
        }
        Ok(())
    }

    pub fn set(&mut self, key: &str, value: usize) -> bool {
        log_rejection("set", self.try_set(key, value)).is_some()
    }

    /// Replaces the game with the position reached by `moves`
    ///
    /// Moves alternate between the pieces, starting with [`STARTING_PIECE`].
    /// Nothing changes if the position cannot be replayed.
    pub fn try_set_pos(&mut self, moves: &str) -> Result<(), GameError> {
        self.try_set_pos_starting_with(moves, STARTING_PIECE)
    }

    /// Like [`try_set_pos`](Self::try_set_pos) for a game opened by `first`
    ///
    /// The move list itself does not record who moved first, so a position
    /// taken from an AI-first game must be loaded back with `Piece::Ai`.
    pub fn try_set_pos_starting_with(&mut self, moves: &str, first: Piece) -> Result<(), GameError> {
        if first.is_empty() {
            return Err(PositionError::NoStartingPiece.into());
        }
        let columns = MoveHistory::parse_columns(moves)?;
        let capacity = self.config.capacity();
        if columns.len() > capacity {
            return Err(PositionError::TooLong {
                moves: columns.len(),
                capacity,
            }
            .into());
        }

        let mut board = Board::new(self.config.rows(), self.config.columns());
        let mut history = MoveHistory::new();
        let mut piece = first;
        for (index, &column) in columns.iter().enumerate() {
            let row = board
                .place(column, piece)
                .map_err(|source| PositionError::Illegal { index, source })?;
            history.push(Move { column, row, piece });
            piece = piece.opponent();
        }

        debug!(moves = history.len(), "position loaded");
        self.board = board;
        self.history = history;
        Ok(())
    }

    pub fn set_pos(&mut self, moves: &str) -> bool {
        log_rejection("set_pos", self.try_set_pos(moves)).is_some()
    }

    /// The piece that made the first move, if any move was made
    pub fn first_piece(&self) -> Option<Piece> {
        self.history.iter().next().map(|played| played.piece)
    }

    /// The move list of the current game, see [`set_pos`](Self::set_pos)
    ///
    /// Only the columns are encoded. Replaying the list with
    /// [`try_set_pos_starting_with`](Self::try_set_pos_starting_with) and
    /// [`first_piece`](Self::first_piece) restores a game the AI opened.
    pub fn get_pos(&self) -> String {
        self.history.to_string()
    }

    pub fn is_full(&self) -> bool {
        self.board.is_full()
    }

    pub fn is_won(&self) -> bool {
        self.winner().is_some()
    }

    pub fn is_over(&self) -> bool {
        self.is_full() || self.is_won()
    }

    /// The piece with a line on the board, the AI takes precedence if both have one
    pub fn winner(&self) -> Option<Piece> {
        let length = self.config.connect_length();
        if has_line(&self.board, Piece::Ai, length) {
            Some(Piece::Ai)
        } else if has_line(&self.board, Piece::Human, length) {
            Some(Piece::Human)
        } else {
            None
        }
    }
}

fn log_rejection<T>(operation: &'static str, result: Result<T, GameError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            debug!(operation, %err, "rejected");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn human_moves_are_recorded() {
        let mut session = GameSession::default();
        assert!(session.play_human(3));
        assert!(session.play_human(3));
        assert_eq!(
            session.history().last(),
            Some(&Move {
                column: 3,
                row: 4,
                piece: Piece::Human
            })
        );
        assert_eq!(session.get_pos(), "4,4");
    }

    #[test]
    fn invalid_columns_are_rejected() {
        let mut session = GameSession::new(Config::new(3, 3, 3, 1).unwrap());
        assert!(!session.play_human(3));
        for _ in 0..3 {
            assert!(session.play_ai(Some(0), None));
        }
        assert!(!session.can_play(0));
        assert!(!session.play_human(0));
        assert!(!session.play_ai(Some(0), None));
        assert_eq!(session.history().len(), 3);
        assert_eq!(session.valid_columns(), vec![1, 2]);
    }

    #[test]
    fn zero_depth_does_not_move() {
        let mut session = GameSession::default();
        assert!(!session.play_ai(None, Some(0)));
        assert_eq!(session.get_best_move(Some(0)), None);
        assert!(session.history().is_empty());
        assert_eq!(
            session.try_play_ai(None, Some(0)),
            Err(GameError::Search(SearchError::InvalidDepth(0)))
        );
    }

    #[test]
    fn ai_plays_searched_move() {
        let mut session = GameSession::default();
        assert!(session.play_ai(None, Some(2)));
        let played = *session.history().last().unwrap();
        assert_eq!(played.piece, Piece::Ai);
        assert_eq!(played.column, 3);
    }

    #[test]
    fn no_move_on_a_finished_game() {
        let mut session = GameSession::default();
        for _ in 0..4 {
            session.play_human(6);
        }
        assert_eq!(session.get_best_move(Some(3)), None);
        assert_eq!(
            session.try_play_ai(None, Some(3)),
            Err(GameError::Search(SearchError::NoMove))
        );
    }

    #[test]
    fn set_pos_alternates_from_the_human() {
        let mut session = GameSession::default();
        assert!(session.set_pos("4, 4,5"));
        let pieces: Vec<Piece> = session.history().iter().map(|m| m.piece).collect();
        assert_eq!(pieces, vec![Piece::Human, Piece::Ai, Piece::Human]);
        assert_eq!(session.board().get(4, 3), Piece::Ai);
        assert_eq!(session.get_pos(), "4,4,5");
    }

    #[test]
    fn failed_set_pos_keeps_the_game() {
        let mut session = GameSession::new(Config::new(3, 3, 3, 1).unwrap());
        session.play_human(1);

        // too many moves for a 3x3 board
        assert!(!session.set_pos("1,1,1,2,2,2,3,3,3,1"));
        // column 4 does not exist
        assert!(!session.set_pos("1,4"));
        // column 1 overflows
        assert!(!session.set_pos("1,1,1,1"));
        assert!(!session.set_pos("1,x"));
        assert!(!session.set_pos("0"));

        assert_eq!(session.get_pos(), "2");
        assert_eq!(session.board().get(2, 1), Piece::Human);
    }

    #[test]
    fn ai_first_position_round_trip() {
        let mut session = GameSession::default();
        assert!(session.play_ai(Some(3), None));
        assert!(session.play_human(3));
        assert!(session.play_ai(Some(2), None));
        let position = session.get_pos();
        assert_eq!(session.first_piece(), Some(Piece::Ai));

        let mut replayed = GameSession::default();
        assert_eq!(
            replayed.try_set_pos_starting_with(&position, Piece::Ai),
            Ok(())
        );
        assert_eq!(replayed.display_board(), session.display_board());
        assert_eq!(replayed.history(), session.history());

        // the default replay would swap the colours
        assert!(replayed.set_pos(&position));
        assert_eq!(replayed.board().get(5, 3), Piece::Human);
        assert_eq!(
            replayed.try_set_pos_starting_with("1", Piece::Empty),
            Err(GameError::Position(PositionError::NoStartingPiece))
        );
    }

    #[test]
    fn timeout_applies_to_every_ai_move() {
        use std::time::Duration;

        let mut session = GameSession::default();
        session.set_search_limits(SearchLimits::with_timeout(Duration::from_millis(500)));
        assert!(session.play_ai(None, Some(1)));

        // longer than the timeout, the next search still gets its own budget
        std::thread::sleep(Duration::from_millis(600));
        assert!(session.play_human(0));
        assert!(session.play_ai(None, Some(1)));
        assert!(session.get_best_move(Some(1)).is_some());
        assert_eq!(session.history().len(), 3);
    }

    #[test]
    fn empty_position_is_an_empty_board() {
        let mut session = GameSession::default();
        session.play_human(0);
        assert!(session.set_pos(""));
        assert!(session.history().is_empty());
        assert_eq!(session.board().num_pieces(), 0);
    }

    #[test]
    fn set_rejects_unknown_keys_and_bad_values() {
        let mut session = GameSession::default();
        session.play_human(2);
        assert!(!session.set("length", 5));
        assert!(!session.set("connect_length", 8));
        assert!(!session.set("search_depth", 0));
        assert_eq!(session.config(), &Config::default());
        assert_eq!(session.get_pos(), "3");
    }

    #[test]
    fn shape_changes_reset_the_game() {
        let mut session = GameSession::default();
        session.play_human(2);
        assert!(session.set("search_depth", 3));
        assert_eq!(session.get_pos(), "3");

        // the game in progress is discarded
        assert!(session.set("rows", 8));
        assert!(session.history().is_empty());
        assert_eq!(session.board().num_pieces(), 0);
        assert_eq!(session.display_board().len(), 8);
        assert_eq!(session.display_board()[0].len(), 7);
    }
}
