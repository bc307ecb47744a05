use crate::error::BoardError;

/// The contents of a single board cell
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Piece {
    Empty,
    Human,
    Ai,
}

impl Piece {
    pub fn is_empty(&self) -> bool {
        match self {
            Piece::Empty => true,
            _ => false,
        }
    }

    /// The piece of the other player, `Empty` maps to itself
    pub fn opponent(&self) -> Piece {
        match self {
            Piece::Human => Piece::Ai,
            Piece::Ai => Piece::Human,
            Piece::Empty => Piece::Empty,
        }
    }
}

impl Default for Piece {
    fn default() -> Self {
        Piece::Empty
    }
}

/// A rows x columns grid with gravity-drop placement
///
/// Row 0 is the top of the board. Pieces are only ever added at the lowest
/// empty cell of a column and removed from the highest occupied one, so every
/// column is a contiguous stack growing upwards from the bottom row.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    rows: usize,
    columns: usize,
    cells: Vec<Piece>, // cells are stored left-to-right, top-to-bottom
    heights: Vec<usize>,
}

impl Board {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: vec![Piece::Empty; rows * columns],
            heights: vec![0; columns],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// The piece at `(row, column)`, panics if the cell is off the board
    pub fn get(&self, row: usize, column: usize) -> Piece {
        self.cells[row * self.columns + column]
    }

    /// The number of pieces stacked in `column`
    pub fn height(&self, column: usize) -> usize {
        self.heights[column]
    }

    pub fn num_pieces(&self) -> usize {
        self.heights.iter().sum()
    }

    pub fn count(&self, piece: Piece) -> usize {
        self.cells.iter().filter(|&&cell| cell == piece).count()
    }

    pub fn is_column_playable(&self, column: usize) -> bool {
        column < self.columns && self.get(0, column).is_empty()
    }

    /// The row a piece dropped into `column` would land on
    pub fn next_open_row(&self, column: usize) -> Option<usize> {
        if column >= self.columns {
            return None;
        }
        (0..self.rows)
            .rev()
            .find(|&row| self.get(row, column).is_empty())
    }

    /// Drops `piece` into `column`, returning the row it landed on
    pub fn place(&mut self, column: usize, piece: Piece) -> Result<usize, BoardError> {
        if column >= self.columns {
            return Err(BoardError::ColumnOutOfRange {
                column,
                columns: self.columns,
            });
        }
        let row = self
            .next_open_row(column)
            .ok_or(BoardError::ColumnFull(column))?;

        self.cells[row * self.columns + column] = piece;
        self.heights[column] += 1;
        Ok(row)
    }

    /// Clears the cell at `(row, column)`
    ///
    /// Only the topmost piece of a column may be removed, which is how the
    /// search engine undoes a trial move.
    pub fn remove(&mut self, column: usize, row: usize) {
        debug_assert!(self.heights[column] > 0, "removing from an empty column");
        debug_assert_eq!(
            row,
            self.rows - self.heights[column],
            "only the top piece of a column can be removed"
        );
        self.cells[row * self.columns + column] = Piece::Empty;
        self.heights[column] -= 1;
    }

    /// All playable columns in ascending order
    pub fn valid_columns(&self) -> Vec<usize> {
        (0..self.columns)
            .filter(|&column| self.is_column_playable(column))
            .collect()
    }

    /// All playable columns ordered from the centre column outwards
    ///
    /// The centre is always `columns / 2` of the full board, not of the
    /// playable subset. Equidistant columns keep ascending order.
    pub fn ordered_columns(&self) -> Vec<usize> {
        let center = self.columns / 2;
        let mut columns = self.valid_columns();
        // sort_by_key is stable, so the left column of a pair comes first
        columns.sort_by_key(|&column| (column as isize - center as isize).abs());
        columns
    }

    pub fn is_full(&self) -> bool {
        (0..self.columns).all(|column| !self.is_column_playable(column))
    }

    /// A row-major copy of the grid, row 0 first
    pub fn cells(&self) -> Vec<Vec<Piece>> {
        self.cells
            .chunks(self.columns)
            .map(|row| row.to_vec())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_drops_to_the_bottom() {
        let mut board = Board::new(6, 7);
        assert_eq!(board.place(3, Piece::Human), Ok(5));
        assert_eq!(board.place(3, Piece::Ai), Ok(4));
        assert_eq!(board.get(5, 3), Piece::Human);
        assert_eq!(board.get(4, 3), Piece::Ai);
        assert_eq!(board.next_open_row(3), Some(3));
        assert_eq!(board.height(3), 2);
    }

    #[test]
    fn full_column_is_rejected() {
        let mut board = Board::new(3, 3);
        for _ in 0..3 {
            board.place(1, Piece::Human).unwrap();
        }
        assert!(!board.is_column_playable(1));
        assert_eq!(board.next_open_row(1), None);
        assert_eq!(board.place(1, Piece::Ai), Err(BoardError::ColumnFull(1)));
        assert_eq!(board.valid_columns(), vec![0, 2]);
    }

    #[test]
    fn out_of_range_column_never_panics() {
        let mut board = Board::new(6, 7);
        assert!(!board.is_column_playable(7));
        assert_eq!(board.next_open_row(100), None);
        assert_eq!(
            board.place(7, Piece::Ai),
            Err(BoardError::ColumnOutOfRange { column: 7, columns: 7 })
        );
    }

    #[test]
    fn remove_undoes_place() {
        let mut board = Board::new(6, 7);
        board.place(2, Piece::Ai).unwrap();
        let before = board.clone();
        let row = board.place(2, Piece::Human).unwrap();
        board.remove(2, row);
        assert_eq!(board, before);
    }

    #[test]
    fn ordered_columns_start_at_the_centre() {
        let mut board = Board::new(3, 7);
        assert_eq!(board.ordered_columns(), vec![3, 2, 4, 1, 5, 0, 6]);

        // the centre stays the centre of the whole board when columns fill up
        for _ in 0..3 {
            board.place(3, Piece::Human).unwrap();
            board.place(4, Piece::Ai).unwrap();
        }
        assert_eq!(board.ordered_columns(), vec![2, 1, 5, 0, 6]);
    }

    #[test]
    fn is_full_checks_every_column() {
        let mut board = Board::new(3, 3);
        for column in 0..3 {
            for _ in 0..3 {
                assert!(!board.is_full());
                board.place(column, Piece::Human).unwrap();
            }
        }
        assert!(board.is_full());
        assert_eq!(board.num_pieces(), 9);
        assert!(board.valid_columns().is_empty());
    }
}
