use tracing::debug;

pub const CELL_COUNT: usize = 9;

/// Every line that wins the game, as row-major cell indices.
pub const TRIPLES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// A 3x3 grid stored row-major; each cell is empty or holds a player's symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    cells: [Option<char>; CELL_COUNT],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.cells = [None; CELL_COUNT];
    }

    /// Places `symbol` at `index` if that cell is empty.
    ///
    /// Returns `false` for an occupied cell or an index past the grid; the
    /// board is left untouched in both cases.
    pub fn place(&mut self, index: usize, symbol: char) -> bool {
        match self.cells.get_mut(index) {
            Some(cell @ None) => {
                *cell = Some(symbol);
                true
            }
            Some(Some(existing)) => {
                debug!("Placement rejected: cell {} already holds {}.", index, existing);
                false
            }
            None => {
                debug!("Placement rejected: index {} is off the board.", index);
                false
            }
        }
    }

    pub fn cell(&self, index: usize) -> Option<char> {
        self.cells.get(index).copied().flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    pub fn check_win(&self) -> bool {
        self.winning_triple().is_some()
    }

    /// The first line holding three equal symbols, if any.
    pub fn winning_triple(&self) -> Option<[usize; 3]> {
        TRIPLES.into_iter().find(|&[a, b, c]| {
            self.cells[a].is_some() && self.cells[a] == self.cells[b] && self.cells[b] == self.cells[c]
        })
    }

    /// True when every cell is filled. Callers check for a win first: a full
    /// board with a complete line is a win.
    pub fn check_draw(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from(layout: &str) -> Board {
        let mut board = Board::new();
        for (index, c) in layout.chars().filter(|c| !c.is_whitespace()).enumerate() {
            if c != '.' {
                assert!(board.place(index, c));
            }
        }
        board
    }

    #[test]
    fn test_every_triple_wins() {
        for triple in TRIPLES {
            let mut board = Board::new();
            for index in triple {
                board.place(index, 'X');
            }
            assert!(board.check_win(), "triple {:?} should win", triple);
            assert_eq!(board.winning_triple(), Some(triple));
        }
    }

    #[test]
    fn test_two_in_a_row_does_not_win() {
        let board = board_from("XX. OO. ...");
        assert!(!board.check_win());
    }

    #[test]
    fn test_mixed_symbols_do_not_win() {
        let board = board_from("XOX ... ...");
        assert!(!board.check_win());
    }

    #[test]
    fn test_empty_board_has_no_win_or_draw() {
        let board = Board::new();
        assert!(!board.check_win());
        assert!(!board.check_draw());
        assert!(board.is_empty());
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        let board = board_from("XOX XOO OXX");
        assert!(!board.check_win());
        assert!(board.check_draw());
    }

    #[test]
    fn test_full_board_with_line_is_win() {
        let board = board_from("XXX OOX OXO");
        assert!(board.check_win());
        assert!(board.check_draw());
    }

    #[test]
    fn test_place_on_empty_cell_changes_exactly_one_cell() {
        let mut board = board_from("X.. ... ...");
        let before = board.clone();
        assert!(board.place(4, 'O'));
        let changed: Vec<usize> = (0..CELL_COUNT)
            .filter(|&i| board.cell(i) != before.cell(i))
            .collect();
        assert_eq!(changed, vec![4]);
        assert_eq!(board.cell(4), Some('O'));
    }

    #[test]
    fn test_place_on_occupied_cell_is_rejected() {
        let mut board = board_from("X.. ... ...");
        let before = board.clone();
        assert!(!board.place(0, 'O'));
        assert_eq!(board, before);
    }

    #[test]
    fn test_place_out_of_range_is_rejected() {
        let mut board = Board::new();
        assert!(!board.place(9, 'X'));
        assert!(board.is_empty());
    }

    #[test]
    fn test_reset_clears_all_cells() {
        let mut board = board_from("XOX XOO OXX");
        board.reset();
        assert!(board.is_empty());
    }
}
