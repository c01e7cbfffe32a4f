//! The 3x3 board, derived on demand from a game's move log.

use super::position::Position;
use super::types::{Game, Piece, PlayerId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Cell occupancy indexed `[row][col]`.
pub type Grid = [[Option<Piece>; 3]; 3];

/// The 8 lines that win the game, in scan order: rows, columns, diagonals.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::A1, Position::A2, Position::A3],
    [Position::B1, Position::B2, Position::B3],
    [Position::C1, Position::C2, Position::C3],
    // Columns
    [Position::A1, Position::B1, Position::C1],
    [Position::A2, Position::B2, Position::C2],
    [Position::A3, Position::B3, Position::C3],
    // Diagonals
    [Position::A1, Position::B2, Position::C3],
    [Position::A3, Position::B2, Position::C1],
];

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    cells: Grid,
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives the board from a game's players and moves.
    ///
    /// Moves are applied in sequence-number order, never insertion order,
    /// so the result does not depend on how the log was assembled. Moves
    /// with an unrecognized label are skipped, and moves by a player not
    /// in the game leave their cell untouched.
    #[instrument(skip(game), fields(game_id = %game.id(), moves = game.moves().len()))]
    pub fn from_game(game: &Game) -> Self {
        let pieces: HashMap<PlayerId, Piece> = game
            .players()
            .iter()
            .map(|player| (*player.id(), *player.piece()))
            .collect();

        let mut board = Self::new();
        for mv in game.sorted_moves() {
            let Some(pos) = mv.cell() else {
                debug!(
                    position = %mv.position(),
                    order = mv.order(),
                    "Skipping unrecognized position"
                );
                continue;
            };
            match pieces.get(mv.player()) {
                Some(piece) => board.set(pos, *piece),
                None => debug!(
                    player = %mv.player(),
                    order = mv.order(),
                    "Skipping move by unknown player"
                ),
            }
        }
        board
    }

    /// Returns the piece at `pos`, if any.
    pub fn get(&self, pos: Position) -> Option<Piece> {
        self.cells[pos.row()][pos.col()]
    }

    /// Places `piece` at `pos`, replacing whatever was there.
    pub fn set(&mut self, pos: Position, piece: Piece) {
        self.cells[pos.row()][pos.col()] = Some(piece);
    }

    /// Returns true if nothing occupies `pos`.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos).is_none()
    }

    /// Returns true if every cell is occupied.
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_some)
    }

    /// Number of occupied cells.
    pub fn occupied(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| cell.is_some())
            .count()
    }

    /// Piece holding the first complete line in [`LINES`] order.
    pub fn winning_piece(&self) -> Option<Piece> {
        LINES.iter().find_map(|&[a, b, c]| {
            let piece = self.get(a)?;
            (self.get(b) == Some(piece) && self.get(c) == Some(piece)).then_some(piece)
        })
    }

    /// Raw grid, `[row][col]`.
    pub fn grid(&self) -> &Grid {
        &self.cells
    }
}

impl std::fmt::Display for Board {
    /// Draws the grid with row letters and column digits.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "    1   2   3")?;
        writeln!(f, "  ┌───┬───┬───┐")?;
        for (row_idx, row) in self.cells.iter().enumerate() {
            let label = ['A', 'B', 'C'][row_idx];
            write!(f, "{label} │")?;
            for cell in row {
                match cell {
                    Some(piece) => write!(f, " {piece} │")?,
                    None => write!(f, "   │")?,
                }
            }
            writeln!(f)?;
            if row_idx < 2 {
                writeln!(f, "  ├───┼───┼───┤")?;
            }
        }
        write!(f, "  └───┴───┴───┘")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Move, Player, PlayerKind};
    use uuid::Uuid;

    fn players() -> (Player, Player) {
        (
            Player::new(Uuid::new_v4(), PlayerKind::Human, Piece::X),
            Player::new(Uuid::new_v4(), PlayerKind::Computer, Piece::O),
        )
    }

    #[test]
    fn test_empty_game_gives_empty_board() {
        let (x, o) = players();
        let board = Board::from_game(&Game::new(Uuid::new_v4(), vec![x, o]));
        assert_eq!(board, Board::new());
        assert_eq!(board.occupied(), 0);
        assert!(board.grid().iter().flatten().all(Option::is_none));
    }

    #[test]
    fn test_single_move() {
        let (x, o) = players();
        let game = Game::new(Uuid::new_v4(), vec![x.clone(), o])
            .with_moves([Move::new("B2", *x.id(), 1)]);
        let board = Board::from_game(&game);
        assert_eq!(board.grid()[1][1], Some(Piece::X));
        assert_eq!(board.grid()[0][0], None);
        assert_eq!(board.grid()[2][2], None);
    }

    #[test]
    fn test_out_of_order_log() {
        let (x, o) = players();
        let game = Game::new(Uuid::new_v4(), vec![x.clone(), o.clone()]).with_moves([
            Move::new("C3", *x.id(), 3),
            Move::new("A1", *x.id(), 1),
            Move::new("B2", *o.id(), 2),
        ]);
        let board = Board::from_game(&game);
        assert_eq!(board.get(Position::A1), Some(Piece::X));
        assert_eq!(board.get(Position::B2), Some(Piece::O));
        assert_eq!(board.get(Position::C3), Some(Piece::X));
    }

    #[test]
    fn test_lowercase_label_is_applied() {
        let (x, o) = players();
        let game = Game::new(Uuid::new_v4(), vec![x.clone(), o])
            .with_moves([Move::new("c1", *x.id(), 1)]);
        assert_eq!(Board::from_game(&game).get(Position::C1), Some(Piece::X));
    }

    #[test]
    fn test_malformed_label_is_skipped() {
        let (x, o) = players();
        let game = Game::new(Uuid::new_v4(), vec![x.clone(), o])
            .with_moves([Move::new("Z9", *x.id(), 1), Move::new("A1", *x.id(), 2)]);
        let board = Board::from_game(&game);
        assert_eq!(board.occupied(), 1);
        assert_eq!(board.get(Position::A1), Some(Piece::X));
    }

    #[test]
    fn test_unknown_player_leaves_cell_empty() {
        let (x, o) = players();
        let game = Game::new(Uuid::new_v4(), vec![x, o])
            .with_moves([Move::new("B2", Uuid::new_v4(), 1)]);
        assert!(Board::from_game(&game).is_empty(Position::B2));
    }

    #[test]
    fn test_winning_piece_on_each_line() {
        for line in LINES {
            let mut board = Board::new();
            for pos in line {
                board.set(pos, Piece::O);
            }
            assert_eq!(board.winning_piece(), Some(Piece::O), "line {line:?}");
        }
    }

    #[test]
    fn test_no_winning_piece_for_mixed_line() {
        let mut board = Board::new();
        board.set(Position::A1, Piece::X);
        board.set(Position::A2, Piece::O);
        board.set(Position::A3, Piece::X);
        assert_eq!(board.winning_piece(), None);
        assert!(!board.is_full());
    }

    #[test]
    fn test_display_labels_rows_and_columns() {
        let mut board = Board::new();
        board.set(Position::A1, Piece::X);
        board.set(Position::B2, Piece::O);
        let text = board.to_string();
        assert!(text.starts_with("    1   2   3"));
        assert!(text.contains("A │ X │   │   │"));
        assert!(text.contains("B │   │ O │   │"));
        assert!(text.contains("C │   │   │   │"));
    }
}
