//! Rules engine: move validation and status classification.

use super::board::Board;
use super::position::Position;
use super::types::{Game, GameStatus, Piece, PlayerId};
use tracing::{debug, instrument};

/// Capability interface for rule sets.
///
/// Every method is a pure function of the game value it is given.
pub trait GameEngine {
    /// Derives the current board from the game's players and moves.
    fn board_state(&self, game: &Game) -> Board;

    /// Returns true if `position` names a cell that is currently empty.
    ///
    /// Unrecognized labels yield `false`, never an error.
    fn is_valid_move(&self, game: &Game, position: &str) -> bool;

    /// Classifies the game as won, drawn, or ongoing.
    fn check_status(&self, game: &Game) -> GameStatus;

    /// Piece holding the first complete line, if any.
    fn winning_piece(&self, game: &Game) -> Option<Piece>;

    /// Player credited with the win.
    ///
    /// The unique player holding the winning piece. If no player or both
    /// players hold it, the player of the most recent move is credited.
    fn winner(&self, game: &Game) -> Option<PlayerId> {
        let piece = self.winning_piece(game)?;
        let mut holders = game.players().iter().filter(|p| *p.piece() == piece);
        match (holders.next(), holders.next()) {
            (Some(player), None) => Some(*player.id()),
            _ => game.last_move().map(|mv| *mv.player()),
        }
    }

    /// Renders the board, status, winner and move count for terminal output.
    fn format_game_output(&self, game: &Game) -> String;
}

/// Standard 3x3, three-in-a-row rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StandardGameEngine;

impl StandardGameEngine {
    /// Creates the engine.
    pub fn new() -> Self {
        Self
    }
}

impl GameEngine for StandardGameEngine {
    fn board_state(&self, game: &Game) -> Board {
        Board::from_game(game)
    }

    #[instrument(skip(self, game), fields(game_id = %game.id()))]
    fn is_valid_move(&self, game: &Game, position: &str) -> bool {
        let Some(pos) = Position::parse(position) else {
            debug!("Unrecognized position");
            return false;
        };
        self.board_state(game).is_empty(pos)
    }

    #[instrument(skip(self, game), fields(game_id = %game.id()))]
    fn check_status(&self, game: &Game) -> GameStatus {
        let board = self.board_state(game);
        let status = if board.winning_piece().is_some() {
            GameStatus::Win
        } else if board.is_full() {
            GameStatus::Draw
        } else {
            GameStatus::Ongoing
        };
        debug!(?status, "Status derived");
        status
    }

    fn winning_piece(&self, game: &Game) -> Option<Piece> {
        self.board_state(game).winning_piece()
    }

    #[instrument(skip(self, game), fields(game_id = %game.id()))]
    fn format_game_output(&self, game: &Game) -> String {
        let board = self.board_state(game);
        let status = self.check_status(game);

        let mut lines = vec![
            "Tic-Tac-Toe Game".to_string(),
            "=".repeat(20),
            String::new(),
            board.to_string(),
            String::new(),
            format!("Status: {status}"),
        ];

        if status == GameStatus::Win
            && let Some(winner) = game.winner()
        {
            let piece = game
                .player(*winner)
                .map(|p| p.piece().to_string())
                .unwrap_or_else(|| "?".to_string());
            lines.push(format!("Winner: {piece}"));
        }

        lines.push(format!("Moves made: {}", game.moves().len()));
        lines.join("\n")
    }
}
