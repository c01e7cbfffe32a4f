//! Errors returned by the game service.

use derive_more::{Display, Error};
use tictactoe_core::{AiError, GameStatus, Piece};

/// Reasons a game-service request is rejected.
#[derive(Debug, Clone, Display, Error)]
pub enum ServiceError {
    /// No game is stored under the ID.
    #[display("Game {game_id} not found")]
    GameNotFound {
        /// The requested ID.
        game_id: String,
    },

    /// Text that is not a UUID.
    #[display("Invalid {what} UUID: {value}")]
    InvalidId {
        /// Which identifier was malformed.
        what: &'static str,
        /// The rejected text.
        value: String,
    },

    /// Position is malformed or occupied.
    #[display("Invalid move: {position} is not a valid or available position")]
    InvalidMove {
        /// The rejected position label.
        position: String,
    },

    /// The game already finished.
    #[display("Game {game_id} is over ({status})")]
    GameOver {
        /// The game's ID.
        game_id: String,
        /// Its terminal status.
        status: GameStatus,
    },

    /// Player is not a participant in the game.
    #[display("Player {player_id} is not in game {game_id}")]
    UnknownPlayer {
        /// The game's ID.
        game_id: String,
        /// The rejected player ID.
        player_id: String,
    },

    /// Player type other than human or computer.
    #[display("Invalid player type: {value}")]
    InvalidPlayerKind {
        /// The rejected text.
        value: String,
    },

    /// Piece other than X or O.
    #[display("Invalid piece: {value}")]
    InvalidPiece {
        /// The rejected text.
        value: String,
    },

    /// Both players were given the same piece.
    #[display("Both players cannot play {piece}")]
    DuplicatePieces {
        /// The shared piece.
        piece: Piece,
    },

    /// The AI could not suggest a move.
    #[display("{source}")]
    NoValidMoves {
        /// Underlying AI error.
        source: AiError,
    },
}

impl From<AiError> for ServiceError {
    fn from(source: AiError) -> Self {
        ServiceError::NoValidMoves { source }
    }
}
