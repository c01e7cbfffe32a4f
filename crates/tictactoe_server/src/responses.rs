//! Structured answers returned by the game service.
//!
//! IDs are rendered as hyphenated UUID strings.

use serde::{Deserialize, Serialize};
use tictactoe_core::{GameStatus, Move, Piece, Player, PlayerKind};

/// A freshly created game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameCreated {
    /// The new game's ID.
    pub game_uuid: String,
    /// First player's ID.
    pub player1_uuid: String,
    /// Second player's ID.
    pub player2_uuid: String,
    /// Human-readable confirmation.
    pub message: String,
}

/// A position suggested by an AI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveSuggestion {
    /// Game the suggestion is for.
    pub game_uuid: String,
    /// Player the suggestion is for.
    pub player_uuid: String,
    /// Suggested label, e.g. `"B2"`.
    pub position: String,
    /// Strategy that produced it.
    pub ai_type: String,
    /// Human-readable summary.
    pub message: String,
}

/// One move as reported to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Board label.
    pub position: String,
    /// Player who made it.
    pub player_uuid: String,
    /// 1-based sequence number.
    pub order: u8,
}

impl From<&Move> for MoveRecord {
    fn from(mv: &Move) -> Self {
        Self {
            position: mv.position().clone(),
            player_uuid: mv.player().to_string(),
            order: *mv.order(),
        }
    }
}

/// Result of appending a move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveAdded {
    /// Game the move was added to.
    pub game_uuid: String,
    /// The stored move.
    #[serde(rename = "move")]
    pub mv: MoveRecord,
    /// Status after the move.
    pub status: GameStatus,
    /// Credited winner, once the game is won.
    pub winner: Option<String>,
    /// Human-readable confirmation.
    pub message: String,
}

/// One participant as reported to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Player ID.
    pub uuid: String,
    /// Human or computer.
    #[serde(rename = "type")]
    pub kind: PlayerKind,
    /// Assigned piece.
    pub piece: Piece,
}

impl From<&Player> for PlayerRecord {
    fn from(player: &Player) -> Self {
        Self {
            uuid: player.id().to_string(),
            kind: *player.kind(),
            piece: *player.piece(),
        }
    }
}

/// Full game state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Game ID.
    pub game_uuid: String,
    /// Stored status.
    pub status: GameStatus,
    /// Credited winner, if any.
    pub winner: Option<String>,
    /// Both participants.
    pub players: Vec<PlayerRecord>,
    /// Moves in chronological order.
    pub moves: Vec<MoveRecord>,
}

/// Freshly derived status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    /// Game ID.
    pub game_uuid: String,
    /// Status derived from the move log.
    pub status: GameStatus,
    /// Credited winner, if any.
    pub winner: Option<String>,
    /// True for Win and Draw.
    pub is_game_over: bool,
}

/// Move history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveHistory {
    /// Game ID.
    pub game_uuid: String,
    /// Moves in chronological order.
    pub moves: Vec<MoveRecord>,
}
