//! Core domain types for tic-tac-toe games.

use super::position::Position;
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::instrument;
use uuid::Uuid;

/// Unique identifier for a game.
pub type GameId = Uuid;

/// Unique identifier for a player.
pub type PlayerId = Uuid;

/// Marker a player places on the board.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Piece {
    /// Crosses.
    X,
    /// Noughts.
    O,
}

/// Who controls a player.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PlayerKind {
    /// Moves come from a person.
    Human,
    /// Moves come from an AI strategy.
    Computer,
}

/// A participant in a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct Player {
    /// Player's unique ID.
    #[serde(rename = "uuid")]
    id: PlayerId,
    /// Human or computer.
    #[serde(rename = "type")]
    kind: PlayerKind,
    /// The piece this player places.
    piece: Piece,
}

/// One placement: a position, who made it, and its 1-based sequence number.
///
/// The position is kept as the label it was submitted with. Labels that
/// don't name a cell are ignored when the board is derived.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct Move {
    /// Board label, e.g. `"B2"`.
    position: String,
    /// Player who made the move.
    player: PlayerId,
    /// Sequence number (1-9). Rejected outside that range when deserialized.
    #[serde(deserialize_with = "order_in_range")]
    order: u8,
}

/// Highest sequence number a move can carry.
const MAX_ORDER: u8 = 9;

fn order_in_range<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let order = u8::deserialize(deserializer)?;
    if (1..=MAX_ORDER).contains(&order) {
        Ok(order)
    } else {
        Err(serde::de::Error::invalid_value(
            serde::de::Unexpected::Unsigned(u64::from(order)),
            &"a move order between 1 and 9",
        ))
    }
}

impl Move {
    /// Creates a new move.
    pub fn new(position: impl Into<String>, player: PlayerId, order: u8) -> Self {
        Self {
            position: position.into(),
            player,
            order,
        }
    }

    /// Parses the stored label, `None` if it names no cell.
    pub fn cell(&self) -> Option<Position> {
        Position::parse(&self.position)
    }
}

/// Status of a game, always derivable from its moves.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum GameStatus {
    /// Some line is held by a single piece.
    Win,
    /// Board is full with no complete line.
    Draw,
    /// Neither of the above.
    #[default]
    Ongoing,
}

impl GameStatus {
    /// Returns true once no further moves should be accepted.
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Ongoing)
    }
}

/// A game: two players plus the log of moves made so far.
///
/// `status` and `winner` are cached values recomputed by the caller
/// after every append. The board itself is never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Game {
    /// Game's unique ID.
    #[serde(rename = "uuid")]
    id: GameId,
    /// Last recorded status.
    status: GameStatus,
    /// Moves in insertion order.
    #[serde(default)]
    moves: Vec<Move>,
    /// The two participants.
    players: Vec<Player>,
    /// Player credited with the win, if any.
    #[serde(default)]
    winner: Option<PlayerId>,
}

impl Game {
    /// Creates an empty, ongoing game.
    #[instrument(skip(players), fields(player_count = players.len()))]
    pub fn new(id: GameId, players: Vec<Player>) -> Self {
        Self {
            id,
            status: GameStatus::Ongoing,
            moves: Vec::new(),
            players,
            winner: None,
        }
    }

    /// Replaces the move log, e.g. when rebuilding a game from stored moves.
    pub fn with_moves(mut self, moves: impl IntoIterator<Item = Move>) -> Self {
        self.moves = moves.into_iter().collect();
        self
    }

    /// Returns a new game equal to this one plus `mv`.
    ///
    /// `self` is left untouched; the returned value owns its own move log.
    pub fn with_move(&self, mv: Move) -> Game {
        let mut next = self.clone();
        next.moves.push(mv);
        next
    }

    /// Appends a move to the log.
    pub fn push_move(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    /// Records a recomputed status.
    pub fn set_status(&mut self, status: GameStatus) {
        self.status = status;
    }

    /// Records the player credited with the win.
    pub fn set_winner(&mut self, winner: Option<PlayerId>) {
        self.winner = winner;
    }

    /// Sequence number the next appended move should carry.
    pub fn next_order(&self) -> u8 {
        u8::try_from(self.moves.len() + 1).unwrap_or(u8::MAX)
    }

    /// Moves sorted by sequence number (chronological order).
    pub fn sorted_moves(&self) -> Vec<&Move> {
        let mut moves: Vec<&Move> = self.moves.iter().collect();
        moves.sort_by_key(|mv| mv.order);
        moves
    }

    /// The move with the highest sequence number.
    pub fn last_move(&self) -> Option<&Move> {
        self.moves.iter().max_by_key(|mv| mv.order)
    }

    /// Looks up a participant by ID.
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// The participant whose ID differs from `id`.
    pub fn opponent_of(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id != id)
    }

    /// Returns true if the recorded status is Win or Draw.
    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }
}
