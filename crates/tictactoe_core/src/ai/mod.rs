//! Move-selection strategies.
//!
//! Strategies consult a [`GameEngine`] as an oracle: the random strategy
//! to learn which cells are free, the strategic one additionally to test
//! hypothetical moves for wins.

mod random;
mod strategic;

pub use random::RandomSelection;
pub use strategic::{Decision, Stage, StrategicAi};

use crate::engine::GameEngine;
use crate::error::AiError;
use crate::position::Position;
use crate::types::{Game, PlayerId};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Capability interface for move-selection policies.
pub trait GameAi {
    /// Suggests the next position for `player`.
    ///
    /// # Errors
    ///
    /// Returns [`AiError`] with [`NoValidMoves`](crate::AiErrorKind::NoValidMoves)
    /// if every cell is occupied.
    fn next_move(&self, game: &Game, player: PlayerId) -> Result<Position, AiError>;
}

/// Positions the engine accepts, in canonical `A1..C3` order.
#[instrument(skip(engine, game), fields(game_id = %game.id()))]
pub fn valid_positions<E: GameEngine + ?Sized>(engine: &E, game: &Game) -> Vec<Position> {
    Position::ALL
        .iter()
        .copied()
        .filter(|pos| engine.is_valid_move(game, pos.label()))
        .collect()
}

/// Which strategy to use.
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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StrategyKind {
    /// Uniform choice among free cells.
    Random,
    /// Win, block, center, corner, side.
    #[default]
    Strategic,
}

impl StrategyKind {
    /// Parses a strategy name; anything other than `random` means strategic.
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or_default()
    }
}

/// A strategy chosen at runtime.
///
/// The random selector carries its RNG state, so it is boxed.
#[derive(Debug)]
pub enum Strategy<E> {
    /// See [`RandomSelection`].
    Random(Box<RandomSelection<E>>),
    /// See [`StrategicAi`].
    Strategic(StrategicAi<E>),
}

impl<E: GameEngine> Strategy<E> {
    /// Builds the strategy for `kind` around `engine`.
    pub fn from_kind(kind: StrategyKind, engine: E) -> Self {
        match kind {
            StrategyKind::Random => Strategy::Random(Box::new(RandomSelection::new(engine))),
            StrategyKind::Strategic => Strategy::Strategic(StrategicAi::new(engine)),
        }
    }

    /// Like [`Strategy::from_kind`], but a random strategy draws from a
    /// fixed seed.
    pub fn seeded(kind: StrategyKind, engine: E, seed: u64) -> Self {
        match kind {
            StrategyKind::Random => {
                Strategy::Random(Box::new(RandomSelection::with_seed(engine, seed)))
            }
            StrategyKind::Strategic => Strategy::Strategic(StrategicAi::new(engine)),
        }
    }

    /// Which kind of strategy this is.
    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::Random(_) => StrategyKind::Random,
            Strategy::Strategic(_) => StrategyKind::Strategic,
        }
    }
}

impl<E: GameEngine> GameAi for Strategy<E> {
    fn next_move(&self, game: &Game, player: PlayerId) -> Result<Position, AiError> {
        match self {
            Strategy::Random(ai) => ai.next_move(game, player),
            Strategy::Strategic(ai) => ai.next_move(game, player),
        }
    }
}

/// Suggests a move for `player` with a one-off strategy of the given kind.
///
/// # Errors
///
/// Returns [`AiError`] if no valid moves remain.
#[instrument(skip(engine, game), fields(game_id = %game.id()))]
pub fn select_move<E: GameEngine>(
    kind: StrategyKind,
    engine: E,
    game: &Game,
    player: PlayerId,
) -> Result<Position, AiError> {
    Strategy::from_kind(kind, engine).next_move(game, player)
}
