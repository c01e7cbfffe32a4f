//! Fixed-priority heuristic player.
//!
//! Candidates are tried in this order, the first hit wins:
//!
//! 1. a cell that completes a line for the mover,
//! 2. a cell that would complete a line for the opponent,
//! 3. the center,
//! 4. corners `A1, A3, C1, C3`,
//! 5. sides `A2, B1, B3, C2`.
//!
//! Look-ahead works on copies: each candidate is tested against
//! `game.with_move(..)`, never by mutating the caller's game.

use super::{GameAi, valid_positions};
use crate::engine::GameEngine;
use crate::error::AiError;
use crate::position::Position;
use crate::types::{Game, GameStatus, Move, PlayerId};
use tracing::{debug, instrument, warn};

/// Which rule produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Stage {
    /// Completes a line for the mover.
    Win,
    /// Occupies the opponent's winning cell.
    Block,
    /// Takes the middle.
    Center,
    /// Takes a corner.
    Corner,
    /// Takes an edge midpoint.
    Side,
    /// First free cell.
    Fallback,
}

/// A chosen position and the rule that chose it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    /// Where to play.
    pub position: Position,
    /// Why.
    pub stage: Stage,
}

/// AI that follows win, block, center, corner, side.
#[derive(Debug, Clone, Default)]
pub struct StrategicAi<E> {
    engine: E,
}

impl<E: GameEngine> StrategicAi<E> {
    /// Creates the AI around a rules engine.
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    /// Chooses a position and reports which stage fired.
    ///
    /// # Errors
    ///
    /// Returns [`AiError`] if no valid moves remain; this is checked
    /// before any stage runs.
    #[instrument(skip(self, game), fields(game_id = %game.id()))]
    pub fn decide(&self, game: &Game, player: PlayerId) -> Result<Decision, AiError> {
        let valid = valid_positions(&self.engine, game);
        if valid.is_empty() {
            warn!("No valid moves available");
            return Err(AiError::no_valid_moves());
        }

        let decision = self
            .completing_cell(game, player, &valid)
            .map(|position| Decision {
                position,
                stage: Stage::Win,
            })
            .or_else(|| {
                let opponent = *game.opponent_of(player)?.id();
                self.completing_cell(game, opponent, &valid)
                    .map(|position| Decision {
                        position,
                        stage: Stage::Block,
                    })
            })
            .or_else(|| {
                valid.contains(&Position::CENTER).then_some(Decision {
                    position: Position::CENTER,
                    stage: Stage::Center,
                })
            })
            .or_else(|| first_free(&Position::CORNERS, &valid, Stage::Corner))
            .or_else(|| first_free(&Position::SIDES, &valid, Stage::Side))
            .unwrap_or(Decision {
                position: valid[0],
                stage: Stage::Fallback,
            });

        debug!(position = %decision.position, stage = %decision.stage, "Strategic move chosen");
        Ok(decision)
    }

    /// First valid cell that gives `mover` a won game.
    fn completing_cell(
        &self,
        game: &Game,
        mover: PlayerId,
        valid: &[Position],
    ) -> Option<Position> {
        valid
            .iter()
            .copied()
            .find(|pos| self.would_win(game, mover, *pos))
    }

    /// Tests a hypothetical move on a copy of the game.
    fn would_win(&self, game: &Game, mover: PlayerId, position: Position) -> bool {
        let hypothetical = game.with_move(Move::new(position.label(), mover, game.next_order()));
        self.engine.check_status(&hypothetical) == GameStatus::Win
    }
}

fn first_free(candidates: &[Position], valid: &[Position], stage: Stage) -> Option<Decision> {
    candidates
        .iter()
        .copied()
        .find(|pos| valid.contains(pos))
        .map(|position| Decision { position, stage })
}

impl<E: GameEngine> GameAi for StrategicAi<E> {
    fn next_move(&self, game: &Game, player: PlayerId) -> Result<Position, AiError> {
        self.decide(game, player).map(|decision| decision.position)
    }
}
