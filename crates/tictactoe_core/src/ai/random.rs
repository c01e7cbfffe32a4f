//! Uniform random choice among free cells.

use super::{GameAi, valid_positions};
use crate::engine::GameEngine;
use crate::error::AiError;
use crate::position::Position;
use crate::types::{Game, PlayerId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, instrument, warn};

/// AI that picks an unoccupied cell uniformly at random.
#[derive(Debug)]
pub struct RandomSelection<E> {
    engine: E,
    rng: Mutex<StdRng>,
}

impl<E: GameEngine> RandomSelection<E> {
    /// Creates a selector seeded from the operating system.
    pub fn new(engine: E) -> Self {
        Self::with_rng(engine, StdRng::from_os_rng())
    }

    /// Creates a selector with a fixed seed, for reproducible play.
    pub fn with_seed(engine: E, seed: u64) -> Self {
        Self::with_rng(engine, StdRng::seed_from_u64(seed))
    }

    /// Creates a selector drawing from `rng`.
    pub fn with_rng(engine: E, rng: StdRng) -> Self {
        Self {
            engine,
            rng: Mutex::new(rng),
        }
    }
}

impl<E: GameEngine> GameAi for RandomSelection<E> {
    #[instrument(skip(self, game), fields(game_id = %game.id()))]
    fn next_move(&self, game: &Game, player: PlayerId) -> Result<Position, AiError> {
        let valid = valid_positions(&self.engine, game);
        if valid.is_empty() {
            warn!("No valid moves available");
            return Err(AiError::no_valid_moves());
        }

        let index = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            rng.random_range(0..valid.len())
        };
        let position = valid[index];
        debug!(%position, choices = valid.len(), "Random position chosen");
        Ok(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::StandardGameEngine;
    use crate::error::AiErrorKind;
    use crate::types::{Move, Piece, Player, PlayerKind};
    use std::collections::HashMap;
    use uuid::Uuid;

    fn game_with(labels: &[&str]) -> (Game, PlayerId) {
        let x = Player::new(Uuid::new_v4(), PlayerKind::Human, Piece::X);
        let o = Player::new(Uuid::new_v4(), PlayerKind::Computer, Piece::O);
        let ids = [*x.id(), *o.id()];
        let moves = labels
            .iter()
            .enumerate()
            .map(|(i, label)| Move::new(*label, ids[i % 2], (i + 1) as u8));
        (Game::new(Uuid::new_v4(), vec![x, o]).with_moves(moves), ids[1])
    }

    #[test]
    fn test_single_free_cell_always_chosen() {
        // Draw layout with C3 left open.
        let (game, player) = game_with(&["A1", "A2", "A3", "B2", "B1", "B3", "C2", "C1"]);
        let ai = RandomSelection::with_seed(StandardGameEngine::new(), 11);
        for _ in 0..1000 {
            assert_eq!(ai.next_move(&game, player).ok(), Some(Position::C3));
        }
    }

    #[test]
    fn test_roughly_uniform_on_empty_board() {
        let (game, player) = game_with(&[]);
        let ai = RandomSelection::with_seed(StandardGameEngine::new(), 7);
        let mut counts: HashMap<Position, usize> = HashMap::new();
        for _ in 0..9000 {
            let pos = ai.next_move(&game, player).expect("board has free cells");
            *counts.entry(pos).or_default() += 1;
        }
        assert_eq!(counts.len(), 9);
        for (pos, count) in counts {
            assert!((800..=1200).contains(&count), "{pos} drawn {count} times");
        }
    }

    #[test]
    fn test_never_picks_occupied_cell() {
        let (game, player) = game_with(&["B2", "A1", "C3"]);
        let ai = RandomSelection::with_seed(StandardGameEngine::new(), 3);
        for _ in 0..200 {
            let pos = ai.next_move(&game, player).expect("board has free cells");
            assert!(![Position::B2, Position::A1, Position::C3].contains(&pos));
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let (game, player) = game_with(&["B2"]);
        let a = RandomSelection::with_seed(StandardGameEngine::new(), 42);
        let b = RandomSelection::with_seed(StandardGameEngine::new(), 42);
        for _ in 0..20 {
            assert_eq!(a.next_move(&game, player).ok(), b.next_move(&game, player).ok());
        }
    }

    #[test]
    fn test_full_board_fails() {
        let (game, player) = game_with(&["A1", "A2", "A3", "B2", "B1", "B3", "C2", "C1", "C3"]);
        let ai = RandomSelection::new(StandardGameEngine::new());
        let err = ai.next_move(&game, player).unwrap_err();
        assert_eq!(err.kind, AiErrorKind::NoValidMoves);
    }
}
