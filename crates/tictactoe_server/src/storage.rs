//! Game storage.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tictactoe_core::{Game, GameId};
use tracing::{debug, info, instrument};

/// Capability interface for game stores.
///
/// Implementations decide how concurrent writers of the same game are
/// serialized; [`GameStorage::update_game`] must apply its closure
/// atomically with respect to other calls on the same store.
pub trait GameStorage: Send + Sync {
    /// Stores a game, replacing any previous value with the same ID.
    fn write_game(&self, game: Game);

    /// Returns a snapshot of the game, if stored.
    fn read_game(&self, id: &GameId) -> Option<Game>;

    /// Runs `apply` on the stored game in place.
    ///
    /// Returns `false` without calling `apply` if no such game exists.
    fn update_game(&self, id: &GameId, apply: &mut dyn FnMut(&mut Game)) -> bool;

    /// IDs of all stored games.
    fn list_games(&self) -> Vec<GameId>;
}

/// Process-local store backed by a mutex-guarded map.
///
/// Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGameStorage {
    games: Arc<Mutex<HashMap<GameId, Game>>>,
}

impl InMemoryGameStorage {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating in-memory game storage");
        Self::default()
    }

    fn games(&self) -> MutexGuard<'_, HashMap<GameId, Game>> {
        self.games.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl GameStorage for InMemoryGameStorage {
    #[instrument(skip(self, game), fields(game_id = %game.id()))]
    fn write_game(&self, game: Game) {
        self.games().insert(*game.id(), game);
        debug!("Game written");
    }

    #[instrument(skip(self))]
    fn read_game(&self, id: &GameId) -> Option<Game> {
        let game = self.games().get(id).cloned();
        if game.is_none() {
            debug!(game_id = %id, "Game not found");
        }
        game
    }

    #[instrument(skip(self, apply))]
    fn update_game(&self, id: &GameId, apply: &mut dyn FnMut(&mut Game)) -> bool {
        let mut games = self.games();
        match games.get_mut(id) {
            Some(game) => {
                apply(game);
                debug!("Game updated");
                true
            }
            None => {
                debug!(game_id = %id, "Game not found");
                false
            }
        }
    }

    #[instrument(skip(self))]
    fn list_games(&self) -> Vec<GameId> {
        let ids: Vec<GameId> = self.games().keys().copied().collect();
        debug!(count = ids.len(), "Listed games");
        ids
    }
}
