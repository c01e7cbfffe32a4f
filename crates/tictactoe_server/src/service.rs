//! Game lifecycle on top of the pure engine and a game store.

use crate::context::AppContext;
use crate::error::ServiceError;
use crate::responses::{
    GameCreated, GameSnapshot, MoveAdded, MoveHistory, MoveRecord, MoveSuggestion, PlayerRecord,
    StatusReport,
};
use tictactoe_core::{
    Game, GameAi, GameEngine, GameId, GameStatus, Move, Piece, Player, PlayerId, PlayerKind,
    StandardGameEngine, Strategy, StrategyKind,
};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Creates games, records moves and answers queries about them.
#[derive(Debug, Clone)]
pub struct GameService {
    ctx: AppContext,
}

impl GameService {
    /// Creates a service over an application context.
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx }
    }

    /// The context this service runs on.
    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    /// Creates and stores a new ongoing game.
    ///
    /// Kinds and pieces are parsed case-insensitively.
    ///
    /// # Errors
    ///
    /// Rejects unknown player kinds or pieces, and two players with the
    /// same piece.
    #[instrument(skip(self))]
    pub fn create_game(
        &self,
        player1_type: &str,
        player2_type: &str,
        player1_piece: &str,
        player2_piece: &str,
    ) -> Result<GameCreated, ServiceError> {
        let player1 = Player::new(
            Uuid::new_v4(),
            parse_kind(player1_type)?,
            parse_piece(player1_piece)?,
        );
        let player2 = Player::new(
            Uuid::new_v4(),
            parse_kind(player2_type)?,
            parse_piece(player2_piece)?,
        );
        if player1.piece() == player2.piece() {
            warn!(piece = %player1.piece(), "Players share a piece");
            return Err(ServiceError::DuplicatePieces {
                piece: *player1.piece(),
            });
        }

        let (player1_uuid, player2_uuid) = (player1.id().to_string(), player2.id().to_string());
        let game = Game::new(Uuid::new_v4(), vec![player1, player2]);
        let game_uuid = game.id().to_string();
        self.ctx.storage().write_game(game);

        info!(%game_uuid, "Game created");
        Ok(GameCreated {
            game_uuid,
            player1_uuid,
            player2_uuid,
            message: "Game created successfully".to_string(),
        })
    }

    /// Renders the stored game for terminal output.
    ///
    /// # Errors
    ///
    /// Fails if the ID is malformed or unknown.
    #[instrument(skip(self))]
    pub fn display_board(&self, game_id: &str) -> Result<String, ServiceError> {
        let game = self.load(game_id)?;
        Ok(self.ctx.engine().format_game_output(&game))
    }

    /// Suggests a move without changing the game.
    ///
    /// `ai_type` picks a one-off strategy; `None` uses the configured AI.
    ///
    /// # Errors
    ///
    /// Fails if the game is unknown or over, or no cell is free.
    #[instrument(skip(self))]
    pub fn next_move(
        &self,
        game_id: &str,
        player_id: &str,
        ai_type: Option<&str>,
    ) -> Result<MoveSuggestion, ServiceError> {
        match ai_type {
            Some(label) => {
                let kind = StrategyKind::from_label(label);
                let ai = Strategy::from_kind(kind, self.ctx.engine());
                self.next_move_with(&ai, game_id, player_id)
            }
            None => self.next_move_with(self.ctx.ai(), game_id, player_id),
        }
    }

    /// Suggests a move using the given strategy.
    ///
    /// # Errors
    ///
    /// Same as [`GameService::next_move`].
    #[instrument(skip(self, ai), fields(ai_type = %ai.kind()))]
    pub fn next_move_with(
        &self,
        ai: &Strategy<StandardGameEngine>,
        game_id: &str,
        player_id: &str,
    ) -> Result<MoveSuggestion, ServiceError> {
        let game = self.load(game_id)?;
        let player = parse_id("player", player_id)?;
        if let Some(status) = terminal_status(self.ctx.engine(), &game) {
            warn!(%status, "Suggestion requested for finished game");
            return Err(game_over(&game, status));
        }

        let position = ai.next_move(&game, player)?;
        debug!(%position, "Move suggested");
        Ok(MoveSuggestion {
            game_uuid: game.id().to_string(),
            player_uuid: player.to_string(),
            position: position.label().to_string(),
            ai_type: ai.kind().to_string(),
            message: format!("Suggested move: {}", position),
        })
    }

    /// Appends a move and recomputes status and winner.
    ///
    /// The label is stored upper-cased with the next sequence number. The
    /// read-modify-write happens inside one store update.
    ///
    /// # Errors
    ///
    /// Rejects moves on finished games, by players outside the game, and
    /// to malformed or occupied positions.
    #[instrument(skip(self))]
    pub fn add_move(
        &self,
        game_id: &str,
        player_id: &str,
        position: &str,
    ) -> Result<MoveAdded, ServiceError> {
        let id = parse_id("game", game_id)?;
        let player = parse_id("player", player_id)?;
        let engine = self.ctx.engine();

        let mut outcome = Err(not_found(&id));
        self.ctx.storage().update_game(&id, &mut |game: &mut Game| {
            outcome = apply_move(engine, game, player, position);
        });
        outcome
    }

    /// Stored state with moves in chronological order.
    ///
    /// # Errors
    ///
    /// Fails if the ID is malformed or unknown.
    #[instrument(skip(self))]
    pub fn game_state(&self, game_id: &str) -> Result<GameSnapshot, ServiceError> {
        let game = self.load(game_id)?;
        Ok(GameSnapshot {
            game_uuid: game.id().to_string(),
            status: *game.status(),
            winner: winner_label(&game),
            players: game.players().iter().map(PlayerRecord::from).collect(),
            moves: move_records(&game),
        })
    }

    /// Re-derives the status, storing it if it changed.
    ///
    /// A newly detected win without a recorded winner gets one attributed.
    ///
    /// # Errors
    ///
    /// Fails if the ID is malformed or unknown.
    #[instrument(skip(self))]
    pub fn check_status(&self, game_id: &str) -> Result<StatusReport, ServiceError> {
        let id = parse_id("game", game_id)?;
        let engine = self.ctx.engine();

        let mut outcome = Err(not_found(&id));
        self.ctx.storage().update_game(&id, &mut |game: &mut Game| {
            let status = engine.check_status(game);
            if *game.status() != status {
                info!(from = %game.status(), to = %status, "Status changed");
                game.set_status(status);
                if status == GameStatus::Win && game.winner().is_none() {
                    game.set_winner(engine.winner(game));
                }
            }
            outcome = Ok(StatusReport {
                game_uuid: game.id().to_string(),
                status,
                winner: winner_label(game),
                is_game_over: status.is_terminal(),
            });
        });
        outcome
    }

    /// Moves in chronological order.
    ///
    /// # Errors
    ///
    /// Fails if the ID is malformed or unknown.
    #[instrument(skip(self))]
    pub fn list_moves(&self, game_id: &str) -> Result<MoveHistory, ServiceError> {
        let game = self.load(game_id)?;
        Ok(MoveHistory {
            game_uuid: game.id().to_string(),
            moves: move_records(&game),
        })
    }

    /// Reads a stored game by textual ID.
    fn load(&self, game_id: &str) -> Result<Game, ServiceError> {
        let id = parse_id("game", game_id)?;
        self.ctx.storage().read_game(&id).ok_or_else(|| {
            warn!(%id, "Game not found");
            not_found(&id)
        })
    }
}

fn apply_move(
    engine: StandardGameEngine,
    game: &mut Game,
    player: PlayerId,
    position: &str,
) -> Result<MoveAdded, ServiceError> {
    if let Some(status) = terminal_status(engine, game) {
        warn!(%status, "Move rejected, game is over");
        return Err(game_over(game, status));
    }
    if game.player(player).is_none() {
        warn!(%player, "Move rejected, player not in game");
        return Err(ServiceError::UnknownPlayer {
            game_id: game.id().to_string(),
            player_id: player.to_string(),
        });
    }
    if !engine.is_valid_move(game, position) {
        warn!(position, "Move rejected, invalid position");
        return Err(ServiceError::InvalidMove {
            position: position.to_string(),
        });
    }

    let mv = Move::new(position.to_ascii_uppercase(), player, game.next_order());
    let record = MoveRecord::from(&mv);
    game.push_move(mv);

    let status = engine.check_status(game);
    game.set_status(status);
    if status == GameStatus::Win {
        game.set_winner(engine.winner(game));
    }
    info!(position = %record.position, order = record.order, %status, "Move added");

    Ok(MoveAdded {
        game_uuid: game.id().to_string(),
        message: format!("Move added: {}", record.position),
        mv: record,
        status,
        winner: winner_label(game),
    })
}

fn winner_label(game: &Game) -> Option<String> {
    game.winner().as_ref().map(|w| w.to_string())
}

fn move_records(game: &Game) -> Vec<MoveRecord> {
    game.sorted_moves()
        .into_iter()
        .map(MoveRecord::from)
        .collect()
}

fn parse_id(what: &'static str, value: &str) -> Result<Uuid, ServiceError> {
    Uuid::parse_str(value.trim()).map_err(|_| ServiceError::InvalidId {
        what,
        value: value.to_string(),
    })
}

fn parse_kind(value: &str) -> Result<PlayerKind, ServiceError> {
    value
        .trim()
        .parse()
        .map_err(|_| ServiceError::InvalidPlayerKind {
            value: value.to_string(),
        })
}

fn parse_piece(value: &str) -> Result<Piece, ServiceError> {
    value.trim().parse().map_err(|_| ServiceError::InvalidPiece {
        value: value.to_string(),
    })
}

fn not_found(id: &GameId) -> ServiceError {
    ServiceError::GameNotFound {
        game_id: id.to_string(),
    }
}

/// Terminal status of a game, by its record or by its move log.
///
/// A stored status can lag behind the moves; either one being terminal
/// closes the game.
fn terminal_status(engine: StandardGameEngine, game: &Game) -> Option<GameStatus> {
    if game.is_over() {
        return Some(*game.status());
    }
    let derived = engine.check_status(game);
    derived.is_terminal().then_some(derived)
}

fn game_over(game: &Game, status: GameStatus) -> ServiceError {
    ServiceError::GameOver {
        game_id: game.id().to_string(),
        status,
    }
}
