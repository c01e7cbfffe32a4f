//! Computer-versus-computer games played through the service.

use crate::error::ServiceError;
use crate::responses::MoveAdded;
use crate::service::GameService;
use tictactoe_core::{GameStatus, Piece, StandardGameEngine, Strategy};
use tracing::{info, instrument};

/// How a simulated game ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationReport {
    /// ID of the stored game.
    pub game_uuid: String,
    /// Final status.
    pub status: GameStatus,
    /// Piece of the credited winner.
    pub winner: Option<Piece>,
    /// Number of moves played.
    pub moves: usize,
}

/// Plays X against O until the game ends.
///
/// X moves first. `on_move` sees every accepted move.
///
/// # Errors
///
/// Propagates service errors; with two well-behaved strategies none occur.
#[instrument(skip_all, fields(x = %x.kind(), o = %o.kind()))]
pub fn simulate(
    service: &GameService,
    x: &Strategy<StandardGameEngine>,
    o: &Strategy<StandardGameEngine>,
    mut on_move: impl FnMut(&MoveAdded),
) -> Result<SimulationReport, ServiceError> {
    let created = service.create_game("computer", "computer", "X", "O")?;
    let seats = [(&created.player1_uuid, x), (&created.player2_uuid, o)];

    for (player, ai) in seats.iter().cycle().take(9) {
        let suggestion = service.next_move_with(ai, &created.game_uuid, player)?;
        let added = service.add_move(&created.game_uuid, player, &suggestion.position)?;
        on_move(&added);
        if added.status.is_terminal() {
            break;
        }
    }

    let state = service.game_state(&created.game_uuid)?;
    let winner = state.winner.as_ref().and_then(|id| {
        state
            .players
            .iter()
            .find(|p| &p.uuid == id)
            .map(|p| p.piece)
    });
    info!(status = %state.status, ?winner, moves = state.moves.len(), "Simulation finished");

    Ok(SimulationReport {
        game_uuid: created.game_uuid,
        status: state.status,
        winner,
        moves: state.moves.len(),
    })
}
