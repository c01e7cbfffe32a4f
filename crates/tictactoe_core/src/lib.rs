//! Pure tic-tac-toe game logic.
//!
//! # Architecture
//!
//! - **Types**: players, moves and games; a game is an ordered move log
//! - **Board**: a 3x3 grid derived on demand from the move log
//! - **Engine**: move validation and win/draw/ongoing classification
//! - **AI**: random and strategic move selection, driven by the engine
//!
//! Nothing here performs I/O or keeps shared state; every operation is a
//! function of the game value passed in.
//!
//! # Example
//!
//! ```
//! use tictactoe_core::{
//!     Game, GameAi, GameEngine, GameStatus, Move, Piece, Player, PlayerKind, Position,
//!     StandardGameEngine, StrategicAi,
//! };
//! use uuid::Uuid;
//!
//! let x = Player::new(Uuid::new_v4(), PlayerKind::Human, Piece::X);
//! let o = Player::new(Uuid::new_v4(), PlayerKind::Computer, Piece::O);
//! let (x_id, o_id) = (*x.id(), *o.id());
//!
//! let game = Game::new(Uuid::new_v4(), vec![x, o]).with_moves([Move::new("A1", x_id, 1)]);
//!
//! let engine = StandardGameEngine::new();
//! assert!(!engine.is_valid_move(&game, "a1"));
//! assert_eq!(engine.check_status(&game), GameStatus::Ongoing);
//!
//! let ai = StrategicAi::new(engine);
//! assert_eq!(ai.next_move(&game, o_id).ok(), Some(Position::B2));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod ai;
mod board;
mod engine;
mod error;
mod position;
mod types;

// Crate-level exports - Board model
pub use board::{Board, Grid, LINES};
pub use position::Position;
pub use types::{Game, GameId, GameStatus, Move, Piece, Player, PlayerId, PlayerKind};

// Crate-level exports - Rules engine
pub use engine::{GameEngine, StandardGameEngine};

// Crate-level exports - Move selection
pub use ai::{
    Decision, GameAi, RandomSelection, Stage, StrategicAi, Strategy, StrategyKind, select_move,
    valid_positions,
};
pub use error::{AiError, AiErrorKind};
