//! Tic-tac-toe game service with an MCP tool interface.
//!
//! # Architecture
//!
//! - **Storage**: games keyed by UUID behind the [`GameStorage`] trait
//! - **Context**: storage, engine and default AI built once from [`ServerConfig`]
//! - **Service**: create games, record moves, answer queries
//! - **Server**: the service exposed as MCP tools over stdio or HTTP
//!
//! # Example
//!
//! ```
//! use tictactoe_server::{AppContext, GameService, ServerConfig};
//!
//! let service = GameService::new(AppContext::from_config(&ServerConfig::default()));
//! let game = service.create_game("human", "computer", "X", "O").unwrap();
//!
//! let hint = service.next_move(&game.game_uuid, &game.player1_uuid, None).unwrap();
//! assert_eq!(hint.position, "B2");
//!
//! service.add_move(&game.game_uuid, &game.player1_uuid, &hint.position).unwrap();
//! assert_eq!(service.list_moves(&game.game_uuid).unwrap().moves.len(), 1);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod context;
mod error;
mod responses;
mod server;
mod service;
mod simulate;
mod storage;

// Crate-level exports - Configuration
pub use config::{ConfigError, Environment, ServerConfig};
pub use context::AppContext;

// Crate-level exports - Storage
pub use storage::{GameStorage, InMemoryGameStorage};

// Crate-level exports - Game service
pub use error::ServiceError;
pub use responses::{
    GameCreated, GameSnapshot, MoveAdded, MoveHistory, MoveRecord, MoveSuggestion, PlayerRecord,
    StatusReport,
};
pub use service::GameService;
pub use simulate::{SimulationReport, simulate};

// Crate-level exports - MCP server
pub use server::{AddMoveRequest, CreateGameRequest, GameRequest, GameServer, NextMoveRequest};
