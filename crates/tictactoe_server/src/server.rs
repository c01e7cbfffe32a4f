//! MCP tool surface over the game service.

use crate::error::ServiceError;
use crate::service::GameService;
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, ServerCapabilities, ServerInfo};
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

fn default_player1_type() -> String {
    "human".to_string()
}

fn default_player2_type() -> String {
    "computer".to_string()
}

fn default_player1_piece() -> String {
    "X".to_string()
}

fn default_player2_piece() -> String {
    "O".to_string()
}

/// Request for creating a game.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateGameRequest {
    /// Type of player 1 ("human" or "computer"). Defaults to "human".
    #[serde(default = "default_player1_type")]
    pub player1_type: String,
    /// Type of player 2 ("human" or "computer"). Defaults to "computer".
    #[serde(default = "default_player2_type")]
    pub player2_type: String,
    /// Piece for player 1 ("X" or "O"). Defaults to "X".
    #[serde(default = "default_player1_piece")]
    pub player1_piece: String,
    /// Piece for player 2 ("X" or "O"). Defaults to "O".
    #[serde(default = "default_player2_piece")]
    pub player2_piece: String,
}

impl Default for CreateGameRequest {
    fn default() -> Self {
        Self {
            player1_type: default_player1_type(),
            player2_type: default_player2_type(),
            player1_piece: default_player1_piece(),
            player2_piece: default_player2_piece(),
        }
    }
}

/// Request naming a game.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GameRequest {
    /// The UUID of the game.
    pub game_uuid: String,
}

/// Request for an AI move suggestion.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct NextMoveRequest {
    /// The UUID of the game.
    pub game_uuid: String,
    /// The UUID of the player to move.
    pub player_uuid: String,
    /// AI to use ("strategic" or "random"). Defaults to the server's configured AI.
    #[serde(default)]
    pub ai_type: Option<String>,
}

/// Request for adding a move.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AddMoveRequest {
    /// The UUID of the game.
    pub game_uuid: String,
    /// The UUID of the player making the move.
    pub player_uuid: String,
    /// Board position, row letter then column digit (e.g. "A1", "B2", "C3").
    pub position: String,
}

/// MCP handler exposing the tic-tac-toe tools.
pub struct GameServer {
    service: GameService,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl GameServer {
    /// Creates a server over a shared game service.
    #[instrument(skip(service))]
    pub fn new(service: GameService) -> Self {
        info!(ai_type = %service.context().ai_kind(), "Creating game server");
        Self {
            service,
            tool_router: Self::tool_router(),
        }
    }

    /// Creates a new game.
    #[instrument(skip(self, req))]
    #[tool(description = "Create a tic-tac-toe game. Returns the game UUID and both player UUIDs.")]
    pub async fn create_game(
        &self,
        Parameters(req): Parameters<CreateGameRequest>,
    ) -> Result<CallToolResult, McpError> {
        let created = self
            .service
            .create_game(
                &req.player1_type,
                &req.player2_type,
                &req.player1_piece,
                &req.player2_piece,
            )
            .map_err(rejected)?;
        json_result(&created)
    }

    /// Renders the board.
    #[instrument(skip(self, req), fields(game_uuid = %req.game_uuid))]
    #[tool(description = "Display the current board, status and move count for a game.")]
    pub async fn display_board(
        &self,
        Parameters(req): Parameters<GameRequest>,
    ) -> Result<CallToolResult, McpError> {
        let rendered = self.service.display_board(&req.game_uuid).map_err(rejected)?;
        Ok(CallToolResult::success(vec![Content::text(rendered)]))
    }

    /// Suggests a move.
    #[instrument(skip(self, req), fields(game_uuid = %req.game_uuid))]
    #[tool(description = "Get an AI-suggested next move for a player. Does not change the game.")]
    pub async fn get_next_move(
        &self,
        Parameters(req): Parameters<NextMoveRequest>,
    ) -> Result<CallToolResult, McpError> {
        let suggestion = self
            .service
            .next_move(&req.game_uuid, &req.player_uuid, req.ai_type.as_deref())
            .map_err(rejected)?;
        json_result(&suggestion)
    }

    /// Appends a move.
    #[instrument(skip(self, req), fields(game_uuid = %req.game_uuid, position = %req.position))]
    #[tool(description = "Add a move to the game at a position such as \"A1\", \"B2\" or \"C3\".")]
    pub async fn add_move(
        &self,
        Parameters(req): Parameters<AddMoveRequest>,
    ) -> Result<CallToolResult, McpError> {
        let added = self
            .service
            .add_move(&req.game_uuid, &req.player_uuid, &req.position)
            .map_err(rejected)?;
        json_result(&added)
    }

    /// Full game state.
    #[instrument(skip(self, req), fields(game_uuid = %req.game_uuid))]
    #[tool(description = "Get the full game state: status, winner, players and moves.")]
    pub async fn get_game_state(
        &self,
        Parameters(req): Parameters<GameRequest>,
    ) -> Result<CallToolResult, McpError> {
        let state = self.service.game_state(&req.game_uuid).map_err(rejected)?;
        json_result(&state)
    }

    /// Re-derived status.
    #[instrument(skip(self, req), fields(game_uuid = %req.game_uuid))]
    #[tool(description = "Check the current game status (Win, Draw or Ongoing) and winner.")]
    pub async fn check_game_status(
        &self,
        Parameters(req): Parameters<GameRequest>,
    ) -> Result<CallToolResult, McpError> {
        let report = self.service.check_status(&req.game_uuid).map_err(rejected)?;
        json_result(&report)
    }

    /// Move history.
    #[instrument(skip(self, req), fields(game_uuid = %req.game_uuid))]
    #[tool(description = "List all moves in the game in chronological order.")]
    pub async fn list_moves(
        &self,
        Parameters(req): Parameters<GameRequest>,
    ) -> Result<CallToolResult, McpError> {
        let history = self.service.list_moves(&req.game_uuid).map_err(rejected)?;
        json_result(&history)
    }
}

fn rejected(err: ServiceError) -> McpError {
    warn!(error = %err, "Tool request rejected");
    McpError::invalid_params(err.to_string(), None)
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Failed to encode response: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for GameServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Tic-tac-toe game server. Create a game, then add moves by position (A1-C3); \
                 ask get_next_move for AI suggestions."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
