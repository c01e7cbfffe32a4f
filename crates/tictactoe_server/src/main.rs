//! Tic-tac-toe server binary.
//!
//! Serves the game tools over stdio or HTTP, or plays a simulated game.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use rmcp::ServiceExt;
use tictactoe_core::{StandardGameEngine, Strategy, StrategyKind};
use tictactoe_server::{AppContext, GameServer, GameService, ServerConfig, simulate};
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // stdout carries the MCP stream in stdio mode
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = ServerConfig::load(cli.config.as_deref())?;
    if let Some(ai_type) = &cli.ai_type {
        config = config.with_ai_type(StrategyKind::from_label(ai_type));
    }
    let service = GameService::new(AppContext::from_config(&config));

    match cli.command {
        Command::Server => run_mcp_server(service).await,
        Command::Http { port, host } => run_http_server(service, host, port).await,
        Command::Simulate { x, o, seed } => run_simulation(service, &x, &o, seed),
    }
}

/// Run the MCP game server (stdio mode)
#[instrument(skip(service))]
async fn run_mcp_server(service: GameService) -> Result<()> {
    info!("Starting tic-tac-toe MCP server");

    let server = GameServer::new(service);

    info!("Server ready - connect via MCP protocol");
    let running = server.serve(rmcp::transport::stdio()).await?;
    running.waiting().await?;

    Ok(())
}

/// Run the MCP game server over streamable HTTP
#[instrument(skip(service))]
async fn run_http_server(service: GameService, host: String, port: u16) -> Result<()> {
    use axum::{Router, body::Body, http::Request};
    use rmcp::transport::streamable_http_server::{
        session::local::LocalSessionManager,
        tower::{StreamableHttpServerConfig, StreamableHttpService},
    };
    use std::sync::Arc;

    info!("Starting tic-tac-toe MCP server on HTTP");

    let session_manager = Arc::new(LocalSessionManager::default());
    let config = StreamableHttpServerConfig::default();
    debug!(?config, "HTTP service configuration");

    // Every MCP session gets its own handler over the same game store
    let http_service = StreamableHttpService::new(
        move || {
            debug!("Creating GameServer for new session");
            Ok(GameServer::new(service.clone()))
        },
        session_manager,
        config,
    );

    let app = Router::new().fallback_service(tower::service_fn(move |req: Request<Body>| {
        let mut service = http_service.clone();
        async move {
            let uri = req.uri().clone();
            let result = tower::Service::call(&mut service, req).await;
            match &result {
                Ok(resp) => debug!(status = ?resp.status(), uri = %uri, "Response sent"),
                Err(e) => warn!(error = ?e, uri = %uri, "Request failed"),
            }
            result
        }
    }));

    let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await?;
    info!("Server ready at http://{}:{}/", host, port);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "Failed to listen for shutdown signal");
            }
        })
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Play one computer-versus-computer game, printing the board after each move
#[instrument(skip(service))]
fn run_simulation(service: GameService, x: &str, o: &str, seed: Option<u64>) -> Result<()> {
    let engine = StandardGameEngine::new();
    let strategy = |label: &str, offset: u64| {
        let kind = StrategyKind::from_label(label);
        match seed {
            Some(seed) => Strategy::seeded(kind, engine, seed.wrapping_add(offset)),
            None => Strategy::from_kind(kind, engine),
        }
    };
    let (x_ai, o_ai) = (strategy(x, 0), strategy(o, 1));

    let report = simulate(&service, &x_ai, &o_ai, |added| {
        match service.display_board(&added.game_uuid) {
            Ok(board) => println!("{}\n{}\n", added.message, board),
            Err(e) => warn!(error = %e, "Failed to render board"),
        }
    })?;

    match report.winner {
        Some(piece) => println!("{} wins after {} moves", piece, report.moves),
        None => println!("{} after {} moves", report.status, report.moves),
    }
    Ok(())
}
