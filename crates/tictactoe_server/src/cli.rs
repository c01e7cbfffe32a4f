//! Command-line interface for tictactoe_server.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tic-tac-toe game server with an MCP interface
#[derive(Parser, Debug)]
#[command(name = "tictactoe_server")]
#[command(about = "Tic-tac-toe game server for MCP clients", long_about = None)]
#[command(version)]
pub struct Cli {
    /// TOML config file (overrides environment variables)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Default AI for move suggestions: strategic or random (overrides config file)
    #[arg(long, global = true)]
    pub ai_type: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the MCP game server (stdio mode)
    Server,

    /// Run the MCP game server over streamable HTTP
    Http {
        /// Port to bind to
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Play a computer-versus-computer game and print every board
    Simulate {
        /// Strategy for X
        #[arg(long, default_value = "strategic")]
        x: String,

        /// Strategy for O
        #[arg(long, default_value = "strategic")]
        o: String,

        /// Seed for random strategies
        #[arg(long)]
        seed: Option<u64>,
    },
}
