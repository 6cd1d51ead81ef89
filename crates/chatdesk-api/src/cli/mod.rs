//! CLI definitions for the `chatdesk` binary.

pub mod token;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Chatdesk: conversation sessions relayed to a dialogue engine.
#[derive(Parser, Debug)]
#[command(name = "chatdesk", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the TOML configuration file.
    #[arg(long, global = true, env = "CHATDESK_CONFIG", default_value = "chatdesk.toml")]
    pub config: PathBuf,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Print command output as JSON.
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Address to bind (overrides `server.host`).
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides `server.port`).
        #[arg(long)]
        port: Option<u16>,

        /// Origin allowed for cross-origin requests (overrides `frontend_origin`).
        #[arg(long, env = "CHATDESK_FRONTEND_ORIGIN")]
        frontend_origin: Option<String>,

        /// Dialogue engine base URL (overrides `dialogue.base_url`).
        #[arg(long, env = "CHATDESK_DIALOGUE_URL")]
        dialogue_url: Option<String>,

        /// Relay deadline in seconds (overrides `dialogue.timeout_secs`).
        #[arg(long)]
        dialogue_timeout: Option<u64>,
    },

    /// Print a bearer token for a subject.
    Token {
        /// Subject (username) to embed.
        subject: String,
    },

    /// Print the subject a bearer token resolves to.
    Whoami {
        /// The token to inspect.
        token: String,
    },
}
