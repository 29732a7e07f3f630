//! CLI command definitions and dispatch.

pub mod receive;
pub mod send;
pub mod status;

use clap::{Parser, Subcommand};

use droplink_core::error::AppError;

use crate::output::OutputFormat;

/// DropLink — paste text or drop a file, share the code
#[derive(Debug, Parser)]
#[command(name = "droplink", version, about, long_about = None)]
pub struct Cli {
    /// Server base URL
    #[arg(
        short,
        long,
        env = "DROPLINK_SERVER",
        default_value = "http://localhost:8080"
    )]
    pub server: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a share from text and/or a file
    Send(send::SendArgs),
    /// Redeem a share code
    Receive(receive::ReceiveArgs),
    /// Show server health
    Status,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Send(args) => send::execute(args, &self.server, self.format).await,
            Commands::Receive(args) => receive::execute(args, &self.server, self.format).await,
            Commands::Status => status::execute(&self.server, self.format).await,
        }
    }
}
