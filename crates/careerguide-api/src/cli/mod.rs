//! CLI command definitions and dispatch for the `cguide` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod seed;
pub mod status;
pub mod token;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Run and inspect the CareerGuide advisor backend.
#[derive(Parser)]
#[command(name = "cguide", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Port to listen on (overrides config.toml).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (overrides config.toml).
        #[arg(long)]
        host: Option<String>,

        /// Export OpenTelemetry spans (stdout exporter) alongside logs.
        #[arg(long)]
        otel: bool,
    },

    /// System status dashboard.
    Status,

    /// Populate the database with sample users and sessions.
    Seed,

    /// Mint a development identity token (requires CAREERGUIDE_AUTH_SECRET).
    Token {
        /// Subject id the token is issued for.
        #[arg(long)]
        user: String,

        /// Display name claim.
        #[arg(long)]
        name: Option<String>,

        /// Email claim.
        #[arg(long)]
        email: Option<String>,

        /// Token lifetime in minutes.
        #[arg(long, default_value = "60")]
        ttl_mins: i64,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
