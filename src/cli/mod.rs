//! CLI interface for ridegate

pub mod commands;
mod output;

pub use output::*;

use clap::{Parser, Subcommand, ValueEnum};

use crate::auth::Role;
use crate::fare::SchedulePeriod;

#[derive(Parser)]
#[command(name = "ridegate")]
#[command(author = "Krakaw")]
#[command(version)]
#[command(about = "Session resolution and route guarding for the campus ride portals", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new ridegate.toml configuration file
    Init,

    /// List the portal route table
    Routes {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Evaluate a navigation against the stored session
    Check {
        /// Path to navigate to, e.g. /user/rides
        path: String,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Show the stored session
    Whoami,

    /// Store a session record (stand-in for the portal login flow)
    Login {
        /// Bearer token issued by the backend
        #[arg(short, long, env = "RIDEGATE_TOKEN")]
        token: String,

        /// Portal role: student, college or driver
        #[arg(short, long)]
        role: Role,
    },

    /// End the session remotely (best effort) and clear it locally
    Logout,

    /// Preview the fare between two places
    Fare {
        /// Pickup location
        #[arg(short, long)]
        pickup: String,

        /// Drop-off location
        #[arg(short, long)]
        destination: String,

        /// Schedule period: once, 15days, 1month, 3months, 6months, 1year
        #[arg(long, default_value = "once")]
        period: SchedulePeriod,
    },

    /// Start the HTTP decision service
    Serve {
        /// Host to bind to (defaults to the configured host)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (defaults to the configured port)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}
