use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ridegate::cli::{self, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ridegate=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => cli::commands::init().await,
        Commands::Routes { format } => cli::commands::routes(format).await,
        Commands::Check { path, format } => cli::commands::check(&path, format).await,
        Commands::Whoami => cli::commands::whoami().await,
        Commands::Login { token, role } => cli::commands::login(&token, role).await,
        Commands::Logout => cli::commands::logout().await,
        Commands::Fare {
            pickup,
            destination,
            period,
        } => cli::commands::fare(&pickup, &destination, period).await,
        Commands::Serve { host, port } => cli::commands::serve(host, port).await,
    }
}
