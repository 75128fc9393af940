//! CLI command implementations

use anyhow::Result;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::auth::{
    store_login, FileStore, LogoutFlow, RemoteLogout, Role, SessionKeys, SessionResolver,
};
use crate::cli::{error, info, print_navigation, print_route_table, success, warn, OutputFormat};
use crate::config::{self, loader::CONFIG_FILENAME, Config};
use crate::fare::{FareClient, FareQuote, SchedulePeriod};
use crate::portal::{Navigation, RouteTable};
use crate::scope::ScopedValue;

/// Initialize a new ridegate.toml configuration file
pub async fn init() -> Result<()> {
    let config_path = Path::new(CONFIG_FILENAME);

    if config_path.exists() {
        warn(&format!("{} already exists", CONFIG_FILENAME));
        return Ok(());
    }

    let content = config::loader::default_config_content();
    fs::write(config_path, content)?;

    success(&format!("Created {}", CONFIG_FILENAME));
    info("Run 'ridegate routes' to see the portal route table");

    Ok(())
}

/// List the route table
pub async fn routes(format: OutputFormat) -> Result<()> {
    let config = load_config()?;
    let table = RouteTable::with_overrides(&config.routes);

    match format {
        OutputFormat::Table => print_route_table(table.entries()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(table.entries())?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(table.entries())?),
    }

    Ok(())
}

#[derive(Serialize)]
struct CheckReport<'a> {
    path: &'a str,
    role: Option<Role>,
    navigation: &'a Navigation,
}

/// Evaluate a navigation against the stored session
pub async fn check(path: &str, format: OutputFormat) -> Result<()> {
    let config = load_config()?;
    let table = RouteTable::with_overrides(&config.routes);
    let session = resolver(&config).resolve();
    let navigation = table.navigate(path, &session);

    let report = CheckReport {
        path,
        role: session.role,
        navigation: &navigation,
    };

    match format {
        OutputFormat::Table => print_navigation(path, &navigation),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&report)?),
    }

    Ok(())
}

/// Show the stored session
pub async fn whoami() -> Result<()> {
    let config = load_config()?;
    let session = resolver(&config).resolve();

    match session.role {
        Some(role) => {
            success(&format!("Logged in as {}", role));
            info(&format!(
                "Portal home: {}",
                crate::auth::redirect_target(Some(role))
            ));
        }
        None if session.token.is_some() => {
            warn("Session has a token but no role; protected routes will redirect to /login")
        }
        None => info("Not logged in"),
    }

    Ok(())
}

/// Write a session record the way the portal login flow does
pub async fn login(token: &str, role: Role) -> Result<()> {
    let config = load_config()?;
    let store = FileStore::new(&config.storage.path);
    let keys = SessionKeys::from(&config.storage);

    store_login(&store, &keys, token, role)?;

    success(&format!(
        "Stored {} session in {}",
        role,
        store.path().display()
    ));
    Ok(())
}

/// Log out
pub async fn logout() -> Result<()> {
    let config = load_config()?;
    let store = FileStore::new(&config.storage.path);
    let flow = LogoutFlow::new(&config.api, store, SessionKeys::from(&config.storage))?;

    let outcome = flow.logout().await;

    if outcome.store_reset {
        warn(&format!(
            "Session store was unreadable and has been reset: {}",
            config.storage.path.display()
        ));
    } else if outcome.cleared.is_empty() {
        info("No local session data to clear");
    } else {
        success(&format!("Cleared {}", outcome.cleared.join(", ")));
    }
    info(&format!("Next: {}", outcome.redirect));

    match outcome.remote.settled().await {
        RemoteLogout::Confirmed => success("Session ended on the server"),
        RemoteLogout::Failed(reason) => {
            error(&format!("Could not end the session on the server: {}", reason))
        }
    }

    Ok(())
}

/// Preview a fare
pub async fn fare(pickup: &str, destination: &str, period: SchedulePeriod) -> Result<()> {
    let config = load_config()?;
    let client = FareClient::new(&config.api)?;

    let mut view = ScopedValue::new(FareQuote::zero());
    let (from, to) = (pickup.to_string(), destination.to_string());
    view.refresh(async move { client.estimate(&from, &to, period).await });

    let quote = tokio::select! {
        quote = view.settled() => quote,
        _ = tokio::signal::ctrl_c() => {
            warn("Fare lookup cancelled");
            return Ok(());
        }
    };

    info(&format!("{} -> {} ({})", pickup, destination, period));
    println!("  auto  ₹{}", quote.auto);
    println!("  car   ₹{}", quote.car);
    println!("  moto  ₹{}", quote.moto);

    Ok(())
}

/// Start the HTTP decision service
pub async fn serve(host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = load_config()?;
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    info(&format!("Starting decision service on {}:{}", host, port));
    crate::api::run_server(config, &host, port).await?;

    Ok(())
}

// Helper functions

fn load_config() -> Result<Config> {
    Ok(config::load_config_or_default()?)
}

fn resolver(config: &Config) -> SessionResolver<FileStore> {
    SessionResolver::new(
        FileStore::new(&config.storage.path),
        SessionKeys::from(&config.storage),
    )
}
