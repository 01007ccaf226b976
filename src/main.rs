mod domain;
mod energy;
mod error;
mod macros;
mod server;
mod session;
mod store;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use crate::server::AppState;
use crate::store::Store;

/// Daily energy and macronutrient planning service.
#[derive(Parser, Debug)]
#[command(name = "nutrimodel")]
#[command(about = "Personal daily calorie and macronutrient planner")]
#[command(version)]
struct Args {
    /// Path to the SQLite database file.
    /// Can also be set via NUTRIMODEL_DB environment variable.
    #[arg(
        long,
        value_name = "FILE",
        env = "NUTRIMODEL_DB",
        default_value = "data/nutrimodel.db"
    )]
    db: PathBuf,

    /// Port number for the web server.
    /// Can also be set via NUTRIMODEL_PORT environment variable.
    #[arg(long, value_name = "PORT", env = "NUTRIMODEL_PORT", default_value = "8080")]
    port: u16,

    /// Directory with frontend static files; the service is API-only
    /// when no directory is found.
    #[arg(long, value_name = "DIR", env = "NUTRIMODEL_STATIC")]
    static_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    // Make sure the database directory exists before SQLite opens the file
    if let Some(parent) = args.db.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create data directory {}", parent.display()))?;
    }

    let database_url = format!("sqlite:{}", args.db.display());
    println!("Opening database: {}", args.db.display());

    let store = Store::connect(&database_url)
        .await
        .with_context(|| format!("Failed to open database {}", args.db.display()))?;

    let static_dir = resolve_static_dir(args.static_dir);
    match &static_dir {
        Some(dir) => println!("Static files: {}", dir.display()),
        None => println!("No static directory found, serving API only"),
    }

    let state = Arc::new(AppState { store });
    server::run_server(state, args.port, static_dir).await?;

    Ok(())
}

/// Uses the configured static directory when it exists, otherwise looks
/// for `static/` in the working directory.
fn resolve_static_dir(configured: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(dir) = configured {
        if dir.is_dir() {
            return Some(dir);
        }
        log::warn!("Static directory {} does not exist", dir.display());
        return None;
    }

    let cwd_static = PathBuf::from("static");
    cwd_static.is_dir().then_some(cwd_static)
}
