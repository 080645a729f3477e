use std::path::PathBuf;

use anyhow::{Context, Result};
use character_app::config::DEFAULT_CONFIG_PATH;
use character_app::{bootstrap, Config};
use character_server::{create_router, AppState};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "character-server")]
#[command(version, about = "Serve the characters app", long_about = None)]
struct Cli {
    /// Path to the TOML config file
    #[arg(short, long, env = "CHARACTERS_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Interface to bind (overrides [server] host)
    #[arg(long, env = "HOST")]
    host: Option<String>,

    /// Port to listen on (overrides [server] port)
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env first so clap sees its variables
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "character_server=info,character_app=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = Config::load(&cli.config)?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    info!(
        config = %cli.config.display(),
        history = ?config.router.history,
        base = %config.router.base,
        "characters starting"
    );

    let start_url = config.router.history_mode().href("/");
    let app = bootstrap(&config, &start_url)?;
    let router = create_router(AppState::new(app));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(%addr, "server running at http://{}", addr);

    axum::serve(listener, router).await.context("Server error")?;
    Ok(())
}
