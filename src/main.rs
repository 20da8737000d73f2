//! Product API server and maintenance commands.

use clap::{Parser, Subcommand};
use product_api::{build_app, connect_database, reset_products, shutdown_signal, AppState, Config, PgProductStore};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "product-api", about = "Products REST API", version)]
struct Cli {
    #[command(flatten)]
    config: Config,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the HTTP API (default)
    Serve,
    /// Drop and recreate the products table
    Clear,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("product_api=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(cli.config).await,
        Command::Clear => clear(cli.config).await,
    }
}

async fn serve(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let pool = connect_database(&config).await?;
    let state = AppState::new(PgProductStore::new(pool));
    let app = build_app(state, &config);

    let listener = TcpListener::bind(config.socket_addr()).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    tracing::info!("API docs at http://{}/docs", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn clear(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(config.acquire_timeout())
        .connect(&config.database_url)
        .await?;
    if let Err(e) = reset_products(&pool).await {
        tracing::error!(error = %e, "could not clear products");
        return Err(e.into());
    }
    tracing::info!("products table cleared");
    Ok(())
}
