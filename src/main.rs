//! Server binary: loads `.env`, waits for the store, creates tables, serves `/itens` and `/bills`.

use crud_service::{app, initialize, load_from_env, AppState};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("crud_service=info,tower_http=info")),
        )
        .init();

    let config = load_from_env()?;
    let pool = initialize(&config.db).await?;
    let state = AppState::from_pool(pool);

    let listener = TcpListener::bind(&config.addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
