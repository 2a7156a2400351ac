mod api;
mod error;
mod main_lib;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use salesdesk_core::db::{create_pool, get_connection, run_migrations};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "salesdesk.db".to_string());
    let pool = create_pool(&database_url)?;
    {
        let mut conn = get_connection(&pool)?;
        run_migrations(&mut conn)?;
    }

    let state = Arc::new(main_lib::AppState::new(pool));
    let router = main_lib::build_router(state);

    let bind = std::env::var("SALESDESK_BIND").unwrap_or_else(|_| "127.0.0.1:8090".to_string());
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!("salesdesk-server listening on {}", bind);
    axum::serve(listener, router).await?;
    Ok(())
}
