use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use tokio::net::TcpListener;

use userdesk_server::config::{init_logging, Config};
use userdesk_server::repository::PgUserRepository;
use userdesk_server::routes::create_routes;
use userdesk_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env().context("Invalid configuration")?;
    init_logging(&config.log_filter, config.log_format);

    let users = PgUserRepository::connect(&config.database_url, config.max_connections)
        .await
        .context("Failed to initialize database")?;

    let app = create_routes(AppState::new(Arc::new(users)), &config);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!("Server running at http://{}", addr);

    axum::serve(listener, app).await.context("Server failed")?;

    Ok(())
}
