use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use ticket_log::shared::core::clock::Clock;
use ticket_log::shared::infrastructure::graphql_client::in_memory::InMemoryTicketLogClient;
use ticket_log::shell::config::Config;
use ticket_log::shell::http::router;
use ticket_log::shell::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::from_env()?;

    // In-memory backend for now
    let seed = config.load_seed()?;
    tracing::info!(tickets = seed.len(), "seeding in-memory backend");
    let state = AppState::in_memory(
        Arc::new(InMemoryTicketLogClient::with_tickets(seed)),
        config.account,
        Clock::System,
    );

    let app = router(state);

    tracing::info!("ticket log: http://{}/ticketlog/{{account_id}}/{{page}}", config.addr);
    tracing::info!("GraphQL endpoint: http://{}/gql", config.addr);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
