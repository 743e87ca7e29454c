//! LedgerLens: statement parsing and document Q&A server.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

mod routes;
mod session;
mod state;

use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ledgerlens_core::LedgerLensConfig::from_env();
    let port = config.port;

    if config.docai_url.is_none() {
        info!("DOCAI_URL not set; /api/upload-ml is disabled");
    }

    let state = Arc::new(AppState::new(config));
    let app = routes::build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("LedgerLens server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
