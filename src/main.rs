// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::error::Error;

use relational_ledger::{
    api::router, config::Settings, logging::init_logging, state::AppState,
    storage::LedgerDatabase,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let settings = Settings::from_env()?;
    init_logging(settings.debug, settings.log_format);

    let database_path = settings.database_path();
    let ledger = LedgerDatabase::open(&database_path)?;
    tracing::info!(path = %database_path.display(), "Ledger database opened");

    let addr = settings.bind_addr()?;
    tracing::info!(
        name = %settings.name,
        environment = ?settings.environment,
        "Starting ledger API"
    );

    let app = router(AppState::new(settings, ledger));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening (docs at /api/docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
