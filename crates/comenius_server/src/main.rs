//! Comenius lesson server binary.

use comenius_database::{establish_pool, PgLessonRepository};
use comenius_error::ComeniusResult;
use comenius_generation::GenerationService;
use comenius_models::OpenAiClient;
use comenius_server::{create_router, AppConfig, AppState};
use comenius_storage::FileSystemStorage;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ComeniusResult<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env()?;

    let pool = establish_pool(&config.database_url)?;
    let repository = Arc::new(PgLessonRepository::new(pool));
    let storage = Arc::new(FileSystemStorage::new(&config.storage_root)?);
    let driver = Arc::new(OpenAiClient::from_env(&config.model)?);

    let generation = GenerationService::new(driver, repository.clone(), storage.clone());
    let state = AppState::new(repository, storage, generation);
    let router = create_router(state);

    info!(addr = %config.bind_addr, model = %config.model, "Starting Comenius lesson server");
    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .map_err(|e| {
            comenius_error::ServerError::new(comenius_error::ServerErrorKind::Serve(format!(
                "bind {}: {e}",
                config.bind_addr
            )))
        })?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            comenius_error::ServerError::new(comenius_error::ServerErrorKind::Serve(e.to_string()))
        })?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
