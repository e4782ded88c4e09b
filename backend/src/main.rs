//! Complaint service entry-point: loads settings, prepares the store, and
//! serves the REST API with health probes and OpenAPI docs.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use complaints::inbound::http::health::HealthState;
use complaints::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
#[cfg(feature = "metrics")]
use server::build_prometheus;
use server::{ServerConfig, ServerSettings, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let config = build_server_config(&settings).await?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(addr = %settings.bind_addr(), "complaint service listening");

    let result = server.await;
    health_state.mark_unhealthy();
    result
}

async fn build_server_config(settings: &ServerSettings) -> std::io::Result<ServerConfig> {
    let origin = settings.allowed_origin();
    if let Some(origin) = origin {
        origin.parse::<actix_web::http::Uri>().map_err(|e| {
            std::io::Error::other(format!("invalid allowed origin {origin:?}: {e}"))
        })?;
    }

    let config = ServerConfig::new(settings.bind_addr()).with_allowed_origin(origin);

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(Some(build_prometheus()?));

    let Some(database_url) = settings.database_url() else {
        return Ok(config);
    };

    run_pending_migrations(database_url)
        .await
        .map_err(|e| std::io::Error::other(format!("database migration failed: {e}")))?;
    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(settings.pool_max_size()))
        .await
        .map_err(|e| std::io::Error::other(format!("database pool setup failed: {e}")))?;
    Ok(config.with_db_pool(pool))
}
