//! Backend entry-point: reads configuration, applies migrations, and serves
//! the REST API.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use recipe_backend::inbound::http::health::HealthState;
use recipe_backend::inbound::http::session_config::BuildMode;
use recipe_backend::outbound::persistence::{DbPool, run_migrations};
use server::{ServerConfig, build_http_state, create_server};

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

    let config = ServerConfig::from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;

    let pool = match &config.database {
        Some(database) => {
            let url = database.database_url().to_owned();
            let applied = tokio::task::spawn_blocking(move || run_migrations(&url))
                .await
                .map_err(std::io::Error::other)?
                .map_err(std::io::Error::other)?;
            info!(applied, "database migrations complete");
            Some(
                DbPool::new(database.clone())
                    .await
                    .map_err(std::io::Error::other)?,
            )
        }
        None => None,
    };

    let http_state = build_http_state(pool.as_ref());
    let health_state = web::Data::new(HealthState::new());
    info!(bind_addr = %config.bind_addr(), "starting server");
    let server = create_server(health_state, http_state, config)?;
    server.await
}
