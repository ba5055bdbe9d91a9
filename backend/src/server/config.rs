//! HTTP server configuration read from the environment.

use std::net::SocketAddr;

use mockable::Env;
use recipe_backend::inbound::http::session_config::{
    BuildMode, SessionConfigError, SessionSettings, session_settings_from_env,
};
use recipe_backend::outbound::persistence::{DEFAULT_POOL_MAX_SIZE, PoolConfig};
use tracing::info;

const BIND_ADDR_ENV: &str = "BIND_ADDR";
const DATABASE_URL_ENV: &str = "DATABASE_URL";
const POOL_MAX_SIZE_ENV: &str = "DATABASE_POOL_MAX_SIZE";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Errors raised while assembling [`ServerConfig`].
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Session(#[from] SessionConfigError),
    #[error("invalid value for BIND_ADDR='{value}'; expected host:port")]
    BindAddr { value: String },
    #[error("invalid value for DATABASE_POOL_MAX_SIZE='{value}'; expected a positive integer")]
    PoolSize { value: String },
}

/// Everything needed to start the HTTP server.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) database: Option<PoolConfig>,
}

impl ServerConfig {
    /// Read `BIND_ADDR`, `DATABASE_URL`, `DATABASE_POOL_MAX_SIZE` and the
    /// session toggles.
    ///
    /// Without `DATABASE_URL` the server runs on the in-memory store.
    pub fn from_env<E: Env>(env: &E, mode: BuildMode) -> Result<Self, ConfigError> {
        let session = session_settings_from_env(env, mode)?;

        let raw_addr = env
            .string(BIND_ADDR_ENV)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr = raw_addr
            .parse()
            .map_err(|_| ConfigError::BindAddr { value: raw_addr })?;

        let database = env
            .string(DATABASE_URL_ENV)
            .filter(|url| !url.trim().is_empty())
            .map(|url| pool_config(env, url))
            .transpose()?;
        if database.is_none() {
            info!("{DATABASE_URL_ENV} not set; using the in-memory store");
        }

        Ok(Self {
            session,
            bind_addr,
            database,
        })
    }

    /// Socket address the server will bind to.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

fn pool_config<E: Env>(env: &E, url: String) -> Result<PoolConfig, ConfigError> {
    let max_size = match env.string(POOL_MAX_SIZE_ENV) {
        None => DEFAULT_POOL_MAX_SIZE,
        Some(value) => match value.trim().parse::<u32>() {
            Ok(size) if size > 0 => size,
            _ => return Err(ConfigError::PoolSize { value }),
        },
    };
    Ok(PoolConfig::new(url).with_max_size(max_size))
}
