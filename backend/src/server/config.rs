//! Server settings loaded via OrthoConfig and the resolved server
//! configuration built from them.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use complaints::outbound::persistence::{DEFAULT_MAX_SIZE, DbPool};
use ortho_config::OrthoConfig;
use serde::Deserialize;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

/// Port the single-page client expects by default.
pub const DEFAULT_PORT: u16 = 5000;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Settings layered from defaults, config file, `COMPLAINTS_*` environment
/// variables, and command-line flags.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "COMPLAINTS")]
pub struct ServerSettings {
    /// Interface to bind; defaults to every IPv4 interface.
    pub host: Option<IpAddr>,
    /// Listening port; defaults to [`DEFAULT_PORT`].
    pub port: Option<u16>,
    /// PostgreSQL URL. The in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Origin allowed by CORS. Any origin is allowed when absent or `*`.
    pub allowed_origin: Option<String>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
}

impl ServerSettings {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(DEFAULT_HOST),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Configured CORS origin, ignoring blank values.
    pub fn allowed_origin(&self) -> Option<&str> {
        self.allowed_origin
            .as_deref()
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
    }

    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_MAX_SIZE)
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) allowed_origin: Option<String>,
    pub(crate) db_pool: Option<DbPool>,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            allowed_origin: None,
            db_pool: None,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Store complaints in PostgreSQL instead of process memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Restrict CORS to a single origin.
    #[must_use]
    pub fn with_allowed_origin(mut self, origin: Option<&str>) -> Self {
        self.allowed_origin = origin.map(str::to_owned);
        self
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
