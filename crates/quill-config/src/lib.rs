//! # Quill Config
//!
//! Configuration types for the Quill API, loaded once from environment
//! variables at startup and immutable afterwards.
//!
//! - [`cors`]: allowed CORS origins
//! - [`database`]: PostgreSQL connection settings
//! - [`jwt`]: token signing secret and expiry
//! - [`logging`]: log level, format and optional file output
//! - [`metrics`]: Prometheus exporter switch
//! - [`password`]: bcrypt work factor
//! - [`server`]: bind address
//!
//! # Example
//!
//! ```ignore
//! use quill_config::AppConfig;
//!
//! dotenvy::dotenv().ok();
//! let config = AppConfig::from_env();
//! println!("listening on {}", config.server.address());
//! ```

pub mod cors;
pub mod database;
pub mod jwt;
pub mod logging;
pub mod metrics;
pub mod password;
pub mod server;

use std::env;
use std::str::FromStr;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::JwtConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use metrics::MetricsConfig;
pub use password::PasswordConfig;
pub use server::ServerConfig;

/// Every configuration section the server needs.
#[derive(Clone, Debug, Default)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
    pub cors: CorsConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub metrics: MetricsConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup instead of the process environment.
    pub fn from_source<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            database: DatabaseConfig::from_source(&get),
            jwt: JwtConfig::from_source(&get),
            password: PasswordConfig::from_source(&get),
            cors: CorsConfig::from_source(&get),
            server: ServerConfig::from_source(&get),
            logging: LoggingConfig::from_source(&get),
            metrics: MetricsConfig::from_source(&get),
        }
    }
}

/// Reads `key` and parses it, falling back to `default` when absent or unparsable.
pub(crate) fn parse_or<F, T>(get: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    get(key).and_then(|s| s.trim().parse().ok()).unwrap_or(default)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::HashMap;

    pub fn source(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::source;

    #[test]
    fn test_empty_source_uses_defaults() {
        let config = AppConfig::from_source(|_| None);
        assert_eq!(config.jwt.access_token_expiry, 3600);
        assert_eq!(config.password.bcrypt_cost, 10);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.max_connections, 10);
        assert!(config.metrics.enabled);
    }

    #[test]
    fn test_metrics_switch_is_part_of_app_config() {
        let config = AppConfig::from_source(source(&[("METRICS_ENABLED", "false")]));
        assert!(!config.metrics.enabled);
    }

    #[test]
    fn test_unparsable_values_fall_back() {
        let get = source(&[("JWT_ACCESS_EXPIRY", "soon"), ("SERVER_PORT", "99999")]);
        let config = AppConfig::from_source(get);
        assert_eq!(config.jwt.access_token_expiry, 3600);
        assert_eq!(config.server.port, 3000);
    }
}
