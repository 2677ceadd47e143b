use axum_helpers::HttpConfig;
use core_config::{AppInfo, FromEnv, app_info, env_parse_or_default, server::ServerConfig};
use database::RetryPolicy;
use database::postgres::PostgresConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Startup connection attempts when `DB_CONNECT_RETRIES` is unset
pub const DEFAULT_CONNECT_RETRIES: u32 = 5;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub http: HttpConfig,
    pub environment: Environment,
    /// Attempts made to reach PostgreSQL before giving up at startup
    pub connect_retries: u32,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?; // DB_* with local defaults
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, SERVER_PORT=8080
        let http = HttpConfig::from_env()?;
        let connect_retries = env_parse_or_default("DB_CONNECT_RETRIES", DEFAULT_CONNECT_RETRIES)?;

        Ok(Self {
            app: app_info!(),
            database,
            server,
            http,
            environment,
            connect_retries,
        })
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.connect_retries)
    }
}
