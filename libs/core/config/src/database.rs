use crate::{env_or_default, env_parse_or_default, ConfigError, FromEnv};

/// Connection parameters for the relational database.
///
/// Each field maps to one `DB_*` environment variable. Nothing is validated
/// beyond coercing `DB_PORT` into a number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub ssl_mode: String,
}

impl DatabaseConfig {
    /// PostgreSQL connection URL, with credentials percent-encoded.
    pub fn url(&self) -> String {
        let credentials = if self.password.is_empty() {
            urlencoding::encode(&self.user).into_owned()
        } else {
            format!(
                "{}:{}",
                urlencoding::encode(&self.user),
                urlencoding::encode(&self.password)
            )
        };

        format!(
            "postgres://{}@{}:{}/{}?sslmode={}",
            credentials, self.host, self.port, self.name, self.ssl_mode
        )
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: String::new(),
            name: "users".to_string(),
            ssl_mode: "disable".to_string(),
        }
    }
}

impl FromEnv for DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            host: env_or_default("DB_HOST", &defaults.host),
            port: env_parse_or_default("DB_PORT", defaults.port)?,
            user: env_or_default("DB_USER", &defaults.user),
            password: env_or_default("DB_PASSWORD", &defaults.password),
            name: env_or_default("DB_NAME", &defaults.name),
            ssl_mode: env_or_default("DB_SSL_MODE", &defaults.ssl_mode),
        })
    }
}
