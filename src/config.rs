use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017/";
pub const DEFAULT_DATABASE: &str = "eduhub_db";

/// Connection settings for the MongoDB client.
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub uri: String,
    pub database: String,
    pub max_pool_size: u32,
    pub min_pool_size: u32,
    pub max_idle_time: Duration,
    pub connect_timeout: Duration,
    pub server_selection_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            uri: DEFAULT_MONGODB_URI.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            max_pool_size: 20,
            min_pool_size: 5,
            max_idle_time: Duration::from_secs(300),
            connect_timeout: Duration::from_secs(5),
            server_selection_timeout: Duration::from_secs(5),
        }
    }
}

/// Process-level settings read once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub database: DatabaseConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = DatabaseConfig::default();

        let database = DatabaseConfig {
            uri: lookup("MONGODB_URI").unwrap_or(defaults.uri),
            database: lookup("MONGODB_DATABASE").unwrap_or(defaults.database),
            max_pool_size: parse_or(&lookup, "MONGODB_MAX_POOL_SIZE", defaults.max_pool_size),
            min_pool_size: parse_or(&lookup, "MONGODB_MIN_POOL_SIZE", defaults.min_pool_size),
            max_idle_time: Duration::from_secs(parse_or(
                &lookup,
                "MONGODB_MAX_IDLE_SECS",
                defaults.max_idle_time.as_secs(),
            )),
            connect_timeout: Duration::from_secs(parse_or(
                &lookup,
                "MONGODB_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout.as_secs(),
            )),
            server_selection_timeout: Duration::from_secs(parse_or(
                &lookup,
                "MONGODB_SERVER_SELECTION_TIMEOUT_SECS",
                defaults.server_selection_timeout.as_secs(),
            )),
        };

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_else(|| vec!["http://localhost:3000".to_string()]);

        Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 3002),
            cors_allowed_origins,
            database,
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                log::warn!("⚠️  Invalid value for {}: {:?}, using {}", key, raw, default);
                default
            }
        },
        None => default,
    }
}
