use std::{env, time::Duration};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} is required")]
    Missing(&'static str),
    #[error("environment variable {0} is not valid: {1}")]
    Invalid(&'static str, String),
}

pub struct DatabaseConfig {
    pub username: String,
    pub password: String,
    pub host: String,
    pub port: String,
    pub name: String,
}

impl DatabaseConfig {
    pub fn connection_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.name
        )
    }
}

pub struct BotConfig {
    pub discord_token: String,
    pub database: DatabaseConfig,
    pub manifest_webhooks: Vec<String>,
    pub sweep_interval: Duration,
    pub resync_interval: Duration,
    pub end_workers: usize,
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::Missing(name))
}

fn optional(name: &'static str, default: &str) -> String {
    env::var(name).unwrap_or(default.to_string())
}

fn parsed<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid(name, value)),
        Err(_) => Ok(default),
    }
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let manifest_webhooks = required("MANIFEST_WEBHOOKS")?
            .split(',')
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        if manifest_webhooks.is_empty() {
            return Err(ConfigError::Invalid(
                "MANIFEST_WEBHOOKS",
                "at least one webhook URL is needed".to_string(),
            ));
        }

        let end_workers = parsed("END_WORKERS", 16usize)?;
        if end_workers == 0 {
            return Err(ConfigError::Invalid("END_WORKERS", "0".to_string()));
        }

        Ok(BotConfig {
            discord_token: required("DISCORD_TOKEN")?,
            database: DatabaseConfig {
                username: optional("DB_USER", "postgres"),
                password: required("DB_PASSWORD")?,
                host: optional("DB_HOST", "localhost"),
                port: optional("DB_PORT", "5432"),
                name: optional("DB_NAME", "postgres"),
            },
            manifest_webhooks,
            sweep_interval: Duration::from_secs(parsed("SWEEP_INTERVAL_SECS", 1u64)?.max(1)),
            resync_interval: Duration::from_secs(parsed("RESYNC_INTERVAL_SECS", 60u64)?.max(1)),
            end_workers,
        })
    }
}
