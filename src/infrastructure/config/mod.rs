use std::time::Duration;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};

/// Optional config file, read from the working directory.
pub const CONFIG_FILE: &str = "anydem.toml";

/// Deployment-wide variable names, read without the `ANYDEM_` prefix.
const URL_VARS: [&str; 2] = ["STATES_CSV_URL", "CANDIDATES_CSV_URL"];

const ENV_PREFIX: &str = "ANYDEM_";

/// When the two datasets are fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshPolicy {
    /// Fetch once before the server binds and serve that snapshot for the process lifetime.
    Startup,
    /// Fetch a fresh snapshot for every request.
    PerRequest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub states_csv_url: String,
    pub candidates_csv_url: String,
    pub host: String,
    pub port: u16,
    pub refresh: RefreshPolicy,
    pub fetch_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            states_csv_url: String::new(),
            candidates_csv_url: String::new(),
            host: "127.0.0.1".to_string(),
            port: 5000,
            refresh: RefreshPolicy::Startup,
            fetch_timeout_secs: 30,
        }
    }
}

impl AppConfig {
    /// Defaults, then `anydem.toml`, then the environment.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::raw().only(&URL_VARS))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn load() -> Result<Self> {
        Self::from_figment(Self::figment())
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: AppConfig = figment
            .extract()
            .map_err(|e| AppError::ConfigError(format!("Failed to read configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        validate_url("STATES_CSV_URL", &self.states_csv_url)?;
        validate_url("CANDIDATES_CSV_URL", &self.candidates_csv_url)?;
        if self.fetch_timeout_secs == 0 {
            return Err(AppError::ConfigError(
                "fetch_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

fn validate_url(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::ConfigError(format!("{} is not set", name)));
    }
    let parsed = url::Url::parse(value)
        .map_err(|e| AppError::ConfigError(format!("{} is not a valid URL: {}", name, e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(AppError::ConfigError(format!(
            "{} must use http or https, got '{}'",
            name, other
        ))),
    }
}
