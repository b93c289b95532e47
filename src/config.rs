//! Configuration types.

use std::path::PathBuf;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Environment variable holding the LINE channel secret.
pub const CHANNEL_SECRET_ENV: &str = "channel_secret";
/// Environment variable holding the LINE channel access token.
pub const CHANNEL_ACCESS_TOKEN_ENV: &str = "channel_access_token";

/// Which bot the webhook drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotMode {
    /// Stateless slash-command bot (`/echo`, `/1`, `/2`).
    Commands,
    /// Stateful onboarding + menu bot backed by the user store.
    Conversation,
}

impl std::str::FromStr for BotMode {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "commands" | "command" => Ok(Self::Commands),
            "conversation" => Ok(Self::Conversation),
            other => Err(format!("Unknown bot mode: {other}")),
        }
    }
}

impl std::fmt::Display for BotMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Commands => write!(f, "commands"),
            Self::Conversation => write!(f, "conversation"),
        }
    }
}

/// Bot configuration, read from the environment at startup.
#[derive(Debug)]
pub struct BotConfig {
    /// LINE channel secret used to verify webhook signatures.
    pub channel_secret: SecretString,
    /// LINE channel access token used for the reply API.
    pub channel_access_token: SecretString,
    pub mode: BotMode,
    /// Port the webhook server listens on.
    pub port: u16,
    /// Path to the libSQL database file.
    pub db_path: PathBuf,
    /// Path to the job listings JSON file.
    pub jobs_path: PathBuf,
    /// Public base URL of this server, used for job detail links in carousels.
    pub public_url: Option<String>,
    /// Seed for the detail-page score. Unset means entropy.
    pub score_seed: Option<u64>,
    /// Directory for rolling log files. Unset means stderr only.
    pub log_dir: Option<PathBuf>,
}

impl BotConfig {
    /// Build the config from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<SecretString, ConfigError> {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .map(SecretString::from)
                .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
        };
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let channel_secret = required(CHANNEL_SECRET_ENV)?;
        let channel_access_token = required(CHANNEL_ACCESS_TOKEN_ENV)?;

        let mode = match optional("JOBLINE_MODE") {
            Some(raw) => raw.parse().map_err(|message| ConfigError::InvalidValue {
                key: "JOBLINE_MODE".to_string(),
                message,
            })?,
            None => BotMode::Conversation,
        };

        let port = match optional("JOBLINE_PORT") {
            Some(raw) => raw.trim().parse().map_err(|e| ConfigError::InvalidValue {
                key: "JOBLINE_PORT".to_string(),
                message: format!("{e}"),
            })?,
            None => 8000,
        };

        let score_seed = match optional("JOBLINE_SCORE_SEED") {
            Some(raw) => Some(raw.trim().parse().map_err(|e| ConfigError::InvalidValue {
                key: "JOBLINE_SCORE_SEED".to_string(),
                message: format!("{e}"),
            })?),
            None => None,
        };

        Ok(Self {
            channel_secret,
            channel_access_token,
            mode,
            port,
            db_path: optional("JOBLINE_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./data/jobline.db")),
            jobs_path: optional("JOBLINE_JOBS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("job_listings.json")),
            public_url: optional("JOBLINE_PUBLIC_URL")
                .map(|url| url.trim_end_matches('/').to_string()),
            score_seed,
            log_dir: optional("JOBLINE_LOG_DIR").map(PathBuf::from),
        })
    }
}
