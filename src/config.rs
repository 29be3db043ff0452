//! Bot configuration loaded from environment variables.
//!
//! Required: `JENKINS_URL`, `JENKINS_USER`, `JENKINS_TOKEN`.
//! Optional: `AUTHORIZED_USERS` (comma-separated, defaults to the built-in
//! list), `SLACK_SIGNING_SECRET` (enables request signature verification),
//! `HOST` (default 0.0.0.0), `PORT` (default 3000).

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;

// Add your Slack usernames
const DEFAULT_AUTHORIZED_USERS: &[&str] = &["subham", "dev-lead"];

/// Configuration errors that abort startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Jenkins base URL, without a trailing slash.
    pub jenkins_url: String,
    /// Jenkins basic-auth username.
    pub jenkins_user: String,
    /// Jenkins basic-auth API token.
    pub jenkins_token: String,
    /// Usernames allowed to trigger deployments.
    pub authorized_users: Vec<String>,
    /// Slack signing secret; verification is skipped when unset.
    pub slack_signing_secret: Option<String>,
    pub host: IpAddr,
    pub port: u16,
}

impl Config {
    /// Load configuration from the process environment, reading a `.env`
    /// file first if one is present.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let jenkins_url = get_required_env("JENKINS_URL")?
            .trim_end_matches('/')
            .to_string();
        let jenkins_user = get_required_env("JENKINS_USER")?;
        let jenkins_token = get_required_env("JENKINS_TOKEN")?;

        let authorized_users = match get_optional_env("AUTHORIZED_USERS") {
            Some(raw) => parse_user_list(&raw),
            None => DEFAULT_AUTHORIZED_USERS
                .iter()
                .map(|user| (*user).to_string())
                .collect(),
        };

        let slack_signing_secret = get_optional_env("SLACK_SIGNING_SECRET");

        let host = get_env_or_default("HOST", "0.0.0.0")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("PORT".to_string(), e.to_string()))?;

        Ok(Self {
            jenkins_url,
            jenkins_user,
            jenkins_token,
            authorized_users,
            slack_signing_secret,
            host,
            port,
        })
    }

    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_user_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|user| !user.is_empty())
        .map(str::to_string)
        .collect()
}
