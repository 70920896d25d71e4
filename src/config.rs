// src/config.rs
use std::env::VarError;
use std::net::SocketAddr;
use thiserror::Error;

pub const DEFAULT_DISCOUNT_THRESHOLD: f64 = 0.25;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Run configuration, read once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct Config {
    pub apify_task_id: String,
    pub apify_token: String,
    /// Minimum discount fraction (0.25 = 25% below Zestimate).
    pub discount_threshold: f64,
    pub sendgrid_api_key: String,
    pub alert_email_to: String,
    pub alert_email_from: String,

    pub bind_addr: SocketAddr,
    pub max_workers: usize,
    pub log_level: String,
}

impl Config {
    /// Threshold as a whole percentage, used in banners and the digest heading.
    pub fn threshold_percent(&self) -> i64 {
        (self.discount_threshold * 100.0).round() as i64
    }
}

/// Load `.env` (if any) and read the configuration from the process environment.
pub fn load_config() -> Result<Config, ConfigError> {
    dotenvy::dotenv().ok();
    build_config(|key| std::env::var(key))
}

/// Parse the configuration through `lookup` so tests can feed a plain map
/// instead of touching the process environment.
pub fn build_config<F>(lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        match lookup(var) {
            Ok(v) if !v.trim().is_empty() => Ok(v),
            _ => Err(ConfigError::MissingEnvVar(var.to_string())),
        }
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let apify_task_id = require("APIFY_TASK_ID")?;
    let apify_token = require("APIFY_TOKEN")?;

    let discount_threshold = match lookup("DISCOUNT_THRESHOLD") {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|e| invalid("DISCOUNT_THRESHOLD", e.to_string()))?,
        Err(_) => DEFAULT_DISCOUNT_THRESHOLD,
    };

    let sendgrid_api_key = require("SENDGRID_API_KEY")?;
    let alert_email_to = require("ALERT_EMAIL_TO")?;
    let alert_email_from = require("ALERT_EMAIL_FROM")?;

    let bind_addr = or_default("DEALS_BIND_ADDR", "127.0.0.1:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("DEALS_BIND_ADDR", e.to_string()))?;

    let max_workers = or_default("DEALS_MAX_WORKERS", "8")
        .parse::<usize>()
        .map_err(|e| invalid("DEALS_MAX_WORKERS", e.to_string()))?;
    if max_workers == 0 {
        return Err(invalid("DEALS_MAX_WORKERS", "must be at least 1".into()));
    }

    let log_level = or_default("DEALS_LOG_LEVEL", "info");

    Ok(Config {
        apify_task_id,
        apify_token,
        discount_threshold,
        sendgrid_api_key,
        alert_email_to,
        alert_email_from,
        bind_addr,
        max_workers,
        log_level,
    })
}
