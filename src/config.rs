use crate::error::ConfigError;
use log::info;
use std::time::Duration;

pub const DEFAULT_CASA_API_BASE: &str = "https://casablanca-bourse-api.onrender.com";
pub const DEFAULT_WHATSAPP_API_BASE: &str = "https://graph.facebook.com/v19.0";
pub const DEFAULT_THRESHOLD_UP: f64 = 2.0;
pub const DEFAULT_THRESHOLD_DOWN: f64 = -2.0;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;

/// Alert boundaries, both inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub up: f64,
    pub down: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            up: DEFAULT_THRESHOLD_UP,
            down: DEFAULT_THRESHOLD_DOWN,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhatsAppCredentials {
    pub token: String,
    pub phone_id: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub casa_api_base: String,
    pub whatsapp_api_base: String,
    pub thresholds: Thresholds,
    /// `None` when any of the three WhatsApp variables is unset or empty.
    pub whatsapp: Option<WhatsAppCredentials>,
    pub http_timeout: Duration,
}

impl Config {
    /// Reads the process environment, after loading `.env` if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let casa_api_base = get("CASA_API_BASE")
            .unwrap_or_else(|| DEFAULT_CASA_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();
        let whatsapp_api_base = get("WHATSAPP_API_BASE")
            .unwrap_or_else(|| DEFAULT_WHATSAPP_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();

        let thresholds = Thresholds {
            up: parse_or("VAR_THRESHOLD_UP", get("VAR_THRESHOLD_UP"), DEFAULT_THRESHOLD_UP)?,
            down: parse_or(
                "VAR_THRESHOLD_DOWN",
                get("VAR_THRESHOLD_DOWN"),
                DEFAULT_THRESHOLD_DOWN,
            )?,
        };

        let whatsapp = match (
            get("WHATSAPP_TOKEN"),
            get("WHATSAPP_PHONE_ID"),
            get("WHATSAPP_TO"),
        ) {
            (Some(token), Some(phone_id), Some(to)) => Some(WhatsAppCredentials {
                token,
                phone_id,
                to,
            }),
            _ => None,
        };

        let http_timeout = Duration::from_secs(parse_or(
            "HTTP_TIMEOUT_SECS",
            get("HTTP_TIMEOUT_SECS"),
            DEFAULT_HTTP_TIMEOUT_SECS,
        )?);

        Ok(Self {
            casa_api_base,
            whatsapp_api_base,
            thresholds,
            whatsapp,
            http_timeout,
        })
    }

    pub fn log(&self) {
        info!("Configuration loaded:");
        info!("  Casablanca API: {}", self.casa_api_base);
        info!(
            "  Thresholds: up >= {}%, down <= {}%",
            self.thresholds.up, self.thresholds.down
        );
        match &self.whatsapp {
            Some(creds) => info!(
                "  WhatsApp: phone_id={} to={} token=***",
                creds.phone_id, creds.to
            ),
            None => info!("  WhatsApp: not configured"),
        }
        info!("  HTTP timeout: {}s", self.http_timeout.as_secs());
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        None => Ok(default),
    }
}
