use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned status {0}")]
    Status(u16),

    #[error("Malformed payload: {0}")]
    Payload(String),
}

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("WhatsApp configuration missing (WHATSAPP_TOKEN, WHATSAPP_PHONE_ID, WHATSAPP_TO)")]
    MissingConfig,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("WhatsApp rejected the message: {status} {body}")]
    Rejected { status: u16, body: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Startup failures that prevent a run from beginning.
#[derive(Error, Debug)]
pub enum BvcAlertError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}
