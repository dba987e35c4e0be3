use crate::alerts::IssuerRecord;
use crate::api::IssuerSource;
use crate::error::FetchError;
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde_json::Value;

const COMPANIES_PATH: &str = "/api/v1/companies";

/// Client for the community Casablanca Bourse API.
pub struct CasablancaClient {
    base_url: String,
    client: Client,
}

impl CasablancaClient {
    pub fn new(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    pub fn companies_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), COMPANIES_PATH)
    }
}

#[async_trait]
impl IssuerSource for CasablancaClient {
    async fn fetch_issuers(&self) -> Result<Vec<IssuerRecord>, FetchError> {
        let url = self.companies_url();
        info!("Fetching listings from {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let issuers = parse_companies(&body)?;
        debug!("Received {} issuers", issuers.len());
        Ok(issuers)
    }
}

/// The payload must be a JSON array of objects. Field-level oddities are left to
/// [`IssuerRecord::from_json`]; only a wrong overall shape fails the fetch.
pub fn parse_companies(body: &str) -> Result<Vec<IssuerRecord>, FetchError> {
    let payload: Value =
        serde_json::from_str(body).map_err(|e| FetchError::Payload(e.to_string()))?;

    let entries = match payload {
        Value::Array(entries) => entries,
        other => {
            return Err(FetchError::Payload(format!(
                "expected a JSON array, got {}",
                json_kind(&other)
            )))
        }
    };

    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            entry
                .as_object()
                .map(IssuerRecord::from_json)
                .ok_or_else(|| {
                    FetchError::Payload(format!("entry {} is {}", i, json_kind(entry)))
                })
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
