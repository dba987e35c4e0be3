pub mod casablanca;

use crate::alerts::IssuerRecord;
use crate::error::FetchError;
use async_trait::async_trait;

/// Where issuer listings come from.
#[async_trait]
pub trait IssuerSource: Send + Sync {
    async fn fetch_issuers(&self) -> Result<Vec<IssuerRecord>, FetchError>;
}
