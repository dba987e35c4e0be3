pub mod whatsapp;

use crate::error::NotifyError;
use async_trait::async_trait;

pub use whatsapp::WhatsAppNotifier;

/// Sink for the alert digest.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, text: &str) -> Result<(), NotifyError>;
}
