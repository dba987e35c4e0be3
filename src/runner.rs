use crate::alerts::{format_digest, AlertEngine};
use crate::api::IssuerSource;
use crate::error::NotifyError;
use crate::notify::Notifier;
use chrono::{DateTime, TimeZone};
use log::{error, info};
use std::fmt::{self, Display};

/// How a single fetch-classify-notify cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    FetchFailed,
    NoAlerts,
    NotifierUnconfigured { alerts: usize },
    Delivered { alerts: usize },
    DeliveryFailed { alerts: usize },
}

impl Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunOutcome::FetchFailed => write!(f, "fetch failed"),
            RunOutcome::NoAlerts => write!(f, "no alerts"),
            RunOutcome::NotifierUnconfigured { alerts } => {
                write!(f, "{} alert(s), notifier not configured", alerts)
            }
            RunOutcome::Delivered { alerts } => write!(f, "{} alert(s) delivered", alerts),
            RunOutcome::DeliveryFailed { alerts } => {
                write!(f, "{} alert(s), delivery failed", alerts)
            }
        }
    }
}

/// Runs one cycle. Only a fetch failure ends it early; every other problem is logged and
/// reflected in the returned outcome.
///
/// `clock` is read after classification, so the digest timestamp reflects when the
/// alerts were produced.
pub async fn run_once<Tz, F>(
    source: &dyn IssuerSource,
    engine: &AlertEngine,
    notifier: &dyn Notifier,
    clock: F,
) -> RunOutcome
where
    Tz: TimeZone,
    Tz::Offset: Display,
    F: FnOnce() -> DateTime<Tz>,
{
    let issuers = match source.fetch_issuers().await {
        Ok(issuers) => issuers,
        Err(e) => {
            error!("❌ BVC API error: {}", e);
            return RunOutcome::FetchFailed;
        }
    };

    let alerts = engine.build_alerts(&issuers);
    info!(
        "{} of {} issuers crossed a threshold",
        alerts.len(),
        issuers.len()
    );

    let digest = match format_digest(&alerts, &clock()) {
        Some(digest) => digest,
        None => {
            info!("ℹ️ No alerts.");
            return RunOutcome::NoAlerts;
        }
    };

    let count = alerts.len();
    match notifier.send(&digest).await {
        Ok(()) => {
            info!("✅ Alert sent on WhatsApp.");
            RunOutcome::Delivered { alerts: count }
        }
        Err(NotifyError::MissingConfig) => {
            error!("❌ {}", NotifyError::MissingConfig);
            RunOutcome::NotifierUnconfigured { alerts: count }
        }
        Err(e) => {
            error!("❌ WhatsApp error: {}", e);
            RunOutcome::DeliveryFailed { alerts: count }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::issuer::ChangeValue;
    use crate::alerts::IssuerRecord;
    use crate::config::Thresholds;
    use crate::error::FetchError;
    use async_trait::async_trait;
    use chrono::{FixedOffset, Utc};
    use std::sync::Mutex;

    struct StaticSource(Option<Vec<IssuerRecord>>);

    #[async_trait]
    impl IssuerSource for StaticSource {
        async fn fetch_issuers(&self) -> Result<Vec<IssuerRecord>, FetchError> {
            self.0.clone().ok_or(FetchError::Status(502))
        }
    }

    #[derive(Clone, Copy)]
    enum Reply {
        Accept,
        Unconfigured,
        Reject,
    }

    struct RecordingNotifier {
        reply: Reply,
        sent: Mutex<Vec<String>>,
    }

    impl RecordingNotifier {
        fn new(reply: Reply) -> Self {
            Self {
                reply,
                sent: Mutex::new(Vec::new()),
            }
        }

        fn sent(&self) -> Vec<String> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn send(&self, text: &str) -> Result<(), NotifyError> {
            if let Reply::Unconfigured = self.reply {
                return Err(NotifyError::MissingConfig);
            }
            self.sent.lock().unwrap().push(text.to_string());
            match self.reply {
                Reply::Reject => Err(NotifyError::Rejected {
                    status: 500,
                    body: "boom".to_string(),
                }),
                _ => Ok(()),
            }
        }
    }

    fn fixed_clock() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2024, 6, 14, 16, 45, 0)
            .unwrap()
    }

    fn engine() -> AlertEngine {
        AlertEngine::new(Thresholds::default())
    }

    #[tokio::test]
    async fn test_single_issuer_end_to_end() {
        let source = StaticSource(Some(vec![IssuerRecord::new(
            "Foo",
            "FOO",
            ChangeValue::Text("+3,10%".into()),
        )]));
        let notifier = RecordingNotifier::new(Reply::Accept);

        let outcome = run_once(&source, &engine(), &notifier, fixed_clock).await;

        assert_eq!(outcome, RunOutcome::Delivered { alerts: 1 });
        assert_eq!(
            notifier.sent(),
            vec!["📈 Alertes Bourse de Casablanca\n🕒 2024-06-14 16:45\n\n🚀 FOO : 3.10%".to_string()]
        );
    }

    #[tokio::test]
    async fn test_fetch_failure_stops_the_run() {
        let notifier = RecordingNotifier::new(Reply::Accept);

        let outcome = run_once(&StaticSource(None), &engine(), &notifier, Utc::now).await;

        assert_eq!(outcome, RunOutcome::FetchFailed);
        assert!(notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn test_no_alerts_means_no_delivery() {
        let source = StaticSource(Some(vec![IssuerRecord::new(
            "Inconnu",
            "X",
            ChangeValue::Number(1.0),
        )]));
        let notifier = RecordingNotifier::new(Reply::Accept);

        let outcome = run_once(&source, &engine(), &notifier, Utc::now).await;

        assert_eq!(outcome, RunOutcome::NoAlerts);
        assert!(notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn test_missing_notifier_config_is_reported() {
        let source = StaticSource(Some(vec![
            IssuerRecord::new("A", "A", ChangeValue::Number(5.0)),
            IssuerRecord::new("C", "C", ChangeValue::Number(-3.0)),
        ]));
        let notifier = RecordingNotifier::new(Reply::Unconfigured);

        let outcome = run_once(&source, &engine(), &notifier, Utc::now).await;

        assert_eq!(outcome, RunOutcome::NotifierUnconfigured { alerts: 2 });
    }

    #[tokio::test]
    async fn test_delivery_failure_is_not_fatal() {
        let source = StaticSource(Some(vec![IssuerRecord::new(
            "C",
            "C",
            ChangeValue::Number(-3.0),
        )]));
        let notifier = RecordingNotifier::new(Reply::Reject);

        let outcome = run_once(&source, &engine(), &notifier, fixed_clock).await;

        assert_eq!(outcome, RunOutcome::DeliveryFailed { alerts: 1 });
        assert_eq!(notifier.sent().len(), 1);
        assert!(notifier.sent()[0].ends_with("📉 C : -3.00%"));
    }
}
