use super::engine::{AlertRecord, Direction};
use chrono::{DateTime, TimeZone};
use std::fmt::Display;

pub const DIGEST_TITLE: &str = "📈 Alertes Bourse de Casablanca";
pub const UP_MARKER: &str = "🚀";
pub const DOWN_MARKER: &str = "📉";

impl Direction {
    pub fn marker(self) -> &'static str {
        match self {
            Direction::Up => UP_MARKER,
            Direction::Down => DOWN_MARKER,
        }
    }
}

pub fn format_alert_line(alert: &AlertRecord) -> String {
    format!(
        "{} {} : {:.2}%",
        alert.direction().marker(),
        alert.symbol,
        alert.change
    )
}

/// Renders the message body, or `None` when there is nothing to report.
pub fn format_digest<Tz>(alerts: &[AlertRecord], captured_at: &DateTime<Tz>) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if alerts.is_empty() {
        return None;
    }

    let mut lines = Vec::with_capacity(alerts.len() + 1);
    lines.push(format!(
        "{}\n🕒 {}\n",
        DIGEST_TITLE,
        captured_at.format("%Y-%m-%d %H:%M")
    ));
    lines.extend(alerts.iter().map(format_alert_line));

    Some(lines.join("\n"))
}
