use super::issuer::{IssuerRecord, Normalized};
use crate::config::Thresholds;
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlertRecord {
    pub name: String,
    pub symbol: String,
    pub change: f64,
}

impl AlertRecord {
    /// Only a strictly positive change is `Up`; zero reports as `Down`.
    pub fn direction(&self) -> Direction {
        if self.change > 0.0 {
            Direction::Up
        } else {
            Direction::Down
        }
    }
}

pub struct AlertEngine {
    thresholds: Thresholds,
}

impl AlertEngine {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// Both bounds are inclusive and tested independently.
    pub fn crosses(&self, change: f64) -> bool {
        change >= self.thresholds.up || change <= self.thresholds.down
    }

    /// Keeps input order. Records whose change cannot be read are dropped without error.
    pub fn build_alerts(&self, issuers: &[IssuerRecord]) -> Vec<AlertRecord> {
        issuers
            .iter()
            .filter_map(|issuer| match issuer.normalized_change() {
                Normalized::Value(change) => Some((issuer, change)),
                Normalized::Skipped => {
                    debug!(
                        "Skipping {}: unreadable change {:?}",
                        issuer.symbol, issuer.change
                    );
                    None
                }
            })
            .filter(|(_, change)| self.crosses(*change))
            .map(|(issuer, change)| AlertRecord {
                name: issuer.name.clone(),
                symbol: issuer.symbol.clone(),
                change,
            })
            .collect()
    }
}
