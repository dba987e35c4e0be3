mod alerts;
mod api;
mod config;
mod error;
mod notify;
mod runner;
#[cfg(test)]
mod test_support;

use alerts::AlertEngine;
use api::casablanca::CasablancaClient;
use config::Config;
use env_logger::Builder;
use error::BvcAlertError;
use log::{error, info, LevelFilter};
use notify::WhatsAppNotifier;
use runner::{run_once, RunOutcome};
use std::io::Write;

#[tokio::main]
async fn main() {
    Builder::new()
        .filter_level(LevelFilter::Info)
        .filter_module("bvc_alerts", LevelFilter::Debug)
        .parse_default_env()
        .format(|buf, record| {
            let ts = chrono::Local::now().format("%H:%M:%S%.3f");
            writeln!(
                buf,
                "[{} {:<5} {}] {}",
                ts,
                record.level(),
                record.target(),
                record.args()
            )
        })
        .target(env_logger::Target::Stderr)
        .init();

    info!("🔄 Starting BVC alert run...");

    match run().await {
        Ok(outcome) => info!("Run finished: {}", outcome),
        Err(e) => error!("❌ {}", e),
    }
}

async fn run() -> Result<RunOutcome, BvcAlertError> {
    let config = Config::from_env()?;
    config.log();

    let client = reqwest::Client::builder()
        .timeout(config.http_timeout)
        .build()?;

    let source = CasablancaClient::new(config.casa_api_base.as_str(), client.clone());
    let notifier = WhatsAppNotifier::new(
        config.whatsapp_api_base.as_str(),
        config.whatsapp.clone(),
        client,
    );
    let engine = AlertEngine::new(config.thresholds);

    Ok(run_once(&source, &engine, &notifier, chrono::Local::now).await)
}
