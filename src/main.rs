use std::process::ExitCode;

use schools_export::{config::app_config::AppConfig, prettyprint::PrettyFormatter, run_export};
use tracing::instrument;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Registry};

const LOG_FILE: &str = "schools_export.log";
const LOG_LEVEL_VAR: &str = "SCHOOLS_EXPORT_LOG";

#[tokio::main]
#[instrument]
async fn main() -> ExitCode {
    if let Err(e) = setup_tracing() {
        eprintln!("Failed to set up logging: {e}");
        return ExitCode::FAILURE;
    }
    setup_panic_hook();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(report) => {
            tracing::error!("[CONFIG ERROR] {:?}", report);
            return ExitCode::FAILURE;
        }
    };

    match run_export(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(report) => {
            tracing::error!("❌ export failed: {:?}", report);
            ExitCode::FAILURE
        }
    }
}

fn setup_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let level = std::env::var(LOG_LEVEL_VAR)
        .ok()
        .and_then(|level| level.parse::<tracing::Level>().ok())
        .unwrap_or(tracing::Level::INFO);

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(PrettyFormatter::new(true))
        .with_writer(std::io::stderr);

    let log_file_layer = tracing_subscriber::fmt::layer()
        .event_format(PrettyFormatter::new(false))
        .with_writer(std::fs::File::create(LOG_FILE)?)
        .with_ansi(false);

    Registry::default()
        .with(tracing_subscriber::filter::Targets::new().with_target("schools_export", level))
        .with(log_file_layer)
        .with(stderr_layer)
        .init();

    Ok(())
}

fn setup_panic_hook() {
    tracing::trace!("Setting panic hook");
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("panic: {info}");
    }));
}
