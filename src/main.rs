use std::process::ExitCode;

use message_history::cli;
use message_history::error::HistoryError;
use message_history::utils::environment::LOG_ENV;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Silent unless MESSAGE_HISTORY_LOG sets a filter
fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("off")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    match cli::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{:#}", err);
            // Configuration errors are shown in full, everything else generically
            match err.chain().find_map(|e| e.downcast_ref::<HistoryError>()) {
                Some(history_err) => eprintln!("Error: {}", history_err.user_message()),
                None => eprintln!("Error: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}
