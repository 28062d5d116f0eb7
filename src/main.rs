use std::process::ExitCode;

use moodboard::bootstrap::{run, LogSettings};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    if let Err(e) = run().await {
        tracing::error!("Moodboard error: {e}");
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

/// Logs go to stderr so stdout stays valid JSON.
fn init_tracing() {
    let settings = LogSettings::from_env();
    let filter = EnvFilter::try_new(&settings.filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if settings.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
