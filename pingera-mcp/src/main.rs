use std::sync::Arc;

use pingera_mcp::{serve_stdio, ConfigError, Gateway, Settings};
use tracing_subscriber::EnvFilter;

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // stdout carries the MCP protocol
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(err) => {
            init_logging(false);
            tracing::error!("{}", err);
            if matches!(err, ConfigError::MissingApiKey) {
                tracing::error!("Set PINGERA_API_KEY in the environment or a .env file");
            }
            std::process::exit(1);
        }
    };

    init_logging(settings.debug);
    tracing::info!("Starting Pingera MCP Server in {} mode", settings.mode);
    tracing::debug!(?settings, "resolved settings");

    let gateway = Gateway::new(Arc::new(settings))?;
    serve_stdio(gateway).await?;
    Ok(())
}
