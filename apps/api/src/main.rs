use anyhow::Context;
use todo_api::config::{AppConfig, AppConfigTrait};
use todo_api::{logging, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;

    logging::init_logging(&config.logging)
        .map_err(|err| anyhow::anyhow!("failed to initialize logging: {err}"))?;

    server::run(config).await
}
