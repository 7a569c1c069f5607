use anyhow::Context;
use clap::Parser;
use std::path::Path;
use votifier::adapters::{key_io, listeners::LogVoteListener};
use votifier::utils::{logger, validation::Validate};
use votifier::{CliConfig, TomlConfig, Votifier, PROTOCOL_VERSION};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_logger(cli.verbose);

    tracing::info!("Starting votifier {}", PROTOCOL_VERSION);

    let mut config = TomlConfig::load_or_init(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config))?;
    cli.apply_overrides(&mut config);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }

    if config.logging.debug {
        tracing::info!("DEBUG mode enabled!");
    }

    let key_pair = key_io::load_or_generate(
        Path::new(&config.keys.directory),
        config.protocol.key_bits,
    )
    .context("failed to obtain RSA key pair")?;

    let mut votifier = Votifier::new(&config, key_pair);
    votifier.register(Box::new(LogVoteListener));

    let handle = match votifier.start().await {
        Ok(handle) => handle,
        Err(e) => {
            tracing::error!("Votifier did not initialize properly: {}", e);
            std::process::exit(1);
        }
    };

    tokio::signal::ctrl_c()
        .await
        .context("failed to wait for shutdown signal")?;
    tracing::info!("Shutdown signal received");

    handle.stop().await;

    Ok(())
}
