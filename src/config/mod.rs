pub mod toml_config;

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "votifier")]
#[command(about = "Encrypted vote notification receiver")]
pub struct CliConfig {
    /// Path to the TOML configuration file; created with defaults on first run
    #[arg(long, default_value = "./config.toml")]
    pub config: String,

    /// Override the bind host from the config file
    #[arg(long)]
    pub host: Option<String>,

    /// Override the bind port from the config file
    #[arg(long)]
    pub port: Option<u16>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Applies CLI overrides on top of a loaded file config.
    pub fn apply_overrides(&self, config: &mut toml_config::TomlConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}
