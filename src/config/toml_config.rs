use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, VotifierError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8192;
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_KEY_BITS: usize = 2048;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub protocol: ProtocolConfig,
    #[serde(default)]
    pub keys: KeysConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtocolConfig {
    pub read_timeout_secs: u64,
    pub key_bits: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeysConfig {
    pub directory: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub debug: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            read_timeout_secs: DEFAULT_READ_TIMEOUT_SECS,
            key_bits: DEFAULT_KEY_BITS,
        }
    }
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            directory: "./rsa".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { debug: false }
    }
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            protocol: ProtocolConfig::default(),
            keys: KeysConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(VotifierError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| VotifierError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Loads the file, or on first run writes a default one and returns it.
    /// Hosted servers frequently cannot use the conventional port, hence the
    /// notice when the default config is minted.
    pub fn load_or_init<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::from_file(path);
        }

        tracing::info!("Configuring votifier for the first time...");
        let config = Self::default();
        let content = toml::to_string_pretty(&config).map_err(|e| VotifierError::ConfigError {
            message: format!("unable to serialize default config: {}", e),
        })?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;

        tracing::info!(
            "Assigning votifier to listen on port {}. If you are on a shared host, \
             check with your provider that this port is available and adjust {} otherwise.",
            config.server.port,
            path.display()
        );

        Ok(config)
    }
}

impl ConfigProvider for TomlConfig {
    fn host(&self) -> &str {
        &self.server.host
    }

    fn port(&self) -> u16 {
        self.server.port
    }

    fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.protocol.read_timeout_secs)
    }

    fn key_directory(&self) -> &str {
        &self.keys.directory
    }

    fn key_bits(&self) -> usize {
        self.protocol.key_bits
    }

    fn debug(&self) -> bool {
        self.logging.debug
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("server.host", &self.server.host)?;
        validation::validate_path("keys.directory", &self.keys.directory)?;
        validation::validate_range(
            "protocol.read_timeout_secs",
            self.protocol.read_timeout_secs,
            1,
            300,
        )?;
        validation::validate_range("protocol.key_bits", self.protocol.key_bits, 1024, 8192)?;
        Ok(())
    }
}
