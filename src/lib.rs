pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::toml_config::TomlConfig;
pub use config::CliConfig;
pub use core::keystore::{KeyPair, KeyStore};
pub use core::receiver::PROTOCOL_VERSION;
pub use core::votifier::{Votifier, VotifierHandle};
pub use domain::model::Vote;
pub use domain::ports::{ConfigProvider, VoteListener};
pub use utils::error::{Result, VotifierError};
