use thiserror::Error;

#[derive(Error, Debug)]
pub enum VotifierError {
    #[error("Crypto error: {message}")]
    CryptoError { message: String },

    #[error("Protocol error: {message}")]
    ProtocolError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Listener '{listener}' failed: {message}")]
    ListenerError { listener: String, message: String },

    #[error("Startup error: {message}")]
    StartupError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Key error: {message}")]
    KeyError { message: String },
}

impl VotifierError {
    pub fn crypto(message: impl Into<String>) -> Self {
        VotifierError::CryptoError {
            message: message.into(),
        }
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        VotifierError::ProtocolError {
            message: message.into(),
        }
    }

    pub fn startup(message: impl Into<String>) -> Self {
        VotifierError::StartupError {
            message: message.into(),
        }
    }

    pub fn key(message: impl Into<String>) -> Self {
        VotifierError::KeyError {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, VotifierError>;
