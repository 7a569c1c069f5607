pub mod codec;
pub mod keystore;
pub mod receiver;
pub mod registry;
pub mod votifier;

pub use crate::domain::model::Vote;
pub use crate::domain::ports::{ConfigProvider, VoteListener};
pub use crate::utils::error::Result;
