use crate::domain::model::Vote;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// A vote handler supplied by the host. Implementations are registered before
/// startup and receive every successfully decoded vote exactly once, in
/// registration order. Errors are contained at the dispatch boundary.
#[async_trait]
pub trait VoteListener: Send + Sync {
    fn name(&self) -> &str;

    async fn on_vote(&self, vote: &Vote) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn host(&self) -> &str;

    fn port(&self) -> u16;

    fn read_timeout(&self) -> Duration;

    fn key_directory(&self) -> &str;

    fn key_bits(&self) -> usize;

    fn debug(&self) -> bool;
}
