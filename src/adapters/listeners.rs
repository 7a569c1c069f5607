use crate::domain::model::Vote;
use crate::domain::ports::VoteListener;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Default listener wired up by the binary: writes each vote to the log.
/// Real deployments register their own reward-granting listeners through the
/// library API instead.
pub struct LogVoteListener;

#[async_trait]
impl VoteListener for LogVoteListener {
    fn name(&self) -> &str {
        "log"
    }

    async fn on_vote(&self, vote: &Vote) -> Result<()> {
        tracing::info!(
            "Vote from {}: user={} address={} timestamp={}",
            vote.service_name,
            vote.username,
            vote.address,
            vote.timestamp
        );
        Ok(())
    }
}
