use crate::client::ClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchedulerError {
    /// The listing stage failed for a reason other than "nothing matched".
    /// This is the only error that aborts a publish pass; all per-bundle
    /// failures are absorbed into the pass result instead.
    #[error("failed to list scheduled bundles: {0}")]
    Listing(#[source] ClientError),
}

pub type Result<T> = std::result::Result<T, SchedulerError>;
