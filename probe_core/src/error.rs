//! Error type for sampling runs and report writing.

use crate::types::NodeId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    /// Median requested over an empty sample series.
    #[error("sample series is empty, medians are undefined")]
    EmptySeries,

    /// `start` was called while a run is already collecting.
    #[error("a sampling run is already active")]
    RunAlreadyActive,

    /// A host node handle is no longer reachable (destroyed mid-run).
    #[error("transform node {0} is no longer reachable")]
    InvalidReference(NodeId),

    /// Report write failure, propagated to the caller without retry.
    #[error("report I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
