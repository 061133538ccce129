use crate::knlib::ClusterState;
use thiserror::Error;

/// Failures of range estimation, classification and clustering
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KnError {
    #[error("cannot estimate feature ranges from an empty population")]
    EmptyPopulation,

    #[error("feature {feature} is constant across all records (range is zero)")]
    ZeroRange { feature: usize },

    #[error("neighbour pool is empty, nothing to vote")]
    EmptyPool,

    #[error("k must be between 1 and the pool size ({pool}), got {k}")]
    InvalidK { k: usize, pool: usize },

    #[error("number of clusters must be between 1 and the pool size ({pool}), got {clusters}")]
    InvalidClusterCount { clusters: usize, pool: usize },

    #[error("cluster {cluster} lost all of its members")]
    EmptyCluster { cluster: usize },

    #[error("k-means centroids have not been initialized")]
    NotInitialized,

    #[error("clusters can only be labeled after convergence (state is {state:?})")]
    LabelBeforeConvergence { state: ClusterState },

    #[error("k-means did not converge within {iterations} iterations")]
    NotConverged { iterations: usize },

    #[error("neither classification nor clustering was requested")]
    NothingToDo,
}
