mod cli;
pub use crate::knlib::cli::{Cli, Commands, IOParams, KMParams, KmeansArgs, KnnArgs, KnnkmParams};

mod error;
pub use crate::knlib::error::KnError;

pub mod kmeans;
pub use crate::knlib::kmeans::{ClusterState, ClusterSummary, KMeans};

pub mod knn;

pub mod metrics;

mod pipeline;
pub use crate::knlib::pipeline::{run, ClusterConfig, RunConfig, Summary};

mod ranges;
pub use crate::knlib::ranges::FeatureRanges;

mod record;
pub use crate::knlib::record::{Class, ClusterId, Record, FEATURE_NAMES, NUM_FEATURES};

mod recparser;
pub use crate::knlib::recparser::{ParseError, RecordParser};

mod report;
pub use crate::knlib::report::Report;
