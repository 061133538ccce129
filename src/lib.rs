#[macro_use]
extern crate log;

mod knlib;
pub use self::{
    knlib::kmeans, knlib::knn, knlib::metrics, knlib::run, knlib::Class, knlib::Cli,
    knlib::ClusterConfig, knlib::ClusterId, knlib::ClusterState, knlib::ClusterSummary,
    knlib::Commands, knlib::FeatureRanges, knlib::IOParams, knlib::KMParams, knlib::KMeans,
    knlib::KmeansArgs, knlib::KnError, knlib::KnnArgs, knlib::KnnkmParams, knlib::ParseError,
    knlib::Record, knlib::RecordParser, knlib::Report, knlib::RunConfig, knlib::Summary,
    knlib::FEATURE_NAMES, knlib::NUM_FEATURES,
};
