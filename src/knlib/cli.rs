use crate::knlib::{ClusterConfig, RunConfig};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser, Clone, Debug)]
#[command(name = "knnkm")]
#[command(about = "K-Nearest Neighbours classification and K-Means clustering of iris records")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

pub trait KnnkmParams: std::fmt::Debug {
    fn validate(&self) -> bool;
    fn debug(&self) -> bool;
    fn io(&self) -> &IOParams;
    fn run_config(&self) -> RunConfig;
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    #[command(about = "Classify test records by their nearest training records")]
    Knn(KnnArgs),

    #[command(about = "Cluster training records with k-means")]
    Kmeans(KmeansArgs),
}

#[derive(clap::Args, Clone, Debug)]
pub struct IOParams {
    /// Training (reference) records
    #[arg(short, long, default_value = "iris-training.txt", help_heading = "I/O")]
    pub train: PathBuf,

    /// Test (query) records
    #[arg(short = 'q', long, default_value = "iris-test.txt", help_heading = "I/O")]
    pub test: PathBuf,

    /// Output report
    #[arg(short, long, default_value = "output.txt", help_heading = "I/O")]
    pub output: PathBuf,

    /// Seed for tie-breaks and centroid sampling (default random)
    #[arg(long, help_heading = "I/O")]
    pub seed: Option<u64>,

    /// Verbose logging
    #[arg(long, default_value_t = false)]
    pub debug: bool,
}

#[derive(clap::Args, Clone, Debug)]
pub struct KMParams {
    /// Number of clusters
    #[arg(long, default_value_t = 3, help_heading = "Clustering")]
    pub num_clusters: usize,

    /// Maximum k-means iterations before giving up
    #[arg(long, default_value_t = 1000, help_heading = "Clustering")]
    pub max_iter: usize,
}

impl KMParams {
    fn cluster_config(&self) -> ClusterConfig {
        ClusterConfig {
            num_clusters: self.num_clusters,
            max_iterations: self.max_iter,
        }
    }

    fn validate(&self) -> bool {
        let mut is_ok = true;

        if self.num_clusters < 1 {
            error!("--num-clusters must be at least 1");
            is_ok = false;
        }

        if self.max_iter < 1 {
            error!("--max-iter must be at least 1");
            is_ok = false;
        }

        is_ok
    }
}

#[derive(Parser, Debug, Clone)]
pub struct KnnArgs {
    #[command(flatten)]
    pub io: IOParams,

    /// Number of neighbours that vote
    #[arg(short, default_value_t = 1, help_heading = "Classification")]
    pub k: usize,

    /// Cluster the training records before classifying
    #[arg(long, default_value_t = false, help_heading = "Classification")]
    pub cluster: bool,

    #[command(flatten)]
    pub km: KMParams,
}

impl KnnkmParams for KnnArgs {
    fn debug(&self) -> bool {
        self.io.debug
    }

    fn io(&self) -> &IOParams {
        &self.io
    }

    fn run_config(&self) -> RunConfig {
        RunConfig {
            k: Some(self.k),
            clustering: self.cluster.then(|| self.km.cluster_config()),
        }
    }

    /// Validate command line arguments
    fn validate(&self) -> bool {
        let mut is_ok = true;

        is_ok &= validate_file(&self.io.train, "--train");
        is_ok &= validate_file(&self.io.test, "--test");

        if self.k < 1 {
            error!("-k must be at least 1");
            is_ok = false;
        }

        if self.k > 10 {
            warn!("-k is usually between 1 and 10");
        }

        if self.cluster {
            is_ok &= self.km.validate();
        }

        is_ok
    }
}

#[derive(Parser, Debug, Clone)]
pub struct KmeansArgs {
    #[command(flatten)]
    pub io: IOParams,

    #[command(flatten)]
    pub km: KMParams,
}

impl KnnkmParams for KmeansArgs {
    fn debug(&self) -> bool {
        self.io.debug
    }

    fn io(&self) -> &IOParams {
        &self.io
    }

    fn run_config(&self) -> RunConfig {
        RunConfig {
            k: None,
            clustering: Some(self.km.cluster_config()),
        }
    }

    fn validate(&self) -> bool {
        let mut is_ok = true;

        is_ok &= validate_file(&self.io.train, "--train");
        is_ok &= validate_file(&self.io.test, "--test");
        is_ok &= self.km.validate();

        is_ok
    }
}

/// Helper function to validate a file's existence and type
fn validate_file(path: &Path, label: &str) -> bool {
    if !path.exists() {
        error!("{} does not exist", label);
        return false;
    }
    if !path.is_file() {
        error!("{} is not a file", label);
        return false;
    }
    true
}
