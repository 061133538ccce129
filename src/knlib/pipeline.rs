use crate::knlib::{kmeans, knn, FeatureRanges, KnError, Record};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterConfig {
    pub num_clusters: usize,
    pub max_iterations: usize,
}

/// Which algorithms to run. Clustering, when requested, happens before classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    pub k: Option<usize>,
    pub clustering: Option<ClusterConfig>,
}

/// Key figures of a finished run
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub k: Option<usize>,
    pub training_size: usize,
    pub test_size: usize,
    pub mismatches: usize,
    pub iterations: Option<usize>,
    pub cluster_sizes: Vec<usize>,
}

/// Estimate ranges over both sets, then cluster the training set and/or classify
/// the test set in place.
pub fn run<R: Rng + ?Sized>(
    training: &mut [Record],
    test: &mut [Record],
    config: &RunConfig,
    rng: &mut R,
) -> Result<Summary, KnError> {
    if config.k.is_none() && config.clustering.is_none() {
        return Err(KnError::NothingToDo);
    }

    let ranges = FeatureRanges::estimate(training.iter().chain(test.iter()))?;

    // Fail on bad k before clustering touches the training set
    if let Some(k) = config.k {
        knn::check_params(training, k)?;
    }

    let mut iterations = None;
    let mut cluster_sizes = vec![];
    if let Some(cc) = config.clustering {
        let res = kmeans::cluster(training, cc.num_clusters, cc.max_iterations, &ranges, rng)?;
        iterations = Some(res.iterations);
        cluster_sizes = res.sizes;
    }

    let mut mismatches = 0;
    if let Some(k) = config.k {
        mismatches = knn::classify_all(test, training, k, &ranges, rng)?;
    }

    Ok(Summary {
        k: config.k,
        training_size: training.len(),
        test_size: test.len(),
        mismatches,
        iterations,
        cluster_sizes,
    })
}
