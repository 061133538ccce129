use crate::knlib::{metrics, ClusterId, FeatureRanges, KnError, Record, NUM_FEATURES};
use ordered_float::OrderedFloat;
use rand::seq::index;
use rand::Rng;

/// Smallest coordinate movement that counts as a centroid update
pub const TOLERANCE: f64 = 1e-8;

pub type Point = [f64; NUM_FEATURES];

/// A cluster centre and the pool indices currently assigned to it
#[derive(Debug, Clone)]
pub struct Centroid {
    pub features: Point,
    pub members: Vec<usize>,
}

impl Centroid {
    fn new(features: Point) -> Self {
        Self {
            features,
            members: Vec::new(),
        }
    }

    /// Move each coordinate to the mean of the members when it shifted by at least TOLERANCE.
    /// Returns whether any coordinate moved
    fn update_centroid(&mut self, pool: &[Record], cluster: usize) -> Result<bool, KnError> {
        if self.members.is_empty() {
            return Err(KnError::EmptyCluster { cluster });
        }

        let mut new_centroid = [0.0; NUM_FEATURES];
        for &idx in &self.members {
            for (i, &coord) in pool[idx].features.iter().enumerate() {
                new_centroid[i] += coord;
            }
        }
        for coord in &mut new_centroid {
            *coord /= self.members.len() as f64;
        }

        let mut changed = false;
        for (old, new) in self.features.iter_mut().zip(new_centroid) {
            if (*old - new).abs() >= TOLERANCE {
                *old = new;
                changed = true;
            }
        }
        Ok(changed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterState {
    Uninitialized,
    Converging,
    Converged,
}

/// What a finished clustering looks like
#[derive(Debug, Clone)]
pub struct ClusterSummary {
    pub iterations: usize,
    pub sizes: Vec<usize>,
    pub centroids: Vec<Point>,
}

#[derive(Debug)]
pub struct KMeans {
    num_clusters: usize,
    max_iterations: usize,
    pub state: ClusterState,
    pub centroids: Vec<Centroid>,
    pub iterations: usize,
}

impl KMeans {
    pub fn new(num_clusters: usize, max_iterations: usize) -> Self {
        Self {
            num_clusters,
            max_iterations,
            state: ClusterState::Uninitialized,
            centroids: Vec::new(),
            iterations: 0,
        }
    }

    /// Seed the centroids with copies of distinct, randomly chosen records
    pub fn initialize<R: Rng + ?Sized>(
        &mut self,
        pool: &[Record],
        rng: &mut R,
    ) -> Result<(), KnError> {
        if self.num_clusters == 0 || self.num_clusters > pool.len() {
            return Err(KnError::InvalidClusterCount {
                clusters: self.num_clusters,
                pool: pool.len(),
            });
        }

        self.centroids = index::sample(rng, pool.len(), self.num_clusters)
            .into_iter()
            .map(|idx| Centroid::new(pool[idx].features))
            .collect();
        self.iterations = 0;
        self.state = ClusterState::Converging;
        debug!("initial centroids {:?}", self.centroid_points());
        Ok(())
    }

    /// One assignment + update pass. Returns whether any centroid moved
    pub fn step(&mut self, pool: &[Record], ranges: &FeatureRanges) -> Result<bool, KnError> {
        if self.state == ClusterState::Uninitialized {
            return Err(KnError::NotInitialized);
        }

        for centroid in self.centroids.iter_mut() {
            centroid.members.clear();
        }

        // Assign each point to the nearest cluster, earliest centroid on ties
        for (idx, record) in pool.iter().enumerate() {
            let nearest = self
                .centroids
                .iter()
                .enumerate()
                .min_by_key(|(_, c)| {
                    OrderedFloat(metrics::distance(&record.features, &c.features, ranges))
                })
                .map(|(i, _)| i)
                .ok_or(KnError::NotInitialized)?;
            self.centroids[nearest].members.push(idx);
        }

        let mut changed = false;
        for (i, centroid) in self.centroids.iter_mut().enumerate() {
            changed |= centroid.update_centroid(pool, i + 1)?;
        }
        Ok(changed)
    }

    /// Iterate until no centroid moves or the iteration cap is hit
    ///
    /// # Returns
    /// Number of passes made, counting the final unchanged one
    pub fn converge(&mut self, pool: &[Record], ranges: &FeatureRanges) -> Result<usize, KnError> {
        while self.iterations < self.max_iterations {
            self.iterations += 1;
            let changed = self.step(pool, ranges)?;
            info!("iteration {}: cluster sizes {:?}", self.iterations, self.sizes());
            debug!("centroids {:?}", self.centroid_points());
            if !changed {
                self.state = ClusterState::Converged;
                return Ok(self.iterations);
            }
        }
        warn!(
            "stopping k-means after {} iterations without convergence",
            self.iterations
        );
        Err(KnError::NotConverged {
            iterations: self.iterations,
        })
    }

    /// Write each centroid's ordinal into its members. Only a converged partition is labeled
    pub fn label(&self, pool: &mut [Record]) -> Result<(), KnError> {
        if self.state != ClusterState::Converged {
            return Err(KnError::LabelBeforeConvergence { state: self.state });
        }
        for (i, centroid) in self.centroids.iter().enumerate() {
            for &idx in &centroid.members {
                pool[idx].assigned_cluster = Some(ClusterId(i + 1));
            }
        }
        Ok(())
    }

    pub fn sizes(&self) -> Vec<usize> {
        self.centroids.iter().map(|c| c.members.len()).collect()
    }

    pub fn centroid_points(&self) -> Vec<Point> {
        self.centroids.iter().map(|c| c.features).collect()
    }
}

/// Partition the pool into `num_clusters` groups and label every record with its cluster.
/// Records are left untouched on failure.
pub fn cluster<R: Rng + ?Sized>(
    pool: &mut [Record],
    num_clusters: usize,
    max_iterations: usize,
    ranges: &FeatureRanges,
    rng: &mut R,
) -> Result<ClusterSummary, KnError> {
    let mut km = KMeans::new(num_clusters, max_iterations);
    km.initialize(pool, rng)?;
    let iterations = km.converge(pool, ranges)?;
    km.label(pool)?;

    info!(
        "k-means converged after {} iterations into {} clusters",
        iterations, num_clusters
    );
    Ok(ClusterSummary {
        iterations,
        sizes: km.sizes(),
        centroids: km.centroid_points(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rec(features: Point, label: &str) -> Record {
        Record::new(features, Some(label.to_string()))
    }

    fn two_groups() -> Vec<Record> {
        vec![
            rec([1.0, 1.0, 1.0, 1.0], "low"),
            rec([1.2, 0.9, 1.1, 1.0], "low"),
            rec([0.9, 1.1, 1.0, 1.2], "low"),
            rec([1.1, 1.0, 0.8, 0.9], "low"),
            rec([9.0, 9.0, 9.0, 9.0], "high"),
            rec([9.2, 8.9, 9.1, 9.0], "high"),
            rec([8.9, 9.1, 9.0, 9.2], "high"),
        ]
    }

    #[test]
    fn recovers_separated_groups() {
        for seed in 0..10 {
            let mut pool = two_groups();
            let ranges = FeatureRanges::estimate(&pool).unwrap();
            let mut rng = StdRng::seed_from_u64(seed);
            let summary = cluster(&mut pool, 2, 100, &ranges, &mut rng).unwrap();

            assert_eq!(summary.sizes.iter().sum::<usize>(), pool.len());
            let low = pool[0].assigned_cluster;
            let high = pool[4].assigned_cluster;
            assert!(low.is_some() && high.is_some());
            assert_ne!(low, high);
            for r in &pool {
                let expect = if r.given_label.as_deref() == Some("low") {
                    low
                } else {
                    high
                };
                assert_eq!(r.assigned_cluster, expect);
            }
        }
    }

    #[test]
    fn fixed_point_is_stable() {
        let pool = two_groups();
        let ranges = FeatureRanges::estimate(&pool).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let mut km = KMeans::new(2, 100);
        km.initialize(&pool, &mut rng).unwrap();
        km.converge(&pool, &ranges).unwrap();
        assert_eq!(km.state, ClusterState::Converged);

        let before = km.centroid_points();
        assert!(!km.step(&pool, &ranges).unwrap());
        for (a, b) in before.iter().zip(km.centroid_points()) {
            for f in 0..NUM_FEATURES {
                assert!((a[f] - b[f]).abs() < TOLERANCE);
            }
        }
    }

    #[test]
    fn every_record_in_one_cluster() {
        let mut pool = two_groups();
        let ranges = FeatureRanges::estimate(&pool).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let mut km = KMeans::new(2, 100);
        km.initialize(&pool, &mut rng).unwrap();
        km.converge(&pool, &ranges).unwrap();
        km.label(&mut pool).unwrap();

        let mut seen: Vec<usize> = km
            .centroids
            .iter()
            .flat_map(|c| c.members.iter().copied())
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..pool.len()).collect::<Vec<_>>());
        assert!(pool.iter().all(|r| r.assigned_cluster.is_some()));
    }

    #[test]
    fn initial_centroids_are_distinct_copies() {
        let pool = two_groups();
        let mut rng = StdRng::seed_from_u64(2);
        let mut km = KMeans::new(pool.len(), 10);
        km.initialize(&pool, &mut rng).unwrap();
        assert_eq!(km.state, ClusterState::Converging);

        let points = km.centroid_points();
        for (i, a) in points.iter().enumerate() {
            assert!(pool.iter().any(|r| &r.features == a));
            for b in points.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn centroid_moves_do_not_touch_pool() {
        let original = two_groups();
        let mut pool = original.clone();
        let ranges = FeatureRanges::estimate(&pool).unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        cluster(&mut pool, 2, 100, &ranges, &mut rng).unwrap();
        for (a, b) in pool.iter().zip(&original) {
            assert_eq!(a.features, b.features);
        }
    }

    #[test]
    fn bad_cluster_count() {
        let mut pool = two_groups();
        let ranges = FeatureRanges::estimate(&pool).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            cluster(&mut pool, 0, 10, &ranges, &mut rng).unwrap_err(),
            KnError::InvalidClusterCount {
                clusters: 0,
                pool: 7
            }
        );
        assert_eq!(
            cluster(&mut pool, 8, 10, &ranges, &mut rng).unwrap_err(),
            KnError::InvalidClusterCount {
                clusters: 8,
                pool: 7
            }
        );
    }

    #[test]
    fn duplicate_seeds_empty_a_cluster() {
        let pool = vec![
            rec([1.0, 1.0, 1.0, 1.0], "a"),
            rec([1.0, 1.0, 1.0, 1.0], "a"),
            rec([5.0, 5.0, 5.0, 5.0], "b"),
        ];
        let ranges = FeatureRanges::estimate(&pool).unwrap();
        let mut km = KMeans::new(2, 10);
        km.centroids = vec![
            Centroid::new([1.0, 1.0, 1.0, 1.0]),
            Centroid::new([1.0, 1.0, 1.0, 1.0]),
        ];
        km.state = ClusterState::Converging;
        assert_eq!(
            km.step(&pool, &ranges),
            Err(KnError::EmptyCluster { cluster: 2 })
        );
    }

    #[test]
    fn iteration_cap() {
        let mut pool = two_groups();
        let ranges = FeatureRanges::estimate(&pool).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        // a single pass always moves a seed centroid toward its group mean
        let err = cluster(&mut pool, 2, 1, &ranges, &mut rng).unwrap_err();
        assert_eq!(err, KnError::NotConverged { iterations: 1 });
        assert!(pool.iter().all(|r| r.assigned_cluster.is_none()));
    }

    #[test]
    fn step_before_initialize() {
        let pool = two_groups();
        let ranges = FeatureRanges::estimate(&pool).unwrap();
        let mut km = KMeans::new(2, 10);
        assert_eq!(km.step(&pool, &ranges), Err(KnError::NotInitialized));
        assert_eq!(
            km.step(&pool, &ranges).unwrap_err().to_string(),
            "k-means centroids have not been initialized"
        );
    }

    #[test]
    fn label_requires_convergence() {
        let mut pool = two_groups();
        let ranges = FeatureRanges::estimate(&pool).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let mut km = KMeans::new(2, 10);
        assert_eq!(
            km.label(&mut pool),
            Err(KnError::LabelBeforeConvergence {
                state: ClusterState::Uninitialized
            })
        );

        km.initialize(&pool, &mut rng).unwrap();
        km.step(&pool, &ranges).unwrap();
        assert_eq!(
            km.label(&mut pool),
            Err(KnError::LabelBeforeConvergence {
                state: ClusterState::Converging
            })
        );
        assert!(pool.iter().all(|r| r.assigned_cluster.is_none()));

        km.converge(&pool, &ranges).unwrap();
        km.label(&mut pool).unwrap();
        assert!(pool.iter().all(|r| r.assigned_cluster.is_some()));
    }
}
