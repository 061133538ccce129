use crate::knlib::{KnError, Record, FEATURE_NAMES, NUM_FEATURES};
use itertools::{Itertools, MinMaxResult};

/// Per-feature span (max - min) used to normalize distances.
/// Estimated once over training and query records together and never updated afterwards,
/// so later centroid movement doesn't change the scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRanges {
    spans: [f64; NUM_FEATURES],
}

impl FeatureRanges {
    /// Every span of the result is strictly positive; a constant feature is an error
    pub fn estimate<'a, I>(population: I) -> Result<Self, KnError>
    where
        I: IntoIterator<Item = &'a Record>,
        I::IntoIter: Clone,
    {
        let population = population.into_iter();
        let mut spans = [0.0; NUM_FEATURES];

        for (feat, span) in spans.iter_mut().enumerate() {
            *span = match population.clone().map(|r| r.features[feat]).minmax() {
                MinMaxResult::NoElements => return Err(KnError::EmptyPopulation),
                MinMaxResult::OneElement(_) => 0.0,
                MinMaxResult::MinMax(min, max) => max - min,
            };
            if *span == 0.0 {
                debug!("{} has no spread across the records", FEATURE_NAMES[feat]);
                return Err(KnError::ZeroRange { feature: feat });
            }
        }

        debug!("feature ranges {:?}", spans);
        Ok(Self { spans })
    }

    pub fn spans(&self) -> &[f64; NUM_FEATURES] {
        &self.spans
    }
}
