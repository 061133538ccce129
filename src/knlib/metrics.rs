use crate::knlib::{FeatureRanges, NUM_FEATURES};

/// Computes the range-normalized Euclidean distance between two points.
/// Each axis is divided by its span before squaring so features with large natural
/// magnitudes don't dominate.
///
/// # Parameters
/// - `a`: Features of the first point.
/// - `b`: Features of the second point.
/// - `ranges`: Spans of each feature over the whole population.
///
/// # Returns
/// A non-negative distance. 0.0 indicates identical points.
pub fn distance(a: &[f64; NUM_FEATURES], b: &[f64; NUM_FEATURES], ranges: &FeatureRanges) -> f64 {
    a.iter()
        .zip(b)
        .zip(ranges.spans())
        .map(|((&x, &y), &span)| ((x - y) / span).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// Percentage of correctly classified records, rounded to two decimals.
///
/// # Returns
/// `None` when there is nothing to score.
pub fn accuracy(total: usize, mismatched: usize) -> Option<f64> {
    if total == 0 {
        return None;
    }
    let correct = total.saturating_sub(mismatched) as f64;
    Some((correct / total as f64 * 100.0 * 100.0).round() / 100.0)
}
