use crate::knlib::{metrics, Class, FeatureRanges, KnError, Record};
use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use rand::seq::SliceRandom;
use rand::Rng;

pub(crate) fn check_params(pool: &[Record], k: usize) -> Result<(), KnError> {
    if pool.is_empty() {
        return Err(KnError::EmptyPool);
    }
    if k == 0 || k > pool.len() {
        return Err(KnError::InvalidK { k, pool: pool.len() });
    }
    Ok(())
}

/// Label a query by majority vote of its k nearest neighbours in the pool.
/// Neighbours at equal distance keep their pool order. When several labels share the
/// highest count one of them is picked at random from `rng`.
pub fn classify<R: Rng + ?Sized>(
    query: &Record,
    pool: &[Record],
    k: usize,
    ranges: &FeatureRanges,
    rng: &mut R,
) -> Result<Class, KnError> {
    check_params(pool, k)?;

    let mut neighbours: Vec<(f64, &Record)> = pool
        .iter()
        .map(|p| (metrics::distance(&query.features, &p.features, ranges), p))
        .collect();
    // sort_by_key is stable
    neighbours.sort_by_key(|(d, _)| OrderedFloat(*d));

    let mut votes: IndexMap<Class, usize> = IndexMap::new();
    for (_, neigh) in neighbours.iter().take(k) {
        *votes
            .entry(Class::from_label(neigh.given_label.as_deref()))
            .or_default() += 1;
    }
    debug!("{} votes {:?}", query, votes);

    let max_count = votes.values().copied().max().unwrap_or(0);
    let majority: Vec<&Class> = votes
        .iter()
        .filter(|(_, count)| **count == max_count)
        .map(|(class, _)| class)
        .collect();

    let winner = if majority.len() > 1 {
        trace!("tie between {:?}", majority);
        majority.choose(rng)
    } else {
        majority.first()
    };

    // votes can't be empty since 1 <= k <= pool.len()
    winner.map(|c| (*c).clone()).ok_or(KnError::EmptyPool)
}

/// Classify every query in place against the pool.
/// Parameters are checked before any query is touched.
///
/// # Returns
/// Number of mismatched classifications
pub fn classify_all<R: Rng + ?Sized>(
    queries: &mut [Record],
    pool: &[Record],
    k: usize,
    ranges: &FeatureRanges,
    rng: &mut R,
) -> Result<usize, KnError> {
    check_params(pool, k)?;

    let mut results = Vec::with_capacity(queries.len());
    for query in queries.iter() {
        results.push(classify(query, pool, k, ranges, rng)?);
    }
    for (query, class) in queries.iter_mut().zip(results) {
        query.assigned_class = Some(class);
    }

    let mismatches = queries.iter().filter(|q| q.is_mismatched()).count();
    info!(
        "classified {} records with k={} ({} mismatched)",
        queries.len(),
        k,
        mismatches
    );
    Ok(mismatches)
}
