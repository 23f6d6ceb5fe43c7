//! Worst-offender ranking.

use std::cmp::Reverse;
use std::hash::Hash;

use super::RepetitionSettings;
use super::aggregate::repetition_stats;

/// Line indices ordered by descending count, at most `limit` of them.
///
/// Equal counts keep ascending line order, so the result is fully
/// determined by the input.
pub fn rank_worst(per_line: &[i64], limit: usize) -> Vec<usize> {
    if limit == 0 {
        return Vec::new();
    }

    let mut indices: Vec<usize> = (0..per_line.len()).collect();
    indices.sort_by_key(|&i| (Reverse(per_line[i]), i));
    indices.truncate(limit);
    indices
}

/// Aggregate every system, then rank its lines.
///
/// Returns one index list per system, in input order.
#[tracing::instrument(skip_all, fields(systems = outputs.len(), num_examples = num_examples))]
pub fn repetition_examples<T, O>(
    reference: &[Vec<T>],
    outputs: &[O],
    source: Option<&[Vec<T>]>,
    settings: &RepetitionSettings,
    num_examples: usize,
) -> Vec<Vec<usize>>
where
    T: Eq + Hash + Sync,
    O: AsRef<[Vec<T>]> + Sync,
{
    repetition_stats(reference, outputs, source, settings)
        .iter()
        .map(|stats| rank_worst(&stats.per_line, num_examples))
        .collect()
}
