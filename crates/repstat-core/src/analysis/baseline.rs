//! Legitimate-repetition adjustment.
//!
//! Some repetition in a system output only mirrors repetition already present
//! in the human reference or the source ("very very good"). Subtracting that
//! baseline leaves the repetition attributable to the system. The adjusted
//! value is signed: a negative count means the system repeats less than the
//! baseline, and it is reported as such rather than floored at zero.

use std::hash::Hash;

use super::counter::{RepetitionMode, count_repetitions};
use super::ngram::NgramOrder;

/// Count repetitions in two aligned sentences under the same configuration.
pub fn repetition_pair<T: Eq + Hash>(
    first: &[T],
    second: &[T],
    mode: RepetitionMode,
    order: NgramOrder,
) -> (usize, usize) {
    (
        count_repetitions(first, mode, order),
        count_repetitions(second, mode, order),
    )
}

/// Repetitions already present in the reference or source, whichever is larger.
///
/// A missing source contributes 0.
pub fn baseline_repetitions<T: Eq + Hash>(
    reference: &[T],
    source: Option<&[T]>,
    mode: RepetitionMode,
    order: NgramOrder,
) -> usize {
    let ref_reps = count_repetitions(reference, mode, order);
    let src_reps = source.map_or(0, |src| count_repetitions(src, mode, order));
    ref_reps.max(src_reps)
}

/// `out_reps - max(ref_reps, src_reps)`, unclamped.
pub fn adjusted_repetitions<T: Eq + Hash>(
    output: &[T],
    reference: &[T],
    source: Option<&[T]>,
    mode: RepetitionMode,
    order: NgramOrder,
) -> i64 {
    let out_reps = count_repetitions(output, mode, order);
    let baseline = baseline_repetitions(reference, source, mode, order);
    to_signed(out_reps) - to_signed(baseline)
}

/// Widen a count into the signed domain used by adjusted statistics.
pub(crate) fn to_signed(count: usize) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}
