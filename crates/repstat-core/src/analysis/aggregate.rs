//! Corpus-level aggregation.
//!
//! Corpora are aligned purely by line index. When they differ in length the
//! walk runs to the longest one, and any line a corpus does not have is read
//! as an empty sentence, so it contributes 0 to every count it takes part in.

use std::hash::Hash;

use serde::{Deserialize, Serialize};

use super::RepetitionSettings;
use super::baseline::{adjusted_repetitions, to_signed};
use super::counter::count_repetitions;

/// Repetition statistics for one system over a whole corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusStats {
    /// Sum of `per_line`.
    pub total: i64,
    /// One (possibly adjusted) count per aligned line.
    pub per_line: Vec<i64>,
}

/// Line `index` of `corpus`, or an empty sentence past its end.
fn line_at<T>(corpus: &[Vec<T>], index: usize) -> &[T] {
    corpus.get(index).map_or(&[][..], Vec::as_slice)
}

/// Count repetitions line by line for one system output.
///
/// With `subtract_legitimate_reps` set, each line's count has the reference
/// or source baseline removed (see [`adjusted_repetitions`]). A line missing
/// from the reference still has its source baseline subtracted, since the
/// absent reference line counts as an empty sentence with zero repetitions.
pub fn analyze_corpus<T: Eq + Hash>(
    reference: &[Vec<T>],
    output: &[Vec<T>],
    source: Option<&[Vec<T>]>,
    settings: &RepetitionSettings,
) -> CorpusStats {
    let len = reference
        .len()
        .max(output.len())
        .max(source.map_or(0, <[_]>::len));

    let per_line: Vec<i64> = (0..len)
        .map(|i| {
            let out_line = line_at(output, i);
            if settings.subtract_legitimate_reps {
                adjusted_repetitions(
                    out_line,
                    line_at(reference, i),
                    source.map(|src| line_at(src, i)),
                    settings.mode,
                    settings.order,
                )
            } else {
                to_signed(count_repetitions(out_line, settings.mode, settings.order))
            }
        })
        .collect();

    CorpusStats {
        total: per_line.iter().sum(),
        per_line,
    }
}

/// Run [`analyze_corpus`] for every system, preserving input order.
///
/// Systems share nothing, so with the `parallel` feature they are analyzed
/// concurrently.
#[tracing::instrument(skip_all, fields(systems = outputs.len(), lines = reference.len()))]
pub fn repetition_stats<T, O>(
    reference: &[Vec<T>],
    outputs: &[O],
    source: Option<&[Vec<T>]>,
    settings: &RepetitionSettings,
) -> Vec<CorpusStats>
where
    T: Eq + Hash + Sync,
    O: AsRef<[Vec<T>]> + Sync,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        outputs
            .par_iter()
            .map(|out| analyze_corpus(reference, out.as_ref(), source, settings))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        outputs
            .iter()
            .map(|out| analyze_corpus(reference, out.as_ref(), source, settings))
            .collect()
    }
}
