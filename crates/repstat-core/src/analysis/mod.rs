//! Repetition analysis over aligned corpora.
//!
//! Data flows one way: tokens → n-grams ([`ngram`]) → per-sentence counts
//! ([`counter`]) → baseline-adjusted counts ([`baseline`]) → corpus totals
//! ([`aggregate`]) → ranked worst lines ([`ranking`]).
//!
//! Every function is a pure computation over in-memory token sequences.
//! Callers can use the stages individually or go through
//! [`run_repetition_stats`] and [`run_repetition_examples`], which label the
//! results per system.

pub mod aggregate;
pub mod baseline;
pub mod counter;
pub mod ngram;
pub mod ranking;
pub mod reports;

use std::hash::Hash;

use serde::{Deserialize, Serialize};

pub use aggregate::{CorpusStats, analyze_corpus, repetition_stats};
pub use baseline::{adjusted_repetitions, baseline_repetitions, repetition_pair};
pub use counter::{RepetitionMode, count_repetitions};
pub use ngram::{NgramOrder, ngrams};
pub use ranking::{rank_worst, repetition_examples};
pub use reports::{
    RepetitionExample, RepetitionExamplesReport, RepetitionStatsReport, SystemExamples,
    SystemRepetitions,
};

use crate::error::ConfigResult;

/// Validated counting configuration shared by every corpus-level call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepetitionSettings {
    /// Adjacent or global counting.
    pub mode: RepetitionMode,
    /// N-gram order.
    pub order: NgramOrder,
    /// Subtract repetitions already present in the reference or source.
    pub subtract_legitimate_reps: bool,
}

impl RepetitionSettings {
    /// Build settings from a raw order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidNgramOrder`](crate::ConfigError::InvalidNgramOrder)
    /// when `order` is zero.
    pub fn new(
        mode: RepetitionMode,
        order: usize,
        subtract_legitimate_reps: bool,
    ) -> ConfigResult<Self> {
        Ok(Self {
            mode,
            order: NgramOrder::new(order)?,
            subtract_legitimate_reps,
        })
    }
}

/// One system's tokenized output, labelled for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemCorpus<T = String> {
    /// Label shown in reports (typically the output file stem).
    pub name: String,
    /// One token sequence per line.
    pub lines: Vec<Vec<T>>,
}

impl<T> SystemCorpus<T> {
    /// Label a tokenized output corpus.
    pub fn new(name: impl Into<String>, lines: Vec<Vec<T>>) -> Self {
        Self {
            name: name.into(),
            lines,
        }
    }
}

impl<T> AsRef<[Vec<T>]> for SystemCorpus<T> {
    fn as_ref(&self) -> &[Vec<T>] {
        &self.lines
    }
}

/// Total and per-line repetition counts for every system.
#[tracing::instrument(skip_all, fields(
    systems = systems.len(),
    mode = %settings.mode,
    order = settings.order.get(),
    subtract = settings.subtract_legitimate_reps,
))]
pub fn run_repetition_stats<T: Eq + Hash + Sync>(
    reference: &[Vec<T>],
    systems: &[SystemCorpus<T>],
    source: Option<&[Vec<T>]>,
    settings: &RepetitionSettings,
) -> RepetitionStatsReport {
    let stats = repetition_stats(reference, systems, source, settings);
    let systems: Vec<SystemRepetitions> = systems
        .iter()
        .zip(stats)
        .map(|(system, stats)| SystemRepetitions {
            name: system.name.clone(),
            total: stats.total,
            per_line: stats.per_line,
        })
        .collect();

    tracing::debug!(
        totals = ?systems.iter().map(|s| s.total).collect::<Vec<_>>(),
        "repetition statistics computed"
    );

    RepetitionStatsReport {
        settings: *settings,
        systems,
    }
}

/// The `num_examples` most repetitive lines of every system.
#[tracing::instrument(skip_all, fields(
    systems = systems.len(),
    mode = %settings.mode,
    order = settings.order.get(),
    num_examples = num_examples,
))]
pub fn run_repetition_examples<T: Eq + Hash + Sync>(
    reference: &[Vec<T>],
    systems: &[SystemCorpus<T>],
    source: Option<&[Vec<T>]>,
    settings: &RepetitionSettings,
    num_examples: usize,
) -> RepetitionExamplesReport {
    let stats = repetition_stats(reference, systems, source, settings);
    let systems = systems
        .iter()
        .zip(stats)
        .map(|(system, stats)| SystemExamples {
            name: system.name.clone(),
            examples: rank_worst(&stats.per_line, num_examples)
                .into_iter()
                .map(|line| RepetitionExample {
                    line,
                    repetitions: stats.per_line[line],
                })
                .collect(),
        })
        .collect();

    RepetitionExamplesReport {
        settings: *settings,
        num_examples,
        systems,
    }
}
