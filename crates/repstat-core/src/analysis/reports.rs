//! Report structs for repetition analysis.
//!
//! Reports are plain data. Rendering them as text or JSON is the caller's job.

use serde::{Deserialize, Serialize};

use super::RepetitionSettings;

/// Corpus totals for every system under one configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepetitionStatsReport {
    /// Configuration the counts were produced under.
    pub settings: RepetitionSettings,
    /// One entry per system, in input order.
    pub systems: Vec<SystemRepetitions>,
}

/// Repetition counts for one system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemRepetitions {
    /// System label.
    pub name: String,
    /// Sum of `per_line`.
    pub total: i64,
    /// Count for each aligned line.
    pub per_line: Vec<i64>,
}

/// Worst lines for every system under one configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepetitionExamplesReport {
    /// Configuration the counts were produced under.
    pub settings: RepetitionSettings,
    /// Requested number of examples per system.
    pub num_examples: usize,
    /// One entry per system, in input order.
    pub systems: Vec<SystemExamples>,
}

/// Worst lines for one system, most repetitive first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemExamples {
    /// System label.
    pub name: String,
    /// At most `num_examples` lines.
    pub examples: Vec<RepetitionExample>,
}

/// A single ranked line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepetitionExample {
    /// Zero-based line index into the aligned corpora.
    pub line: usize,
    /// The line's (possibly adjusted) repetition count.
    pub repetitions: i64,
}
