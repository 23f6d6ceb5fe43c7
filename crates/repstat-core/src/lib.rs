//! Core library for repstat.
//!
//! Measures how often machine-translation systems repeat material, separates
//! repetition already present in the reference or source from pathological
//! over-repetition, aggregates counts across a corpus, and ranks lines by
//! severity.
//!
//! # Modules
//!
//! - [`analysis`] - N-gram extraction, repetition counting, aggregation, ranking
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use repstat_core::analysis::{RepetitionSettings, SystemCorpus, run_repetition_stats};
//!
//! let tok = |s: &str| s.split_whitespace().map(str::to_string).collect::<Vec<_>>();
//! let reference = vec![tok("this is a test")];
//! let systems = vec![SystemCorpus::new("sys", vec![tok("this is a a test")])];
//!
//! let report = run_repetition_stats(&reference, &systems, None, &RepetitionSettings::default());
//! assert_eq!(report.systems[0].total, 1);
//! ```
#![deny(unsafe_code)]

pub mod analysis;

pub mod config;

pub mod error;

pub use analysis::{NgramOrder, RepetitionMode, RepetitionSettings, SystemCorpus};

pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};

pub use error::{ConfigError, ConfigResult};

/// Default per-file input limit: 5 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;
