//! Command implementations.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use repstat_core::analysis::{RepetitionMode, RepetitionSettings, SystemCorpus};
use repstat_core::config::Config;
use tracing::debug;

pub mod examples;
pub mod info;
pub mod stats;

/// Tokenized corpus: one whitespace-split token sequence per line.
pub type Corpus = Vec<Vec<String>>;

/// Corpus files and counting flags shared by `stats` and `examples`.
#[derive(Args, Debug)]
pub struct CorpusArgs {
    /// System output files, one tokenized sentence per line.
    #[arg(required = true, value_name = "OUT")]
    pub outputs: Vec<Utf8PathBuf>,

    /// Reference file, line-aligned with the outputs.
    #[arg(short, long = "ref", value_name = "REF")]
    pub reference: Utf8PathBuf,

    /// Source file, line-aligned with the outputs.
    #[arg(short, long = "src", value_name = "SRC")]
    pub source: Option<Utf8PathBuf>,

    /// Counting mode.
    #[arg(long, value_enum)]
    pub mode: Option<RepetitionMode>,

    /// N-gram order (at least 1).
    #[arg(short = 'n', long)]
    pub ngram_order: Option<usize>,

    /// Subtract repetitions already present in the reference or source.
    #[arg(long, overrides_with = "no_subtract_legitimate_reps")]
    pub subtract_legitimate_reps: bool,

    /// Report raw counts even when the config enables subtraction.
    #[arg(long, overrides_with = "subtract_legitimate_reps")]
    pub no_subtract_legitimate_reps: bool,
}

impl CorpusArgs {
    /// Merge flags over config values and validate them.
    pub fn settings(&self, config: &Config) -> anyhow::Result<RepetitionSettings> {
        let settings = RepetitionSettings::new(
            self.mode.unwrap_or(config.mode),
            self.ngram_order.unwrap_or(config.ngram_order),
            self.subtract_override().unwrap_or(config.subtract_legitimate_reps),
        )?;
        Ok(settings)
    }

    /// The subtraction switch given on the command line, if any.
    const fn subtract_override(&self) -> Option<bool> {
        if self.subtract_legitimate_reps {
            Some(true)
        } else if self.no_subtract_legitimate_reps {
            Some(false)
        } else {
            None
        }
    }
}

/// Loaded, tokenized corpora ready for analysis.
#[derive(Debug)]
pub struct LoadedCorpora {
    /// Reference corpus.
    pub reference: Corpus,
    /// Source corpus, if given.
    pub source: Option<Corpus>,
    /// One labelled corpus per system output.
    pub systems: Vec<SystemCorpus>,
}

impl LoadedCorpora {
    /// Read and tokenize every file named in `args`.
    pub fn load(args: &CorpusArgs, max_bytes: Option<usize>) -> anyhow::Result<Self> {
        let reference = load_corpus(&args.reference, max_bytes)?;
        let source = args
            .source
            .as_deref()
            .map(|path| load_corpus(path, max_bytes))
            .transpose()?;
        let systems = args
            .outputs
            .iter()
            .map(|path| Ok(SystemCorpus::new(system_name(path), load_corpus(path, max_bytes)?)))
            .collect::<anyhow::Result<Vec<_>>>()?;

        for system in &systems {
            if system.lines.len() != reference.len() {
                debug!(
                    system = %system.name,
                    lines = system.lines.len(),
                    reference_lines = reference.len(),
                    "corpus length mismatch; missing lines count as empty"
                );
            }
        }

        Ok(Self {
            reference,
            source,
            systems,
        })
    }
}

/// Read a file and validate its size against the configured limit.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    // Preflight: check file size via metadata before reading into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if size > max {
            anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    let content = std::fs::read_to_string(path.as_std_path())
        .with_context(|| format!("failed to read {path}"))?;
    Ok(content)
}

/// Split text into lines, and each line into whitespace-separated tokens.
pub fn tokenize_lines(content: &str) -> Corpus {
    content
        .lines()
        .map(|line| line.split_whitespace().map(str::to_string).collect())
        .collect()
}

/// Load a pre-tokenized corpus file.
pub fn load_corpus(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<Corpus> {
    let content = read_input_file(path, max_bytes)?;
    let corpus = tokenize_lines(&content);
    debug!(file = %path, lines = corpus.len(), "loaded corpus");
    Ok(corpus)
}

/// Report label for a system output file.
pub fn system_name(path: &Utf8Path) -> String {
    path.file_stem().unwrap_or(path.as_str()).to_string()
}

/// Space-joined tokens of line `index`, or an empty string past the end.
pub fn line_text(corpus: &[Vec<String>], index: usize) -> String {
    corpus.get(index).map(|l| l.join(" ")).unwrap_or_default()
}

/// Title line describing the counting configuration.
pub fn settings_title(settings: &RepetitionSettings) -> String {
    format!(
        "mode={}, ngram_order={}, subtract_legitimate_reps={}",
        settings.mode, settings.order, settings.subtract_legitimate_reps
    )
}
