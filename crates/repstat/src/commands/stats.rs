//! Stats command — total repetitions per system.

use clap::Args;
use owo_colors::OwoColorize;
use repstat_core::analysis::run_repetition_stats;
use repstat_core::config::Config;
use tracing::{debug, instrument};

use super::{CorpusArgs, LoadedCorpora, settings_title};

/// Arguments for the `stats` subcommand.
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Corpus files and counting flags.
    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Also print the per-line counts for each system (always in JSON).
    #[arg(long)]
    pub per_line: bool,
}

/// Count repetitions in every system output and print the corpus totals.
#[instrument(name = "cmd_stats", skip_all, fields(reference = %args.corpus.reference))]
pub fn cmd_stats(args: StatsArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    let settings = args.corpus.settings(config)?;
    debug!(
        outputs = args.corpus.outputs.len(),
        mode = %settings.mode,
        order = settings.order.get(),
        subtract = settings.subtract_legitimate_reps,
        "executing stats command"
    );

    let corpora = LoadedCorpora::load(&args.corpus, config.input_limit())?;
    let report = run_repetition_stats(
        &corpora.reference,
        &corpora.systems,
        corpora.source.as_deref(),
        &settings,
    );

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", "Repetition Statistics".bold());
    println!("--- {}", settings_title(&report.settings));
    println!("\t{}", "TOTAL REPS IN CORPUS".cyan());
    for system in &report.systems {
        println!("{}\t{}", system.name, system.total);
    }

    if args.per_line {
        for system in &report.systems {
            println!();
            println!("--- per-line counts for {}", system.name);
            for (line, count) in system.per_line.iter().enumerate() {
                println!("{}\t{count}", line + 1);
            }
        }
    }

    Ok(())
}
