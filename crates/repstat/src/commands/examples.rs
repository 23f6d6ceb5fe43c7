//! Examples command — the most repetitive lines of each system.

use clap::Args;
use owo_colors::OwoColorize;
use repstat_core::analysis::{RepetitionExamplesReport, run_repetition_examples};
use repstat_core::config::Config;
use serde::Serialize;
use tracing::{debug, instrument};

use super::{CorpusArgs, LoadedCorpora, line_text, settings_title};

/// Arguments for the `examples` subcommand.
#[derive(Args, Debug)]
pub struct ExamplesArgs {
    /// Corpus files and counting flags.
    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Number of worst lines to show per system.
    #[arg(short = 'k', long)]
    pub num_examples: Option<usize>,
}

/// One ranked line with its aligned text, for JSON output.
#[derive(Debug, Serialize)]
struct ExampleLine {
    line: usize,
    repetitions: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
    reference: String,
    output: String,
}

#[derive(Debug, Serialize)]
struct SystemExampleLines {
    name: String,
    examples: Vec<ExampleLine>,
}

#[derive(Debug, Serialize)]
struct ExamplesOutput {
    #[serde(flatten)]
    report: RepetitionExamplesReport,
    lines: Vec<SystemExampleLines>,
}

fn attach_text(report: RepetitionExamplesReport, corpora: &LoadedCorpora) -> ExamplesOutput {
    let lines = report
        .systems
        .iter()
        .zip(&corpora.systems)
        .map(|(ranked, system)| SystemExampleLines {
            name: ranked.name.clone(),
            examples: ranked
                .examples
                .iter()
                .map(|ex| ExampleLine {
                    line: ex.line,
                    repetitions: ex.repetitions,
                    source: corpora.source.as_ref().map(|src| line_text(src, ex.line)),
                    reference: line_text(&corpora.reference, ex.line),
                    output: line_text(&system.lines, ex.line),
                })
                .collect(),
        })
        .collect();
    ExamplesOutput { report, lines }
}

/// Rank every system's lines by repetition count and print the worst ones.
#[instrument(name = "cmd_examples", skip_all, fields(reference = %args.corpus.reference))]
pub fn cmd_examples(args: ExamplesArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    let settings = args.corpus.settings(config)?;
    let num_examples = args.num_examples.unwrap_or(config.num_examples);
    debug!(
        outputs = args.corpus.outputs.len(),
        num_examples,
        mode = %settings.mode,
        order = settings.order.get(),
        "executing examples command"
    );

    let corpora = LoadedCorpora::load(&args.corpus, config.input_limit())?;
    let report = run_repetition_examples(
        &corpora.reference,
        &corpora.systems,
        corpora.source.as_deref(),
        &settings,
        num_examples,
    );
    let output = attach_text(report, &corpora);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", "Repetition Examples".bold());
    println!(
        "--- {}, num_examples={}",
        settings_title(&output.report.settings),
        num_examples
    );

    for system in &output.lines {
        println!();
        println!(
            "--- {} worst examples from {}",
            num_examples,
            system.name.cyan()
        );
        for ex in &system.examples {
            println!(
                "{} {} ({} reps)",
                "Line".dimmed(),
                ex.line + 1,
                ex.repetitions
            );
            if let Some(ref src) = ex.source {
                println!("Src:  {src}");
            }
            println!("Ref:  {}", ex.reference);
            println!("{}: {}", system.name, ex.output);
            println!();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use repstat_core::analysis::{RepetitionSettings, SystemCorpus};

    use crate::commands::tokenize_lines;

    #[test]
    fn attaches_aligned_text() {
        let corpora = LoadedCorpora {
            reference: tokenize_lines("r one\nr two"),
            source: Some(tokenize_lines("s one")),
            systems: vec![SystemCorpus::new("sys", tokenize_lines("o o\no o o"))],
        };
        let report = run_repetition_examples(
            &corpora.reference,
            &corpora.systems,
            corpora.source.as_deref(),
            &RepetitionSettings::default(),
            1,
        );
        let output = attach_text(report, &corpora);
        let ex = &output.lines[0].examples[0];
        assert_eq!(ex.line, 1);
        assert_eq!(ex.repetitions, 2);
        assert_eq!(ex.output, "o o o");
        assert_eq!(ex.reference, "r two");
        assert_eq!(ex.source.as_deref(), Some(""));
    }
}
