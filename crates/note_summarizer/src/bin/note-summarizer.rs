use std::{io::Read, path::PathBuf, time::Instant};

use anyhow::Context;
use clap::{Parser, Subcommand};
use note_summarizer::{
    export_document, get_example_notes, tracing::init_tracing_subscriber, ModelName,
    ModelRegistry, Summarizer, SummaryService,
};

#[derive(Parser)]
#[command(name = "note-summarizer", about = "Clinical note summarization service")]
struct Cli {
    /// Summarization model to use
    #[arg(long, env = "SUMMARIZER_MODEL", default_value = "t5-base")]
    model: ModelName,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Summarize a clinical note read from a file, a bundled example, or stdin
    Summarize {
        /// Read the note from this file
        #[arg(long, conflicts_with = "example")]
        file: Option<PathBuf>,

        /// Use a bundled example note by name
        #[arg(long)]
        example: Option<String>,

        /// Maximum summary length in tokens
        #[arg(long, env = "SUMMARY_MAX_LENGTH", default_value = "400")]
        max_length: usize,

        /// Minimum summary length in tokens
        #[arg(long, env = "SUMMARY_MIN_LENGTH", default_value = "150")]
        min_length: usize,

        /// Write a plain-text export document to this path
        #[arg(long)]
        export: Option<PathBuf>,

        /// Print the outcome as JSON instead of human-readable text
        #[arg(long)]
        json: bool,
    },
    /// List the bundled example notes
    Examples,
    /// Load the model and print its metadata
    Info,
}

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_tracing_subscriber()?;

    let registry = ModelRegistry::new();

    match cli.command {
        Command::Examples => {
            for (name, text) in get_example_notes() {
                println!("{name} ({} chars)", text.chars().count());
            }
        }
        Command::Info => {
            let handle = registry.get_or_load(cli.model)?;
            let info = handle.info();
            println!("model: {}", info.model_name);
            println!("device: {}", info.device);
        }
        Command::Summarize {
            file,
            example,
            max_length,
            min_length,
            export,
            json,
        } => {
            let note = read_note(file, example)?;

            let service = SummaryService::new(registry.get_or_load(cli.model)?);
            let started = Instant::now();
            let outcome = service.summarize_note(&note, max_length, min_length)?;
            let elapsed = started.elapsed();

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                println!("{}", outcome.summary);
                println!();
                println!(
                    "original: {} chars | summary: {} chars | reduction: {:.1}% | {:.2}s",
                    outcome.stats.original_length,
                    outcome.stats.summary_length,
                    outcome.stats.reduction_percentage,
                    elapsed.as_secs_f64(),
                );
            }

            if let Some(path) = export {
                std::fs::write(&path, export_document(&note, &outcome.summary))
                    .with_context(|| format!("failed to write export to {}", path.display()))?;
                tracing::info!(path = %path.display(), "Export written");
            }
        }
    }

    Ok(())
}

fn read_note(file: Option<PathBuf>, example: Option<String>) -> anyhow::Result<String> {
    if let Some(name) = example {
        let notes = get_example_notes();
        return notes
            .get(name.as_str())
            .map(|text| text.to_string())
            .with_context(|| {
                format!(
                    "unknown example `{name}`, available: {}",
                    notes.keys().copied().collect::<Vec<_>>().join(", ")
                )
            });
    }

    if let Some(path) = file {
        return std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read note from {}", path.display()));
    }

    let mut note = String::new();
    std::io::stdin()
        .read_to_string(&mut note)
        .context("failed to read note from stdin")?;
    Ok(note)
}
