//! Batch annotation command.

use std::path::Path;

use chrono::{DateTime, Utc};
use console::{style, StyledObject};

use verus::config::Settings;
use verus::models::{parse_results, Annotation, AnnotationEntry, ResultInput};
use verus::services::{AgeBucket, AnnotationComposer, Severity};

use super::helpers::{read_input, truncate};
use super::OutputFormat;

/// Annotate every result record in the input.
pub async fn cmd_annotate(
    settings: &Settings,
    input: Option<&Path>,
    format: OutputFormat,
    now: DateTime<Utc>,
) -> anyhow::Result<()> {
    let text = read_input(input).await?;
    let results = parse_results(&text)?;
    let composer = AnnotationComposer::new(settings);

    let annotations: Vec<Annotation> = results
        .iter()
        .map(|result| composer.compose(result, now))
        .collect();
    tracing::info!("Annotated {} results", annotations.len());

    match format {
        OutputFormat::Json => {
            for annotation in &annotations {
                println!("{}", serde_json::to_string(annotation)?);
            }
        }
        OutputFormat::Pretty => {
            println!("{}", serde_json::to_string_pretty(&annotations)?);
        }
        OutputFormat::Table => print_table(&results, &annotations),
    }

    Ok(())
}

fn print_table(results: &[ResultInput], annotations: &[Annotation]) {
    if results.is_empty() {
        println!("{} No results in input", style("!").yellow());
        return;
    }

    println!("{:<4} {:<40} Signals", "#", "Title");
    println!("{}", "-".repeat(80));

    for (i, (result, annotation)) in results.iter().zip(annotations).enumerate() {
        let title = if result.title.is_empty() {
            result.url().unwrap_or("(untitled)")
        } else {
            result.title.as_str()
        };

        let badges: Vec<String> = annotation
            .entries
            .iter()
            .map(|entry| styled_entry(entry).to_string())
            .collect();
        let badges = if badges.is_empty() {
            style("-").dim().to_string()
        } else {
            badges.join(" ")
        };

        println!("{:<4} {:<40} {}", i + 1, truncate(title, 39), badges);
    }
}

fn styled_entry(entry: &AnnotationEntry) -> StyledObject<String> {
    let text = format!("[{}]", entry.text());
    match entry {
        AnnotationEntry::TechDebt { severity, .. } => match severity {
            Severity::Danger => style(text).red().bold(),
            Severity::Risk => style(text).yellow(),
            Severity::Info => style(text).dim(),
        },
        AnnotationEntry::Authority { .. } => style(text).blue(),
        AnnotationEntry::Platform { .. } => style(text).cyan(),
        AnnotationEntry::Modern { .. } => style(text).green(),
        AnnotationEntry::Age { bucket, .. } => match bucket {
            AgeBucket::Fresh => style(text).green(),
            AgeBucket::Aging => style(text).yellow(),
            AgeBucket::Stale => style(text).red(),
        },
    }
}
