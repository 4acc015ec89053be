//! docalign CLI - layout document comparison tool

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docalign::render::{self, JsonFormat, TextOptions};
use docalign::text::extract_section_number;
use docalign::{
    compare, extract_merged_paragraphs, extract_paragraphs, parse_file_with_options,
    AnnotationMap, AnnotationStrategy, CompareOptions, CompareReport, Document, ParseOptions,
};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "docalign")]
#[command(version)]
#[command(about = "Align and diff two revisions of a layout-extracted document", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two layout JSON documents
    #[command(alias = "diff")]
    Compare {
        /// Original document
        #[arg(value_name = "LEFT")]
        left: PathBuf,

        /// Revised document
        #[arg(value_name = "RIGHT")]
        right: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Annotation strategy
        #[arg(long, value_enum, default_value = "paragraph")]
        strategy: StrategyArg,

        /// Similarity threshold for fuzzy paragraph matching
        #[arg(long, default_value = "0.85", env = "DOCALIGN_THRESHOLD")]
        threshold: f64,

        /// Do not merge paragraphs split across pages
        #[arg(long)]
        no_merge: bool,

        /// Only print changed paragraphs (text format)
        #[arg(long)]
        changes_only: bool,

        /// Diff paragraph pairs in parallel
        #[arg(long)]
        parallel: bool,
    },

    /// List the paragraphs extracted from a document
    #[command(alias = "paras")]
    Paragraphs {
        /// Input layout JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Do not merge paragraphs split across pages
        #[arg(long)]
        no_merge: bool,

        /// Print JSON instead of a listing
        #[arg(long)]
        json: bool,
    },

    /// Print page annotations as pixel rectangles
    Annotate {
        /// Original document
        #[arg(value_name = "LEFT")]
        left: PathBuf,

        /// Revised document
        #[arg(value_name = "RIGHT")]
        right: PathBuf,

        /// Zoom scale from page units to pixels
        #[arg(long, default_value = "1.5")]
        zoom: f64,

        /// Annotation strategy
        #[arg(long, value_enum, default_value = "paragraph")]
        strategy: StrategyArg,

        /// Similarity threshold for fuzzy matching
        #[arg(long, default_value = "0.85", env = "DOCALIGN_THRESHOLD")]
        threshold: f64,

        /// Print JSON instead of a listing
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Plain text report with inline edit markers
    Text,
    /// Full JSON report
    Json,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    /// Mark blocks whose text equals a changed paragraph
    Paragraph,
    /// Map character-level edits to span bboxes
    Char,
    /// Match blocks directly and mark the unmatched ones
    Block,
}

impl From<StrategyArg> for AnnotationStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Paragraph => AnnotationStrategy::Paragraph,
            StrategyArg::Char => AnnotationStrategy::CharacterRange,
            StrategyArg::Block => AnnotationStrategy::BlockMatch,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Compare {
            left,
            right,
            output,
            format,
            compact,
            strategy,
            threshold,
            no_merge,
            changes_only,
            parallel,
        }) => {
            let options = CompareOptions::new()
                .with_threshold(threshold)
                .with_merge(!no_merge)
                .with_strategy(strategy.into())
                .with_parallel_diff(parallel);
            cmd_compare(
                &left,
                &right,
                output.as_deref(),
                format,
                compact,
                changes_only,
                &options,
            )
        }
        Some(Commands::Paragraphs {
            input,
            no_merge,
            json,
        }) => cmd_paragraphs(&input, !no_merge, json),
        Some(Commands::Annotate {
            left,
            right,
            zoom,
            strategy,
            threshold,
            json,
        }) => {
            let options = CompareOptions::new()
                .with_threshold(threshold)
                .with_strategy(strategy.into());
            cmd_annotate(&left, &right, zoom, &options, json)
        }
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: docalign compare <LEFT> <RIGHT>".yellow());
            println!("       docalign --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Load a layout JSON document, tolerating a missing page list.
fn load_document(path: &Path) -> CliResult<Document> {
    let doc = parse_file_with_options(path, ParseOptions::new().lenient())?;
    log::debug!("Loaded {} ({} pages)", path.display(), doc.page_count());
    Ok(doc)
}

/// Run a comparison behind a spinner.
fn run_compare(left: &Path, right: &Path, options: &CompareOptions) -> CliResult<CompareReport> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(80));

    pb.set_message("Loading documents...");
    let left_doc = load_document(left)?;
    let right_doc = load_document(right)?;

    pb.set_message("Aligning paragraphs...");
    let report = compare(&left_doc, &right_doc, options);

    pb.finish_and_clear();
    Ok(report)
}

fn write_output(content: &str, output: Option<&Path>) -> CliResult<()> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_compare(
    left: &Path,
    right: &Path,
    output: Option<&Path>,
    format: OutputFormat,
    compact: bool,
    changes_only: bool,
    options: &CompareOptions,
) -> CliResult<()> {
    let report = run_compare(left, right, options)?;

    let content = match format {
        OutputFormat::Json => {
            let json_format = if compact {
                JsonFormat::Compact
            } else {
                JsonFormat::Pretty
            };
            render::to_json(&report, json_format)?
        }
        OutputFormat::Text => {
            let mut text_options = TextOptions::new();
            if changes_only {
                text_options = text_options.changes_only();
            }
            render::to_text(&report, &text_options)?
        }
    };
    write_output(content.trim_end(), output)?;

    if output.is_some() || format == OutputFormat::Json {
        print_summary(&report);
    }
    Ok(())
}

fn print_summary(report: &CompareReport) {
    let stats = &report.stats;
    eprintln!(
        "{} {} added, {} removed, {} changed of {} pairs",
        "Summary:".cyan().bold(),
        format!("+{}", stats.added).green(),
        format!("-{}", stats.removed).red(),
        stats.changed_pairs,
        report.pairs.len()
    );
}

fn cmd_paragraphs(input: &Path, merge: bool, json: bool) -> CliResult<()> {
    let doc = load_document(input)?;
    let paragraphs = if merge {
        extract_merged_paragraphs(&doc)
    } else {
        extract_paragraphs(&doc)
    };

    if json {
        println!("{}", render::value_to_json(&paragraphs, JsonFormat::Pretty)?);
        return Ok(());
    }

    println!("{}", "Paragraphs".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for (i, para) in paragraphs.iter().enumerate() {
        let number = extract_section_number(&para.text)
            .map(|n| format!("[{}] ", n).yellow().to_string())
            .unwrap_or_default();
        println!(
            "{:>4} {} {}{}",
            i + 1,
            format!("p.{}", para.page_idx + 1).dimmed(),
            number,
            para.text
        );
    }
    println!("\n{}: {}", "Total".bold(), paragraphs.len());
    Ok(())
}

fn cmd_annotate(
    left: &Path,
    right: &Path,
    zoom: f64,
    options: &CompareOptions,
    json: bool,
) -> CliResult<()> {
    if !(zoom.is_finite() && zoom > 0.0) {
        return Err(format!("Invalid zoom scale: {}", zoom).into());
    }
    let report = run_compare(left, right, options)?;

    if json {
        let value = serde_json::json!({
            "zoom": zoom,
            "left": pixel_rects(&report.left_annotations, zoom),
            "right": pixel_rects(&report.right_annotations, zoom),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    print_annotations("Left (removed)", &report.left_annotations, zoom);
    println!();
    print_annotations("Right (added)", &report.right_annotations, zoom);
    Ok(())
}

fn pixel_rects(map: &AnnotationMap, zoom: f64) -> serde_json::Value {
    let pages: serde_json::Map<String, serde_json::Value> = map
        .iter()
        .map(|(page_idx, annotations)| {
            let rects = annotations
                .iter()
                .map(|a| {
                    serde_json::json!({
                        "type": a.kind.as_str(),
                        "rect": a.to_pixel_rect(zoom),
                        "text": a.text,
                        "correlation_id": a.correlation_id,
                    })
                })
                .collect();
            (page_idx.to_string(), serde_json::Value::Array(rects))
        })
        .collect();
    serde_json::Value::Object(pages)
}

fn print_annotations(title: &str, map: &AnnotationMap, zoom: f64) {
    println!("{} ({})", title.cyan().bold(), map.total());
    println!("{}", "─".repeat(40).dimmed());
    for (page_idx, annotations) in map.iter() {
        println!("{}", format!("Page {}", page_idx + 1).bold());
        for annotation in annotations {
            let rect = annotation.to_pixel_rect(zoom);
            let label = match annotation.kind {
                docalign::AnnotationKind::Added => "added".green(),
                docalign::AnnotationKind::Removed => "removed".red(),
            };
            println!(
                "  {:<8} x={:.1} y={:.1} w={:.1} h={:.1}  {}",
                label,
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                annotation.text.dimmed()
            );
        }
    }
}

fn cmd_version() {
    println!("{} {}", "docalign".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Layout document alignment and diff tool");
    println!();
    println!("License: MIT");
}
