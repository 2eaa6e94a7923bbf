//! Command-line interface for the transpiler.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use crate::error::{Result, TranspileError};
use crate::render::{render_document, render_part};
use crate::text::wrap_text_default;

/// Vaski transpiler - Convert Finnish parliamentary VASKI XML to Markdown.
#[derive(Parser)]
#[command(name = "vaski-transpiler")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert one VASKI XML document to Markdown.
    Convert {
        /// Input XML file
        file: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Render only the first subtree with this local tag name
        /// (e.g. PerusteluOsa, PonsiOsa, SaadosOsa)
        #[arg(short, long)]
        part: Option<String>,

        /// Wrap output lines at the default width
        #[arg(long)]
        wrap: bool,
    },

    /// Convert every *.xml document in a directory.
    ///
    /// A document that fails to convert is recorded and reported; the batch
    /// continues with the next document and no partial output is written
    /// for the failed one.
    Batch {
        /// Input directory containing *.xml files
        dir: PathBuf,

        /// Output directory for *.md files
        #[arg(short, long)]
        output: PathBuf,

        /// Write a JSON conversion report to this path
        #[arg(long)]
        report: Option<PathBuf>,

        /// Wrap output lines at the default width
        #[arg(long)]
        wrap: bool,
    },
}

/// Outcome of a batch conversion.
#[derive(Debug, Default, Serialize)]
pub struct BatchReport {
    /// Files converted successfully.
    pub converted: Vec<String>,
    /// Files whose conversion raised a hard error.
    pub failed: Vec<BatchFailure>,
}

/// One failed document in a batch.
#[derive(Debug, Serialize)]
pub struct BatchFailure {
    pub file: String,
    pub error: String,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            file,
            output,
            part,
            wrap,
        } => convert_command(&file, output.as_deref(), part.as_deref(), wrap),
        Commands::Batch {
            dir,
            output,
            report,
            wrap,
        } => batch_command(&dir, &output, report.as_deref(), wrap),
    }
}

/// Convert one XML source string to Markdown.
fn convert_source(xml: &str, part: Option<&str>, wrap: bool) -> Result<String> {
    let doc = roxmltree::Document::parse(xml)?;
    let markdown = match part {
        Some(tag) => render_part(doc.root_element(), tag)?,
        None => render_document(doc.root_element())?,
    };
    if wrap {
        Ok(wrap_text_default(&markdown))
    } else {
        Ok(markdown)
    }
}

/// Execute the convert command.
fn convert_command(
    file: &Path,
    output: Option<&Path>,
    part: Option<&str>,
    wrap: bool,
) -> Result<()> {
    let xml = fs::read_to_string(file)?;
    let markdown = convert_source(&xml, part, wrap)?;

    match output {
        Some(path) => fs::write(path, markdown)?,
        None => print!("{markdown}"),
    }
    Ok(())
}

/// Convert every XML file in a directory, isolating per-document failures.
pub fn run_batch(dir: &Path, output: &Path, wrap: bool) -> Result<BatchReport> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "xml"))
        .collect();
    files.sort();

    fs::create_dir_all(output)?;

    let progress = ProgressBar::new(files.len() as u64);
    if let Ok(bar_style) = ProgressStyle::with_template("[{bar:40.cyan/blue}] {pos}/{len} {msg}") {
        progress.set_style(bar_style.progress_chars("=>-"));
    }

    let mut report = BatchReport::default();
    for file in &files {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        progress.set_message(name.clone());

        match fs::read_to_string(file)
            .map_err(TranspileError::from)
            .and_then(|xml| convert_source(&xml, None, wrap))
        {
            Ok(markdown) => {
                let target = output.join(Path::new(&name).with_extension("md"));
                fs::write(target, markdown)?;
                report.converted.push(name);
            }
            Err(err) => {
                tracing::warn!(file = %name, error = %err, "document failed to convert");
                report.failed.push(BatchFailure {
                    file: name,
                    error: err.to_string(),
                });
            }
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    Ok(report)
}

/// Execute the batch command.
fn batch_command(dir: &Path, output: &Path, report_path: Option<&Path>, wrap: bool) -> Result<()> {
    let report = run_batch(dir, output, wrap)?;

    println!(
        "{} {} document(s) converted",
        style("✓").green().bold(),
        report.converted.len()
    );
    if !report.failed.is_empty() {
        println!(
            "{} {} document(s) failed",
            style("✗").red().bold(),
            report.failed.len()
        );
        for failure in &report.failed {
            println!("  {}: {}", style(&failure.file).yellow(), failure.error);
        }
    }

    if let Some(path) = report_path {
        fs::write(path, serde_json::to_string_pretty(&report)?)?;
    }
    Ok(())
}
