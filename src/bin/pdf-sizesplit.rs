//! PDF Size Splitter CLI tool
//!
//! Splits PDFs into one file per paper size and orientation.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::process;

use pdf_sizesplit::error_log::FileErrorLog;
use pdf_sizesplit::pdf::{bucketize, ExportOptions, SourceDocument};
use pdf_sizesplit::split::{split_pdf, Outcome, SplitRequest};

/// Resolution of the progress bar
const PROGRESS_STEPS: u64 = 1000;

/// PDF Size Splitter - one PDF per paper size and orientation
#[derive(Parser)]
#[command(name = "pdf-sizesplit")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Split a drawing set into output/<name>/<name>_A4_Portrait.pdf etc.
    pdf-sizesplit split \"site plans.pdf\"

    # Split every PDF in a folder, four files at a time
    pdf-sizesplit split -o sorted -j 4 \"scans/*.pdf\"

    # Show which pages would go where, without writing anything
    pdf-sizesplit plan \"site plans.pdf\"")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split PDFs into one file per page category
    Split {
        /// Input PDF files. Supports glob patterns like "*.pdf"
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Root directory for the output folders
        #[arg(short, long, env = "PDF_SIZESPLIT_OUTPUT", default_value = "output")]
        output_root: PathBuf,

        /// Number of output files written in parallel
        #[arg(short, long, default_value_t = 1)]
        jobs: usize,

        /// File that failed runs are appended to
        #[arg(long, env = "PDF_SIZESPLIT_LOG", default_value = "logs/error.log")]
        log_file: PathBuf,

        /// Open the output folder after a successful split
        #[arg(long)]
        open: bool,
    },

    /// Show how the pages of a PDF would be grouped
    Plan {
        /// PDF file to inspect
        input: PathBuf,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Split { inputs, output_root, jobs, log_file, open } => {
            let opener = if open { Some(open_path as Opener) } else { None };
            cmd_split(inputs, output_root, jobs, log_file, opener)
        }
        Commands::Plan { input } => cmd_plan(&input),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

/// Expand glob patterns in input paths
fn expand_globs(patterns: Vec<String>) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for pattern in patterns {
        if pattern.contains('*') || pattern.contains('?') || pattern.contains('[') {
            let mut matched = false;
            for entry in glob(&pattern).with_context(|| format!("Invalid glob pattern: {}", pattern))? {
                match entry {
                    Ok(path) => {
                        paths.push(path);
                        matched = true;
                    }
                    Err(e) => log::warn!("glob error for {}: {}", pattern, e),
                }
            }
            if !matched {
                bail!("No files matched pattern: {}", pattern);
            }
        } else {
            paths.push(PathBuf::from(pattern));
        }
    }

    paths.sort();
    paths.dedup();

    Ok(paths)
}

/// Shows a finished output folder to the user
type Opener = fn(&Path) -> Result<()>;

/// Open a directory with the system file browser
fn open_path(path: &Path) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(path).spawn()?;
    }
    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(path).spawn()?;
    }
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("explorer").arg(path).spawn()?;
    }
    Ok(())
}

fn progress_bar(input: &Path) -> ProgressBar {
    let pb = ProgressBar::new(PROGRESS_STEPS);
    if let Ok(style) = ProgressStyle::default_bar().template("{msg} [{bar:40}] {percent:>3}%") {
        pb.set_style(style.progress_chars("=> "));
    }
    pb.set_message(
        input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default(),
    );
    pb
}

/// Split each input independently; fails if any of them failed
fn cmd_split(
    inputs: Vec<String>,
    output_root: PathBuf,
    jobs: usize,
    log_file: PathBuf,
    opener: Option<Opener>,
) -> Result<()> {
    let inputs = expand_globs(inputs)?;
    let error_log = FileErrorLog::new(log_file);
    let mut failed = 0;

    for input in &inputs {
        let request = SplitRequest {
            input: input.clone(),
            output_root: output_root.clone(),
            export: ExportOptions { jobs, cancel: None },
        };

        let pb = progress_bar(input);
        let outcome = split_pdf(
            &request,
            |p| pb.set_position((p * PROGRESS_STEPS as f64).round() as u64),
            &error_log,
        );
        pb.finish_and_clear();

        match &outcome {
            Outcome::Success { output_dir, files, .. } => {
                println!("{}", outcome.message());
                for file in files {
                    println!("  {}", file.display());
                }
                if let Some(open) = opener {
                    if let Err(e) = open(output_dir) {
                        log::warn!("Could not open {}: {:#}", output_dir.display(), e);
                    }
                }
            }
            Outcome::Failure { .. } | Outcome::Cancelled { .. } => {
                eprintln!("{}: {}", input.display(), outcome.message());
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} PDFs could not be split", failed, inputs.len());
    }

    Ok(())
}

/// Print the buckets of a PDF without writing anything
fn cmd_plan(input: &Path) -> Result<()> {
    let source = SourceDocument::open(input)?;
    let buckets = bucketize(&source, &source.name, |_| {})?;

    println!("File: {}", input.display());
    println!("Pages: {}", source.page_count());

    for (key, pages) in &buckets {
        let numbers: Vec<String> = pages.iter().map(|i| (i + 1).to_string()).collect();
        println!(
            "{}/{}.pdf: {} page(s) [{}]",
            source.name,
            key,
            pages.len(),
            numbers.join(", ")
        );
    }

    Ok(())
}
