use anyhow::{Context, Result};
use clap::Parser;
use dialoguer::theme::ColorfulTheme;
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use signature_scan_rs::interactive;
use signature_scan_rs::prelude::*;

#[derive(Parser)]
#[command(name = "signature_scan_rs")]
#[command(about = "Identify files by magic number and fingerprint them with a content hash", long_about = None)]
struct Cli {
    /// Directory to analyze (prompted for interactively when omitted)
    directory: Option<PathBuf>,

    /// Include subdirectories
    #[arg(short, long)]
    recursive: bool,

    /// Report file (default: signature_report.csv or .json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Digest used for the Hash column
    #[arg(long, value_enum, default_value_t = HashAlgorithm::Md5)]
    algorithm: HashAlgorithm,

    /// Bytes covered by the hash
    #[arg(long, value_enum, default_value_t = HashScope::AfterPrefix)]
    hash_scope: HashScope,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Csv)]
    format: ReportFormat,

    /// Number of worker threads used for hashing (output order is unchanged)
    #[arg(short, long, default_value_t = 1)]
    jobs: usize,

    /// Replace the report file if it already exists
    #[arg(long)]
    force: bool,

    /// Run in batch mode (no progress bar)
    #[arg(long)]
    batch: bool,

    /// Additional signature as NAME=HEX, e.g. PNG=89504E47 (repeatable)
    #[arg(long = "signature", value_name = "NAME=HEX", value_parser = parse_signature)]
    signatures: Vec<Signature>,

    /// Report files sharing the same hash
    #[arg(long)]
    detect_duplicates: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn to_config(&self, directory: PathBuf, output: Option<PathBuf>) -> ScanConfig {
        let output = output.unwrap_or_else(|| {
            PathBuf::from(format!("signature_report.{}", self.format.extension()))
        });

        let mut config = ScanConfig::new(directory, output);
        config.recursive = self.recursive;
        config.algorithm = self.algorithm;
        config.hash_scope = self.hash_scope;
        config.format = self.format;
        config.jobs = self.jobs;
        config.force = self.force;
        config.show_progress = !self.batch;
        config.detect_duplicates = self.detect_duplicates;
        config.extra_signatures = self.signatures.clone();
        config
    }
}

fn parse_signature(value: &str) -> std::result::Result<Signature, String> {
    Signature::parse(value).map_err(|e| e.to_string())
}

fn setup_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.directory.clone() {
        Some(directory) => {
            let config = cli.to_config(directory, cli.output.clone());
            config.validate().context("Invalid arguments")?;
            run_scan(&config)
        }
        None => run_interactive(&cli),
    }
}

/// Prompt loop: directory, output file, subdirectories, then offer another run
fn run_interactive(cli: &Cli) -> Result<()> {
    let theme = ColorfulTheme::default();

    loop {
        let directory = interactive::ask_directory(&theme).context("Failed to get directory")?;
        let (output, replace) =
            interactive::ask_output(&theme, cli.format).context("Failed to get output file")?;
        let recursive = interactive::confirm(&theme, "Do you want to include subdirectories?", true)
            .context("Failed to confirm")?;

        let mut config = cli.to_config(directory, Some(output));
        config.recursive = recursive;
        config.force = config.force || replace;

        let outcome = config
            .validate()
            .map_err(anyhow::Error::from)
            .and_then(|_| run_scan(&config));
        if let Err(e) = outcome {
            eprintln!("An error has occurred: {:#}", e);
        }

        let again = interactive::confirm(&theme, "Do you want to analyze another directory?", false)
            .context("Failed to confirm")?;
        if !again {
            break;
        }
    }

    Ok(())
}

fn run_scan(config: &ScanConfig) -> Result<()> {
    let registry = config.registry().context("Invalid signature set")?;
    let processor = FileProcessor::new(&registry, config.hasher());

    let progress = if config.show_progress {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .context("Invalid progress bar template")?
                .progress_chars("#>-"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let result = Scanner::new(processor)
        .with_jobs(config.jobs)
        .with_progress(progress)
        .scan(&config.root, config.recursive)
        .with_context(|| format!("Failed to analyze {}", config.root.display()))?;

    let written = write_report(&config.output, &result.records, config.format)
        .context("Failed to write report")?;

    if written {
        println!("Report saved to: {}", config.output.display());
    } else {
        println!("No matching files; no report written.");
    }

    print!("{}", ScanSummary::from_result(&config.root, &result));

    if config.detect_duplicates {
        print!("{}", format_duplicates(&find_duplicates(&result.records)));
    }

    Ok(())
}
