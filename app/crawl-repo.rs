//! Command-line interface for repo-crawler.
//!
//! Prints every file under a directory with a path header and numbered
//! lines. Unreadable files are reported on stderr and skipped.

use clap::{Parser, ValueEnum};
use repo_crawler::{
    BinaryDetection, CrawlBuilder, CrawlError, CrawlOptions, RenderOptions, crawl, output,
};
use std::io::{self, BufWriter, IsTerminal, Write};
use std::path::PathBuf;
use std::process::exit;
use tracing::Level;

/// crawl-repo — print a directory tree's files with line numbers
#[derive(Parser)]
#[command(name = "crawl-repo", version, about, long_about = None)]
struct Cli {
    /// Directory to crawl
    root: PathBuf,

    /// Extensions to skip (repeatable; comma or space separated)
    #[arg(short = 'e', long = "exclude", conflicts_with = "include")]
    exclude: Vec<String>,

    /// Only print files with these extensions (repeatable; comma or space separated)
    #[arg(short = 'i', long = "include")]
    include: Vec<String>,

    /// Ignore glob patterns, matched against root-relative paths (can be repeated)
    #[arg(short = 'I', long = "ignore")]
    ignore_patterns: Vec<String>,

    /// Honour .gitignore files
    #[arg(long)]
    gitignore: bool,

    /// Skip hidden files and directories
    #[arg(long)]
    no_hidden: bool,

    /// Follow symlinks
    #[arg(long)]
    follow_links: bool,

    /// Max depth (unlimited if not set)
    #[arg(long)]
    max_depth: Option<usize>,

    /// Binary detection strategy
    #[arg(long, default_value = "simple", value_parser = parse_binary_detection)]
    binary_detection: BinaryDetection,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Zero-pad line numbers to this many digits
    #[arg(long)]
    number_width: Option<usize>,

    /// Write output to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Parse string into BinaryDetection enum.
fn parse_binary_detection(s: &str) -> Result<BinaryDetection, String> {
    match s {
        "simple" => Ok(BinaryDetection::Simple),
        "accurate" => Ok(BinaryDetection::Accurate),
        "none" => Ok(BinaryDetection::None),
        _ => Err(format!("invalid binary detection method: {}", s)),
    }
}

impl Cli {
    fn into_parts(self) -> (CrawlOptions, RenderOptions, Option<PathBuf>, u8) {
        let mut builder = CrawlBuilder::new(self.root)
            .exclude_extensions(&self.exclude)
            .include_extensions(&self.include)
            .ignore_patterns(self.ignore_patterns)
            .respect_gitignore(self.gitignore)
            .include_hidden(!self.no_hidden)
            .follow_links(self.follow_links)
            .binary_detection(self.binary_detection);

        if let Some(path) = &self.output {
            builder = builder.skip_path(path);
        }

        builder = if let Some(depth) = self.max_depth {
            builder.max_depth(depth)
        } else {
            builder.no_limit_depth()
        };

        let render = RenderOptions {
            format: match self.format {
                Format::Text => output::OutputFormat::Text,
                Format::Json => output::OutputFormat::Json,
            },
            number_width: self.number_width,
        };

        (builder.build(), render, self.output, self.verbose)
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    let (options, render, output_path, verbose) = cli.into_parts();
    init_logging(verbose);

    if let Err(e) = run(options, &render, output_path) {
        eprintln!("Error: {}", e);
        exit(1);
    }
}

fn run(
    options: CrawlOptions,
    render: &RenderOptions,
    output_path: Option<PathBuf>,
) -> Result<(), CrawlError> {
    // Validate everything fatal before creating the output file.
    let stream = crawl(options)?;

    let mut out: Box<dyn Write>;
    let target = match output_path {
        Some(path) => {
            out = Box::new(BufWriter::new(output::create_output_file(&path)?));
            path.display().to_string()
        }
        None => {
            out = Box::new(BufWriter::new(io::stdout().lock()));
            "stdout".to_string()
        }
    };
    let stderr = io::stderr();
    let mut diagnostics = stderr.lock();

    output::write_crawl(stream, render, &mut out, &mut diagnostics, &target)?;
    Ok(())
}
