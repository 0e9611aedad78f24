//! Rendering of crawl results.
//!
//! Text blocks look like this, with no separator between consecutive files:
//!
//! ```text
//! === src/main.rs ===
//! 1: fn main() {
//! 2: }
//! ```
//!
//! JSON output writes one serialized [`FileBlock`] per line instead.

use crate::engine::CrawlStream;
use crate::{CrawlError, CrawlSummary, FileBlock};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// How blocks are rendered.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub format: OutputFormat,
    /// Zero-pad line numbers to this many digits. `None` prints them bare.
    pub number_width: Option<usize>,
}

/// Formats a single block into a string.
pub fn render_block(block: &FileBlock, options: &RenderOptions) -> io::Result<String> {
    let mut buf = Vec::with_capacity(256);
    write_block(&mut buf, block, options)?;
    String::from_utf8(buf).map_err(io::Error::other)
}

/// Writes a single block to `out`.
pub fn write_block<W: Write>(out: &mut W, block: &FileBlock, options: &RenderOptions) -> io::Result<()> {
    match options.format {
        OutputFormat::Text => {
            writeln!(out, "=== {} ===", block.relative.display())?;
            for (idx, line) in block.lines.iter().enumerate() {
                match options.number_width {
                    Some(width) => writeln!(out, "{:0width$}: {}", idx + 1, line, width = width)?,
                    None => writeln!(out, "{}: {}", idx + 1, line)?,
                }
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, block)?;
            out.write_all(b"\n")?;
        }
    }
    Ok(())
}

/// Drains `stream`, writing blocks to `out` and one diagnostic line per
/// failed file to `diagnostics`.
///
/// `target` names the content sink in error messages. Only write failures on
/// either sink end the run early.
pub fn write_crawl<W: Write, E: Write>(
    mut stream: CrawlStream,
    options: &RenderOptions,
    out: &mut W,
    diagnostics: &mut E,
    target: &str,
) -> Result<CrawlSummary, CrawlError> {
    for item in stream.by_ref() {
        match item {
            Ok(block) => {
                write_block(out, &block, options).map_err(|e| CrawlError::output(target, e))?
            }
            Err(e) => writeln!(diagnostics, "error: {}", e)
                .map_err(|err| CrawlError::output("stderr", err))?,
        }
    }
    out.flush().map_err(|e| CrawlError::output(target, e))?;
    let summary = stream.summary();
    tracing::info!(
        printed = summary.printed,
        failed = summary.failed,
        filtered = summary.filtered,
        "crawl finished"
    );
    Ok(summary)
}

/// Creates (or truncates) the output file, making any missing parent
/// directories first.
pub fn create_output_file(path: impl AsRef<Path>) -> Result<File, CrawlError> {
    let path = path.as_ref();
    let label = path.display().to_string();
    if path.as_os_str().is_empty() || path.is_dir() {
        return Err(CrawlError::output(
            label,
            io::Error::new(io::ErrorKind::InvalidInput, "output path must name a file"),
        ));
    }
    let mut missing: Vec<PathBuf> = Vec::new();
    let mut dir = path.parent();
    while let Some(d) = dir {
        if d.as_os_str().is_empty() || d.exists() {
            break;
        }
        missing.push(d.to_path_buf());
        dir = d.parent();
    }
    for d in missing.iter().rev() {
        tracing::info!("creating directory {}", d.display());
        fs::create_dir(d).map_err(|e| CrawlError::output(d.display().to_string(), e))?;
    }
    File::create(path).map_err(|e| CrawlError::output(label, e))
}
