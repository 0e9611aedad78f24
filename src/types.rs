use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One printable block: a file that was read successfully.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileBlock {
    /// Path as produced by the walk (the root joined with the relative path).
    pub path: PathBuf,
    /// Path relative to the crawl root. This is what headers show.
    pub relative: PathBuf,
    /// File content split into lines, terminators removed.
    ///
    /// A trailing newline does not add an empty last line, so an empty file
    /// has no lines at all.
    pub lines: Vec<String>,
}

impl FileBlock {
    pub(crate) fn from_content(path: PathBuf, relative: PathBuf, content: &str) -> Self {
        Self {
            path,
            relative,
            lines: content.lines().map(str::to_owned).collect(),
        }
    }
}

/// A file that could not be printed, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFailure {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    pub message: String,
}

/// Counters kept while a crawl runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlSummary {
    pub printed: usize,
    pub failed: usize,
    pub filtered: usize,
}

/// Everything a finished crawl produced.
#[derive(Debug, Serialize, Deserialize)]
pub struct CrawlReport {
    /// Blocks in traversal order.
    pub blocks: Vec<FileBlock>,
    /// Per-file failures in traversal order.
    pub failures: Vec<FileFailure>,
    pub summary: CrawlSummary,
}
