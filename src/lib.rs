//! # repo-crawler
//!
//! `repo_crawler` walks a directory tree in a fixed order and turns every
//! file into a printable block: a `=== path ===` header followed by the
//! file's lines, each prefixed with its 1-based number.
//!
//! Files can be filtered by extension (exclusion or inclusion list, case
//! insensitive), by glob pattern and, optionally, by `.gitignore`. Files that
//! cannot be read as text are reported individually and never stop the crawl.
//!
//! # Example
//!
//! ```no_run
//! use repo_crawler::{CrawlBuilder, RenderOptions, crawl, output};
//!
//! let options = CrawlBuilder::new(".")
//!     .exclude_extensions(["svg", "png"])
//!     .build();
//!
//! let stream = crawl(options).expect("root must be a directory");
//! let stdout = std::io::stdout();
//! let stderr = std::io::stderr();
//! let summary = output::write_crawl(
//!     stream,
//!     &RenderOptions::default(),
//!     &mut stdout.lock(),
//!     &mut stderr.lock(),
//!     "stdout",
//! )
//! .expect("output failed");
//! eprintln!("{} files printed", summary.printed);
//! ```

mod engine;
mod error;
mod options;
pub mod output;
mod types;

pub use engine::{CrawlStream, crawl, crawl_all, validate_root};
pub use error::CrawlError;
pub use options::{
    BinaryDetection, CrawlBuilder, CrawlOptions, ExtensionFilter, extension_of, parse_extensions,
};
pub use output::{OutputFormat, RenderOptions};
pub use types::{CrawlReport, CrawlSummary, FileBlock, FileFailure};
