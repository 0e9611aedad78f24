use crate::error::CrawlError;
use crate::options::{BinaryDetection, CrawlOptions, ExtensionFilter};
use crate::types::{CrawlReport, CrawlSummary, FileBlock, FileFailure};
use ignore::WalkBuilder;
use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

const SNIFF_LEN: u64 = 4096;

struct Walker {
    inner: ignore::Walk,
}
impl Walker {
    fn new(options: &CrawlOptions) -> Result<Self, CrawlError> {
        let mut builder = WalkBuilder::new(&options.root);
        builder
            .standard_filters(false)
            .git_ignore(options.respect_gitignore)
            .git_exclude(options.respect_gitignore)
            .require_git(false)
            .hidden(!options.include_hidden)
            .max_depth(options.max_depth)
            .follow_links(options.follow_links)
            .sort_by_file_name(|a, b| a.cmp(b));
        let matcher = if !options.ignore_patterns.is_empty() {
            let mut glob_builder = globset::GlobSetBuilder::new();
            for pattern in &options.ignore_patterns {
                let glob = globset::Glob::new(pattern).map_err(|e| CrawlError::InvalidPattern {
                    pattern: pattern.clone(),
                    message: e.to_string(),
                })?;
                glob_builder.add(glob);
            }
            Some(glob_builder.build().map_err(|e| CrawlError::InvalidPattern {
                pattern: options.ignore_patterns.join(", "),
                message: e.to_string(),
            })?)
        } else {
            None
        };
        let skip: Vec<PathBuf> = options.skip_paths.iter().map(|p| resolve_path(p)).collect();
        if matcher.is_some() || !skip.is_empty() {
            let root = options.root.clone();
            let resolved_root = resolve_path(&options.root);
            builder.filter_entry(move |entry| {
                let relative = entry.path().strip_prefix(&root).unwrap_or(entry.path());
                if matcher.as_ref().is_some_and(|m| m.is_match(relative)) {
                    return false;
                }
                skip.is_empty() || !skip.contains(&resolved_root.join(relative))
            });
        }
        Ok(Self {
            inner: builder.build(),
        })
    }
}

/// Absolute form of `path` with its longest existing prefix canonicalized.
/// Components that do not exist yet are appended unchanged.
fn resolve_path(path: &Path) -> PathBuf {
    let mut existing = path;
    let mut missing = Vec::new();
    loop {
        if let Ok(mut resolved) = existing.canonicalize() {
            resolved.extend(missing.iter().rev());
            return resolved;
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = if parent.as_os_str().is_empty() {
                    Path::new(".")
                } else {
                    parent
                };
            }
            _ => return path.to_path_buf(),
        }
    }
}

/// Fails unless `root` exists and is a directory.
pub fn validate_root(root: &Path) -> Result<(), CrawlError> {
    let metadata = fs::metadata(root).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => CrawlError::RootNotFound(root.to_path_buf()),
        _ => CrawlError::RootUnreadable {
            path: root.to_path_buf(),
            source: e,
        },
    })?;
    if !metadata.is_dir() {
        return Err(CrawlError::NotADirectory(root.to_path_buf()));
    }
    Ok(())
}

fn read_text(path: &Path, binary_detection: BinaryDetection) -> Result<String, CrawlError> {
    let file = File::open(path).map_err(|e| CrawlError::io(path, e))?;
    let mut reader = BufReader::new(file);
    let mut bytes = Vec::with_capacity(SNIFF_LEN as usize);
    reader
        .by_ref()
        .take(SNIFF_LEN)
        .read_to_end(&mut bytes)
        .map_err(|e| CrawlError::io(path, e))?;
    let is_binary = match binary_detection {
        BinaryDetection::Simple => bytes.contains(&0),
        BinaryDetection::Accurate => content_inspector::inspect(&bytes).is_binary(),
        BinaryDetection::None => false,
    };
    if is_binary {
        return Err(CrawlError::Binary {
            path: path.to_path_buf(),
        });
    }
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| CrawlError::io(path, e))?;
    String::from_utf8(bytes).map_err(|source| CrawlError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Lazy, ordered sequence of blocks for every file that passes the filters.
///
/// Per-file problems come out as `Err` items and the stream carries on with
/// the next entry. Each file is read to the end and closed before its item is
/// returned, so a block is never partial.
pub struct CrawlStream {
    walk: ignore::Walk,
    root: PathBuf,
    extensions: ExtensionFilter,
    binary_detection: BinaryDetection,
    summary: CrawlSummary,
}

impl CrawlStream {
    pub fn new(options: CrawlOptions) -> Result<Self, CrawlError> {
        validate_root(&options.root)?;
        let walker = Walker::new(&options)?;
        tracing::info!(root = %options.root.display(), "starting crawl");
        Ok(Self {
            walk: walker.inner,
            root: options.root,
            extensions: options.extensions,
            binary_detection: options.binary_detection,
            summary: CrawlSummary::default(),
        })
    }

    /// Counts so far. Final once the stream is exhausted.
    pub fn summary(&self) -> CrawlSummary {
        self.summary
    }

    fn relative_path(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.to_path_buf())
    }
}

impl Iterator for CrawlStream {
    type Item = Result<FileBlock, CrawlError>;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.walk.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    self.summary.failed += 1;
                    tracing::debug!("walk error: {}", e);
                    return Some(Err(CrawlError::Walk(e.to_string())));
                }
            };
            if entry.depth() == 0 || !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }
            let path = entry.into_path();
            if !self.extensions.allows(&path) {
                self.summary.filtered += 1;
                tracing::debug!("excluded by extension: {}", path.display());
                continue;
            }
            let relative = self.relative_path(&path);
            let result = read_text(&path, self.binary_detection)
                .map(|content| FileBlock::from_content(path, relative, &content));
            match &result {
                Ok(block) => {
                    self.summary.printed += 1;
                    tracing::trace!(lines = block.lines.len(), "read {}", block.relative.display());
                }
                Err(e) => {
                    self.summary.failed += 1;
                    tracing::debug!("skipping file: {}", e);
                }
            }
            return Some(result);
        }
    }
}

/// Starts a crawl. Fails only on fatal errors.
pub fn crawl(options: CrawlOptions) -> Result<CrawlStream, CrawlError> {
    CrawlStream::new(options)
}

/// Runs a crawl to completion and collects every block and failure.
pub fn crawl_all(options: CrawlOptions) -> Result<CrawlReport, CrawlError> {
    let mut stream = crawl(options)?;
    let mut blocks = Vec::new();
    let mut failures = Vec::new();
    for item in stream.by_ref() {
        match item {
            Ok(block) => blocks.push(block),
            Err(e) => failures.push(FileFailure {
                path: e.path().map(Path::to_path_buf),
                message: e.to_string(),
            }),
        }
    }
    let summary = stream.summary();
    tracing::info!(
        printed = summary.printed,
        failed = summary.failed,
        filtered = summary.filtered,
        "crawl finished"
    );
    Ok(CrawlReport {
        blocks,
        failures,
        summary,
    })
}
