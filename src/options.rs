use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryDetection {
    Simple,
    Accurate,
    None,
}

/// Which files survive extension filtering.
///
/// An inclusion list wins over an exclusion list: when it is non-empty only
/// files carrying one of its extensions are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionFilter {
    pub include: BTreeSet<String>,
    pub exclude: BTreeSet<String>,
}

impl ExtensionFilter {
    pub fn allows(&self, path: &Path) -> bool {
        let ext = extension_of(path);
        if !self.include.is_empty() {
            return ext.is_some_and(|e| self.include.contains(&e));
        }
        match ext {
            Some(e) => !self.exclude.contains(&e),
            None => true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }
}

/// Lowercased text after the last `.` of the file name, if there is one.
pub fn extension_of(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_string_lossy();
    name.rsplit_once('.').map(|(_, ext)| ext.to_lowercase())
}

/// Splits user input such as `"svg, .PNG jpg"` into normalised extensions.
pub fn parse_extensions<I, S>(items: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .flat_map(|item| {
            item.as_ref()
                .split(|c: char| c == ',' || c.is_whitespace())
                .map(|part| part.trim().trim_start_matches('.').to_lowercase())
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlOptions {
    pub root: PathBuf,
    pub extensions: ExtensionFilter,
    pub respect_gitignore: bool,
    pub max_depth: Option<usize>,
    pub include_hidden: bool,
    pub follow_links: bool,
    pub ignore_patterns: Vec<String>,
    /// Exact paths never visited, e.g. the file the output is written to.
    pub skip_paths: Vec<PathBuf>,
    pub binary_detection: BinaryDetection,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            extensions: ExtensionFilter::default(),
            respect_gitignore: false,
            max_depth: None,
            include_hidden: true,
            follow_links: false,
            ignore_patterns: Vec::new(),
            skip_paths: Vec::new(),
            binary_detection: BinaryDetection::Simple,
        }
    }
}

#[derive(Debug, Default)]
pub struct CrawlBuilder {
    options: CrawlOptions,
}

impl CrawlBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            options: CrawlOptions {
                root: root.into(),
                ..Default::default()
            },
        }
    }
    pub fn exclude_extensions<I, S>(mut self, exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.options.extensions.exclude.extend(parse_extensions(exts));
        self
    }
    pub fn include_extensions<I, S>(mut self, exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.options.extensions.include.extend(parse_extensions(exts));
        self
    }
    pub fn respect_gitignore(mut self, yes: bool) -> Self {
        self.options.respect_gitignore = yes;
        self
    }
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.options.max_depth = Some(depth);
        self
    }
    pub fn no_limit_depth(mut self) -> Self {
        self.options.max_depth = None;
        self
    }
    pub fn include_hidden(mut self, yes: bool) -> Self {
        self.options.include_hidden = yes;
        self
    }
    pub fn follow_links(mut self, yes: bool) -> Self {
        self.options.follow_links = yes;
        self
    }
    pub fn ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.options.ignore_patterns = patterns;
        self
    }
    pub fn skip_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.skip_paths.push(path.into());
        self
    }
    pub fn binary_detection(mut self, method: BinaryDetection) -> Self {
        self.options.binary_detection = method;
        self
    }
    pub fn build(self) -> CrawlOptions {
        self.options
    }
}
