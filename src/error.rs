use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while crawling.
///
/// Fatal variants stop the crawl before anything is printed. The rest are
/// tied to a single file or directory entry and are yielded by the stream
/// without ending it; see [`CrawlError::is_fatal`].
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("root path does not exist: {0}")]
    RootNotFound(PathBuf),
    #[error("root path is not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("cannot access root path {path}: {source}")]
    RootUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid ignore pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
    #[error("cannot write output to {target}: {source}")]
    Output {
        target: String,
        source: std::io::Error,
    },
    #[error("{path}: permission denied")]
    PermissionDenied { path: PathBuf },
    #[error("{path}: file vanished before it could be read")]
    NotFound { path: PathBuf },
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{path}: binary content")]
    Binary { path: PathBuf },
    #[error("{path}: not valid UTF-8 text ({source})")]
    Decode {
        path: PathBuf,
        source: std::string::FromUtf8Error,
    },
    #[error("walk error: {0}")]
    Walk(String),
}

impl CrawlError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => CrawlError::PermissionDenied { path },
            std::io::ErrorKind::NotFound => CrawlError::NotFound { path },
            _ => CrawlError::Io { path, source },
        }
    }

    pub(crate) fn output(target: impl Into<String>, source: std::io::Error) -> Self {
        CrawlError::Output {
            target: target.into(),
            source,
        }
    }

    /// Whether this error ends the whole run rather than a single file.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            CrawlError::RootNotFound(_)
                | CrawlError::NotADirectory(_)
                | CrawlError::RootUnreadable { .. }
                | CrawlError::InvalidPattern { .. }
                | CrawlError::Output { .. }
        )
    }

    /// The file or directory a per-file error refers to, when known.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            CrawlError::RootNotFound(path) | CrawlError::NotADirectory(path) => Some(path.as_path()),
            CrawlError::RootUnreadable { path, .. }
            | CrawlError::PermissionDenied { path }
            | CrawlError::NotFound { path }
            | CrawlError::Io { path, .. }
            | CrawlError::Binary { path }
            | CrawlError::Decode { path, .. } => Some(path.as_path()),
            CrawlError::InvalidPattern { .. } | CrawlError::Output { .. } | CrawlError::Walk(_) => {
                None
            }
        }
    }
}
