use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// What kind of path an operation expected to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    Directory,
    File,
}

impl fmt::Display for PathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Directory => "Directory",
            Self::File => "File",
        })
    }
}

/// The operation an I/O failure happened in, used to word the error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    Search,
    Organize,
    Read,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::List => "list files",
            Self::Search => "search files",
            Self::Organize => "organize files",
            Self::Read => "read file",
        })
    }
}

#[derive(Debug, Error)]
pub enum FsError {
    #[error("{kind} {} does not exist", path.display())]
    NotFound { kind: PathKind, path: PathBuf },
    #[error("{} is not a file", path.display())]
    NotAFile { path: PathBuf },
    #[error("File type {extension} not supported for reading. Supported types: {}", supported.join(", "))]
    UnsupportedType {
        extension: String,
        supported: Vec<String>,
    },
    #[error("Failed to {action}: {source}")]
    Io {
        action: Action,
        #[source]
        source: io::Error,
    },
    #[error("Failed to organize files: {source} ({moved} moved before the failure)")]
    Interrupted {
        moved: usize,
        #[source]
        source: io::Error,
    },
}

impl FsError {
    pub fn io(action: Action) -> impl FnOnce(io::Error) -> Self {
        move |source| Self::Io { action, source }
    }
}

pub type FsResult<T> = Result<T, FsError>;
