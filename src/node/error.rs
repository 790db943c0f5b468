use std::io;

use derive_more::{Display, IsVariant};
use snafu::Snafu;

/// Coarse classification of a [`FilesystemError`], stable across backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IsVariant)]
pub enum ErrorKind {
    #[display("permission denied")]
    PermissionDenied,
    #[display("read-only backend")]
    ReadOnly,
    #[display("not a file")]
    NotAFile,
    #[display("not a directory")]
    NotADirectory,
    #[display("non-existent")]
    NonExistent,
    #[display("directory not empty")]
    DirectoryNotEmpty,
    #[display("i/o failure")]
    Io,
    #[display("unsupported operation")]
    Unsupported,
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum FilesystemError {
    #[snafu(display("Permission denied for {path}"))]
    PermissionDenied { path: String, source: io::Error },
    #[snafu(display("Cannot modify {path}: backend is read-only"))]
    ReadOnly { path: String },
    #[snafu(display("{path} is not a file"))]
    NotAFile { path: String },
    #[snafu(display("{path} is not a directory"))]
    NotADirectory { path: String },
    #[snafu(display("{path} does not exist"))]
    NonExistent { path: String },
    #[snafu(display("Directory {path} is not empty"))]
    DirectoryNotEmpty { path: String },
    #[snafu(display("I/O failure on {path}"))]
    Io { path: String, source: io::Error },
    #[snafu(display("Operation '{operation}' is not supported for {path}"))]
    Unsupported {
        operation: &'static str,
        path: String,
    },
}

impl FilesystemError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FilesystemError::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            FilesystemError::ReadOnly { .. } => ErrorKind::ReadOnly,
            FilesystemError::NotAFile { .. } => ErrorKind::NotAFile,
            FilesystemError::NotADirectory { .. } => ErrorKind::NotADirectory,
            FilesystemError::NonExistent { .. } => ErrorKind::NonExistent,
            FilesystemError::DirectoryNotEmpty { .. } => ErrorKind::DirectoryNotEmpty,
            FilesystemError::Io { .. } => ErrorKind::Io,
            FilesystemError::Unsupported { .. } => ErrorKind::Unsupported,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            FilesystemError::PermissionDenied { path, .. }
            | FilesystemError::ReadOnly { path }
            | FilesystemError::NotAFile { path }
            | FilesystemError::NotADirectory { path }
            | FilesystemError::NonExistent { path }
            | FilesystemError::DirectoryNotEmpty { path }
            | FilesystemError::Io { path, .. }
            | FilesystemError::Unsupported { path, .. } => path,
        }
    }

    /// Classifies an error coming out of `std::io` for the entry at `path`.
    pub fn from_io(path: impl Into<String>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::NotFound => FilesystemError::NonExistent { path },
            io::ErrorKind::PermissionDenied => FilesystemError::PermissionDenied { path, source },
            io::ErrorKind::ReadOnlyFilesystem => FilesystemError::ReadOnly { path },
            io::ErrorKind::IsADirectory => FilesystemError::NotAFile { path },
            io::ErrorKind::NotADirectory => FilesystemError::NotADirectory { path },
            io::ErrorKind::DirectoryNotEmpty => FilesystemError::DirectoryNotEmpty { path },
            _ => FilesystemError::Io { path, source },
        }
    }
}
