use std::fmt::Debug;
use std::io::{Read, Write};
use std::path::PathBuf;

use derive_more::{Display, IsVariant};

use crate::node::FilesystemError;

/// Platform-native reference a node can be converted into, when its backend has one.
pub type NativeHandle = PathBuf;

/// Scoped byte stream for reading a file node. Dropping it releases the backing handle.
pub type ReadStream = Box<dyn Read + Send>;

/// Scoped byte stream for writing a file node. Dropping it releases the backing handle.
pub type WriteStream = Box<dyn Write + Send>;

/// What a node currently is in its backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IsVariant)]
pub enum NodeKind {
    #[display("file")]
    File,
    #[display("directory")]
    Directory,
    #[display("missing")]
    Missing,
}

/// How [`Node::remove`] treats a directory that still has children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum RemovePolicy {
    /// Only files and empty directories are removed.
    #[default]
    #[display("empty-only")]
    EmptyOnly,
    /// Directories are removed together with everything below them.
    #[display("recursive")]
    Recursive,
}

/// A single file or directory in some filesystem-like structure.
///
/// A node is a lightweight view: it holds an address into its backing store and
/// nothing else. Every query goes to the store at call time, so two calls may
/// observe different states if the store is changed in between.
pub trait Node: Debug + Send + Sync {
    /// Final path segment of this node.
    fn name(&self) -> String;

    /// Absolute identifier of this node. Exact form depends on the backend.
    fn path(&self) -> String;

    /// Observes the current kind of this node.
    fn kind(&self) -> NodeKind;

    fn is_file(&self) -> bool {
        self.kind().is_file()
    }

    fn is_directory(&self) -> bool {
        self.kind().is_directory()
    }

    fn exists(&self) -> bool {
        !self.kind().is_missing()
    }

    /// Creates this directory and any missing ancestors.
    ///
    /// Succeeds when the directory already exists.
    fn make_directories(&self) -> Result<(), FilesystemError>;

    /// Ensures this node exists as a file, creating ancestors as needed.
    ///
    /// Existing content is kept.
    fn touch(&self) -> Result<(), FilesystemError>;

    /// Deletes this entry, following the backend's [`RemovePolicy`] for directories.
    fn remove(&self) -> Result<(), FilesystemError>;

    /// Size of the file in bytes.
    fn size(&self) -> Result<u64, FilesystemError>;

    /// Opens the file for reading.
    ///
    /// A missing node fails with [`ErrorKind::NonExistent`] and a directory with
    /// [`ErrorKind::NotAFile`].
    ///
    /// [`ErrorKind::NonExistent`]: crate::node::ErrorKind::NonExistent
    /// [`ErrorKind::NotAFile`]: crate::node::ErrorKind::NotAFile
    fn open_for_reading(&self) -> Result<ReadStream, FilesystemError>;

    /// Opens the file for writing, truncating it or creating it inside an existing parent.
    fn open_for_writing(&self) -> Result<WriteStream, FilesystemError>;

    /// Names of the immediate children at the time of the call.
    ///
    /// Files and missing nodes have no children.
    fn children(&self) -> Result<Vec<String>, FilesystemError>;

    /// Handle to the child called `name`. Existence is not checked.
    ///
    /// `name` has to be a single path component. Anything else (empty, `.`, `..`,
    /// absolute or containing a separator) gives a node that never exists and
    /// whose operations fail with an [`ErrorKind::Io`] error of kind `InvalidInput`.
    ///
    /// [`ErrorKind::Io`]: crate::node::ErrorKind::Io
    fn child(&self, name: &str) -> Box<dyn Node>;

    /// Platform path behind this node.
    ///
    /// Backends without one fail with [`ErrorKind::Unsupported`].
    ///
    /// [`ErrorKind::Unsupported`]: crate::node::ErrorKind::Unsupported
    fn as_native_handle(&self) -> Result<NativeHandle, FilesystemError>;
}

impl Node for Box<dyn Node> {
    fn name(&self) -> String {
        (**self).name()
    }

    fn path(&self) -> String {
        (**self).path()
    }

    fn kind(&self) -> NodeKind {
        (**self).kind()
    }

    fn make_directories(&self) -> Result<(), FilesystemError> {
        (**self).make_directories()
    }

    fn touch(&self) -> Result<(), FilesystemError> {
        (**self).touch()
    }

    fn remove(&self) -> Result<(), FilesystemError> {
        (**self).remove()
    }

    fn size(&self) -> Result<u64, FilesystemError> {
        (**self).size()
    }

    fn open_for_reading(&self) -> Result<ReadStream, FilesystemError> {
        (**self).open_for_reading()
    }

    fn open_for_writing(&self) -> Result<WriteStream, FilesystemError> {
        (**self).open_for_writing()
    }

    fn children(&self) -> Result<Vec<String>, FilesystemError> {
        (**self).children()
    }

    fn child(&self, name: &str) -> Box<dyn Node> {
        (**self).child(name)
    }

    fn as_native_handle(&self) -> Result<NativeHandle, FilesystemError> {
        (**self).as_native_handle()
    }
}
