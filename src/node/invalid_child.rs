use std::ffi::OsStr;
use std::io;
use std::path::{Component, Path};

use crate::node::{FilesystemError, NativeHandle, Node, NodeKind, ReadStream, WriteStream};

/// Whether `name` addresses exactly one entry directly below its parent.
///
/// Rejects the empty name, `.`, `..`, absolute and prefixed paths, and anything
/// containing a separator.
pub(crate) fn is_single_component(name: &str) -> bool {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(component)), None) => component == OsStr::new(name),
        _ => false,
    }
}

/// Stand-in returned by [`Node::child`] for a name that is not a single path component.
///
/// It never exists and every operation that would touch the store fails with an
/// [`ErrorKind::Io`](crate::node::ErrorKind::Io) error of kind `InvalidInput`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InvalidChild {
    parent_path: String,
    name: String,
}

impl InvalidChild {
    pub(crate) fn new(parent_path: String, name: &str) -> Self {
        Self {
            parent_path,
            name: name.to_string(),
        }
    }

    fn reject<T>(&self) -> Result<T, FilesystemError> {
        Err(FilesystemError::Io {
            path: self.path(),
            source: io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("'{}' is not a single path component", self.name),
            ),
        })
    }
}

impl Node for InvalidChild {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn path(&self) -> String {
        let separator = if self.parent_path.ends_with('/') { "" } else { "/" };
        format!("{}{separator}{}", self.parent_path, self.name)
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Missing
    }

    fn make_directories(&self) -> Result<(), FilesystemError> {
        self.reject()
    }

    fn touch(&self) -> Result<(), FilesystemError> {
        self.reject()
    }

    fn remove(&self) -> Result<(), FilesystemError> {
        self.reject()
    }

    fn size(&self) -> Result<u64, FilesystemError> {
        self.reject()
    }

    fn open_for_reading(&self) -> Result<ReadStream, FilesystemError> {
        self.reject()
    }

    fn open_for_writing(&self) -> Result<WriteStream, FilesystemError> {
        self.reject()
    }

    fn children(&self) -> Result<Vec<String>, FilesystemError> {
        Ok(Vec::new())
    }

    fn child(&self, name: &str) -> Box<dyn Node> {
        Box::new(InvalidChild::new(self.path(), name))
    }

    fn as_native_handle(&self) -> Result<NativeHandle, FilesystemError> {
        self.reject()
    }
}
