use tracing::debug;

use crate::node::error::ReadOnlySnafu;
use crate::node::{FilesystemError, NativeHandle, Node, NodeKind, ReadStream, WriteStream};

/// View over another node that refuses every mutation.
///
/// Children obtained through [`Node::child`] are wrapped as well, so a whole
/// subtree reached from a read-only root stays read-only.
#[derive(Debug)]
pub struct ReadOnlyNode {
    inner: Box<dyn Node>,
}

impl ReadOnlyNode {
    pub fn new(inner: impl Node + 'static) -> Self {
        Self {
            inner: Box::new(inner),
        }
    }

    fn refuse<T>(&self, operation: &str) -> Result<T, FilesystemError> {
        debug!("Refusing {operation} on read-only node {}", self.inner.path());
        ReadOnlySnafu {
            path: self.inner.path(),
        }
        .fail()
    }
}

impl Node for ReadOnlyNode {
    fn name(&self) -> String {
        self.inner.name()
    }

    fn path(&self) -> String {
        self.inner.path()
    }

    fn kind(&self) -> NodeKind {
        self.inner.kind()
    }

    fn make_directories(&self) -> Result<(), FilesystemError> {
        self.refuse("make_directories")
    }

    fn touch(&self) -> Result<(), FilesystemError> {
        self.refuse("touch")
    }

    fn remove(&self) -> Result<(), FilesystemError> {
        self.refuse("remove")
    }

    fn size(&self) -> Result<u64, FilesystemError> {
        self.inner.size()
    }

    fn open_for_reading(&self) -> Result<ReadStream, FilesystemError> {
        self.inner.open_for_reading()
    }

    fn open_for_writing(&self) -> Result<WriteStream, FilesystemError> {
        self.refuse("open_for_writing")
    }

    fn children(&self) -> Result<Vec<String>, FilesystemError> {
        self.inner.children()
    }

    fn child(&self, name: &str) -> Box<dyn Node> {
        Box::new(ReadOnlyNode {
            inner: self.inner.child(name),
        })
    }

    fn as_native_handle(&self) -> Result<NativeHandle, FilesystemError> {
        self.inner.as_native_handle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::node::{ErrorKind, NodeExt};

    fn populated_read_only_root() -> ReadOnlyNode {
        let root = MemoryStore::new().root();
        root.join("docs").make_directories().unwrap();
        root.join("docs").join("readme.txt").write_bytes(b"hello").unwrap();
        ReadOnlyNode::new(root)
    }

    #[test]
    fn read_only_node_refuses_every_mutation() {
        let root = populated_read_only_root();
        let file = root.child("docs").child("readme.txt");
        let fresh = root.child("fresh");

        assert_eq!(fresh.make_directories().unwrap_err().kind(), ErrorKind::ReadOnly);
        assert_eq!(fresh.touch().unwrap_err().kind(), ErrorKind::ReadOnly);
        assert_eq!(file.remove().unwrap_err().kind(), ErrorKind::ReadOnly);
        assert_eq!(
            file.open_for_writing().err().map(|e| e.kind()),
            Some(ErrorKind::ReadOnly)
        );

        assert!(!fresh.exists());
        assert!(file.exists());
    }

    #[test]
    fn read_only_node_still_reads() {
        let root = populated_read_only_root();
        let file = root.child("docs").child("readme.txt");

        assert_eq!(root.children().unwrap(), vec!["docs".to_string()]);
        assert!(file.is_file());
        assert_eq!(file.size().unwrap(), 5);
        assert_eq!(file.read_to_string().unwrap(), "hello");
        assert_eq!(file.path(), "/docs/readme.txt");
    }

    #[test]
    fn read_only_root_cannot_read_outside_itself() {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp directory");
        let inner = temp_dir.path().join("inner");
        std::fs::create_dir(&inner).expect("Failed to create inner directory");
        std::fs::write(temp_dir.path().join("secret.txt"), "hidden")
            .expect("Failed to write secret");
        let root = ReadOnlyNode::new(crate::local::LocalNode::new(&inner));

        let escaped = root.child("..").child("secret.txt");

        assert!(!escaped.exists());
        assert_eq!(
            escaped.open_for_reading().err().map(|e| e.kind()),
            Some(ErrorKind::Io)
        );
    }
}
