use std::io::{Read, Write};

use snafu::ResultExt;

use crate::node::{FilesystemError, IoSnafu, Node};

/// Whole-content helpers on top of the stream operations of [`Node`].
pub trait NodeExt: Node {
    fn read_bytes(&self) -> Result<Vec<u8>, FilesystemError> {
        let mut stream = self.open_for_reading()?;
        let mut bytes = Vec::new();
        stream
            .read_to_end(&mut bytes)
            .context(IoSnafu { path: self.path() })?;
        Ok(bytes)
    }

    fn read_to_string(&self) -> Result<String, FilesystemError> {
        let mut stream = self.open_for_reading()?;
        let mut contents = String::new();
        stream
            .read_to_string(&mut contents)
            .context(IoSnafu { path: self.path() })?;
        Ok(contents)
    }

    /// Replaces the content of the file with `bytes`.
    fn write_bytes(&self, bytes: &[u8]) -> Result<(), FilesystemError> {
        let mut stream = self.open_for_writing()?;
        stream
            .write_all(bytes)
            .and_then(|_| stream.flush())
            .context(IoSnafu { path: self.path() })
    }
}

impl<N: Node + ?Sized> NodeExt for N {}
