use std::io::{self, Write};

use crate::memory::MemoryStore;
use crate::memory::tree::Entry;

/// Appends written bytes straight into the file entry of a [`MemoryStore`].
#[derive(Debug)]
pub struct MemoryWriter {
    store: MemoryStore,
    segments: Vec<String>,
}

impl MemoryWriter {
    pub(crate) fn new(store: MemoryStore, segments: Vec<String>) -> Self {
        Self { store, segments }
    }
}

impl Write for MemoryWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.store
            .write(|root| match root.get_mut(&self.segments) {
                Some(Entry::File { contents }) => {
                    contents.extend_from_slice(buf);
                    Ok(buf.len())
                }
                _ => Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    "file was removed while open for writing",
                )),
            })
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
