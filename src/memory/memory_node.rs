use std::io::Cursor;

use snafu::{OptionExt, ensure};
use tracing::debug;

use crate::memory::tree::Entry;
use crate::memory::{MemoryStore, MemoryWriter};
use crate::node::{
    DirectoryNotEmptySnafu, FilesystemError, InvalidChild, NativeHandle, Node, NodeKind,
    NonExistentSnafu, NotADirectorySnafu, NotAFileSnafu, ReadStream, RemovePolicy,
    UnsupportedSnafu, WriteStream, is_single_component,
};

/// Node inside a [`MemoryStore`], addressed by its path segments from the store root.
#[derive(Debug, Clone)]
pub struct MemoryNode {
    store: MemoryStore,
    segments: Vec<String>,
    remove_policy: RemovePolicy,
}

fn display_path(segments: &[String]) -> String {
    format!("/{}", segments.join("/"))
}

impl MemoryNode {
    pub(crate) fn new(store: MemoryStore, segments: Vec<String>) -> Self {
        Self {
            store,
            segments,
            remove_policy: RemovePolicy::default(),
        }
    }

    pub fn with_remove_policy(mut self, remove_policy: RemovePolicy) -> Self {
        self.remove_policy = remove_policy;
        self
    }

    /// Appends `name` as one segment as is. [`Node::child`] checks the name first.
    pub(crate) fn join(&self, name: &str) -> MemoryNode {
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Self {
            store: self.store.clone(),
            segments,
            remove_policy: self.remove_policy,
        }
    }

    fn split_last(&self) -> Option<(&String, &[String])> {
        self.segments.split_last()
    }

    fn is_non_empty_directory(entry: &Entry) -> bool {
        matches!(entry, Entry::Directory { children } if !children.is_empty())
    }
}

impl Node for MemoryNode {
    fn name(&self) -> String {
        self.segments.last().cloned().unwrap_or_default()
    }

    fn path(&self) -> String {
        display_path(&self.segments)
    }

    fn kind(&self) -> NodeKind {
        self.store.read(|root| {
            root.get(&self.segments)
                .map(Entry::kind)
                .unwrap_or(NodeKind::Missing)
        })
    }

    fn make_directories(&self) -> Result<(), FilesystemError> {
        debug!("Creating directories {}", self.path());
        self.store.write(|root| {
            root.create_directories(&self.segments)
                .map(|_| ())
                .map_err(|e| FilesystemError::NotADirectory {
                    path: display_path(&self.segments[..e.depth]),
                })
        })
    }

    fn touch(&self) -> Result<(), FilesystemError> {
        debug!("Touching {}", self.path());
        let Some((name, parent)) = self.split_last() else {
            // the root always exists as a directory
            return NotAFileSnafu { path: self.path() }.fail();
        };

        self.store.write(|root| {
            match root.get(&self.segments) {
                Some(Entry::File { .. }) => return Ok(()),
                Some(Entry::Directory { .. }) => {
                    return NotAFileSnafu { path: self.path() }.fail();
                }
                None => {}
            }

            root.create_directories(parent)
                .map_err(|e| FilesystemError::NotADirectory {
                    path: display_path(&parent[..e.depth]),
                })?
                .insert(name.clone(), Entry::empty_file());
            Ok(())
        })
    }

    fn remove(&self) -> Result<(), FilesystemError> {
        debug!("Removing {} (policy: {})", self.path(), self.remove_policy);
        let recursive = self.remove_policy == RemovePolicy::Recursive;

        self.store.write(|root| {
            let Some((name, parent)) = self.split_last() else {
                ensure!(
                    recursive || !Self::is_non_empty_directory(root),
                    DirectoryNotEmptySnafu { path: self.path() }
                );
                *root = Entry::root();
                return Ok(());
            };

            let children = match root.get_mut(parent) {
                Some(Entry::Directory { children }) => children,
                _ => return NonExistentSnafu { path: self.path() }.fail(),
            };
            let entry = children
                .get(name)
                .context(NonExistentSnafu { path: self.path() })?;
            ensure!(
                recursive || !Self::is_non_empty_directory(entry),
                DirectoryNotEmptySnafu { path: self.path() }
            );

            children.remove(name);
            Ok(())
        })
    }

    fn size(&self) -> Result<u64, FilesystemError> {
        self.store.read(|root| match root.get(&self.segments) {
            Some(Entry::File { contents }) => Ok(contents.len() as u64),
            Some(Entry::Directory { .. }) => NotAFileSnafu { path: self.path() }.fail(),
            None => NonExistentSnafu { path: self.path() }.fail(),
        })
    }

    fn open_for_reading(&self) -> Result<ReadStream, FilesystemError> {
        let snapshot = self.store.read(|root| match root.get(&self.segments) {
            Some(Entry::File { contents }) => Ok(contents.clone()),
            Some(Entry::Directory { .. }) => NotAFileSnafu { path: self.path() }.fail(),
            None => NonExistentSnafu { path: self.path() }.fail(),
        })?;

        Ok(Box::new(Cursor::new(snapshot)))
    }

    fn open_for_writing(&self) -> Result<WriteStream, FilesystemError> {
        let Some((name, parent)) = self.split_last() else {
            return NotAFileSnafu { path: self.path() }.fail();
        };

        self.store.write(|root| match root.get_mut(parent) {
            Some(Entry::Directory { children }) => {
                ensure!(
                    !matches!(children.get(name), Some(Entry::Directory { .. })),
                    NotAFileSnafu { path: self.path() }
                );
                children.replace(name.clone(), Entry::empty_file());
                Ok(())
            }
            Some(Entry::File { .. }) => NotADirectorySnafu {
                path: display_path(parent),
            }
            .fail(),
            None => NonExistentSnafu {
                path: display_path(parent),
            }
            .fail(),
        })?;

        Ok(Box::new(MemoryWriter::new(
            self.store.clone(),
            self.segments.clone(),
        )))
    }

    fn children(&self) -> Result<Vec<String>, FilesystemError> {
        Ok(self.store.read(|root| match root.get(&self.segments) {
            Some(Entry::Directory { children }) => children.keys().cloned().collect(),
            _ => Vec::new(),
        }))
    }

    fn child(&self, name: &str) -> Box<dyn Node> {
        if !is_single_component(name) {
            debug!("Rejecting child name '{name}' of {}", self.path());
            return Box::new(InvalidChild::new(self.path(), name));
        }
        Box::new(self.join(name))
    }

    fn as_native_handle(&self) -> Result<NativeHandle, FilesystemError> {
        UnsupportedSnafu {
            operation: "as_native_handle",
            path: self.path(),
        }
        .fail()
    }
}
