use hashlink::LinkedHashMap;
use snafu::Snafu;

use crate::node::NodeKind;

/// One entry of an in-memory tree. Directories keep their children in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    File {
        contents: Vec<u8>,
    },
    Directory {
        children: LinkedHashMap<String, Entry>,
    },
}

impl Entry {
    pub fn root() -> Self {
        Entry::Directory {
            children: LinkedHashMap::new(),
        }
    }

    pub fn empty_file() -> Self {
        Entry::File {
            contents: Vec::new(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Entry::File { .. } => NodeKind::File,
            Entry::Directory { .. } => NodeKind::Directory,
        }
    }

    pub fn get(&self, segments: &[String]) -> Option<&Entry> {
        segments
            .iter()
            .try_fold(self, |current, segment| match current {
                Entry::Directory { children } => children.get(segment),
                Entry::File { .. } => None,
            })
    }

    pub fn get_mut(&mut self, segments: &[String]) -> Option<&mut Entry> {
        segments
            .iter()
            .try_fold(self, |current, segment| match current {
                Entry::Directory { children } => children.get_mut(segment),
                Entry::File { .. } => None,
            })
    }

    /// Walks `segments`, creating every missing directory on the way, and returns the
    /// children of the last one.
    pub fn create_directories(
        &mut self,
        segments: &[String],
    ) -> Result<&mut LinkedHashMap<String, Entry>, CannotDescendIntoFileError> {
        let mut current = self;

        for (depth, segment) in segments.iter().enumerate() {
            current = match current {
                Entry::Directory { children } => children
                    .entry(segment.clone())
                    .or_insert_with(Entry::root),
                Entry::File { .. } => return CannotDescendIntoFileSnafu { depth }.fail(),
            };
        }

        match current {
            Entry::Directory { children } => Ok(children),
            Entry::File { .. } => CannotDescendIntoFileSnafu {
                depth: segments.len(),
            }
            .fail(),
        }
    }
}

impl Default for Entry {
    fn default() -> Self {
        Self::root()
    }
}

/// A file sits where a directory was needed. `depth` is the number of leading
/// segments that address that file.
#[derive(Debug, Snafu)]
#[snafu(display("Cannot descend into a file at depth {depth}"))]
pub struct CannotDescendIntoFileError {
    pub depth: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(path: &str) -> Vec<String> {
        path.split('/').map(str::to_string).collect()
    }

    #[test]
    fn create_directories_builds_intermediate_directories() {
        let mut root = Entry::root();

        root.create_directories(&segments("path/to/dir"))
            .expect("Failed to create directories");

        assert_eq!(
            root.get(&segments("path/to")).map(Entry::kind),
            Some(NodeKind::Directory)
        );
        assert_eq!(
            root.get(&segments("path/to/dir")).map(Entry::kind),
            Some(NodeKind::Directory)
        );
    }

    #[test]
    fn create_directories_reports_file_depth() {
        let mut root = Entry::root();
        root.create_directories(&segments("a"))
            .unwrap()
            .insert("file".into(), Entry::empty_file());

        let error = root
            .create_directories(&segments("a/file/below"))
            .unwrap_err();

        assert_eq!(error.depth, 2);
    }

    #[test]
    fn create_directories_on_existing_file_fails() {
        let mut root = Entry::root();
        root.create_directories(&[])
            .unwrap()
            .insert("file".into(), Entry::empty_file());

        let error = root.create_directories(&segments("file")).unwrap_err();

        assert_eq!(error.depth, 1);
    }

    #[test]
    fn get_through_a_file_is_none() {
        let mut root = Entry::root();
        root.create_directories(&[])
            .unwrap()
            .insert("file".into(), Entry::empty_file());

        assert!(root.get(&segments("file/child")).is_none());
        assert!(root.get_mut(&segments("file/child")).is_none());
    }

    #[test]
    fn children_keep_insertion_order() {
        let mut root = Entry::root();
        let children = root.create_directories(&[]).unwrap();
        for name in ["zeta", "alpha", "mid"] {
            children.insert(name.into(), Entry::empty_file());
        }

        match &root {
            Entry::Directory { children } => {
                let names: Vec<_> = children.keys().cloned().collect();
                assert_eq!(names, ["zeta", "alpha", "mid"]);
            }
            Entry::File { .. } => panic!("Root should be a directory"),
        }
    }

    #[test]
    fn empty_path_addresses_the_root() {
        let root = Entry::root();
        assert_eq!(root.get(&[]), Some(&root));
    }
}
