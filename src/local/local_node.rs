use std::fs::{self, File, OpenOptions};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use snafu::ensure;
use tracing::{debug, trace};

use crate::ext::BestEffortPathExt;
use crate::node::{
    FilesystemError, InvalidChild, NativeHandle, Node, NodeKind, NotADirectorySnafu,
    NotAFileSnafu, ReadStream, RemovePolicy, WriteStream, is_single_component,
};

/// Node backed by the local filesystem through `std::fs`.
///
/// Symbolic links are followed when observing a node, so a dangling link is
/// missing and [`Node::remove`] reports it as non-existent. [`Node::touch`] and
/// [`Node::open_for_writing`] on a dangling link create the file it points to.
/// Removing a link deletes the link itself and never its target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalNode {
    path: PathBuf,
    remove_policy: RemovePolicy,
}

impl LocalNode {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            remove_policy: RemovePolicy::default(),
        }
    }

    pub fn with_remove_policy(mut self, remove_policy: RemovePolicy) -> Self {
        self.remove_policy = remove_policy;
        self
    }

    pub fn remove_policy(&self) -> RemovePolicy {
        self.remove_policy
    }

    /// Appends `name` to the path as is. [`Node::child`] checks the name first.
    pub(crate) fn join(&self, name: &str) -> LocalNode {
        Self {
            path: self.path.join(name),
            remove_policy: self.remove_policy,
        }
    }

    pub fn as_path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> FilesystemError {
        FilesystemError::from_io(self.path(), source)
    }

    fn ensure_not_directory(&self) -> Result<(), FilesystemError> {
        ensure!(!self.path.is_dir(), NotAFileSnafu { path: self.path() });
        Ok(())
    }

    fn create_parent(&self) -> Result<(), FilesystemError> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => create_dir_all(parent),
            _ => Ok(()),
        }
    }
}

/// `fs::create_dir_all` with a file in the way reported as [`ErrorKind::NotADirectory`].
///
/// [`ErrorKind::NotADirectory`]: crate::node::ErrorKind::NotADirectory
fn create_dir_all(path: &Path) -> Result<(), FilesystemError> {
    match fs::create_dir_all(path) {
        Ok(()) => Ok(()),
        // create_dir_all reports AlreadyExists when a file sits at the target
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => NotADirectorySnafu {
            path: path.best_effort_path_display(),
        }
        .fail(),
        Err(e) => Err(FilesystemError::from_io(path.best_effort_path_display(), e)),
    }
}

impl Node for LocalNode {
    fn name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    fn path(&self) -> String {
        self.path.best_effort_path_display()
    }

    fn kind(&self) -> NodeKind {
        match fs::metadata(&self.path) {
            Ok(metadata) if metadata.is_dir() => NodeKind::Directory,
            Ok(_) => NodeKind::File,
            Err(e) => {
                trace!("Treating {} as missing: {e}", self.path.display());
                NodeKind::Missing
            }
        }
    }

    fn make_directories(&self) -> Result<(), FilesystemError> {
        debug!("Creating directories {}", self.path.display());
        create_dir_all(&self.path)
    }

    fn touch(&self) -> Result<(), FilesystemError> {
        debug!("Touching {}", self.path.display());
        self.ensure_not_directory()?;
        self.create_parent()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;
        file.set_modified(SystemTime::now())
            .map_err(|e| self.io_error(e))
    }

    fn remove(&self) -> Result<(), FilesystemError> {
        let metadata = fs::metadata(&self.path).map_err(|e| self.io_error(e))?;
        let is_link = fs::symlink_metadata(&self.path)
            .is_ok_and(|link_metadata| link_metadata.file_type().is_symlink());
        debug!(
            "Removing {} (policy: {})",
            self.path.display(),
            self.remove_policy
        );

        let result = if is_link || !metadata.is_dir() {
            fs::remove_file(&self.path)
        } else {
            match self.remove_policy {
                RemovePolicy::EmptyOnly => fs::remove_dir(&self.path),
                RemovePolicy::Recursive => fs::remove_dir_all(&self.path),
            }
        };

        result.map_err(|e| self.io_error(e))
    }

    fn size(&self) -> Result<u64, FilesystemError> {
        let metadata = fs::metadata(&self.path).map_err(|e| self.io_error(e))?;
        ensure!(!metadata.is_dir(), NotAFileSnafu { path: self.path() });
        Ok(metadata.len())
    }

    fn open_for_reading(&self) -> Result<ReadStream, FilesystemError> {
        self.ensure_not_directory()?;
        let file = File::open(&self.path).map_err(|e| self.io_error(e))?;
        trace!("Opened {} for reading", self.path.display());
        Ok(Box::new(BufReader::new(file)))
    }

    fn open_for_writing(&self) -> Result<WriteStream, FilesystemError> {
        self.ensure_not_directory()?;
        let file = File::create(&self.path).map_err(|e| self.io_error(e))?;
        trace!("Opened {} for writing", self.path.display());
        Ok(Box::new(file))
    }

    fn children(&self) -> Result<Vec<String>, FilesystemError> {
        if !self.path.is_dir() {
            return Ok(Vec::new());
        }

        fs::read_dir(&self.path)
            .and_then(|entries| {
                entries
                    .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
                    .collect::<Result<Vec<_>, _>>()
            })
            .map_err(|e| self.io_error(e))
    }

    fn child(&self, name: &str) -> Box<dyn Node> {
        if !is_single_component(name) {
            debug!("Rejecting child name '{name}' of {}", self.path.display());
            return Box::new(InvalidChild::new(self.path(), name));
        }
        Box::new(self.join(name))
    }

    fn as_native_handle(&self) -> Result<NativeHandle, FilesystemError> {
        Ok(self.path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{ErrorKind, NodeExt};
    use std::io::Write;
    use tempfile::TempDir;

    fn temp_root() -> (TempDir, LocalNode) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = LocalNode::new(temp_dir.path());
        (temp_dir, root)
    }

    #[test]
    fn name_is_the_final_segment() {
        let node = LocalNode::new("/var/log/syslog.1");
        assert_eq!(node.name(), "syslog.1");
    }

    #[test]
    fn root_name_falls_back_to_the_path() {
        assert_eq!(LocalNode::new("/").name(), "/");
    }

    #[test]
    fn path_is_absolute_even_before_creation() {
        let (_temp_dir, root) = temp_root();
        let missing = root.join("later").join("file.txt");

        let path = PathBuf::from(missing.path());

        assert!(path.is_absolute());
        assert!(path.ends_with("later/file.txt"));
    }

    #[test]
    fn touch_keeps_existing_content() {
        let (_temp_dir, root) = temp_root();
        let file = root.join("notes.txt");
        file.write_bytes(b"keep me").unwrap();

        file.touch().unwrap();

        assert_eq!(file.read_bytes().unwrap(), b"keep me");
    }

    #[test]
    fn touch_creates_missing_ancestors() {
        let (_temp_dir, root) = temp_root();
        let file = root.join("a").join("b").join("c.txt");

        file.touch().unwrap();

        assert!(file.is_file());
        assert!(root.join("a").join("b").is_directory());
    }

    #[test]
    fn touch_on_directory_fails_with_not_a_file() {
        let (_temp_dir, root) = temp_root();
        let dir = root.join("dir");
        dir.make_directories().unwrap();

        assert_eq!(dir.touch().unwrap_err().kind(), ErrorKind::NotAFile);
    }

    #[test]
    fn make_directories_over_a_file_fails_with_not_a_directory() {
        let (_temp_dir, root) = temp_root();
        let file = root.join("plain");
        file.touch().unwrap();

        assert_eq!(
            file.make_directories().unwrap_err().kind(),
            ErrorKind::NotADirectory
        );
    }

    #[test]
    fn open_for_writing_truncates() {
        let (_temp_dir, root) = temp_root();
        let file = root.join("data.bin");
        file.write_bytes(&[9, 9, 9, 9, 9]).unwrap();

        {
            let mut stream = file.open_for_writing().unwrap();
            stream.write_all(&[1]).unwrap();
        }

        assert_eq!(file.size().unwrap(), 1);
    }

    #[test]
    fn open_for_writing_requires_an_existing_parent() {
        let (_temp_dir, root) = temp_root();
        let file = root.join("missing").join("data.bin");

        let result = file.open_for_writing();

        assert_eq!(result.err().map(|e| e.kind()), Some(ErrorKind::NonExistent));
    }

    #[test]
    fn remove_non_empty_directory_depends_on_policy() {
        let (_temp_dir, root) = temp_root();
        let dir = root.join("tree");
        dir.join("leaf.txt").touch().unwrap();

        assert_eq!(dir.remove().unwrap_err().kind(), ErrorKind::DirectoryNotEmpty);
        assert!(dir.exists());

        let recursive = dir.clone().with_remove_policy(RemovePolicy::Recursive);
        recursive.remove().unwrap();
        assert!(!dir.exists());
    }

    #[test]
    fn children_of_a_file_are_empty() {
        let (_temp_dir, root) = temp_root();
        let file = root.join("single");
        file.touch().unwrap();

        assert!(file.children().unwrap().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn dangling_link_is_missing_and_not_removable() {
        let (temp_dir, root) = temp_root();
        let link = temp_dir.path().join("dangling");
        std::os::unix::fs::symlink(temp_dir.path().join("nowhere"), &link)
            .expect("Failed to create symlink");

        let node = root.join("dangling");

        assert!(!node.exists());
        assert_eq!(node.remove().unwrap_err().kind(), ErrorKind::NonExistent);
        assert!(fs::symlink_metadata(&link).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn removing_a_link_to_a_directory_keeps_the_target() {
        let (temp_dir, root) = temp_root();
        let target = root.join("target");
        target.join("inside.txt").touch().unwrap();
        std::os::unix::fs::symlink(temp_dir.path().join("target"), temp_dir.path().join("link"))
            .expect("Failed to create symlink");

        let link = root.join("link");
        assert!(link.is_directory());

        link.remove().unwrap();

        assert!(!link.exists());
        assert!(target.join("inside.txt").is_file());
    }

    #[test]
    fn child_rejects_names_that_leave_the_directory() {
        let (_temp_dir, root) = temp_root();
        let base = root.join("base");
        base.make_directories().unwrap();

        let parent = base.child("..");

        assert_eq!(parent.name(), "..");
        assert!(!parent.exists());
        assert_eq!(parent.remove().unwrap_err().kind(), ErrorKind::Io);
        assert!(base.is_directory());
    }

    #[test]
    fn child_inherits_remove_policy() {
        let root = LocalNode::new("/tmp").with_remove_policy(RemovePolicy::Recursive);
        assert_eq!(root.join("x").remove_policy(), RemovePolicy::Recursive);
    }

    #[test]
    fn native_handle_is_the_local_path() {
        let (temp_dir, root) = temp_root();
        let file = root.join("native.txt");

        assert_eq!(
            file.as_native_handle().unwrap(),
            temp_dir.path().join("native.txt")
        );
    }
}
