//! The node contract: a uniform handle over one file or directory entry,
//! independent of the store it lives in.

mod error;
mod invalid_child;
#[allow(clippy::module_inception)]
mod node;
mod node_ext;
mod read_only;


pub(crate) use error::{
    DirectoryNotEmptySnafu, IoSnafu, NonExistentSnafu, NotADirectorySnafu, NotAFileSnafu,
    UnsupportedSnafu,
};
pub use error::{ErrorKind, FilesystemError};
pub(crate) use invalid_child::{InvalidChild, is_single_component};
pub use node::{NativeHandle, Node, NodeKind, ReadStream, RemovePolicy, WriteStream};
pub use node_ext::NodeExt;
pub use read_only::ReadOnlyNode;
