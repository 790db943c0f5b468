//! Uniform handles over files and directories, whichever store they live in.
//!
//! A [`Node`] addresses one entry of a filesystem-like structure. Callers query and
//! mutate the entry through it and reach its children by name.
//! [`LocalNode`] works on the local disk, [`MemoryNode`] on a shared in-memory tree,
//! and [`ReadOnlyNode`] turns any node into a view that refuses modifications.
#![allow(clippy::enum_variant_names)]

pub mod application;
pub mod cli;
pub mod config;
mod ext;
pub mod local;
pub mod memory;
pub mod node;

pub use local::LocalNode;
pub use memory::{MemoryNode, MemoryStore};
pub use node::{
    ErrorKind, FilesystemError, NativeHandle, Node, NodeExt, NodeKind, ReadOnlyNode, ReadStream,
    RemovePolicy, WriteStream,
};
