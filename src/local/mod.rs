//! Nodes on the local disk.

mod local_node;

pub use local_node::LocalNode;
