//! Nodes living in a shared in-memory tree. Nothing here touches the disk,
//! so these nodes have no native handle.

mod memory_node;
mod memory_store;
mod tree;
mod writer;

pub use memory_node::MemoryNode;
pub use memory_store::MemoryStore;
pub use writer::MemoryWriter;
