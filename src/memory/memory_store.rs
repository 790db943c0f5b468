use std::sync::Arc;

use parking_lot::RwLock;

use crate::memory::MemoryNode;
use crate::memory::tree::Entry;

/// Shared in-memory tree that [`MemoryNode`]s address into.
///
/// Cloning a store hands out another reference to the same tree.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tree: Arc<RwLock<Entry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Node for the root directory of this store.
    pub fn root(&self) -> MemoryNode {
        MemoryNode::new(self.clone(), Vec::new())
    }

    pub(crate) fn read<R>(&self, f: impl FnOnce(&Entry) -> R) -> R {
        f(&self.tree.read())
    }

    pub(crate) fn write<R>(&self, f: impl FnOnce(&mut Entry) -> R) -> R {
        f(&mut self.tree.write())
    }
}
