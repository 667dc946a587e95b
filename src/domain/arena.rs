use generational_arena::{Arena, Index};
use std::fmt;
use tracing::instrument;

use super::error::{DomainError, DomainResult};

/// One named node in the directory tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directory {
    /// Name, unique among siblings
    pub name: String,
    /// Index of parent node in the arena, None for root-level directories.
    /// Navigational only: the owning edge is parent -> children.
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena, in insertion order
    pub children: Vec<Index>,
    /// Number of ancestors, 0 for root-level directories
    pub depth: usize,
}

impl Directory {
    pub fn new(name: impl Into<String>, parent: Option<Index>, depth: usize) -> Self {
        Self {
            name: name.into(),
            parent,
            children: Vec::new(),
            depth,
        }
    }
}

impl fmt::Display for Directory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Arena storage for directory nodes.
///
/// Uses generational arena for memory-safe node references: an index of a
/// deleted directory never resolves to a newer one. The arena knows nothing
/// about the root set, see [`crate::domain::Forest`].
#[derive(Debug, Default)]
pub struct DirectoryArena {
    arena: Arena<Directory>,
}

impl DirectoryArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
        }
    }

    /// Store a node without linking it to any parent's child list.
    #[instrument(level = "trace", skip(self))]
    pub fn insert(&mut self, directory: Directory) -> Index {
        self.arena.insert(directory)
    }

    pub fn get(&self, idx: Index) -> Option<&Directory> {
        self.arena.get(idx)
    }

    pub fn get_mut(&mut self, idx: Index) -> Option<&mut Directory> {
        self.arena.get_mut(idx)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    fn node(&self, idx: Index) -> DomainResult<&Directory> {
        self.get(idx)
            .ok_or_else(|| DomainError::invalid_argument(format!("unknown directory {:?}", idx)))
    }

    fn node_mut(&mut self, idx: Index) -> DomainResult<&mut Directory> {
        self.get_mut(idx)
            .ok_or_else(|| DomainError::invalid_argument(format!("unknown directory {:?}", idx)))
    }

    /// Linear lookup among the direct children of `parent`.
    pub fn find_child(&self, parent: Index, name: &str) -> Option<Index> {
        self.get(parent)?
            .children
            .iter()
            .copied()
            .find(|&child| self.get(child).is_some_and(|c| c.name == name))
    }

    /// Append `child` to `parent`'s children.
    ///
    /// Fails with [`DomainError::DuplicateName`] if `parent` already has a child
    /// of the same name; nothing changes in that case.
    #[instrument(level = "trace", skip(self))]
    pub fn add_child(&mut self, parent: Index, child: Index) -> DomainResult<()> {
        let name = self.node(child)?.name.clone();
        if self.find_child(parent, &name).is_some() {
            return Err(DomainError::DuplicateName { name });
        }
        self.node_mut(parent)?.children.push(child);
        Ok(())
    }

    /// Detach the child called `name` from `parent`. Absent names are a no-op.
    #[instrument(level = "trace", skip(self))]
    pub fn remove_child(&mut self, parent: Index, name: &str) -> Option<Index> {
        let child = self.find_child(parent, name)?;
        let parent = self.get_mut(parent)?;
        parent.children.retain(|&c| c != child);
        Some(child)
    }

    /// Move `node` under `new_parent` and recompute depths of the moved subtree.
    ///
    /// The node is attached to the new parent first, so a name clash there
    /// fails before the old parent is touched.
    #[instrument(level = "debug", skip(self))]
    pub fn reparent(&mut self, node: Index, new_parent: Index) -> DomainResult<()> {
        let parent_depth = self.node(new_parent)?.depth;
        if self.is_ancestor_or_self(node, new_parent) {
            return Err(DomainError::MoveIntoSubtree {
                path: self.node(node)?.name.clone(),
                destination: self.node(new_parent)?.name.clone(),
            });
        }
        self.add_child(new_parent, node)?;

        let (old_parent, name) = {
            let directory = self.node(node)?;
            (directory.parent, directory.name.clone())
        };
        if let Some(old_parent) = old_parent {
            self.remove_child(old_parent, &name);
        }

        self.node_mut(node)?.parent = Some(new_parent);
        self.update_depth(node, parent_depth + 1);
        Ok(())
    }

    /// True if `ancestor` is `node` or one of its ancestors.
    pub fn is_ancestor_or_self(&self, ancestor: Index, node: Index) -> bool {
        let mut current = Some(node);
        while let Some(idx) = current {
            if idx == ancestor {
                return true;
            }
            current = self.get(idx).and_then(|d| d.parent);
        }
        false
    }

    /// Set `node`'s depth and re-derive the depth of every descendant.
    #[instrument(level = "trace", skip(self))]
    pub fn update_depth(&mut self, node: Index, depth: usize) {
        let mut stack = vec![(node, depth)];
        while let Some((current, depth)) = stack.pop() {
            if let Some(directory) = self.get_mut(current) {
                directory.depth = depth;
                stack.extend(directory.children.iter().map(|&child| (child, depth + 1)));
            }
        }
    }

    /// Remove every descendant of `node` from the arena.
    ///
    /// Walks with an explicit stack, so tree depth is bounded by memory only.
    /// Returns the number of directories removed; `node` itself stays.
    #[instrument(level = "debug", skip(self))]
    pub fn clear_descendants(&mut self, node: Index) -> usize {
        let mut stack = match self.get_mut(node) {
            Some(directory) => std::mem::take(&mut directory.children),
            None => return 0,
        };

        let mut removed = 0;
        while let Some(current) = stack.pop() {
            if let Some(directory) = self.arena.remove(current) {
                stack.extend(directory.children);
                removed += 1;
            }
        }
        removed
    }

    /// Drop a single node from the arena. Callers unlink it first.
    pub fn remove(&mut self, node: Index) -> Option<Directory> {
        self.arena.remove(node)
    }
}
