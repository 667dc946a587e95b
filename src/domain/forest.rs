//! Multi-root directory tree addressed by slash paths

use std::fmt;

use generational_arena::Index;
use itertools::Itertools;
use tracing::{debug, instrument};

use super::arena::{Directory, DirectoryArena};
use super::error::{DomainError, DomainResult};
use super::path::{self, DirPath};

/// Spaces per depth level in listings.
pub const INDENT_WIDTH: usize = 2;

/// Set of top-level directories with no common parent, plus the arena
/// holding every directory beneath them.
///
/// All path-taking operations accept any slice of string-likes, so both a
/// [`DirPath`]'s segments and ad-hoc `&["a", "b"]` work.
#[derive(Debug, Default)]
pub struct Forest {
    arena: DirectoryArena,
    roots: Vec<Index>,
}

impl Forest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of directories in the whole forest.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn roots(&self) -> &[Index] {
        &self.roots
    }

    pub fn get(&self, idx: Index) -> Option<&Directory> {
        self.arena.get(idx)
    }

    pub fn find_root_by_name(&self, name: &str) -> Option<Index> {
        self.roots
            .iter()
            .copied()
            .find(|&root| self.arena.get(root).is_some_and(|d| d.name == name))
    }

    pub fn find_child_by_name(&self, node: Index, name: &str) -> Option<Index> {
        self.arena.find_child(node, name)
    }

    /// Resolve a path, `None` if any segment is missing.
    pub fn resolve<S: AsRef<str>>(&self, segments: &[S]) -> Option<Index> {
        self.resolve_or_fail(segments).ok()
    }

    /// Resolve a path, naming the first segment that does not exist.
    #[instrument(level = "trace", skip_all, fields(path = %path::join(segments)))]
    pub fn resolve_or_fail<S: AsRef<str>>(&self, segments: &[S]) -> DomainResult<Index> {
        validate(segments)?;

        let mut current: Option<Index> = None;
        for (position, segment) in segments.iter().enumerate() {
            let segment = segment.as_ref();
            let found = match current {
                None => self.find_root_by_name(segment),
                Some(parent) => self.find_child_by_name(parent, segment),
            };
            match found {
                Some(idx) => current = Some(idx),
                None => {
                    return Err(DomainError::PathNotFound {
                        segment: segment.to_string(),
                        position: position + 1,
                        path: path::join(segments),
                    })
                }
            }
        }
        current.ok_or_else(|| DomainError::invalid_argument("no directory path provided"))
    }

    /// Slash path from the root set down to `idx`.
    pub fn path_of(&self, idx: Index) -> Option<DirPath> {
        let mut names = Vec::new();
        let mut current = Some(idx);
        while let Some(node) = current {
            let directory = self.arena.get(node)?;
            names.push(directory.name.as_str());
            current = directory.parent;
        }
        names.reverse();
        DirPath::from_segments(&names).ok()
    }

    /// Create every missing directory along `segments`.
    ///
    /// Existing directories are descended into, so creating a path twice is
    /// the same as creating it once. Returns the last directory of the path.
    #[instrument(level = "debug", skip_all, fields(path = %path::join(segments)))]
    pub fn create_path<S: AsRef<str>>(&mut self, segments: &[S]) -> DomainResult<Index> {
        validate(segments)?;

        let mut current: Option<Index> = None;
        for (depth, segment) in segments.iter().enumerate() {
            let name = segment.as_ref();
            let existing = match current {
                None => self.find_root_by_name(name),
                Some(parent) => self.find_child_by_name(parent, name),
            };
            let idx = match existing {
                Some(idx) => idx,
                None => {
                    let idx = self.arena.insert(Directory::new(name, current, depth));
                    match current {
                        None => self.roots.push(idx),
                        Some(parent) => {
                            if let Err(e) = self.arena.add_child(parent, idx) {
                                self.arena.remove(idx);
                                return Err(e);
                            }
                        }
                    }
                    debug!(name, depth, "created directory");
                    idx
                }
            };
            current = Some(idx);
        }
        current.ok_or_else(|| DomainError::invalid_argument("no directory path provided"))
    }

    /// Delete the directory at `segments` and its whole subtree.
    ///
    /// A missing segment yields [`DomainError::PathNotFound`] and leaves the
    /// forest untouched. Returns the number of directories removed.
    #[instrument(level = "debug", skip_all, fields(path = %path::join(segments)))]
    pub fn delete_path<S: AsRef<str>>(&mut self, segments: &[S]) -> DomainResult<usize> {
        let node = self.resolve_or_fail(segments)?;

        let (parent, name) = match self.arena.get(node) {
            Some(directory) => (directory.parent, directory.name.clone()),
            None => return Err(DomainError::invalid_argument("directory vanished during delete")),
        };

        let removed = self.arena.clear_descendants(node);
        match parent {
            Some(parent) => {
                self.arena.remove_child(parent, &name);
            }
            None => self.roots.retain(|&root| root != node),
        }
        self.arena.remove(node);
        debug!(removed = removed + 1, "deleted directory");
        Ok(removed + 1)
    }

    /// Move the directory at `source` (with its subtree) under `destination`.
    ///
    /// Both paths are resolved before anything changes. Moving a directory
    /// into itself or one of its descendants yields
    /// [`DomainError::MoveIntoSubtree`]; a same-named child at the destination
    /// yields [`DomainError::DuplicateName`]. In every error case the forest
    /// is unchanged.
    #[instrument(
        level = "debug",
        skip_all,
        fields(source = %path::join(source), destination = %path::join(destination))
    )]
    pub fn move_path<S: AsRef<str>, T: AsRef<str>>(
        &mut self,
        source: &[S],
        destination: &[T],
    ) -> DomainResult<()> {
        let node = self.resolve_or_fail(source)?;
        let target = self.resolve_or_fail(destination)?;

        if path::is_within(destination, source) {
            return Err(DomainError::MoveIntoSubtree {
                path: path::join(source),
                destination: path::join(destination),
            });
        }

        let was_root = self
            .arena
            .get(node)
            .is_some_and(|directory| directory.parent.is_none());
        self.arena.reparent(node, target)?;
        if was_root {
            self.roots.retain(|&root| root != node);
        }
        if let Some(moved) = self.path_of(node) {
            debug!(%moved, "moved directory");
        }
        Ok(())
    }

    /// Depth-first, pre-order walk over every directory, siblings sorted by
    /// name at each level. Stored order is left alone; each call starts over.
    pub fn list_all(&self) -> Listing<'_> {
        Listing::new(self)
    }

    /// Indices ordered by name, last first, ready to be pushed on a stack.
    fn sorted_rev(&self, indices: &[Index]) -> Vec<Index> {
        indices
            .iter()
            .copied()
            .filter_map(|idx| self.arena.get(idx).map(|d| (idx, d.name.as_str())))
            .sorted_by(|a, b| b.1.cmp(a.1))
            .map(|(idx, _)| idx)
            .collect()
    }
}

fn validate<S: AsRef<str>>(segments: &[S]) -> DomainResult<()> {
    if segments.is_empty() {
        return Err(DomainError::invalid_argument("no directory path provided"));
    }
    if let Some(position) = segments.iter().position(|s| s.as_ref().is_empty()) {
        return Err(DomainError::invalid_argument(format!(
            "empty segment {} in path {}",
            position + 1,
            path::join(segments)
        )));
    }
    Ok(())
}

/// One line of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListEntry<'a> {
    pub name: &'a str,
    pub depth: usize,
}

impl fmt::Display for ListEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:indent$}{}",
            "",
            self.name,
            indent = self.depth * INDENT_WIDTH
        )
    }
}

/// Lazy sorted pre-order traversal, see [`Forest::list_all`].
pub struct Listing<'a> {
    forest: &'a Forest,
    stack: Vec<Index>,
}

impl<'a> Listing<'a> {
    fn new(forest: &'a Forest) -> Self {
        Self {
            forest,
            stack: forest.sorted_rev(&forest.roots),
        }
    }
}

impl<'a> Iterator for Listing<'a> {
    type Item = ListEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Some(directory) = self.forest.arena.get(current) {
                // Push children in reverse sorted order for left-to-right traversal
                self.stack
                    .extend(self.forest.sorted_rev(&directory.children));
                return Some(ListEntry {
                    name: &directory.name,
                    depth: directory.depth,
                });
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(forest: &Forest) -> Vec<String> {
        forest.list_all().map(|e| e.to_string()).collect()
    }

    #[test]
    fn given_empty_forest_when_listing_then_nothing() {
        let forest = Forest::new();
        assert!(forest.is_empty());
        assert_eq!(forest.list_all().count(), 0);
    }

    #[test]
    fn given_unsorted_inserts_when_listing_then_sorted_and_indented() {
        let mut forest = Forest::new();
        forest.create_path(&["b", "z"]).unwrap();
        forest.create_path(&["b", "a"]).unwrap();
        forest.create_path(&["a"]).unwrap();

        assert_eq!(lines(&forest), vec!["a", "b", "  a", "  z"]);
        // stored insertion order untouched
        let b = forest.find_root_by_name("b").unwrap();
        let children: Vec<_> = forest.get(b).unwrap().children.clone();
        assert_eq!(forest.get(children[0]).unwrap().name, "z");
    }

    #[test]
    fn given_empty_segments_when_creating_then_invalid_argument() {
        let mut forest = Forest::new();
        let empty: [&str; 0] = [];
        assert!(matches!(
            forest.create_path(&empty),
            Err(DomainError::InvalidArgument(_))
        ));
        assert!(matches!(
            forest.create_path(&["a", ""]),
            Err(DomainError::InvalidArgument(_))
        ));
        assert!(forest.is_empty());
    }

    #[test]
    fn given_missing_middle_segment_when_resolving_then_names_it() {
        let mut forest = Forest::new();
        forest.create_path(&["a", "b"]).unwrap();

        let err = forest.resolve_or_fail(&["a", "x", "y"]).unwrap_err();

        assert_eq!(
            err,
            DomainError::PathNotFound {
                segment: "x".to_string(),
                position: 2,
                path: "a/x/y".to_string(),
            }
        );
    }

    #[test]
    fn given_nested_node_when_path_of_then_full_path() {
        let mut forest = Forest::new();
        let idx = forest.create_path(&["a", "b", "c"]).unwrap();
        assert_eq!(forest.path_of(idx).unwrap().to_string(), "a/b/c");
    }
}
