//! Red-black tree map over a slotmap arena.
//!
//! Nodes live in a `SlotMap`; `parent`/`left`/`right` are arena ids, so
//! rotations and splices re-point ids instead of juggling owning
//! pointers, and a removed node simply leaves the arena.

use crate::entry::Entry;
use crate::error::{IncomparableKeys, NoSuchElement};
use crate::key::{Comparator, Key};
use crate::map::Map;
use crate::ordering::resolve_ordering;
use crate::series::Series;
use core::cmp::Ordering;
use slotmap::SlotMap;

slotmap::new_key_type! {
    struct NodeId;
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Color {
    Red,
    Black,
}

#[derive(Debug)]
struct Node<V> {
    entry: Entry<V>,
    color: Color,
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

/// Sorted map over the dynamic key model.
///
/// Keys are ordered by the resolution chain: the map's comparator if one
/// was supplied at construction, then a shared `Comparable`
/// implementation, then the built-in scalar comparator (see the crate
/// docs for its polarity). Two keys that resolve `Equal` are the same
/// key.
pub struct TreeMap<V> {
    nodes: SlotMap<NodeId, Node<V>>,
    root: Option<NodeId>,
    comparator: Option<Box<dyn Comparator>>,
}

impl<V> TreeMap<V> {
    pub fn new() -> Self {
        TreeMap {
            nodes: SlotMap::with_key(),
            root: None,
            comparator: None,
        }
    }

    /// Construct a map ordered by `comparator` instead of the resolution
    /// chain's later stages.
    pub fn with_comparator<C: Comparator + 'static>(comparator: C) -> Self {
        TreeMap {
            nodes: SlotMap::with_key(),
            root: None,
            comparator: Some(Box::new(comparator)),
        }
    }

    pub fn from_entries<I>(entries: I) -> Result<Self, IncomparableKeys>
    where
        I: IntoIterator<Item = Entry<V>>,
    {
        let mut map = Self::new();
        for entry in entries {
            let (key, value) = entry.into_pair();
            map.put(key, value)?;
        }
        Ok(map)
    }

    pub fn from_pairs<I>(pairs: I) -> Result<Self, IncomparableKeys>
    where
        I: IntoIterator<Item = (Key, V)>,
    {
        let mut map = Self::new();
        for (key, value) in pairs {
            map.put(key, value)?;
        }
        Ok(map)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, key: &Key) -> Result<Option<&V>, IncomparableKeys> {
        let mut current = self.root;
        while let Some(id) = current {
            current = match self.compare(self.key(id), key)? {
                Ordering::Equal => return Ok(Some(self.nodes[id].entry.value())),
                Ordering::Less => self.left(id),
                Ordering::Greater => self.right(id),
            };
        }
        Ok(None)
    }

    /// Insert or overwrite. An order-equal match replaces the stored
    /// value in place and returns the old one without touching the
    /// structure; otherwise a red leaf is attached and the insertion
    /// fixup restores the coloring invariants.
    pub fn put(&mut self, key: Key, value: V) -> Result<Option<V>, IncomparableKeys> {
        let Some(mut current) = self.root else {
            let id = self.insert_node(key, value, None);
            self.root = Some(id);
            self.rebalance_after_insertion(id);
            return Ok(None);
        };
        loop {
            match self.compare(self.key(current), &key)? {
                Ordering::Equal => {
                    return Ok(Some(self.nodes[current].entry.replace_value(value)));
                }
                Ordering::Less => match self.left(current) {
                    Some(next) => current = next,
                    None => {
                        let id = self.insert_node(key, value, Some(current));
                        self.set_left(current, Some(id));
                        self.rebalance_after_insertion(id);
                        return Ok(None);
                    }
                },
                Ordering::Greater => match self.right(current) {
                    Some(next) => current = next,
                    None => {
                        let id = self.insert_node(key, value, Some(current));
                        self.set_right(current, Some(id));
                        self.rebalance_after_insertion(id);
                        return Ok(None);
                    }
                },
            }
        }
    }

    /// Detach and return the value stored under `key`, if any. Absent
    /// keys leave the tree untouched.
    pub fn remove(&mut self, key: &Key) -> Result<Option<V>, IncomparableKeys> {
        let Some(mut current) = self.root else {
            return Ok(None);
        };
        let mut from_left = false;
        loop {
            match self.compare(self.key(current), key)? {
                Ordering::Equal => return Ok(self.remove_node(current, from_left)),
                Ordering::Less => match self.left(current) {
                    Some(next) => {
                        current = next;
                        from_left = true;
                    }
                    None => return Ok(None),
                },
                Ordering::Greater => match self.right(current) {
                    Some(next) => {
                        current = next;
                        from_left = false;
                    }
                    None => return Ok(None),
                },
            }
        }
    }

    /// Smallest entry under the resolved ordering.
    pub fn first(&self) -> Result<&Entry<V>, NoSuchElement> {
        let root = self.root.ok_or(NoSuchElement)?;
        Ok(&self.nodes[self.leftmost(root)].entry)
    }

    /// Largest entry under the resolved ordering.
    pub fn last(&self) -> Result<&Entry<V>, NoSuchElement> {
        let root = self.root.ok_or(NoSuchElement)?;
        Ok(&self.nodes[self.rightmost(root)].entry)
    }

    /// All values in ascending resolved order.
    pub fn values(&self) -> Series<&V> {
        self.iter().map(Entry::value).collect()
    }

    /// In-order entries. Restartable: each call derives a fresh cursor
    /// from the root.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            map: self,
            next: self.root.map(|root| self.leftmost(root)),
        }
    }

    fn compare(&self, first: &Key, second: &Key) -> Result<Ordering, IncomparableKeys> {
        resolve_ordering(self.comparator.as_deref(), first, second)
    }

    fn insert_node(&mut self, key: Key, value: V, parent: Option<NodeId>) -> NodeId {
        self.nodes.insert(Node {
            entry: Entry::new(key, value),
            color: Color::Red,
            parent,
            left: None,
            right: None,
        })
    }

    /// Splice `node` out: the right subtree takes its place, with the
    /// left subtree reattached under the successor subtree's leftmost
    /// node; a lone left child is promoted directly.
    fn remove_node(&mut self, node: NodeId, from_left: bool) -> Option<V> {
        let left = self.left(node);
        let right = self.right(node);
        let parent = self.parent(node);

        let replacement = if let Some(right) = right {
            if let Some(left) = left {
                let leftmost = self.leftmost(right);
                self.set_left(leftmost, Some(left));
                self.set_parent(left, Some(leftmost));
            }
            self.set_parent(right, parent);
            Some(right)
        } else if let Some(left) = left {
            self.set_parent(left, parent);
            Some(left)
        } else {
            None
        };

        match parent {
            Some(parent) if from_left => self.set_left(parent, replacement),
            Some(parent) => self.set_right(parent, replacement),
            None => self.root = replacement,
        }

        if let Some(replacement) = replacement {
            self.rebalance_after_deletion(replacement);
        }

        self.nodes.remove(node).map(|n| n.entry.into_value())
    }

    fn rebalance_after_insertion(&mut self, mut node: NodeId) {
        while self.root != Some(node) && self.color(self.parent(node)) == Color::Red {
            let Some(parent) = self.parent(node) else {
                break;
            };
            let Some(grandparent) = self.parent(parent) else {
                break;
            };
            if Some(parent) == self.left(grandparent) {
                let uncle = self.right(grandparent);
                if self.color(uncle) == Color::Red {
                    self.set_color(Some(parent), Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(Some(grandparent), Color::Red);
                    node = grandparent;
                } else {
                    if Some(node) == self.right(parent) {
                        node = parent;
                        self.rotate_left(node);
                    }
                    let parent = self.parent(node);
                    let grandparent = parent.and_then(|p| self.parent(p));
                    self.set_color(parent, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    if let Some(grandparent) = grandparent {
                        self.rotate_right(grandparent);
                    }
                }
            } else {
                let uncle = self.left(grandparent);
                if self.color(uncle) == Color::Red {
                    self.set_color(Some(parent), Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(Some(grandparent), Color::Red);
                    node = grandparent;
                } else {
                    if Some(node) == self.left(parent) {
                        node = parent;
                        self.rotate_right(node);
                    }
                    let parent = self.parent(node);
                    let grandparent = parent.and_then(|p| self.parent(p));
                    self.set_color(parent, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    if let Some(grandparent) = grandparent {
                        self.rotate_left(grandparent);
                    }
                }
            }
        }
        let root = self.root;
        self.set_color(root, Color::Black);
    }

    fn rebalance_after_deletion(&mut self, mut node: NodeId) {
        while self.root != Some(node) && self.color(Some(node)) == Color::Black {
            let Some(parent) = self.parent(node) else {
                break;
            };
            if Some(node) == self.left(parent) {
                let mut sibling = self.right(parent);
                if self.color(sibling) == Color::Red {
                    self.set_color(sibling, Color::Black);
                    self.set_color(Some(parent), Color::Red);
                    self.rotate_left(parent);
                    sibling = self.right(parent);
                }
                let Some(mut sibling) = sibling else {
                    node = parent;
                    continue;
                };
                if self.color(self.left(sibling)) == Color::Black
                    && self.color(self.right(sibling)) == Color::Black
                {
                    self.set_color(Some(sibling), Color::Red);
                    node = parent;
                } else {
                    if self.color(self.right(sibling)) == Color::Black {
                        self.set_color(self.left(sibling), Color::Black);
                        self.set_color(Some(sibling), Color::Red);
                        self.rotate_right(sibling);
                        match self.right(parent) {
                            Some(next) => sibling = next,
                            None => {
                                node = parent;
                                continue;
                            }
                        }
                    }
                    let parent_color = self.color(Some(parent));
                    self.set_color(Some(sibling), parent_color);
                    self.set_color(Some(parent), Color::Black);
                    self.set_color(self.right(sibling), Color::Black);
                    self.rotate_left(parent);
                    match self.root {
                        Some(root) => node = root,
                        None => break,
                    }
                }
            } else {
                let mut sibling = self.left(parent);
                if self.color(sibling) == Color::Red {
                    self.set_color(sibling, Color::Black);
                    self.set_color(Some(parent), Color::Red);
                    self.rotate_right(parent);
                    sibling = self.left(parent);
                }
                let Some(mut sibling) = sibling else {
                    node = parent;
                    continue;
                };
                if self.color(self.right(sibling)) == Color::Black
                    && self.color(self.left(sibling)) == Color::Black
                {
                    self.set_color(Some(sibling), Color::Red);
                    node = parent;
                } else {
                    if self.color(self.left(sibling)) == Color::Black {
                        self.set_color(self.right(sibling), Color::Black);
                        self.set_color(Some(sibling), Color::Red);
                        self.rotate_left(sibling);
                        match self.left(parent) {
                            Some(next) => sibling = next,
                            None => {
                                node = parent;
                                continue;
                            }
                        }
                    }
                    let parent_color = self.color(Some(parent));
                    self.set_color(Some(sibling), parent_color);
                    self.set_color(Some(parent), Color::Black);
                    self.set_color(self.left(sibling), Color::Black);
                    self.rotate_right(parent);
                    match self.root {
                        Some(root) => node = root,
                        None => break,
                    }
                }
            }
        }
        self.set_color(Some(node), Color::Black);
    }

    fn rotate_left(&mut self, node: NodeId) {
        let Some(pivot) = self.right(node) else {
            return;
        };
        let inner = self.left(pivot);
        self.set_right(node, inner);
        if let Some(inner) = inner {
            self.set_parent(inner, Some(node));
        }
        let parent = self.parent(node);
        self.set_parent(pivot, parent);
        match parent {
            None => self.root = Some(pivot),
            Some(parent) if self.left(parent) == Some(node) => {
                self.set_left(parent, Some(pivot));
            }
            Some(parent) => self.set_right(parent, Some(pivot)),
        }
        self.set_left(pivot, Some(node));
        self.set_parent(node, Some(pivot));
    }

    fn rotate_right(&mut self, node: NodeId) {
        let Some(pivot) = self.left(node) else {
            return;
        };
        let inner = self.right(pivot);
        self.set_left(node, inner);
        if let Some(inner) = inner {
            self.set_parent(inner, Some(node));
        }
        let parent = self.parent(node);
        self.set_parent(pivot, parent);
        match parent {
            None => self.root = Some(pivot),
            Some(parent) if self.right(parent) == Some(node) => {
                self.set_right(parent, Some(pivot));
            }
            Some(parent) => self.set_left(parent, Some(pivot)),
        }
        self.set_right(pivot, Some(node));
        self.set_parent(node, Some(pivot));
    }

    fn leftmost(&self, mut node: NodeId) -> NodeId {
        while let Some(left) = self.left(node) {
            node = left;
        }
        node
    }

    fn rightmost(&self, mut node: NodeId) -> NodeId {
        while let Some(right) = self.right(node) {
            node = right;
        }
        node
    }

    /// Next-larger node: leftmost of the right subtree, else the first
    /// ancestor reached from its left side.
    fn successor(&self, node: NodeId) -> Option<NodeId> {
        if let Some(right) = self.right(node) {
            return Some(self.leftmost(right));
        }
        let mut current = node;
        let mut parent = self.parent(current);
        while let Some(above) = parent {
            if self.right(above) == Some(current) {
                current = above;
                parent = self.parent(above);
            } else {
                return Some(above);
            }
        }
        None
    }

    fn key(&self, node: NodeId) -> &Key {
        self.nodes[node].entry.key()
    }

    fn color(&self, node: Option<NodeId>) -> Color {
        // A missing child counts as black.
        node.map_or(Color::Black, |id| self.nodes[id].color)
    }

    fn set_color(&mut self, node: Option<NodeId>, color: Color) {
        if let Some(id) = node {
            self.nodes[id].color = color;
        }
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node].parent
    }

    fn left(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node].left
    }

    fn right(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node].right
    }

    fn set_parent(&mut self, node: NodeId, parent: Option<NodeId>) {
        self.nodes[node].parent = parent;
    }

    fn set_left(&mut self, node: NodeId, left: Option<NodeId>) {
        self.nodes[node].left = left;
    }

    fn set_right(&mut self, node: NodeId, right: Option<NodeId>) {
        self.nodes[node].right = right;
    }
}

impl<V> Default for TreeMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Map<V> for TreeMap<V> {
    type Error = IncomparableKeys;

    fn get(&self, key: &Key) -> Result<Option<&V>, IncomparableKeys> {
        TreeMap::get(self, key)
    }

    fn put(&mut self, key: Key, value: V) -> Result<Option<V>, IncomparableKeys> {
        TreeMap::put(self, key, value)
    }

    fn remove(&mut self, key: &Key) -> Result<Option<V>, IncomparableKeys> {
        TreeMap::remove(self, key)
    }

    fn len(&self) -> usize {
        TreeMap::len(self)
    }

    fn values(&self) -> Series<&V> {
        TreeMap::values(self)
    }
}

/// In-order cursor over tree entries.
pub struct Iter<'a, V> {
    map: &'a TreeMap<V>,
    next: Option<NodeId>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a Entry<V>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.map.successor(current);
        Some(&self.map.nodes[current].entry)
    }
}

impl<'a, V> IntoIterator for &'a TreeMap<V> {
    type Item = &'a Entry<V>;
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
impl<V> TreeMap<V> {
    /// Test-only audit of the red-black structural invariants.
    pub(crate) fn assert_red_black_invariants(&self) {
        let Some(root) = self.root else {
            assert_eq!(self.len(), 0);
            return;
        };
        assert_eq!(self.nodes[root].parent, None);
        assert_eq!(self.nodes[root].color, Color::Black, "root must be black");
        self.audit(root);
    }

    // Returns the black height of the audited subtree.
    fn audit(&self, node: NodeId) -> usize {
        let n = &self.nodes[node];
        if n.color == Color::Red {
            assert_eq!(
                self.color(n.parent),
                Color::Black,
                "red node under a red parent"
            );
        }
        for child in [n.left, n.right].into_iter().flatten() {
            assert_eq!(
                self.nodes[child].parent,
                Some(node),
                "child/parent link broken"
            );
        }
        let left_height = n.left.map_or(1, |left| self.audit(left));
        let right_height = n.right.map_or(1, |right| self.audit(right));
        assert_eq!(left_height, right_height, "black height mismatch");
        left_height + usize::from(n.color == Color::Black)
    }
}
