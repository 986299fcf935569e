//! RbTree: red-black tree keyed by `i32` with owned string values.
//!
//! Nodes are stored in a `SlotMap` and refer to each other by generational
//! key. The nil sentinel is an ordinary arena node created with the tree:
//! every empty child slot and the root's parent point at it, and code
//! compares against it by key identity. Only its `parent` field is ever
//! written (transplant and delete fix-up use it to climb from an empty
//! slot); it is reset after each delete.
//!
//! Ordering: keys strictly less than a node descend left, everything else
//! right, so duplicate keys are kept (multiset) and in-order traversal is
//! non-decreasing.

use crate::error::{TreeError, TreeViolation};
use crate::reserve::{reserve_slot, try_copy};
use slotmap::{DefaultKey, SlotMap};
use tracing::trace;

type NodeId = DefaultKey;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Color {
    Red,
    Black,
}

/// Stable reference to a tree node (or to the tree's nil sentinel).
///
/// Accessors return `None` once the node has been deleted.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Handle(NodeId);

impl Handle {
    pub(crate) fn new(k: NodeId) -> Self {
        Handle(k)
    }
    pub(crate) fn raw_handle(&self) -> NodeId {
        self.0
    }

    pub fn is_nil(&self, tree: &RbTree) -> bool {
        self.0 == tree.nil
    }

    /// `None` for the sentinel and for deleted nodes.
    pub fn key(&self, tree: &RbTree) -> Option<i32> {
        tree.live_node(self.0).map(|n| n.key)
    }

    pub fn value<'a>(&self, tree: &'a RbTree) -> Option<&'a str> {
        tree.live_node(self.0).map(|n| n.value.as_str())
    }

    /// The sentinel reports `Black`.
    pub fn color(&self, tree: &RbTree) -> Option<Color> {
        tree.slots.get(self.0).map(|n| n.color)
    }

    pub fn left(&self, tree: &RbTree) -> Option<Handle> {
        tree.live_node(self.0).map(|n| Handle::new(n.left))
    }

    pub fn right(&self, tree: &RbTree) -> Option<Handle> {
        tree.live_node(self.0).map(|n| Handle::new(n.right))
    }

    /// The root's parent is the sentinel.
    pub fn parent(&self, tree: &RbTree) -> Option<Handle> {
        tree.live_node(self.0).map(|n| Handle::new(n.parent))
    }
}

#[derive(Debug)]
struct Node {
    key: i32,
    value: String,
    color: Color,
    parent: NodeId,
    left: NodeId,
    right: NodeId,
}

#[derive(Debug)]
pub struct RbTree {
    slots: SlotMap<NodeId, Node>,
    root: NodeId,
    nil: NodeId,
}

/// In-order iterator over `(key, value)`.
pub struct Iter<'a> {
    tree: &'a RbTree,
    cursor: NodeId,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (i32, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == self.tree.nil {
            return None;
        }
        let node = &self.tree.slots[self.cursor];
        self.cursor = self.tree.successor(self.cursor);
        self.remaining -= 1;
        Some((node.key, node.value.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl Default for RbTree {
    fn default() -> Self {
        Self::new()
    }
}

impl RbTree {
    pub fn new() -> Self {
        let mut slots = SlotMap::with_key();
        let nil = slots.insert_with_key(|k| Node {
            key: 0,
            value: String::new(),
            color: Color::Black,
            parent: k,
            left: k,
            right: k,
        });
        Self {
            slots,
            root: nil,
            nil,
        }
    }

    pub fn root(&self) -> Handle {
        Handle::new(self.root)
    }

    /// The sentinel standing in for every absent child.
    pub fn nil(&self) -> Handle {
        Handle::new(self.nil)
    }

    pub fn len(&self) -> usize {
        self.slots.len() - 1
    }
    pub fn is_empty(&self) -> bool {
        self.root == self.nil
    }
}

// Raw field access. Ids passed here are live arena keys.
impl RbTree {
    fn live_node(&self, k: NodeId) -> Option<&Node> {
        if k == self.nil {
            return None;
        }
        self.slots.get(k)
    }

    #[inline]
    fn left(&self, k: NodeId) -> NodeId {
        self.slots[k].left
    }
    #[inline]
    fn right(&self, k: NodeId) -> NodeId {
        self.slots[k].right
    }
    #[inline]
    fn parent(&self, k: NodeId) -> NodeId {
        self.slots[k].parent
    }
    #[inline]
    fn color(&self, k: NodeId) -> Color {
        self.slots[k].color
    }
    #[inline]
    fn key_of(&self, k: NodeId) -> i32 {
        self.slots[k].key
    }
    #[inline]
    fn set_left(&mut self, k: NodeId, v: NodeId) {
        self.slots[k].left = v;
    }
    #[inline]
    fn set_right(&mut self, k: NodeId, v: NodeId) {
        self.slots[k].right = v;
    }
    #[inline]
    fn set_parent(&mut self, k: NodeId, v: NodeId) {
        self.slots[k].parent = v;
    }
    #[inline]
    fn set_color(&mut self, k: NodeId, c: Color) {
        self.slots[k].color = c;
    }
}

impl RbTree {
    /// Lifts `x.right` into `x`'s place; no-op when that child is nil.
    fn left_rotate(&mut self, x: NodeId) {
        let y = self.right(x);
        if y == self.nil {
            return;
        }
        trace!(pivot = self.key_of(y), "left rotate");

        let y_left = self.left(y);
        self.set_right(x, y_left);
        if y_left != self.nil {
            self.set_parent(y_left, x);
        }

        let xp = self.parent(x);
        self.set_parent(y, xp);
        if xp == self.nil {
            self.root = y;
        } else if x == self.left(xp) {
            self.set_left(xp, y);
        } else {
            self.set_right(xp, y);
        }

        self.set_left(y, x);
        self.set_parent(x, y);
    }

    /// Lifts `x.left` into `x`'s place; no-op when that child is nil.
    fn right_rotate(&mut self, x: NodeId) {
        let y = self.left(x);
        if y == self.nil {
            return;
        }
        trace!(pivot = self.key_of(y), "right rotate");

        let y_right = self.right(y);
        self.set_left(x, y_right);
        if y_right != self.nil {
            self.set_parent(y_right, x);
        }

        let xp = self.parent(x);
        self.set_parent(y, xp);
        if xp == self.nil {
            self.root = y;
        } else if x == self.left(xp) {
            self.set_left(xp, y);
        } else {
            self.set_right(xp, y);
        }

        self.set_right(y, x);
        self.set_parent(x, y);
    }

    /// Inserts a red leaf holding a copy of `value`, then restores the
    /// red-black properties. Equal keys are kept and placed to the right.
    ///
    /// The node and the value copy are allocated before any link changes,
    /// so on error the tree is unmodified.
    pub fn insert(&mut self, key: i32, value: &str) -> Result<Handle, TreeError> {
        let value = try_copy(value)?;
        reserve_slot(&mut self.slots)?;

        let nil = self.nil;
        let mut parent = nil;
        let mut cursor = self.root;
        while cursor != nil {
            parent = cursor;
            cursor = if key < self.key_of(cursor) {
                self.left(cursor)
            } else {
                self.right(cursor)
            };
        }

        let z = self.slots.insert(Node {
            key,
            value,
            color: Color::Red,
            parent,
            left: nil,
            right: nil,
        });

        if parent == nil {
            self.root = z;
        } else if key < self.key_of(parent) {
            self.set_left(parent, z);
        } else {
            self.set_right(parent, z);
        }

        self.insert_fixup(z);
        Ok(Handle::new(z))
    }

    fn insert_fixup(&mut self, mut z: NodeId) {
        while self.color(self.parent(z)) == Color::Red {
            let p = self.parent(z);
            // A red parent is never the root, so the grandparent is real.
            let g = self.parent(p);

            if p == self.left(g) {
                let uncle = self.right(g);
                if self.color(uncle) == Color::Red {
                    self.set_color(p, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(g, Color::Red);
                    z = g;
                } else {
                    if z == self.right(p) {
                        z = p;
                        self.left_rotate(z);
                    }
                    let p = self.parent(z);
                    let g = self.parent(p);
                    self.set_color(p, Color::Black);
                    self.set_color(g, Color::Red);
                    self.right_rotate(g);
                }
            } else {
                let uncle = self.left(g);
                if self.color(uncle) == Color::Red {
                    self.set_color(p, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(g, Color::Red);
                    z = g;
                } else {
                    if z == self.left(p) {
                        z = p;
                        self.right_rotate(z);
                    }
                    let p = self.parent(z);
                    let g = self.parent(p);
                    self.set_color(p, Color::Black);
                    self.set_color(g, Color::Red);
                    self.left_rotate(g);
                }
            }
        }

        let root = self.root;
        self.set_color(root, Color::Black);
    }

    /// Puts `v` where `u` hangs from its parent. `v` may be the sentinel;
    /// its parent link is written either way. `u`'s own links are untouched.
    fn transplant(&mut self, u: NodeId, v: NodeId) {
        let up = self.parent(u);
        if up == self.nil {
            self.root = v;
        } else if u == self.left(up) {
            self.set_left(up, v);
        } else {
            self.set_right(up, v);
        }
        self.set_parent(v, up);
    }

    /// Removes one node holding `key`. Returns `false`, without touching
    /// the tree, when the key is absent.
    pub fn delete(&mut self, key: i32) -> bool {
        let z = self.search(key);
        if z == self.nil {
            return false;
        }

        let nil = self.nil;
        let mut lost = self.color(z);
        let x;

        if self.left(z) == nil {
            x = self.right(z);
            self.transplant(z, x);
        } else if self.right(z) == nil {
            x = self.left(z);
            self.transplant(z, x);
        } else {
            // The successor leaves its old slot and takes z's color, so the
            // color missing from the tree is the successor's own.
            let y = self.min_of(self.right(z));
            lost = self.color(y);
            x = self.right(y);

            if self.parent(y) == z {
                self.set_parent(x, y);
            } else {
                self.transplant(y, x);
                let zr = self.right(z);
                self.set_right(y, zr);
                self.set_parent(zr, y);
            }

            self.transplant(z, y);
            let zl = self.left(z);
            self.set_left(y, zl);
            self.set_parent(zl, y);
            let zc = self.color(z);
            self.set_color(y, zc);
        }

        if lost == Color::Black {
            self.delete_fixup(x);
        }

        self.slots.remove(z);
        self.set_parent(nil, nil);
        true
    }

    /// `x` carries an extra black. Push it up, or absorb it with a rotation.
    fn delete_fixup(&mut self, mut x: NodeId) {
        while x != self.root && self.color(x) == Color::Black {
            let p = self.parent(x);

            if x == self.left(p) {
                let mut w = self.right(p);

                if self.color(w) == Color::Red {
                    trace!("delete fix-up: red sibling");
                    self.set_color(w, Color::Black);
                    self.set_color(p, Color::Red);
                    self.left_rotate(p);
                    w = self.right(self.parent(x));
                }

                if self.color(self.left(w)) == Color::Black
                    && self.color(self.right(w)) == Color::Black
                {
                    self.set_color(w, Color::Red);
                    x = self.parent(x);
                } else {
                    if self.color(self.right(w)) == Color::Black {
                        let wl = self.left(w);
                        self.set_color(wl, Color::Black);
                        self.set_color(w, Color::Red);
                        self.right_rotate(w);
                        w = self.right(self.parent(x));
                    }

                    let p = self.parent(x);
                    let pc = self.color(p);
                    self.set_color(w, pc);
                    self.set_color(p, Color::Black);
                    let wr = self.right(w);
                    self.set_color(wr, Color::Black);
                    self.left_rotate(p);
                    x = self.root;
                }
            } else {
                let mut w = self.left(p);

                if self.color(w) == Color::Red {
                    trace!("delete fix-up: red sibling");
                    self.set_color(w, Color::Black);
                    self.set_color(p, Color::Red);
                    self.right_rotate(p);
                    w = self.left(self.parent(x));
                }

                if self.color(self.right(w)) == Color::Black
                    && self.color(self.left(w)) == Color::Black
                {
                    self.set_color(w, Color::Red);
                    x = self.parent(x);
                } else {
                    if self.color(self.left(w)) == Color::Black {
                        let wr = self.right(w);
                        self.set_color(wr, Color::Black);
                        self.set_color(w, Color::Red);
                        self.left_rotate(w);
                        w = self.left(self.parent(x));
                    }

                    let p = self.parent(x);
                    let pc = self.color(p);
                    self.set_color(w, pc);
                    self.set_color(p, Color::Black);
                    let wl = self.left(w);
                    self.set_color(wl, Color::Black);
                    self.right_rotate(p);
                    x = self.root;
                }
            }
        }

        self.set_color(x, Color::Black);
    }

    fn search(&self, key: i32) -> NodeId {
        let mut cursor = self.root;
        while cursor != self.nil {
            let k = self.key_of(cursor);
            if key == k {
                return cursor;
            }
            cursor = if key > k {
                self.right(cursor)
            } else {
                self.left(cursor)
            };
        }
        cursor
    }

    /// Node holding `key`, or the nil handle when absent.
    pub fn get(&self, key: i32) -> Handle {
        Handle::new(self.search(key))
    }

    pub fn get_value(&self, key: i32) -> Option<&str> {
        self.get(key).value(self)
    }

    pub fn contains_key(&self, key: i32) -> bool {
        self.search(key) != self.nil
    }

    fn min_of(&self, mut k: NodeId) -> NodeId {
        while self.left(k) != self.nil {
            k = self.left(k);
        }
        k
    }

    fn max_of(&self, mut k: NodeId) -> NodeId {
        while self.right(k) != self.nil {
            k = self.right(k);
        }
        k
    }

    /// Leftmost node under `root`. Nil (or a deleted node) yields nil.
    pub fn min(&self, root: Handle) -> Handle {
        match self.live_node(root.raw_handle()) {
            Some(_) => Handle::new(self.min_of(root.raw_handle())),
            None => self.nil(),
        }
    }

    /// Rightmost node under `root`. Nil (or a deleted node) yields nil.
    pub fn max(&self, root: Handle) -> Handle {
        match self.live_node(root.raw_handle()) {
            Some(_) => Handle::new(self.max_of(root.raw_handle())),
            None => self.nil(),
        }
    }

    /// Height in edges: -1 for nil or a deleted node, 0 for a leaf.
    pub fn height(&self, root: Handle) -> i32 {
        match self.live_node(root.raw_handle()) {
            Some(n) => {
                1 + self
                    .height(Handle::new(n.left))
                    .max(self.height(Handle::new(n.right)))
            }
            None => -1,
        }
    }

    fn successor(&self, k: NodeId) -> NodeId {
        let right = self.right(k);
        if right != self.nil {
            return self.min_of(right);
        }
        let mut x = k;
        let mut y = self.parent(x);
        while y != self.nil && x == self.right(y) {
            x = y;
            y = self.parent(y);
        }
        y
    }

    /// In-order walk over the whole tree.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            tree: self,
            cursor: self.min_of(self.root),
            remaining: self.len(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = i32> + '_ {
        self.iter().map(|(k, _)| k)
    }

    /// Checks every red-black and ordering property plus parent links and
    /// the node count. Returns the black height of the root (nil leaves
    /// counted, the root itself not).
    pub fn verify(&self) -> Result<usize, TreeViolation> {
        if self.color(self.nil) != Color::Black {
            return Err(TreeViolation::RedSentinel);
        }
        if self.root == self.nil {
            return Ok(0);
        }
        if self.color(self.root) == Color::Red {
            return Err(TreeViolation::RedRoot);
        }
        if self.parent(self.root) != self.nil {
            return Err(TreeViolation::BrokenParentLink {
                key: self.key_of(self.root),
            });
        }

        let mut reachable = 0;
        let below_root = self.verify_subtree(self.root, None, None, &mut reachable)?;
        if reachable != self.len() {
            return Err(TreeViolation::LenMismatch {
                reachable,
                len: self.len(),
            });
        }
        Ok(below_root - 1)
    }

    // Black nodes from `k` (inclusive) down to nil (inclusive). Keys must
    // lie within the inclusive bounds inherited from ancestors.
    fn verify_subtree(
        &self,
        k: NodeId,
        lo: Option<i32>,
        hi: Option<i32>,
        reachable: &mut usize,
    ) -> Result<usize, TreeViolation> {
        if k == self.nil {
            return Ok(1);
        }
        *reachable += 1;
        let node = &self.slots[k];
        let key = node.key;

        if lo.is_some_and(|lo| key < lo) || hi.is_some_and(|hi| key > hi) {
            return Err(TreeViolation::OrderViolation { key });
        }
        for child in [node.left, node.right] {
            if child != self.nil && self.parent(child) != k {
                return Err(TreeViolation::BrokenParentLink {
                    key: self.key_of(child),
                });
            }
        }
        if node.color == Color::Red
            && (self.color(node.left) == Color::Red || self.color(node.right) == Color::Red)
        {
            return Err(TreeViolation::RedRedEdge { key });
        }

        let left = self.verify_subtree(node.left, lo, Some(key), reachable)?;
        let right = self.verify_subtree(node.right, Some(key), hi, reachable)?;
        if left != right {
            return Err(TreeViolation::BlackHeightMismatch { key });
        }
        Ok(left + usize::from(node.color == Color::Black))
    }
}
