//! LinkedList: doubly linked chain of owned `(key, value)` string pairs.
//!
//! Nodes live in a `SlotMap` and link to each other by generational key,
//! so `prev`/`next` are plain indices rather than owning pointers. The
//! list is the collision chain behind each bucket of
//! [`ChainedHashMap`](crate::ChainedHashMap).

use crate::reserve::reserve_slot;
use slotmap::{DefaultKey, SlotMap};
use std::collections::TryReserveError;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Handle(DefaultKey);

impl Handle {
    pub(crate) fn new(k: DefaultKey) -> Self {
        Handle(k)
    }
    pub(crate) fn raw_handle(&self) -> DefaultKey {
        self.0
    }

    pub fn key<'a>(&self, list: &'a LinkedList) -> Option<&'a str> {
        list.handle_key(*self)
    }

    pub fn value<'a>(&self, list: &'a LinkedList) -> Option<&'a str> {
        list.handle_value(*self)
    }

    pub fn value_mut<'a>(&self, list: &'a mut LinkedList) -> Option<&'a mut String> {
        list.handle_value_mut(*self)
    }

    /// Following node, `None` at the tail or for a removed node.
    pub fn next(&self, list: &LinkedList) -> Option<Handle> {
        list.slots.get(self.0)?.next.map(Handle::new)
    }

    pub fn prev(&self, list: &LinkedList) -> Option<Handle> {
        list.slots.get(self.0)?.prev.map(Handle::new)
    }
}

/// Result of a linear search: the matching node and its zero-based
/// distance from the head.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Hit {
    pub handle: Handle,
    pub position: usize,
}

#[derive(Debug)]
struct Node {
    key: String,
    value: String,
    prev: Option<DefaultKey>,
    next: Option<DefaultKey>,
}

#[derive(Debug, Default)]
pub struct LinkedList {
    slots: SlotMap<DefaultKey, Node>,
    head: Option<DefaultKey>,
    tail: Option<DefaultKey>,
}

/// Iterator over `(key, value)` pairs from head to tail.
pub struct Iter<'a> {
    list: &'a LinkedList,
    cursor: Option<DefaultKey>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.slots.get(self.cursor?)?;
        self.cursor = node.next;
        self.remaining -= 1;
        Some((node.key.as_str(), node.value.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl LinkedList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn first(&self) -> Option<Handle> {
        self.head.map(Handle::new)
    }
    pub fn last(&self) -> Option<Handle> {
        self.tail.map(Handle::new)
    }

    /// Inserts a node in front of the current head. On allocation failure
    /// the list is unchanged.
    pub fn prepend(&mut self, key: String, value: String) -> Result<Handle, TryReserveError> {
        reserve_slot(&mut self.slots)?;
        let old_head = self.head;
        let k = self.slots.insert(Node {
            key,
            value,
            prev: None,
            next: old_head,
        });
        match old_head {
            Some(h) => self.slots[h].prev = Some(k),
            None => self.tail = Some(k),
        }
        self.head = Some(k);
        Ok(Handle::new(k))
    }

    /// Inserts a node after the current tail. On allocation failure the
    /// list is unchanged.
    pub fn append(&mut self, key: String, value: String) -> Result<Handle, TryReserveError> {
        reserve_slot(&mut self.slots)?;
        Ok(self.append_reserved(key, value))
    }

    /// Makes room for `additional` more nodes.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.slots.try_reserve(additional)
    }

    // Caller has reserved the slot; never reallocates.
    pub(crate) fn append_reserved(&mut self, key: String, value: String) -> Handle {
        let old_tail = self.tail;
        let k = self.slots.insert(Node {
            key,
            value,
            prev: old_tail,
            next: None,
        });
        match old_tail {
            Some(t) => self.slots[t].next = Some(k),
            None => self.head = Some(k),
        }
        self.tail = Some(k);
        Handle::new(k)
    }

    pub fn remove_first(&mut self) -> Option<(String, String)> {
        let k = self.head?;
        self.unlink(k)
    }

    pub fn remove_last(&mut self) -> Option<(String, String)> {
        let k = self.tail?;
        self.unlink(k)
    }

    /// Removes the first node whose key equals `key`.
    pub fn remove(&mut self, key: &str) -> Option<(String, String)> {
        let hit = self.find(key)?;
        self.unlink(hit.handle.raw_handle())
    }

    /// Walks from the head and stops at the first node holding `key`.
    pub fn find(&self, key: &str) -> Option<Hit> {
        let mut cursor = self.head;
        let mut position = 0;
        while let Some(k) = cursor {
            let node = &self.slots[k];
            if node.key == key {
                return Some(Hit {
                    handle: Handle::new(k),
                    position,
                });
            }
            cursor = node.next;
            position += 1;
        }
        None
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len(),
        }
    }

    pub(crate) fn handle_key(&self, h: Handle) -> Option<&str> {
        self.slots.get(h.raw_handle()).map(|n| n.key.as_str())
    }

    pub(crate) fn handle_value(&self, h: Handle) -> Option<&str> {
        self.slots.get(h.raw_handle()).map(|n| n.value.as_str())
    }

    pub(crate) fn handle_value_mut(&mut self, h: Handle) -> Option<&mut String> {
        self.slots.get_mut(h.raw_handle()).map(|n| &mut n.value)
    }

    // Relink neighbours around `k`, then release its slot.
    fn unlink(&mut self, k: DefaultKey) -> Option<(String, String)> {
        let node = self.slots.remove(k)?;
        match node.prev {
            Some(p) => self.slots[p].next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(n) => self.slots[n].prev = node.prev,
            None => self.tail = node.prev,
        }
        Some((node.key, node.value))
    }
}
