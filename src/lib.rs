//! rbchain: an arena-backed red-black tree and a separate-chaining string
//! hash map built on an arena-backed doubly linked list.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: classic pointer-graph structures expressed with safe indexing,
//!   so every parent/child/sibling link is a generational key into an
//!   arena owned by the structure itself.
//! - Layers:
//!   - `murmur3_32`: deterministic 32-bit hash used for bucket placement.
//!   - `LinkedList`: doubly linked chain of `(String, String)` pairs; the
//!     collision chain of one bucket.
//!   - `ChainedHashMap`: `Vec<LinkedList>` buckets, power-of-two capacity,
//!     doubles and rehashes when the load factor reaches its threshold.
//!   - `RbTree`: `i32`-keyed red-black tree with a per-tree nil sentinel.
//!
//! Constraints
//! - Single-threaded; mutation goes through `&mut self`, which is the only
//!   serialization these types need. Wrap them in a lock to share them.
//! - No `unsafe`. Links are `slotmap` keys; a stale `Handle` resolves to
//!   `None` rather than to whatever reused the slot.
//! - Keys and values are copied in on insert; callers keep their strings.
//!
//! Sentinel
//! - Each `RbTree` allocates one nil node in its own arena. Empty child
//!   slots and the root's parent all hold its key, so color checks on an
//!   absent child read `Black` without a branch. Deletion may temporarily
//!   point the sentinel's parent at the node above a vacated slot; the
//!   fix-up climbs from there. The link is reset before `delete` returns.
//!
//! Growth
//! - `ChainedHashMap::add` checks `len / capacity >= max_load_factor`
//!   before inserting a new key. Growth reserves the doubled bucket array
//!   fallibly, along with room in each new chain for the entries it will
//!   receive, then re-places each entry by `hash % new_capacity`. Failure
//!   leaves the map as it was; there is no half-rehashed state.
//!
//! Errors
//! - `MapError` for construction and insertion failures, `TreeError` for a
//!   refused tree insert, `TreeViolation` from `RbTree::verify`. Missing keys are not errors: lookups return
//!   `None` or the nil handle, and `RbTree::delete` returns `false`.
//!
//! Notes and non-goals
//! - No persistence, no concurrent access, no generic key/value types.
//! - Duplicate tree keys are kept (multiset); a re-added map key replaces
//!   its value.
//! - Inserts reserve their arena slot and copy their strings with
//!   `try_reserve` before touching any link, so running out of memory is
//!   an `Err` and never an abort. A map add that fails after a grow keeps
//!   the grown, fully rehashed table.

pub mod chained_hash_map;
pub mod error;
pub mod linked_list;
mod linked_list_proptest;
pub mod murmur3;
pub mod rb_tree;
mod reserve;

// Public surface
pub use chained_hash_map::{ChainedHashMap, MapConfig};
pub use error::{MapError, TreeError, TreeViolation};
pub use linked_list::LinkedList;
pub use murmur3::murmur3_32;
pub use rb_tree::{Color, RbTree};
