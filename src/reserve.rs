//! Fallible allocation for node inserts.
//!
//! Every allocation an insert performs goes through here first, so an
//! allocator refusal comes back as `TryReserveError` before any link is
//! touched. Test builds can make the n-th call fail with
//! [`fail_after`].

use slotmap::{Key, SlotMap};
use std::collections::TryReserveError;

/// Owned copy of `s`.
pub(crate) fn try_copy(s: &str) -> Result<String, TryReserveError> {
    injected()?;
    let mut out = String::new();
    out.try_reserve_exact(s.len())?;
    out.push_str(s);
    Ok(out)
}

/// Room for one more node; the following `insert` does not allocate.
pub(crate) fn reserve_slot<K: Key, V>(slots: &mut SlotMap<K, V>) -> Result<(), TryReserveError> {
    injected()?;
    slots.try_reserve(1)
}

/// Empty vector with room for exactly `capacity` elements.
pub(crate) fn try_with_capacity<T>(capacity: usize) -> Result<Vec<T>, TryReserveError> {
    injected()?;
    let mut v = Vec::new();
    v.try_reserve_exact(capacity)?;
    Ok(v)
}

#[cfg(not(test))]
#[inline(always)]
fn injected() -> Result<(), TryReserveError> {
    Ok(())
}

#[cfg(test)]
thread_local! {
    static FAIL_AFTER: std::cell::Cell<Option<usize>> = const { std::cell::Cell::new(None) };
}

/// Lets `n` fallible allocations on this thread succeed, then fails the
/// next one. The hook disarms itself after firing.
#[cfg(test)]
pub(crate) fn fail_after(n: usize) {
    FAIL_AFTER.with(|c| c.set(Some(n)));
}

#[cfg(test)]
fn injected() -> Result<(), TryReserveError> {
    FAIL_AFTER.with(|c| match c.get() {
        Some(0) => {
            c.set(None);
            // Capacity overflow: a real TryReserveError without touching the allocator.
            Vec::<u8>::new().try_reserve(usize::MAX)
        }
        Some(n) => {
            c.set(Some(n - 1));
            Ok(())
        }
        None => Ok(()),
    })
}
