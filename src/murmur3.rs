//! MurmurHash3, x86 32-bit variant.
//!
//! Non-cryptographic and deterministic: the same bytes and seed always map
//! to the same value, which is what bucket placement in
//! [`ChainedHashMap`](crate::ChainedHashMap) relies on across rehashes.

const C1: u32 = 0xcc9e_2d51;
const C2: u32 = 0x1b87_3593;
const R1: u32 = 15;
const R2: u32 = 13;
const M: u32 = 5;
const N: u32 = 0xe654_6b64;

#[inline]
fn scramble(k: u32) -> u32 {
    k.wrapping_mul(C1).rotate_left(R1).wrapping_mul(C2)
}

#[inline]
fn fmix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}

/// Hashes `key` with `seed`.
pub fn murmur3_32(key: &[u8], seed: u32) -> u32 {
    let mut hash = seed;

    let mut chunks = key.chunks_exact(4);
    for chunk in &mut chunks {
        let k = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        hash ^= scramble(k);
        hash = hash.rotate_left(R2).wrapping_mul(M).wrapping_add(N);
    }

    // Tail of 1..=3 bytes, little-endian.
    let tail = chunks.remainder();
    if !tail.is_empty() {
        let k = tail
            .iter()
            .rev()
            .fold(0u32, |acc, &b| (acc << 8) | u32::from(b));
        hash ^= scramble(k);
    }

    // Only the low 32 bits of the length take part, as in the reference.
    hash ^= key.len() as u32;
    fmix32(hash)
}
