//! Hash functions for the Bloom filter
//!
//! Two 32-bit non-cryptographic hashes feed the filter:
//!
//! - FNV (xor-then-multiply over each byte, 32-bit ring)
//! - MurmurHash3 x86_32 (4-byte blocks, tail, avalanche finalization)
//!
//! [`fnv1_hash32`] is the multiply-then-xor FNV-1 ordering; it is exported
//! for callers that need to interoperate with FNV-1 tables but is not used
//! for indexing.
//!
//! Both are computed exactly once per key. The `k` bit indices are then
//! derived from the pair by double hashing (Kirsch-Mitzenmacher):
//!
//! - round 1: `fnv mod m`
//! - round 2: `murmur mod m`
//! - round i > 2: `(fnv + murmur * i) mod m`

use std::hash::Hasher;

/// FNV 32-bit offset basis
pub const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
/// FNV 32-bit prime
pub const FNV_PRIME: u32 = 16_777_619;

const MURMUR_C1: u32 = 0xcc9e_2d51;
const MURMUR_C2: u32 = 0x1b87_3593;
const MURMUR_R1: u32 = 15;
const MURMUR_R2: u32 = 13;
const MURMUR_M: u32 = 5;
const MURMUR_N: u32 = 0xe654_6b64;

/// Hash a byte sequence with the 32-bit FNV hash used by the filter.
///
/// Each byte is XORed into the accumulator, which is then multiplied by
/// the FNV prime modulo 2^32. Empty input yields the offset basis.
pub fn fnv_hash32(data: &[u8]) -> u32 {
    let mut hasher = FnvHasher32::new();
    hasher.update(data);
    hasher.finish32()
}

/// 32-bit FNV-1: multiply by the prime first, then XOR in the byte.
pub fn fnv1_hash32(data: &[u8]) -> u32 {
    data.iter().fold(FNV_OFFSET_BASIS, |hash, &byte| {
        hash.wrapping_mul(FNV_PRIME) ^ u32::from(byte)
    })
}

/// Incremental form of [`fnv_hash32`].
///
/// Feeding a key in several chunks gives the same result as hashing the
/// concatenation in one call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FnvHasher32(u32);

impl FnvHasher32 {
    pub fn new() -> Self {
        Self(FNV_OFFSET_BASIS)
    }

    pub fn update(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.0 ^= u32::from(byte);
            self.0 = self.0.wrapping_mul(FNV_PRIME);
        }
    }

    pub fn finish32(&self) -> u32 {
        self.0
    }
}

impl Default for FnvHasher32 {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for FnvHasher32 {
    fn finish(&self) -> u64 {
        u64::from(self.0)
    }

    fn write(&mut self, bytes: &[u8]) {
        self.update(bytes);
    }
}

/// MurmurHash3 x86_32 with seed 0, as used by the filter.
pub fn murmur3_32(data: &[u8]) -> u32 {
    murmur3_32_seeded(data, 0)
}

/// MurmurHash3 x86_32 with an explicit seed.
pub fn murmur3_32_seeded(data: &[u8], seed: u32) -> u32 {
    let mut h = seed;

    let mut blocks = data.chunks_exact(4);
    for block in &mut blocks {
        let k = u32::from_le_bytes([block[0], block[1], block[2], block[3]]);
        h ^= murmur_mix_k(k);
        h = h
            .rotate_left(MURMUR_R2)
            .wrapping_mul(MURMUR_M)
            .wrapping_add(MURMUR_N);
    }

    // Tail starts at byte offset len - len % 4 and is only XORed into h.
    let tail = blocks.remainder();
    if !tail.is_empty() {
        let k = tail
            .iter()
            .enumerate()
            .fold(0u32, |acc, (j, &byte)| acc | (u32::from(byte) << (8 * j)));
        h ^= murmur_mix_k(k);
    }

    // Length is taken modulo 2^32, as in the reference implementation.
    murmur_fmix(h ^ data.len() as u32)
}

#[inline]
fn murmur_mix_k(k: u32) -> u32 {
    k.wrapping_mul(MURMUR_C1)
        .rotate_left(MURMUR_R1)
        .wrapping_mul(MURMUR_C2)
}

#[inline]
fn murmur_fmix(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}

/// The two base hashes of a key
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HashPair {
    pub fnv: u32,
    pub murmur: u32,
}

impl HashPair {
    /// Hash `key` once with each base function
    pub fn of(key: &[u8]) -> Self {
        Self {
            fnv: fnv_hash32(key),
            murmur: murmur3_32(key),
        }
    }

    /// Bit index for 1-based `round` in a vector of `m` bits.
    ///
    /// Rounds 1 and 2 use the raw hashes. Later rounds use the exact sum
    /// `fnv + murmur * round` without 32-bit wraparound; it fits in a u64
    /// for every round below 2^32.
    #[inline]
    pub fn round_index(&self, round: usize, m: usize) -> usize {
        debug_assert!(round >= 1, "rounds are 1-based");
        debug_assert!(m >= 1, "vector length must be positive");

        let raw = match round {
            1 => u64::from(self.fnv),
            2 => u64::from(self.murmur),
            i => u64::from(self.fnv) + u64::from(self.murmur) * i as u64,
        };
        (raw % m as u64) as usize
    }

    /// Indices for rounds `1..=k`, lazily
    pub fn indices(self, k: usize, m: usize) -> impl Iterator<Item = usize> {
        (1..=k).map(move |round| self.round_index(round, m))
    }
}

/// Compute the `k` bit positions for a key, one per round.
pub fn compute_hash_positions(key: &[u8], k: usize, m: usize) -> Vec<usize> {
    HashPair::of(key).indices(k, m).collect()
}
