//! # Domain Services
//!
//! Pure helper functions for the diamond proxy: hashing, selector derivation,
//! and the minimal ABI word codec used by the governance calldata path.
//!
//! - NO I/O operations
//! - NO external state
//! - Pure functions only

use crate::domain::value_objects::{Address, Hash};
use sha3::{Digest, Keccak256};

// =============================================================================
// HASHING
// =============================================================================

/// Computes the Keccak-256 digest of arbitrary bytes.
#[must_use]
pub fn keccak256(data: &[u8]) -> Hash {
    let digest = Keccak256::digest(data);
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&digest);
    Hash::new(bytes)
}

/// Label hashed to the reserved storage-namespace position for the diamond's
/// own bookkeeping (registry, pause flag, privileged identities).
///
/// Facet slot storage is keyed independently of this position, so arbitrary
/// future facets cannot collide with the registry's own storage.
pub const DIAMOND_STORAGE_LABEL: &[u8] = b"diamond.router.diamond.storage";

/// The reserved namespace slot for diamond bookkeeping.
#[must_use]
pub fn diamond_storage_position() -> Hash {
    keccak256(DIAMOND_STORAGE_LABEL)
}

// =============================================================================
// ABI WORD CODEC
// =============================================================================
//
// The governance facet is addressed through the fallback dispatcher like any
// other facet, so its arguments arrive ABI-encoded: 32-byte words after the
// 4-byte selector, addresses right-aligned, dynamic arrays as offset + length
// + elements.

/// Encodes an address as a right-aligned 32-byte ABI word.
#[must_use]
pub fn encode_address_word(address: Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(address.as_bytes());
    word
}

/// Encodes a `usize` as a big-endian 32-byte ABI word.
#[must_use]
pub fn encode_usize_word(value: usize) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&(value as u64).to_be_bytes());
    word
}

/// Decodes a right-aligned address from a 32-byte ABI word.
///
/// Returns None if the word is malformed (non-zero padding) or out of range.
#[must_use]
pub fn decode_address_word(words: &[u8], index: usize) -> Option<Address> {
    let word = word_at(words, index)?;
    if word[..12] != [0u8; 12] {
        return None;
    }
    Address::from_slice(&word[12..])
}

/// Decodes a `usize` from a big-endian 32-byte ABI word.
///
/// Returns None if the word is out of range or the value exceeds `u64`.
#[must_use]
pub fn decode_usize_word(words: &[u8], index: usize) -> Option<usize> {
    let word = word_at(words, index)?;
    if word[..24] != [0u8; 24] {
        return None;
    }
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&word[24..]);
    usize::try_from(u64::from_be_bytes(buf)).ok()
}

/// Decodes a dynamic `address[]` argument at the given head-word index.
///
/// Layout: head word holds the byte offset of the tail; the tail starts with
/// a length word followed by one address word per element.
#[must_use]
pub fn decode_address_array(words: &[u8], head_index: usize) -> Option<Vec<Address>> {
    let offset = decode_usize_word(words, head_index)?;
    if offset % 32 != 0 {
        return None;
    }
    let tail_index = offset / 32;
    let len = decode_usize_word(words, tail_index)?;
    // The length word is attacker-controlled; bound it by the words actually
    // present before allocating.
    let available = words.len() / 32;
    if tail_index.checked_add(1)?.checked_add(len)? > available {
        return None;
    }
    let mut out = Vec::with_capacity(len);
    for i in 0..len {
        out.push(decode_address_word(words, tail_index + 1 + i)?);
    }
    Some(out)
}

/// Encodes a single-address calldata tail (one head word).
#[must_use]
pub fn encode_address_args(address: Address) -> Vec<u8> {
    encode_address_word(address).to_vec()
}

/// Encodes an `address[]` calldata tail (head offset + length + elements).
#[must_use]
pub fn encode_address_array_args(addresses: &[Address]) -> Vec<u8> {
    let mut out = Vec::with_capacity(32 * (2 + addresses.len()));
    out.extend_from_slice(&encode_usize_word(32)); // tail offset
    out.extend_from_slice(&encode_usize_word(addresses.len()));
    for address in addresses {
        out.extend_from_slice(&encode_address_word(*address));
    }
    out
}

/// Returns the 32-byte word at the given index, if fully present.
fn word_at(words: &[u8], index: usize) -> Option<&[u8]> {
    let start = index.checked_mul(32)?;
    let end = start.checked_add(32)?;
    words.get(start..end)
}

// =============================================================================
// TESTS
// =============================================================================
