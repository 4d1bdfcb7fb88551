//! Secret Share Definition.
//!
//! A share is a column of points $(x, y_i)$, one per encoded byte, on the per-byte
//! polynomials used to hide the secret.
//! - $x$ (identifier): A non-zero byte unique to each custodian.
//! - $y_i$ (value): The evaluation of polynomial $i$ at $x$.
//!
//! # Wire Format
//! `[x] || value`, one index byte followed by the raw value bytes. No header, length field
//! or checksum. [`Share::to_hex`] carries the same bytes as lowercase hex.
//!
//! # Security
//! - Implements `Zeroize` and `ZeroizeOnDrop` to wipe sensitive data from memory.
//! - `Debug` implementation redacts the actual value.

use alloc::collections::btree_map::{self, BTreeMap};
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};
use super::MpcError;

/// One participant's share: the evaluation point and one polynomial value per encoded byte.
///
/// The value is wiped on drop. The index is not secret and is left alone.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Share {
    #[zeroize(skip)]
    identifier: u8,
    value: Vec<u8>,
}

impl fmt::Debug for Share {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Share({}, {} bytes, <redacted>)", self.identifier, self.value.len())
    }
}

impl Share {
    /// Creates a new share with validation.
    ///
    /// # Returns
    /// * `Err(MpcError::InvalidShareIndex)` if `identifier == 0` (reserved for the secret).
    /// * `Err(MpcError::EmptyShare)` if `value` is empty.
    pub fn new(identifier: u8, value: Vec<u8>) -> Result<Self, MpcError> {
        if identifier == 0 {
            return Err(MpcError::InvalidShareIndex);
        }
        if value.is_empty() {
            return Err(MpcError::EmptyShare);
        }
        Ok(Self { identifier, value })
    }

    /// The share index (x-coordinate).
    pub fn identifier(&self) -> u8 {
        self.identifier
    }

    /// Returns a reference to the value bytes.
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Length of the value in bytes, excluding the index byte.
    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Serializes to the wire format `[identifier] || value`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(1 + self.value.len());
        out.push(self.identifier);
        out.extend_from_slice(&self.value);
        out
    }

    /// Parses the wire format produced by [`Share::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MpcError> {
        match bytes.split_first() {
            Some((&identifier, value)) => Share::new(identifier, value.to_vec()),
            None => Err(MpcError::MalformedShare),
        }
    }

    /// Hex-encoded wire format.
    pub fn to_hex(&self) -> String {
        let bytes = zeroize::Zeroizing::new(self.to_bytes());
        hex::encode(&*bytes)
    }

    /// Parses [`Share::to_hex`] output. Surrounding whitespace is ignored.
    pub fn from_hex(text: &str) -> Result<Self, MpcError> {
        let bytes = zeroize::Zeroizing::new(
            hex::decode(text.trim()).map_err(|_| MpcError::MalformedShare)?,
        );
        Share::from_bytes(&bytes)
    }
}

/// Shares keyed by their index.
///
/// Keys are unique by construction. Iteration happens to be in index order, but nothing in
/// reconstruction depends on it.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ShareSet {
    shares: BTreeMap<u8, Share>,
}

impl fmt::Debug for ShareSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.shares.values()).finish()
    }
}

impl ShareSet {
    pub fn new() -> Self {
        Self { shares: BTreeMap::new() }
    }

    /// Builds a set from individual shares, rejecting repeated indices.
    pub fn from_shares<I>(shares: I) -> Result<Self, MpcError>
    where
        I: IntoIterator<Item = Share>,
    {
        let mut set = ShareSet::new();
        for share in shares {
            set.insert(share)?;
        }
        Ok(set)
    }

    /// Adds a share.
    ///
    /// # Returns
    /// * `Err(MpcError::DuplicateShareIndex)` if a share with the same index is present.
    pub fn insert(&mut self, share: Share) -> Result<(), MpcError> {
        match self.shares.entry(share.identifier) {
            btree_map::Entry::Occupied(_) => Err(MpcError::DuplicateShareIndex),
            btree_map::Entry::Vacant(slot) => {
                slot.insert(share);
                Ok(())
            }
        }
    }

    /// Inserts or overwrites the share at its index, returning the previous one.
    pub fn replace(&mut self, share: Share) -> Option<Share> {
        self.shares.insert(share.identifier, share)
    }

    pub fn remove(&mut self, identifier: u8) -> Option<Share> {
        self.shares.remove(&identifier)
    }

    pub fn get(&self, identifier: u8) -> Option<&Share> {
        self.shares.get(&identifier)
    }

    pub fn contains(&self, identifier: u8) -> bool {
        self.shares.contains_key(&identifier)
    }

    pub fn len(&self) -> usize {
        self.shares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Share> {
        self.shares.values()
    }

    pub fn identifiers(&self) -> impl Iterator<Item = u8> + '_ {
        self.shares.keys().copied()
    }

    /// Copies out the shares whose indices appear in `identifiers`. Unknown indices are skipped.
    pub fn subset(&self, identifiers: &[u8]) -> ShareSet {
        let shares = identifiers
            .iter()
            .filter_map(|x| self.shares.get(x))
            .map(|s| (s.identifier, s.clone()))
            .collect();
        ShareSet { shares }
    }

    /// Common value length of all shares; `None` for an empty set.
    pub(crate) fn value_len(&self) -> Result<Option<usize>, MpcError> {
        let mut lengths = self.shares.values().map(Share::len);
        let first = match lengths.next() {
            Some(len) => len,
            None => return Ok(None),
        };
        if lengths.any(|len| len != first) {
            return Err(MpcError::ShareLengthMismatch);
        }
        Ok(Some(first))
    }
}

impl IntoIterator for ShareSet {
    type Item = Share;
    type IntoIter = btree_map::IntoValues<u8, Share>;

    fn into_iter(self) -> Self::IntoIter {
        self.shares.into_values()
    }
}

impl<'a> IntoIterator for &'a ShareSet {
    type Item = &'a Share;
    type IntoIter = btree_map::Values<'a, u8, Share>;

    fn into_iter(self) -> Self::IntoIter {
        self.shares.values()
    }
}
