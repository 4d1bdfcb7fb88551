//! Threshold Secret Sharing.
//!
//! Shamir's Secret Sharing over a configurable GF(2^8), applied byte-wise.
//!
//! # Components
//! - `share`: A share, its wire encoding, and the index-keyed `ShareSet`.
//! - `polynomial`: Random polynomial generation from an entropy source.
//! - `split`: Secret → shares (plain and tagged).
//! - `combine`: Shares → secret via Lagrange interpolation (plain and tagged).
//!
//! # Tagging
//! The tagged variants encode [`TAG_LENGTH`] zero bytes ahead of the secret. On
//! reconstruction those bytes must interpolate back to zero, which fails with overwhelming
//! probability for insufficient, mixed or tag-corrupted share sets. The plain variants carry
//! no such check: too few shares silently produce a wrong secret.

pub mod share;
pub mod polynomial;
pub mod split;
pub mod combine;

use alloc::vec::Vec;
use core::fmt;
use crate::entropy::{EntropyError, EntropySource};
use crate::gf256::{Field, FieldError};

pub use combine::{combine, combine_tagged};
pub use share::{Share, ShareSet};
pub use split::{split, split_tagged};

/// Number of zero bytes prepended by the tagged scheme.
pub const TAG_LENGTH: usize = 8;

/// Errors for secret sharing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MpcError {
    /// Invalid share index (must be 1..=255).
    InvalidShareIndex,
    /// Share value is empty.
    EmptyShare,
    /// Secret to split is empty.
    EmptySecret,
    /// Threshold configuration error (k < 2 or n < k).
    InvalidThreshold,
    /// Duplicate share indices provided.
    DuplicateShareIndex,
    /// Mismatch in share lengths.
    ShareLengthMismatch,
    /// Tagged share too short to contain the tag.
    ShareTooShort,
    /// Share bytes could not be decoded.
    MalformedShare,
    /// Tag did not interpolate to zero.
    TagMismatch,
    /// Entropy source failure.
    Entropy(EntropyError),
    /// Field arithmetic failure.
    Field(FieldError),
}

impl fmt::Display for MpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MpcError::InvalidShareIndex => write!(f, "share index must be in 1..=255"),
            MpcError::EmptyShare => write!(f, "share value is empty"),
            MpcError::EmptySecret => write!(f, "secret is empty"),
            MpcError::InvalidThreshold => {
                write!(f, "threshold must satisfy 2 <= k <= n <= 255")
            }
            MpcError::DuplicateShareIndex => write!(f, "duplicate share index"),
            MpcError::ShareLengthMismatch => write!(f, "shares have different lengths"),
            MpcError::ShareTooShort => {
                write!(f, "share shorter than the {}-byte tag", TAG_LENGTH)
            }
            MpcError::MalformedShare => write!(f, "malformed share encoding"),
            MpcError::TagMismatch => {
                write!(f, "tag mismatch: insufficient, mismatched or corrupted shares")
            }
            MpcError::Entropy(e) => write!(f, "generating polynomial: {}", e),
            MpcError::Field(e) => write!(f, "field arithmetic: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MpcError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MpcError::Entropy(e) => Some(e),
            MpcError::Field(e) => Some(e),
            _ => None,
        }
    }
}

impl From<EntropyError> for MpcError {
    fn from(e: EntropyError) -> Self {
        MpcError::Entropy(e)
    }
}

impl From<FieldError> for MpcError {
    fn from(e: FieldError) -> Self {
        MpcError::Field(e)
    }
}

/// Trait for Secret Sharing Schemes.
pub trait SecretSharingScheme {
    type Shares;
    type Secret;
    type Error;

    /// Splits a secret into n shares with threshold k.
    fn split<R: EntropySource + ?Sized>(
        &self,
        secret: &[u8],
        k: u8,
        n: u8,
        rng: &mut R,
    ) -> Result<Self::Shares, Self::Error>;

    /// Reconstructs a secret from shares.
    fn combine(&self, shares: &Self::Shares) -> Result<Self::Secret, Self::Error>;
}

/// Shamir's Secret Sharing over a fixed field, plain or tagged.
#[derive(Debug, Clone)]
pub struct Shamir {
    field: Field,
    tagged: bool,
}

impl Shamir {
    pub fn new(field: Field, tagged: bool) -> Self {
        Self { field, tagged }
    }

    /// Untagged scheme: no sufficiency check on combine.
    pub fn plain(field: Field) -> Self {
        Self::new(field, false)
    }

    /// Tagged scheme: shares carry a [`TAG_LENGTH`]-byte zero tag.
    pub fn tagged(field: Field) -> Self {
        Self::new(field, true)
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn is_tagged(&self) -> bool {
        self.tagged
    }
}

impl SecretSharingScheme for Shamir {
    type Shares = ShareSet;
    type Secret = Vec<u8>;
    type Error = MpcError;

    fn split<R: EntropySource + ?Sized>(
        &self,
        secret: &[u8],
        k: u8,
        n: u8,
        rng: &mut R,
    ) -> Result<Self::Shares, Self::Error> {
        if self.tagged {
            split::split_tagged(&self.field, secret, k, n, rng)
        } else {
            split::split(&self.field, secret, k, n, rng)
        }
    }

    fn combine(&self, shares: &Self::Shares) -> Result<Self::Secret, Self::Error> {
        if self.tagged {
            combine::combine_tagged(&self.field, shares)
        } else {
            combine::combine(&self.field, shares)
        }
    }
}
