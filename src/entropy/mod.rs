//! Entropy sources for coefficient generation.
//!
//! Every random polynomial coefficient is drawn through the [`EntropySource`] trait, so the
//! splitter never touches a global RNG. Production code uses [`OsSource`] (the operating
//! system CSPRNG); tests substitute a fixed or counting source to make splits reproducible.
//!
//! # Security
//! - Sources must be cryptographically secure in production. Reusing entropy across
//!   polynomials for the same intercept leaks the secret.
//! - A source that cannot supply the requested bytes must fail; it must never pad or repeat.

pub mod custom;
#[cfg(feature = "std")]
pub mod os;

use core::fmt;

pub use custom::CustomSource;
#[cfg(feature = "std")]
pub use os::OsSource;

/// Error types for entropy collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntropyError {
    /// Failed to collect sufficient entropy bytes.
    CollectionFailed,
    /// Source is exhausted (e.g., fixed buffer).
    Exhausted,
}

impl fmt::Display for EntropyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntropyError::CollectionFailed => write!(f, "entropy source failed to supply bytes"),
            EntropyError::Exhausted => write!(f, "entropy source exhausted"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EntropyError {}

/// A trait for entropy sources.
pub trait EntropySource {
    /// Returns a unique identifier for the source.
    fn name(&self) -> &'static str;

    /// Fills `dest` with random bytes from the source.
    ///
    /// # Returns
    /// * `Ok(())` on success.
    /// * `Err(EntropyError)` if the source cannot fill the whole buffer.
    fn fill(&mut self, dest: &mut [u8]) -> Result<(), EntropyError>;
}
