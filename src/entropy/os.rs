//! Operating-system CSPRNG source.
//!
//! Thin adapter from `rand_core::OsRng` (getrandom) to [`EntropySource`].

use rand_core::{OsRng, RngCore};
use super::{EntropyError, EntropySource};

/// Entropy from the OS random number generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsSource;

impl OsSource {
    pub fn new() -> Self {
        OsSource
    }
}

impl EntropySource for OsSource {
    fn name(&self) -> &'static str {
        "OsRng"
    }

    fn fill(&mut self, dest: &mut [u8]) -> Result<(), EntropyError> {
        OsRng.try_fill_bytes(dest).map_err(|e| {
            log::warn!("OS entropy source failed: {}", e);
            EntropyError::CollectionFailed
        })
    }
}
