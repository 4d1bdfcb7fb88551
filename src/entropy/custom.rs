//! Caller-Provided Entropy Source.
//!
//! Hands out bytes from a buffer filled by the caller. Useful for replaying a known
//! coefficient stream (test vectors, reproducible splits) and for exercising exhaustion.

use alloc::vec::Vec;
use super::{EntropyError, EntropySource};

/// Source that buffers caller-injected entropy.
pub struct CustomSource {
    buffer: Vec<u8>,
}

impl CustomSource {
    /// Creates a new empty CustomSource.
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Creates a source preloaded with `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self { buffer: bytes.to_vec() }
    }

    /// Add entropy bytes to the pool.
    pub fn add_bytes(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// Bytes still available.
    pub fn remaining(&self) -> usize {
        self.buffer.len()
    }
}

impl Default for CustomSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EntropySource for CustomSource {
    fn name(&self) -> &'static str {
        "CustomInput"
    }

    fn fill(&mut self, dest: &mut [u8]) -> Result<(), EntropyError> {
        if self.buffer.len() < dest.len() {
            return Err(EntropyError::Exhausted);
        }

        let len = dest.len();
        for (d, s) in dest.iter_mut().zip(self.buffer.drain(0..len)) {
            *d = s;
        }
        Ok(())
    }
}
