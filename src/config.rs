//! Configuration management.
//!
//! Defines the user-configurable parameters of a sharing scheme. The host application
//! (CLI, service) populates a [`ShamirConfig`] and builds the field and scheme from it once.

use crate::gf256::{Field, FieldError, GEN_AES, POLY_AES};
use crate::mpc::Shamir;

/// Main configuration structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ShamirConfig {
    /// Reduction polynomial of the field (9-bit, or the reduced low byte).
    pub modulus: u16,

    /// Primitive element used to build the log/antilog tables.
    pub generator: u8,

    /// Whether shares carry the zero tag for integrity checking.
    pub tagged: bool,
}

impl Default for ShamirConfig {
    fn default() -> Self {
        Self {
            modulus: POLY_AES,
            generator: GEN_AES,
            tagged: false,
        }
    }
}

impl ShamirConfig {
    /// Builds the configured field, validating the generator.
    pub fn field(&self) -> Result<Field, FieldError> {
        Field::new(self.modulus, self.generator)
    }

    /// Builds the configured scheme.
    pub fn scheme(&self) -> Result<Shamir, FieldError> {
        Ok(Shamir::new(self.field()?, self.tagged))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mpc::SecretSharingScheme;
    use crate::mpc::testutil::MockEntropy;

    #[test]
    fn test_default_is_aes() {
        let config = ShamirConfig::default();
        assert_eq!(config.modulus, 0x11B);
        assert_eq!(config.generator, 0x03);
        assert!(!config.tagged);
        assert_eq!(config.field().unwrap(), Field::default_aes());
    }

    #[test]
    fn test_invalid_generator_rejected() {
        let config = ShamirConfig { generator: 0x02, ..ShamirConfig::default() };
        assert!(matches!(config.field(), Err(FieldError::NonPrimitiveGenerator { .. })));
        assert!(config.scheme().is_err());
    }

    #[test]
    fn test_scheme_from_config() {
        let config = ShamirConfig { modulus: 0x11D, generator: 0x02, tagged: true };
        let scheme = config.scheme().unwrap();
        assert!(scheme.is_tagged());
        assert_eq!(scheme.field().modulus(), 0x11D);

        let mut rng = MockEntropy::new(9);
        let shares = scheme.split(b"k", 3, 3, &mut rng).unwrap();
        assert_eq!(scheme.combine(&shares).unwrap(), b"k");
    }
}
