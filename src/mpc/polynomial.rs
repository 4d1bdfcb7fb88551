//! Random polynomial generation.
//!
//! One polynomial per encoded byte: the intercept carries the byte, the remaining
//! coefficients come straight from the entropy source.

use alloc::vec;
use alloc::vec::Vec;
use zeroize::Zeroizing;
use crate::entropy::{EntropyError, EntropySource};
use crate::gf256::Field;

/// Coefficients `[c0, c1, ..., c_degree]`, wiped on drop.
pub struct Polynomial {
    coefficients: Zeroizing<Vec<u8>>,
}

impl Polynomial {
    /// Generates a polynomial of `degree` with the given intercept and uniformly random
    /// higher coefficients.
    ///
    /// # Returns
    /// * `Err(EntropyError)` if the source cannot supply `degree` bytes.
    pub fn random<R: EntropySource + ?Sized>(
        intercept: u8,
        degree: u8,
        rng: &mut R,
    ) -> Result<Self, EntropyError> {
        let mut coefficients = Zeroizing::new(vec![0u8; degree as usize + 1]);
        coefficients[0] = intercept;
        rng.fill(&mut coefficients[1..])?;
        Ok(Polynomial { coefficients })
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    pub fn intercept(&self) -> u8 {
        self.coefficients[0]
    }

    pub fn coefficients(&self) -> &[u8] {
        &self.coefficients
    }

    /// f(x) over `field`.
    #[inline]
    pub fn evaluate(&self, field: &Field, x: u8) -> u8 {
        field.evaluate(&self.coefficients, x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::CustomSource;

    #[test]
    fn test_random_layout() {
        let mut rng = CustomSource::from_bytes(&[0x10, 0x11]);
        let poly = Polynomial::random(0x42, 2, &mut rng).unwrap();
        assert_eq!(poly.coefficients(), &[0x42, 0x10, 0x11]);
        assert_eq!(poly.degree(), 2);
        assert_eq!(poly.intercept(), 0x42);
        assert_eq!(rng.remaining(), 0);
    }

    #[test]
    fn test_evaluate() {
        // f(x) = 1 + 2x: f(1) = 3, f(2) = 5, f(3) = 7
        let field = Field::default_aes();
        let mut rng = CustomSource::from_bytes(&[0x02]);
        let poly = Polynomial::random(1, 1, &mut rng).unwrap();
        assert_eq!(poly.evaluate(&field, 0), 1);
        assert_eq!(poly.evaluate(&field, 1), 3);
        assert_eq!(poly.evaluate(&field, 2), 5);
        assert_eq!(poly.evaluate(&field, 3), 7);
    }

    #[test]
    fn test_entropy_exhaustion() {
        let mut rng = CustomSource::from_bytes(&[0x01]);
        assert!(matches!(Polynomial::random(7, 4, &mut rng), Err(EntropyError::Exhausted)));
    }
}
