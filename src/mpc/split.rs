//! Splitting a secret into shares.
//!
//! Each byte of the secret becomes the intercept of its own random polynomial of degree
//! `k - 1`; share `x` holds that polynomial evaluated at `x` for `x = 1..=n`.
//!
//! # Security
//! - **Fresh Coefficients**: Every polynomial draws new coefficients from the entropy source.
//! - **Zeroization**: Polynomial coefficients and partially built share columns are wiped,
//!   including on the error path.
//! - **Validation**: Checks threshold parameters ($2 \le k \le n$) and a non-empty secret before
//!   consuming any entropy.

use alloc::vec;
use alloc::vec::Vec;
use core::iter;
use zeroize::Zeroizing;
use crate::entropy::EntropySource;
use crate::gf256::Field;
use crate::mpc::polynomial::Polynomial;
use crate::mpc::share::{Share, ShareSet};
use crate::mpc::{MpcError, TAG_LENGTH};

/// Splits `secret` into `n` shares, any `k` of which reconstruct it.
///
/// Share indices run from 1 to `n`. The value of every share is `secret.len()` bytes.
///
/// # Returns
/// * `Err(MpcError::EmptySecret)` for an empty secret.
/// * `Err(MpcError::InvalidThreshold)` if `k < 2` or `n < k`.
/// * `Err(MpcError::Entropy(_))` if the entropy source fails; no shares are returned.
pub fn split<R: EntropySource + ?Sized>(
    field: &Field,
    secret: &[u8],
    k: u8,
    n: u8,
    rng: &mut R,
) -> Result<ShareSet, MpcError> {
    validate(secret, k, n)?;
    log::debug!("splitting {}-byte secret into {} shares, threshold {}", secret.len(), n, k);

    let mut columns = new_columns(n, secret.len());
    encode(field, secret.iter().copied(), 0, k - 1, &mut columns, rng)?;
    assemble(columns)
}

/// Like [`split`], but prefixes every share with [`TAG_LENGTH`] encoded zero bytes.
///
/// [`combine_tagged`](crate::mpc::combine::combine_tagged) checks that the prefix interpolates
/// back to zero before trusting the rest. Share values are `TAG_LENGTH + secret.len()` bytes.
pub fn split_tagged<R: EntropySource + ?Sized>(
    field: &Field,
    secret: &[u8],
    k: u8,
    n: u8,
    rng: &mut R,
) -> Result<ShareSet, MpcError> {
    validate(secret, k, n)?;
    log::debug!(
        "splitting {}-byte secret into {} tagged shares, threshold {}",
        secret.len(),
        n,
        k
    );

    let mut columns = new_columns(n, TAG_LENGTH + secret.len());
    encode(field, iter::repeat(0u8).take(TAG_LENGTH), 0, k - 1, &mut columns, rng)?;
    encode(field, secret.iter().copied(), TAG_LENGTH, k - 1, &mut columns, rng)?;
    assemble(columns)
}

fn validate(secret: &[u8], k: u8, n: u8) -> Result<(), MpcError> {
    if secret.is_empty() {
        return Err(MpcError::EmptySecret);
    }
    if k < 2 || n < k {
        return Err(MpcError::InvalidThreshold);
    }
    Ok(())
}

/// `columns[x - 1]` is the value of share `x`.
fn new_columns(n: u8, len: usize) -> Vec<Zeroizing<Vec<u8>>> {
    (0..n).map(|_| Zeroizing::new(vec![0u8; len])).collect()
}

/// Encodes each intercept at byte position `offset + i` of every column.
fn encode<I, R>(
    field: &Field,
    intercepts: I,
    offset: usize,
    degree: u8,
    columns: &mut [Zeroizing<Vec<u8>>],
    rng: &mut R,
) -> Result<(), MpcError>
where
    I: Iterator<Item = u8>,
    R: EntropySource + ?Sized,
{
    for (i, intercept) in intercepts.enumerate() {
        let poly = Polynomial::random(intercept, degree, rng)?;
        for (x, column) in (1..=u8::MAX).zip(columns.iter_mut()) {
            column[offset + i] = poly.evaluate(field, x);
        }
    }
    Ok(())
}

fn assemble(columns: Vec<Zeroizing<Vec<u8>>>) -> Result<ShareSet, MpcError> {
    let mut shares = ShareSet::new();
    for (x, mut column) in (1..=u8::MAX).zip(columns) {
        shares.insert(Share::new(x, core::mem::take(&mut *column))?)?;
    }
    Ok(shares)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::{CustomSource, EntropyError};
    use crate::mpc::testutil::MockEntropy;

    #[test]
    fn test_split_secret_basic() {
        let field = Field::default_aes();
        let mut rng = MockEntropy::new(0x10);
        let secret = [0x42, 0x99];

        let shares = split(&field, &secret, 2, 3, &mut rng).expect("Split failed");

        assert_eq!(shares.len(), 3);
        assert_eq!(shares.identifiers().collect::<Vec<_>>(), [1, 2, 3]);
        for share in &shares {
            assert_eq!(share.len(), 2);
        }
    }

    // f(x) = 0x42 + 0x10*x, so f(x) = 0x42 ^ (0x10 * x) for small x.
    #[test]
    fn test_split_known_answer() {
        let field = Field::default_aes();
        let mut rng = CustomSource::from_bytes(&[0x10]);
        let shares = split(&field, &[0x42], 2, 3, &mut rng).unwrap();

        assert_eq!(shares.get(1).unwrap().value(), &[0x52]);
        assert_eq!(shares.get(2).unwrap().value(), &[0x62]);
        assert_eq!(shares.get(3).unwrap().value(), &[0x72]);
    }

    #[test]
    fn test_split_tagged_layout() {
        let field = Field::default_aes();
        let mut rng = MockEntropy::new(0x01);
        let shares = split_tagged(&field, b"HELLO", 3, 5, &mut rng).unwrap();

        assert_eq!(shares.len(), 5);
        for share in &shares {
            assert_eq!(share.len(), TAG_LENGTH + 5);
        }
    }

    #[test]
    fn test_invalid_params() {
        let field = Field::default_aes();
        let mut rng = MockEntropy::new(0);
        let secret = [1, 2, 3];

        assert_eq!(split(&field, &secret, 4, 3, &mut rng), Err(MpcError::InvalidThreshold));
        assert_eq!(split(&field, &secret, 1, 3, &mut rng), Err(MpcError::InvalidThreshold));
        assert_eq!(split(&field, &secret, 0, 0, &mut rng), Err(MpcError::InvalidThreshold));
        assert_eq!(split(&field, &[], 2, 3, &mut rng), Err(MpcError::EmptySecret));
        assert_eq!(split_tagged(&field, &secret, 1, 1, &mut rng), Err(MpcError::InvalidThreshold));
        assert_eq!(split_tagged(&field, &[], 2, 3, &mut rng), Err(MpcError::EmptySecret));
        // Empty secret is reported before a bad threshold.
        assert_eq!(split(&field, &[], 1, 0, &mut rng), Err(MpcError::EmptySecret));
    }

    #[test]
    fn test_validation_precedes_entropy_use() {
        let field = Field::default_aes();
        let mut rng = CustomSource::from_bytes(&[0xAA; 4]);
        assert!(split(&field, &[1], 1, 3, &mut rng).is_err());
        assert_eq!(rng.remaining(), 4);
    }

    #[test]
    fn test_entropy_failure_aborts() {
        let field = Field::default_aes();
        // Three bytes of degree-2 polynomials need 6 random bytes.
        let mut rng = CustomSource::from_bytes(&[0x01; 5]);
        assert_eq!(
            split(&field, &[1, 2, 3], 3, 4, &mut rng),
            Err(MpcError::Entropy(EntropyError::Exhausted))
        );

        // The tag alone needs 8 bytes at k = 2.
        let mut rng = CustomSource::from_bytes(&[0x01; 7]);
        assert_eq!(
            split_tagged(&field, &[1], 2, 2, &mut rng),
            Err(MpcError::Entropy(EntropyError::Exhausted))
        );
    }

    #[test]
    fn test_boundary_thresholds() {
        let field = Field::default_aes();
        let mut rng = MockEntropy::new(0x33);

        let pair = split(&field, b"xy", 2, 2, &mut rng).unwrap();
        assert_eq!(pair.len(), 2);

        let full = split(&field, b"xy", 255, 255, &mut rng).unwrap();
        assert_eq!(full.len(), 255);
        assert!(full.contains(255));
        assert!(!full.contains(0));
    }
}
