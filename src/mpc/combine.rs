//! Secret reconstruction from shares.
//!
//! This module implements Lagrange interpolation at x=0 to recover each encoded byte from
//! the shares supplied.
//!
//! # Sufficiency
//! Interpolation cannot tell how many shares the secret was split for. [`combine`] given fewer
//! than `k` shares returns a wrong value without error. [`combine_tagged`] detects this (and
//! wrong or mixed share sets) with probability $1 - 2^{-64}$ by checking the encoded zero tag.

use alloc::vec::Vec;
use core::ops::Range;
use crate::gf256::Field;
use crate::mpc::share::ShareSet;
use crate::mpc::{MpcError, TAG_LENGTH};

/// Reconstructs the secret from untagged shares.
///
/// An empty share set yields an empty secret.
///
/// # Returns
/// * `Ok(Vec<u8>)` - The interpolated bytes; only correct if at least `k` genuine shares
///   from the same split were supplied.
/// * `Err(MpcError::ShareLengthMismatch)` - Share values differ in length.
pub fn combine(field: &Field, shares: &ShareSet) -> Result<Vec<u8>, MpcError> {
    let len = match shares.value_len()? {
        Some(len) => len,
        None => return Ok(Vec::new()),
    };
    log::debug!("combining {} shares of {} bytes", shares.len(), len);

    let weights = intercept_weights(field, shares)?;
    Ok(interpolate_range(field, shares, &weights, 0..len))
}

/// Reconstructs the secret from tagged shares, verifying the tag first.
///
/// # Returns
/// * `Err(MpcError::TagMismatch)` - The tag did not interpolate to zero: too few shares,
///   shares from different splits, or a corrupted tag region. No secret bytes are computed.
/// * `Err(MpcError::ShareTooShort)` - Values cannot even hold the tag.
/// * `Err(MpcError::ShareLengthMismatch)` - Share values differ in length.
pub fn combine_tagged(field: &Field, shares: &ShareSet) -> Result<Vec<u8>, MpcError> {
    let len = match shares.value_len()? {
        Some(len) => len,
        None => return Ok(Vec::new()),
    };
    if len < TAG_LENGTH {
        return Err(MpcError::ShareTooShort);
    }
    log::debug!("combining {} tagged shares of {} bytes", shares.len(), len);

    let weights = intercept_weights(field, shares)?;
    let tag = interpolate_range(field, shares, &weights, 0..TAG_LENGTH);
    if tag.iter().any(|&b| b != 0) {
        log::warn!(
            "tag mismatch combining shares {:?}",
            shares.identifiers().collect::<Vec<_>>()
        );
        return Err(MpcError::TagMismatch);
    }

    Ok(interpolate_range(field, shares, &weights, TAG_LENGTH..len))
}

/// Lagrange weights at x=0 for the share indices, in `ShareSet` iteration order.
fn intercept_weights(field: &Field, shares: &ShareSet) -> Result<Vec<u8>, MpcError> {
    let xs: Vec<u8> = shares.identifiers().collect();
    Ok(field.lagrange_weights(&xs, 0)?)
}

fn interpolate_range(
    field: &Field,
    shares: &ShareSet,
    weights: &[u8],
    positions: Range<usize>,
) -> Vec<u8> {
    positions
        .map(|p| field.dot(shares.iter().map(|s| s.value()[p]), weights))
        .collect()
}
