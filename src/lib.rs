//! Threshold secret sharing over GF(2^8).
//!
//! A secret is split byte-wise into `n` shares so that any `k` of them reconstruct it and
//! fewer reveal nothing. The field (reduction polynomial and generator) is an explicit
//! value, and an optional zero tag lets reconstruction detect insufficient or corrupted
//! share sets.
//!
//! ```
//! use shamir_gf256::entropy::OsSource;
//! use shamir_gf256::gf256::Field;
//! use shamir_gf256::mpc::{combine_tagged, split_tagged};
//!
//! let field = Field::default_aes();
//! let shares = split_tagged(&field, b"HELLO", 3, 5, &mut OsSource::new()).unwrap();
//! let recovered = combine_tagged(&field, &shares.subset(&[1, 3, 5])).unwrap();
//! assert_eq!(recovered, b"HELLO");
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod gf256;
pub mod entropy;
pub mod mpc;
pub mod config;
#[cfg(feature = "std")]
pub mod io;

pub use config::ShamirConfig;
pub use gf256::{Field, FieldError, Point};
pub use mpc::{MpcError, SecretSharingScheme, Shamir, Share, ShareSet, TAG_LENGTH};
