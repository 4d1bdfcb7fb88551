//! GF(2^8) arithmetic module.
//!
//! This module implements finite field arithmetic over GF(2^8) for an arbitrary degree-8
//! reduction polynomial and multiplicative generator. The default is the AES field,
//! x^8 + x^4 + x^3 + x + 1 (0x11B) with generator 0x03.
//!
//! # Design Choices
//! - **Explicit Field Value**: A [`Field`] is built once from `(modulus, generator)` and passed
//!   by reference to every operation. There is no process-wide default instance.
//! - **Log/Antilog Tables**: Multiplication and division are O(1) table lookups. The tables are
//!   built with [`carryless_mul`], the bit-serial shift-and-add multiply, which is also kept
//!   public so the table path can be cross-checked against it.
//! - **Validated Construction**: The generator must be primitive, i.e. its powers must reach all
//!   255 nonzero elements. A non-primitive generator (or a reducible modulus, which can never
//!   have one) is rejected at construction instead of silently producing a broken field.
//!
//! # Usage
//! ```
//! use shamir_gf256::gf256::Field;
//!
//! let field = Field::default_aes();
//! assert_eq!(field.mul(0x57, 0x83), 0xC1);
//! assert_eq!(field.div(0xC1, 0x83), Ok(0x57));
//! ```

use alloc::vec::Vec;
use core::fmt;

/// Full AES irreducible polynomial (x^8 + x^4 + x^3 + x + 1).
pub const POLY_AES: u16 = 0x11B;

/// AES generator for [`POLY_AES`].
pub const GEN_AES: u8 = 0x03;

/// Order of the multiplicative group of GF(2^8).
const GROUP_ORDER: usize = 255;

/// Errors raised by field construction and division.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    /// Modulus does not describe a degree-8 polynomial.
    InvalidModulus(u16),
    /// Generator powers do not cover all 255 nonzero elements.
    NonPrimitiveGenerator {
        modulus: u16,
        generator: u8,
        /// Multiplicative order actually observed (0 for a zero generator).
        order: usize,
    },
    /// Division (or inversion) by zero.
    DivisionByZero,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::InvalidModulus(m) => {
                write!(f, "modulus {:#x} is not a degree-8 polynomial", m)
            }
            FieldError::NonPrimitiveGenerator { modulus, generator, order } => write!(
                f,
                "generator {:#04x} is not primitive for modulus {:#x} (order {}, need 255)",
                generator, modulus, order
            ),
            FieldError::DivisionByZero => write!(f, "division by zero in GF(2^8)"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FieldError {}

/// One sample `(x, y)` of a polynomial over the field.
///
/// `x = 0` is the intercept and is never used as a share index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: u8,
    pub y: u8,
}

impl Point {
    #[inline(always)]
    pub const fn new(x: u8, y: u8) -> Self {
        Point { x, y }
    }
}

/// Multiplies `a` and `b` as polynomials over GF(2), reducing modulo `modulus`.
///
/// `modulus` is the full 9-bit polynomial (bit 8 set). Whenever a left shift carries into
/// bit 8, XOR-ing the full modulus both clears that bit and folds in the reduction, so the
/// running value always stays below 0x100.
///
/// # Performance
/// - Fixed 8 iterations, no tables. Used for table construction and as the reference
///   implementation in tests.
pub fn carryless_mul(a: u8, b: u8, modulus: u16) -> u8 {
    let mut result: u16 = 0;
    let mut aa: u16 = a as u16;
    let mut bb: u8 = b;

    for _ in 0..8 {
        if bb & 1 != 0 {
            result ^= aa;
        }
        aa <<= 1;
        if aa & 0x100 != 0 {
            aa ^= modulus;
        }
        bb >>= 1;
    }

    result as u8
}

/// GF(2^8) described by a reduction polynomial and a primitive generator.
///
/// Immutable after construction; safe to share across threads by reference.
#[derive(Clone, PartialEq, Eq)]
pub struct Field {
    modulus: u16,
    generator: u8,
    /// `log[a]` for nonzero `a`; `log[0]` is unused.
    log: [u8; 256],
    /// `exp[i] = generator^i` for `i in 0..255`; `exp[255]` mirrors `exp[0]`.
    exp: [u8; 256],
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("modulus", &format_args!("{:#x}", self.modulus))
            .field("generator", &format_args!("{:#04x}", self.generator))
            .finish()
    }
}

impl Field {
    /// Builds the log/antilog tables for `(modulus, generator)`.
    ///
    /// A modulus below 0x100 is taken as the reduced form (the low byte of the polynomial)
    /// and gets bit 8 set, so `0x1B` and `0x11B` describe the same field.
    ///
    /// # Failure Modes
    /// - `modulus >= 0x200`: `FieldError::InvalidModulus`.
    /// - Generator order below 255: `FieldError::NonPrimitiveGenerator`.
    pub fn new(modulus: u16, generator: u8) -> Result<Self, FieldError> {
        if modulus >= 0x200 {
            return Err(FieldError::InvalidModulus(modulus));
        }
        let modulus = modulus | 0x100;

        let not_primitive = |order| FieldError::NonPrimitiveGenerator { modulus, generator, order };

        if generator == 0 {
            return Err(not_primitive(0));
        }

        let mut log = [0u8; 256];
        let mut exp = [0u8; 256];

        let mut acc: u8 = 1;
        for i in 0..GROUP_ORDER {
            // Returning to 1 early means the generator's order divides 255 but is smaller.
            if i > 0 && acc == 1 {
                return Err(not_primitive(i));
            }
            exp[i] = acc;
            log[acc as usize] = i as u8;
            acc = carryless_mul(acc, generator, modulus);
        }
        if acc != 1 {
            // Not a unit at all: the powers never cycle back (reducible modulus).
            return Err(not_primitive(0));
        }
        exp[GROUP_ORDER] = exp[0];

        Ok(Field { modulus, generator, log, exp })
    }

    /// The AES field: modulus 0x11B, generator 0x03.
    pub fn default_aes() -> Self {
        // Table construction for the AES constants cannot fail; the match keeps the
        // constructor total without panicking paths in library code.
        match Field::new(POLY_AES, GEN_AES) {
            Ok(field) => field,
            Err(_) => unreachable!("0x03 is primitive for 0x11B"),
        }
    }

    /// Full 9-bit reduction polynomial.
    pub fn modulus(&self) -> u16 {
        self.modulus
    }

    pub fn generator(&self) -> u8 {
        self.generator
    }

    /// Field addition (XOR).
    #[inline(always)]
    pub fn add(&self, a: u8, b: u8) -> u8 {
        a ^ b
    }

    /// Field subtraction; identical to addition in characteristic 2.
    #[inline(always)]
    pub fn sub(&self, a: u8, b: u8) -> u8 {
        a ^ b
    }

    /// Multiplies two elements via the log/antilog tables.
    #[inline]
    pub fn mul(&self, a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        let idx = (self.log[a as usize] as usize + self.log[b as usize] as usize) % GROUP_ORDER;
        self.exp[idx]
    }

    /// Divides `a` by `b`.
    ///
    /// # Failure Modes
    /// - `b == 0`: `FieldError::DivisionByZero`. Valid interpolation inputs never reach this.
    #[inline]
    pub fn div(&self, a: u8, b: u8) -> Result<u8, FieldError> {
        if b == 0 {
            return Err(FieldError::DivisionByZero);
        }
        if a == 0 {
            return Ok(0);
        }
        let idx = (self.log[a as usize] as usize + GROUP_ORDER - self.log[b as usize] as usize)
            % GROUP_ORDER;
        Ok(self.exp[idx])
    }

    /// Multiplicative inverse of `a`.
    pub fn inv(&self, a: u8) -> Result<u8, FieldError> {
        self.div(1, a)
    }

    /// `generator^e`.
    pub fn pow_generator(&self, e: usize) -> u8 {
        self.exp[e % GROUP_ORDER]
    }

    /// Evaluates `c0 + c1*x + ... + cn*x^n` with Horner's rule.
    ///
    /// An empty coefficient slice is the zero polynomial.
    pub fn evaluate(&self, coefficients: &[u8], x: u8) -> u8 {
        let mut result = 0u8;
        for &c in coefficients.iter().rev() {
            result = self.add(self.mul(result, x), c);
        }
        result
    }

    /// Lagrange basis weights for the sample abscissae `xs`, evaluated at `x`.
    ///
    /// `weight_i = prod_{j != i} (x - x_j) / (x_i - x_j)`
    ///
    /// The weights depend only on the x coordinates, so a caller interpolating many
    /// y-vectors over the same points computes them once.
    ///
    /// # Failure Modes
    /// - Repeated abscissae: `FieldError::DivisionByZero`.
    pub fn lagrange_weights(&self, xs: &[u8], x: u8) -> Result<Vec<u8>, FieldError> {
        let mut weights = Vec::with_capacity(xs.len());
        for (i, &xi) in xs.iter().enumerate() {
            let mut numerator = 1u8;
            let mut denominator = 1u8;
            for (j, &xj) in xs.iter().enumerate() {
                if i == j {
                    continue;
                }
                numerator = self.mul(numerator, self.sub(x, xj));
                denominator = self.mul(denominator, self.sub(xi, xj));
            }
            weights.push(self.div(numerator, denominator)?);
        }
        Ok(weights)
    }

    /// Interpolates the polynomial through `points` and evaluates it at `x`.
    ///
    /// With fewer points than the true degree + 1 this still returns a value: the one the
    /// lower-degree interpolant takes at `x`. Interpolation cannot know the intended degree.
    pub fn interpolate(&self, points: &[Point], x: u8) -> Result<u8, FieldError> {
        let xs: Vec<u8> = points.iter().map(|p| p.x).collect();
        let weights = self.lagrange_weights(&xs, x)?;
        Ok(self.dot(points.iter().map(|p| p.y), &weights))
    }

    /// `sum_i ys[i] * weights[i]`.
    #[inline]
    pub(crate) fn dot<I: Iterator<Item = u8>>(&self, ys: I, weights: &[u8]) -> u8 {
        ys.zip(weights.iter())
            .fold(0u8, |acc, (y, &w)| self.add(acc, self.mul(y, w)))
    }
}

impl Default for Field {
    fn default() -> Self {
        Field::default_aes()
    }
}
