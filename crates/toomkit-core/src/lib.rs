//! # toomkit-core
//!
//! Unbalanced Toom-Cook multiplication on little-endian `u64` limb slices.
//!
//! [`toom44_mul`] splits both operands into four chunks and [`toom53_mul`]
//! splits them into five and three. Both evaluate at `0, ±1, 2, ±1/2, ∞` and
//! share [`interpolate_7pts`]. Pointwise products recurse through
//! [`mul_n`]/[`mul`], which pick schoolbook, Karatsuba, Toom-3 or Toom-4
//! by size.
//!
//! Every kernel writes into caller buffers and takes a scratch slice whose
//! minimum length is given by the matching `*_itch` function. [`Toom`] wraps
//! this with thread-local arena scratch.

pub mod api;
pub mod basecase;
pub mod constants;
pub mod dispatch;
pub mod error;
pub mod eval;
pub mod interpolate;
pub mod itch;
pub mod limb;
pub mod options;
pub mod reference;
pub mod scratch;
pub mod sign;
pub mod toom22;
pub mod toom33;
pub mod toom44;
pub mod toom53;

// Re-exports
pub use api::{try_toom44_mul, try_toom53_mul, Toom};
pub use constants::{
    exit_codes, DEFAULT_TOOM22_THRESHOLD, DEFAULT_TOOM33_THRESHOLD, DEFAULT_TOOM44_THRESHOLD,
    DEFAULT_TOOM53_THRESHOLD,
};
pub use dispatch::{mul, mul_n, plan, MulPlan};
pub use error::{ToomError, Variant};
pub use interpolate::interpolate_7pts;
pub use itch::{mul_itch, mul_n_itch, toom44_mul_itch, toom53_mul_itch};
pub use limb::Limb;
pub use options::{MulOptions, PointwiseMode, Thresholds, Tier};
pub use sign::{Sign, Signed};
pub use toom44::{toom44_admissible, toom44_mul};
pub use toom53::{toom53_admissible, toom53_mul};

use num_bigint::BigUint;

/// `a * b` with default options.
///
/// # Example
/// ```
/// use num_bigint::BigUint;
/// let a = BigUint::from(u64::MAX).pow(300);
/// let b = BigUint::from(3u32).pow(9000);
/// assert_eq!(toomkit_core::multiply(&a, &b), &a * &b);
/// ```
#[must_use]
pub fn multiply(a: &BigUint, b: &BigUint) -> BigUint {
    Toom::default().multiply_biguint(a, b)
}
