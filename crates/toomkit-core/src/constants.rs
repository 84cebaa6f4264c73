//! Dispatch thresholds and process-level constants.
//!
//! Thresholds are operand lengths in limbs. A tier is used for every size at
//! or above its threshold and below the next tier's threshold.

/// Default length at which Karatsuba replaces schoolbook multiplication.
pub const DEFAULT_TOOM22_THRESHOLD: usize = 24;

/// Default length at which Toom-3 replaces Karatsuba.
pub const DEFAULT_TOOM33_THRESHOLD: usize = 80;

/// Default length at which balanced Toom-4 replaces Toom-3.
pub const DEFAULT_TOOM44_THRESHOLD: usize = 200;

/// Default shorter-operand length from which unbalanced products may use
/// the 5x3 kernel.
pub const DEFAULT_TOOM53_THRESHOLD: usize = 120;

/// Karatsuba needs two halves of at least one limb.
pub const MIN_TOOM22_THRESHOLD: usize = 2;

/// Smallest balanced length with a non-empty top chunk for every size above.
pub const MIN_TOOM33_THRESHOLD: usize = 5;

/// Smallest balanced length from which every size is admissible for 4x4.
pub const MIN_TOOM44_THRESHOLD: usize = 10;

/// Floor for the 5x3 threshold; keeps its recursive pieces shorter than
/// the operands.
pub const MIN_TOOM53_THRESHOLD: usize = 10;

/// Process exit codes.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Generic error.
    pub const ERROR_GENERIC: i32 = 1;
    /// A kernel disagreed with the reference product.
    pub const ERROR_MISMATCH: i32 = 3;
    /// Invalid configuration.
    pub const ERROR_CONFIG: i32 = 4;
}
