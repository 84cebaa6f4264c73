//! Micro-benchmarks that pit neighbouring algorithms against each other.
//!
//! A tier is forced by moving a single threshold: at size `n`, threshold
//! `n + 1` keeps the tier below and threshold `n` selects the tier itself.

use toomkit_core::constants::{
    DEFAULT_TOOM22_THRESHOLD, DEFAULT_TOOM33_THRESHOLD, DEFAULT_TOOM44_THRESHOLD,
    DEFAULT_TOOM53_THRESHOLD,
};
use toomkit_core::{mul, mul_itch, Limb, MulOptions, PointwiseMode, Thresholds};
use toomkit_memory::ScratchArena;

use crate::runner::{Sample, Sampler};

/// A threshold that calibration can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Schoolbook to Karatsuba.
    Toom22,
    /// Karatsuba to Toom-3.
    Toom33,
    /// Toom-3 to Toom-4, and unbalanced Toom-4x4.
    Toom44,
    /// Block-wise products to Toom-5x3.
    Toom53,
}

impl Boundary {
    pub const ALL: [Self; 4] = [Self::Toom22, Self::Toom33, Self::Toom44, Self::Toom53];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Toom22 => "toom22",
            Self::Toom33 => "toom33",
            Self::Toom44 => "toom44",
            Self::Toom53 => "toom53",
        }
    }

    #[must_use]
    pub fn default_threshold(self) -> usize {
        match self {
            Self::Toom22 => DEFAULT_TOOM22_THRESHOLD,
            Self::Toom33 => DEFAULT_TOOM33_THRESHOLD,
            Self::Toom44 => DEFAULT_TOOM44_THRESHOLD,
            Self::Toom53 => DEFAULT_TOOM53_THRESHOLD,
        }
    }

    /// Operand lengths timed at `size`. The 5x3 boundary is measured at a
    /// 2:1 ratio, which only the 5x3 split covers.
    #[must_use]
    pub fn shape(self, size: usize) -> (usize, usize) {
        match self {
            Self::Toom53 => (2 * size, size),
            _ => (size, size),
        }
    }

    /// `base` with this boundary's threshold replaced.
    #[must_use]
    pub fn with(self, base: Thresholds, value: usize) -> Thresholds {
        let mut t = base;
        match self {
            Self::Toom22 => t.toom22 = value,
            Self::Toom33 => t.toom33 = value,
            Self::Toom44 => t.toom44 = value,
            Self::Toom53 => t.toom53 = value,
        }
        t
    }

    /// This boundary's threshold in `t`.
    #[must_use]
    pub fn get(self, t: &Thresholds) -> usize {
        match self {
            Self::Toom22 => t.toom22,
            Self::Toom33 => t.toom33,
            Self::Toom44 => t.toom44,
            Self::Toom53 => t.toom53,
        }
    }
}

/// Timing of both sides of a boundary at one size.
#[derive(Debug, Clone)]
pub struct CrossoverPoint {
    pub boundary: Boundary,
    pub size: usize,
    pub lower_ns: u64,
    pub upper_ns: u64,
    pub upper_is_faster: bool,
}

/// Deterministic operand with every limb populated.
#[must_use]
pub fn make_limbs(len: usize, seed: u64) -> Vec<Limb> {
    (0..len as u64)
        .map(|i| (seed.wrapping_add(i)).wrapping_mul(0x9e37_79b9_7f4a_7c15) | (1 << 63))
        .collect()
}

/// Time [`mul`] on an `an x bn` product, `an >= bn >= 1`.
pub fn time_mul(an: usize, bn: usize, opts: &MulOptions, sampler: &Sampler) -> Sample {
    let a = make_limbs(an, 1);
    let b = make_limbs(bn, 2);
    let mut rp = vec![0; an + bn];
    let need = mul_itch(an, bn, opts);
    let mut arena = ScratchArena::with_capacity(need);
    sampler.measure(format!("mul_{an}x{bn}"), || {
        let scope = arena.scope();
        let scratch = scope.alloc_limbs(need);
        mul(&mut rp, &a, &b, scratch, opts);
    })
}

/// Compare the algorithm below `boundary` with the one above it at `size`.
#[must_use]
pub fn compare(boundary: Boundary, size: usize, base: Thresholds, sampler: &Sampler) -> CrossoverPoint {
    let (an, bn) = boundary.shape(size);
    let lower = MulOptions::default().with_thresholds(boundary.with(base, size + 1));
    let upper = MulOptions::default().with_thresholds(boundary.with(base, size));
    let lower_ns = time_mul(an, bn, &lower, sampler).median_ns();
    let upper_ns = time_mul(an, bn, &upper, sampler).median_ns();
    tracing::debug!(boundary = boundary.name(), size, lower_ns, upper_ns, "crossover sample");
    CrossoverPoint {
        boundary,
        size,
        lower_ns,
        upper_ns,
        upper_is_faster: upper_ns < lower_ns,
    }
}

/// Timing of the two pointwise strategies on the same product.
#[derive(Debug, Clone)]
pub struct PointwiseComparison {
    pub size: usize,
    pub direct_ns: u64,
    pub split_top_ns: u64,
}

impl PointwiseComparison {
    /// `SplitTop` only when it wins by more than 5%.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn preferred(&self) -> PointwiseMode {
        if (self.split_top_ns as f64) * 1.05 < self.direct_ns as f64 {
            PointwiseMode::SplitTop
        } else {
            PointwiseMode::Direct
        }
    }
}

/// Time a balanced `size x size` product under both pointwise modes.
#[must_use]
pub fn compare_pointwise(size: usize, thresholds: Thresholds, sampler: &Sampler) -> PointwiseComparison {
    let direct = MulOptions::new(thresholds, PointwiseMode::Direct);
    let split_top = direct.with_pointwise(PointwiseMode::SplitTop);
    PointwiseComparison {
        size,
        direct_ns: time_mul(size, size, &direct, sampler).median_ns(),
        split_top_ns: time_mul(size, size, &split_top, sampler).median_ns(),
    }
}
