//! Randomized cross-check of the kernels against a reference product.
//!
//! Each case draws its own ChaCha stream from the run seed, so any failing
//! case can be replayed alone with the same seed.

use std::time::{Duration, Instant};

use indicatif::ProgressBar;
use parking_lot::Mutex;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use toomkit_core::{toom44_admissible, toom53_admissible, Limb, MulOptions, Toom, Variant};

use crate::config::VerifyTarget;

/// One multiplication path under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kernel {
    Fixed(Variant),
    Dispatch,
}

impl Kernel {
    /// Kernel exercised by case `index` of a run over `target`.
    #[must_use]
    pub fn for_case(target: VerifyTarget, index: usize) -> Self {
        match target {
            VerifyTarget::Toom44 => Self::Fixed(Variant::Toom44),
            VerifyTarget::Toom53 => Self::Fixed(Variant::Toom53),
            VerifyTarget::Mul => Self::Dispatch,
            VerifyTarget::All => match index % 3 {
                0 => Self::Fixed(Variant::Toom44),
                1 => Self::Fixed(Variant::Toom53),
                _ => Self::Dispatch,
            },
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Fixed(Variant::Toom44) => "toom44",
            Self::Fixed(Variant::Toom53) => "toom53",
            Self::Dispatch => "mul",
        }
    }
}

/// Parameters of a verification run.
#[derive(Debug, Clone, Copy)]
pub struct VerifyPlan {
    pub target: VerifyTarget,
    pub cases: usize,
    pub min_limbs: usize,
    pub max_limbs: usize,
    pub seed: u64,
}

/// A case whose product disagreed with the reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub case: usize,
    pub kernel: &'static str,
    pub an: usize,
    pub bn: usize,
}

#[derive(Debug, Clone)]
pub struct VerifyReport {
    pub cases: usize,
    pub failures: Vec<Failure>,
    pub elapsed: Duration,
}

impl VerifyReport {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Operand lengths for `kernel` with the longer one in `lo..=hi`.
pub fn draw_shape(rng: &mut impl Rng, kernel: Kernel, lo: usize, hi: usize) -> (usize, usize) {
    match kernel {
        Kernel::Fixed(Variant::Toom44) => {
            let lo = lo.max(4);
            let hi = hi.max(lo);
            for _ in 0..16 {
                let an = rng.gen_range(lo..=hi);
                let n = an.div_ceil(4);
                if an > 3 * n {
                    let bn = 3 * n + rng.gen_range(1..=an - 3 * n);
                    debug_assert!(toom44_admissible(an, bn));
                    return (an, bn);
                }
            }
            let n = lo.div_ceil(4);
            (4 * n, 4 * n)
        }
        Kernel::Fixed(Variant::Toom53) => {
            let n_lo = (lo / 5).max(1);
            let n_hi = (hi / 5).max(n_lo);
            let n = rng.gen_range(n_lo..=n_hi);
            for _ in 0..16 {
                let an = 4 * n + rng.gen_range(1..=n);
                let bn = 2 * n + rng.gen_range(1..=n);
                if toom53_admissible(an, bn) {
                    return (an, bn);
                }
            }
            (5 * n, 3 * n)
        }
        Kernel::Dispatch => {
            let lo = lo.max(1);
            let an = rng.gen_range(lo..=hi.max(lo));
            (an, rng.gen_range(1..=an))
        }
    }
}

/// Random limbs, sometimes saturated or sparse to stress carries.
pub fn draw_limbs(rng: &mut impl Rng, len: usize) -> Vec<Limb> {
    match rng.gen_range(0..8) {
        0 => vec![Limb::MAX; len],
        1 => (0..len)
            .map(|_| if rng.gen_bool(0.2) { rng.gen() } else { 0 })
            .collect(),
        _ => (0..len).map(|_| rng.gen()).collect(),
    }
}

/// Run one case; `Some` on mismatch.
pub fn run_case(plan: &VerifyPlan, index: usize, toom: &Toom) -> Option<Failure> {
    let mut rng = ChaCha8Rng::seed_from_u64(plan.seed);
    rng.set_stream(index as u64);

    let kernel = Kernel::for_case(plan.target, index);
    let (an, bn) = draw_shape(&mut rng, kernel, plan.min_limbs, plan.max_limbs);
    let a = draw_limbs(&mut rng, an);
    let b = draw_limbs(&mut rng, bn);

    let got = match kernel {
        Kernel::Fixed(variant) => toom.try_multiply(variant, &a, &b).ok(),
        Kernel::Dispatch => Some(toom.multiply(&a, &b)),
    };
    let ok = got.is_some_and(|p| p == reference_product(&a, &b));
    if ok {
        None
    } else {
        tracing::error!(case = index, kernel = kernel.name(), an, bn, "product mismatch");
        Some(Failure {
            case: index,
            kernel: kernel.name(),
            an,
            bn,
        })
    }
}

#[cfg(feature = "gmp")]
fn reference_product(a: &[Limb], b: &[Limb]) -> Vec<Limb> {
    toomkit_core::reference::gmp_mul(a, b)
}

#[cfg(not(feature = "gmp"))]
fn reference_product(a: &[Limb], b: &[Limb]) -> Vec<Limb> {
    toomkit_core::reference::reference_mul(a, b)
}

/// Run all cases in parallel.
pub fn run_verify(plan: &VerifyPlan, opts: MulOptions, progress: &ProgressBar) -> VerifyReport {
    let start = Instant::now();
    let toom = Toom::new(opts);
    let failures = Mutex::new(Vec::new());

    (0..plan.cases).into_par_iter().for_each(|index| {
        if let Some(failure) = run_case(plan, index, &toom) {
            failures.lock().push(failure);
        }
        progress.inc(1);
    });
    progress.finish_and_clear();

    let mut failures = failures.into_inner();
    failures.sort_by_key(|f| f.case);
    VerifyReport {
        cases: plan.cases,
        failures,
        elapsed: start.elapsed(),
    }
}
