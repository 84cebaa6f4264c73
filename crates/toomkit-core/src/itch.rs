//! Scratch requirements, in limbs.
//!
//! Each function mirrors the carving and the recursive calls of the routine
//! it sizes, so a buffer of the returned length is always sufficient.

use crate::dispatch::{plan, MulPlan};
use crate::eval::EvalPoints;
use crate::options::{MulOptions, Tier};
use crate::toom33::toom33_split;
use crate::toom44::toom44_split;
use crate::toom53::toom53_split;

/// Scratch for [`mul_n`](crate::dispatch::mul_n) on `n`-limb operands.
#[must_use]
pub fn mul_n_itch(n: usize, opts: &MulOptions) -> usize {
    match opts.thresholds.tier(n) {
        Tier::Schoolbook => 0,
        Tier::Karatsuba => toom22_itch(n, opts),
        Tier::Toom3 => toom33_itch(n, opts),
        Tier::Toom4 => toom44_mul_itch(n, n, opts),
    }
}

/// Scratch for [`mul`](crate::dispatch::mul) with `an >= bn >= 1`.
#[must_use]
pub fn mul_itch(an: usize, bn: usize, opts: &MulOptions) -> usize {
    match plan(an, bn, &opts.thresholds) {
        MulPlan::Schoolbook => 0,
        MulPlan::Balanced(_) => mul_n_itch(an, opts),
        MulPlan::Toom44 => toom44_mul_itch(an, bn, opts),
        MulPlan::Toom53 => toom53_mul_itch(an, bn, opts),
        MulPlan::Chunked => {
            let rem = (an - bn) % bn;
            let last = if rem > 0 { mul_itch(bn, rem, opts) } else { 0 };
            2 * bn + mul_n_itch(bn, opts).max(last)
        }
    }
}

#[must_use]
pub fn toom22_itch(n: usize, opts: &MulOptions) -> usize {
    let nh = n / 2;
    let nl = n - nh;
    6 * nl + 1 + mul_n_itch(nl, opts).max(mul_n_itch(nh, opts))
}

#[must_use]
pub fn toom33_itch(an: usize, opts: &MulOptions) -> usize {
    let (n, s) = toom33_split(an);
    let tail = (n + 1)
        .max(mul_n_itch(n + 1, opts))
        .max(mul_n_itch(n, opts))
        .max(mul_n_itch(s, opts));
    6 * (n + 1) + 3 * (2 * n + 2) + tail
}

/// Product of the top chunks, `s` and `t` limbs.
fn top_itch(s: usize, t: usize, opts: &MulOptions) -> usize {
    if s == t {
        mul_n_itch(s, opts)
    } else {
        mul_itch(s.max(t), s.min(t), opts)
    }
}

/// Common layout of both seven-point kernels: two sets of evaluations,
/// four product buffers and a tail shared by evaluation, recursion and
/// interpolation.
fn seven_point_itch(n: usize, s: usize, t: usize, opts: &MulOptions) -> usize {
    let tail = (2 * n + 1)
        .max(mul_n_itch(n + 1, opts))
        .max(mul_n_itch(n, opts))
        .max(top_itch(s, t, opts));
    2 * EvalPoints::limbs(n) + 4 * (2 * n + 2) + tail
}

/// Scratch for [`toom44_mul`](crate::toom44::toom44_mul): `18(n+1)` plus the
/// shared tail.
#[must_use]
pub fn toom44_mul_itch(an: usize, bn: usize, opts: &MulOptions) -> usize {
    let (n, s, t) = toom44_split(an, bn);
    seven_point_itch(n, s.max(1), t.max(1), opts)
}

/// Scratch for [`toom53_mul`](crate::toom53::toom53_mul): `18(n+1)` plus the
/// shared tail.
#[must_use]
pub fn toom53_mul_itch(an: usize, bn: usize, opts: &MulOptions) -> usize {
    let (n, s, t) = toom53_split(an, bn);
    seven_point_itch(n, s.max(1), t.max(1), opts)
}
