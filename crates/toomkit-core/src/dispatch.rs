//! Size-driven choice of multiplication algorithm.
//!
//! [`mul_n`] handles balanced operands by [`Tier`]; [`mul`] handles
//! `an >= bn` and routes through [`plan`], which prefers the unbalanced
//! Toom kernels when their split is admissible and falls back to
//! multiplying `bn`-limb blocks otherwise.

use serde::{Deserialize, Serialize};

use crate::basecase::mul_basecase;
use crate::limb::{self, Limb};
use crate::options::{MulOptions, PointwiseMode, Thresholds, Tier};
use crate::scratch::Carver;
use crate::toom22::toom22_mul;
use crate::toom33::toom33_mul;
use crate::toom44::{toom44_admissible, toom44_mul};
use crate::toom53::{toom53_admissible, toom53_mul};

/// Algorithm [`mul`] uses for a given pair of lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MulPlan {
    Schoolbook,
    Balanced(Tier),
    Toom44,
    Toom53,
    Chunked,
}

/// Pick the algorithm for an `an x bn` product, `an >= bn >= 1`.
///
/// `thresholds` must be normalized; [`MulOptions::new`] and
/// [`MulOptions::with_thresholds`] guarantee it.
#[must_use]
pub fn plan(an: usize, bn: usize, thresholds: &Thresholds) -> MulPlan {
    let t = thresholds;
    if bn < t.toom22 {
        MulPlan::Schoolbook
    } else if an == bn {
        MulPlan::Balanced(t.tier(an))
    } else if bn >= t.toom44 && toom44_admissible(an, bn) {
        MulPlan::Toom44
    } else if bn >= t.toom53 && toom53_admissible(an, bn) {
        MulPlan::Toom53
    } else {
        MulPlan::Chunked
    }
}

/// `rp = ap * bp` for `n = ap.len() = bp.len() >= 1`; `rp` holds `2n` limbs.
pub fn mul_n(rp: &mut [Limb], ap: &[Limb], bp: &[Limb], scratch: &mut [Limb], opts: &MulOptions) {
    let n = ap.len();
    debug_assert!(n > 0 && bp.len() == n && rp.len() == 2 * n);
    match opts.thresholds.tier(n) {
        Tier::Schoolbook => mul_basecase(rp, ap, bp),
        Tier::Karatsuba => toom22_mul(rp, ap, bp, scratch, opts),
        Tier::Toom3 => toom33_mul(rp, ap, bp, scratch, opts),
        Tier::Toom4 => toom44_mul(rp, ap, bp, scratch, opts),
    }
}

/// `rp = ap * bp` for `ap.len() >= bp.len() >= 1`; `rp` holds `an + bn` limbs.
pub fn mul(rp: &mut [Limb], ap: &[Limb], bp: &[Limb], scratch: &mut [Limb], opts: &MulOptions) {
    let (an, bn) = (ap.len(), bp.len());
    debug_assert!(an >= bn && bn > 0, "mul: bad operand lengths {an}x{bn}");
    debug_assert_eq!(rp.len(), an + bn);
    match plan(an, bn, &opts.thresholds) {
        MulPlan::Schoolbook => mul_basecase(rp, ap, bp),
        MulPlan::Balanced(_) => mul_n(rp, ap, bp, scratch, opts),
        MulPlan::Toom44 => toom44_mul(rp, ap, bp, scratch, opts),
        MulPlan::Toom53 => toom53_mul(rp, ap, bp, scratch, opts),
        MulPlan::Chunked => mul_chunked(rp, ap, bp, scratch, opts),
    }
}

/// Multiply `bn`-limb blocks of `ap` by `bp` and accumulate.
fn mul_chunked(rp: &mut [Limb], ap: &[Limb], bp: &[Limb], scratch: &mut [Limb], opts: &MulOptions) {
    let bn = bp.len();
    let mut carver = Carver::new(scratch);
    let tmp = carver.take(2 * bn);
    let tail = carver.finish();

    let (head, rest) = ap.split_at(bn);
    mul_n(&mut rp[..2 * bn], head, bp, tail, opts);
    let mut offset = bn;
    for piece in rest.chunks(bn) {
        let len = bn + piece.len();
        let prod = &mut tmp[..len];
        if piece.len() == bn {
            mul_n(prod, piece, bp, tail, opts);
        } else {
            mul(prod, bp, piece, tail, opts);
        }
        // rp[offset..offset + bn] already holds the top of the previous block.
        let (low, high) = prod.split_at(bn);
        let carry = limb::add_n_in_place(&mut rp[offset..offset + bn], low);
        let dst = &mut rp[offset + bn..offset + len];
        dst.copy_from_slice(high);
        let carry = limb::add_1_in_place(dst, carry);
        debug_assert_eq!(carry, 0);
        offset += bn;
    }
}

/// Product of two `n + 1` limb evaluation values at `-1` or `-1/2`.
///
/// The top limbs are small, so [`PointwiseMode::SplitTop`] multiplies the
/// low `n` limbs recursively and folds the top limbs in with `addmul_1`.
pub fn mul_pointwise(
    rp: &mut [Limb],
    ap: &[Limb],
    bp: &[Limb],
    scratch: &mut [Limb],
    opts: &MulOptions,
) {
    let n = ap.len() - 1;
    debug_assert!(bp.len() == n + 1 && rp.len() == 2 * n + 2);
    match opts.pointwise {
        PointwiseMode::Direct => mul_n(rp, ap, bp, scratch, opts),
        PointwiseMode::SplitTop => {
            let (a_hi, b_hi) = (ap[n], bp[n]);
            let (lo, hi) = rp.split_at_mut(2 * n);
            mul_n(lo, &ap[..n], &bp[..n], scratch, opts);
            let mut carry = 0;
            if a_hi != 0 {
                carry = a_hi * b_hi + limb::addmul_1(&mut lo[n..], &bp[..n], a_hi);
            }
            if b_hi != 0 {
                carry += limb::addmul_1(&mut lo[n..], &ap[..n], b_hi);
            }
            hi[0] = carry;
            hi[1] = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::itch::{mul_itch, mul_n_itch};
    use crate::reference::reference_mul;

    fn pattern(len: usize, seed: u64) -> Vec<Limb> {
        (0..len)
            .map(|i| (seed + i as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15) ^ (seed << 7))
            .collect()
    }

    fn check_mul(an: usize, bn: usize, opts: &MulOptions) {
        let (a, b) = (pattern(an, 3), pattern(bn, 5));
        let mut rp = vec![0; an + bn];
        let mut scratch = vec![0; mul_itch(an, bn, opts)];
        mul(&mut rp, &a, &b, &mut scratch, opts);
        assert_eq!(rp, reference_mul(&a, &b), "{an}x{bn}");
    }

    #[test]
    fn plan_prefers_toom_kernels() {
        let t = Thresholds::default();
        assert_eq!(plan(100, 5, &t), MulPlan::Schoolbook);
        assert_eq!(plan(30, 30, &t), MulPlan::Balanced(Tier::Karatsuba));
        assert_eq!(plan(300, 250, &t), MulPlan::Toom44);
        assert_eq!(plan(300, 150, &t), MulPlan::Toom53);
        assert_eq!(plan(1000, 150, &t), MulPlan::Chunked);
        assert_eq!(plan(300, 100, &t), MulPlan::Chunked);
    }

    #[test]
    fn balanced_sizes_across_tiers() {
        let opts = MulOptions::default().with_thresholds(Thresholds::MINIMAL);
        for n in 1..60 {
            let (a, b) = (pattern(n, 1), pattern(n, 2));
            let mut rp = vec![0; 2 * n];
            let mut scratch = vec![0; mul_n_itch(n, &opts)];
            mul_n(&mut rp, &a, &b, &mut scratch, &opts);
            assert_eq!(rp, reference_mul(&a, &b), "n={n}");
        }
    }

    #[test]
    fn unbalanced_sizes_minimal_thresholds() {
        let opts = MulOptions::default().with_thresholds(Thresholds::MINIMAL);
        for bn in 1..30 {
            for an in (bn..4 * bn).step_by(3) {
                check_mul(an, bn, &opts);
            }
        }
    }

    #[test]
    fn chunked_with_partial_last_block() {
        let opts = MulOptions::default();
        check_mul(257, 30, &opts);
        check_mul(240, 30, &opts);
        check_mul(91, 30, &opts);
    }

    #[test]
    fn split_top_matches_direct() {
        let direct = MulOptions::default();
        let split = direct.with_pointwise(PointwiseMode::SplitTop);
        for n in [1, 2, 7, 30] {
            for (a_hi, b_hi) in [(0, 0), (1, 0), (0, 3), (9, 20)] {
                let mut a = pattern(n + 1, 7);
                let mut b = pattern(n + 1, 9);
                a[n] = a_hi;
                b[n] = b_hi;
                let mut r1 = vec![0; 2 * n + 2];
                let mut r2 = vec![1; 2 * n + 2];
                let mut scratch = vec![0; mul_n_itch(n + 1, &direct)];
                mul_pointwise(&mut r1, &a, &b, &mut scratch, &direct);
                mul_pointwise(&mut r2, &a, &b, &mut scratch, &split);
                assert_eq!(r1, r2);
                assert_eq!(r1, reference_mul(&a, &b));
            }
        }
    }
}
