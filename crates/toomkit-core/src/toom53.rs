//! Toom-5x3 multiplication: five chunks of `A` against three chunks of `B`.
//!
//! The product still has degree 6, so the same seven points and the same
//! interpolation as the 4x4 kernel apply. It covers operand ratios
//! `4/3 < an/bn < 5/2`, where a 4x4 split would leave `B` with an empty top.

use crate::dispatch::{mul_n, mul_pointwise};
use crate::eval::{evaluate_points, split, EvalPoints, TopBounds};
use crate::interpolate::interpolate_7pts;
use crate::limb::Limb;
use crate::options::MulOptions;
use crate::scratch::Carver;
use crate::sign::Signed;
use crate::toom44::mul_top;

/// Chunk length and top-chunk lengths `(n, s, t)` for an `an x bn` product.
#[must_use]
pub fn toom53_split(an: usize, bn: usize) -> (usize, usize, usize) {
    let n = 1 + if 3 * an >= 5 * bn {
        an.saturating_sub(1) / 5
    } else {
        bn.saturating_sub(1) / 3
    };
    (n, an.saturating_sub(4 * n), bn.saturating_sub(2 * n))
}

/// Whether the 5x3 split is valid for these lengths.
#[must_use]
pub fn toom53_admissible(an: usize, bn: usize) -> bool {
    if bn == 0 || an < bn {
        return false;
    }
    let (n, s, t) = toom53_split(an, bn);
    s > 0 && s <= n && t > 0 && t <= n
}

/// `pp = ap * bp` where `(ap.len(), bp.len())` is admissible.
///
/// `pp` holds `an + bn` limbs and `scratch` at least
/// [`toom53_mul_itch`](crate::itch::toom53_mul_itch) limbs.
pub fn toom53_mul(
    pp: &mut [Limb],
    ap: &[Limb],
    bp: &[Limb],
    scratch: &mut [Limb],
    opts: &MulOptions,
) {
    let (an, bn) = (ap.len(), bp.len());
    debug_assert!(toom53_admissible(an, bn), "toom53: inadmissible sizes {an}x{bn}");
    debug_assert_eq!(pp.len(), an + bn);
    let (n, s, t) = toom53_split(an, bn);

    let a = split::<5>(ap, n);
    let b = split::<3>(bp, n);

    let mut carver = Carver::new(scratch);
    let mut ea = EvalPoints::carve(&mut carver, n);
    let mut eb = EvalPoints::carve(&mut carver, n);
    let v1 = carver.take(2 * n + 2);
    let vm1 = carver.take(2 * n + 2);
    let v2 = carver.take(2 * n + 2);
    let vmh = carver.take(2 * n + 2);
    let tail = carver.finish();

    // 16·A(±1/2) and 4·B(±1/2): the product carries 64·W(±1/2).
    let sa = evaluate_points(&mut ea, &a, tail);
    debug_assert!(TopBounds::TOOM53_A.holds(&ea));
    let sb = evaluate_points(&mut eb, &b, tail);
    debug_assert!(TopBounds::TOOM53_B.holds(&eb));

    mul_n(v1, ea.p1, eb.p1, tail, opts);
    mul_pointwise(vm1, ea.m1, eb.m1, tail, opts);
    mul_n(v2, ea.p2, eb.p2, tail, opts);
    mul_pointwise(vmh, ea.mh, eb.mh, tail, opts);
    {
        let (lo, hi) = pp.split_at_mut(6 * n);
        mul_n(&mut lo[2 * n..4 * n + 2], ea.ph, eb.ph, tail, opts);
        mul_n(&mut lo[..2 * n], a[0], b[0], tail, opts);
        mul_top(hi, a[4], b[2], tail, opts);
    }

    interpolate_7pts(
        pp,
        n,
        Signed::new(vmh, sa.mh * sb.mh),
        Signed::new(vm1, sa.m1 * sb.m1),
        v1,
        v2,
        s + t,
        tail,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::itch::toom53_mul_itch;
    use crate::options::{PointwiseMode, Thresholds};
    use crate::reference::reference_mul;

    fn pattern(len: usize, seed: u64) -> Vec<Limb> {
        let mut x = seed | 1;
        (0..len)
            .map(|_| {
                x = x.wrapping_mul(0xd129_0d26_45e2_be2b).rotate_left(29);
                x
            })
            .collect()
    }

    fn check(ap: &[Limb], bp: &[Limb], opts: &MulOptions) {
        let (an, bn) = (ap.len(), bp.len());
        let mut pp = vec![0; an + bn];
        let mut scratch = vec![0; toom53_mul_itch(an, bn, opts)];
        toom53_mul(&mut pp, ap, bp, &mut scratch, opts);
        assert_eq!(pp, reference_mul(ap, bp), "{an}x{bn}");
    }

    #[test]
    fn admissibility() {
        assert!(toom53_admissible(25, 15));
        assert!(toom53_admissible(5, 3));
        assert!(!toom53_admissible(15, 15));
        assert!(!toom53_admissible(30, 12));
        assert!(!toom53_admissible(3, 5));
        // everything strictly inside the ratio window, away from rounding
        for bn in 12..200 {
            let lo = 4 * bn / 3 + 4;
            let hi = 5 * bn / 2 - 5;
            for an in lo..=hi {
                assert!(toom53_admissible(an, bn), "{an}x{bn}");
            }
        }
    }

    #[test]
    fn every_small_shape() {
        let opts = MulOptions::default();
        for bn in 3..=18 {
            for an in bn..=3 * bn {
                if toom53_admissible(an, bn) {
                    check(&pattern(an, an as u64), &pattern(bn, 77 + bn as u64), &opts);
                }
            }
        }
    }

    #[test]
    fn all_ones_scenario() {
        let opts = MulOptions::default();
        let a = vec![Limb::MAX; 50];
        let b = vec![Limb::MAX; 30];
        check(&a, &b, &opts);
    }

    #[test]
    fn ratio_edges() {
        let opts = MulOptions::default();
        // smallest and largest admissible `an` for two values of `bn`
        check(&pattern(41, 1), &pattern(30, 2), &opts);
        check(&pattern(70, 3), &pattern(30, 4), &opts);
        check(&pattern(33, 5), &pattern(24, 6), &opts);
        check(&pattern(55, 7), &pattern(24, 8), &opts);
        assert!(!toom53_admissible(40, 30) && !toom53_admissible(71, 30));
    }

    #[test]
    fn recursive_tiers_and_pointwise_modes() {
        for pointwise in [PointwiseMode::Direct, PointwiseMode::SplitTop] {
            let opts = MulOptions::new(Thresholds::MINIMAL, pointwise);
            for (an, bn) in [(50, 30), (97, 60), (160, 70)] {
                check(&pattern(an, 11), &pattern(bn, 13), &opts);
            }
        }
    }
}
