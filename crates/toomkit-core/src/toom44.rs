//! Toom-4 multiplication of operands split into four chunks each.
//!
//! `A = a0 + a1·x + a2·x^2 + a3·x^3` and likewise `B`, with `x = B^n`. The
//! product polynomial has degree 6 and is recovered from its values at
//! `0, 1, -1, 2, 1/2, -1/2, ∞`.
//!
//! Sizes: `n = ceil(an/4)`, `s = an - 3n`, `t = bn - 3n` with `0 < t ≤ s ≤ n`,
//! so the operands satisfy `bn ≤ an` and both have a non-empty top chunk.

use crate::dispatch::{mul, mul_n, mul_pointwise};
use crate::eval::{evaluate_points, split, EvalPoints, TopBounds};
use crate::interpolate::interpolate_7pts;
use crate::limb::Limb;
use crate::options::MulOptions;
use crate::scratch::Carver;
use crate::sign::Signed;

/// Chunk length and top-chunk lengths `(n, s, t)` for an `an x bn` product.
#[must_use]
pub fn toom44_split(an: usize, bn: usize) -> (usize, usize, usize) {
    let n = an.div_ceil(4);
    (n, an.saturating_sub(3 * n), bn.saturating_sub(3 * n))
}

/// Whether the 4x4 split is valid for these lengths.
#[must_use]
pub fn toom44_admissible(an: usize, bn: usize) -> bool {
    if bn == 0 || an < bn {
        return false;
    }
    let (_, s, t) = toom44_split(an, bn);
    t > 0 && s > 0
}

/// Product of the two top chunks, longer operand first.
pub(crate) fn mul_top(
    rp: &mut [Limb],
    ap: &[Limb],
    bp: &[Limb],
    scratch: &mut [Limb],
    opts: &MulOptions,
) {
    if ap.len() == bp.len() {
        mul_n(rp, ap, bp, scratch, opts);
    } else if ap.len() > bp.len() {
        mul(rp, ap, bp, scratch, opts);
    } else {
        mul(rp, bp, ap, scratch, opts);
    }
}

/// `pp = ap * bp` where `(ap.len(), bp.len())` is admissible.
///
/// `pp` holds `an + bn` limbs and `scratch` at least
/// [`toom44_mul_itch`](crate::itch::toom44_mul_itch) limbs.
pub fn toom44_mul(
    pp: &mut [Limb],
    ap: &[Limb],
    bp: &[Limb],
    scratch: &mut [Limb],
    opts: &MulOptions,
) {
    let (an, bn) = (ap.len(), bp.len());
    debug_assert!(toom44_admissible(an, bn), "toom44: inadmissible sizes {an}x{bn}");
    debug_assert_eq!(pp.len(), an + bn);
    let (n, s, t) = toom44_split(an, bn);

    let a = split::<4>(ap, n);
    let b = split::<4>(bp, n);

    let mut carver = Carver::new(scratch);
    let mut ea = EvalPoints::carve(&mut carver, n);
    let mut eb = EvalPoints::carve(&mut carver, n);
    let v1 = carver.take(2 * n + 2);
    let vm1 = carver.take(2 * n + 2);
    let v2 = carver.take(2 * n + 2);
    let vmh = carver.take(2 * n + 2);
    let tail = carver.finish();

    let sa = evaluate_points(&mut ea, &a, tail);
    debug_assert!(TopBounds::TOOM44.holds(&ea));
    let sb = evaluate_points(&mut eb, &b, tail);
    debug_assert!(TopBounds::TOOM44.holds(&eb));

    mul_n(v1, ea.p1, eb.p1, tail, opts);
    mul_pointwise(vm1, ea.m1, eb.m1, tail, opts);
    mul_n(v2, ea.p2, eb.p2, tail, opts);
    mul_pointwise(vmh, ea.mh, eb.mh, tail, opts);
    {
        let (lo, hi) = pp.split_at_mut(6 * n);
        mul_n(&mut lo[2 * n..4 * n + 2], ea.ph, eb.ph, tail, opts);
        mul_n(&mut lo[..2 * n], a[0], b[0], tail, opts);
        mul_top(hi, a[3], b[3], tail, opts);
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
