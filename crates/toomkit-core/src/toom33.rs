//! Toom-3 for balanced operands, evaluated at `0, 1, -1, 2, ∞`.

use crate::dispatch::mul_n;
use crate::eval::{eval_2, eval_pm1, split};
use crate::interpolate::interpolate_5pts;
use crate::limb::Limb;
use crate::options::MulOptions;
use crate::scratch::Carver;
use crate::sign::Signed;

/// Chunk length and top-chunk length for `an` limbs.
#[must_use]
pub fn toom33_split(an: usize) -> (usize, usize) {
    let n = an.div_ceil(3);
    (n, an.saturating_sub(2 * n))
}

/// Whether three chunks with a non-empty top exist for `an` limbs.
#[must_use]
pub fn toom33_admissible(an: usize) -> bool {
    an >= 3 && toom33_split(an).1 > 0
}

/// `rp = ap * bp` for equal lengths.
pub fn toom33_mul(
    rp: &mut [Limb],
    ap: &[Limb],
    bp: &[Limb],
    scratch: &mut [Limb],
    opts: &MulOptions,
) {
    let an = ap.len();
    debug_assert!(toom33_admissible(an), "toom33: inadmissible size {an}");
    debug_assert!(bp.len() == an && rp.len() == 2 * an);
    let (n, s) = toom33_split(an);

    let a = split::<3>(ap, n);
    let b = split::<3>(bp, n);

    let mut carver = Carver::new(scratch);
    let as1 = carver.take(n + 1);
    let asm1 = carver.take(n + 1);
    let as2 = carver.take(n + 1);
    let bs1 = carver.take(n + 1);
    let bsm1 = carver.take(n + 1);
    let bs2 = carver.take(n + 1);
    let v1 = carver.take(2 * n + 2);
    let vm1 = carver.take(2 * n + 2);
    let v2 = carver.take(2 * n + 2);
    let tail = carver.finish();

    let sa = eval_pm1(as1, asm1, &a, tail);
    eval_2(as2, &a);
    let sb = eval_pm1(bs1, bsm1, &b, tail);
    eval_2(bs2, &b);
    debug_assert!(as1[n] <= 2 && asm1[n] <= 1 && as2[n] <= 6);
    debug_assert!(bs1[n] <= 2 && bsm1[n] <= 1 && bs2[n] <= 6);

    mul_n(v1, as1, bs1, tail, opts);
    mul_n(vm1, asm1, bsm1, tail, opts);
    mul_n(v2, as2, bs2, tail, opts);
    {
        let (lo, hi) = rp.split_at_mut(4 * n);
        mul_n(&mut lo[..2 * n], a[0], b[0], tail, opts);
        mul_n(hi, a[2], b[2], tail, opts);
    }

    interpolate_5pts(rp, n, Signed::new(vm1, sa * sb), v1, v2, 2 * s);
}
