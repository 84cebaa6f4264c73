//! Recovery of product coefficients from their point values.
//!
//! The product `W(x) = Σ c_i·x^i` is known at a handful of points. Both
//! routines split each symmetric pair `W(x)`, `W(-x)` into its even and odd
//! parts first, then peel coefficients off with exact shifts and exact small
//! divisions. Every intermediate value is a non-negative combination of the
//! `c_i`, so no step ever needs a sign.
//!
//! Finally each coefficient is added into the product at limb offset `i·n`.

use crate::limb::{self, Limb};
use crate::sign::{Sign, Signed};

/// `rp -= bp`; the difference must be non-negative.
fn sub_exact(rp: &mut [Limb], bp: &[Limb]) {
    let borrow = limb::sub_in_place(rp, bp);
    debug_assert_eq!(borrow, 0);
}

/// `rp -= k·ap`; the difference must be non-negative.
fn submul_exact(rp: &mut [Limb], ap: &[Limb], k: Limb) {
    let (lo, hi) = rp.split_at_mut(ap.len());
    let mut borrow = limb::submul_1(lo, ap, k);
    if !hi.is_empty() {
        borrow = limb::sub_1_in_place(hi, borrow);
    }
    debug_assert_eq!(borrow, 0);
}

/// `rp >>= cnt`; the shifted-out bits must be zero.
fn shr_exact(rp: &mut [Limb], cnt: u32) {
    let out = limb::rshift_in_place(rp, cnt);
    debug_assert_eq!(out, 0);
}

/// Turn `p = W(x)` and `q = |W(-x)|` into the even part (in `p`) and the odd
/// part (in `q`): `E = (W(x) + W(-x)) / 2`, `O = (W(x) - W(-x)) / 2`.
fn split_parity(p: &mut [Limb], q: &mut [Limb], q_sign: Sign) {
    let overflow = match q_sign {
        Sign::Negative => limb::add_n_in_place(q, p),
        Sign::Positive => limb::rsub_n_in_place(q, p),
    };
    debug_assert_eq!(overflow, 0);
    shr_exact(q, 1);
    sub_exact(p, q);
}

/// Interpolate the seven-point product of the 4x4 and 5x3 kernels.
///
/// Layout of `rp` (`6n + w6n` limbs) on entry:
///
/// - `rp[..2n]` holds `c0 = W(0)`,
/// - `rp[2n..4n+2]` holds `64·W(1/2)`,
/// - `rp[6n..]` holds `c6 = W(∞)`, `w6n` limbs with `0 < w6n ≤ 2n`.
///
/// `vmh` is `64·W(-1/2)`, `vm1` is `W(-1)`, `v1` is `W(1)` and `v2` is
/// `W(2)`, each `2n + 2` limbs with at most `2n + 1` significant. `tp` needs
/// `2n + 1` limbs. All four value buffers are clobbered. On exit `rp` holds
/// the full product.
#[allow(clippy::too_many_arguments)]
pub fn interpolate_7pts(
    rp: &mut [Limb],
    n: usize,
    vmh: Signed<'_>,
    vm1: Signed<'_>,
    v1: &mut [Limb],
    v2: &mut [Limb],
    w6n: usize,
    tp: &mut [Limb],
) {
    let m = 2 * n + 1;
    debug_assert!(w6n > 0 && w6n <= 2 * n);
    debug_assert_eq!(rp.len(), 6 * n + w6n);
    let Signed {
        mag: vmh,
        sign: vmh_sign,
    } = vmh;
    let Signed {
        mag: vm1,
        sign: vm1_sign,
    } = vm1;
    debug_assert!([&*vmh, &*vm1, &*v1, &*v2]
        .iter()
        .all(|v| limb::is_zero(&v[m..])));

    let vmh = &mut vmh[..m];
    let vm1 = &mut vm1[..m];
    let v1 = &mut v1[..m];
    let v2 = &mut v2[..m];
    let tp = &mut tp[..m];

    {
        let (lo, c6) = rp.split_at_mut(6 * n);
        let (c0, mid) = lo.split_at_mut(2 * n);
        let (vh, gap) = mid.split_at_mut(m);
        let (c0, c6) = (&*c0, &*c6);

        // v1 = c0 + c2 + c4 + c6, vm1 = c1 + c3 + c5
        split_parity(v1, vm1, vm1_sign);
        // vh = 64c0 + 16c2 + 4c4 + c6, vmh = 32c1 + 8c3 + 2c5
        split_parity(vh, vmh, vmh_sign);

        // Even coefficients.
        sub_exact(v1, c0);
        sub_exact(v1, c6); // c2 + c4
        submul_exact(vh, c0, 64);
        sub_exact(vh, c6);
        shr_exact(vh, 2); // 4c2 + c4
        sub_exact(vh, v1);
        limb::divexact_by3_in_place(vh); // c2
        sub_exact(v1, vh); // c4

        // Odd coefficients.
        shr_exact(vmh, 1); // 16c1 + 4c3 + c5
        sub_exact(v2, c0);
        submul_exact(v2, c6, 64);
        submul_exact(v2, vh, 4);
        submul_exact(v2, v1, 16);
        shr_exact(v2, 1); // c1 + 4c3 + 16c5
        sub_exact(vmh, vm1);
        limb::divexact_by3_in_place(vmh); // 5c1 + c3
        sub_exact(v2, vm1);
        limb::divexact_by3_in_place(v2); // c3 + 5c5
        let carry = limb::mul_1(tp, vm1, 5);
        debug_assert_eq!(carry, 0);
        sub_exact(tp, vmh);
        sub_exact(tp, v2);
        limb::divexact_by3_in_place(tp); // c3
        sub_exact(vmh, tp);
        limb::divexact_1_in_place(vmh, 5); // c1
        sub_exact(v2, tp);
        limb::divexact_1_in_place(v2, 5); // c5

        gap.fill(0);
    }

    for (offset, coeff) in [(n, &*vmh), (3 * n, &*tp), (4 * n, &*v1), (5 * n, &*v2)] {
        let carry = limb::add_at(rp, offset, coeff);
        debug_assert_eq!(carry, 0);
    }
}

/// Interpolate the five-point product of the Toom-3 leaf.
///
/// `rp` (`4n + w4n` limbs) holds `c0 = W(0)` in `rp[..2n]` and `c4 = W(∞)`
/// in `rp[4n..]`, `0 < w4n ≤ 2n`. `vm1`, `v1` and `v2` are `W(-1)`, `W(1)`
/// and `W(2)` in `2n + 2` limb buffers, which are clobbered.
pub fn interpolate_5pts(
    rp: &mut [Limb],
    n: usize,
    vm1: Signed<'_>,
    v1: &mut [Limb],
    v2: &mut [Limb],
    w4n: usize,
) {
    let m = 2 * n + 1;
    debug_assert!(w4n > 0 && w4n <= 2 * n);
    debug_assert_eq!(rp.len(), 4 * n + w4n);
    let Signed {
        mag: vm1,
        sign: vm1_sign,
    } = vm1;
    let vm1 = &mut vm1[..m];
    let v1 = &mut v1[..m];
    let v2 = &mut v2[..m];

    {
        let (lo, c4) = rp.split_at_mut(4 * n);
        let (c0, gap) = lo.split_at_mut(2 * n);
        let (c0, c4) = (&*c0, &*c4);

        // v1 = c0 + c2 + c4, vm1 = c1 + c3
        split_parity(v1, vm1, vm1_sign);
        sub_exact(v1, c0);
        sub_exact(v1, c4); // c2

        sub_exact(v2, c0);
        submul_exact(v2, c4, 16);
        submul_exact(v2, v1, 4);
        shr_exact(v2, 1); // c1 + 4c3
        sub_exact(v2, vm1);
        limb::divexact_by3_in_place(v2); // c3
        sub_exact(vm1, v2); // c1

        gap.fill(0);
    }

    for (offset, coeff) in [(n, &*vm1), (2 * n, &*v1), (3 * n, &*v2)] {
        let carry = limb::add_at(rp, offset, coeff);
        debug_assert_eq!(carry, 0);
    }
}
