//! Karatsuba multiplication for balanced operands.
//!
//! With `x = x0 + x1·B^nl` and `y = y0 + y1·B^nl`:
//!
//! `x·y = z0 + (z0 + z2 - (x0 - x1)(y0 - y1))·B^nl + z2·B^2nl`
//!
//! where `z0 = x0·y0` and `z2 = x1·y1`. The low half is never shorter than
//! the high half.

use std::cmp::Ordering;

use crate::dispatch::mul_n;
use crate::limb::{self, Limb};
use crate::options::MulOptions;
use crate::scratch::Carver;
use crate::sign::Sign;

/// `d = |x0 - x1|` where `x1` may be one limb shorter than `x0`.
fn abs_diff(d: &mut [Limb], x0: &[Limb], x1: &[Limb]) -> Sign {
    let h = x1.len();
    if limb::is_zero(&x0[h..]) && limb::cmp(&x0[..h], x1) == Ordering::Less {
        limb::sub_n(&mut d[..h], x1, &x0[..h]);
        d[h..].fill(0);
        Sign::Negative
    } else {
        d.copy_from_slice(x0);
        let borrow = limb::sub_in_place(d, x1);
        debug_assert_eq!(borrow, 0);
        Sign::Positive
    }
}

/// `rp = ap * bp` for `n = ap.len() = bp.len() >= 2`.
pub fn toom22_mul(
    rp: &mut [Limb],
    ap: &[Limb],
    bp: &[Limb],
    scratch: &mut [Limb],
    opts: &MulOptions,
) {
    let n = ap.len();
    debug_assert!(n >= 2 && bp.len() == n && rp.len() == 2 * n);
    let nl = n - n / 2;
    let (a0, a1) = ap.split_at(nl);
    let (b0, b1) = bp.split_at(nl);

    let mut carver = Carver::new(scratch);
    let dx = carver.take(nl);
    let dy = carver.take(nl);
    let z1 = carver.take(2 * nl);
    let mid = carver.take(2 * nl + 1);
    let tail = carver.finish();

    let sign = abs_diff(dx, a0, a1) * abs_diff(dy, b0, b1);
    mul_n(z1, dx, dy, tail, opts);
    {
        let (z0, z2) = rp.split_at_mut(2 * nl);
        mul_n(z0, a0, b0, tail, opts);
        mul_n(z2, a1, b1, tail, opts);

        mid[..2 * nl].copy_from_slice(z0);
        mid[2 * nl] = 0;
        let carry = limb::add_in_place(mid, z2);
        debug_assert_eq!(carry, 0);
        let overflow = match sign {
            Sign::Positive => limb::sub_in_place(mid, z1),
            Sign::Negative => limb::add_in_place(mid, z1),
        };
        debug_assert_eq!(overflow, 0);
    }
    let carry = limb::add_at(rp, nl, mid);
    debug_assert_eq!(carry, 0);
}
