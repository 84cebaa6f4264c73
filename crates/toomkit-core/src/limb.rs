//! Limb-vector arithmetic.
//!
//! Numbers are little-endian slices of 64-bit limbs. Every routine works on
//! caller-owned slices and reports the single word that falls off the top:
//! a carry for additions, a borrow for subtractions, the high word for
//! multiplications by one limb.

use std::cmp::Ordering;

/// One machine word of a multiprecision number.
pub type Limb = u64;

/// Bits per limb.
pub const LIMB_BITS: u32 = Limb::BITS;

/// Add with carry: a + b + carry -> (sum, `new_carry`)
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn add_with_carry(a: Limb, b: Limb, carry: Limb) -> (Limb, Limb) {
    let sum = u128::from(a) + u128::from(b) + u128::from(carry);
    (sum as Limb, (sum >> LIMB_BITS) as Limb)
}

/// Subtract with borrow: a - b - borrow -> (diff, `new_borrow`)
#[inline]
#[must_use]
pub fn sub_with_borrow(a: Limb, b: Limb, borrow: Limb) -> (Limb, Limb) {
    let (d1, o1) = a.overflowing_sub(b);
    let (d2, o2) = d1.overflowing_sub(borrow);
    (d2, Limb::from(o1 | o2))
}

/// Multiply: a * b -> (low, high)
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn mul_wide(a: Limb, b: Limb) -> (Limb, Limb) {
    let prod = u128::from(a) * u128::from(b);
    (prod as Limb, (prod >> LIMB_BITS) as Limb)
}

/// `rp = ap + bp` over equal lengths, returning the carry.
pub fn add_n(rp: &mut [Limb], ap: &[Limb], bp: &[Limb]) -> Limb {
    debug_assert!(ap.len() == rp.len() && bp.len() == rp.len());
    let mut carry = 0;
    for ((r, &a), &b) in rp.iter_mut().zip(ap).zip(bp) {
        let (sum, c) = add_with_carry(a, b, carry);
        *r = sum;
        carry = c;
    }
    carry
}

/// `rp = ap - bp` over equal lengths, returning the borrow.
pub fn sub_n(rp: &mut [Limb], ap: &[Limb], bp: &[Limb]) -> Limb {
    debug_assert!(ap.len() == rp.len() && bp.len() == rp.len());
    let mut borrow = 0;
    for ((r, &a), &b) in rp.iter_mut().zip(ap).zip(bp) {
        let (diff, br) = sub_with_borrow(a, b, borrow);
        *r = diff;
        borrow = br;
    }
    borrow
}

/// `rp += bp` over equal lengths.
pub fn add_n_in_place(rp: &mut [Limb], bp: &[Limb]) -> Limb {
    debug_assert_eq!(rp.len(), bp.len());
    let mut carry = 0;
    for (r, &b) in rp.iter_mut().zip(bp) {
        let (sum, c) = add_with_carry(*r, b, carry);
        *r = sum;
        carry = c;
    }
    carry
}

/// `rp -= bp` over equal lengths.
pub fn sub_n_in_place(rp: &mut [Limb], bp: &[Limb]) -> Limb {
    debug_assert_eq!(rp.len(), bp.len());
    let mut borrow = 0;
    for (r, &b) in rp.iter_mut().zip(bp) {
        let (diff, br) = sub_with_borrow(*r, b, borrow);
        *r = diff;
        borrow = br;
    }
    borrow
}

/// `rp = ap - rp` over equal lengths.
pub fn rsub_n_in_place(rp: &mut [Limb], ap: &[Limb]) -> Limb {
    debug_assert_eq!(rp.len(), ap.len());
    let mut borrow = 0;
    for (r, &a) in rp.iter_mut().zip(ap) {
        let (diff, br) = sub_with_borrow(a, *r, borrow);
        *r = diff;
        borrow = br;
    }
    borrow
}

/// Add a single limb, propagating the carry as far as needed.
pub fn add_1_in_place(rp: &mut [Limb], v: Limb) -> Limb {
    let mut carry = v;
    for limb in rp.iter_mut() {
        if carry == 0 {
            break;
        }
        let (sum, c) = limb.overflowing_add(carry);
        *limb = sum;
        carry = Limb::from(c);
    }
    carry
}

/// Subtract a single limb, propagating the borrow as far as needed.
pub fn sub_1_in_place(rp: &mut [Limb], v: Limb) -> Limb {
    let mut borrow = v;
    for limb in rp.iter_mut() {
        if borrow == 0 {
            break;
        }
        let (diff, b) = limb.overflowing_sub(borrow);
        *limb = diff;
        borrow = Limb::from(b);
    }
    borrow
}

/// `rp += bp` where `bp` may be shorter than `rp`.
pub fn add_in_place(rp: &mut [Limb], bp: &[Limb]) -> Limb {
    debug_assert!(rp.len() >= bp.len());
    let (lo, hi) = rp.split_at_mut(bp.len());
    let carry = add_n_in_place(lo, bp);
    add_1_in_place(hi, carry)
}

/// `rp -= bp` where `bp` may be shorter than `rp`.
pub fn sub_in_place(rp: &mut [Limb], bp: &[Limb]) -> Limb {
    debug_assert!(rp.len() >= bp.len());
    let (lo, hi) = rp.split_at_mut(bp.len());
    let borrow = sub_n_in_place(lo, bp);
    sub_1_in_place(hi, borrow)
}

/// Add `src` into `rp` starting at limb `offset`.
///
/// Limbs of `src` past the end of `rp` are dropped; they must be zero, which
/// holds whenever the caller knows the final value fits in `rp`.
pub fn add_at(rp: &mut [Limb], offset: usize, src: &[Limb]) -> Limb {
    let dst = &mut rp[offset..];
    let len = src.len().min(dst.len());
    debug_assert!(is_zero(&src[len..]), "truncated limbs must be zero");
    add_in_place(dst, &src[..len])
}

/// Shift left by `cnt` bits, `0 < cnt < 64`; returns the bits shifted out.
pub fn lshift_in_place(rp: &mut [Limb], cnt: u32) -> Limb {
    debug_assert!(cnt > 0 && cnt < LIMB_BITS);
    let mut out = 0;
    for limb in rp.iter_mut() {
        let v = *limb;
        *limb = (v << cnt) | out;
        out = v >> (LIMB_BITS - cnt);
    }
    out
}

/// Shift right by `cnt` bits, `0 < cnt < 64`.
///
/// Returns the bits shifted out, left-aligned in the returned limb.
pub fn rshift_in_place(rp: &mut [Limb], cnt: u32) -> Limb {
    debug_assert!(cnt > 0 && cnt < LIMB_BITS);
    let mut out = 0;
    for limb in rp.iter_mut().rev() {
        let v = *limb;
        *limb = (v >> cnt) | out;
        out = v << (LIMB_BITS - cnt);
    }
    out
}

/// `rp += bp << cnt` over equal lengths, `0 < cnt < 64`.
///
/// Returns the carry plus the bits of `bp` shifted past the top.
pub fn addlsh_n_in_place(rp: &mut [Limb], bp: &[Limb], cnt: u32) -> Limb {
    debug_assert_eq!(rp.len(), bp.len());
    debug_assert!(cnt > 0 && cnt < LIMB_BITS);
    let mut carry = 0;
    let mut spill = 0;
    for (r, &b) in rp.iter_mut().zip(bp) {
        let shifted = (b << cnt) | spill;
        spill = b >> (LIMB_BITS - cnt);
        let (sum, c) = add_with_carry(*r, shifted, carry);
        *r = sum;
        carry = c;
    }
    spill + carry
}

/// `rp += bp << cnt` where `bp` may be shorter and `cnt` may be zero.
pub fn addlsh_in_place(rp: &mut [Limb], bp: &[Limb], cnt: u32) -> Limb {
    if cnt == 0 {
        return add_in_place(rp, bp);
    }
    debug_assert!(rp.len() >= bp.len());
    let (lo, hi) = rp.split_at_mut(bp.len());
    let carry = addlsh_n_in_place(lo, bp, cnt);
    if hi.is_empty() {
        carry
    } else {
        add_1_in_place(hi, carry)
    }
}

/// `rp = ap * v`, returning the high limb.
pub fn mul_1(rp: &mut [Limb], ap: &[Limb], v: Limb) -> Limb {
    debug_assert_eq!(rp.len(), ap.len());
    let mut carry = 0;
    for (r, &a) in rp.iter_mut().zip(ap) {
        let (lo, hi) = mul_wide(a, v);
        let (lo, c) = lo.overflowing_add(carry);
        *r = lo;
        carry = hi + Limb::from(c);
    }
    carry
}

/// `rp += ap * v`, returning the high limb (at most `v`).
pub fn addmul_1(rp: &mut [Limb], ap: &[Limb], v: Limb) -> Limb {
    debug_assert_eq!(rp.len(), ap.len());
    let mut carry = 0;
    for (r, &a) in rp.iter_mut().zip(ap) {
        let (lo, hi) = mul_wide(a, v);
        let (lo, c1) = lo.overflowing_add(carry);
        let (sum, c2) = r.overflowing_add(lo);
        *r = sum;
        carry = hi + Limb::from(c1) + Limb::from(c2);
    }
    carry
}

/// `rp -= ap * v`, returning the borrow limb (at most `v`).
pub fn submul_1(rp: &mut [Limb], ap: &[Limb], v: Limb) -> Limb {
    debug_assert_eq!(rp.len(), ap.len());
    let mut borrow = 0;
    for (r, &a) in rp.iter_mut().zip(ap) {
        let (lo, hi) = mul_wide(a, v);
        let (lo, c1) = lo.overflowing_add(borrow);
        let (diff, b) = r.overflowing_sub(lo);
        *r = diff;
        borrow = hi + Limb::from(c1) + Limb::from(b);
    }
    borrow
}

/// Divide in place by a single limb, returning the remainder.
#[allow(clippy::cast_possible_truncation)]
pub fn div_1_in_place(rp: &mut [Limb], d: Limb) -> Limb {
    debug_assert!(d != 0);
    let d = u128::from(d);
    let mut rem: u128 = 0;
    for limb in rp.iter_mut().rev() {
        let cur = (rem << LIMB_BITS) | u128::from(*limb);
        *limb = (cur / d) as Limb;
        rem = cur % d;
    }
    rem as Limb
}

/// Divide in place by `d`, which must divide the value exactly.
pub fn divexact_1_in_place(rp: &mut [Limb], d: Limb) {
    let rem = div_1_in_place(rp, d);
    debug_assert_eq!(rem, 0, "inexact division by {d}");
}

/// Exact division by 3.
pub fn divexact_by3_in_place(rp: &mut [Limb]) {
    divexact_1_in_place(rp, 3);
}

/// Compare two equal-length magnitudes.
#[must_use]
pub fn cmp(ap: &[Limb], bp: &[Limb]) -> Ordering {
    debug_assert_eq!(ap.len(), bp.len());
    ap.iter().rev().cmp(bp.iter().rev())
}

#[must_use]
pub fn is_zero(ap: &[Limb]) -> bool {
    ap.iter().all(|&l| l == 0)
}
