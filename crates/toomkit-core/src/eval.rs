//! Operand splitting and evaluation at the points `1, -1, 2, 1/2, -1/2`.
//!
//! An operand of `K` chunks is read as a polynomial `X(x) = Σ x_i·x^i` with
//! limb-sized chunk coefficients. The half points are scaled by `2^(K-1)` so
//! that every value is an integer:
//!
//! - `p1 = X(1)`, `m1 = |X(-1)|`
//! - `p2 = X(2)`
//! - `ph = 2^(K-1)·X(1/2)`, `mh = |2^(K-1)·X(-1/2)|`
//!
//! Each value occupies `n + 1` limbs; the extra limb absorbs the growth
//! bounded by [`TopBounds`].

use std::cmp::Ordering;

use crate::limb::{self, Limb};
use crate::scratch::Carver;
use crate::sign::Sign;

/// Split `xp` into `K` chunks of `n` limbs, the last one holding the rest.
///
/// The top chunk must be non-empty: `(K-1)·n < xp.len() <= K·n`.
pub fn split<const K: usize>(xp: &[Limb], n: usize) -> [&[Limb]; K] {
    debug_assert!(K >= 2 && n > 0);
    debug_assert!(
        xp.len() > (K - 1) * n && xp.len() <= K * n,
        "cannot split {} limbs into {K} chunks of {n}",
        xp.len()
    );
    std::array::from_fn(|i| &xp[i * n..((i + 1) * n).min(xp.len())])
}

/// The five evaluation values of one operand.
#[derive(Debug)]
pub struct EvalPoints<'a> {
    pub p1: &'a mut [Limb],
    pub m1: &'a mut [Limb],
    pub p2: &'a mut [Limb],
    pub ph: &'a mut [Limb],
    pub mh: &'a mut [Limb],
}

impl<'a> EvalPoints<'a> {
    /// Carve five `n + 1` limb regions.
    pub fn carve(carver: &mut Carver<'a>, n: usize) -> Self {
        Self {
            p1: carver.take(n + 1),
            m1: carver.take(n + 1),
            p2: carver.take(n + 1),
            ph: carver.take(n + 1),
            mh: carver.take(n + 1),
        }
    }

    /// Limbs used by [`EvalPoints::carve`].
    #[must_use]
    pub const fn limbs(n: usize) -> usize {
        5 * (n + 1)
    }
}

/// Signs of the values at `-1` and `-1/2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalSigns {
    pub m1: Sign,
    pub mh: Sign,
}

/// Upper bounds on the overflow limb of each evaluation value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopBounds {
    pub p1: Limb,
    pub m1: Limb,
    pub p2: Limb,
    pub ph: Limb,
    pub mh: Limb,
}

impl TopBounds {
    /// Both operands of the 4x4 kernel.
    pub const TOOM44: Self = Self {
        p1: 3,
        m1: 1,
        p2: 14,
        ph: 14,
        mh: 9,
    };

    /// The five-chunk operand of the 5x3 kernel.
    pub const TOOM53_A: Self = Self {
        p1: 4,
        m1: 2,
        p2: 30,
        ph: 30,
        mh: 20,
    };

    /// The three-chunk operand of the 5x3 kernel.
    pub const TOOM53_B: Self = Self {
        p1: 2,
        m1: 1,
        p2: 6,
        ph: 6,
        mh: 4,
    };

    #[must_use]
    pub fn holds(&self, pts: &EvalPoints<'_>) -> bool {
        let n = pts.p1.len() - 1;
        pts.p1[n] <= self.p1
            && pts.m1[n] <= self.m1
            && pts.p2[n] <= self.p2
            && pts.ph[n] <= self.ph
            && pts.mh[n] <= self.mh
    }
}

/// `dst = Σ chunk << shift` over `dst.len()` limbs. The chunks are at most
/// `dst.len() - 1` limbs long.
fn weighted_sum<'c>(dst: &mut [Limb], terms: impl IntoIterator<Item = (&'c [Limb], u32)>) {
    let n = dst.len() - 1;
    dst.fill(0);
    for (chunk, shift) in terms {
        let (lo, top) = dst.split_at_mut(n);
        top[0] += limb::addlsh_in_place(lo, chunk, shift);
    }
}

/// Replace `gp` by `gp + hp` and write `|gp - hp|` to `diff`.
///
/// Returns `Negative` iff `gp < hp`; equal halves give `Positive`.
fn butterfly(gp: &mut [Limb], diff: &mut [Limb], hp: &[Limb]) -> Sign {
    let sign = if limb::cmp(gp, hp) == Ordering::Less {
        limb::sub_n(diff, hp, gp);
        Sign::Negative
    } else {
        limb::sub_n(diff, gp, hp);
        Sign::Positive
    };
    let carry = limb::add_n_in_place(gp, hp);
    debug_assert_eq!(carry, 0);
    sign
}

/// Values at `1` and `-1`. `tp` must hold `n + 1` limbs.
pub fn eval_pm1<const K: usize>(
    p1: &mut [Limb],
    m1: &mut [Limb],
    chunks: &[&[Limb]; K],
    tp: &mut [Limb],
) -> Sign {
    let tp = &mut tp[..p1.len()];
    weighted_sum(p1, chunks.iter().step_by(2).map(|c| (*c, 0)));
    weighted_sum(tp, chunks.iter().skip(1).step_by(2).map(|c| (*c, 0)));
    butterfly(p1, m1, tp)
}

/// Scaled values at `1/2` and `-1/2`. `tp` must hold `n + 1` limbs.
#[allow(clippy::cast_possible_truncation)]
pub fn eval_pmhalf<const K: usize>(
    ph: &mut [Limb],
    mh: &mut [Limb],
    chunks: &[&[Limb]; K],
    tp: &mut [Limb],
) -> Sign {
    let top = (K - 1) as u32;
    let tp = &mut tp[..ph.len()];
    weighted_sum(
        ph,
        chunks.iter().enumerate().step_by(2).map(|(i, c)| (*c, top - i as u32)),
    );
    weighted_sum(
        tp,
        chunks
            .iter()
            .enumerate()
            .skip(1)
            .step_by(2)
            .map(|(i, c)| (*c, top - i as u32)),
    );
    butterfly(ph, mh, tp)
}

/// Value at `2` by Horner's rule from the top chunk.
pub fn eval_2<const K: usize>(p2: &mut [Limb], chunks: &[&[Limb]; K]) {
    let top = chunks[K - 1];
    p2.fill(0);
    p2[..top.len()].copy_from_slice(top);
    for chunk in chunks[..K - 1].iter().rev() {
        let out = limb::lshift_in_place(p2, 1);
        debug_assert_eq!(out, 0);
        let carry = limb::add_in_place(p2, chunk);
        debug_assert_eq!(carry, 0);
    }
}

/// Fill all five values of `pts` from `chunks`. `tp` must hold `n + 1` limbs.
pub fn evaluate_points<const K: usize>(
    pts: &mut EvalPoints<'_>,
    chunks: &[&[Limb]; K],
    tp: &mut [Limb],
) -> EvalSigns {
    let m1 = eval_pm1(pts.p1, pts.m1, chunks, tp);
    eval_2(pts.p2, chunks);
    let mh = eval_pmhalf(pts.ph, pts.mh, chunks, tp);
    EvalSigns { m1, mh }
}
