//! Checked and allocating entry points.
//!
//! The kernels trust their callers. The `try_*` functions validate lengths
//! first, and [`Toom`] owns the options and takes its scratch from the
//! calling thread's arena.

use num_bigint::BigUint;
use tracing::debug;

use toomkit_memory::with_thread_arena;

use crate::dispatch::{mul, plan};
use crate::error::{ToomError, Variant};
use crate::itch::{mul_itch, toom44_mul_itch, toom53_mul_itch};
use crate::limb::Limb;
use crate::options::MulOptions;
use crate::reference::{from_limbs, to_limbs};
use crate::toom44::toom44_mul;
use crate::toom53::toom53_mul;

fn check(
    variant: Variant,
    pp: &[Limb],
    ap: &[Limb],
    bp: &[Limb],
    scratch: &[Limb],
    opts: &MulOptions,
) -> Result<usize, ToomError> {
    let (an, bn) = (ap.len(), bp.len());
    if an == 0 || bn == 0 {
        return Err(ToomError::EmptyOperand);
    }
    if !variant.admissible(an, bn) {
        return Err(ToomError::NotAdmissible { variant, an, bn });
    }
    let need = an + bn;
    if pp.len() < need {
        return Err(ToomError::OutputSize {
            got: pp.len(),
            need,
        });
    }
    let itch = match variant {
        Variant::Toom44 => toom44_mul_itch(an, bn, opts),
        Variant::Toom53 => toom53_mul_itch(an, bn, opts),
    };
    if scratch.len() < itch {
        return Err(ToomError::ScratchSize {
            got: scratch.len(),
            need: itch,
        });
    }
    Ok(need)
}

/// [`toom44_mul`] after validating every length.
///
/// The product goes to `pp[..an + bn]`; limbs past it are left untouched.
///
/// # Errors
///
/// Returns the first violated precondition.
pub fn try_toom44_mul(
    pp: &mut [Limb],
    ap: &[Limb],
    bp: &[Limb],
    scratch: &mut [Limb],
    opts: &MulOptions,
) -> Result<(), ToomError> {
    let opts = &opts.normalize();
    let need = check(Variant::Toom44, pp, ap, bp, scratch, opts)?;
    toom44_mul(&mut pp[..need], ap, bp, scratch, opts);
    Ok(())
}

/// [`toom53_mul`] after validating every length.
///
/// # Errors
///
/// Returns the first violated precondition.
pub fn try_toom53_mul(
    pp: &mut [Limb],
    ap: &[Limb],
    bp: &[Limb],
    scratch: &mut [Limb],
    opts: &MulOptions,
) -> Result<(), ToomError> {
    let opts = &opts.normalize();
    let need = check(Variant::Toom53, pp, ap, bp, scratch, opts)?;
    toom53_mul(&mut pp[..need], ap, bp, scratch, opts);
    Ok(())
}

/// Allocating multiplier with fixed options.
#[derive(Debug, Clone, Copy, Default)]
pub struct Toom {
    opts: MulOptions,
}

impl Toom {
    #[must_use]
    pub fn new(opts: MulOptions) -> Self {
        Self {
            opts: opts.normalize(),
        }
    }

    #[must_use]
    pub fn options(&self) -> &MulOptions {
        &self.opts
    }

    /// `ap * bp` as `ap.len() + bp.len()` limbs, any lengths.
    #[must_use]
    pub fn multiply(&self, ap: &[Limb], bp: &[Limb]) -> Vec<Limb> {
        let mut out = vec![0; ap.len() + bp.len()];
        if ap.is_empty() || bp.is_empty() {
            return out;
        }
        let (ap, bp) = if ap.len() >= bp.len() { (ap, bp) } else { (bp, ap) };
        let need = mul_itch(ap.len(), bp.len(), &self.opts);
        debug!(
            an = ap.len(),
            bn = bp.len(),
            plan = ?plan(ap.len(), bp.len(), &self.opts.thresholds),
            scratch = need,
            "multiply"
        );
        with_thread_arena(|arena| {
            let scope = arena.scope();
            let scratch = scope.alloc_limbs(need);
            mul(&mut out, ap, bp, scratch, &self.opts);
        });
        out
    }

    /// `ap * bp` through one specific kernel.
    ///
    /// # Errors
    ///
    /// [`ToomError::EmptyOperand`] or [`ToomError::NotAdmissible`] when the
    /// kernel cannot split these lengths as given.
    pub fn try_multiply(
        &self,
        variant: Variant,
        ap: &[Limb],
        bp: &[Limb],
    ) -> Result<Vec<Limb>, ToomError> {
        let (an, bn) = (ap.len(), bp.len());
        if an == 0 || bn == 0 {
            return Err(ToomError::EmptyOperand);
        }
        if !variant.admissible(an, bn) {
            return Err(ToomError::NotAdmissible { variant, an, bn });
        }
        let need = match variant {
            Variant::Toom44 => toom44_mul_itch(an, bn, &self.opts),
            Variant::Toom53 => toom53_mul_itch(an, bn, &self.opts),
        };
        debug!(%variant, an, bn, scratch = need, "multiply with fixed kernel");
        let mut out = vec![0; an + bn];
        with_thread_arena(|arena| {
            let scope = arena.scope();
            let scratch = scope.alloc_limbs(need);
            match variant {
                Variant::Toom44 => toom44_mul(&mut out, ap, bp, scratch, &self.opts),
                Variant::Toom53 => toom53_mul(&mut out, ap, bp, scratch, &self.opts),
            }
        });
        Ok(out)
    }

    #[must_use]
    pub fn multiply_biguint(&self, a: &BigUint, b: &BigUint) -> BigUint {
        from_limbs(&self.multiply(&to_limbs(a), &to_limbs(b)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{PointwiseMode, Thresholds};
    use crate::reference::reference_mul;

    fn ramp(len: usize, k: u64) -> Vec<Limb> {
        (1..=len as u64).map(|i| i.wrapping_mul(k) ^ (i << 40)).collect()
    }

    #[test]
    fn try_toom44_rejects_bad_lengths() {
        let opts = MulOptions::default();
        let a = ramp(16, 3);
        let b = ramp(13, 5);
        let mut scratch = vec![0; toom44_mul_itch(16, 13, &opts)];
        let mut pp = vec![0; 29];

        assert_eq!(
            try_toom44_mul(&mut pp, &[], &b, &mut scratch, &opts),
            Err(ToomError::EmptyOperand)
        );
        assert_eq!(
            try_toom44_mul(&mut pp, &a, &b[..12], &mut scratch, &opts),
            Err(ToomError::NotAdmissible {
                variant: Variant::Toom44,
                an: 16,
                bn: 12
            })
        );
        assert_eq!(
            try_toom44_mul(&mut pp[..28], &a, &b, &mut scratch, &opts),
            Err(ToomError::OutputSize { got: 28, need: 29 })
        );
        let short = scratch.len() - 1;
        assert!(matches!(
            try_toom44_mul(&mut pp, &a, &b, &mut scratch[..short], &opts),
            Err(ToomError::ScratchSize { .. })
        ));
        try_toom44_mul(&mut pp, &a, &b, &mut scratch, &opts).unwrap();
        assert_eq!(pp, reference_mul(&a, &b));
    }

    #[test]
    fn try_toom53_leaves_extra_output_alone() {
        let opts = MulOptions::default();
        let a = ramp(25, 7);
        let b = ramp(15, 11);
        let mut scratch = vec![0; toom53_mul_itch(25, 15, &opts)];
        let mut pp = vec![Limb::MAX; 42];
        try_toom53_mul(&mut pp, &a, &b, &mut scratch, &opts).unwrap();
        assert_eq!(pp[..40], reference_mul(&a, &b)[..]);
        assert_eq!(pp[40..], [Limb::MAX, Limb::MAX]);
        assert!(try_toom53_mul(&mut pp, &b, &a, &mut scratch, &opts).is_err());
    }

    #[test]
    fn try_wrappers_normalize_raw_options() {
        let raw = MulOptions {
            thresholds: Thresholds {
                toom22: 1,
                toom33: 3,
                toom44: 2,
                toom53: 0,
            },
            pointwise: PointwiseMode::SplitTop,
        };
        let need = toom44_mul_itch(40, 37, &raw.normalize());
        let a = ramp(40, 29);
        let b = ramp(37, 31);
        let mut scratch = vec![0; need];
        let mut pp = vec![0; 77];
        try_toom44_mul(&mut pp, &a, &b, &mut scratch, &raw).unwrap();
        assert_eq!(pp, reference_mul(&a, &b));

        let need = toom53_mul_itch(45, 27, &raw.normalize());
        let a = ramp(45, 37);
        let b = ramp(27, 41);
        let mut scratch = vec![0; need];
        let mut pp = vec![0; 72];
        try_toom53_mul(&mut pp, &a, &b, &mut scratch, &raw).unwrap();
        assert_eq!(pp, reference_mul(&a, &b));
    }

    #[test]
    fn multiply_any_order_and_empty() {
        let toom = Toom::new(MulOptions::default().with_thresholds(Thresholds::MINIMAL));
        let a = ramp(70, 13);
        let b = ramp(33, 17);
        assert_eq!(toom.multiply(&a, &b), reference_mul(&a, &b));
        assert_eq!(toom.multiply(&b, &a), reference_mul(&b, &a));
        assert_eq!(toom.multiply(&[], &b), vec![0; 33]);
    }

    #[test]
    fn try_multiply_by_variant() {
        let toom = Toom::new(MulOptions::default().with_pointwise(PointwiseMode::SplitTop));
        let a = ramp(50, 19);
        let b = ramp(30, 23);
        let want = reference_mul(&a, &b);
        assert_eq!(toom.try_multiply(Variant::Toom53, &a, &b).unwrap(), want);
        assert!(matches!(
            toom.try_multiply(Variant::Toom44, &a, &b),
            Err(ToomError::NotAdmissible { .. })
        ));
    }

    #[test]
    fn multiply_biguint_matches_num_bigint() {
        let toom = Toom::default();
        let a = BigUint::from(3u32).pow(4000);
        let b = BigUint::from(7u32).pow(1500);
        assert_eq!(toom.multiply_biguint(&a, &b), &a * &b);
        assert_eq!(toom.multiply_biguint(&a, &BigUint::default()), BigUint::default());
    }

    #[test]
    fn options_are_normalized() {
        let zeros = Thresholds {
            toom22: 0,
            toom33: 0,
            toom44: 0,
            toom53: 0,
        };
        let toom = Toom::new(MulOptions {
            thresholds: zeros,
            pointwise: PointwiseMode::Direct,
        });
        assert_eq!(toom.options().thresholds, Thresholds::default());
    }
}
