//! Conversions to and from `num-bigint`, and reference products.
//!
//! The reference multipliers are independent of the kernels in this crate
//! and serve as the oracle for the verifier and the tests.

use num_bigint::BigUint;

use crate::limb::Limb;

/// Limbs of `x`, least significant first. Zero has no limbs.
#[must_use]
pub fn to_limbs(x: &BigUint) -> Vec<Limb> {
    x.to_u64_digits()
}

/// The value of a limb slice. Trailing zero limbs are allowed.
#[must_use]
pub fn from_limbs(limbs: &[Limb]) -> BigUint {
    let bytes: Vec<u8> = limbs.iter().flat_map(|&limb| limb.to_le_bytes()).collect();
    BigUint::from_bytes_le(&bytes)
}

/// `ap * bp` padded to exactly `ap.len() + bp.len()` limbs.
#[must_use]
pub fn reference_mul(ap: &[Limb], bp: &[Limb]) -> Vec<Limb> {
    let mut out = to_limbs(&(from_limbs(ap) * from_limbs(bp)));
    out.resize(ap.len() + bp.len(), 0);
    out
}

/// `ap * bp` through GMP, padded like [`reference_mul`].
#[cfg(feature = "gmp")]
#[must_use]
pub fn gmp_mul(ap: &[Limb], bp: &[Limb]) -> Vec<Limb> {
    use rug::integer::Order;
    use rug::Integer;

    let a = Integer::from_digits(ap, Order::Lsf);
    let b = Integer::from_digits(bp, Order::Lsf);
    let mut out: Vec<Limb> = Integer::from(&a * &b).to_digits(Order::Lsf);
    out.resize(ap.len() + bp.len(), 0);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limbs_round_trip_with_padding() {
        let x = BigUint::from(1u32) << 130;
        let mut limbs = to_limbs(&x);
        assert_eq!(limbs, vec![0, 0, 4]);
        limbs.push(0);
        assert_eq!(from_limbs(&limbs), x);
    }

    #[test]
    fn zero_has_no_limbs() {
        assert!(to_limbs(&BigUint::default()).is_empty());
        assert_eq!(from_limbs(&[]), BigUint::default());
    }

    #[test]
    fn reference_mul_pads() {
        let p = reference_mul(&[2, 0, 0], &[3]);
        assert_eq!(p, vec![6, 0, 0, 0]);
    }

    #[cfg(feature = "gmp")]
    #[test]
    fn gmp_agrees_with_num_bigint() {
        let a = [u64::MAX, 7, 1 << 40];
        let b = [u64::MAX, u64::MAX];
        assert_eq!(gmp_mul(&a, &b), reference_mul(&a, &b));
    }
}
