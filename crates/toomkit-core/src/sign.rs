//! Signs of evaluation values.
//!
//! Evaluations at `-1` and `-1/2` are stored as magnitudes with an explicit
//! sign; the sign of a pointwise product is the product of the signs.

use std::ops::Mul;

use crate::limb::Limb;

/// Sign of a magnitude. Zero is `Positive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sign {
    #[default]
    Positive,
    Negative,
}

impl Sign {
    #[must_use]
    pub fn is_negative(self) -> bool {
        self == Self::Negative
    }
}

impl Mul for Sign {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        if self == rhs {
            Self::Positive
        } else {
            Self::Negative
        }
    }
}

/// A borrowed magnitude together with its sign.
#[derive(Debug)]
pub struct Signed<'a> {
    pub mag: &'a mut [Limb],
    pub sign: Sign,
}

impl<'a> Signed<'a> {
    pub fn new(mag: &'a mut [Limb], sign: Sign) -> Self {
        Self { mag, sign }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_product_table() {
        assert_eq!(Sign::Positive * Sign::Positive, Sign::Positive);
        assert_eq!(Sign::Positive * Sign::Negative, Sign::Negative);
        assert_eq!(Sign::Negative * Sign::Positive, Sign::Negative);
        assert_eq!(Sign::Negative * Sign::Negative, Sign::Positive);
    }

    #[test]
    fn default_is_positive() {
        assert!(!Sign::default().is_negative());
    }
}
