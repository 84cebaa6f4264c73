//! Multiplication options.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_TOOM22_THRESHOLD, DEFAULT_TOOM33_THRESHOLD, DEFAULT_TOOM44_THRESHOLD,
    DEFAULT_TOOM53_THRESHOLD, MIN_TOOM22_THRESHOLD, MIN_TOOM33_THRESHOLD, MIN_TOOM44_THRESHOLD,
    MIN_TOOM53_THRESHOLD,
};

/// Balanced multiplication algorithm selected for a given length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    Schoolbook,
    Karatsuba,
    Toom3,
    Toom4,
}

impl Tier {
    pub const ALL: [Self; 4] = [Self::Schoolbook, Self::Karatsuba, Self::Toom3, Self::Toom4];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Schoolbook => "schoolbook",
            Self::Karatsuba => "karatsuba",
            Self::Toom3 => "toom3",
            Self::Toom4 => "toom4",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Operand lengths (in limbs) at which each algorithm takes over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Karatsuba from this length.
    pub toom22: usize,
    /// Toom-3 from this length.
    pub toom33: usize,
    /// Balanced Toom-4 from this length.
    pub toom44: usize,
    /// Unbalanced 5x3 from this shorter-operand length.
    pub toom53: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            toom22: DEFAULT_TOOM22_THRESHOLD,
            toom33: DEFAULT_TOOM33_THRESHOLD,
            toom44: DEFAULT_TOOM44_THRESHOLD,
            toom53: DEFAULT_TOOM53_THRESHOLD,
        }
    }
}

impl Thresholds {
    /// Smallest thresholds that keep every tier admissible. Useful for
    /// driving all code paths at small sizes.
    pub const MINIMAL: Self = Self {
        toom22: MIN_TOOM22_THRESHOLD,
        toom33: MIN_TOOM33_THRESHOLD,
        toom44: MIN_TOOM44_THRESHOLD,
        toom53: MIN_TOOM53_THRESHOLD,
    };

    /// Replace zeros with defaults, then raise each threshold to its minimum
    /// and to the threshold of the tier below it.
    #[must_use]
    pub fn normalize(mut self) -> Self {
        if self.toom22 == 0 {
            self.toom22 = DEFAULT_TOOM22_THRESHOLD;
        }
        if self.toom33 == 0 {
            self.toom33 = DEFAULT_TOOM33_THRESHOLD;
        }
        if self.toom44 == 0 {
            self.toom44 = DEFAULT_TOOM44_THRESHOLD;
        }
        if self.toom53 == 0 {
            self.toom53 = DEFAULT_TOOM53_THRESHOLD;
        }
        self.toom22 = self.toom22.max(MIN_TOOM22_THRESHOLD);
        self.toom33 = self.toom33.max(self.toom22).max(MIN_TOOM33_THRESHOLD);
        self.toom44 = self.toom44.max(self.toom33).max(MIN_TOOM44_THRESHOLD);
        self.toom53 = self.toom53.max(MIN_TOOM53_THRESHOLD);
        self
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.normalize() == *self
    }

    /// Balanced algorithm for operands of `n` limbs. Expects normalized
    /// thresholds.
    #[must_use]
    pub fn tier(&self, n: usize) -> Tier {
        debug_assert!(self.is_valid(), "thresholds not normalized: {self:?}");
        if n < self.toom22 {
            Tier::Schoolbook
        } else if n < self.toom33 {
            Tier::Karatsuba
        } else if n < self.toom44 {
            Tier::Toom3
        } else {
            Tier::Toom4
        }
    }
}

/// How the products at `-1` and `-1/2` treat the overflow limb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PointwiseMode {
    /// One `(n+1) x (n+1)` product.
    #[default]
    Direct,
    /// An `n x n` product plus single-limb corrections for the top limbs.
    SplitTop,
}

impl fmt::Display for PointwiseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Direct => "direct",
            Self::SplitTop => "split-top",
        })
    }
}

impl FromStr for PointwiseMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "direct" => Ok(Self::Direct),
            "split-top" | "splittop" | "split" => Ok(Self::SplitTop),
            other => Err(format!(
                "unknown pointwise mode '{other}' (expected 'direct' or 'split-top')"
            )),
        }
    }
}

/// Everything the kernels consult besides their operands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MulOptions {
    pub thresholds: Thresholds,
    #[serde(default)]
    pub pointwise: PointwiseMode,
}

impl MulOptions {
    #[must_use]
    pub fn new(thresholds: Thresholds, pointwise: PointwiseMode) -> Self {
        Self {
            thresholds,
            pointwise,
        }
        .normalize()
    }

    #[must_use]
    pub fn normalize(mut self) -> Self {
        self.thresholds = self.thresholds.normalize();
        self
    }

    #[must_use]
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds.normalize();
        self
    }

    #[must_use]
    pub fn with_pointwise(mut self, pointwise: PointwiseMode) -> Self {
        self.pointwise = pointwise;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_thresholds_are_valid() {
        assert!(Thresholds::default().is_valid());
        assert!(Thresholds::MINIMAL.is_valid());
    }

    #[test]
    fn normalize_zero_thresholds() {
        let t = Thresholds {
            toom22: 0,
            toom33: 0,
            toom44: 0,
            toom53: 0,
        }
        .normalize();
        assert_eq!(t, Thresholds::default());
    }

    #[test]
    fn normalize_enforces_order_and_minimums() {
        let t = Thresholds {
            toom22: 1,
            toom33: 3,
            toom44: 2,
            toom53: 4,
        }
        .normalize();
        assert_eq!(t.toom22, MIN_TOOM22_THRESHOLD);
        assert_eq!(t.toom33, MIN_TOOM33_THRESHOLD);
        assert_eq!(t.toom44, MIN_TOOM44_THRESHOLD);
        assert_eq!(t.toom53, MIN_TOOM53_THRESHOLD);

        let t = Thresholds {
            toom22: 50,
            toom33: 20,
            toom44: 30,
            toom53: 100,
        }
        .normalize();
        assert_eq!((t.toom22, t.toom33, t.toom44), (50, 50, 50));
    }

    #[test]
    fn tier_is_monotonic() {
        let t = Thresholds::default();
        let mut last = Tier::Schoolbook;
        for n in 1..400 {
            let tier = t.tier(n);
            assert!(tier >= last, "tier went down at n={n}");
            last = tier;
        }
        assert_eq!(t.tier(1), Tier::Schoolbook);
        assert_eq!(t.tier(DEFAULT_TOOM22_THRESHOLD), Tier::Karatsuba);
        assert_eq!(t.tier(DEFAULT_TOOM33_THRESHOLD), Tier::Toom3);
        assert_eq!(t.tier(DEFAULT_TOOM44_THRESHOLD), Tier::Toom4);
    }

    #[test]
    fn raw_thresholds_become_valid_after_normalize() {
        let raw = Thresholds {
            toom22: 0,
            toom33: 1,
            toom44: 1,
            toom53: 0,
        };
        assert!(!raw.is_valid());
        let t = raw.normalize();
        assert!(t.is_valid());
        assert_eq!(t.tier(9), Tier::Schoolbook);
        assert_eq!(t.tier(DEFAULT_TOOM22_THRESHOLD), Tier::Karatsuba);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "thresholds not normalized")]
    fn tier_rejects_raw_thresholds_in_debug() {
        let raw = Thresholds {
            toom22: 0,
            toom33: 0,
            toom44: 0,
            toom53: 0,
        };
        let _ = raw.tier(1);
    }

    #[test]
    fn pointwise_mode_parses() {
        assert_eq!("direct".parse::<PointwiseMode>(), Ok(PointwiseMode::Direct));
        assert_eq!(
            "Split-Top".parse::<PointwiseMode>(),
            Ok(PointwiseMode::SplitTop)
        );
        assert!("sideways".parse::<PointwiseMode>().is_err());
        assert_eq!(PointwiseMode::SplitTop.to_string(), "split-top");
    }

    #[test]
    fn options_serde_round_trip() {
        let opts = MulOptions::new(Thresholds::MINIMAL, PointwiseMode::SplitTop);
        let json = serde_json::to_string(&opts).unwrap();
        assert!(json.contains("split-top"));
        let back: MulOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, opts);
    }

    #[test]
    fn options_missing_pointwise_defaults_to_direct() {
        let json = r#"{"thresholds":{"toom22":30,"toom33":90,"toom44":250,"toom53":150}}"#;
        let opts: MulOptions = serde_json::from_str(json).unwrap();
        assert_eq!(opts.pointwise, PointwiseMode::Direct);
        assert_eq!(opts.thresholds.toom44, 250);
    }
}
