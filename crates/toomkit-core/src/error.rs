//! Error types for the checked entry points.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The two unbalanced kernels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Toom44,
    Toom53,
}

impl Variant {
    pub const ALL: [Self; 2] = [Self::Toom44, Self::Toom53];

    /// Whether the kernel can split operands of these lengths.
    #[must_use]
    pub fn admissible(self, an: usize, bn: usize) -> bool {
        match self {
            Self::Toom44 => crate::toom44::toom44_admissible(an, bn),
            Self::Toom53 => crate::toom53::toom53_admissible(an, bn),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Toom44 => "toom44",
            Self::Toom53 => "toom53",
        })
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "toom44" | "4x4" => Ok(Self::Toom44),
            "toom53" | "5x3" => Ok(Self::Toom53),
            other => Err(format!("unknown kernel '{other}'")),
        }
    }
}

/// Errors reported before any kernel runs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToomError {
    #[error("operand has no limbs")]
    EmptyOperand,

    #[error("{variant} cannot split operands of {an} and {bn} limbs")]
    NotAdmissible { variant: Variant, an: usize, bn: usize },

    #[error("output buffer holds {got} limbs, product needs {need}")]
    OutputSize { got: usize, need: usize },

    #[error("scratch buffer holds {got} limbs, need at least {need}")]
    ScratchSize { got: usize, need: usize },
}
