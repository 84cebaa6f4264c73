//! Application configuration from CLI flags and environment.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use toomkit_calibration::CalibrationProfile;
use toomkit_core::{MulOptions, PointwiseMode, Thresholds, Variant};

/// Unbalanced Toom-Cook multiplication kernels.
#[derive(Parser, Debug)]
#[command(name = "toomkit", version, about)]
pub struct AppConfig {
    #[command(flatten)]
    pub tuning: TuningArgs,

    /// Verbose output and debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (results only).
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Thresholds and pointwise strategy, layered over a calibration profile.
#[derive(Args, Debug, Clone, Default)]
pub struct TuningArgs {
    /// Karatsuba threshold in limbs (0 = profile or default).
    #[arg(long, global = true, default_value = "0", env = "TOOMKIT_TOOM22_THRESHOLD")]
    pub toom22_threshold: usize,

    /// Toom-3 threshold in limbs (0 = profile or default).
    #[arg(long, global = true, default_value = "0", env = "TOOMKIT_TOOM33_THRESHOLD")]
    pub toom33_threshold: usize,

    /// Toom-4 threshold in limbs (0 = profile or default).
    #[arg(long, global = true, default_value = "0", env = "TOOMKIT_TOOM44_THRESHOLD")]
    pub toom44_threshold: usize,

    /// Toom-5x3 threshold on the shorter operand (0 = profile or default).
    #[arg(long, global = true, default_value = "0", env = "TOOMKIT_TOOM53_THRESHOLD")]
    pub toom53_threshold: usize,

    /// Products at -1 and -1/2: direct or split-top.
    #[arg(long, global = true, env = "TOOMKIT_POINTWISE")]
    pub pointwise: Option<PointwiseMode>,

    /// Ignore any saved calibration profile.
    #[arg(long, global = true)]
    pub no_profile: bool,
}

impl TuningArgs {
    /// Defaults, then the profile, then non-zero flags.
    #[must_use]
    pub fn resolve(&self, profile: Option<&CalibrationProfile>) -> MulOptions {
        let (mut t, mut pointwise) = profile.map_or_else(
            || (Thresholds::default(), PointwiseMode::default()),
            |p| (p.thresholds, p.pointwise),
        );
        for (flag, slot) in [
            (self.toom22_threshold, &mut t.toom22),
            (self.toom33_threshold, &mut t.toom33),
            (self.toom44_threshold, &mut t.toom44),
            (self.toom53_threshold, &mut t.toom53),
        ] {
            if flag != 0 {
                *slot = flag;
            }
        }
        if let Some(mode) = self.pointwise {
            pointwise = mode;
        }
        MulOptions::new(t, pointwise)
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Multiply two numbers.
    Mul(MulArgs),
    /// Check the kernels against num-bigint on random operands.
    Verify(VerifyArgs),
    /// Measure thresholds for this machine and save them.
    Calibrate(CalibrateArgs),
    /// Print the effective configuration as JSON.
    Config,
    /// Generate shell completion.
    Completion {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Kernel selection for `mul`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algo {
    /// Size-driven dispatch.
    Auto,
    Toom44,
    Toom53,
}

impl Algo {
    #[must_use]
    pub fn variant(self) -> Option<Variant> {
        match self {
            Self::Auto => None,
            Self::Toom44 => Some(Variant::Toom44),
            Self::Toom53 => Some(Variant::Toom53),
        }
    }
}

/// Number base of operands and product.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Radix {
    Hex,
    Dec,
}

impl Radix {
    #[must_use]
    pub fn base(self) -> u32 {
        match self {
            Self::Hex => 16,
            Self::Dec => 10,
        }
    }
}

#[derive(Args, Debug)]
pub struct MulArgs {
    /// First operand.
    pub a: String,

    /// Second operand.
    pub b: String,

    #[arg(long, value_enum, default_value = "auto")]
    pub algo: Algo,

    /// Base of operands and product; hex accepts a 0x prefix.
    #[arg(long, value_enum, default_value = "hex")]
    pub radix: Radix,

    /// Write the product to a file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// What `verify` exercises.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyTarget {
    Toom44,
    Toom53,
    /// The generic dispatcher on arbitrary shapes.
    Mul,
    All,
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    #[arg(long, value_enum, default_value = "all")]
    pub target: VerifyTarget,

    /// Number of random cases.
    #[arg(long, default_value = "300")]
    pub cases: usize,

    /// Smallest longer-operand length in limbs.
    #[arg(long, default_value = "4")]
    pub min_limbs: usize,

    /// Largest longer-operand length in limbs.
    #[arg(long, default_value = "400")]
    pub max_limbs: usize,

    /// Seed for reproducible runs (random if absent).
    #[arg(long, env = "TOOMKIT_SEED")]
    pub seed: Option<u64>,
}

#[derive(Args, Debug)]
pub struct CalibrateArgs {
    /// Quick calibration on a coarse grid.
    #[arg(long)]
    pub auto: bool,

    /// Print the profile without saving it.
    #[arg(long)]
    pub dry_run: bool,

    /// Delete saved profiles instead of calibrating.
    #[arg(long, conflicts_with_all = ["auto", "dry_run"])]
    pub reset: bool,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> AppConfig {
        AppConfig::try_parse_from(std::iter::once("toomkit").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn verify_defaults() {
        let config = parse(&["verify", "--seed", "7"]);
        let Command::Verify(args) = config.command else {
            panic!("expected verify");
        };
        assert_eq!(args.target, VerifyTarget::All);
        assert_eq!(args.seed, Some(7));
        assert!(args.min_limbs <= args.max_limbs);
    }

    #[test]
    fn global_tuning_flags_after_subcommand() {
        let config = parse(&["mul", "ff", "ff", "--toom44-threshold", "300", "--pointwise", "split-top"]);
        assert_eq!(config.tuning.toom44_threshold, 300);
        assert_eq!(config.tuning.pointwise, Some(PointwiseMode::SplitTop));
    }

    #[test]
    fn resolve_layers_flags_over_profile() {
        let profile = CalibrationProfile {
            thresholds: Thresholds {
                toom22: 30,
                toom33: 90,
                toom44: 250,
                toom53: 140,
            },
            pointwise: PointwiseMode::SplitTop,
            ..CalibrationProfile::default()
        };
        let args = TuningArgs {
            toom33_threshold: 100,
            ..TuningArgs::default()
        };
        let opts = args.resolve(Some(&profile));
        assert_eq!(opts.thresholds.toom22, 30);
        assert_eq!(opts.thresholds.toom33, 100);
        assert_eq!(opts.pointwise, PointwiseMode::SplitTop);

        let opts = TuningArgs::default().resolve(None);
        assert_eq!(opts, MulOptions::default());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let res = AppConfig::try_parse_from(["toomkit", "-q", "-v", "config"]);
        assert!(res.is_err());
    }

    #[test]
    fn algo_maps_to_variant() {
        assert_eq!(Algo::Auto.variant(), None);
        assert_eq!(Algo::Toom53.variant(), Some(Variant::Toom53));
        assert_eq!(Radix::Hex.base(), 16);
    }
}
