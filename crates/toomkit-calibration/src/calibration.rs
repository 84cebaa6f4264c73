//! Calibration engine.
//!
//! Boundaries are calibrated bottom-up: each search runs with the thresholds
//! already found below it and with every tier above it switched off.

use toomkit_core::Thresholds;

use crate::microbench::{self, Boundary};
use crate::profile::CalibrationProfile;
use crate::runner::Sampler;

/// Mode of calibration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationMode {
    /// Dense size grid, bisection between grid points.
    Full,
    /// Coarse size grid, first winning grid point.
    Auto,
    /// Load from profile file.
    Cached,
}

/// Sizes probed for each boundary, ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeGrid {
    pub toom22: Vec<usize>,
    pub toom33: Vec<usize>,
    pub toom44: Vec<usize>,
    pub toom53: Vec<usize>,
}

impl SizeGrid {
    #[must_use]
    pub fn full() -> Self {
        Self {
            toom22: (8..=64).step_by(4).collect(),
            toom33: (40..=200).step_by(10).collect(),
            toom44: (100..=500).step_by(25).collect(),
            toom53: (60..=300).step_by(20).collect(),
        }
    }

    #[must_use]
    pub fn quick() -> Self {
        Self {
            toom22: vec![8, 16, 24, 32, 48, 64],
            toom33: vec![40, 60, 80, 120, 160],
            toom44: vec![100, 150, 200, 300, 400],
            toom53: vec![60, 90, 120, 180, 240],
        }
    }

    /// Sizes probed for `boundary`.
    #[must_use]
    pub fn sizes(&self, boundary: Boundary) -> &[usize] {
        match boundary {
            Boundary::Toom22 => &self.toom22,
            Boundary::Toom33 => &self.toom33,
            Boundary::Toom44 => &self.toom44,
            Boundary::Toom53 => &self.toom53,
        }
    }
}

/// Progress callback for calibration.
pub type ProgressCallback = Box<dyn Fn(CalibrationProgress) + Send>;

/// Progress information during calibration.
#[derive(Debug, Clone)]
pub struct CalibrationProgress {
    /// Current step name.
    pub step: String,
    /// Current step number (1-based).
    pub current: usize,
    /// Total number of steps.
    pub total: usize,
}

/// Thresholds with every tier from `boundary` upwards disabled.
fn disabled_from(mut t: Thresholds, boundary: Boundary) -> Thresholds {
    let mut off = false;
    for b in Boundary::ALL {
        off |= b == boundary;
        if off && b != Boundary::Toom53 {
            t = b.with(t, usize::MAX);
        }
    }
    t
}

/// Calibration engine that determines thresholds for this machine.
pub struct CalibrationEngine {
    mode: CalibrationMode,
    grid: SizeGrid,
    sampler: Sampler,
    progress_cb: Option<ProgressCallback>,
}

impl CalibrationEngine {
    #[must_use]
    pub fn new(mode: CalibrationMode) -> Self {
        let grid = match mode {
            CalibrationMode::Full => SizeGrid::full(),
            _ => SizeGrid::quick(),
        };
        Self {
            mode,
            grid,
            sampler: Sampler::default(),
            progress_cb: None,
        }
    }

    #[must_use]
    pub fn with_grid(mut self, grid: SizeGrid) -> Self {
        self.grid = grid;
        self
    }

    #[must_use]
    pub fn with_sampler(mut self, sampler: Sampler) -> Self {
        self.sampler = sampler;
        self
    }

    #[must_use]
    pub fn with_progress(mut self, cb: ProgressCallback) -> Self {
        self.progress_cb = Some(cb);
        self
    }

    #[must_use]
    pub fn mode(&self) -> CalibrationMode {
        self.mode
    }

    /// Run calibration and produce a profile.
    #[must_use]
    pub fn calibrate(&self) -> CalibrationProfile {
        match self.mode {
            CalibrationMode::Full | CalibrationMode::Auto => self.measure(),
            CalibrationMode::Cached => Self::load_cached(),
        }
    }

    fn report_progress(&self, step: &str, current: usize, total: usize) {
        if let Some(cb) = &self.progress_cb {
            cb(CalibrationProgress {
                step: step.to_string(),
                current,
                total,
            });
        }
    }

    fn measure(&self) -> CalibrationProfile {
        let total = Boundary::ALL.len() + 1;
        let mut found = Thresholds::default();
        for (i, boundary) in Boundary::ALL.into_iter().enumerate() {
            self.report_progress(&format!("Searching {} crossover", boundary.name()), i + 1, total);
            let base = disabled_from(found, boundary);
            let threshold = self.search(boundary, base);
            tracing::info!(boundary = boundary.name(), threshold, "calibrated");
            found = boundary.with(found, threshold).normalize();
        }

        self.report_progress("Comparing pointwise strategies", total, total);
        let size = found.toom44.max(Boundary::Toom44.default_threshold());
        let pointwise = microbench::compare_pointwise(size, found, &self.sampler).preferred();
        tracing::info!(%pointwise, size, "pointwise strategy chosen");

        CalibrationProfile::for_this_machine(found, pointwise)
    }

    /// First grid size where the upper algorithm wins, refined by bisection
    /// in full mode. The default threshold if it never wins.
    fn search(&self, boundary: Boundary, base: Thresholds) -> usize {
        let mut prev = None;
        for &size in self.grid.sizes(boundary) {
            if microbench::compare(boundary, size, base, &self.sampler).upper_is_faster {
                return match (self.mode, prev) {
                    (CalibrationMode::Full, Some(low)) => self.bisect(boundary, base, low, size),
                    _ => size,
                };
            }
            prev = Some(size);
        }
        boundary.default_threshold()
    }

    fn bisect(&self, boundary: Boundary, base: Thresholds, mut low: usize, mut high: usize) -> usize {
        for _ in 0..4 {
            if high - low < 2 {
                break;
            }
            let mid = low + (high - low) / 2;
            if microbench::compare(boundary, mid, base, &self.sampler).upper_is_faster {
                high = mid;
            } else {
                low = mid;
            }
        }
        high
    }

    fn load_cached() -> CalibrationProfile {
        crate::io::load_validated_profile().unwrap_or_else(|| {
            tracing::warn!("No usable cached profile, using defaults");
            CalibrationProfile::default()
        })
    }
}
