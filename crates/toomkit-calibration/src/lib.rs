//! # toomkit-calibration
//!
//! Measures where each multiplication algorithm starts to pay off on the
//! current machine and persists the resulting thresholds as a profile.

pub mod calibration;
pub mod io;
pub mod microbench;
pub mod profile;
pub mod runner;

pub use calibration::{CalibrationEngine, CalibrationMode, SizeGrid};
pub use io::ProfileError;
pub use profile::CalibrationProfile;
