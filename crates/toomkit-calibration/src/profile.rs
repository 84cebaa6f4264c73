//! Calibration profile (serializable).

use serde::{Deserialize, Serialize};

use toomkit_core::{MulOptions, PointwiseMode, Thresholds};

/// Current profile format version.
pub const PROFILE_VERSION: u32 = 1;

/// Tuned thresholds plus the machine they were measured on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalibrationProfile {
    /// Profile format version for compatibility checking.
    pub version: u32,
    pub thresholds: Thresholds,
    #[serde(default)]
    pub pointwise: PointwiseMode,
    /// CPU model used for calibration.
    pub cpu_model: String,
    pub num_cores: usize,
    /// CPU fingerprint for invalidation.
    pub cpu_fingerprint: String,
    /// Calibration time, `unix:<seconds>`.
    pub timestamp: String,
}

impl Default for CalibrationProfile {
    fn default() -> Self {
        Self {
            version: PROFILE_VERSION,
            thresholds: Thresholds::default(),
            pointwise: PointwiseMode::default(),
            cpu_model: String::new(),
            num_cores: num_cpus(),
            cpu_fingerprint: String::new(),
            timestamp: String::new(),
        }
    }
}

impl CalibrationProfile {
    /// Profile for the current machine with the given tuning.
    #[must_use]
    pub fn for_this_machine(thresholds: Thresholds, pointwise: PointwiseMode) -> Self {
        Self {
            version: PROFILE_VERSION,
            thresholds: thresholds.normalize(),
            pointwise,
            cpu_model: cpu_model(),
            num_cores: num_cpus(),
            cpu_fingerprint: cpu_fingerprint(),
            timestamp: current_timestamp(),
        }
    }

    #[must_use]
    pub fn is_compatible(&self) -> bool {
        self.version == PROFILE_VERSION
    }

    /// Empty fingerprints cannot be checked and always match.
    #[must_use]
    pub fn matches_cpu(&self, current_fingerprint: &str) -> bool {
        if self.cpu_fingerprint.is_empty() || current_fingerprint.is_empty() {
            return true;
        }
        self.cpu_fingerprint == current_fingerprint
    }

    /// Thresholds are already in normalized form.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.thresholds.is_valid()
    }

    /// Multiplication options carried by this profile.
    #[must_use]
    pub fn options(&self) -> MulOptions {
        MulOptions::new(self.thresholds, self.pointwise)
    }
}

fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(std::num::NonZero::get)
        .unwrap_or(4)
}

/// Fingerprint from architecture and core count.
#[must_use]
pub fn cpu_fingerprint() -> String {
    format!("arch={};cores={}", std::env::consts::ARCH, num_cpus())
}

/// Brand string of the first CPU, empty if unknown.
#[must_use]
pub fn cpu_model() -> String {
    use sysinfo::System;
    let sys = System::new_all();
    sys.cpus()
        .first()
        .map(|cpu| cpu.brand().trim().to_string())
        .unwrap_or_default()
}

#[must_use]
pub fn current_timestamp() -> String {
    let dur = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    format!("unix:{}", dur.as_secs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_serialization() {
        let profile = CalibrationProfile::for_this_machine(
            Thresholds::MINIMAL,
            PointwiseMode::SplitTop,
        );
        let json = serde_json::to_string_pretty(&profile).unwrap();
        assert!(json.contains("\"split-top\""));
        let back: CalibrationProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, profile);
    }

    #[test]
    fn missing_pointwise_defaults_to_direct() {
        let json = r#"{
            "version": 1,
            "thresholds": {"toom22": 30, "toom33": 90, "toom44": 250, "toom53": 140},
            "cpu_model": "",
            "num_cores": 8,
            "cpu_fingerprint": "",
            "timestamp": ""
        }"#;
        let p: CalibrationProfile = serde_json::from_str(json).unwrap();
        assert_eq!(p.pointwise, PointwiseMode::Direct);
        assert!(p.is_valid());
        assert_eq!(p.options().thresholds.toom44, 250);
    }

    #[test]
    fn profile_compatibility() {
        assert!(CalibrationProfile::default().is_compatible());
        let old = CalibrationProfile {
            version: 0,
            ..CalibrationProfile::default()
        };
        assert!(!old.is_compatible());
    }

    #[test]
    fn profile_cpu_match() {
        let mut profile = CalibrationProfile {
            cpu_fingerprint: "arch=x86_64;cores=8".to_string(),
            ..CalibrationProfile::default()
        };
        assert!(profile.matches_cpu("arch=x86_64;cores=8"));
        assert!(!profile.matches_cpu("arch=x86_64;cores=4"));
        profile.cpu_fingerprint = String::new();
        assert!(profile.matches_cpu("arch=aarch64;cores=8"));
    }

    #[test]
    fn unnormalized_thresholds_are_invalid() {
        assert!(CalibrationProfile::default().is_valid());
        let bad = CalibrationProfile {
            thresholds: Thresholds {
                toom22: 50,
                toom33: 10,
                toom44: 200,
                toom53: 120,
            },
            ..CalibrationProfile::default()
        };
        assert!(!bad.is_valid());
    }

    #[test]
    fn fingerprint_and_timestamp_shapes() {
        assert!(cpu_fingerprint().contains("cores="));
        assert!(current_timestamp().starts_with("unix:"));
    }
}
