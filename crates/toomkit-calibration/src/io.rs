//! Profile persistence (load/save).
//!
//! Profiles live in `$XDG_CONFIG_HOME/toomkit/` (or `~/.config/toomkit/`),
//! with a dotfile in the working directory as fallback.

use std::path::{Path, PathBuf};

use crate::profile::{self, CalibrationProfile};

const PROFILE_FILENAME: &str = "toomkit_calibration.json";
const CONFIG_DIR_NAME: &str = "toomkit";

/// Failure to read or write a profile file.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("profile I/O on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed profile {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Load the first readable profile from the standard locations.
///
/// Unreadable or malformed files are logged and skipped.
#[must_use]
pub fn load_profile() -> Option<CalibrationProfile> {
    candidate_paths()
        .into_iter()
        .filter(|path| path.exists())
        .find_map(|path| match load_from_path(&path) {
            Ok(p) => Some(p),
            Err(err) => {
                tracing::warn!("skipping profile: {err}");
                None
            }
        })
}

/// Load a profile usable on this machine with this version.
#[must_use]
pub fn load_validated_profile() -> Option<CalibrationProfile> {
    let p = load_profile()?;

    if !p.is_compatible() {
        tracing::info!("Profile version mismatch, ignoring cached profile");
        return None;
    }
    if !p.is_valid() {
        tracing::info!("Profile has invalid thresholds, ignoring cached profile");
        return None;
    }
    if !p.matches_cpu(&profile::cpu_fingerprint()) {
        tracing::info!("Profile CPU mismatch, ignoring cached profile");
        return None;
    }

    Some(p)
}

/// Save to the config directory, or the working directory if there is none.
///
/// # Errors
///
/// Fails if the directory cannot be created or the file written.
pub fn save_profile(p: &CalibrationProfile) -> Result<PathBuf, ProfileError> {
    let path = match xdg_profile_path() {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|source| ProfileError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            path
        }
        None => cwd_profile_path(),
    };
    save_to_path(p, &path)?;
    tracing::info!(path = %path.display(), "saved calibration profile");
    Ok(path)
}

/// # Errors
///
/// Fails if the file cannot be written.
pub fn save_to_path(p: &CalibrationProfile, path: &Path) -> Result<(), ProfileError> {
    let content = serde_json::to_string_pretty(p).map_err(|source| ProfileError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, content).map_err(|source| ProfileError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// # Errors
///
/// Fails if the file cannot be read or does not parse.
pub fn load_from_path(path: &Path) -> Result<CalibrationProfile, ProfileError> {
    let content = std::fs::read_to_string(path).map_err(|source| ProfileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ProfileError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Delete every saved profile. Returns whether anything was removed.
///
/// # Errors
///
/// Fails if an existing file cannot be removed.
pub fn delete_profile() -> Result<bool, ProfileError> {
    let mut removed = false;
    for path in candidate_paths() {
        if path.exists() {
            std::fs::remove_file(&path).map_err(|source| ProfileError::Io {
                path: path.clone(),
                source,
            })?;
            removed = true;
        }
    }
    Ok(removed)
}

/// Where [`save_profile`] writes.
#[must_use]
pub fn profile_path() -> PathBuf {
    xdg_profile_path().unwrap_or_else(cwd_profile_path)
}

fn candidate_paths() -> Vec<PathBuf> {
    xdg_profile_path()
        .into_iter()
        .chain(std::iter::once(cwd_profile_path()))
        .collect()
}

fn xdg_profile_path() -> Option<PathBuf> {
    let config_dir = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;

    Some(config_dir.join(CONFIG_DIR_NAME).join(PROFILE_FILENAME))
}

fn cwd_profile_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(format!(".{PROFILE_FILENAME}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use toomkit_core::{PointwiseMode, Thresholds};

    #[test]
    fn save_and_load_to_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(PROFILE_FILENAME);
        let p = CalibrationProfile::for_this_machine(Thresholds::MINIMAL, PointwiseMode::SplitTop);
        save_to_path(&p, &path).unwrap();
        assert_eq!(load_from_path(&path).unwrap(), p);
    }

    #[test]
    fn invalid_json_is_a_json_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(PROFILE_FILENAME);
        std::fs::write(&path, b"not json").unwrap();
        let err = load_from_path(&path).unwrap_err();
        assert!(matches!(err, ProfileError::Json { .. }));
        assert!(err.to_string().contains("malformed profile"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let err = load_from_path(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ProfileError::Io { .. }));
    }

    #[test]
    fn saving_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no").join("such").join(PROFILE_FILENAME);
        let err = save_to_path(&CalibrationProfile::default(), &path).unwrap_err();
        assert!(matches!(err, ProfileError::Io { .. }));
    }

    #[test]
    fn incompatible_version_survives_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(PROFILE_FILENAME);
        let p = CalibrationProfile {
            version: 999,
            ..CalibrationProfile::default()
        };
        save_to_path(&p, &path).unwrap();
        assert!(!load_from_path(&path).unwrap().is_compatible());
    }

    #[test]
    fn paths_name_the_profile() {
        assert!(profile_path().to_string_lossy().contains(PROFILE_FILENAME));
        let cwd = cwd_profile_path();
        let name = cwd.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with('.'));
        if let Some(path) = xdg_profile_path() {
            assert!(path.to_string_lossy().contains(CONFIG_DIR_NAME));
        }
    }
}
