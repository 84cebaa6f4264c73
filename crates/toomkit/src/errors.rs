//! Error handling and exit codes.

use toomkit_calibration::ProfileError;
use toomkit_core::constants::exit_codes;

/// Failures specific to the command-line front end.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("cannot parse operand '{operand}' in base {radix}")]
    Parse { operand: String, radix: u32 },

    #[error("{failures} of {cases} verification cases disagree with the reference")]
    Mismatch { failures: usize, cases: usize },

    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Exit code for an error reaching `main`.
#[must_use]
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(cli) = err.downcast_ref::<CliError>() {
        return match cli {
            CliError::Parse { .. } => exit_codes::ERROR_GENERIC,
            CliError::Mismatch { .. } => exit_codes::ERROR_MISMATCH,
            CliError::Config(_) => exit_codes::ERROR_CONFIG,
        };
    }
    if err.downcast_ref::<ProfileError>().is_some() {
        return exit_codes::ERROR_CONFIG;
    }
    exit_codes::ERROR_GENERIC
}
