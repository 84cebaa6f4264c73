//! Operand parsing and result formatting.

use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use num_bigint::BigUint;
use num_traits::Num;

use crate::config::Radix;
use crate::errors::CliError;

/// Parse an operand; `_` separators are ignored, hex takes an optional `0x`.
pub fn parse_operand(text: &str, radix: Radix) -> Result<BigUint, CliError> {
    let cleaned: String = text.trim().chars().filter(|&c| c != '_').collect();
    let digits = match radix {
        Radix::Hex => cleaned
            .strip_prefix("0x")
            .or_else(|| cleaned.strip_prefix("0X"))
            .unwrap_or(&cleaned),
        Radix::Dec => &cleaned,
    };
    BigUint::from_str_radix(digits, radix.base()).map_err(|_| CliError::Parse {
        operand: text.to_string(),
        radix: radix.base(),
    })
}

#[must_use]
pub fn format_product(value: &BigUint, radix: Radix) -> String {
    value.to_str_radix(radix.base())
}

/// Format a duration for display.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 0.001 {
        format!("{:.2}µs", secs * 1_000_000.0)
    } else if secs < 1.0 {
        format!("{:.2}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{secs:.3}s")
    } else {
        let mins = (secs / 60.0).floor() as u64;
        let remaining = secs - (mins as f64 * 60.0);
        format!("{mins}m{remaining:.1}s")
    }
}

/// Write `text` and a trailing newline to `path`.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be created or written.
pub fn write_to_file(path: &Path, text: &str) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    writeln!(file, "{text}")?;
    Ok(())
}
