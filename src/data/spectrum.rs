use crate::error::{Result, VecfuzzError};
use std::path::Path;

/// Read one spectrum file: `<index> <value>` per line, in test-vector order.
/// The index column is informational and discarded; the value column is
/// parsed as floating point.
pub fn read_spectrum<P: AsRef<Path>>(path: P) -> Result<Vec<f64>> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| {
        VecfuzzError::Spectrum(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let mut values = Vec::new();
    for (line_no, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let mut tokens = line.split_whitespace();
        let _index = tokens.next();
        let raw = tokens.next().ok_or_else(|| {
            VecfuzzError::Spectrum(format!(
                "{}:{}: expected '<index> <value>'",
                path.display(),
                line_no + 1
            ))
        })?;
        let value: f64 = raw.parse().map_err(|_| {
            VecfuzzError::Spectrum(format!(
                "{}:{}: invalid signal value '{}'",
                path.display(),
                line_no + 1,
                raw
            ))
        })?;
        values.push(value);
    }
    Ok(values)
}
