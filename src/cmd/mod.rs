use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

/// Canonical re-encoding command.
pub mod canon;
/// SHA-1 of a canonical encoding.
pub mod hash;
/// Tree printing command.
pub mod show;

#[cfg(test)]
mod tests;

/// Reads a whole input file, refusing it up front if it exceeds `max_input`.
pub fn read_input(path: &Path, max_input: Option<usize>) -> Result<Vec<u8>> {
    if let Some(limit) = max_input {
        let len = fs::metadata(path)
            .with_context(|| format!("failed to stat {}", path.display()))?
            .len();
        if len > limit as u64 {
            bail!("{} is {len} bytes, over the {limit} byte limit", path.display());
        }
    }

    let data = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    tracing::debug!(path = %path.display(), len = data.len(), "read input");
    Ok(data)
}

pub(crate) fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut s, b| {
        use std::fmt::Write;
        let _ = write!(s, "{:02x}", b);
        s
    })
}
