//! Reading report dumps from a file or standard input.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};

/// Reads the dump at `path`, or standard input when `path` is `None` or `-`.
///
/// Invalid UTF-8 is replaced rather than rejected; exports from the records
/// system are not always clean.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    let bytes = match path {
        Some(path) if path != Path::new("-") => {
            fs::read(path).with_context(|| format!("read {}", path.display()))?
        }
        _ => {
            let mut bytes = Vec::new();
            io::stdin()
                .read_to_end(&mut bytes)
                .context("read standard input")?;
            bytes
        }
    };
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
