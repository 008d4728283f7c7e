//! Expansion of `-i` patterns into input files

use crate::error::CliError;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Expand one pattern into the files it names, in glob order
///
/// A pattern that names no file is an error, so a typo in one of several
/// inputs is not silently skipped.
pub fn expand_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    let paths = glob::glob(pattern).map_err(|err| {
        log::debug!("Rejected pattern {pattern}: {err}");
        CliError::InvalidPattern(pattern.to_string())
    })?;

    let mut files = Vec::new();
    for entry in paths {
        let path = entry.with_context(|| format!("Error reading a match of {pattern}"))?;
        if path.is_file() {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(CliError::FileNotFound(pattern.to_string()).into());
    }
    Ok(files)
}
