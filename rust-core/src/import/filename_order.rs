//! Frame ordering from the timestamps embedded in output filenames.
//!
//! Simulation output is named `<run>_<timestamp>.<ext>`; runs split over
//! several MPI ranks append a subdomain tag such as `x0y1z0`, either right
//! after the timestamp or right before it. The tag is never a timestamp.

use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::{Result, ViewError};

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// True for parallel-domain tags like `x0y0z0` or `x12y3z7`.
pub fn is_domain_tag(token: &str) -> bool {
    if !(token.contains('x') && token.contains('y') && token.contains('z')) {
        return false;
    }
    let residue: String = token.chars().filter(|c| !matches!(c, 'x' | 'y' | 'z')).collect();
    all_digits(&residue)
}

/// Integer timestamp of an output file, if its name carries one.
pub fn timestamp_of(path: &Path) -> Option<u64> {
    let stem = path.file_stem()?.to_str()?;
    let tokens: Vec<&str> = stem.split('_').collect();
    let mut candidate = *tokens.last()?;
    if is_domain_tag(candidate) && tokens.len() > 1 {
        candidate = tokens[tokens.len() - 2];
    }
    if all_digits(candidate) {
        candidate.parse().ok()
    } else {
        None
    }
}

/// Order paths by ascending filename timestamp.
///
/// If any name has no numeric timestamp the input order is returned
/// unchanged. Equal timestamps keep their input order.
pub fn sort_by_timestamp<P: AsRef<Path>>(paths: &[P]) -> Vec<PathBuf> {
    let owned: Vec<PathBuf> = paths.iter().map(|p| p.as_ref().to_path_buf()).collect();
    let mut keyed = Vec::with_capacity(owned.len());
    for path in &owned {
        match timestamp_of(path) {
            Some(t) => keyed.push((t, path.clone())),
            None => {
                warn!(
                    "no timestamp in '{}', keeping files in the given order",
                    path.display()
                );
                return owned;
            }
        }
    }
    keyed.sort_by_key(|(t, _)| *t);
    debug!("sorted {} files by timestamp", keyed.len());
    keyed.into_iter().map(|(_, p)| p).collect()
}

/// Resolve shell-style glob patterns to the files they match, pattern by pattern.
pub fn expand_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let pattern = pattern.as_ref();
        let entries = glob::glob(pattern)
            .map_err(|e| ViewError::Pattern(format!("'{}': {}", pattern, e)))?;
        for entry in entries {
            let path = entry.map_err(|e| {
                let path = e.path().to_path_buf();
                ViewError::io(path, e.into_error())
            })?;
            files.push(path);
        }
    }
    Ok(files)
}
