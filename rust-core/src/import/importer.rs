use std::path::Path;

use log::{info, warn};

use crate::error::{Result, ViewError};
use crate::import::canonical::read_canonical;
use crate::import::legacy::{is_legacy_site_file, read_legacy_pair};
use crate::import::site_record::SiteBatch;

/// Read every frame file into canonical batches, keeping the given order.
///
/// The schema is decided by the first file: if it does not parse as a
/// canonical file, the whole list is read as legacy `Qtensor`/`Qmatrix`
/// pairs instead (files without `Qtensor` in their name are skipped then).
/// A canonical parse failure with no legacy files to fall back on is
/// returned as-is.
pub fn import_batches<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<SiteBatch>> {
    let first = paths.first().ok_or(ViewError::EmptyInput)?.as_ref();

    match read_canonical(first) {
        Ok(batch) => {
            let mut batches = Vec::with_capacity(paths.len());
            batches.push(batch);
            for path in &paths[1..] {
                batches.push(read_canonical(path.as_ref())?);
            }
            info!("imported {} canonical frames", batches.len());
            Ok(batches)
        }
        Err(err) if err.is_parse() => {
            let site_files: Vec<&Path> = paths
                .iter()
                .map(|p| p.as_ref())
                .filter(|p| is_legacy_site_file(p))
                .collect();
            if site_files.is_empty() {
                return Err(err);
            }
            warn!("{}; reading input as legacy Qtensor/Qmatrix pairs", err);
            let batches = site_files
                .into_iter()
                .map(read_legacy_pair)
                .collect::<Result<Vec<_>>>()?;
            info!("imported {} legacy frames", batches.len());
            Ok(batches)
        }
        Err(err) => Err(err),
    }
}
