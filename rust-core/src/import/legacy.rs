//! Reader for the older two-file output format.
//!
//! Each timestep is a pair of space separated files whose names differ only in
//! `Qtensor` ↔ `Qmatrix`:
//! - the `Qtensor` file tags every site with its type in the last column,
//! - the `Qmatrix` file holds the five independent tensor components.
//!
//! The lattice size is only recorded in the filename (`..._<Lx>x<Ly>x<Lz>_...`)
//! and no order parameter is stored, so S is recomputed from the tensor.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::config::{LEGACY_SITE_TAG, LEGACY_TENSOR_TAG};
use crate::error::{Result, ViewError};
use crate::import::canonical::{parse_integral, parse_number};
use crate::import::filename_order::timestamp_of;
use crate::import::site_record::{SiteBatch, SiteRecord};
use crate::interfaces::Schema;
use crate::lattice::LatticeDims;
use crate::tensor::{expand, top_eigenvalue};

/// True for the site-type file of a legacy pair.
pub fn is_legacy_site_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.contains(LEGACY_SITE_TAG))
}

/// The `Qmatrix` file paired with a `Qtensor` file.
pub fn legacy_partner(site_file: &Path) -> PathBuf {
    let name = site_file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .replace(LEGACY_SITE_TAG, LEGACY_TENSOR_TAG);
    site_file.with_file_name(name)
}

fn parse_dims_token(token: &str) -> Option<[usize; 3]> {
    let parts: Vec<&str> = token.split('x').collect();
    if parts.len() != 3 {
        return None;
    }
    let mut dims = [0; 3];
    for (d, part) in dims.iter_mut().zip(&parts) {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        *d = part.parse().ok()?;
    }
    Some(dims)
}

/// Lattice dimensions encoded in a legacy filename as an `_`-delimited
/// `<Lx>x<Ly>x<Lz>` token.
pub fn dims_from_filename(path: &Path) -> Result<LatticeDims> {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    let [lx, ly, lz] = stem
        .split('_')
        .skip(1)
        .find_map(parse_dims_token)
        .ok_or_else(|| {
            ViewError::parse(path, 0, "no '<Lx>x<Ly>x<Lz>' dimensions in filename")
        })?;
    LatticeDims::new(lx, ly, lz)
}

/// Spatial stride of data written on every `s`-th site:
/// `s = round((Lx*Ly*Lz / rows)^(1/3))`, at least 1.
///
/// This is a heuristic: it assumes the same stride along all three axes.
pub fn infer_stride(dims: LatticeDims, rows: usize) -> usize {
    if rows == 0 {
        return 1;
    }
    let ratio = dims.volume() as f64 / rows as f64;
    (ratio.cbrt().round() as usize).max(1)
}

fn data_rows<'a>(text: &'a str) -> impl Iterator<Item = (usize, Vec<&'a str>)> + 'a {
    text.lines()
        .enumerate()
        .map(|(n, row)| (n + 1, row.split_whitespace().collect::<Vec<_>>()))
        .filter(|(_, tokens)| !tokens.is_empty())
}

/// Combine the text of a `Qtensor`/`Qmatrix` pair into one canonical batch.
pub fn parse_legacy(site_text: &str, tensor_text: &str, site_file: &Path) -> Result<SiteBatch> {
    let tensor_file = legacy_partner(site_file);

    let mut site_types = Vec::new();
    for (line, tokens) in data_rows(site_text) {
        let column = tokens.len() - 1;
        site_types.push(parse_integral(site_file, line, column, tokens[column])?);
    }

    let mut tensors = Vec::new();
    for (line, tokens) in data_rows(tensor_text) {
        if tokens.len() != 5 {
            return Err(ViewError::parse(
                &tensor_file,
                line,
                format!("expected 5 tensor components, found {}", tokens.len()),
            ));
        }
        let mut q5 = [0.0; 5];
        for (k, q) in q5.iter_mut().enumerate() {
            *q = parse_number(&tensor_file, line, k, tokens[k])?;
        }
        tensors.push(q5);
    }

    if site_types.is_empty() {
        return Err(ViewError::parse(site_file, 0, "no data rows"));
    }
    if site_types.len() != tensors.len() {
        return Err(ViewError::ShapeMismatch(format!(
            "'{}' has {} rows but '{}' has {}",
            site_file.display(),
            site_types.len(),
            tensor_file.display(),
            tensors.len()
        )));
    }

    let rows = tensors.len();
    let mut dims = dims_from_filename(site_file)?;
    let stride = infer_stride(dims, rows);
    if stride > 1 {
        // TODO: carry the stride into the derivatives instead of shrinking the lattice
        let reduced = dims.coarsened(stride);
        warn!(
            "'{}': {} rows for a {} lattice, assuming data stride {} and a {} lattice",
            site_file.display(),
            rows,
            dims,
            stride,
            reduced
        );
        dims = LatticeDims::new(reduced.lx, reduced.ly, reduced.lz)?;
    }
    if dims.volume() != rows {
        return Err(ViewError::ShapeMismatch(format!(
            "'{}': {} rows do not fill a {} lattice ({} sites)",
            site_file.display(),
            rows,
            dims,
            dims.volume()
        )));
    }

    let records = tensors
        .iter()
        .zip(&site_types)
        .enumerate()
        .map(|(row, (q5, &site_type))| SiteRecord {
            coords: dims.coords(row),
            q5: *q5,
            site_type,
            order: top_eigenvalue(&expand(q5)),
        })
        .collect();
    debug!("read legacy pair '{}', lattice {}", site_file.display(), dims);

    Ok(SiteBatch {
        dims,
        records,
        schema: Schema::Legacy,
        source: site_file.to_path_buf(),
        timestamp: timestamp_of(site_file),
    })
}

/// Read a legacy frame given its `Qtensor` file.
pub fn read_legacy_pair(site_file: &Path) -> Result<SiteBatch> {
    let tensor_file = legacy_partner(site_file);
    let site_text = fs::read_to_string(site_file).map_err(|e| ViewError::io(site_file, e))?;
    let tensor_text = fs::read_to_string(&tensor_file).map_err(|e| ViewError::io(&tensor_file, e))?;
    parse_legacy(&site_text, &tensor_text, site_file)
}
