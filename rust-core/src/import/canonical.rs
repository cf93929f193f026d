use std::fs;
use std::path::Path;

use log::debug;

use crate::error::{Result, ViewError};
use crate::import::filename_order::timestamp_of;
use crate::import::site_record::{SiteBatch, SiteRecord};
use crate::interfaces::Schema;
use crate::lattice::LatticeDims;

/// Columns per row: x, y, z, Qxx, Qxy, Qxz, Qyy, Qyz, site_type, order.
pub const CANONICAL_COLUMNS: usize = 10;

pub(crate) fn parse_number(path: &Path, line: usize, column: usize, token: &str) -> Result<f64> {
    token.parse::<f64>().map_err(|_| {
        ViewError::parse(
            path,
            line,
            format!("column {}: '{}' is not a number", column + 1, token),
        )
    })
}

pub(crate) fn parse_integral(path: &Path, line: usize, column: usize, token: &str) -> Result<i64> {
    let value = parse_number(path, line, column, token)?;
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(ViewError::parse(
            path,
            line,
            format!("column {}: '{}' is not an integer", column + 1, token),
        ));
    }
    Ok(value as i64)
}

fn parse_coordinate(path: &Path, line: usize, column: usize, token: &str) -> Result<usize> {
    let value = parse_integral(path, line, column, token)?;
    usize::try_from(value).map_err(|_| {
        ViewError::parse(
            path,
            line,
            format!("column {}: negative lattice coordinate {}", column + 1, value),
        )
    })
}

/// Parse the text of a canonical frame file.
///
/// Rows are whitespace separated with exactly [`CANONICAL_COLUMNS`] numeric
/// columns; blank lines are skipped. The lattice dimensions are taken from the
/// last row, whose coordinates are the largest index along every axis.
pub fn parse_canonical(text: &str, path: &Path) -> Result<SiteBatch> {
    let mut records = Vec::new();
    for (n, row) in text.lines().enumerate() {
        let line = n + 1;
        let tokens: Vec<&str> = row.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }
        if tokens.len() != CANONICAL_COLUMNS {
            return Err(ViewError::parse(
                path,
                line,
                format!("expected {} columns, found {}", CANONICAL_COLUMNS, tokens.len()),
            ));
        }
        let coords = [
            parse_coordinate(path, line, 0, tokens[0])?,
            parse_coordinate(path, line, 1, tokens[1])?,
            parse_coordinate(path, line, 2, tokens[2])?,
        ];
        let mut q5 = [0.0; 5];
        for (k, q) in q5.iter_mut().enumerate() {
            *q = parse_number(path, line, 3 + k, tokens[3 + k])?;
        }
        let site_type = parse_integral(path, line, 8, tokens[8])?;
        let order = parse_number(path, line, 9, tokens[9])?;
        records.push(SiteRecord {
            coords,
            q5,
            site_type,
            order,
        });
    }

    let last = records
        .last()
        .ok_or_else(|| ViewError::parse(path, 0, "no data rows"))?;
    let [x, y, z] = last.coords;
    let dims = LatticeDims::new(x + 1, y + 1, z + 1)?;
    debug!(
        "read {} canonical rows from '{}', lattice {}",
        records.len(),
        path.display(),
        dims
    );

    Ok(SiteBatch {
        dims,
        records,
        schema: Schema::Canonical,
        source: path.to_path_buf(),
        timestamp: timestamp_of(path),
    })
}

/// Read one canonical frame file.
pub fn read_canonical(path: &Path) -> Result<SiteBatch> {
    let text = fs::read_to_string(path).map_err(|e| ViewError::io(path, e))?;
    parse_canonical(&text, path)
}
