//! Central differences on the periodic lattice.
//!
//! All operators return the undivided difference `f(x + e) - f(x - e)`; the
//! lattice spacing never enters the derived energies as a unit.

use crate::error::{Result, ViewError};
use crate::interfaces::Axis;
use crate::lattice::lattice_dims::LatticeDims;
use crate::tensor::{TensorField, MAX_RANK};

fn check_sites(field: &TensorField, dims: LatticeDims) -> Result<()> {
    if field.len() != dims.volume() {
        return Err(ViewError::ShapeMismatch(format!(
            "field holds {} sites but the {} lattice has {}",
            field.len(),
            dims,
            dims.volume()
        )));
    }
    Ok(())
}

/// Sign function with `sign(0) = 0`.
pub fn nematic_sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Central difference of any per-site tensor field along one axis.
pub fn diff(field: &TensorField, dims: LatticeDims, axis: Axis) -> Result<TensorField> {
    check_sites(field, dims)?;
    let mut out = TensorField::zeros(field.rank(), field.len());
    for site in 0..field.len() {
        let ahead = field.site(dims.neighbor(site, axis, true));
        let behind = field.site(dims.neighbor(site, axis, false));
        for ((o, a), b) in out.site_mut(site).iter_mut().zip(ahead).zip(behind) {
            *o = a - b;
        }
    }
    Ok(out)
}

/// `∂_i f` for every axis, with the derivative index leading:
/// a rank-r input gives a rank-(r+1) field whose component `[i][...]` is
/// the difference along axis `i`.
pub fn gradient(field: &TensorField, dims: LatticeDims) -> Result<TensorField> {
    if field.rank() >= MAX_RANK {
        return Err(ViewError::ShapeMismatch(format!(
            "cannot differentiate a rank-{} field",
            field.rank()
        )));
    }
    let width = field.width();
    let partials = Axis::ALL
        .iter()
        .map(|&axis| diff(field, dims, axis))
        .collect::<Result<Vec<_>>>()?;

    let mut data = Vec::with_capacity(3 * field.as_slice().len());
    for site in 0..field.len() {
        for partial in &partials {
            data.extend_from_slice(partial.site(site));
        }
    }
    debug_assert_eq!(data.len(), field.len() * 3 * width);
    TensorField::from_raw(field.rank() + 1, data)
}

/// Central difference of a director field along one axis.
///
/// The director is only defined up to sign, so before subtracting, the
/// neighbour behind is multiplied by `sign(n_ahead · n_behind)`. The
/// correction is local to each site and axis.
pub fn diff_director(n: &TensorField, dims: LatticeDims, axis: Axis) -> Result<TensorField> {
    if n.rank() != 1 {
        return Err(ViewError::ShapeMismatch(format!(
            "director field must have rank 1, got rank {}",
            n.rank()
        )));
    }
    check_sites(n, dims)?;
    let mut out = TensorField::zeros(1, n.len());
    for site in 0..n.len() {
        let ahead = n.vector(dims.neighbor(site, axis, true));
        let behind = n.vector(dims.neighbor(site, axis, false));
        let corrected = behind * nematic_sign(ahead.dot(&behind));
        out.site_mut(site)
            .copy_from_slice((ahead - corrected).as_slice());
    }
    Ok(out)
}

/// Sign-corrected director derivative tensor, component `[i][j] = ∂_i n_j`.
pub fn director_gradient(n: &TensorField, dims: LatticeDims) -> Result<TensorField> {
    let partials = Axis::ALL
        .iter()
        .map(|&axis| diff_director(n, dims, axis))
        .collect::<Result<Vec<_>>>()?;

    let mut data = Vec::with_capacity(9 * n.len());
    for site in 0..n.len() {
        for partial in &partials {
            data.extend_from_slice(partial.site(site));
        }
    }
    TensorField::from_raw(2, data)
}
