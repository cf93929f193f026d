use log::debug;

use crate::error::{Result, ViewError};
use crate::frame::{FieldSet, Frame};
use crate::lattice::LatticeDims;
use crate::tensor::TensorField;

/// A regular grid of per-site fields that can be sliced.
///
/// Grid point `(a, b, c)` sits at world position `spacing * (a, b, c)` in
/// full-lattice units.
pub trait SampledGrid {
    fn dims(&self) -> LatticeDims;
    fn spacing(&self) -> usize;
    fn fields(&self) -> &FieldSet;
}

impl SampledGrid for Frame {
    fn dims(&self) -> LatticeDims {
        self.dims
    }

    fn spacing(&self) -> usize {
        1
    }

    fn fields(&self) -> &FieldSet {
        &self.fields
    }
}

/// Every field of a frame sampled on every `stride`-th site.
#[derive(Debug, Clone)]
pub struct CoarseFields {
    dims: LatticeDims,
    stride: usize,
    fields: FieldSet,
}

impl CoarseFields {
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn field(&self, name: &str) -> Option<&TensorField> {
        self.fields.get(name)
    }
}

impl SampledGrid for CoarseFields {
    fn dims(&self) -> LatticeDims {
        self.dims
    }

    fn spacing(&self) -> usize {
        self.stride
    }

    fn fields(&self) -> &FieldSet {
        &self.fields
    }
}

/// Sample a frame on a lattice `stride` times sparser along each axis.
///
/// Coarse point `(a, b, c)` takes the values of full site
/// `(a*stride, b*stride, c*stride)` unchanged; directors are never averaged.
/// A stride longer than an axis leaves that axis, and so every field, empty.
pub fn coarsen(frame: &Frame, stride: usize) -> Result<CoarseFields> {
    if stride == 0 {
        return Err(ViewError::InvalidStride(stride));
    }
    let full = frame.dims();
    let dims = full.coarsened(stride);
    let mut sites = Vec::with_capacity(dims.volume());
    for c in 0..dims.lz {
        for b in 0..dims.ly {
            for a in 0..dims.lx {
                sites.push(full.index(a * stride, b * stride, c * stride));
            }
        }
    }
    debug!("coarsened {} lattice to {} (stride {})", full, dims, stride);
    Ok(CoarseFields {
        dims,
        stride,
        fields: frame.fields().gather(&sites),
    })
}
