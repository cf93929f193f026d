use std::path::{Path, PathBuf};

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::frame::field_set::FieldSet;
use crate::interfaces::Schema;
use crate::lattice::LatticeDims;
use crate::tensor::TensorField;

/// Names under which the derived fields are stored.
pub mod field_names {
    pub const ORDER: &str = "order";
    pub const DIRECTOR: &str = "director";
    pub const NEMATIC_SITES: &str = "nematic_sites";
    pub const ENERGY_L1: &str = "energy_L1";
    pub const ENERGY_L2: &str = "energy_L2";
    pub const ENERGY_L3: &str = "energy_L3";
    pub const ENERGY_L6: &str = "energy_L6";
    pub const ENERGY_L24: &str = "energy_L24";
    pub const SPLAY: &str = "splay";
    pub const SPLAY_VEC: &str = "splay_vec";
    pub const TWIST: &str = "twist";
    pub const BEND: &str = "bend";
    pub const ENERGY_K1: &str = "energy_K1";
    pub const ENERGY_K2: &str = "energy_K2";
    pub const ENERGY_K3: &str = "energy_K3";
    pub const ENERGY_K24: &str = "energy_K24";
    pub const ACTIVE_FORCE: &str = "active_force";
    pub const ABS_NX: &str = "|n_x|";
    pub const ABS_NY: &str = "|n_y|";
    pub const ABS_NZ: &str = "|n_z|";

    /// Fields forced to zero wherever `site_type != 0`.
    pub const INVARIANTS: [&str; 14] = [
        ENERGY_L1, ENERGY_L2, ENERGY_L3, ENERGY_L6, ENERGY_L24, SPLAY, SPLAY_VEC, TWIST, BEND,
        ENERGY_K1, ENERGY_K2, ENERGY_K3, ENERGY_K24, ACTIVE_FORCE,
    ];

    /// Mask field of boundary object `k` (k >= 1).
    pub fn boundary(k: usize) -> String {
        format!("boundary_{}", k)
    }
}

/// Smallest and largest value of a scalar field, e.g. for a colour bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldRange {
    pub min: f64,
    pub max: f64,
}

/// One fully derived lattice snapshot.
///
/// Frames are only created by [`FrameBuilder`](crate::frame::FrameBuilder) and
/// never change afterwards.
#[derive(Debug, Clone)]
pub struct Frame {
    pub(crate) dims: LatticeDims,
    pub(crate) fields: FieldSet,
    pub(crate) num_boundaries: usize,
    pub(crate) schema: Schema,
    pub(crate) source: PathBuf,
    pub(crate) timestamp: Option<u64>,
}

impl Frame {
    pub fn dims(&self) -> LatticeDims {
        self.dims
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&TensorField> {
        self.fields.get(name)
    }

    /// Number of distinct boundary objects, i.e. the largest site type.
    pub fn num_boundaries(&self) -> usize {
        self.num_boundaries
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn timestamp(&self) -> Option<u64> {
        self.timestamp
    }

    /// Names of the scalar (rank-0) fields, for field pickers.
    pub fn scalar_field_names(&self) -> Vec<&str> {
        self.fields.scalar_names()
    }

    pub fn scalar_range(&self, name: &str) -> Option<FieldRange> {
        let field = self.fields.get(name).filter(|f| f.rank() == 0)?;
        field.range().map(|(min, max)| FieldRange { min, max })
    }

    /// Scalar order at `site`; `None` if the frame carries no order field.
    pub fn order(&self, site: usize) -> Option<f64> {
        self.fields.get(field_names::ORDER).map(|f| f.scalar(site))
    }

    pub fn director(&self, site: usize) -> Option<Vector3<f64>> {
        self.fields.get(field_names::DIRECTOR).map(|f| f.vector(site))
    }

    pub fn is_nematic(&self, site: usize) -> Option<bool> {
        self.fields
            .get(field_names::NEMATIC_SITES)
            .map(|f| f.scalar(site) != 0.0)
    }

    /// Nematic sites whose order lies below `threshold`: the defect cores.
    ///
    /// Empty when the order or nematic mask field is missing.
    pub fn defect_sites(&self, threshold: f64) -> Vec<usize> {
        let (Some(order), Some(nematic)) = (
            self.fields.get(field_names::ORDER),
            self.fields.get(field_names::NEMATIC_SITES),
        ) else {
            return Vec::new();
        };
        (0..self.dims.volume())
            .filter(|&site| nematic.scalar(site) != 0.0 && order.scalar(site) < threshold)
            .collect()
    }
}

/// Free-function form of [`Frame::scalar_field_names`].
pub fn scalar_field_names(frame: &Frame) -> Vec<&str> {
    frame.scalar_field_names()
}
