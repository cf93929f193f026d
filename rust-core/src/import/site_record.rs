use std::path::PathBuf;

use crate::interfaces::Schema;
use crate::lattice::LatticeDims;

/// One row of simulation output: a lattice site and its raw data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SiteRecord {
    /// Integer lattice coordinates `(x, y, z)`.
    pub coords: [usize; 3],
    /// Independent Q-tensor components `(Qxx, Qxy, Qxz, Qyy, Qyz)`.
    pub q5: [f64; 5],
    /// 0 for bulk nematic, k > 0 for sites on boundary object k.
    pub site_type: i64,
    /// Scalar order parameter S.
    pub order: f64,
}

impl SiteRecord {
    pub fn is_boundary(&self) -> bool {
        self.site_type > 0
    }
}

/// All site records of one timestep in the canonical layout, whatever schema
/// they were read from.
#[derive(Debug, Clone)]
pub struct SiteBatch {
    pub dims: LatticeDims,
    pub records: Vec<SiteRecord>,
    pub schema: Schema,
    pub source: PathBuf,
    pub timestamp: Option<u64>,
}
