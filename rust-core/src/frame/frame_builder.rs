use log::debug;
use nalgebra::{Matrix3, Vector3};

use crate::config::EngineSettings;
use crate::error::{Result, ViewError};
use crate::frame::field_set::FieldSet;
use crate::frame::derived_frame::{field_names as names, Frame};
use crate::import::SiteBatch;
use crate::lattice::{director_gradient, gradient, LatticeDims};
use crate::tensor::Operand::{Constant, Field};
use crate::tensor::{contract, director_and_order, expand, levi_civita, TensorField};

/// Site data of one batch laid out by lattice index.
struct PlacedSites {
    q5: Vec<[f64; 5]>,
    site_types: Vec<i64>,
    boundary: Vec<bool>,
    order: Vec<f64>,
}

fn place(batch: &SiteBatch) -> Result<PlacedSites> {
    let dims = batch.dims;
    let volume = dims.volume();
    if batch.records.len() != volume {
        return Err(ViewError::ShapeMismatch(format!(
            "'{}': {} site records for a {} lattice of {} sites",
            batch.source.display(),
            batch.records.len(),
            dims,
            volume
        )));
    }

    let mut placed = PlacedSites {
        q5: vec![[0.0; 5]; volume],
        site_types: vec![0; volume],
        boundary: vec![false; volume],
        order: vec![0.0; volume],
    };
    let mut seen = vec![false; volume];
    for record in &batch.records {
        let [x, y, z] = record.coords;
        if x >= dims.lx || y >= dims.ly || z >= dims.lz {
            return Err(ViewError::ShapeMismatch(format!(
                "'{}': site ({}, {}, {}) outside the {} lattice",
                batch.source.display(),
                x,
                y,
                z,
                dims
            )));
        }
        let site = dims.index(x, y, z);
        if std::mem::replace(&mut seen[site], true) {
            return Err(ViewError::ShapeMismatch(format!(
                "'{}': site ({}, {}, {}) listed twice",
                batch.source.display(),
                x,
                y,
                z
            )));
        }
        placed.q5[site] = record.q5;
        placed.site_types[site] = record.site_type;
        placed.boundary[site] = record.is_boundary();
        placed.order[site] = record.order;
    }
    Ok(placed)
}

fn scalar_mask(site_types: &[i64], keep: impl Fn(i64) -> bool) -> TensorField {
    TensorField::from_scalars(
        site_types
            .iter()
            .map(|&t| if keep(t) { 1.0 } else { 0.0 })
            .collect(),
    )
}

/// Derives the full field set of a frame from one canonical batch.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuilder {
    q0: f64,
}

impl Default for FrameBuilder {
    fn default() -> Self {
        Self::from_settings(&EngineSettings::default())
    }
}

impl FrameBuilder {
    pub fn from_settings(settings: &EngineSettings) -> Self {
        Self { q0: settings.q0 }
    }

    /// Set the chirality offset used in `K2 = (twist - q0)^2`.
    pub fn with_q0(mut self, q0: f64) -> Self {
        self.q0 = q0;
        self
    }

    pub fn q0(&self) -> f64 {
        self.q0
    }

    pub fn build(&self, batch: &SiteBatch) -> Result<Frame> {
        let dims: LatticeDims = batch.dims;
        let PlacedSites {
            q5,
            site_types,
            boundary,
            mut order,
        } = place(batch)?;

        // 1) Mask boundary sites: saturate the order, drop the tensor
        let max_order = order.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mut q: Vec<Matrix3<f64>> = Vec::with_capacity(q5.len());
        for (site, components) in q5.iter().enumerate() {
            if boundary[site] {
                order[site] = max_order;
                q.push(Matrix3::zeros());
            } else {
                q.push(expand(components));
            }
        }

        // 2) Director everywhere, site masks
        let directors: Vec<Vector3<f64>> = q.iter().map(|m| director_and_order(m).0).collect();
        let num_boundaries = site_types.iter().copied().max().unwrap_or(0).max(0) as usize;

        let mut fields = FieldSet::new();
        fields.insert(names::ORDER, TensorField::from_scalars(order))?;
        fields.insert(names::DIRECTOR, TensorField::from_vectors(&directors))?;
        fields.insert(names::NEMATIC_SITES, scalar_mask(&site_types, |t| t <= 0))?;
        for k in 1..=num_boundaries {
            let id = k as i64;
            fields.insert(names::boundary(k), scalar_mask(&site_types, |t| t == id))?;
        }

        // 3) Derivatives
        let q = TensorField::from_matrices(&q);
        let n = TensorField::from_vectors(&directors);
        let dq = gradient(&q, dims)?;
        let dn = director_gradient(&n, dims)?;
        debug!("{}: derivatives on {} lattice", batch.source.display(), dims);

        // 4) Invariants
        let l1 = contract("ijk,ijk", &[Field(&dq), Field(&dq)])?;
        let l2 = contract("iik,jjk", &[Field(&dq), Field(&dq)])?;
        let l3 = contract("ijk,kij", &[Field(&dq), Field(&dq)])?;
        let l6 = contract("ij,ikl,jkl", &[Field(&q), Field(&dq), Field(&dq)])?;
        let l24 = l2.sub(&l3)?;

        let splay = contract("ii", &[Field(&dn)])?;
        let splay_vec = contract("i,jj", &[Field(&n), Field(&dn)])?;
        let k1 = splay.map(|s| s * s);

        let eps = levi_civita();
        let twist = contract("i,ijk,jk", &[Field(&n), Constant(&eps), Field(&dn)])?;
        let q0 = self.q0;
        let k2 = twist.map(|t| (t - q0) * (t - q0));

        let bend = contract("i,ij", &[Field(&n), Field(&dn)])?;
        let k3 = contract("i,i", &[Field(&bend), Field(&bend)])?;
        let k24 = contract("ij,ji", &[Field(&dn), Field(&dn)])?.sub(&k3)?;
        let active_force = splay_vec.sub(&bend)?;

        let abs_n: Vec<TensorField> = (0..3)
            .map(|c| TensorField::from_scalars(directors.iter().map(|v| v[c].abs()).collect()))
            .collect();

        let derived = [
            (names::ENERGY_L1, l1),
            (names::ENERGY_L2, l2),
            (names::ENERGY_L6, l6),
            (names::ENERGY_L3, l3),
            (names::ENERGY_L24, l24),
            (names::SPLAY, splay),
            (names::SPLAY_VEC, splay_vec),
            (names::ENERGY_K1, k1),
            (names::TWIST, twist),
            (names::ENERGY_K2, k2),
            (names::BEND, bend),
            (names::ENERGY_K3, k3),
        ];
        for (name, mut value) in derived {
            value.zero_where(|site| site_types[site] == 0);
            fields.insert(name, value)?;
        }
        for (name, value) in [names::ABS_NX, names::ABS_NY, names::ABS_NZ].into_iter().zip(abs_n) {
            fields.insert(name, value)?;
        }
        for (name, mut value) in [(names::ACTIVE_FORCE, active_force), (names::ENERGY_K24, k24)] {
            value.zero_where(|site| site_types[site] == 0);
            fields.insert(name, value)?;
        }
        debug!(
            "{}: derived {} fields, {} boundary objects",
            batch.source.display(),
            fields.len(),
            num_boundaries
        );

        Ok(Frame {
            dims,
            fields,
            num_boundaries,
            schema: batch.schema,
            source: batch.source.clone(),
            timestamp: batch.timestamp,
        })
    }
}
