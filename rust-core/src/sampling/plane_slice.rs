use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::config::PLANE_NORMAL_TOLERANCE;
use crate::error::{Result, ViewError};
use crate::frame::FieldSet;
use crate::lattice::LatticeDims;
use crate::sampling::coarse_sampler::SampledGrid;

/// A slicing plane in full-lattice units with a unit normal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    normal: Vector3<f64>,
    origin: Vector3<f64>,
}

impl Plane {
    /// Plane through `origin`; `normal` is normalised and must not vanish.
    pub fn new(normal: Vector3<f64>, origin: Vector3<f64>) -> Result<Self> {
        let length = normal.norm();
        if !length.is_finite() || length <= PLANE_NORMAL_TOLERANCE {
            return Err(ViewError::InvalidPlane(format!(
                "normal ({}, {}, {}) has no direction",
                normal.x, normal.y, normal.z
            )));
        }
        Ok(Self {
            normal: normal / length,
            origin,
        })
    }

    /// Plane whose normal has polar angle `theta` (from +z) and azimuth `phi`.
    pub fn from_angles(theta: f64, phi: f64, origin: Vector3<f64>) -> Self {
        let normal = Vector3::new(
            theta.sin() * phi.cos(),
            theta.sin() * phi.sin(),
            theta.cos(),
        );
        Self { normal, origin }
    }

    /// Normal to +x through the centre of the box.
    pub fn default_for(dims: LatticeDims) -> Self {
        Self {
            normal: Vector3::x(),
            origin: dims.center(),
        }
    }

    pub fn normal(&self) -> Vector3<f64> {
        self.normal
    }

    pub fn origin(&self) -> Vector3<f64> {
        self.origin
    }

    /// `(theta, phi)` of the normal, inverse of [`Plane::from_angles`].
    pub fn angles(&self) -> (f64, f64) {
        let theta = self.normal.z.clamp(-1.0, 1.0).acos();
        let phi = self.normal.y.atan2(self.normal.x);
        (theta, phi)
    }

    /// Tilt the normal by `dtheta` and turn it by `dphi`, keeping the origin.
    pub fn rotated(&self, dtheta: f64, dphi: f64) -> Self {
        let (theta, phi) = self.angles();
        Self::from_angles(theta + dtheta, phi + dphi, self.origin)
    }

    /// Same orientation, moved to `shift` along the normal from the box centre.
    pub fn centered(&self, dims: LatticeDims, shift: f64) -> Self {
        Self {
            normal: self.normal,
            origin: dims.center() + self.normal * shift,
        }
    }

}

/// Grid points of a sampled grid lying on a plane, with their field values.
#[derive(Debug, Clone)]
pub struct PlaneSlice {
    /// Origin after snapping onto the grid spacing
    pub origin: Vector3<f64>,
    /// World positions of the kept points
    pub positions: Vec<Vector3<f64>>,
    /// Site indices of the kept points within the sliced grid
    pub sites: Vec<usize>,
    /// Every field of the grid restricted to the kept points
    pub fields: FieldSet,
}

impl PlaneSlice {
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}

/// Snap each origin component towards zero onto a multiple of `stride`.
pub fn snap_origin(origin: Vector3<f64>, stride: usize) -> Vector3<f64> {
    let stride = stride as f64;
    origin.map(|c| stride * (c / stride).trunc())
}

/// Cut the grid points within half a grid spacing of `plane`.
///
/// The origin is first snapped to a multiple of `stride`, the current glyph
/// stride, whether `grid` is the full frame or its coarsened copy. Full-field
/// and glyph slices through the same plane therefore share one layer, and a
/// plane moved in sub-stride steps keeps selecting it.
pub fn slice<G: SampledGrid + ?Sized>(grid: &G, plane: &Plane, stride: usize) -> Result<PlaneSlice> {
    if stride == 0 {
        return Err(ViewError::InvalidStride(stride));
    }
    let dims = grid.dims();
    let spacing = grid.spacing();
    let origin = snap_origin(plane.origin(), stride);
    let normal = plane.normal();
    let half_width = spacing as f64 / 2.0;

    let mut positions = Vec::new();
    let mut sites = Vec::new();
    for site in 0..dims.volume() {
        let [a, b, c] = dims.coords(site);
        let position = Vector3::new(a as f64, b as f64, c as f64) * spacing as f64;
        if (position - origin).dot(&normal).abs() < half_width {
            positions.push(position);
            sites.push(site);
        }
    }

    Ok(PlaneSlice {
        origin,
        fields: grid.fields().gather(&sites),
        positions,
        sites,
    })
}
