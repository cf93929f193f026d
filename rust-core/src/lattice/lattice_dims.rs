use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ViewError};
use crate::interfaces::Axis;

/// Extent of a periodic simple-cubic simulation lattice.
///
/// Sites are numbered with x fastest: `index = x + lx * (y + ly * z)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LatticeDims {
    pub lx: usize,
    pub ly: usize,
    pub lz: usize,
}

impl LatticeDims {
    /// Dimensions of a dataset lattice; every axis must hold at least one site.
    pub fn new(lx: usize, ly: usize, lz: usize) -> Result<Self> {
        if lx == 0 || ly == 0 || lz == 0 {
            return Err(ViewError::ShapeMismatch(format!(
                "lattice dimensions must be positive, got {}x{}x{}",
                lx, ly, lz
            )));
        }
        Ok(Self { lx, ly, lz })
    }

    pub fn as_array(&self) -> [usize; 3] {
        [self.lx, self.ly, self.lz]
    }

    /// Number of sites along `axis`.
    pub fn extent(&self, axis: Axis) -> usize {
        self.as_array()[axis.index()]
    }

    /// Total number of sites.
    pub fn volume(&self) -> usize {
        self.lx * self.ly * self.lz
    }

    pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
        x + self.lx * (y + self.ly * z)
    }

    pub fn coords(&self, index: usize) -> [usize; 3] {
        let x = index % self.lx;
        let rest = index / self.lx;
        [x, rest % self.ly, rest / self.ly]
    }

    /// Index of the site one step ahead (`forward`) or behind along `axis`,
    /// wrapping periodically.
    pub fn neighbor(&self, index: usize, axis: Axis, forward: bool) -> usize {
        let mut c = self.coords(index);
        let a = axis.index();
        let len = self.extent(axis);
        c[a] = if forward {
            (c[a] + 1) % len
        } else {
            (c[a] + len - 1) % len
        };
        self.index(c[0], c[1], c[2])
    }

    /// Dimensions after keeping every `stride`-th site, `floor(L / stride)`
    /// per axis. Axes shorter than the stride collapse to zero.
    pub fn coarsened(&self, stride: usize) -> LatticeDims {
        LatticeDims {
            lx: self.lx / stride,
            ly: self.ly / stride,
            lz: self.lz / stride,
        }
    }

    /// Geometric centre of the box in lattice units.
    pub fn center(&self) -> Vector3<f64> {
        Vector3::new(self.lx as f64, self.ly as f64, self.lz as f64) / 2.0
    }
}

impl std::fmt::Display for LatticeDims {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}x{}", self.lx, self.ly, self.lz)
    }
}
