// Lattice module: periodic simulation lattice and finite differences on it
// This module provides site indexing with periodic wraparound and the central-difference operators

// ======================== MODULE DECLARATIONS ========================
pub mod lattice_dims;
pub mod periodic_difference;

// Test modules
mod _tests_lattice_dims;
mod _tests_periodic_difference;

// ======================== LATTICE GEOMETRY ========================
pub use lattice_dims::LatticeDims; // struct - (Lx, Ly, Lz) of a periodic lattice, x-fastest site numbering
// LatticeDims impl methods:
//   new(lx, ly, lz) -> Result<Self>                       - positive dimensions only
//   volume(&self) -> usize                                - number of sites
//   index(&self, x, y, z) -> usize                        - flat site index
//   coords(&self, index) -> [usize; 3]                    - inverse of index
//   neighbor(&self, index, axis: Axis, forward: bool) -> usize - periodic neighbour
//   coarsened(&self, stride) -> LatticeDims               - floor(L / stride) per axis
//   center(&self) -> Vector3<f64>                         - box centre in lattice units

// ======================== FINITE DIFFERENCES ========================
pub use periodic_difference::{
    diff,              // fn(field, dims, axis) -> Result<TensorField> - f(x+e) - f(x-e), periodic
    diff_director,     // fn(n, dims, axis) -> Result<TensorField> - same, behind neighbour sign-corrected
    director_gradient, // fn(n, dims) -> Result<TensorField> - [i][j] = ∂_i n_j
    gradient,          // fn(field, dims) -> Result<TensorField> - derivative index prepended, e.g. ∂_i Q_jk
    nematic_sign,      // fn(x: f64) -> f64 - sign with sign(0) = 0
};
