// Tensor module: per-site tensor storage, Q-tensor algebra and index contractions
// This module holds the pure functions every derived field is built from

// ======================== MODULE DECLARATIONS ========================
pub mod contraction;
pub mod tensor_algebra;
pub mod tensor_field;

mod _tests_tensor_algebra;

// ======================== PER-SITE STORAGE ========================
pub use tensor_field::{
    TensorField,         // struct - batch of rank <= 3 tensors, one per lattice site (row-major components)
    components_for_rank, // fn(rank: usize) -> usize - 3^rank
    MAX_RANK,            // const - highest supported rank (3)
};
// TensorField impl methods:
//   from_scalars / from_vectors / from_matrices / from_rank3     - constructors
//   zeros(rank, sites) -> Self                                   - zero-filled field
//   scalar(site) / vector(site) / matrix(site)                   - typed site access
//   gather(&self, sites: &[usize]) -> TensorField                - subset in the given order
//   zero_where(&mut self, keep: impl Fn(usize) -> bool)          - mask sites
//   sub(&self, other) -> Result<TensorField>                     - component-wise difference
//   range(&self) -> Option<(f64, f64)>                           - min/max over all components

// ======================== Q-TENSOR ALGEBRA ========================
pub use tensor_algebra::{
    director_and_order, // fn(q: &Matrix3<f64>) -> (Vector3<f64>, f64) - top eigenvector and eigenvalue
    expand,             // fn(q5: &[f64; 5]) -> Matrix3<f64> - symmetric traceless Q from 5 components
    levi_civita,        // fn() -> TensorField - ε_ijk as a single-site rank-3 field
    top_eigenvalue,     // fn(q: &Matrix3<f64>) -> f64 - scalar order S
};

// ======================== CONTRACTIONS ========================
pub use contraction::{
    contract,    // fn(expr: &str, operands: &[Operand]) -> Result<TensorField> - parse + evaluate
    Contraction, // struct - parsed einsum expression (operand slots, free and summed labels)
    Operand,     // enum - Field (per site) or Constant (broadcast to every site)
};
