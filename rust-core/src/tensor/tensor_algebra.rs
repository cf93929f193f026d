use nalgebra::{Matrix3, SymmetricEigen, Vector3};

use crate::tensor::tensor_field::TensorField;

/// Build the symmetric traceless Q-tensor from its five independent
/// components `(Qxx, Qxy, Qxz, Qyy, Qyz)`.
///
/// `Qzz = -(Qxx + Qyy)`, so symmetry and tracelessness hold by construction.
pub fn expand(q5: &[f64; 5]) -> Matrix3<f64> {
    let [qxx, qxy, qxz, qyy, qyz] = *q5;
    Matrix3::new(
        qxx, qxy, qxz,
        qxy, qyy, qyz,
        qxz, qyz, -qxx - qyy,
    )
}

/// Director and scalar order of a Q-tensor.
///
/// The director is the eigenvector of the largest eigenvalue and the order is
/// that eigenvalue. The sign of the director is arbitrary. At isotropic or
/// biaxially degenerate sites the direction is numerically underdetermined;
/// whatever the eigensolver returns is used as-is.
pub fn director_and_order(q: &Matrix3<f64>) -> (Vector3<f64>, f64) {
    let eigen = SymmetricEigen::new(*q);
    let top = eigen.eigenvalues.imax();
    let director: Vector3<f64> = eigen.eigenvectors.column(top).into();
    let norm = director.norm();
    let director = if norm > 0.0 { director / norm } else { director };
    (director, eigen.eigenvalues[top])
}

/// Largest eigenvalue of a Q-tensor, i.e. the scalar order `S`.
pub fn top_eigenvalue(q: &Matrix3<f64>) -> f64 {
    q.symmetric_eigenvalues().max()
}

/// The rank-3 alternating tensor ε_ijk as a single-site field.
pub fn levi_civita() -> TensorField {
    let mut eps = [[[0.0; 3]; 3]; 3];
    eps[0][1][2] = 1.0;
    eps[1][2][0] = 1.0;
    eps[2][0][1] = 1.0;
    eps[0][2][1] = -1.0;
    eps[2][1][0] = -1.0;
    eps[1][0][2] = -1.0;
    TensorField::from_rank3(eps)
}
