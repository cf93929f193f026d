#[cfg(test)]
mod _tests_tensor_algebra {
    use super::super::tensor_algebra::{director_and_order, expand, levi_civita, top_eigenvalue};
    use approx::assert_relative_eq;
    use nalgebra::{Matrix3, Vector3};

    const TOL: f64 = 1e-10;

    // Uniaxial Q = S (n n - I/3) * 3/2 has top eigenvalue S along n
    fn uniaxial(s: f64, n: Vector3<f64>) -> Matrix3<f64> {
        let n = n.normalize();
        1.5 * s * (n * n.transpose() - Matrix3::identity() / 3.0)
    }

    fn q5_of(q: &Matrix3<f64>) -> [f64; 5] {
        [q[(0, 0)], q[(0, 1)], q[(0, 2)], q[(1, 1)], q[(1, 2)]]
    }

    #[test]
    fn test_expand_symmetric_traceless() {
        let samples = [
            [0.1, 0.2, 0.3, 0.4, 0.5],
            [-1.0, 0.0, 2.5, 3.0, -0.75],
            [2.0 / 3.0, 0.0, 0.0, 0.0, 0.0],
            [1e-8, -3e5, 7.0, -2e-3, 0.0],
        ];
        for q5 in samples {
            let q = expand(&q5);
            assert!(q.trace().abs() < TOL, "trace of {:?} is {}", q5, q.trace());
            assert_eq!(q, q.transpose(), "expanded {:?} is not symmetric", q5);
        }
    }

    #[test]
    fn test_expand_component_layout() {
        let q = expand(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(q[(0, 1)], 2.0);
        assert_eq!(q[(0, 2)], 3.0);
        assert_eq!(q[(1, 1)], 4.0);
        assert_eq!(q[(2, 1)], 5.0);
        assert_eq!(q[(2, 2)], -5.0);
    }

    #[test]
    fn test_director_of_diagonal_tensor() {
        let q = expand(&[2.0 / 3.0, 0.0, 0.0, 0.0, 0.0]);
        let (n, s) = director_and_order(&q);
        assert_relative_eq!(s, 2.0 / 3.0, epsilon = TOL);
        assert_relative_eq!(n.x.abs(), 1.0, epsilon = TOL);
        assert_relative_eq!(n.y, 0.0, epsilon = TOL);
        assert_relative_eq!(n.z, 0.0, epsilon = TOL);
    }

    #[test]
    fn test_director_of_tilted_uniaxial_tensor() {
        let axis = Vector3::new(1.0, 2.0, -0.5).normalize();
        let q = uniaxial(0.6, axis);
        let (n, s) = director_and_order(&expand(&q5_of(&q)));
        assert_relative_eq!(s, 0.6, epsilon = 1e-9);
        assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-9);
        // n and -n are the same director
        assert_relative_eq!(n.dot(&axis).abs(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_top_eigenvalue_matches_director_order() {
        let q = expand(&[0.3, -0.1, 0.05, -0.2, 0.15]);
        let (_, s) = director_and_order(&q);
        assert_relative_eq!(top_eigenvalue(&q), s, epsilon = TOL);
    }

    #[test]
    fn test_zero_tensor_is_total() {
        let (n, s) = director_and_order(&Matrix3::zeros());
        assert_eq!(s, 0.0);
        assert!(n.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn test_levi_civita_entries() {
        let eps = levi_civita();
        assert_eq!(eps.rank(), 3);
        assert_eq!(eps.len(), 1);
        let e = eps.site(0);
        assert_eq!(e[5], 1.0); // ε_012
        assert_eq!(e[7], -1.0); // ε_021
        assert_eq!(e[11], -1.0); // ε_102
        assert_eq!(e[15], 1.0); // ε_120
        assert_eq!(e[19], 1.0); // ε_201
        assert_eq!(e.iter().filter(|v| **v != 0.0).count(), 6);
    }
}
