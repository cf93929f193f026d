#[cfg(test)]
mod _tests_periodic_difference {
    use super::super::lattice_dims::LatticeDims;
    use super::super::periodic_difference::{
        diff, diff_director, director_gradient, gradient, nematic_sign,
    };
    use crate::error::ViewError;
    use crate::interfaces::Axis;
    use crate::tensor::TensorField;
    use approx::assert_relative_eq;
    use nalgebra::{Matrix3, Vector3};
    use std::f64::consts::PI;

    // Director twisting about z with pitch 2π/q per unit length along z
    fn cholesteric(dims: LatticeDims, q: f64) -> Vec<Vector3<f64>> {
        (0..dims.volume())
            .map(|site| {
                let z = dims.coords(site)[2] as f64;
                Vector3::new((q * z).cos(), (q * z).sin(), 0.0)
            })
            .collect()
    }

    #[test]
    fn test_constant_field_has_zero_derivative() {
        let dims = LatticeDims::new(4, 3, 5).unwrap();
        let q = Matrix3::new(0.2, 0.1, -0.3, 0.1, -0.5, 0.7, -0.3, 0.7, 0.3);
        let field = TensorField::from_matrices(&vec![q; dims.volume()]);
        for axis in Axis::ALL {
            let d = diff(&field, dims, axis).unwrap();
            assert!(d.as_slice().iter().all(|&v| v == 0.0));
        }
        let grad = gradient(&field, dims).unwrap();
        assert_eq!(grad.rank(), 3);
        assert!(grad.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_ramp_wraps_at_the_edges() {
        let dims = LatticeDims::new(4, 1, 1).unwrap();
        let ramp = TensorField::from_scalars(vec![0.0, 1.0, 2.0, 3.0]);
        let d = diff(&ramp, dims, Axis::X).unwrap();
        assert_eq!(d.as_slice(), &[-2.0, 2.0, 2.0, -2.0]);
        // nothing varies along y or z
        assert!(diff(&ramp, dims, Axis::Y).unwrap().as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_gradient_puts_derivative_index_first() {
        let dims = LatticeDims::new(3, 3, 3).unwrap();
        let values = (0..dims.volume())
            .map(|site| {
                let [x, y, z] = dims.coords(site);
                (x + 10 * y + 100 * z) as f64
            })
            .collect();
        let grad = gradient(&TensorField::from_scalars(values), dims).unwrap();
        assert_eq!(grad.rank(), 1);
        // interior site (1,1,1): f(x+1) - f(x-1) = 2, 20, 200
        let centre = dims.index(1, 1, 1);
        assert_eq!(grad.vector(centre), Vector3::new(2.0, 20.0, 200.0));
    }

    #[test]
    fn test_diff_rejects_wrong_site_count() {
        let dims = LatticeDims::new(2, 2, 2).unwrap();
        let field = TensorField::from_scalars(vec![1.0; 7]);
        assert!(matches!(diff(&field, dims, Axis::X), Err(ViewError::ShapeMismatch(_))));
    }

    #[test]
    fn test_nematic_sign_of_zero() {
        assert_eq!(nematic_sign(0.0), 0.0);
        assert_eq!(nematic_sign(-0.3), -1.0);
        assert_eq!(nematic_sign(2.0), 1.0);
    }

    #[test]
    fn test_sign_corrected_neighbors_are_aligned() {
        let dims = LatticeDims::new(5, 4, 6).unwrap();
        // smooth field with eigenvector signs scrambled site by site
        let mut directors = cholesteric(dims, PI / 7.0);
        for (site, n) in directors.iter_mut().enumerate() {
            if (site * 7 + 3) % 5 < 2 {
                *n = -*n;
            }
        }
        let field = TensorField::from_vectors(&directors);
        for axis in Axis::ALL {
            let d = diff_director(&field, dims, axis).unwrap();
            for site in 0..dims.volume() {
                let ahead = field.vector(dims.neighbor(site, axis, true));
                // the behind neighbour as it entered the subtraction
                let corrected_behind = ahead - d.vector(site);
                assert!(
                    ahead.dot(&corrected_behind) >= 0.0,
                    "site {} axis {:?}: corrected neighbours anti-aligned",
                    site,
                    axis
                );
            }
        }
    }

    #[test]
    fn test_sign_flips_do_not_create_spurious_derivatives() {
        let dims = LatticeDims::new(2, 2, 8).unwrap();
        let smooth = cholesteric(dims, PI / 8.0);
        let flipped: Vec<_> = smooth
            .iter()
            .enumerate()
            .map(|(site, n)| if dims.coords(site)[2] % 2 == 1 { -n } else { *n })
            .collect();

        let reference = director_gradient(&TensorField::from_vectors(&smooth), dims).unwrap();
        let scrambled = director_gradient(&TensorField::from_vectors(&flipped), dims).unwrap();
        for (a, b) in reference.as_slice().iter().zip(scrambled.as_slice()) {
            assert_relative_eq!(a.abs(), b.abs(), epsilon = 1e-12);
        }

        // ∂_z n for the helix: n(z+1) - n(z-1) = 2 sin(q) (-sin qz, cos qz, 0)
        let q = PI / 8.0;
        let site = dims.index(0, 0, 3);
        let m = reference.matrix(site);
        let z = 3.0;
        assert_relative_eq!(m[(2, 0)], -2.0 * q.sin() * (q * z).sin(), epsilon = 1e-12);
        assert_relative_eq!(m[(2, 1)], 2.0 * q.sin() * (q * z).cos(), epsilon = 1e-12);
        assert_eq!(m[(0, 0)], 0.0);
        assert_eq!(m[(1, 2)], 0.0);
    }

    #[test]
    fn test_orthogonal_neighbors_drop_the_behind_term() {
        let dims = LatticeDims::new(3, 1, 1).unwrap();
        let field = TensorField::from_vectors(&[Vector3::x(), Vector3::y(), Vector3::z()]);
        let d = diff_director(&field, dims, Axis::X).unwrap();
        // site 0: ahead = y, behind = z, y·z = 0
        assert_eq!(d.vector(0), Vector3::y());
    }
}
