#[cfg(test)]
mod _tests_lattice_dims {
    use super::super::lattice_dims::LatticeDims;
    use crate::interfaces::Axis;

    #[test]
    fn test_index_coords_round_trip() {
        let dims = LatticeDims::new(3, 4, 5).unwrap();
        assert_eq!(dims.volume(), 60);
        for index in 0..dims.volume() {
            let [x, y, z] = dims.coords(index);
            assert!(x < 3 && y < 4 && z < 5);
            assert_eq!(dims.index(x, y, z), index);
        }
        // x runs fastest
        assert_eq!(dims.coords(1), [1, 0, 0]);
        assert_eq!(dims.coords(3), [0, 1, 0]);
        assert_eq!(dims.coords(12), [0, 0, 1]);
    }

    #[test]
    fn test_neighbors_wrap_periodically() {
        let dims = LatticeDims::new(4, 3, 2).unwrap();
        let origin = dims.index(0, 0, 0);
        assert_eq!(dims.coords(dims.neighbor(origin, Axis::X, false)), [3, 0, 0]);
        assert_eq!(dims.coords(dims.neighbor(origin, Axis::Y, false)), [0, 2, 0]);
        assert_eq!(dims.coords(dims.neighbor(origin, Axis::Z, false)), [0, 0, 1]);

        let corner = dims.index(3, 2, 1);
        assert_eq!(dims.neighbor(corner, Axis::X, true), dims.index(0, 2, 1));
        assert_eq!(dims.neighbor(corner, Axis::Y, true), dims.index(3, 0, 1));
        assert_eq!(dims.neighbor(corner, Axis::Z, true), dims.index(3, 2, 0));
    }

    #[test]
    fn test_single_site_axis_is_its_own_neighbor() {
        let dims = LatticeDims::new(1, 2, 2).unwrap();
        let site = dims.index(0, 1, 1);
        assert_eq!(dims.neighbor(site, Axis::X, true), site);
        assert_eq!(dims.neighbor(site, Axis::X, false), site);
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(LatticeDims::new(0, 4, 4).is_err());
        assert!(LatticeDims::new(4, 4, 0).is_err());
    }

    #[test]
    fn test_coarsened_floors_each_axis() {
        let dims = LatticeDims::new(10, 7, 4).unwrap();
        assert_eq!(dims.coarsened(1), dims);
        assert_eq!(dims.coarsened(3).as_array(), [3, 2, 1]);
        assert_eq!(dims.coarsened(5).as_array(), [2, 1, 0]);
        assert_eq!(dims.to_string(), "10x7x4");
        assert_eq!(dims.extent(Axis::Y), 7);
    }
}
