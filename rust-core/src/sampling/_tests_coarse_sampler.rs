#[cfg(test)]
mod _tests_coarse_sampler {
    use super::super::coarse_sampler::{coarsen, SampledGrid};
    use crate::error::ViewError;
    use crate::frame::{field_names as names, Frame, FrameBuilder};
    use crate::import::{SiteBatch, SiteRecord};
    use crate::interfaces::Schema;
    use crate::lattice::LatticeDims;
    use std::path::PathBuf;

    /// Frame whose `order` field holds the site index.
    fn indexed_frame(lx: usize, ly: usize, lz: usize) -> Frame {
        let dims = LatticeDims::new(lx, ly, lz).unwrap();
        let records = (0..dims.volume())
            .map(|index| SiteRecord {
                coords: dims.coords(index),
                q5: [0.2, 0.0, 0.0, -0.1, 0.0],
                site_type: 0,
                order: index as f64,
            })
            .collect();
        let batch = SiteBatch {
            dims,
            records,
            schema: Schema::Canonical,
            source: PathBuf::from("indexed_0.dat"),
            timestamp: Some(0),
        };
        FrameBuilder::default().build(&batch).unwrap()
    }

    #[test]
    fn test_coarse_dims_for_every_stride() {
        let frame = indexed_frame(5, 3, 7);
        for stride in 1..=7 {
            let coarse = coarsen(&frame, stride).unwrap();
            let dims = coarse.dims();
            assert_eq!(dims.as_array(), [5 / stride, 3 / stride, 7 / stride], "stride {}", stride);
            assert_eq!(coarse.spacing(), stride);
            assert_eq!(coarse.stride(), stride);
            assert_eq!(coarse.fields().sites(), Some(dims.volume()));
            assert_eq!(coarse.fields().len(), frame.fields().len());
        }
    }

    #[test]
    fn test_coarse_points_take_full_site_values() {
        let frame = indexed_frame(6, 4, 5);
        let full = frame.dims();
        let coarse = coarsen(&frame, 2).unwrap();
        let dims = coarse.dims();
        assert_eq!(dims.as_array(), [3, 2, 2]);

        let order = coarse.field(names::ORDER).unwrap();
        let director = coarse.field(names::DIRECTOR).unwrap();
        for site in 0..dims.volume() {
            let [a, b, c] = dims.coords(site);
            let source = full.index(2 * a, 2 * b, 2 * c);
            assert_eq!(order.scalar(site), source as f64);
            assert_eq!(director.vector(site), frame.director(source).unwrap());
        }
    }

    #[test]
    fn test_stride_one_is_the_full_frame() {
        let frame = indexed_frame(3, 3, 3);
        let coarse = coarsen(&frame, 1).unwrap();
        assert_eq!(coarse.fields(), frame.fields());
        assert_eq!(SampledGrid::spacing(&frame), 1);
    }

    #[test]
    fn test_zero_stride_is_rejected() {
        let frame = indexed_frame(2, 2, 2);
        assert!(matches!(coarsen(&frame, 0), Err(ViewError::InvalidStride(0))));
    }

    #[test]
    fn test_oversized_stride_empties_the_grid() {
        let frame = indexed_frame(4, 4, 2);
        let coarse = coarsen(&frame, 3).unwrap();
        assert_eq!(coarse.dims().as_array(), [1, 1, 0]);
        assert_eq!(coarse.fields().sites(), Some(0));
    }
}
