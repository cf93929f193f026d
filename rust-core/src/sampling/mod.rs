// Sampling module: sparse resampling of frames and planar cuts through them
// This module serves the reduced glyph lattice and the plane slices handed to a renderer

// ======================== MODULE DECLARATIONS ========================
pub mod coarse_sampler;
pub mod plane_slice;

// Test modules
mod _tests_coarse_sampler;

// ======================== COARSENING ========================
pub use coarse_sampler::{
    coarsen,      // fn(frame: &Frame, stride: usize) -> Result<CoarseFields> - floor(L / stride) lattice
    CoarseFields, // struct - coarse dims, stride, sampled fields
    SampledGrid,  // trait - dims / spacing / fields of a sliceable grid (Frame, CoarseFields)
};

// ======================== PLANE SLICING ========================
pub use plane_slice::{
    slice,       // fn(grid: &G, plane: &Plane, stride) -> Result<PlaneSlice> - points within half a spacing of the plane
    snap_origin, // fn(origin, stride) -> Vector3<f64> - stride * trunc(origin / stride)
    Plane,       // struct - unit normal + origin
    PlaneSlice,  // struct - snapped origin, positions, site indices, gathered fields
};
// Plane impl methods:
//   new(normal, origin) -> Result<Self>              - zero normal -> InvalidPlane
//   from_angles(theta, phi, origin) / angles()       - spherical angles of the normal
//   rotated(dtheta, dphi) / centered(dims, shift)    - plane widget moves
//   default_for(dims) -> Self                        - x normal through the box centre
