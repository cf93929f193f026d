
//! Nematic liquid-crystal field derivation library
//!
//! This library turns lattice snapshots of the Q-tensor order parameter into
//! derived fields (director, order, elastic energy densities, splay, twist and
//! bend) and samples them on coarse lattices and planar cuts for display.

pub mod config;
pub mod error;
pub mod frame;
pub mod import;
pub mod interfaces;
pub mod lattice;
pub mod sampling;
pub mod tensor;

use std::path::Path;

pub use config::EngineSettings;
pub use error::{Result, ViewError};
pub use frame::{scalar_field_names, Frame, FrameBuilder, FrameSequence};
pub use sampling::{coarsen, slice, CoarseFields, Plane, PlaneSlice, SampledGrid};

/// Load a run with default settings; see [`FrameSequence::load`].
pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<FrameSequence> {
    FrameSequence::load(paths, &EngineSettings::default())
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
