// Frame module: derived per-site fields of one timestep and the time-ordered run
// This module turns imported site batches into frames carrying every derived field

// ======================== MODULE DECLARATIONS ========================
pub mod derived_frame;
pub mod field_set;
pub mod frame_builder;
pub mod frame_sequence;


// ======================== FIELDS ========================
pub use field_set::FieldSet; // struct - named per-site fields in insertion order
// FieldSet impl methods:
//   insert(&mut self, name, field) -> Result<()>      - site count must match, same name replaces in place
//   get(&self, name) -> Option<&TensorField>
//   scalar_names(&self) -> Vec<&str>                  - rank-0 fields only
//   gather(&self, sites: &[usize]) -> FieldSet        - every field restricted to `sites`

// ======================== FRAMES ========================
pub use derived_frame::{
    field_names,        // mod - names of the derived fields (order, director, energy_L1, ...)
    scalar_field_names, // fn(frame: &Frame) -> Vec<&str>
    FieldRange,         // struct - min/max of a scalar field
    Frame,              // struct - dims, fields, boundary count, schema, source, timestamp
};
// Frame impl methods:
//   field(&self, name) -> Option<&TensorField>
//   scalar_range(&self, name) -> Option<FieldRange>
//   defect_sites(&self, threshold) -> Vec<usize>      - nematic sites with order below threshold

pub use frame_builder::FrameBuilder; // struct - derives a Frame from a SiteBatch (holds q0)

// ======================== SEQUENCES ========================
pub use frame_sequence::FrameSequence; // struct - time-ordered frames of equal dims
// FrameSequence impl methods:
//   load(paths, &EngineSettings) -> Result<Self>       - sort, import, derive
//   get_frame(&self, index) -> Option<&Frame>
//   clamp_index(&self, index: isize) -> Option<usize>  - nearest valid frame index
