use std::path::Path;

use log::info;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::EngineSettings;
use crate::error::{Result, ViewError};
use crate::frame::derived_frame::Frame;
use crate::frame::frame_builder::FrameBuilder;
use crate::import::{import_batches, sort_by_timestamp, SiteBatch};
use crate::lattice::LatticeDims;

/// Time-ordered frames of one simulation run; all frames share the lattice
/// dimensions of the first one.
#[derive(Debug, Clone, Default)]
pub struct FrameSequence {
    frames: Vec<Frame>,
}

impl FrameSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Import, order and derive every frame of a run.
    ///
    /// Paths are ordered by their filename timestamps before import, so
    /// `get_frame(0)` is always the earliest timestep. Any file that fails to
    /// import or derive fails the whole load.
    pub fn load<P: AsRef<Path>>(paths: &[P], settings: &EngineSettings) -> Result<Self> {
        if paths.is_empty() {
            return Err(ViewError::EmptyInput);
        }
        let ordered = sort_by_timestamp(paths);
        let batches = import_batches(&ordered)?;
        let sequence = Self::from_batches(&batches, &FrameBuilder::from_settings(settings))?;
        if let Some(dims) = sequence.dims() {
            info!("loaded {} frame(s) on a {} lattice", sequence.len(), dims);
        }
        Ok(sequence)
    }

    /// Derive one frame per batch, keeping the batch order.
    pub fn from_batches(batches: &[SiteBatch], builder: &FrameBuilder) -> Result<Self> {
        #[cfg(feature = "parallel")]
        let frames: Vec<Frame> = batches
            .par_iter()
            .map(|batch| builder.build(batch))
            .collect::<Result<_>>()?;
        #[cfg(not(feature = "parallel"))]
        let frames: Vec<Frame> = batches
            .iter()
            .map(|batch| builder.build(batch))
            .collect::<Result<_>>()?;

        let mut sequence = Self::new();
        for frame in frames {
            sequence.push(frame)?;
        }
        Ok(sequence)
    }

    /// Append a frame; its dimensions must match the frames already held.
    pub fn push(&mut self, frame: Frame) -> Result<()> {
        if let Some(dims) = self.dims() {
            if frame.dims() != dims {
                return Err(ViewError::ShapeMismatch(format!(
                    "'{}' has a {} lattice, earlier frames are {}",
                    frame.source().display(),
                    frame.dims(),
                    dims
                )));
            }
        }
        self.frames.push(frame);
        Ok(())
    }

    pub fn get_frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter()
    }

    pub fn dims(&self) -> Option<LatticeDims> {
        self.frames.first().map(Frame::dims)
    }

    /// Map a possibly out-of-range frame index (e.g. from stepping past either
    /// end of a timeline) onto the nearest valid one.
    pub fn clamp_index(&self, index: isize) -> Option<usize> {
        if self.frames.is_empty() {
            return None;
        }
        Some(index.clamp(0, self.frames.len() as isize - 1) as usize)
    }
}
