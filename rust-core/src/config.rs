// Constants and engine settings

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ViewError};

// Tolerances
pub const PLANE_NORMAL_TOLERANCE: f64 = 1e-12; // Shortest normal accepted for a slicing plane

// Defaults
pub const DEFAULT_DIRECTOR_RESOLUTION: usize = 2; // Glyph stride of the coarse lattice
pub const DEFAULT_DEFECT_ORDER: f64 = 0.3; // Order below which a nematic site counts as defect core
pub const DEFAULT_Q0: f64 = 0.0; // Chirality offset in K2 = (twist - q0)^2

// Filename conventions of the legacy two-file schema
pub const LEGACY_SITE_TAG: &str = "Qtensor";
pub const LEGACY_TENSOR_TAG: &str = "Qmatrix";

/// User-adjustable parameters of the derivation engine.
///
/// Every field has a default, so a settings file only needs the keys it
/// changes:
///
/// ```json
/// { "q0": 0.05, "director_resolution": 3 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Chirality offset subtracted from the twist before squaring
    pub q0: f64,
    /// Stride of the coarse lattice used for director glyphs
    pub director_resolution: usize,
    /// Order threshold used when locating defect sites
    pub defect_order: f64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            q0: DEFAULT_Q0,
            director_resolution: DEFAULT_DIRECTOR_RESOLUTION,
            defect_order: DEFAULT_DEFECT_ORDER,
        }
    }
}

impl EngineSettings {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let settings: EngineSettings = serde_json::from_str(text)?;
        if settings.director_resolution == 0 {
            return Err(ViewError::InvalidStride(0));
        }
        Ok(settings)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| ViewError::io(path, e))?;
        Self::from_json_str(&text)
    }
}
