// Definitions that are used throughout all modules

use serde::{Deserialize, Serialize};

// Lattice axis, doubles as the derivative index i in ∂_i
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

// On-disk layout a frame was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Schema {
    /// One tab separated file per frame, 10 columns per site
    Canonical,
    /// Paired `Qtensor`/`Qmatrix` files, dimensions encoded in the filename
    Legacy,
}
