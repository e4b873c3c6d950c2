use crate::point::Point;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Struct to hold one full 360° revolution of lidar points.
#[derive(Clone, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rotation {
    /// Points in scan order, accumulated across consecutive frames.
    pub points: Vec<Point>,
    /// False if any frame that contributed points failed CRC validation.
    pub crc_ok: bool,
}

impl Rotation {
    pub fn new() -> Rotation {
        Rotation {
            points: Vec::new(),
            crc_ok: true,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::new()
    }
}
