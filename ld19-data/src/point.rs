#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One range sample decoded from a measurement frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    /// Distance to an object in mm.
    pub distance_mm: u16,
    /// Return strength of the laser pulse.
    pub intensity: u8,
    /// Absolute scan angle in degrees, `[0, 360)`.
    /// Zero until the frame's angle interpolation pass has run.
    pub angle_deg: f64,
}
