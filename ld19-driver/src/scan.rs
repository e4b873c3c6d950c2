use crate::frame::Frame;
use ld19_data::Rotation;

/// Accumulates decoded frames and cuts the point stream into full rotations.
///
/// A completed revolution is recognized by the start angle decreasing
/// (wrapping past 360°), never by counting frames: frame timing and point
/// density are not uniform enough for a count. `min_points` guards against a
/// spurious single-frame wrap emitting a near-empty rotation.
pub struct RotationAssembler {
    rotation: Rotation,
    last_start_angle: f64,
    min_points: usize,
}

impl RotationAssembler {
    pub fn new(min_points: usize) -> RotationAssembler {
        RotationAssembler {
            rotation: Rotation::new(),
            last_start_angle: 0.,
            min_points,
        }
    }

    /// Appends one decoded and interpolated frame.
    ///
    /// Returns the finished rotation when this frame starts a new revolution;
    /// the frame's own 12 points always seed the in-progress rotation, and
    /// the last start angle is updated whether or not a boundary fired.
    pub fn push_frame(&mut self, frame: &Frame) -> Option<Rotation> {
        let completed = if frame.start_angle_deg < self.last_start_angle
            && self.rotation.len() > self.min_points
        {
            Some(std::mem::take(&mut self.rotation))
        } else {
            None
        };

        self.rotation.points.extend_from_slice(&frame.points);
        if !frame.valid {
            self.rotation.crc_ok = false;
        }
        self.last_start_angle = frame.start_angle_deg;

        completed
    }

    /// Hands out the in-progress rotation and resets the assembler, for
    /// callers that want to flush the trailing partial revolution at
    /// shutdown instead of dropping it.
    pub fn take_rotation(&mut self) -> Rotation {
        self.last_start_angle = 0.;
        std::mem::take(&mut self.rotation)
    }
}
