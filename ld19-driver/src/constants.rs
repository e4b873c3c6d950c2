pub(crate) const FRAME_HEADER: u8 = 0x54;
pub(crate) const FRAME_SIZE: usize = 49;
pub(crate) const POINTS_PER_FRAME: usize = 12;
// Offset of the trailing CRC byte; the final byte of the frame is unused.
pub(crate) const CRC_OFFSET: usize = FRAME_SIZE - 2;
// The LD19 streams continuously at a fixed baud rate and accepts no commands.
pub(crate) const BAUD_RATE: u32 = 230_400;
pub(crate) const N_READ_TRIALS: usize = 3;
// Empirical guard against emitting a rotation from a spurious single-frame
// angle wrap. Tunable through DriverOptions.
pub(crate) const DEFAULT_MIN_ROTATION_POINTS: usize = 3000;
