use std::sync::mpsc;

mod constants;
pub mod crc;
mod driver_threads;
mod error;
pub mod frame;
mod numeric;
mod packet;
mod scan;
mod serial;
mod time;

use crate::constants::{BAUD_RATE, DEFAULT_MIN_ROTATION_POINTS};
use crate::driver_threads::{parse_frames, read_device_signal};
use crate::serial::flush;
use crossbeam_channel::bounded;
use ld19_data::Rotation;

pub use crate::driver_threads::DriverThreads;
pub use crate::error::Ld19Error;
pub use crate::frame::Frame;
pub use crate::scan::RotationAssembler;

/// Rotation assembly and CRC policy for a driver instance.
#[derive(Clone, Debug)]
pub struct DriverOptions {
    /// Minimum number of accumulated points before a decreasing start angle
    /// is treated as a completed rotation rather than a spurious wrap.
    pub min_rotation_points: usize,
    /// Drop frames that fail CRC validation instead of feeding their points
    /// into the rotation. The sensor reference behavior keeps them, so the
    /// default is false; `Rotation::crc_ok` reports whether a kept frame was
    /// corrupted.
    pub discard_invalid_frames: bool,
}

impl Default for DriverOptions {
    fn default() -> Self {
        DriverOptions {
            min_rotation_points: DEFAULT_MIN_ROTATION_POINTS,
            discard_invalid_frames: false,
        }
    }
}

/// Function to launch the LD19 driver.
/// The sensor starts streaming measurement frames as soon as it is powered;
/// there is no command channel.
/// # Arguments
///
/// * `port_name` - Serial port name such as `/dev/ttyUSB0`.
/// * `options` - Rotation assembly and CRC policy.
pub fn run_driver(
    port_name: &str,
    options: DriverOptions,
) -> Result<(DriverThreads, mpsc::Receiver<Rotation>), Ld19Error> {
    let mut port = serialport::new(port_name, BAUD_RATE)
        .timeout(std::time::Duration::from_millis(10))
        .open()?;

    if !cfg!(test) {
        // In testing, disable flushing to receive dummy signals
        flush(&mut port)?;
    }

    let (reader_terminator_tx, reader_terminator_rx) = bounded(10);
    let (parser_terminator_tx, parser_terminator_rx) = bounded(10);
    let (raw_data_tx, raw_data_rx) = mpsc::sync_channel::<Vec<u8>>(200);

    let reader_thread = Some(std::thread::spawn(move || {
        read_device_signal(&mut port, raw_data_tx, reader_terminator_rx);
    }));

    let (rotation_tx, rotation_rx) = mpsc::sync_channel::<Rotation>(10);
    let parser_thread = Some(std::thread::spawn(move || {
        parse_frames(raw_data_rx, parser_terminator_rx, rotation_tx, options);
    }));

    let driver_threads = DriverThreads {
        reader_thread,
        parser_thread,
        reader_terminator_tx,
        parser_terminator_tx,
    };

    Ok((driver_threads, rotation_rx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::POINTS_PER_FRAME;
    use crate::crc::crc8;
    use crate::time::sleep_ms;
    use serialport::{SerialPort, TTYPort};
    use std::io::Write;

    fn make_frame(start_centideg: u16, end_centideg: u16) -> Vec<u8> {
        let mut raw = vec![0x54, 0x2C];
        raw.extend_from_slice(&2300u16.to_le_bytes());
        raw.extend_from_slice(&start_centideg.to_le_bytes());
        for i in 0..POINTS_PER_FRAME as u16 {
            raw.extend_from_slice(&(1000 + i).to_le_bytes());
            raw.push(200);
        }
        raw.extend_from_slice(&end_centideg.to_le_bytes());
        raw.extend_from_slice(&1234u16.to_le_bytes());
        raw.push(0x00);
        raw.push(crc8(&raw));
        raw.push(0x00);
        raw
    }

    fn test_options() -> DriverOptions {
        DriverOptions {
            min_rotation_points: 30,
            discard_invalid_frames: false,
        }
    }

    #[test]
    fn test_run_driver_assembles_rotation() {
        let (mut master, slave) = TTYPort::pair().expect("Unable to create ptty pair");

        let name = slave.name().unwrap();
        let (threads, rotation_rx) = run_driver(&name, test_options()).unwrap();

        // two junk bytes force a resync before the first frame
        let mut stream = vec![0x00, 0x00];
        for i in 0..6u16 {
            // 0, 30, 60, ... degrees, each frame spanning 20 degrees
            stream.extend(make_frame(i * 3000, i * 3000 + 2000));
        }
        // start angle drops back towards 0: rotation boundary
        stream.extend(make_frame(100, 2100));
        master.write(&stream).unwrap();

        let rotation = rotation_rx.recv().unwrap();
        assert_eq!(rotation.len(), 6 * POINTS_PER_FRAME);
        assert!(rotation.crc_ok);

        // first frame interpolates 0 -> 20 degrees
        assert_eq!(rotation.points[0].angle_deg, 0.);
        assert!((rotation.points[11].angle_deg - 20.).abs() < 1e-9);
        // last frame interpolates 150 -> 170 degrees
        assert!((rotation.points.last().unwrap().angle_deg - 170.).abs() < 1e-9);

        for point in &rotation.points {
            assert!(point.distance_mm >= 1000 && point.distance_mm < 1012);
            assert_eq!(point.intensity, 200);
        }

        drop(threads);
    }

    #[test]
    fn test_run_driver_keeps_invalid_frames_by_default() {
        let (mut master, slave) = TTYPort::pair().expect("Unable to create ptty pair");

        let name = slave.name().unwrap();
        let (threads, rotation_rx) = run_driver(&name, test_options()).unwrap();

        let mut stream = Vec::new();
        for i in 0..6u16 {
            let mut frame = make_frame(i * 3000, i * 3000 + 2000);
            if i == 2 {
                // corrupt one distance byte after the CRC was computed
                frame[7] ^= 0xFF;
            }
            stream.extend(frame);
        }
        stream.extend(make_frame(100, 2100));
        master.write(&stream).unwrap();

        let rotation = rotation_rx.recv().unwrap();
        // the corrupted frame still contributes points, flagged on the batch
        assert_eq!(rotation.len(), 6 * POINTS_PER_FRAME);
        assert!(!rotation.crc_ok);

        drop(threads);
    }

    #[test]
    fn test_run_driver_discards_invalid_frames_when_asked() {
        let (mut master, slave) = TTYPort::pair().expect("Unable to create ptty pair");

        let name = slave.name().unwrap();
        let options = DriverOptions {
            discard_invalid_frames: true,
            ..test_options()
        };
        let (threads, rotation_rx) = run_driver(&name, options).unwrap();

        let mut stream = Vec::new();
        for i in 0..6u16 {
            let mut frame = make_frame(i * 3000, i * 3000 + 2000);
            if i == 2 {
                frame[7] ^= 0xFF;
            }
            stream.extend(frame);
        }
        stream.extend(make_frame(100, 2100));
        master.write(&stream).unwrap();

        let rotation = rotation_rx.recv().unwrap();
        assert_eq!(rotation.len(), 5 * POINTS_PER_FRAME);
        assert!(rotation.crc_ok);

        drop(threads);
    }

    #[test]
    fn test_run_driver_survives_fragmented_writes() {
        let (mut master, slave) = TTYPort::pair().expect("Unable to create ptty pair");

        let name = slave.name().unwrap();
        let (threads, rotation_rx) = run_driver(&name, test_options()).unwrap();

        let mut stream = Vec::new();
        for i in 0..6u16 {
            stream.extend(make_frame(i * 3000, i * 3000 + 2000));
        }
        stream.extend(make_frame(100, 2100));

        // dribble the stream out in chunks that never align with frames
        for chunk in stream.chunks(17) {
            master.write(chunk).unwrap();
            sleep_ms(5);
        }

        let rotation = rotation_rx.recv().unwrap();
        assert_eq!(rotation.len(), 6 * POINTS_PER_FRAME);

        drop(threads);
    }
}
