use crate::frame::Frame;
use crate::numeric::to_string;
use crate::packet::{discard_until_header, take_frame};
use crate::scan::RotationAssembler;
use crate::serial::{get_n_read, read};
use crate::time::sleep_ms;
use crate::DriverOptions;
use crossbeam_channel::{Receiver, Sender};
use ld19_data::Rotation;
use serialport::SerialPort;
use std::collections::VecDeque;
use std::sync::mpsc;
use std::thread::JoinHandle;

/// Struct that contains driver threads.
pub struct DriverThreads {
    pub(crate) reader_terminator_tx: Sender<bool>,
    pub(crate) parser_terminator_tx: Sender<bool>,
    pub(crate) reader_thread: Option<JoinHandle<()>>,
    pub(crate) parser_thread: Option<JoinHandle<()>>,
}

pub(crate) fn read_device_signal(
    port: &mut Box<dyn SerialPort>,
    raw_data_tx: mpsc::SyncSender<Vec<u8>>,
    reader_terminator_rx: Receiver<bool>,
) {
    loop {
        if do_terminate(&reader_terminator_rx) {
            return;
        }

        let n_read: usize = get_n_read(port).unwrap_or(0);
        if n_read == 0 {
            continue;
        }

        if let Ok(signal) = read(port, n_read) {
            if let Err(e) = raw_data_tx.send(signal) {
                eprintln!("{e}");
            }
        }
    }
}

pub(crate) fn parse_frames(
    raw_data_rx: mpsc::Receiver<Vec<u8>>,
    parser_terminator_rx: Receiver<bool>,
    rotation_tx: mpsc::SyncSender<Rotation>,
    options: DriverOptions,
) {
    let mut buffer = VecDeque::<u8>::new();
    let mut assembler = RotationAssembler::new(options.min_rotation_points);
    while !do_terminate(&parser_terminator_rx) {
        match raw_data_rx.try_recv() {
            Ok(data) => buffer.extend(data),
            Err(_) => sleep_ms(10),
        }

        // The sensor streams continuously; drain every complete frame the
        // buffer holds before waiting for more bytes.
        loop {
            let discarded = discard_until_header(&mut buffer);
            if discarded > 0 {
                log::trace!("discarded {discarded} bytes while scanning for frame header");
            }
            let raw = match take_frame(&mut buffer) {
                Some(raw) => raw,
                None => break, // insufficient buffer size to extract a frame
            };

            let mut frame = match Frame::decode(&raw) {
                Ok(frame) => frame,
                Err(e) => {
                    log::warn!("{e}");
                    continue;
                }
            };

            log::debug!(
                "frame: speed = {:.2} rpm, start = {:.2} deg, end = {:.2} deg, timestamp = {} ms",
                frame.speed_rpm(),
                frame.start_angle_deg,
                frame.end_angle_deg,
                frame.timestamp_ms
            );

            if !frame.valid {
                log::warn!("CRC mismatch on frame: {}", to_string(&raw));
                if options.discard_invalid_frames {
                    continue;
                }
            }

            frame.interpolate_angles();
            if let Some(rotation) = assembler.push_frame(&frame) {
                if rotation_tx.send(rotation).is_err() {
                    // Consumer dropped the receiver; nothing left to feed.
                    return;
                }
            }
        }
    }
}

pub(crate) fn do_terminate(terminator_rx: &Receiver<bool>) -> bool {
    terminator_rx.try_recv().unwrap_or(false)
}

/// Function to join driver threads.
/// This function is automatically called when `driver_threads` is dropped.
pub fn join(driver_threads: &mut DriverThreads) {
    // A thread that already exited has dropped its terminator receiver.
    let _ = driver_threads.reader_terminator_tx.send(true);
    let _ = driver_threads.parser_terminator_tx.send(true);

    if driver_threads.reader_thread.is_some() {
        let thread = driver_threads.reader_thread.take().unwrap();
        thread.join().unwrap();
    }
    if driver_threads.parser_thread.is_some() {
        let thread = driver_threads.parser_thread.take().unwrap();
        thread.join().unwrap();
    }
}

impl Drop for DriverThreads {
    fn drop(&mut self) {
        join(self);
    }
}
