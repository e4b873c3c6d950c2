use crate::constants::{FRAME_HEADER, FRAME_SIZE};
use std::collections::VecDeque;

fn find_frame_start(buffer: &VecDeque<u8>) -> Option<usize> {
    buffer.iter().position(|&b| b == FRAME_HEADER)
}

/// Discards leading bytes up to the first header byte and returns how many
/// were dropped. A buffer containing no header byte at all is cleared
/// entirely; none of its bytes can start a frame.
pub(crate) fn discard_until_header(buffer: &mut VecDeque<u8>) -> usize {
    match find_frame_start(buffer) {
        Some(start) => {
            buffer.drain(..start);
            start
        }
        None => {
            let n = buffer.len();
            buffer.clear();
            n
        }
    }
}

/// Takes one complete frame off the front of the buffer. The buffer must
/// already be aligned on a header byte; returns None until all 49 bytes of
/// the candidate are available.
pub(crate) fn take_frame(buffer: &mut VecDeque<u8>) -> Option<Vec<u8>> {
    if buffer.front() != Some(&FRAME_HEADER) || buffer.len() < FRAME_SIZE {
        return None;
    }
    Some(buffer.drain(..FRAME_SIZE).collect())
}
