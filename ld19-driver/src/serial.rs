use crate::constants::N_READ_TRIALS;
use crate::error::Ld19Error;
use crate::time::sleep_ms;
use serialport::SerialPort;
use std::io::Read;

pub(crate) fn get_n_read(port: &mut Box<dyn SerialPort>) -> Result<usize, Ld19Error> {
    let n_u32: u32 = port.bytes_to_read()?;
    Ok(n_u32.try_into().unwrap_or(0))
}

/// Drains whatever stale bytes the sensor already streamed into the buffer,
/// so parsing starts close to a frame boundary instead of mid-backlog.
pub(crate) fn flush(port: &mut Box<dyn SerialPort>) -> Result<(), Ld19Error> {
    let n_read: usize = get_n_read(port).unwrap_or(0);
    if n_read == 0 {
        return Ok(());
    }
    let mut stale: Vec<u8> = vec![0; n_read];
    port.read(stale.as_mut_slice())?;
    Ok(())
}

pub(crate) fn read(
    port: &mut Box<dyn SerialPort>,
    data_size: usize,
) -> Result<Vec<u8>, Ld19Error> {
    assert!(data_size > 0);
    for _ in 0..N_READ_TRIALS {
        let n_read: usize = get_n_read(port)?;

        if n_read < data_size {
            sleep_ms(10);
            continue;
        }

        let mut data: Vec<u8> = vec![0; data_size];
        if let Err(e) = port.read(data.as_mut_slice()) {
            return Err(Ld19Error::IoError(e));
        }
        return Ok(data);
    }
    Err(Ld19Error::TimeoutError())
}
