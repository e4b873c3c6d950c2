use std::error::Error;
use std::fmt::{Debug, Display};
use std::{fmt, io};

#[derive(Debug)]
pub enum Ld19Error {
    InvalidFrameLength(usize),
    TimeoutError(),
    SerialError(serialport::Error),
    IoError(io::Error),
}

impl fmt::Display for Ld19Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Ld19Error::InvalidFrameLength(len) => write!(
                f,
                "A measurement frame must be exactly 49 bytes. Actually {} bytes.",
                len
            ),
            Ld19Error::TimeoutError() => write!(f, "Operation timed out"),
            Ld19Error::SerialError(err) => Display::fmt(&err, f),
            Ld19Error::IoError(err) => Display::fmt(&err, f),
        }
    }
}

impl Error for Ld19Error {}

impl From<io::Error> for Ld19Error {
    fn from(err: io::Error) -> Self {
        Ld19Error::IoError(err)
    }
}

impl From<serialport::Error> for Ld19Error {
    fn from(err: serialport::Error) -> Self {
        Ld19Error::SerialError(err)
    }
}
