use std::io;

use thiserror::Error;

use crate::encoding::EncodeError;

/// Either an [`io::Error`] from the destination or an [`EncodeError`] from the encoder.
#[derive(Error, Debug)]
pub enum Error {
    /// The destination failed to accept or flush bytes.
    #[error("IO error during writing: {}", .0)]
    Io(#[from] io::Error),
    /// The encoder could not represent some of the written text.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Io(err) => err,
            Error::Encode(err) => io::Error::new(io::ErrorKind::InvalidData, err),
        }
    }
}
