//! Error type returned by all fallible operations of this crate.

use std::borrow::Cow;
use std::collections::TryReserveError;
use std::fmt;
use std::io::ErrorKind;

/// A result that may fail with a qoi [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// An operation that returns nothing but may fail.
pub type UnitResult = Result<()>;

pub use std::io::Error as IoError;
pub use std::io::Result as IoResult;

/// All possible failures of encoding or decoding a qoi stream.
#[derive(Debug)]
pub enum Error {
    /// The caller provided an image descriptor or pixel buffer
    /// that violates the invariants of the format.
    InvalidArgument(Cow<'static, str>),

    /// The first fourteen bytes of the stream do not form a valid qoi header.
    InvalidHeader(Cow<'static, str>),

    /// The encoded stream ended before all pixels were reconstructed.
    Truncated,

    /// An output buffer could not be allocated.
    OutOfMemory,

    /// The underlying byte stream could not be read or written.
    Io(IoError),
}

impl Error {
    pub(crate) fn invalid_argument(message: impl Into<Cow<'static, str>>) -> Self {
        Error::InvalidArgument(message.into())
    }

    pub(crate) fn invalid_header(message: impl Into<Cow<'static, str>>) -> Self {
        Error::InvalidHeader(message.into())
    }
}

/// Enable using the `?` operator on `io::Result`.
impl From<IoError> for Error {
    fn from(error: IoError) -> Self {
        if error.kind() == ErrorKind::UnexpectedEof {
            Error::Truncated
        }
        else {
            Error::Io(error)
        }
    }
}

/// Enable using the `?` operator on guarded allocations.
impl From<TryReserveError> for Error {
    fn from(_: TryReserveError) -> Self {
        Error::OutOfMemory
    }
}

impl fmt::Display for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(message) => write!(formatter, "invalid argument: {}", message),
            Error::InvalidHeader(message) => write!(formatter, "invalid qoi header: {}", message),
            Error::Truncated => write!(formatter, "the qoi stream ended unexpectedly"),
            Error::OutOfMemory => write!(formatter, "a pixel buffer was too large to allocate"),
            Error::Io(error) => write!(formatter, "i/o error: {}", error),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(error) => Some(error),
            _ => None,
        }
    }
}
