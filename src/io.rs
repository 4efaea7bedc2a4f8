//! Low-level byte input and output.
//! The qoi wire format stores all multi-byte values in big endian order.

pub use ::std::io::{Read, Write};

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use lebe::prelude::*;

use crate::error::Result;
use crate::error::UnitResult;

/// Extension trait for the primitive values of the wire format.
pub trait Data: Sized + Default + Clone {
    /// Read this value from the stream, most significant byte first.
    fn read_be(read: &mut impl Read) -> Result<Self>;

    /// Write this value to the stream, most significant byte first.
    fn write_be(self, write: &mut impl Write) -> UnitResult;

    /// Fill the slice with bytes from the stream, without endianness conversion.
    fn read_slice_ne(read: &mut impl Read, slice: &mut [Self]) -> UnitResult;

    /// Write the whole slice to the stream, without endianness conversion.
    fn write_slice_ne(write: &mut impl Write, slice: &[Self]) -> UnitResult;
}

macro_rules! implement_data_for_primitive {
    ($kind: ident) => {
        impl Data for $kind {
            #[inline]
            fn read_be(read: &mut impl Read) -> Result<Self> {
                Ok(read.read_from_big_endian()?)
            }

            #[inline]
            fn write_be(self, write: &mut impl Write) -> UnitResult {
                write.write_as_big_endian(&self)?;
                Ok(())
            }

            #[inline]
            fn read_slice_ne(read: &mut impl Read, slice: &mut [Self]) -> UnitResult {
                read.read_from_native_endian_into(slice)?;
                Ok(())
            }

            #[inline]
            fn write_slice_ne(write: &mut impl Write, slice: &[Self]) -> UnitResult {
                write.write_as_native_endian(slice)?;
                Ok(())
            }
        }
    };
}

implement_data_for_primitive!(u8);
implement_data_for_primitive!(u32);

/// Allocate an empty byte buffer with the specified capacity,
/// reporting failure instead of aborting the process.
pub fn reserve_bytes(capacity: usize) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    bytes.try_reserve_exact(capacity)?;
    Ok(bytes)
}

/// Create a buffered file at the path and let the closure fill it.
/// If the closure fails, the incomplete file is deleted
/// and the original error is returned.
pub fn attempt_delete_file_on_write_error<T>(
    path: &Path,
    write_contents: impl FnOnce(&mut BufWriter<File>) -> Result<T>
) -> Result<T> {
    let mut buffered = BufWriter::new(File::create(path)?);

    let result = write_contents(&mut buffered)
        .and_then(|value| { buffered.flush()?; Ok(value) });

    if result.is_err() {
        // the write failed, so a partial file would remain on disk
        let _ = std::fs::remove_file(path);
    }

    result
}
