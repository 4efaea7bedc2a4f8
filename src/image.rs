//! A flat, row major pixel container
//! bridging the codec to byte buffers and files on disk.

use std::convert::TryFrom;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::codec;
use crate::error::Error;
use crate::error::Result;
use crate::io::attempt_delete_file_on_write_error;
use crate::io::{Read, Write};
use crate::math::Vec2;
use crate::meta::{Channels, ColorSpace, Header};

/// An uncompressed image, addressed by two-dimensional pixel coordinates.
///
/// The pixel bytes are stored row by row, top to bottom. In each row, for
/// each pixel, its red, green, blue, and then alpha values are stored one
/// after another, without padding. Images without an alpha channel store
/// only three bytes per pixel.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Image {
    /// The number of pixel columns and rows of this image.
    pub resolution: Vec2<usize>,

    /// Whether the stored pixels carry an alpha channel.
    pub channels: Channels,

    /// How the stored channel values should be interpreted.
    pub color_space: ColorSpace,

    /// The flattened pixel bytes,
    /// of length `resolution.area() * channels.count()`.
    pub data: Vec<u8>,
}

impl Image {
    /// Create an image from an existing pixel buffer,
    /// checking the buffer length against the resolution.
    pub fn new(
        resolution: impl Into<Vec2<usize>>,
        channels: Channels,
        color_space: ColorSpace,
        data: Vec<u8>,
    ) -> Self {
        let resolution = resolution.into();

        assert_eq!(
            resolution.area() * channels.count(), data.len(),
            "expected {} pixel bytes, but vector length is {}",
            resolution.area() * channels.count(), data.len()
        );

        Image { resolution, channels, color_space, data }
    }

    /// The number of pixel columns of this image.
    pub fn width(&self) -> usize {
        self.resolution.width()
    }

    /// The number of pixel rows of this image.
    pub fn height(&self) -> usize {
        self.resolution.height()
    }

    // coordinates outside the image snap to the nearest border pixel
    fn clamped_byte_offset(&self, position: Vec2<usize>) -> usize {
        let largest_valid = self.resolution - Vec2(1, 1);

        position.min(largest_valid).flat_index_for_size(self.resolution)
            * self.channels.count()
    }

    /// Look up the pixel nearest to the coordinate.
    /// Out of range coordinates are clamped to the image border.
    /// Images without an alpha channel report fully opaque alpha.
    pub fn pixel(&self, position: Vec2<usize>) -> [u8; 4] {
        let offset = self.clamped_byte_offset(position);
        let values = &self.data[offset .. offset + self.channels.count()];

        match self.channels {
            Channels::Rgb => [values[0], values[1], values[2], 255],
            Channels::Rgba => [values[0], values[1], values[2], values[3]],
        }
    }

    /// Overwrite the pixel nearest to the coordinate.
    /// Out of range coordinates are clamped to the image border.
    /// The alpha value is ignored for images without an alpha channel.
    pub fn set_pixel(&mut self, position: Vec2<usize>, pixel: [u8; 4]) {
        let offset = self.clamped_byte_offset(position);
        let count = self.channels.count();
        self.data[offset .. offset + count].copy_from_slice(&pixel[.. count]);
    }

    /// The header describing this image in a qoi stream.
    pub fn header(&self) -> Result<Header> {
        let width = u32::try_from(self.resolution.width())
            .map_err(|_| Error::invalid_argument("image width"))?;

        let height = u32::try_from(self.resolution.height())
            .map_err(|_| Error::invalid_argument("image height"))?;

        Ok(Header {
            width, height,
            channels: self.channels,
            color_space: self.color_space,
        })
    }

    /// Read a qoi image from a file.
    /// Use [`Image::read_from_unbuffered`] instead if you do not have a file path.
    pub fn read_from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::read_from_unbuffered(File::open(path)?)
    }

    /// Buffer the reader and decode a qoi image from it.
    /// Use [`Image::read_from_memory`] instead if your bytes are already in memory.
    /// Use [`Image::read_from_file`] instead if you have a file path.
    pub fn read_from_unbuffered(unbuffered: impl Read) -> Result<Self> {
        Self::read_from_buffered(BufReader::new(unbuffered))
    }

    /// Decode a qoi image from an already buffered reader.
    /// The reader is consumed to its end in a single pass.
    pub fn read_from_buffered(mut buffered: impl Read) -> Result<Self> {
        let mut bytes = Vec::new();
        buffered.read_to_end(&mut bytes)?;
        Self::read_from_memory(&bytes)
    }

    /// Decode a qoi image that is already in memory.
    pub fn read_from_memory(bytes: &[u8]) -> Result<Self> {
        let (header, data) = codec::decode(bytes, None)?;

        Ok(Image {
            resolution: Vec2(header.width as usize, header.height as usize),
            channels: header.channels,
            color_space: header.color_space,
            data,
        })
    }

    /// Encode this image and write the stream to a new file,
    /// returning the number of bytes written.
    /// If any step fails, the partially written file is deleted.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<usize> {
        attempt_delete_file_on_write_error(path.as_ref(), |write| {
            self.write_to_buffered(write)
        })
    }

    /// Encode this image and write the stream to the writer,
    /// returning the number of bytes written.
    pub fn write_to_buffered(&self, write: &mut impl Write) -> Result<usize> {
        let bytes = codec::encode(&self.header()?, &self.data)?;
        write.write_all(&bytes)?;
        Ok(bytes.len())
    }
}
