//! Describes the fixed fourteen byte prefix of a qoi stream
//! and the sentinel bytes terminating it.
//! Contains functionality to read and write this meta data from bytes.

use crate::error::Error;
use crate::error::Result;
use crate::error::UnitResult;
use crate::io::*;

/// The maximum number of pixels in a single image.
///
/// Anything larger could not be stored within two gigabytes,
/// assuming the worst case of five bytes per pixel.
pub const MAX_PIXEL_COUNT: usize = 400_000_000;

/// The first four bytes of each qoi stream.
/// Used to abort reading files of a different format.
pub mod magic_number {
    use super::*;

    /// The first four bytes of each qoi stream: the string `qoif`.
    pub const BYTES: [u8; 4] = *b"qoif";

    /// Without validation, write this instance to the byte stream.
    pub fn write(write: &mut impl Write) -> UnitResult {
        u8::write_slice_ne(write, &self::BYTES)
    }

    /// Consumes four bytes from the reader and returns whether the stream may be
    /// a qoi stream.
    pub fn is_qoi(read: &mut impl Read) -> Result<bool> {
        let mut magic_num = [0; 4];
        u8::read_slice_ne(read, &mut magic_num)?;
        Ok(magic_num == self::BYTES)
    }

    /// Validate this stream. If it is a qoi stream, return `Ok(())`.
    pub fn validate_qoi(read: &mut impl Read) -> UnitResult {
        if self::is_qoi(read)? {
            Ok(())
        } else {
            Err(Error::invalid_header("file identifier missing"))
        }
    }
}

/// The eight constant bytes at the end of a sequence of ops.
pub mod stream_end {
    use super::*;

    /// The constant sentinel terminating every qoi stream.
    pub const BYTES: [u8; 8] = [0, 0, 0, 0, 0, 0, 0, 1];

    /// Number of bytes this would consume in a qoi stream.
    pub fn byte_size() -> usize {
        BYTES.len()
    }

    /// Without validation, write this instance to the byte stream.
    pub fn write<W: Write>(write: &mut W) -> UnitResult {
        u8::write_slice_ne(write, &self::BYTES)
    }
}

/// Whether the pixels of an image carry an alpha channel.
/// The alpha channel never premultiplies the color channels.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Channels {
    /// Three bytes per pixel: red, green, blue.
    Rgb,

    /// Four bytes per pixel: red, green, blue, alpha.
    Rgba,
}

impl Channels {
    /// Number of bytes one pixel occupies in a raw pixel buffer.
    pub fn count(self) -> usize {
        match self {
            Channels::Rgb => 3,
            Channels::Rgba => 4,
        }
    }

    /// Whether raw pixels include an alpha byte.
    pub fn has_alpha(self) -> bool {
        self == Channels::Rgba
    }

    /// Interpret the channel count byte of a header. Only `3` and `4` are valid.
    pub fn from_count(count: u8) -> Option<Self> {
        match count {
            3 => Some(Channels::Rgb),
            4 => Some(Channels::Rgba),
            _ => None,
        }
    }
}

/// How the color channel values of an image should be interpreted.
/// This is purely informative and does not change encoding or decoding.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ColorSpace {
    /// Gamma compressed color channels, linear alpha.
    Srgb,

    /// All channels linear.
    Linear,
}

impl ColorSpace {
    /// The byte representing this color space in a header.
    pub fn to_u8(self) -> u8 {
        match self {
            ColorSpace::Srgb => 0,
            ColorSpace::Linear => 1,
        }
    }

    /// Interpret the color space byte of a header. Only `0` and `1` are valid.
    pub fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(ColorSpace::Srgb),
            1 => Some(ColorSpace::Linear),
            _ => None,
        }
    }
}

/// Describes the geometry and interpretation of the pixels in a qoi stream.
/// This is everything the fourteen byte prefix of the stream stores.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Header {
    /// Width of the image in pixels.
    pub width: u32,

    /// Height of the image in pixels.
    pub height: u32,

    /// Number of channels of each raw pixel.
    pub channels: Channels,

    /// Interpretation of the channel values.
    pub color_space: ColorSpace,
}

impl Header {
    /// Number of bytes the header occupies at the start of the stream.
    pub const BYTE_SIZE: usize = 14;

    /// Number of pixels the described image contains.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Byte length of a raw pixel buffer
    /// storing this image with the specified channel count.
    pub fn raw_pixel_byte_size(&self, channels: Channels) -> usize {
        self.pixel_count() * channels.count()
    }

    /// Check the invariants the encoder relies on.
    /// The channel count and color space are valid by construction.
    pub fn validate(&self) -> UnitResult {
        if self.width == 0 || self.height == 0 {
            return Err(Error::invalid_argument("zero image dimensions"));
        }

        if self.height as usize >= MAX_PIXEL_COUNT / self.width as usize {
            return Err(Error::invalid_argument("maximum pixel count exceeded"));
        }

        Ok(())
    }

    /// Read and validate the header at the current position of the reader.
    pub fn read(read: &mut impl Read) -> Result<Self> {
        magic_number::validate_qoi(read)?;

        let width = u32::read_be(read)?;
        let height = u32::read_be(read)?;

        let mut channels_and_color_space = [0_u8; 2];
        u8::read_slice_ne(read, &mut channels_and_color_space)?;

        let channels = Channels::from_count(channels_and_color_space[0])
            .ok_or_else(|| Error::invalid_header("channel count"))?;

        let color_space = ColorSpace::from_u8(channels_and_color_space[1])
            .ok_or_else(|| Error::invalid_header("color space"))?;

        if width == 0 || height == 0 {
            return Err(Error::invalid_header("zero image dimensions"));
        }

        if height as usize >= MAX_PIXEL_COUNT / width as usize {
            return Err(Error::invalid_header("maximum pixel count exceeded"));
        }

        Ok(Header { width, height, channels, color_space })
    }

    /// Without validation, write this instance to the byte stream.
    pub fn write(&self, write: &mut impl Write) -> UnitResult {
        magic_number::write(write)?;
        self.width.write_be(write)?;
        self.height.write_be(write)?;
        u8::write_slice_ne(write, &[self.channels.count() as u8, self.color_space.to_u8()])?;
        Ok(())
    }
}
