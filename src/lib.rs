//! Read and write QOI images.
//! This library uses no foreign code or unsafe Rust.
//!
//! The encoder produces streams that are byte for byte identical
//! to the output of the reference implementation,
//! and the decoder accepts any conformant stream.
//!
//! ## Usage
//!
//! Encode and decode in memory:
//!
//! ```
//! use qoif::prelude::*;
//!
//! let header = Header {
//!     width: 2, height: 1,
//!     channels: Channels::Rgb,
//!     color_space: ColorSpace::Srgb,
//! };
//!
//! let bytes = encode(&header, &[255, 0, 0,  255, 0, 0])?;
//! let (decoded, pixels) = decode(&bytes, None)?;
//!
//! assert_eq!(decoded, header);
//! assert_eq!(pixels, [255, 0, 0,  255, 0, 0]);
//! # Ok::<(), qoif::error::Error>(())
//! ```
//!
//! Load and save image files:
//!
//! ```no_run
//! use qoif::prelude::*;
//!
//! let mut image = Image::read_from_file("input.qoi")?;
//!
//! let top_left = image.pixel(Vec2(0, 0));
//! image.set_pixel(Vec2(0, 0), [0, 0, 0, top_left[3]]);
//!
//! image.write_to_file("output.qoi")?;
//! # Ok::<(), qoif::error::Error>(())
//! ```

#![warn(
    rust_2018_idioms,
    future_incompatible,
    unused_extern_crates,
    unused,

    missing_copy_implementations,
    missing_debug_implementations,

    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
)]

#![deny(
    unused_variables,
    unused_assignments,
    dead_code,
    unused_must_use,
    missing_copy_implementations,
    trivial_numeric_casts,
    redundant_semicolons
)]

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod io; // public to allow for custom byte parsing

pub mod math;
pub mod meta;
pub mod codec;
pub mod image;

pub mod error;

/// Export the most important items from `qoif`.
/// _Note: This includes a type called `Result`, possibly overwriting the default `std::Result` type usage._
pub mod prelude {

    pub use crate::codec::{decode, encode};
    pub use crate::image::Image;

    // stream meta data
    pub use crate::meta::{Channels, ColorSpace, Header};

    // common math
    pub use crate::math::Vec2;

    // error handling
    pub use crate::error::{Error, Result};
}
