//! Compresses raw pixel bytes into a complete qoi stream.

use bit_field::BitField;

use super::*;
use crate::error::Error;
use crate::error::Result;
use crate::io::reserve_bytes;
use crate::meta::{stream_end, Channels, Header};

/// The number of bytes an encoded image can occupy in the worst case,
/// where every pixel needs a literal op: one tag byte plus all channel values.
pub fn worst_case_byte_size(header: &Header) -> usize {
    header.pixel_count() * (header.channels.count() + 1)
        + Header::BYTE_SIZE
        + stream_end::byte_size()
}

/// Encode the raw pixels described by the header into a complete qoi stream.
///
/// The pixel buffer must contain exactly `width * height * channels` bytes,
/// row by row, top to bottom. The returned buffer holds the header, the ops,
/// and the closing sentinel, and is owned by the caller.
pub fn encode(header: &Header, pixels: &[u8]) -> Result<Vec<u8>> {
    header.validate()?;

    if pixels.len() != header.raw_pixel_byte_size(header.channels) {
        return Err(Error::invalid_argument("pixel buffer length"));
    }

    let mut bytes = reserve_bytes(worst_case_byte_size(header))?;

    header.write(&mut bytes)?;
    write_ops(&mut bytes, pixels, header.channels);
    stream_end::write(&mut bytes)?;

    Ok(bytes)
}

/// Run the encoder state machine over all pixels, appending one op at a time.
fn write_ops(bytes: &mut Vec<u8>, pixels: &[u8], channels: Channels) {
    let mut previous = Pixel::START;
    let mut table = ColorTable::new();
    let mut run: u8 = 0;

    let last_position = pixels.len() / channels.count() - 1;

    for (position, values) in pixels.chunks_exact(channels.count()).enumerate() {
        let pixel = match channels {
            Channels::Rgba => Pixel::new(values[0], values[1], values[2], values[3]),

            // without an alpha channel, the alpha of the previous pixel sticks
            Channels::Rgb => Pixel::new(values[0], values[1], values[2], previous.alpha),
        };

        if pixel == previous {
            run += 1;

            if run == MAX_RUN_LENGTH || position == last_position {
                bytes.push(OP_RUN | (run - 1));
                run = 0;
            }

            continue;
        }

        if run > 0 {
            bytes.push(OP_RUN | (run - 1));
            run = 0;
        }

        let slot = pixel.hash_index();

        if table.lookup(slot) == pixel {
            bytes.push(OP_INDEX | slot as u8);
        }
        else {
            // run and index ops leave the table untouched,
            // everything below stores the new color
            table.insert(pixel);

            if pixel.alpha == previous.alpha {
                push_delta_or_literal(bytes, previous, pixel);
            }
            else {
                bytes.push(OP_RGBA);
                bytes.extend_from_slice(&[pixel.red, pixel.green, pixel.blue, pixel.alpha]);
            }
        }

        previous = pixel;
    }
}

/// Emit the most compact op for a pixel whose alpha equals the previous alpha:
/// a one byte diff, a two byte luma diff, or a four byte literal.
fn push_delta_or_literal(bytes: &mut Vec<u8>, previous: Pixel, pixel: Pixel) {
    // the deltas must wrap around within eight bits before the range tests,
    // otherwise transitions like 255 -> 0 would be misclassified
    let delta_red = pixel.red.wrapping_sub(previous.red) as i8;
    let delta_green = pixel.green.wrapping_sub(previous.green) as i8;
    let delta_blue = pixel.blue.wrapping_sub(previous.blue) as i8;

    let red_minus_green = delta_red.wrapping_sub(delta_green);
    let blue_minus_green = delta_blue.wrapping_sub(delta_green);

    if (-2 ..= 1).contains(&delta_red)
        && (-2 ..= 1).contains(&delta_green)
        && (-2 ..= 1).contains(&delta_blue)
    {
        let mut op = OP_DIFF;
        op.set_bits(4 .. 6, (delta_red + 2) as u8);
        op.set_bits(2 .. 4, (delta_green + 2) as u8);
        op.set_bits(0 .. 2, (delta_blue + 2) as u8);
        bytes.push(op);
    }
    else if (-32 ..= 31).contains(&delta_green)
        && (-8 ..= 7).contains(&red_minus_green)
        && (-8 ..= 7).contains(&blue_minus_green)
    {
        let mut first = OP_LUMA;
        first.set_bits(0 .. 6, (delta_green + 32) as u8);

        let mut second = 0_u8;
        second.set_bits(4 .. 8, (red_minus_green + 8) as u8);
        second.set_bits(0 .. 4, (blue_minus_green + 8) as u8);

        bytes.push(first);
        bytes.push(second);
    }
    else {
        bytes.push(OP_RGB);
        bytes.extend_from_slice(&[pixel.red, pixel.green, pixel.blue]);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::meta::ColorSpace;

    fn rgb_header(width: u32, height: u32) -> Header {
        Header { width, height, channels: Channels::Rgb, color_space: ColorSpace::Srgb }
    }

    fn rgba_header(width: u32, height: u32) -> Header {
        Header { width, height, channels: Channels::Rgba, color_space: ColorSpace::Srgb }
    }

    /// The op bytes between the header and the sentinel.
    fn ops_of(header: &Header, pixels: &[u8]) -> Vec<u8> {
        let bytes = encode(header, pixels).unwrap();
        assert!(bytes.ends_with(&stream_end::BYTES));
        bytes[Header::BYTE_SIZE .. bytes.len() - stream_end::byte_size()].to_vec()
    }

    #[test]
    fn single_black_pixel_becomes_a_run() {
        // a black pixel with synthesized alpha equals the implicit start pixel
        let bytes = encode(&rgb_header(1, 1), &[0, 0, 0]).unwrap();

        assert_eq!(bytes, vec![
            0x71, 0x6f, 0x69, 0x66,
            0, 0, 0, 1,
            0, 0, 0, 1,
            3, 0,
            0xc0, // run of one
            0, 0, 0, 0, 0, 0, 0, 1,
        ]);
    }

    #[test]
    fn repeated_pixel_becomes_a_run() {
        // red is one below black in the wrapping red channel, so the
        // first pixel fits a diff op, and the second repeats it
        let ops = ops_of(&rgba_header(2, 1), &[255, 0, 0, 255, 255, 0, 0, 255]);
        assert_eq!(ops, vec![0x5a, 0xc0]);
    }

    #[test]
    fn small_gradient_becomes_a_diff() {
        let ops = ops_of(&rgba_header(2, 1), &[
            10, 10, 10, 255, // luma distance from the start pixel
            11, 11, 11, 255, // all deltas are +1
        ]);

        assert_eq!(ops.len(), 3);
        assert_eq!(ops[ops.len() - 1], 0x7f);
    }

    #[test]
    fn wide_luma_delta_becomes_a_literal() {
        let ops = ops_of(&rgba_header(2, 1), &[
            100, 100, 100, 255,
            110, 130, 145, 255, // the green delta fits, but red minus green is -20
        ]);

        assert_eq!(&ops[ops.len() - 4 ..], &[OP_RGB, 110, 130, 145]);
    }

    #[test]
    fn alpha_change_forces_a_full_literal() {
        let ops = ops_of(&rgba_header(2, 1), &[
            0, 0, 0, 255,
            0, 0, 0, 128,
        ]);

        assert_eq!(ops, vec![0xc0, OP_RGBA, 0, 0, 0, 128]);
    }

    #[test]
    fn transparent_black_hits_the_fresh_table() {
        // the table starts out all zero, so the all-zero color is
        // already stored in slot zero before any op was processed
        let ops = ops_of(&rgba_header(2, 1), &[
            0, 0, 0, 255,
            0, 0, 0, 0,
        ]);

        assert_eq!(ops, vec![0xc0, OP_INDEX]);
    }

    #[test]
    fn long_runs_are_split_below_63() {
        let ops = ops_of(&rgb_header(100, 1), &[0_u8; 300]);
        assert_eq!(ops, vec![0xfd, 0xe5]); // 62 pixels, then the remaining 38

        for op in ops {
            assert!(op & TAG_MASK == OP_RUN && op < OP_RGB);
        }
    }

    #[test]
    fn recurring_color_uses_the_table() {
        let first = [50, 50, 50];
        let second = [255, 255, 255];

        let mut pixels = Vec::new();
        pixels.extend_from_slice(&first);
        pixels.extend_from_slice(&second);
        pixels.extend_from_slice(&first);

        let ops = ops_of(&rgb_header(3, 1), &pixels);

        let slot = Pixel::new(50, 50, 50, 255).hash_index();
        assert_eq!(ops[ops.len() - 1], OP_INDEX | slot as u8);
    }

    #[test]
    fn hash_collisions_never_emit_an_index_op() {
        // these two opaque colors share a table slot,
        // but only exact matches may be referenced by an index op
        let first = Pixel::new(64, 0, 0, 255);
        let second = Pixel::new(0, 0, 0, 255);
        assert_eq!(first.hash_index(), second.hash_index());

        // black equals the implicit start pixel and must not come first,
        // or it would be hidden inside a run op
        let ops = ops_of(&rgb_header(4, 1), &[
            64, 0, 0,  0, 0, 0,  64, 0, 0,  0, 0, 0,
        ]);

        assert_eq!(ops, vec![
            OP_RGB, 64, 0, 0,
            OP_RGB, 0, 0, 0,
            OP_RGB, 64, 0, 0,
            OP_RGB, 0, 0, 0,
        ]);
    }

    #[test]
    fn wrapping_deltas_are_classified_correctly() {
        // 255 -> 0 is a +1 delta, not -255
        let ops = ops_of(&rgba_header(2, 1), &[
            255, 255, 255, 255,
            0, 0, 0, 255,
        ]);

        assert_eq!(ops[ops.len() - 1], 0x7f);
    }

    #[test]
    fn mismatched_buffer_length_is_rejected() {
        assert!(matches!(
            encode(&rgb_header(2, 2), &[0_u8; 11]),
            Err(Error::InvalidArgument(_))
        ));

        assert!(matches!(
            encode(&rgb_header(2, 2), &[]),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn invalid_header_is_rejected() {
        assert!(matches!(
            encode(&rgb_header(0, 4), &[]),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn output_never_exceeds_the_worst_case() {
        let header = rgba_header(4, 4);
        let mut pixels = Vec::new();

        for index in 0 .. 16_u32 {
            // a pattern of large jumps, forcing literal ops
            pixels.extend_from_slice(&[
                (index * 91) as u8, (index * 67 + 13) as u8,
                (index * 153) as u8, (index * 41) as u8,
            ]);
        }

        let bytes = encode(&header, &pixels).unwrap();
        assert!(bytes.len() <= worst_case_byte_size(&header));
    }
}
