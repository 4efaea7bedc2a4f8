#[macro_use]
extern crate bencher;

use bencher::Bencher;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use qoif::prelude::*;

fn gradient_image() -> (Header, Vec<u8>) {
    let (width, height) = (512_u32, 256_u32);
    let mut pixels = Vec::with_capacity((width * height * 3) as usize);

    for y in 0 .. height {
        for x in 0 .. width {
            pixels.extend_from_slice(&[
                (x % 256) as u8,
                (y % 256) as u8,
                ((x + y) % 256) as u8,
            ]);
        }
    }

    let header = Header {
        width, height,
        channels: Channels::Rgb,
        color_space: ColorSpace::Srgb,
    };

    (header, pixels)
}

fn noise_image() -> (Header, Vec<u8>) {
    let mut rng = StdRng::seed_from_u64(0);

    let (width, height) = (512_u32, 256_u32);
    let pixels = (0 .. width * height * 4).map(|_| rng.gen()).collect();

    let header = Header {
        width, height,
        channels: Channels::Rgba,
        color_space: ColorSpace::Srgb,
    };

    (header, pixels)
}

fn encode_gradient(bench: &mut Bencher) {
    let (header, pixels) = gradient_image();

    bench.iter(|| {
        bencher::black_box(encode(&header, &pixels).unwrap());
    })
}

fn decode_gradient(bench: &mut Bencher) {
    let (header, pixels) = gradient_image();
    let bytes = encode(&header, &pixels).unwrap();

    bench.iter(|| {
        bencher::black_box(decode(&bytes, None).unwrap());
    })
}

fn encode_noise(bench: &mut Bencher) {
    let (header, pixels) = noise_image();

    bench.iter(|| {
        bencher::black_box(encode(&header, &pixels).unwrap());
    })
}

fn decode_noise(bench: &mut Bencher) {
    let (header, pixels) = noise_image();
    let bytes = encode(&header, &pixels).unwrap();

    bench.iter(|| {
        bencher::black_box(decode(&bytes, None).unwrap());
    })
}

benchmark_group!(coding,
    encode_gradient,
    decode_gradient,
    encode_noise,
    decode_noise
);

benchmark_main!(coding);
