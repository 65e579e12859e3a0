use criterion::{black_box, criterion_group, criterion_main, Criterion};

use cv_blockmatch::prelude::*;
use image::{GrayImage, Luma};
use imageproc::filter::gaussian_blur_f32;

fn blockmatch_bench(c: &mut Criterion) {
    // Synthetic pair: two crops of one blurred noise image, offset by 12 columns
    let noise = GrayImage::from_fn(272, 240, |x, y| {
        Luma([(((x * 37 + y * 91) ^ (x * y + 13)) % 251) as u8])
    });
    let master = gaussian_blur_f32(&noise, 1.5);

    let left = GrayFloatImage::from_fn(256, 240, |x, y| {
        f32::from(master.get_pixel(x as u32, y as u32)[0]) / 255.0
    });
    let right = GrayFloatImage::from_fn(256, 240, |x, y| {
        f32::from(master.get_pixel(x as u32 + 12, y as u32)[0]) / 255.0
    });

    let pair = StereoPair::new(&left, &right).unwrap();

    // Build disparity alg
    let mut disp = BlockMatch::new(Params {
        neighbourhood: 7,
        max_disparity: 32,
    })
    .unwrap();

    // Benchmark compute function
    c.bench_function("blockmatch 256x240", |b| {
        b.iter(|| black_box(disp.compute(&pair).unwrap()))
    });
}

criterion_group!(benches, blockmatch_bench);
criterion_main!(benches);
