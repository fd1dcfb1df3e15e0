use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use imagecraft_core::pipeline::modules::{GaussianBlur, Median};
use imagecraft_core::pipeline::{Filter, Pipeline};
use imagecraft_core::{Color, Image, bmp};

fn test_image(width: u32, height: u32) -> Image {
    let mut img = Image::new(width, height).unwrap();
    img.map_pixels(|x, y, _| {
        Color::new(
            x as f32 / width as f32,
            y as f32 / height as f32,
            ((x ^ y) & 0xff) as f32 / 255.0,
        )
    });
    img
}

fn bench_filters(c: &mut Criterion) {
    let image = test_image(512, 512);

    let mut blur = Pipeline::new();
    blur.push(Filter::GaussianBlur(GaussianBlur::new(2.0).unwrap()));
    c.bench_function("gaussian_blur_512_sigma2", |b| {
        b.iter(|| {
            let mut img = image.clone();
            blur.apply(black_box(&mut img));
        })
    });

    let mut median = Pipeline::new();
    median.push(Filter::Median(Median::new(3).unwrap()));
    c.bench_function("median_512_window3", |b| {
        b.iter(|| {
            let mut img = image.clone();
            median.apply(black_box(&mut img));
        })
    });
}

fn bench_codec(c: &mut Criterion) {
    let image = test_image(1024, 768);
    let bytes = bmp::encode_to_vec(&image).unwrap();
    c.bench_function("bmp_encode_1024x768", |b| {
        b.iter(|| bmp::encode_to_vec(black_box(&image)).unwrap())
    });
    c.bench_function("bmp_decode_1024x768", |b| {
        b.iter(|| bmp::decode_from(std::io::Cursor::new(black_box(&bytes))).unwrap())
    });
}

criterion_group!(benches, bench_filters, bench_codec);
criterion_main!(benches);
