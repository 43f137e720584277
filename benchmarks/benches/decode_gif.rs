/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use zune_animgif::GifAnimation;
use zune_benches::sample_animation;

fn decode_gif_crate(data: &[u8]) -> usize {
    let mut options = gif::DecodeOptions::new();
    options.set_color_output(gif::ColorOutput::RGBA);

    let mut decoder = options.read_info(data).unwrap();
    let mut total = 0;

    while let Some(frame) = decoder.read_next_frame().unwrap() {
        total += frame.buffer.len();
    }
    total
}

fn decode_zune_animgif(data: &[u8]) -> usize {
    let mut animation = GifAnimation::new();
    let mut total = 0;

    animation.index(data).unwrap();

    for frame in 0..animation.frame_count() {
        animation.decode_frame(data, frame).unwrap();
        total += animation.pixels().unwrap().len();
    }
    total
}

fn index_zune_animgif(data: &[u8]) -> usize {
    let mut animation = GifAnimation::new();

    animation.index(data).unwrap();
    animation.frame_count()
}

fn bench_decode(c: &mut Criterion) {
    let data = sample_animation(480, 360, 20);
    let mut group = c.benchmark_group("gif: Animation decode");

    group.throughput(Throughput::Bytes(data.len() as u64));

    group.bench_function("gif", |b| {
        b.iter(|| black_box(decode_gif_crate(data.as_slice())))
    });

    group.bench_function("zune-animgif", |b| {
        b.iter(|| black_box(decode_zune_animgif(data.as_slice())))
    });

    group.bench_function("zune-animgif index only", |b| {
        b.iter(|| black_box(index_zune_animgif(data.as_slice())))
    });
}

criterion_group!(name=benches;
      config={
      let c = Criterion::default();
        c.measurement_time(Duration::from_secs(20))
      };
    targets=bench_decode);

criterion_main!(benches);
