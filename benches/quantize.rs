use criterion::{Criterion, black_box, criterion_group, criterion_main};
use roboscore_vision::utils::quantize::{Quantizer, ThresholdQuantizer};
use roboscore_vision::utils::scale::downscale_nearest;

mod common;

fn noisy_frame(width: usize, height: usize) -> Vec<u8> {
    // Deterministic pseudo-random camera-like pixels
    let mut state = 0x2545_f491u32;
    let mut out = Vec::with_capacity(width * height * 4);
    for _ in 0..width * height {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        let [r, g, b, _] = state.to_le_bytes();
        out.extend_from_slice(&[r, g, b, 255]);
    }
    out
}

fn bench_quantize_medium(c: &mut Criterion) {
    let frame = noisy_frame(640, 480);
    let q = ThresholdQuantizer::default();
    c.bench_function("quantize_640x480", |b| {
        b.iter(|| q.quantize(black_box(&frame), black_box(640), black_box(480)))
    });
}

fn bench_quantize_large(c: &mut Criterion) {
    let frame = noisy_frame(4032, 3024);
    let q = ThresholdQuantizer::default();
    c.bench_function("quantize_4032x3024", |b| {
        b.iter(|| q.quantize(black_box(&frame), black_box(4032), black_box(3024)))
    });
}

fn bench_downscale(c: &mut Criterion) {
    let scene = common::pipe_scene(4032, 1512);
    c.bench_function("downscale_nearest_4032_to_1008", |b| {
        b.iter(|| downscale_nearest(black_box(&scene), black_box(0.25)))
    });
}

criterion_group!(benches, bench_quantize_medium, bench_quantize_large, bench_downscale);
criterion_main!(benches);
