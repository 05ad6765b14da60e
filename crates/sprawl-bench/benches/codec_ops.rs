//! Criterion micro-benchmarks for the message wire codec.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use sprawl_core::VertexId;
use sprawl_protocol::{decode_frames, encode_frame, LayoutMessage, FRAME_LEN};

/// Encode `n` frames back to back.
fn make_frames(n: usize) -> Vec<u8> {
    let mut buf = Vec::with_capacity(n * FRAME_LEN);
    for i in 0..n {
        let msg = LayoutMessage::fresh(VertexId(i as i64), [i as f32, -(i as f32)], 4, 3);
        encode_frame(&msg, &mut buf);
    }
    buf
}

/// Benchmark: encode 1000 frames.
fn bench_encode_1000(c: &mut Criterion) {
    let msgs: Vec<_> = (0..1000)
        .map(|i| LayoutMessage::fresh(VertexId(i), [1.0, 2.0], 4, 3))
        .collect();
    c.bench_function("codec_encode_1000", |b| {
        b.iter(|| {
            let mut buf = Vec::with_capacity(1000 * FRAME_LEN);
            for m in &msgs {
                encode_frame(m, &mut buf);
            }
            black_box(&buf);
        });
    });
}

/// Benchmark: decode the same 1000 frames.
fn bench_decode_1000(c: &mut Criterion) {
    let encoded = make_frames(1000);
    c.bench_function("codec_decode_1000", |b| {
        b.iter(|| {
            let decoded = decode_frames(&encoded).unwrap();
            black_box(&decoded);
        });
    });
}

criterion_group!(benches, bench_encode_1000, bench_decode_1000);
criterion_main!(benches);
