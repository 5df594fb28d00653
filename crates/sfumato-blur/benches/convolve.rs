//! Benchmark of the steady-state blur path on a realistic atlas tile.

use criterion::{criterion_group, criterion_main, Criterion};
use sfumato_arena::Arena;
use sfumato_blur::{fill_gaussian, Convolver};
use sfumato_core::PixelsMut;
use std::hint::black_box;

fn blur_256x256(c: &mut Criterion) {
    let mut arena = Arena::new();
    let conv = Convolver::new(&mut arena, 4, 256, 256).unwrap();
    fill_gaussian(conv.weights_mut(&mut arena), 1.0, 0.12);

    let mut buf = vec![0u8; 256 * 256];
    for y in 4..252 {
        for x in 4..252 {
            buf[y * 256 + x] = ((x * 7 + y * 13) % 251) as u8;
        }
    }

    // Re-blurring in place decays the content toward gray, which is fine:
    // the work per call is shape-dependent, not value-dependent.
    c.bench_function("blur_256x256_r4", |b| {
        b.iter(|| {
            let view = PixelsMut::new(black_box(&mut buf), 256, 256, 256).unwrap();
            conv.execute(&mut arena, view);
        })
    });
}

criterion_group!(benches, blur_256x256);
criterion_main!(benches);
