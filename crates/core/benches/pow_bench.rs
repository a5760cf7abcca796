//! Benchmark for the header hash chain.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lyra2pow_core::{pow_hash, HEADER_BYTES};

fn bench_pow_hash(c: &mut Criterion) {
    let header = [0x42u8; HEADER_BYTES];

    c.bench_function("pow_hash_single", |b| {
        b.iter(|| pow_hash(black_box(&header)).unwrap())
    });
}

fn bench_pow_hash_varying_nonce(c: &mut Criterion) {
    c.bench_function("pow_hash_varying", |b| {
        let mut header = [0u8; HEADER_BYTES];
        let mut nonce: u64 = 0;
        b.iter(|| {
            header[72..80].copy_from_slice(&nonce.to_le_bytes());
            nonce = nonce.wrapping_add(1);
            pow_hash(black_box(&header)).unwrap()
        })
    });
}

criterion_group!(benches, bench_pow_hash, bench_pow_hash_varying_nonce);
criterion_main!(benches);
