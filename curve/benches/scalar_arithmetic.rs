use criterion::{black_box, criterion_group, criterion_main, Criterion};
use curve::Scalar;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_scalar_mul(c: &mut Criterion) {
    c.bench_function("scalar_mul", |bencher| {
        let mut rng = StdRng::seed_from_u64(42);
        let a = Scalar::random(&mut rng);
        let b = Scalar::random(&mut rng);
        bencher.iter(|| black_box(black_box(a) * black_box(b)))
    });
}

fn bench_scalar_add(c: &mut Criterion) {
    c.bench_function("scalar_add", |bencher| {
        let mut rng = StdRng::seed_from_u64(42);
        let a = Scalar::random(&mut rng);
        let b = Scalar::random(&mut rng);
        bencher.iter(|| black_box(black_box(a) + black_box(b)))
    });
}

fn bench_scalar_from_wide_bytes(c: &mut Criterion) {
    c.bench_function("scalar_from_wide_bytes", |bencher| {
        let bytes = [0xabu8; 64];
        bencher.iter(|| black_box(Scalar::from_bytes_mod_order_wide(black_box(&bytes))))
    });
}

criterion_group!(
    benches,
    bench_scalar_mul,
    bench_scalar_add,
    bench_scalar_from_wide_bytes
);
criterion_main!(benches);
