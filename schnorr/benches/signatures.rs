use criterion::{black_box, criterion_group, criterion_main, Criterion};
use schnorr::Keypair;

fn bench_keypair_from_seed(c: &mut Criterion) {
    let seed = [42u8; 32];
    c.bench_function("keypair_from_seed", |bencher| {
        bencher.iter(|| black_box(Keypair::from_seed(black_box(&seed))))
    });
}

fn bench_sign(c: &mut Criterion) {
    let keypair = Keypair::from_seed(&[42u8; 32]);
    let msg = b"benchmark message payload";

    c.bench_function("schnorr_sign", |bencher| {
        bencher.iter(|| {
            let sig = keypair.sign(black_box(msg));
            black_box(sig);
        })
    });
}

fn bench_verify(c: &mut Criterion) {
    let keypair = Keypair::from_seed(&[42u8; 32]);
    let msg = b"benchmark message payload";
    let sig = keypair.sign(msg);

    c.bench_function("schnorr_verify", |bencher| {
        bencher.iter(|| {
            let ok = keypair.public.verify(black_box(msg), black_box(&sig));
            black_box(ok);
        })
    });
}

criterion_group!(benches, bench_keypair_from_seed, bench_sign, bench_verify);
criterion_main!(benches);
