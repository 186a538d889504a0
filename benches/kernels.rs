use aligned_kernels::{ewise_add, matmul, matmul_tiled, reduce_sum, AlignedBuffer};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random(rng: &mut StdRng, size: usize) -> AlignedBuffer {
    let data: Vec<f32> = (0..size).map(|_| rng.gen_range(-1.0..1.0)).collect();
    AlignedBuffer::from_slice(&data).unwrap()
}

fn bench_matmul(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let mut group = c.benchmark_group("matmul");

    for size in [64usize, 128, 256] {
        let a = random(&mut rng, size * size);
        let b = random(&mut rng, size * size);
        let mut out = AlignedBuffer::zeros(size * size).unwrap();
        let dim = size as u32;

        group.bench_with_input(BenchmarkId::new("naive", size), &size, |bench, _| {
            bench.iter(|| matmul(black_box(&a), black_box(&b), &mut out, dim, dim, dim).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("tiled", size), &size, |bench, _| {
            bench.iter(|| {
                matmul_tiled(black_box(&a), black_box(&b), &mut out, dim, dim, dim).unwrap()
            })
        });
    }

    group.finish();
}

fn bench_elementwise(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);
    let size = 1 << 20;
    let a = random(&mut rng, size);
    let b = random(&mut rng, size);
    let mut out = AlignedBuffer::zeros(size).unwrap();
    let mut sums = AlignedBuffer::zeros(size / 1024).unwrap();

    c.bench_function("ewise_add", |bench| {
        bench.iter(|| ewise_add(black_box(&a), black_box(&b), &mut out).unwrap())
    });
    c.bench_function("reduce_sum", |bench| {
        bench.iter(|| reduce_sum(black_box(&a), &mut sums, 1024).unwrap())
    });
}

criterion_group!(benches, bench_matmul, bench_elementwise);
criterion_main!(benches);
