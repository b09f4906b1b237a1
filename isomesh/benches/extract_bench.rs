//! Criterion benchmarks for surface extraction.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use isomesh::ScalarField;

/// A `dim³` field sampling the distance to the volume center.
fn make_sphere_field(dim: usize) -> ScalarField {
    let center = 0.5 * (dim as f32 - 1.0);
    let mut samples = Vec::with_capacity(dim * dim * dim);
    for i in 0..dim {
        for j in 0..dim {
            for k in 0..dim {
                let di = i as f32 - center;
                let dj = j as f32 - center;
                let dk = k as f32 - center;
                samples.push((di * di + dj * dj + dk * dk).sqrt());
            }
        }
    }
    ScalarField::from_samples(dim, samples).unwrap()
}

fn bench_extract_surface(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_surface");

    for dim in [16, 32, 64] {
        let field = make_sphere_field(dim);
        let isovalue = dim as f32 * 0.3;

        group.bench_with_input(BenchmarkId::from_parameter(dim), &field, |b, field| {
            b.iter(|| {
                let mesh = field.extract_surface(black_box(isovalue));
                black_box(mesh)
            });
        });
    }

    group.finish();
}

fn bench_empty_scan(c: &mut Criterion) {
    // Isovalue below every sample: the scan visits all cubes but never
    // triangulates.
    let field = make_sphere_field(32);

    c.bench_function("empty_scan_32", |b| {
        b.iter(|| black_box(field.extract_surface(black_box(-1.0))));
    });
}

fn bench_volume_parse(c: &mut Criterion) {
    let dim = 32;
    let field = make_sphere_field(dim);
    let mut text = format!("{}\n", dim);
    for i in 0..dim {
        for j in 0..dim {
            for k in 0..dim {
                text.push_str(&format!("{} ", field.sample(i, j, k)));
            }
        }
    }

    c.bench_function("parse_volume_32", |b| {
        b.iter(|| ScalarField::from_reader(black_box(text.as_bytes())).unwrap());
    });
}

criterion_group!(
    benches,
    bench_extract_surface,
    bench_empty_scan,
    bench_volume_parse
);
criterion_main!(benches);
