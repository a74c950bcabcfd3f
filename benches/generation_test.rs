use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use huechord::{generate_palette, Harmony, Hsl, Rgb, Swatch};
use std::time::Duration;

pub fn bench_conversions(c: &mut Criterion) {
    let mut group = c.benchmark_group("conversions");
    group.sample_size(100);
    group.measurement_time(Duration::from_secs(5));

    group.bench_function("hex_to_rgb", |b| {
        b.iter(|| Rgb::from_hex(black_box("#6366f1")));
    });

    group.bench_function("rgb_to_hsl", |b| {
        let rgb = Rgb::new(99, 102, 241);
        b.iter(|| black_box(rgb).to_hsl());
    });

    group.bench_function("hsl_to_rgb", |b| {
        let hsl = Hsl::new(239, 84, 67);
        b.iter(|| black_box(hsl).to_rgb());
    });

    group.bench_function("full_round_trip", |b| {
        b.iter(|| {
            let rgb = Rgb::from_hex(black_box("#6366f1")).unwrap();
            rgb.to_hsl().to_rgb().to_hex()
        });
    });

    group.finish();
}

pub fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation");
    group.sample_size(100);
    group.measurement_time(Duration::from_secs(5));

    let base = vec![Swatch::new("#6366f1")];

    for harmony in Harmony::ALL {
        group.bench_with_input(
            BenchmarkId::new("strategy", harmony.tag()),
            &harmony,
            |b, &harmony| {
                b.iter(|| generate_palette(black_box(&base), harmony, 10));
            },
        );
    }

    for count in [3usize, 10, 100] {
        group.bench_with_input(BenchmarkId::new("count", count), &count, |b, &count| {
            b.iter(|| generate_palette(black_box(&base), Harmony::Analogous, count));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_conversions, bench_generation);
criterion_main!(benches);
