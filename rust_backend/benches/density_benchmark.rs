use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use skypix::core::domain::{CoordinateBatch, SkyCoordinate};
use skypix::healpix::{sky_to_pixel, Nside, PixelScheme};
use skypix::services::pixel_density::{compute_pixel_density, DensityOptions};

fn synthetic_batch(len: usize) -> CoordinateBatch {
    (0..len)
        .map(|i| {
            let ra = (i as f64 * 7.31) % 360.0;
            let dec = (i as f64 * 3.17) % 180.0 - 90.0;
            SkyCoordinate::from_degrees(ra, dec)
        })
        .collect()
}

fn bench_ang2pix(c: &mut Criterion) {
    let mut group = c.benchmark_group("ang2pix");
    let nside = Nside::new(1024).unwrap();
    let batch = synthetic_batch(1000);

    for scheme in [PixelScheme::Ring, PixelScheme::Nested] {
        group.bench_function(scheme.as_str(), |b| {
            b.iter(|| {
                for coordinate in &batch {
                    black_box(sky_to_pixel(nside, scheme, black_box(coordinate)).unwrap());
                }
            });
        });
    }

    group.finish();
}

fn bench_density(c: &mut Criterion) {
    let mut group = c.benchmark_group("pixel_density");
    let nside = Nside::new(1024).unwrap();

    for len in [1_000, 100_000] {
        let batch = synthetic_batch(len);

        group.bench_with_input(BenchmarkId::new("sequential", len), &batch, |b, batch| {
            let options = DensityOptions::default().sequential();
            b.iter(|| compute_pixel_density(black_box(batch), nside, &options).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("parallel", len), &batch, |b, batch| {
            let options = DensityOptions {
                scheme: PixelScheme::Ring,
                parallel_threshold: 1,
            };
            b.iter(|| compute_pixel_density(black_box(batch), nside, &options).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_ang2pix, bench_density);
criterion_main!(benches);
