use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ndarray::Array2;
use rayon::prelude::*;

use _rust::affine::Affine;
use _rust::path::Path;
use _rust::transform::{Transform, TransformExt, WcsPixelToWorld, WcsWorldToPixel};
use _rust::wcs::{CelestialWcs, Origin, Wcs};

const AZP_HEADER: &str = "\
CTYPE1  = 'RA---AZP'
CTYPE2  = 'DEC--AZP'
CRPIX1  = -256.8
CRPIX2  = 257.3
CRVAL1  = 0.0
CRVAL2  = -90.0
CDELT1  = -0.0666666667
CDELT2  = 0.0666666667
LONPOLE = 180.0
PV2_1   = 2.0
PV2_2   = 30.0
END";

fn make_wcs() -> Arc<dyn Wcs> {
    Arc::new(CelestialWcs::from_header(AZP_HEADER).unwrap())
}

/// Meridians every 20 deg and parallels every 10 deg, `pts` vertices each.
fn graticule(pts: usize) -> Vec<Path> {
    let step = |lo: f64, hi: f64, i: usize| lo + (hi - lo) * i as f64 / (pts - 1) as f64;
    let mut lines = Vec::with_capacity(38);
    for k in 0..19 {
        let lon = 20.0 * k as f64;
        let line: Vec<(f64, f64)> = (0..pts).map(|i| (lon, step(-90.0, 90.0, i))).collect();
        lines.push(Path::polyline(&line));
    }
    for k in 0..19 {
        let lat = -90.0 + 10.0 * k as f64;
        let line: Vec<(f64, f64)> = (0..pts).map(|i| (step(-180.0, 180.0, i), lat)).collect();
        lines.push(Path::polyline(&line));
    }
    lines
}

/// Data limits [-3000, 3000] on a 600 px canvas.
fn data_to_display() -> Affine {
    Affine::new(0.1, 0.0, 300.0, 0.0, -0.1, 300.0)
}

fn bench_graticule(c: &mut Criterion) {
    let wcs = make_wcs();
    for &pts in &[100, 1000] {
        let lines = graticule(pts);
        let chain = WcsWorldToPixel::new(Arc::clone(&wcs))
            .compose(data_to_display())
            .unwrap();

        c.bench_function(&format!("graticule_{pts}_pts_per_line"), |b| {
            b.iter(|| {
                for line in &lines {
                    black_box(chain.transform_path(line).unwrap());
                }
            });
        });
    }
}

fn bench_graticule_parallel(c: &mut Criterion) {
    // Independent artists rendered concurrently against one shared WCS
    let wcs = make_wcs();
    let lines = graticule(1000);

    for &threads in &[1, 2, 4, 8] {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .unwrap();
        let chain = WcsWorldToPixel::new(Arc::clone(&wcs))
            .compose(data_to_display())
            .unwrap();

        c.bench_function(&format!("graticule_threads_{threads}"), |b| {
            b.iter(|| {
                black_box(pool.install(|| {
                    lines
                        .par_iter()
                        .map(|line| chain.transform_path(line).unwrap())
                        .collect::<Vec<_>>()
                }))
            });
        });
    }
}

fn bench_pixel_grid_roundtrip(c: &mut Criterion) {
    let wcs = make_wcs();
    let n = 192_usize;
    let pixels = Array2::from_shape_fn((n * n, 2), |(i, j)| {
        if j == 0 { (i % n) as f64 } else { (i / n) as f64 }
    });
    let p2w = WcsPixelToWorld::new(Arc::clone(&wcs));
    let w2p = p2w.inverse();

    c.bench_function("pixel_grid_roundtrip_192x192", |b| {
        b.iter(|| {
            let world = p2w.transform(pixels.view()).unwrap();
            black_box(w2p.transform(world.view()).unwrap())
        });
    });
}

fn bench_raw_wcs_throughput(c: &mut Criterion) {
    // Points/sec for the native AZP projection
    let wcs = make_wcs();
    let n = 1_000_000_usize;
    let mut coords: Vec<(f64, f64)> = vec![(0.0, 0.0); n];

    c.bench_function("wcs_world2pix_1M_points", |b| {
        b.iter(|| {
            // Reset coords each iteration
            for (i, c) in coords.iter_mut().enumerate() {
                let lon = 240.0 + (i as f64 / n as f64) * 30.0;
                let lat = -70.0 + (i as f64 / n as f64) * 15.0;
                *c = (lon, lat);
            }
            wcs.world_to_pixel(&mut coords, Origin::One).unwrap();
        });
    });
}

criterion_group!(
    benches,
    bench_graticule,
    bench_graticule_parallel,
    bench_pixel_grid_roundtrip,
    bench_raw_wcs_throughput
);
criterion_main!(benches);
