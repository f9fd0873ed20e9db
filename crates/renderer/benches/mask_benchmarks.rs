//! Benchmarks for mask rasterization and color evaluation.
//!
//! Run with: cargo bench --package renderer --bench mask_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;

use atmo_common::VariableKind;
use field::{GridGeometry, ScalarField};
use projection::ViewProjection;
use renderer::{ColorScale, MaskRasterizer, RenderConfig, DEFAULT_MASK_ALPHA};

/// Global 0.25 degree temperature grid with noise, in Kelvin.
fn generate_global_temperature() -> ScalarField {
    let (nx, ny) = (1440, 721);
    let mut rng = rand::thread_rng();
    let mut data = vec![0.0f32; nx * ny];

    for y in 0..ny {
        for x in 0..nx {
            let lat_factor = (y as f32 / ny as f32 - 0.5).abs() * -80.0;
            let lon_factor = ((x as f32 / nx as f32) * std::f32::consts::PI * 4.0).sin() * 5.0;
            let noise = rng.gen_range(-3.0..3.0);
            data[y * nx + x] = 300.0 + lat_factor + lon_factor + noise;
        }
    }

    let geometry = GridGeometry::new(90.0, 0.0, 0.25, 0.25, nx, ny).expect("valid geometry");
    ScalarField::new(geometry, data).expect("matching shape")
}

fn bench_rasterize(c: &mut Criterion) {
    let mut group = c.benchmark_group("mask_rasterize");
    let field = generate_global_temperature();
    let scale = ColorScale::for_kind(&VariableKind::Temperature, DEFAULT_MASK_ALPHA)
        .expect("temperature scale");

    let sizes = [(256, 256), (1024, 768), (2048, 1536)];
    for (width, height) in sizes {
        let view = ViewProjection::centered(35.0, 139.0, 4.0, width, height, 2.0)
            .expect("valid view");
        group.throughput(Throughput::Elements((width * height) as u64));

        for parallel in [true, false] {
            let rasterizer = MaskRasterizer::new(RenderConfig {
                parallel,
                ..Default::default()
            })
            .expect("valid config");
            let mut buf = vec![0u8; width * height * 4];
            let label = if parallel { "parallel" } else { "sequential" };

            group.bench_with_input(
                BenchmarkId::new(label, format!("{}x{}", width, height)),
                &view,
                |b, view| {
                    b.iter(|| {
                        rasterizer
                            .rasterize_into(Some(&field), view, Some(&scale), width, height, &mut buf)
                            .expect("sized buffer");
                        black_box(&buf);
                    })
                },
            );
        }
    }

    group.finish();
}

fn bench_scale_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("scale_evaluate");
    let values: Vec<f32> = (0..10_000).map(|i| i as f32 * 0.01).collect();

    for kind in [
        VariableKind::Temperature,
        VariableKind::Precipitation,
        VariableKind::Pressure,
        VariableKind::CloudCover,
    ] {
        let scale = ColorScale::for_kind(&kind, DEFAULT_MASK_ALPHA).expect("scale for kind");
        group.throughput(Throughput::Elements(values.len() as u64));
        group.bench_function(kind.code(), |b| {
            b.iter(|| {
                for v in &values {
                    black_box(scale.evaluate(Some(black_box(*v))));
                }
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_rasterize, bench_scale_evaluate);
criterion_main!(benches);
