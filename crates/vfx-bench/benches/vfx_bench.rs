//! Benchmarks for the color core hot paths.
//!
//! Run with: `cargo bench -p vfx-bench`

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use vfx_cdl::CdlParams;
use vfx_core::ImageDims;
use vfx_lut::{Interpolation, Lut1D, Lut3D, Matrix};
use vfx_pipeline::Pipeline;
use vfx_transfer::{Curve, CurveSpec};

fn ramp(n: usize) -> Vec<f32> {
    (0..n).map(|i| i as f32 / n as f32).collect()
}

fn pixels(n: usize) -> Vec<[f32; 3]> {
    (0..n)
        .map(|i| {
            let t = i as f32 / n as f32;
            [t, (t * 3.7).fract(), (t * 11.3).fract()]
        })
        .collect()
}

/// Polynomial pow against libm.
fn bench_fastmath(c: &mut Criterion) {
    let mut group = c.benchmark_group("fastmath");
    let values = ramp(100_000);
    group.throughput(Throughput::Elements(values.len() as u64));

    group.bench_function("pow_approx", |b| {
        b.iter(|| {
            values
                .iter()
                .map(|&v| vfx_fastmath::pow_approx(black_box(v), 1.2))
                .collect::<Vec<_>>()
        })
    });

    group.bench_function("pow_slice", |b| {
        b.iter(|| {
            let mut v = values.clone();
            vfx_fastmath::pow_slice(black_box(&mut v), 1.2);
            v
        })
    });

    group.bench_function("powf", |b| {
        b.iter(|| values.iter().map(|&v| black_box(v).powf(1.2)).collect::<Vec<_>>())
    });

    group.finish();
}

/// CDL forward operator.
fn bench_cdl(c: &mut Criterion) {
    let mut group = c.benchmark_group("cdl");
    let input = pixels(100_000);
    group.throughput(Throughput::Elements(input.len() as u64));

    let contrast = CdlParams::new().with_offset([-0.1; 3]).with_power([1.2; 3]);
    let warmup = CdlParams::new()
        .with_slope([1.1, 1.0, 0.9])
        .with_offset([0.02, 0.0, -0.02])
        .with_saturation(1.1);

    group.bench_function("contrast", |b| {
        b.iter(|| vfx_cdl::apply_cdl(black_box(&input), &contrast))
    });
    group.bench_function("warmup", |b| {
        b.iter(|| vfx_cdl::apply_cdl(black_box(&input), &warmup))
    });

    group.finish();
}

/// 1D and 3D LUT lookups.
fn bench_lut(c: &mut Criterion) {
    let mut group = c.benchmark_group("lut");
    let input = pixels(10_000);
    group.throughput(Throughput::Elements(input.len() as u64));

    for size in [256, 4096] {
        let table: Vec<f32> = (0..size)
            .map(|i| (i as f32 / (size - 1) as f32).powf(1.0 / 2.2))
            .collect();
        let Ok(lut) = Lut1D::new(table) else { continue };
        group.bench_with_input(BenchmarkId::new("lut1d", size), &input, |b, px| {
            b.iter(|| px.iter().map(|&p| lut.apply_rgb(black_box(p))).collect::<Vec<_>>())
        });
    }

    for size in [17, 33, 65] {
        let Ok(lut) = Lut3D::from_fn(size, |[r, g, b]| [g * 0.9 + 0.05, b, r * r]) else {
            continue;
        };
        for interp in [Interpolation::Nearest, Interpolation::Linear, Interpolation::Tetrahedral] {
            group.bench_with_input(
                BenchmarkId::new(format!("lut3d_{}", interp.name()), size),
                &input,
                |b, px| {
                    b.iter(|| {
                        px.iter()
                            .map(|&p| lut.apply_with(black_box(p), interp))
                            .collect::<Vec<_>>()
                    })
                },
            );
        }
    }

    group.finish();
}

/// Encode and decode for every curve.
fn bench_curves(c: &mut Criterion) {
    let mut group = c.benchmark_group("curves");
    let values = ramp(10_000);
    group.throughput(Throughput::Elements(values.len() as u64));

    for curve in Curve::ALL {
        group.bench_with_input(BenchmarkId::new("encode", curve), &values, |b, v| {
            b.iter(|| v.iter().map(|&x| curve.encode(black_box(x))).collect::<Vec<_>>())
        });
        group.bench_with_input(BenchmarkId::new("decode", curve), &values, |b, v| {
            b.iter(|| v.iter().map(|&x| curve.decode(black_box(x))).collect::<Vec<_>>())
        });
    }

    group.finish();
}

/// Full chain over an HD RGBA frame.
fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    group.sample_size(20);

    let Ok(dims) = ImageDims::new(1920, 1080, 4) else { return };
    let Ok(lut) = Lut3D::from_fn(33, |[r, g, b]| [r * 0.95, g, (b + 0.02).min(1.0)]) else {
        return;
    };
    let pipeline = Pipeline::new()
        .curve(CurveSpec::decode(Curve::ArriLogC3))
        .matrix(Matrix::scale([1.05, 1.0, 0.95]))
        .cdl(CdlParams::new().with_power([1.1; 3]).with_saturation(1.05))
        .curve(CurveSpec::encode(Curve::Srgb))
        .lut3d(lut.with_interpolation(Interpolation::Tetrahedral));

    let frame = ramp(dims.len());
    group.throughput(Throughput::Elements((dims.width() * dims.height()) as u64));
    group.bench_function("hd_rgba", |b| {
        b.iter(|| {
            let mut buf = frame.clone();
            pipeline.apply_buffer(black_box(&mut buf), dims).map(|_| buf)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_fastmath,
    bench_cdl,
    bench_lut,
    bench_curves,
    bench_pipeline,
);

criterion_main!(benches);
