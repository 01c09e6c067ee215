#[macro_use]
extern crate criterion;

use criterion::{BenchmarkId, Criterion};

use bezier_flatten::testing::{generate_bezier_curves, TOLERANCES};
use bezier_flatten::{BezierPath, CubicBezier, EquallySpacedSampler, Flatten, FlattenConfig, PathPoint, SamplerConfig};

fn bench_flatten<A: Flatten>(curves: &[CubicBezier], config: &FlattenConfig) {
    for curve in curves {
        A::for_each_line(curve, config, &mut |seg| {
            std::hint::black_box(seg);
        });
    }
}

fn cubic_flatten(c: &mut Criterion) {
    let curves = generate_bezier_curves();
    let mut g = c.benchmark_group("cubic");
    for tol in &TOLERANCES {
        let config = FlattenConfig { max_error: *tol, ..FlattenConfig::default() };
        g.bench_with_input(BenchmarkId::new("mid_t", tol), &config, |b, config| {
            b.iter(|| bench_flatten::<bezier_flatten::MidpointBisection>(&curves, config))
        });
        g.bench_with_input(BenchmarkId::new("divide_t", tol), &config, |b, config| {
            b.iter(|| bench_flatten::<bezier_flatten::EqualSubdivision>(&curves, config))
        });
        g.bench_with_input(BenchmarkId::new("tangent", tol), &config, |b, config| {
            b.iter(|| bench_flatten::<bezier_flatten::TangentExtremum>(&curves, config))
        });
    }
}

fn arc_length(c: &mut Criterion) {
    let curves = generate_bezier_curves();
    let mut g = c.benchmark_group("arc_length");
    g.bench_function("total_length", |b| {
        b.iter(|| {
            for curve in &curves {
                std::hint::black_box(curve.arc_length(1.0));
            }
        })
    });
    g.bench_function("parameter_at_length", |b| {
        b.iter(|| {
            for curve in &curves {
                let len = curve.total_length();
                for i in 1..10 {
                    std::hint::black_box(curve.parameter_at_length(len * i as f64 / 10.0));
                }
            }
        })
    });
}

fn equally_spaced(c: &mut Criterion) {
    let curves = generate_bezier_curves();
    let path = BezierPath::new(
        curves
            .iter()
            .map(|c| PathPoint::new(c.p0(), c.p0(), c.c0()))
            .collect(),
        true,
    );

    let mut g = c.benchmark_group("equally_spaced");
    for spacing in &[1.0, 5.0, 25.0] {
        let sampler = EquallySpacedSampler::new(&SamplerConfig::new(*spacing)).unwrap();
        g.bench_with_input(BenchmarkId::new("chain", spacing), &sampler, |b, sampler| {
            b.iter(|| std::hint::black_box(sampler.sample_chain(curves.iter())))
        });
        let config = SamplerConfig::new(*spacing).fit_to_length();
        g.bench_with_input(BenchmarkId::new("path", spacing), &config, |b, config| {
            b.iter(|| std::hint::black_box(path.equally_spaced_points(config)))
        });
    }
}

criterion_group!(benches, cubic_flatten, arc_length, equally_spaced);
criterion_main!(benches);
