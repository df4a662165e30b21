//! Benchmarks for the vertex-to-point adapter.
//!
//! This benchmark suite measures the cost of handle resolution relative to
//! calling the base kernel directly:
//! - Single predicate calls over points and over handles
//! - 3D convex hulls over points and over handles
//! - 2D convex hulls through a projection

#![allow(missing_docs)] // Allow missing docs for criterion-generated functions

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use vertex_point_traits::prelude::*;
use vertex_point_traits::util::{generate_planar_cloud, generate_point_cloud};

/// Benchmark a single collinearity test, direct and adapted
fn bench_predicate_call(c: &mut Criterion) {
    let mut group = c.benchmark_group("collinear_3");
    let points = generate_point_cloud(3, 10.0, 1).expect("valid cloud parameters");
    let mut store = PointStore::new();
    let ids = store.insert_all(points.iter().copied());
    let kernel = Cartesian::new();
    let traits = make_adapter(store.point_map(), kernel);

    let direct = kernel.collinear_3_object();
    group.bench_function("points", |b| {
        b.iter(|| {
            black_box(Functor3::call(
                &direct,
                black_box(&points[0]),
                black_box(&points[1]),
                black_box(&points[2]),
            ))
        });
    });

    let adapted = traits.collinear_3_object();
    group.bench_function("handles", |b| {
        b.iter(|| {
            black_box(Functor3::call(
                &adapted,
                black_box(&ids[0]),
                black_box(&ids[1]),
                black_box(&ids[2]),
            ))
        });
    });
    group.finish();
}

/// Benchmark 3D hulls with different point counts
fn bench_convex_hull_3(c: &mut Criterion) {
    let mut group = c.benchmark_group("convex_hull_3");

    for count in [16_usize, 64, 256] {
        let points = generate_point_cloud(count, 10.0, 42).expect("valid cloud parameters");
        let mut store = PointStore::new();
        let ids = store.insert_all(points.iter().copied());
        let kernel = Cartesian::new();
        let traits = make_adapter(store.point_map(), kernel);

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("points", count), &points, |b, points| {
            b.iter(|| black_box(convex_hull_3(&kernel, black_box(points))));
        });
        group.bench_with_input(BenchmarkId::new("handles", count), &ids, |b, ids| {
            b.iter(|| black_box(convex_hull_3(&traits, black_box(ids))));
        });
    }
    group.finish();
}

/// Benchmark 2D hulls through the yz projection
fn bench_convex_hull_2(c: &mut Criterion) {
    let mut group = c.benchmark_group("convex_hull_2");

    for count in [64_usize, 1024] {
        let points =
            generate_planar_cloud(count, 10.0, 7, Projection::Yz).expect("valid cloud parameters");
        let mut store = PointStore::new();
        let ids = store.insert_all(points.iter().copied());
        let kernel = Cartesian::new();
        let direct = kernel.construct_traits_yz_3_object();
        let adapted = make_adapter(store.point_map(), kernel).construct_traits_yz_3_object();

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("points", count), &points, |b, points| {
            b.iter(|| black_box(convex_hull_2(&direct, black_box(points))));
        });
        group.bench_with_input(BenchmarkId::new("handles", count), &ids, |b, ids| {
            b.iter(|| black_box(convex_hull_2(&adapted, black_box(ids))));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_predicate_call,
    bench_convex_hull_3,
    bench_convex_hull_2
);
criterion_main!(benches);
