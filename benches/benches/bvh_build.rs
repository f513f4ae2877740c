// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use tessera_index::{Aabb2D, Bvh};

fn gen_grid_rects(n: usize, cell: f64) -> Vec<(u32, Aabb2D<f64>)> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let id = (y * n + x) as u32;
            out.push((id, Aabb2D::<f64>::from_xywh(x as f64 * cell, y as f64 * cell, cell, cell)));
        }
    }
    out
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("bvh_build");
    for &n in &[32_usize, 64, 128] {
        group.throughput(Throughput::Elements((n * n) as u64));
        for &min_num in &[1_usize, 4, 16] {
            group.bench_function(format!("grid_n{}_min{}", n, min_num), |b| {
                b.iter_batched(
                    || gen_grid_rects(n, 10.0),
                    |targets| Bvh::build(targets, min_num),
                    BatchSize::LargeInput,
                );
            });
        }
    }
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("bvh_query");
    for &n in &[64_usize, 128] {
        let bvh = Bvh::build(gen_grid_rects(n, 10.0), 4);
        let window = Aabb2D::<f64>::from_xywh(100.0, 100.0, 200.0, 200.0);
        group.bench_function(format!("rect_n{}", n), |b| {
            b.iter(|| bvh.query_rect(window).count());
        });
        group.bench_function(format!("point_n{}", n), |b| {
            b.iter(|| bvh.query_point(155.0, 155.0).count());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_query);
criterion_main!(benches);
