// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size, Vec2};
use tessera_geometry::{Geometry, NStar, Ray, RectShape};
use tessera_index::DEFAULT_MIN_NUM;
use tessera_scene::{
    IntersectOptions, LocalNode, NodeId, Rgba, Scene, Style, build_geometry_bvh,
    build_object_bvh, intersect_bvh, intersect_geometry_bvh, intersect_objects,
};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// `n` by `n` grid of alternating rectangles and stars.
fn grid_scene(n: usize, cell: f64) -> (Scene, Vec<NodeId>) {
    let mut scene = Scene::new();
    let root = scene.root();
    let mut ids = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let geometry = if (x + y) % 2 == 0 {
                Geometry::Rect(RectShape::centered(Size::new(cell * 0.6, cell * 0.6)))
            } else {
                Geometry::Star(NStar::new(5, cell * 0.4))
            };
            let local = LocalNode::graph(geometry, Style::fill(Rgba::BLACK))
                .with_position(Vec2::new(x as f64 * cell, y as f64 * cell));
            if let Ok(id) = scene.spawn(root, local) {
                ids.push(id);
            }
        }
    }
    (scene, ids)
}

fn random_rays(count: usize, extent: f64) -> Vec<Ray> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|_| {
            let origin = Point::new(rng.next_f64() * extent, rng.next_f64() * extent);
            let angle = rng.next_f64() * core::f64::consts::TAU;
            Ray::new(origin, Vec2::from_angle(angle))
        })
        .collect()
}

fn bench_pick(c: &mut Criterion) {
    let options = IntersectOptions::default();
    let mut group = c.benchmark_group("pick");
    for &n in &[16_usize, 32, 64] {
        let (scene, ids) = grid_scene(n, 20.0);
        let rays = random_rays(64, n as f64 * 20.0);
        let objects = build_object_bvh(&scene, &ids, DEFAULT_MIN_NUM);
        let leaves = build_geometry_bvh(&scene, &ids, DEFAULT_MIN_NUM);
        group.throughput(Throughput::Elements(rays.len() as u64));

        group.bench_function(format!("brute_force_n{}", n), |b| {
            b.iter(|| {
                for ray in &rays {
                    black_box(intersect_objects(&scene, &ids, ray, options));
                }
            });
        });
        group.bench_function(format!("object_bvh_n{}", n), |b| {
            b.iter(|| {
                for ray in &rays {
                    black_box(intersect_bvh(&scene, &objects, ray, options));
                }
            });
        });
        group.bench_function(format!("geometry_bvh_n{}", n), |b| {
            b.iter(|| {
                for ray in &rays {
                    black_box(intersect_geometry_bvh(&leaves, ray, options));
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_pick);
criterion_main!(benches);
