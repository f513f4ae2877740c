// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ray picking.
//!
//! Cast a ray through a scene with brute force and with both hierarchy flavors,
//! then compare the results.
//!
//! Run:
//! - `cargo run -p tessera_demos --example ray_pick`
//! - `RUST_LOG=trace cargo run -p tessera_demos --example ray_pick` to see hierarchy builds.

use kurbo::{Point, Size, Vec2};
use tessera_geometry::{Culling, Ray, RectShape};
use tessera_index::DEFAULT_MIN_NUM;
use tessera_scene::{
    IntersectOptions, LocalNode, NodeFlags, Rgba, Scene, Style, build_geometry_bvh, build_object_bvh,
    bvh_helper, intersect_bvh, intersect_geometry_bvh, intersect_objects,
};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut scene = Scene::new();
    let root = scene.root();
    for i in 0..8 {
        let local = LocalNode::graph(
            RectShape::centered(Size::new(30.0, 30.0)),
            Style::fill(Rgba::BLACK),
        )
        .with_name(format!("box{i}"))
        .with_position(Vec2::new(50.0 + 60.0 * f64::from(i), 100.0));
        scene.spawn(root, local).expect("root is a group");
    }

    let ids = scene.pickable_nodes();
    let ray = Ray::new(Point::new(0.0, 100.0), Vec2::new(1.0, 0.0));

    let brute = intersect_objects(&scene, &ids, &ray, IntersectOptions::default());
    let objects = build_object_bvh(&scene, &ids, DEFAULT_MIN_NUM);
    let via_objects = intersect_bvh(&scene, &objects, &ray, IntersectOptions::default());
    let leaves = build_geometry_bvh(&scene, &ids, DEFAULT_MIN_NUM);
    let via_leaves = intersect_geometry_bvh(&leaves, &ray, IntersectOptions::default());

    println!("brute force: {} hits", brute.len());
    println!(
        "object hierarchy: {} hits over {} nodes",
        via_objects.len(),
        objects.node_count()
    );
    println!("geometry hierarchy: {} hits", via_leaves.len());
    if let Some(first) = brute.first() {
        println!(
            "nearest: {:?} at {:?} (distance {:.1}, normal {:?})",
            scene.name(first.node),
            first.point,
            first.distance,
            first.normal
        );
    }

    // Without culling the ray also reports exits.
    let two_sided = IntersectOptions {
        culling: Culling::None,
        ..IntersectOptions::default()
    };
    let all = intersect_objects(&scene, &ids, &ray, two_sided);
    println!("two-sided nearest-per-node: {} hits", all.len());

    // Attach the hierarchy outline to the scene to view it through the normal draw path.
    let helper = LocalNode::graph(
        bvh_helper(&objects),
        Style::stroke(Rgba::from_hex(0xff0000), 1.0),
    )
    .with_name("bvh helper");
    let helper = scene.spawn(root, helper).expect("root is a group");
    scene.set_flags(helper, NodeFlags::VISIBLE);
    println!("helper bounds: {:?}", scene.world_bounds(helper));
}
