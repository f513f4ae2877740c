// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene basics.
//!
//! Build a small hierarchy, move a group, read world bounds, and record a frame.
//!
//! Run:
//! - `cargo run -p tessera_demos --example scene_basics`

use kurbo::{Point, Size, Vec2};
use tessera_geometry::{Circle, Geometry, NStar, OffsetPolygon, RectShape};
use tessera_scene::{Camera, DrawCommand, LocalNode, Recorder, Rgba, Scene, Style, draw};

fn main() {
    tracing_subscriber::fmt::init();

    let mut scene = Scene::new();
    let root = scene.root();

    let group = scene
        .spawn(root, LocalNode::group().with_name("shapes"))
        .expect("root is a group");
    let card = scene
        .spawn(
            group,
            LocalNode::graph(
                RectShape::new(Point::ZERO, Size::new(120.0, 80.0)),
                Style::fill(Rgba::from_hex(0xf0c040)),
            )
            .with_name("card"),
        )
        .expect("group accepts children");
    let outline = RectShape::new(Point::ZERO, Size::new(120.0, 80.0)).to_polygon();
    scene
        .spawn(
            group,
            LocalNode::graph(
                OffsetPolygon::new(outline, 8.0),
                Style::stroke(Rgba::from_hex(0x558ef0), 2.0),
            )
            .with_name("halo")
            .with_draw_order(-1),
        )
        .expect("group accepts children");
    scene
        .spawn(
            root,
            LocalNode::graph(NStar::new(5, 40.0), Style::fill(Rgba::BLACK))
                .with_position(Vec2::new(300.0, 60.0)),
        )
        .expect("root is a group");
    scene
        .spawn(
            root,
            LocalNode::graph(Geometry::Circle(Circle::new(25.0)), Style::fill(Rgba::WHITE))
                .with_position(Vec2::new(300.0, 200.0)),
        )
        .expect("root is a group");

    println!("card world bounds: {:?}", scene.world_bounds(card));
    scene.set_position(group, Vec2::new(50.0, 50.0));
    scene.set_rotation(group, 0.25);
    println!("after moving the group: {:?}", scene.world_bounds(card));

    let order: Vec<_> = scene
        .children(group)
        .iter()
        .filter_map(|c| scene.name(*c))
        .collect();
    println!("draw order inside group: {order:?}");

    scene.set_camera(Some(Camera {
        position: Vec2::new(-20.0, -20.0),
        zoom: 2.0,
    }));
    let mut recorder = Recorder::default();
    draw(&scene, &mut recorder);
    let fills = recorder
        .commands
        .iter()
        .filter(|c| matches!(c, DrawCommand::Fill(..)))
        .count();
    println!(
        "recorded {} commands, {} paints, {} fills",
        recorder.commands.len(),
        recorder.paint_count(),
        fills
    );
}
