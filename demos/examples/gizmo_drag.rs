// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gizmo drag.
//!
//! Drive the transform controller with scripted pointer input: select, scale with alt,
//! rotate with shift, then cancel a drag with escape.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p tessera_demos --example gizmo_drag`

use kurbo::{Point, Size, Vec2};
use tessera_geometry::RectShape;
use tessera_gizmo::{ControllerEvent, Key, TransformController};
use tessera_scene::{LocalNode, Recorder, Rgba, Scene, Style};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut scene = Scene::new();
    let root = scene.root();
    let id = scene
        .spawn(
            root,
            LocalNode::graph(
                RectShape::centered(Size::new(100.0, 50.0)),
                Style::fill(Rgba::from_hex(0x40a0f0)),
            )
            .with_position(Vec2::new(200.0, 100.0)),
        )
        .expect("root is a group");

    let mut gizmo = TransformController::default();
    gizmo.events_mut().subscribe(|e| {
        if !matches!(e, ControllerEvent::Change) {
            println!("event: {e:?}");
        }
    });

    // Scale from the bottom-right corner about the center.
    gizmo.pointer_down(&mut scene, Point::new(250.0, 125.0), Some(id));
    gizmo.key_down(&mut scene, Key::Alt);
    gizmo.pointer_move(&mut scene, Point::new(300.0, 150.0));
    gizmo.pointer_up(&scene);
    gizmo.key_up(&mut scene, Key::Alt);
    println!("after scale: {:?}", scene.transform(id));

    // Rotate from just outside the right edge, snapped in fixed steps.
    let right = gizmo.frame().map(|f| f.handle(3)).unwrap_or_default();
    let grab = right + Vec2::new(20.0, 0.0);
    gizmo.key_down(&mut scene, Key::Shift);
    gizmo.pointer_down(&mut scene, grab, Some(id));
    gizmo.pointer_move(&mut scene, Point::new(230.0, 180.0));
    gizmo.pointer_up(&scene);
    gizmo.key_up(&mut scene, Key::Shift);
    println!("after rotate: {:?}", scene.transform(id));

    // Start a move and cancel it.
    let before = scene.transform(id);
    gizmo.pointer_down(&mut scene, Point::new(200.0, 100.0), Some(id));
    gizmo.pointer_move(&mut scene, Point::new(400.0, 400.0));
    gizmo.key_down(&mut scene, Key::Escape);
    assert_eq!(scene.transform(id), before);
    println!("escape restored {:?}; selection: {:?}", before, gizmo.target());

    gizmo.select(&scene, Some(id));
    let mut recorder = Recorder::default();
    gizmo.draw(&mut recorder);
    println!("gizmo paints: {}", recorder.paint_count());
}
