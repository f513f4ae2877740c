// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tessera Gizmo: interactive move, scale, and rotate for scene nodes.
//!
//! A [`TransformController`] tracks one selected node. It surrounds the node with a
//! [`ControlFrame`] of eight handles and turns pointer drags into new node transforms:
//!
//! - Corner handles scale both axes about the opposite corner.
//! - Edge handles scale a single axis about the opposite edge.
//! - The interior moves the node.
//! - A band just outside the frame rotates about the center.
//!
//! Holding alt pivots scales on the center instead. Holding shift constrains the drag:
//! moves lock to an axis, scales become uniform, and rotation snaps to fixed steps.
//! `Escape` cancels a drag and restores the transform captured when it began.
//!
//! ## Example
//!
//! ```
//! use kurbo::{Point, Size, Vec2};
//! use tessera_geometry::{Geometry, RectShape};
//! use tessera_gizmo::{ControlState, TransformController};
//! use tessera_scene::{LocalNode, Rgba, Scene, Style};
//!
//! let mut scene = Scene::new();
//! let root = scene.root();
//! let rect = Geometry::Rect(RectShape::new(Point::ZERO, Size::new(100.0, 50.0)));
//! let id = scene.spawn(root, LocalNode::graph(rect, Style::fill(Rgba::BLACK))).unwrap();
//!
//! let mut gizmo = TransformController::default();
//! // Press inside the rectangle: it becomes the target and a move begins.
//! gizmo.pointer_down(&mut scene, Point::new(50.0, 25.0), Some(id));
//! assert_eq!(gizmo.active_state(), Some(ControlState::Move));
//! gizmo.pointer_move(&mut scene, Point::new(60.0, 25.0));
//! gizmo.pointer_up(&scene);
//! assert_eq!(scene.transform(id).unwrap().position, Vec2::new(10.0, 0.0));
//! ```

mod config;
mod controller;
mod frame;
mod transformer;

pub use config::{ControllerConfig, FrameStyle};
pub use controller::{ControllerEvent, Key, Modifiers, TransformController};
pub use frame::{ControlFrame, ControlState, FrameHit, opposite_handle};
pub use transformer::{
    DragGesture, apply as apply_drag, apply_constrained as apply_constrained_drag,
};
