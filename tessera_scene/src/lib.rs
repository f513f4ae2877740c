// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tessera Scene: an arena scene graph for 2D vector editing.
//!
//! - Represents a hierarchy of groups and drawable nodes with position, rotation, scale,
//!   visibility, and draw order.
//! - Computes local, world, and view matrices on demand from the parent chain.
//! - Paints through a small [`Surface`] contract that a rendering backend implements.
//! - Picks nodes with rays, either brute force or through a bounding volume hierarchy from
//!   [`tessera_index`].
//!
//! ## Structure
//!
//! A [`Scene`] owns every node in a generational arena and starts with a root group.
//! Nodes are allocated with [`Scene::insert`] and attached with [`Scene::add`] (or both at
//! once with [`Scene::spawn`]). A node has at most one parent: adding it elsewhere detaches
//! it first. Adding a node under itself or one of its descendants is rejected with
//! [`SceneError::Cycle`], logged, and leaves the scene unchanged.
//!
//! Children are kept stably sorted by [`LocalNode::draw_order`].
//!
//! ## Matrices
//!
//! - Local: `compose(position, rotation, scale)`.
//! - World: parent world times local.
//! - View: camera view-projection times world, when the node's topmost ancestor is the scene
//!   root and a [`Camera`] is set; otherwise the world matrix.
//!
//! ## Visibility
//!
//! [`Scene::traverse_visible`] stops at a hidden node and skips hidden direct children, but
//! walks visible child groups with [`Scene::traverse`], which does not look at visibility.
//!
//! ## Picking
//!
//! - [`intersect_objects`]: nearest hit per node over a list, sorted by distance.
//! - [`build_object_bvh`] / [`intersect_bvh`]: one target per node.
//! - [`build_geometry_bvh`] / [`intersect_geometry_bvh`]: one target per leaf geometry.
//!
//! Hierarchies are snapshots of world-space boxes. Rebuild them after edits.
//!
//! # Example
//!
//! ```rust
//! use kurbo::{Point, Size, Vec2};
//! use tessera_geometry::{Ray, RectShape};
//! use tessera_scene::{IntersectOptions, LocalNode, Scene, Style, intersect_objects};
//!
//! let mut scene = Scene::new();
//! let root = scene.root();
//! let card = scene
//!     .spawn(
//!         root,
//!         LocalNode::graph(RectShape::new(Point::ZERO, Size::new(100.0, 50.0)), Style::default())
//!             .with_name("card")
//!             .with_position(Vec2::new(20.0, 20.0)),
//!     )
//!     .unwrap();
//!
//! assert_eq!(scene.find_by_name("card"), Some(card));
//! let bounds = scene.world_bounds(card);
//! assert_eq!(bounds.max, Point::new(120.0, 70.0));
//!
//! let ray = Ray::new(Point::new(0.0, 40.0), Vec2::new(1.0, 0.0));
//! let hits = intersect_objects(&scene, &scene.pickable_nodes(), &ray, IntersectOptions::default());
//! assert_eq!(hits[0].node, card);
//! assert_eq!(hits[0].point, Point::new(20.0, 40.0));
//! ```

mod draw;
mod error;
mod events;
mod pick;
mod scene;
mod types;
mod util;

pub use draw::{DrawCommand, Recorder, Surface, draw, draw_node};
pub use error::SceneError;
pub use events::{ListenerId, Listeners, SceneEvent};
pub use pick::{
    IntersectOptions, Intersection, LeafTarget, build_geometry_bvh, build_object_bvh, bvh_helper,
    intersect_bvh, intersect_geometry_bvh, intersect_object, intersect_objects,
};
pub use scene::Scene;
pub use types::{Camera, LocalNode, NodeFlags, NodeId, NodeKind, PaintOp, Rgba, Style};
