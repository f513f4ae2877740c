// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tessera Geometry: Kurbo-native 2D geometry for a vector scene graph.
//!
//! - Affine decomposition into position, rotation, and non-uniform scale ([`Transform`]).
//! - Bounding boxes with an inverted empty box so expansion is a plain union ([`BoundingBox`]).
//! - Lines, directed segments, and winding-aware arcs.
//! - A closed set of geometry kinds ([`Geometry`]): polygons, rectangles, circles, stars,
//!   offset polygons with rounded corners, and groups.
//! - Ray queries: front-face segment and arc tests, nearest-hit selection, and a
//!   conservative broad-phase box test ([`Ray::hits_box`]).
//!
//! All coordinates are `f64` on a y-down canvas. Angles increase clockwise on screen.
//! The normal of a directed segment is `(dy, -dx)`, so clockwise outlines have outward
//! normals and are hit from outside under the default [`Culling::BackFace`].
//!
//! Degenerate inputs never panic: parallel lines, zero-length edges, and singular
//! matrices produce `None` and callers skip the dependent operation.
//!
//! # Example
//!
//! ```rust
//! use kurbo::{Point, Vec2};
//! use tessera_geometry::{Culling, Geometry, OffsetPolygon, Polygon, Ray, intersect_geometry};
//!
//! let square = Polygon::closed([
//!     Point::new(0.0, 0.0),
//!     Point::new(10.0, 0.0),
//!     Point::new(10.0, 10.0),
//!     Point::new(0.0, 10.0),
//! ]);
//! let rounded: Geometry = OffsetPolygon::new(square, 2.0).into();
//!
//! let bbox = rounded.bounding_box();
//! assert!((bbox.min.x + 2.0).abs() < 1e-9 && (bbox.max.y - 12.0).abs() < 1e-9);
//!
//! let ray = Ray::new(Point::new(-5.0, 5.0), Vec2::new(1.0, 0.0));
//! let hit = intersect_geometry(&ray, &rounded, Culling::BackFace).unwrap();
//! assert!((hit.point.x + 2.0).abs() < 1e-9);
//! ```

pub mod affine;
pub mod arc;
pub mod bbox;
pub mod geometry;
pub mod intersect;
pub mod line;
pub mod offset;
pub mod polygon;
pub mod ray;
pub mod shapes;

pub use affine::{
    Transform, VecExt, compose, decompose, lerp, normalize_angle, transform_vector, try_invert,
};
pub use arc::Arc;
pub use bbox::BoundingBox;
pub use geometry::{Geometry, Primitive};
pub use intersect::{Culling, RayHit, intersect_geometry, intersect_geometry_all};
pub use line::{LineEq, Segment};
pub use offset::{CornerElement, OffsetPolygon};
pub use polygon::Polygon;
pub use ray::Ray;
pub use shapes::{Circle, InnerRadius, NStar, RectShape};
