// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tessera Index: a generic 2D bounding volume hierarchy.
//!
//! Tessera Index is the spatial acceleration layer of the Tessera stack.
//!
//! - Build a binary hierarchy over axis-aligned bounding boxes (AABBs) with user payloads.
//! - Traverse depth-first with a pruning predicate (for example a ray vs. box broad phase).
//! - Query by point or intersecting rectangle.
//!
//! It is generic over the scalar type `T` and does not depend on any geometry crate.
//! Higher layers (like the scene graph) compute world-space boxes and feed them here.
//!
//! ## Construction
//!
//! Each node computes the union box of its targets. A node holding `min_num` targets or
//! fewer is a leaf. Otherwise the split axis is the longer side of the union box, the
//! split position is its midpoint, and each target goes left when its own midpoint on
//! that axis lies before the split position. If either side ends up empty the node stays
//! a leaf rather than recursing forever.
//!
//! Hierarchies are immutable once built. To reflect moved geometry, build a new one and
//! replace the old value.
//!
//! # Example
//!
//! ```rust
//! use tessera_index::{Aabb2D, Bvh, DEFAULT_MIN_NUM};
//!
//! let targets = (0..16_u32)
//!     .map(|i| (i, Aabb2D::<f64>::from_xywh(i as f64 * 20.0, 0.0, 10.0, 10.0)))
//!     .collect();
//! let bvh = Bvh::build(targets, DEFAULT_MIN_NUM);
//!
//! let hits: Vec<_> = bvh.query_point(45.0, 5.0).collect();
//! assert_eq!(hits, vec![&2]);
//!
//! // Count leaves reachable through nodes that start left of x = 100.
//! let mut leaves = 0;
//! bvh.traverse(
//!     |n| if n.is_leaf() { leaves += 1 },
//!     |n| n.bbox().min_x < 100.0,
//! );
//! assert!(leaves > 0);
//! ```
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs for floating-point coordinates.

pub mod bvh;
pub mod types;

pub use bvh::{Bvh, BvhF32, BvhF64, DEFAULT_MIN_NUM, NodeIdx, NodeRef, Target};
pub use types::{Aabb2D, Axis, Scalar};
