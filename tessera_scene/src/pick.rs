// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ray picking over scene nodes, brute force or accelerated by a BVH.
//!
//! Rays are given in world space (before the camera). Use the inverse of the camera's
//! view-projection to bring a view-space pointer into world space first.

use kurbo::{Point, Size, Vec2};
use tessera_geometry::{Culling, Geometry, Ray, RectShape, intersect_geometry};
use tessera_index::Bvh;

use crate::scene::Scene;
use crate::types::NodeId;
use crate::util::{aabb_to_bbox, bbox_to_aabb};

/// Options for ray queries.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct IntersectOptions {
    /// Run the broad-phase box test before the exact outline test.
    pub use_bounding_box: bool,
    /// Which faces count as hits.
    pub culling: Culling,
    /// Sort results by distance, nearest first.
    pub sort: bool,
}

impl Default for IntersectOptions {
    fn default() -> Self {
        Self {
            use_bounding_box: false,
            culling: Culling::BackFace,
            sort: true,
        }
    }
}

/// A ray hit on a scene node.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Intersection {
    /// Distance from the ray origin.
    pub distance: f64,
    /// World-space hit point.
    pub point: Point,
    /// World-space surface normal.
    pub normal: Vec2,
    /// The node that was hit.
    pub node: NodeId,
}

/// A leaf geometry in world space, tagged with the node that owns it.
#[derive(Clone, Debug, PartialEq)]
pub struct LeafTarget {
    /// Owning node.
    pub node: NodeId,
    /// World-space leaf geometry.
    pub geometry: Geometry,
}

fn sort_hits(hits: &mut [Intersection]) {
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
}

fn hit_geometry(
    ray: &Ray,
    node: NodeId,
    geometry: &Geometry,
    options: IntersectOptions,
) -> Option<Intersection> {
    if options.use_bounding_box && !ray.hits_box(&geometry.bounding_box()) {
        return None;
    }
    intersect_geometry(ray, geometry, options.culling).map(|h| Intersection {
        distance: h.distance,
        point: h.point,
        normal: h.normal,
        node,
    })
}

/// Nearest hit on one drawable node. Groups and stale ids never hit.
pub fn intersect_object(
    scene: &Scene,
    id: NodeId,
    ray: &Ray,
    options: IntersectOptions,
) -> Option<Intersection> {
    let geometry = scene.world_geometry(id)?;
    hit_geometry(ray, id, &geometry, options)
}

/// Nearest hit per node, over every node in `ids`.
pub fn intersect_objects(
    scene: &Scene,
    ids: &[NodeId],
    ray: &Ray,
    options: IntersectOptions,
) -> Vec<Intersection> {
    let mut hits: Vec<_> = ids
        .iter()
        .filter_map(|id| intersect_object(scene, *id, ray, options))
        .collect();
    if options.sort {
        sort_hits(&mut hits);
    }
    hits
}

/// Object-indexed hierarchy over the world boxes of `ids`.
///
/// The hierarchy is a snapshot; rebuild it after nodes move.
pub fn build_object_bvh(scene: &Scene, ids: &[NodeId], min_num: usize) -> Bvh<f64, NodeId> {
    let targets = ids
        .iter()
        .filter(|id| scene.geometry(**id).is_some())
        .map(|id| (*id, bbox_to_aabb(scene.world_bounds(*id))))
        .collect();
    Bvh::build(targets, min_num)
}

/// Leaf-geometry-indexed hierarchy: every non-group leaf of every node's world
/// geometry becomes its own target.
pub fn build_geometry_bvh(scene: &Scene, ids: &[NodeId], min_num: usize) -> Bvh<f64, LeafTarget> {
    let mut leaves = Vec::new();
    for &node in ids {
        let Some(world) = scene.world_geometry(node) else {
            continue;
        };
        for leaf in world.leaves() {
            leaves.push(LeafTarget {
                node,
                geometry: leaf.clone(),
            });
        }
    }
    Bvh::build_by(leaves, min_num, |t| bbox_to_aabb(t.geometry.bounding_box()))
}

/// Hits on the nodes of an object hierarchy, visiting only boxes the ray may cross.
pub fn intersect_bvh(
    scene: &Scene,
    bvh: &Bvh<f64, NodeId>,
    ray: &Ray,
    options: IntersectOptions,
) -> Vec<Intersection> {
    let mut hits = Vec::new();
    bvh.traverse(
        |n| {
            for (id, _) in n.targets() {
                if let Some(h) = intersect_object(scene, *id, ray, options) {
                    hits.push(h);
                }
            }
        },
        |n| ray.hits_box(&aabb_to_bbox(n.bbox())),
    );
    if options.sort {
        sort_hits(&mut hits);
    }
    hits
}

/// Hits on the leaves of a geometry hierarchy. A node may appear once per leaf hit.
pub fn intersect_geometry_bvh(
    bvh: &Bvh<f64, LeafTarget>,
    ray: &Ray,
    options: IntersectOptions,
) -> Vec<Intersection> {
    let mut hits = Vec::new();
    bvh.traverse(
        |n| {
            for (leaf, _) in n.targets() {
                if let Some(h) = hit_geometry(ray, leaf.node, &leaf.geometry, options) {
                    hits.push(h);
                }
            }
        },
        |n| ray.hits_box(&aabb_to_bbox(n.bbox())),
    );
    if options.sort {
        sort_hits(&mut hits);
    }
    hits
}

/// Debug geometry: one rectangle outline per hierarchy node, in world space.
///
/// Attach it to a stroke-only node to see the hierarchy through the normal drawing path.
pub fn bvh_helper<P>(bvh: &Bvh<f64, P>) -> Geometry {
    let mut rects = Vec::with_capacity(bvh.node_count());
    bvh.traverse_all(|n| {
        let b = aabb_to_bbox(n.bbox());
        if !b.is_empty() {
            rects.push(Geometry::Rect(RectShape::new(
                b.min,
                Size::new(b.width(), b.height()),
            )));
        }
    });
    Geometry::Group(rects)
}
