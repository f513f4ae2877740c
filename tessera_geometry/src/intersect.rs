// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Narrow-phase ray queries against whole geometries.

use kurbo::{Point, Vec2};

use crate::affine::VecExt;
use crate::geometry::{Geometry, Primitive};
use crate::ray::Ray;

/// A ray hit on a geometry outline.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RayHit {
    /// Distance from the ray origin.
    pub distance: f64,
    /// Hit point.
    pub point: Point,
    /// Surface normal: the edge normal, or the unit vector from an arc's center.
    pub normal: Vec2,
}

/// Which faces a ray query reports.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Culling {
    /// Only faces whose normal opposes the ray (entry hits for clockwise outlines).
    #[default]
    BackFace,
    /// Both sides.
    None,
}

fn hit_primitive(ray: &Ray, prim: &Primitive, culling: Culling) -> Option<RayHit> {
    let (point, normal) = match prim {
        Primitive::Segment(seg) => {
            let p = match culling {
                Culling::BackFace => ray.intersect_segment(seg),
                Culling::None => ray.intersect_segment_two_sided(seg),
            }?;
            (p, seg.normal().unwrap_or(Vec2::ZERO))
        }
        Primitive::Arc(arc) => {
            let p = match culling {
                Culling::BackFace => ray.intersect_arc(arc),
                Culling::None => ray.intersect_arc_two_sided(arc),
            }?;
            (p, (p - arc.center).normalized().unwrap_or(Vec2::ZERO))
        }
    };
    Some(RayHit {
        distance: (point - ray.origin).hypot(),
        point,
        normal,
    })
}

/// Nearest hit on the outline of `geometry`.
///
/// Every edge and arc is tested. Among equal distances the first primitive in
/// outline order wins.
pub fn intersect_geometry(ray: &Ray, geometry: &Geometry, culling: Culling) -> Option<RayHit> {
    let mut best: Option<RayHit> = None;
    for prim in geometry.primitives() {
        if let Some(hit) = hit_primitive(ray, &prim, culling) {
            if best.is_none_or(|b| hit.distance < b.distance) {
                best = Some(hit);
            }
        }
    }
    best
}

/// Every hit on the outline of `geometry`, nearest first.
pub fn intersect_geometry_all(ray: &Ray, geometry: &Geometry, culling: Culling) -> Vec<RayHit> {
    let mut hits: Vec<RayHit> = geometry
        .primitives()
        .iter()
        .filter_map(|prim| hit_primitive(ray, prim, culling))
        .collect();
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offset::OffsetPolygon;
    use crate::polygon::Polygon;

    fn unit_square() -> Geometry {
        Polygon::closed([
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ])
        .into()
    }

    #[test]
    fn horizontal_ray_through_unit_square() {
        let sq = unit_square();
        let ray = Ray::new(Point::new(-1.0, 0.5), Vec2::new(1.0, 0.0));

        let both = intersect_geometry_all(&ray, &sq, Culling::None);
        assert_eq!(both.len(), 2, "entry and exit: {both:?}");
        assert_eq!(both[0].point, Point::new(0.0, 0.5));
        assert_eq!(both[1].point, Point::new(1.0, 0.5));

        let nearest = intersect_geometry(&ray, &sq, Culling::None).expect("hit");
        assert_eq!(nearest, both[0]);
        assert_eq!(nearest.distance, 1.0);
        assert_eq!(nearest.normal, Vec2::new(-1.0, 0.0));

        let front = intersect_geometry_all(&ray, &sq, Culling::BackFace);
        assert_eq!(front.len(), 1, "exit is a back face");
        assert_eq!(intersect_geometry(&ray, &sq, Culling::BackFace), Some(nearest));
    }

    #[test]
    fn miss_returns_none() {
        let ray = Ray::new(Point::new(-1.0, 5.0), Vec2::new(1.0, 0.0));
        assert!(intersect_geometry(&ray, &unit_square(), Culling::None).is_none());
        let empty = Geometry::Group(Vec::new());
        assert!(intersect_geometry(&ray, &empty, Culling::None).is_none());
    }

    #[test]
    fn offset_corner_hit_reports_radial_normal() {
        let sq = Polygon::closed([
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ]);
        let g: Geometry = OffsetPolygon::new(sq, 2.0).into();
        // Diagonal ray into the top-left rounded corner.
        let ray = Ray::through(Point::new(-10.0, -10.0), Point::ZERO);
        let hit = intersect_geometry(&ray, &g, Culling::BackFace).expect("corner hit");
        let s = 2.0 / 2.0_f64.sqrt();
        assert!((hit.point - Point::new(-s, -s)).hypot() < 1e-9, "{hit:?}");
        assert!((hit.normal - Vec2::new(-1.0, -1.0) / 2.0_f64.sqrt()).hypot() < 1e-9);
        // The straight top run is hit head-on.
        let down = Ray::new(Point::new(5.0, -10.0), Vec2::new(0.0, 1.0));
        let top = intersect_geometry(&down, &g, Culling::BackFace).expect("top hit");
        assert!((top.point.y + 2.0).abs() < 1e-9);
        assert!((top.distance - 8.0).abs() < 1e-9);
    }
}
