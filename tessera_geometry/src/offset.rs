// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Polygons offset along their edge normals with rounded corners.

use std::cell::OnceCell;

use kurbo::{Affine, BezPath, Point, Shape, Vec2};

use crate::arc::Arc;
use crate::bbox::BoundingBox;
use crate::line::Segment;
use crate::polygon::Polygon;

/// One corner of an offset outline.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum CornerElement {
    /// The two offset edges meet at a single point.
    Point(Point),
    /// The offset edges do not meet; the corner is rounded about the source vertex.
    Arc(Arc),
}

impl CornerElement {
    /// Where the outline enters this corner.
    pub fn first(&self) -> Point {
        match self {
            Self::Point(p) => *p,
            Self::Arc(a) => a.start_point(),
        }
    }

    /// Where the outline leaves this corner.
    pub fn last(&self) -> Point {
        match self {
            Self::Point(p) => *p,
            Self::Arc(a) => a.end_point(),
        }
    }
}

/// Closed outline derived from a target polygon by moving each edge along its normal.
///
/// Positive distances move edges along the normal `(dy, -dx)`, which is outward for
/// clockwise polygons on a y-down canvas. Where two neighbouring offset edges cross,
/// the corner is their intersection point; otherwise it is an arc of radius
/// `|distance|` centered on the source vertex. Arcs wind counter-clockwise when the
/// distance is negative.
///
/// Consecutive coincident vertices are merged before offsetting, so zero-length edges
/// never contribute a normal.
#[derive(Clone, Debug)]
pub struct OffsetPolygon {
    target: Polygon,
    distance: f64,
    corners: OnceCell<Vec<CornerElement>>,
    bbox: OnceCell<BoundingBox>,
}

impl PartialEq for OffsetPolygon {
    fn eq(&self, other: &Self) -> bool {
        self.target == other.target && self.distance == other.distance
    }
}

impl OffsetPolygon {
    /// Offset `target` by `distance`.
    pub fn new(target: Polygon, distance: f64) -> Self {
        Self {
            target,
            distance,
            corners: OnceCell::new(),
            bbox: OnceCell::new(),
        }
    }

    /// Source polygon.
    pub fn target(&self) -> &Polygon {
        &self.target
    }

    /// Replace the source polygon.
    pub fn set_target(&mut self, target: Polygon) {
        self.target = target;
        self.invalidate();
    }

    /// Signed offset distance.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Change the offset distance.
    pub fn set_distance(&mut self, distance: f64) {
        self.distance = distance;
        self.invalidate();
    }

    fn invalidate(&mut self) {
        self.corners = OnceCell::new();
        self.bbox = OnceCell::new();
    }

    /// One element per distinct source vertex, in order.
    pub fn corners(&self) -> &[CornerElement] {
        self.corners
            .get_or_init(|| offset_corners(self.target.vertices(), self.distance))
    }

    /// Straight runs between consecutive corners, including the closing run.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        let c = self.corners();
        let n = c.len();
        let count = if n < 2 { 0 } else { n };
        (0..count)
            .map(move |k| Segment::new(c[k].last(), c[(k + 1) % n].first()))
            .filter(|s| s.start != s.end)
    }

    /// Rounded corners.
    pub fn arcs(&self) -> impl Iterator<Item = &Arc> + '_ {
        self.corners().iter().filter_map(|c| match c {
            CornerElement::Arc(a) => Some(a),
            CornerElement::Point(_) => None,
        })
    }

    /// Bounds of every corner, arcs included.
    pub fn bounding_box(&self) -> BoundingBox {
        *self.bbox.get_or_init(|| {
            let mut b = BoundingBox::EMPTY;
            for c in self.corners() {
                match c {
                    CornerElement::Point(p) => b.expand_point(*p),
                    CornerElement::Arc(a) => b.expand_box(&a.bounding_box()),
                }
            }
            b
        })
    }

    /// Closed outline path.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        for (i, c) in self.corners().iter().enumerate() {
            let first = c.first();
            if i == 0 {
                path.move_to(first);
            } else {
                path.line_to(first);
            }
            if let CornerElement::Arc(a) = c {
                path.extend(a.to_kurbo().append_iter(0.1));
            }
        }
        if !path.elements().is_empty() {
            path.close_path();
        }
        path
    }

    /// Nonzero-winding containment.
    pub fn contains(&self, p: Point) -> bool {
        self.bounding_box().contains(p) && self.to_path().contains(p)
    }

    /// Map the source polygon through `affine` in place.
    ///
    /// The distance is scaled by the square root of the determinant's magnitude, which
    /// is exact for uniform scales.
    pub fn apply_transform(&mut self, affine: Affine) {
        self.target.apply_transform(affine);
        self.distance *= affine.determinant().abs().sqrt();
        self.invalidate();
    }

    /// Copy mapped through `affine`. See [`OffsetPolygon::apply_transform`].
    #[must_use]
    pub fn transformed(&self, affine: Affine) -> Self {
        Self::new(
            self.target.transformed(affine),
            self.distance * affine.determinant().abs().sqrt(),
        )
    }
}

fn offset_corners(vertices: &[Point], distance: f64) -> Vec<CornerElement> {
    let mut verts: Vec<Point> = Vec::with_capacity(vertices.len());
    for &v in vertices {
        if verts.last() != Some(&v) {
            verts.push(v);
        }
    }
    while verts.len() > 1 && verts.first() == verts.last() {
        verts.pop();
    }
    let n = verts.len();
    if n < 2 {
        return verts.into_iter().map(CornerElement::Point).collect();
    }

    let offsets: Vec<Segment> = (0..n)
        .map(|i| {
            let edge = Segment::new(verts[i], verts[(i + 1) % n]);
            let shift = edge.normal().unwrap_or(Vec2::ZERO) * distance;
            Segment::new(edge.start + shift, edge.end + shift)
        })
        .collect();

    let corners: Vec<CornerElement> = (0..n)
        .map(|i| {
            let incoming = offsets[(i + n - 1) % n];
            let outgoing = offsets[i];
            match incoming.intersect(&outgoing) {
                Some(p) => CornerElement::Point(p),
                None => {
                    let v = verts[i];
                    CornerElement::Arc(Arc::new(
                        v,
                        distance.abs(),
                        (incoming.end - v).atan2(),
                        (outgoing.start - v).atan2(),
                        distance < 0.0,
                    ))
                }
            }
        })
        .collect();
    tracing::trace!(
        vertices = n,
        arcs = corners
            .iter()
            .filter(|c| matches!(c, CornerElement::Arc(_)))
            .count(),
        distance,
        "offset corners"
    );
    corners
}
