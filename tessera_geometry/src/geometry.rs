// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The closed set of geometry kinds a scene node can own.

use kurbo::{Affine, BezPath, Point, Shape};

use crate::arc::Arc;
use crate::bbox::BoundingBox;
use crate::line::Segment;
use crate::offset::{CornerElement, OffsetPolygon};
use crate::polygon::Polygon;
use crate::shapes::{Circle, NStar, RectShape};

/// Geometry owned by a scene node.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    /// Explicit vertex list.
    Polygon(Polygon),
    /// Axis-aligned rectangle.
    Rect(RectShape),
    /// Circle approximated by a regular polygon.
    Circle(Circle),
    /// N-pointed star.
    Star(NStar),
    /// Offset outline of a polygon.
    Offset(OffsetPolygon),
    /// Several geometries sharing one node.
    Group(Vec<Geometry>),
}

/// An edge or arc of a geometry outline.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Primitive {
    /// Straight directed edge.
    Segment(Segment),
    /// Rounded corner.
    Arc(Arc),
}

impl Geometry {
    /// Bounding box in the geometry's own space.
    pub fn bounding_box(&self) -> BoundingBox {
        match self {
            Self::Polygon(p) => p.bounding_box(),
            Self::Rect(r) => r.bounding_box(),
            Self::Circle(c) => c.bounding_box(),
            Self::Star(s) => s.to_polygon().bounding_box(),
            Self::Offset(o) => o.bounding_box(),
            Self::Group(g) => g
                .iter()
                .fold(BoundingBox::EMPTY, |acc, c| acc.union(&c.bounding_box())),
        }
    }

    /// The vertex polygon, for the kinds that have one.
    pub fn to_polygon(&self) -> Option<Polygon> {
        match self {
            Self::Polygon(p) => Some(p.clone()),
            Self::Rect(r) => Some(r.to_polygon()),
            Self::Circle(c) => Some(c.to_polygon()),
            Self::Star(s) => Some(s.to_polygon()),
            Self::Offset(_) | Self::Group(_) => None,
        }
    }

    /// Outline path; groups concatenate their members' subpaths.
    pub fn to_path(&self) -> BezPath {
        match self {
            Self::Offset(o) => o.to_path(),
            Self::Group(g) => {
                let mut path = BezPath::new();
                for c in g {
                    path.extend(c.to_path().elements().iter().copied());
                }
                path
            }
            _ => self.to_polygon().map(|p| p.to_path()).unwrap_or_default(),
        }
    }

    /// Nonzero-winding point containment.
    pub fn contains(&self, p: Point) -> bool {
        match self {
            Self::Polygon(poly) => poly.contains(p),
            Self::Offset(o) => o.contains(p),
            Self::Group(g) => g.iter().any(|c| c.contains(p)),
            _ => self.bounding_box().contains(p) && self.to_path().contains(p),
        }
    }

    /// Copy mapped through `affine`.
    ///
    /// Parametric shapes become polygons, since a rotated rectangle or a sheared
    /// circle is no longer expressible in their parameters.
    #[must_use]
    pub fn transformed(&self, affine: Affine) -> Self {
        match self {
            Self::Offset(o) => Self::Offset(o.transformed(affine)),
            Self::Group(g) => Self::Group(g.iter().map(|c| c.transformed(affine)).collect()),
            _ => Self::Polygon(
                self.to_polygon()
                    .map(|p| p.transformed(affine))
                    .unwrap_or_default(),
            ),
        }
    }

    /// Map through `affine` in place. See [`Geometry::transformed`].
    pub fn apply_transform(&mut self, affine: Affine) {
        match self {
            Self::Polygon(p) => p.apply_transform(affine),
            Self::Offset(o) => o.apply_transform(affine),
            Self::Group(g) => {
                for c in g {
                    c.apply_transform(affine);
                }
            }
            _ => *self = self.transformed(affine),
        }
    }

    /// Non-group geometries, depth-first.
    pub fn leaves(&self) -> Vec<&Self> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Self>) {
        match self {
            Self::Group(g) => {
                for c in g {
                    c.collect_leaves(out);
                }
            }
            _ => out.push(self),
        }
    }

    /// Every outline edge and arc, in outline order.
    pub fn primitives(&self) -> Vec<Primitive> {
        let mut out = Vec::new();
        self.collect_primitives(&mut out);
        out
    }

    fn collect_primitives(&self, out: &mut Vec<Primitive>) {
        match self {
            Self::Polygon(p) => out.extend(p.edges().map(Primitive::Segment)),
            Self::Offset(o) => {
                let corners = o.corners();
                let n = corners.len();
                for (k, c) in corners.iter().enumerate() {
                    if let CornerElement::Arc(a) = c {
                        out.push(Primitive::Arc(*a));
                    }
                    if n > 1 {
                        let s = Segment::new(c.last(), corners[(k + 1) % n].first());
                        if s.start != s.end {
                            out.push(Primitive::Segment(s));
                        }
                    }
                }
            }
            Self::Group(g) => {
                for c in g {
                    c.collect_primitives(out);
                }
            }
            _ => {
                if let Some(p) = self.to_polygon() {
                    out.extend(p.edges().map(Primitive::Segment));
                }
            }
        }
    }
}

impl From<Polygon> for Geometry {
    fn from(p: Polygon) -> Self {
        Self::Polygon(p)
    }
}

impl From<RectShape> for Geometry {
    fn from(r: RectShape) -> Self {
        Self::Rect(r)
    }
}

impl From<Circle> for Geometry {
    fn from(c: Circle) -> Self {
        Self::Circle(c)
    }
}

impl From<NStar> for Geometry {
    fn from(s: NStar) -> Self {
        Self::Star(s)
    }
}

impl From<OffsetPolygon> for Geometry {
    fn from(o: OffsetPolygon) -> Self {
        Self::Offset(o)
    }
}
