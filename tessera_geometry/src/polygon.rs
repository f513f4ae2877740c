// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vertex-list polygons.

use std::cell::OnceCell;

use kurbo::{Affine, BezPath, Point, Shape, Vec2};

use crate::bbox::BoundingBox;
use crate::line::Segment;

/// Polygon or polyline given by an explicit vertex list.
///
/// The bounding box is computed on first use and cached until the vertices change.
#[derive(Clone, Debug, Default)]
pub struct Polygon {
    vertices: Vec<Point>,
    closed: bool,
    bbox: OnceCell<BoundingBox>,
}

impl PartialEq for Polygon {
    fn eq(&self, other: &Self) -> bool {
        self.vertices == other.vertices && self.closed == other.closed
    }
}

impl Polygon {
    /// Create a polygon; `closed` adds an edge from the last vertex back to the first.
    pub fn new(vertices: Vec<Point>, closed: bool) -> Self {
        Self {
            vertices,
            closed,
            bbox: OnceCell::new(),
        }
    }

    /// Closed polygon over the given vertices.
    pub fn closed(vertices: impl IntoIterator<Item = Point>) -> Self {
        Self::new(vertices.into_iter().collect(), true)
    }

    /// Vertices in order.
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Replace the vertices.
    pub fn set_vertices(&mut self, vertices: Vec<Point>) {
        self.vertices = vertices;
        self.bbox = OnceCell::new();
    }

    /// Append a vertex.
    pub fn push(&mut self, p: Point) {
        self.vertices.push(p);
        self.bbox = OnceCell::new();
    }

    /// Whether the last vertex connects back to the first.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Open or close the outline.
    pub fn set_closed(&mut self, closed: bool) {
        self.closed = closed;
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// True when there are no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Bounding box of the vertices.
    pub fn bounding_box(&self) -> BoundingBox {
        *self
            .bbox
            .get_or_init(|| BoundingBox::from_points(self.vertices.iter().copied()))
    }

    /// Edges in order, including the closing edge for closed polygons.
    pub fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
        let n = self.vertices.len();
        let count = match (self.closed, n) {
            (_, 0 | 1) => 0,
            (true, _) => n,
            (false, _) => n - 1,
        };
        (0..count).map(move |i| Segment::new(self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Unit normal of each edge, `None` for zero-length edges.
    pub fn normals(&self) -> impl Iterator<Item = Option<Vec2>> + '_ {
        self.edges().map(|e| e.normal())
    }

    /// Outline path.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut it = self.vertices.iter();
        if let Some(first) = it.next() {
            path.move_to(*first);
            for p in it {
                path.line_to(*p);
            }
            if self.closed {
                path.close_path();
            }
        }
        path
    }

    /// Nonzero-winding containment; open outlines are treated as implicitly closed.
    pub fn contains(&self, p: Point) -> bool {
        if self.vertices.len() < 3 || !self.bounding_box().contains(p) {
            return false;
        }
        let mut path = self.to_path();
        if !self.closed {
            path.close_path();
        }
        path.contains(p)
    }

    /// Map every vertex through `affine` in place.
    pub fn apply_transform(&mut self, affine: Affine) {
        for v in &mut self.vertices {
            *v = affine * *v;
        }
        self.bbox = OnceCell::new();
    }

    /// Copy mapped through `affine`.
    #[must_use]
    pub fn transformed(&self, affine: Affine) -> Self {
        Self::new(
            self.vertices.iter().map(|v| affine * *v).collect(),
            self.closed,
        )
    }
}
