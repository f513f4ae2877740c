// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned bounding boxes in a given coordinate space.

use kurbo::{Affine, Point, Rect};

/// Axis-aligned bounding box.
///
/// The empty box has `min = (+inf, +inf)` and `max = (-inf, -inf)`, so expanding it
/// by points or boxes is a plain union and expanding twice by the same input is a no-op.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner.
    pub min: Point,
    /// Maximum corner.
    pub max: Point,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl BoundingBox {
    /// The empty box.
    pub const EMPTY: Self = Self {
        min: Point::new(f64::INFINITY, f64::INFINITY),
        max: Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
    };

    /// Box spanning two corners, in any order.
    pub fn new(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Smallest box containing every point.
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Self {
        let mut b = Self::EMPTY;
        for p in points {
            b.expand_point(p);
        }
        b
    }

    /// Box covering a kurbo rectangle.
    pub fn from_rect(rect: Rect) -> Self {
        Self::new(Point::new(rect.x0, rect.y0), Point::new(rect.x1, rect.y1))
    }

    /// Grow to include a point.
    pub fn expand_point(&mut self, p: Point) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    /// Grow to include another box.
    pub fn expand_box(&mut self, other: &Self) {
        if other.is_empty() {
            return;
        }
        self.expand_point(other.min);
        self.expand_point(other.max);
    }

    /// Union of two boxes.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut b = *self;
        b.expand_box(other);
        b
    }

    /// Grow every side by `d` (shrink when negative).
    #[must_use]
    pub fn inflate(&self, d: f64) -> Self {
        if self.is_empty() {
            return *self;
        }
        Self {
            min: Point::new(self.min.x - d, self.min.y - d),
            max: Point::new(self.max.x + d, self.max.y + d),
        }
    }

    /// True when the box contains no point.
    pub fn is_empty(&self) -> bool {
        !(self.min.x <= self.max.x && self.min.y <= self.max.y)
    }

    /// Width, zero when empty.
    pub fn width(&self) -> f64 {
        if self.is_empty() { 0.0 } else { self.max.x - self.min.x }
    }

    /// Height, zero when empty.
    pub fn height(&self) -> f64 {
        if self.is_empty() { 0.0 } else { self.max.y - self.min.y }
    }

    /// Center point. Not meaningful for the empty box.
    pub fn center(&self) -> Point {
        self.min.midpoint(self.max)
    }

    /// Corners in clockwise order on a y-down canvas, starting at `min`.
    pub fn corners(&self) -> [Point; 4] {
        [
            self.min,
            Point::new(self.max.x, self.min.y),
            self.max,
            Point::new(self.min.x, self.max.y),
        ]
    }

    /// Inclusive point containment.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// True when the boxes share at least one point.
    pub fn intersects(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    /// Box of the four transformed corners.
    ///
    /// Conservative for rotations: the result bounds the transformed box, not the
    /// transformed contents.
    #[must_use]
    pub fn transformed(&self, affine: Affine) -> Self {
        if self.is_empty() {
            return *self;
        }
        Self::from_points(self.corners().map(|p| affine * p))
    }

    /// The kurbo rectangle, or `None` for the empty box.
    pub fn to_rect(&self) -> Option<Rect> {
        (!self.is_empty()).then(|| Rect::from_points(self.min, self.max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::FRAC_PI_4;

    #[test]
    fn expansion_is_idempotent_union() {
        let mut b = BoundingBox::EMPTY;
        assert!(b.is_empty());
        assert!(b.to_rect().is_none());
        b.expand_point(Point::new(1.0, 2.0));
        b.expand_point(Point::new(-3.0, 5.0));
        let once = b;
        b.expand_point(Point::new(-3.0, 5.0));
        b.expand_box(&once);
        assert_eq!(b, once);
        assert_eq!(b, BoundingBox::new(Point::new(-3.0, 2.0), Point::new(1.0, 5.0)));
        assert_eq!(BoundingBox::EMPTY.union(&b), b);
    }

    #[test]
    fn single_point_box_is_not_empty() {
        let b = BoundingBox::from_points([Point::new(4.0, 4.0)]);
        assert!(!b.is_empty());
        assert!(b.contains(Point::new(4.0, 4.0)));
        assert_eq!(b.width(), 0.0);
    }

    #[test]
    fn transformed_bounds_rotated_corners() {
        let b = BoundingBox::new(Point::new(-1.0, -1.0), Point::new(1.0, 1.0));
        let r = b.transformed(Affine::rotate(FRAC_PI_4));
        let h = 2.0_f64.sqrt();
        assert!((r.max.x - h).abs() < 1e-12 && (r.min.y + h).abs() < 1e-12);
        assert!(BoundingBox::EMPTY.transformed(Affine::rotate(1.0)).is_empty());
    }

    #[test]
    fn intersects_includes_touching_edges() {
        let a = BoundingBox::new(Point::ZERO, Point::new(10.0, 10.0));
        let b = BoundingBox::new(Point::new(10.0, 0.0), Point::new(20.0, 5.0));
        let c = BoundingBox::new(Point::new(11.0, 0.0), Point::new(20.0, 5.0));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert!(!a.intersects(&BoundingBox::EMPTY));
        assert_eq!(a.inflate(2.0).min, Point::new(-2.0, -2.0));
    }
}
