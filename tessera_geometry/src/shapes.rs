// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parametric shapes that expand into polygons.

use core::f64::consts::{PI, TAU};

use kurbo::{Point, Size, Vec2};

use crate::bbox::BoundingBox;
use crate::line::LineEq;
use crate::polygon::Polygon;

/// Axis-aligned rectangle in local space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RectShape {
    /// Top-left corner.
    pub origin: Point,
    /// Width and height.
    pub size: Size,
    /// Emit vertices counter-clockwise (normals face inward).
    pub ccw: bool,
}

impl RectShape {
    /// Clockwise rectangle.
    pub fn new(origin: Point, size: Size) -> Self {
        Self {
            origin,
            size,
            ccw: false,
        }
    }

    /// Rectangle centered on the local origin.
    pub fn centered(size: Size) -> Self {
        Self::new(Point::new(-size.width / 2.0, -size.height / 2.0), size)
    }

    /// Corner vertices in winding order.
    pub fn to_polygon(&self) -> Polygon {
        let Point { x, y } = self.origin;
        let (w, h) = (self.size.width, self.size.height);
        let mut v = vec![
            Point::new(x, y),
            Point::new(x + w, y),
            Point::new(x + w, y + h),
            Point::new(x, y + h),
        ];
        if self.ccw {
            v.reverse();
        }
        Polygon::new(v, true)
    }

    /// Box spanning the rectangle.
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::new(
            self.origin,
            self.origin + Vec2::new(self.size.width, self.size.height),
        )
    }
}

/// Regular polygon approximating a circle centered on the local origin.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Circle {
    /// Radius.
    pub radius: f64,
    /// Number of polygon vertices.
    pub segments: usize,
    /// Emit vertices counter-clockwise.
    pub ccw: bool,
}

impl Circle {
    /// Segment count used by [`Circle::new`].
    pub const DEFAULT_SEGMENTS: usize = 32;

    /// Clockwise circle with the default segment count.
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            segments: Self::DEFAULT_SEGMENTS,
            ccw: false,
        }
    }

    /// Vertices at equal angular steps starting on the +x axis.
    pub fn to_polygon(&self) -> Polygon {
        let n = self.segments.max(1);
        let mut step = TAU / n as f64;
        if self.ccw {
            step = -step;
        }
        Polygon::new(
            (0..n)
                .map(|i| (Vec2::from_angle(step * i as f64) * self.radius).to_point())
                .collect(),
            true,
        )
    }

    /// Radius-based box, independent of the segment count.
    pub fn bounding_box(&self) -> BoundingBox {
        let r = self.radius.abs();
        BoundingBox::new(Point::new(-r, -r), Point::new(r, r))
    }
}

/// Inner radius of an [`NStar`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum InnerRadius {
    /// Derive from the outer points so the edges line up.
    Auto,
    /// Explicit radius.
    Fixed(f64),
}

/// Star with `count` outer points centered on the local origin.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NStar {
    /// Number of outer points.
    pub count: usize,
    /// Outer radius.
    pub outer_radius: f64,
    /// Inner radius.
    pub inner: InnerRadius,
    /// Emit vertices counter-clockwise.
    pub ccw: bool,
}

impl NStar {
    /// Clockwise star with an automatic inner radius.
    pub fn new(count: usize, outer_radius: f64) -> Self {
        Self {
            count,
            outer_radius,
            inner: InnerRadius::Auto,
            ccw: false,
        }
    }

    /// Resolved inner radius.
    ///
    /// The automatic radius is where the line through outer points 0 and 2 crosses the
    /// line through outer points 1 and 3. Stars with fewer than five points use a third
    /// of the outer radius. If those lines are parallel the radius is zero.
    pub fn inner_radius(&self) -> f64 {
        match self.inner {
            InnerRadius::Fixed(r) => r,
            InnerRadius::Auto if self.count < 5 => self.outer_radius / 3.0,
            InnerRadius::Auto => {
                let space = TAU / self.count as f64;
                let outer = |k: f64| (Vec2::from_angle(space * k) * self.outer_radius).to_point();
                let l0 = LineEq::through(outer(0.0), outer(2.0));
                let l1 = LineEq::through(outer(1.0), outer(3.0));
                l0.intersect(&l1)
                    .map(|p| p.to_vec2().hypot())
                    .unwrap_or(0.0)
            }
        }
    }

    /// Alternating outer and inner vertices.
    pub fn to_polygon(&self) -> Polygon {
        let n = self.count.max(2);
        let sign = if self.ccw { -1.0 } else { 1.0 };
        let space = TAU / n as f64;
        let half = PI / n as f64;
        let inner = self.inner_radius();
        let mut v = Vec::with_capacity(n * 2);
        for i in 0..n {
            let a = space * i as f64;
            v.push((Vec2::from_angle(sign * a) * self.outer_radius).to_point());
            v.push((Vec2::from_angle(sign * (a + half)) * inner).to_point());
        }
        Polygon::new(v, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_winding() {
        let r = RectShape::new(Point::new(1.0, 2.0), Size::new(3.0, 4.0));
        assert_eq!(
            r.to_polygon().vertices(),
            &[
                Point::new(1.0, 2.0),
                Point::new(4.0, 2.0),
                Point::new(4.0, 6.0),
                Point::new(1.0, 6.0)
            ]
        );
        let ccw = RectShape { ccw: true, ..r };
        assert_eq!(
            ccw.to_polygon().vertices(),
            &[
                Point::new(1.0, 6.0),
                Point::new(4.0, 6.0),
                Point::new(4.0, 2.0),
                Point::new(1.0, 2.0)
            ]
        );
        assert_eq!(r.bounding_box(), r.to_polygon().bounding_box());
    }

    #[test]
    fn circle_box_is_radius_based() {
        let c = Circle {
            radius: 10.0,
            segments: 6,
            ccw: false,
        };
        let b = c.bounding_box();
        assert_eq!(b.min, Point::new(-10.0, -10.0));
        assert_eq!(c.to_polygon().len(), 6);
        assert!(c.to_polygon().bounding_box().max.y < b.max.y);
    }

    #[test]
    fn star_auto_inner_radius() {
        let s = NStar::new(5, 10.0);
        // Regular pentagram: inner/outer = cos(72°) / cos(36°).
        let expected = 10.0 * (2.0 * PI / 5.0).cos() / (PI / 5.0).cos();
        assert!((s.inner_radius() - expected).abs() < 1e-9);
        assert_eq!(NStar::new(4, 9.0).inner_radius(), 3.0);
        // A collapsed star has no crossing lines to measure.
        assert_eq!(NStar::new(6, 0.0).inner_radius(), 0.0);
        let fixed = NStar {
            inner: InnerRadius::Fixed(2.0),
            ..s
        };
        assert_eq!(fixed.inner_radius(), 2.0);
        assert_eq!(s.to_polygon().len(), 10);
    }
}
