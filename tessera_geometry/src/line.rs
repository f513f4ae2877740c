// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Infinite lines in general form and directed segments.

use kurbo::{Line, ParamCurveNearest, Point, Vec2};

use crate::affine::VecExt;

/// Line `a*x + b*y + c = 0`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LineEq {
    /// x coefficient.
    pub a: f64,
    /// y coefficient.
    pub b: f64,
    /// Constant term.
    pub c: f64,
}

impl LineEq {
    /// Line through two points. Coincident points give the degenerate `0 = 0` line.
    pub fn through(p0: Point, p1: Point) -> Self {
        let a = p1.y - p0.y;
        let b = p0.x - p1.x;
        Self {
            a,
            b,
            c: -(a * p0.x + b * p0.y),
        }
    }

    /// Intersection point, `None` when the lines are parallel.
    pub fn intersect(&self, other: &Self) -> Option<Point> {
        let det = self.a * other.b - other.a * self.b;
        if det == 0.0 {
            return None;
        }
        Some(Point::new(
            (self.b * other.c - self.c * other.b) / det,
            (other.a * self.c - self.a * other.c) / det,
        ))
    }
}

/// Directed segment from `start` to `end`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Segment {
    /// First endpoint.
    pub start: Point,
    /// Second endpoint.
    pub end: Point,
}

impl Segment {
    /// Segment between two points.
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// `end - start`.
    pub fn vector(&self) -> Vec2 {
        self.end - self.start
    }

    /// Length.
    pub fn length(&self) -> f64 {
        self.vector().hypot()
    }

    /// Squared length.
    pub fn length_sq(&self) -> f64 {
        self.vector().hypot2()
    }

    /// Unit normal `(dy, -dx)`. Outward for clockwise winding on a y-down canvas.
    ///
    /// `None` for a zero-length segment.
    pub fn normal(&self) -> Option<Vec2> {
        let v = self.vector();
        Vec2::new(v.y, -v.x).normalized()
    }

    /// The supporting line.
    pub fn line(&self) -> LineEq {
        LineEq::through(self.start, self.end)
    }

    /// Point at parameter `t` (0 at start, 1 at end).
    pub fn at(&self, t: f64) -> Point {
        self.start.lerp(self.end, t)
    }

    /// Midpoint.
    pub fn midpoint(&self) -> Point {
        self.start.midpoint(self.end)
    }

    /// Same segment with swapped endpoints.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self::new(self.end, self.start)
    }

    /// Containment test for a point already known to lie on the supporting line.
    pub fn contains_collinear(&self, p: Point) -> bool {
        let len_sq = self.length_sq();
        (p - self.start).hypot2() <= len_sq && (p - self.end).hypot2() <= len_sq
    }

    /// Intersection with another segment.
    ///
    /// A shared endpoint (this start on the other's end, or this end on the other's
    /// start) is returned directly without solving.
    pub fn intersect(&self, other: &Self) -> Option<Point> {
        if self.start == other.end {
            return Some(self.start);
        }
        if self.end == other.start {
            return Some(self.end);
        }
        let p = self.line().intersect(&other.line())?;
        (self.contains_collinear(p) && other.contains_collinear(p)).then_some(p)
    }

    /// Distance from a point to the closest point on the segment.
    pub fn distance_to(&self, p: Point) -> f64 {
        if self.start == self.end {
            return (p - self.start).hypot();
        }
        Line::new(self.start, self.end)
            .nearest(p, 1e-9)
            .distance_sq
            .sqrt()
    }

    /// As a kurbo line.
    pub fn to_line(&self) -> Line {
        Line::new(self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parallel_lines_have_no_intersection() {
        let a = LineEq::through(Point::new(0.0, 0.0), Point::new(1.0, 1.0));
        let b = LineEq::through(Point::new(0.0, 1.0), Point::new(1.0, 2.0));
        assert!(a.intersect(&b).is_none());
        let c = LineEq::through(Point::new(0.0, 2.0), Point::new(2.0, 0.0));
        assert_eq!(a.intersect(&c), Some(Point::new(1.0, 1.0)));
    }

    #[test]
    fn normal_points_left_of_travel_in_y_down() {
        let top = Segment::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        assert_eq!(top.normal(), Some(Vec2::new(0.0, -1.0)));
        let degenerate = Segment::new(Point::new(3.0, 3.0), Point::new(3.0, 3.0));
        assert!(degenerate.normal().is_none());
    }

    #[test]
    fn segment_intersection_respects_extent() {
        let a = Segment::new(Point::new(0.0, 0.0), Point::new(4.0, 4.0));
        let b = Segment::new(Point::new(0.0, 4.0), Point::new(4.0, 0.0));
        assert_eq!(a.intersect(&b), Some(Point::new(2.0, 2.0)));
        let short = Segment::new(Point::new(0.0, 4.0), Point::new(1.0, 3.0));
        assert!(a.intersect(&short).is_none());
    }

    #[test]
    fn shared_endpoints_short_circuit() {
        let a = Segment::new(Point::new(0.0, 0.0), Point::new(5.0, 0.0));
        let b = Segment::new(Point::new(5.0, 0.0), Point::new(10.0, 0.0));
        // Collinear, so the line solve alone would fail.
        assert_eq!(a.intersect(&b), Some(Point::new(5.0, 0.0)));
        assert_eq!(b.intersect(&a), Some(Point::new(5.0, 0.0)));
    }

    #[test]
    fn distance_to_clamps_to_endpoints() {
        let s = Segment::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        assert!((s.distance_to(Point::new(5.0, 3.0)) - 3.0).abs() < 1e-9);
        assert!((s.distance_to(Point::new(13.0, 4.0)) - 5.0).abs() < 1e-9);
    }
}
