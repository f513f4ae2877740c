// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rays and the intersection primitives they support.

use kurbo::{Affine, Point, Vec2};

use crate::affine::{VecExt, transform_vector};
use crate::arc::Arc;
use crate::bbox::BoundingBox;
use crate::line::{LineEq, Segment};

// Relative slack for the slab test.
const BOX_EPSILON: f64 = 1e-9;

/// Half-line from `origin` along a unit `direction`.
///
/// A ray built from a zero direction keeps a zero direction and never hits anything.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    /// Start point.
    pub origin: Point,
    direction: Vec2,
}

impl Ray {
    /// Create a ray; `direction` is normalized.
    pub fn new(origin: Point, direction: Vec2) -> Self {
        Self {
            origin,
            direction: direction.normalized().unwrap_or(Vec2::ZERO),
        }
    }

    /// Ray from `origin` through `target`.
    pub fn through(origin: Point, target: Point) -> Self {
        Self::new(origin, target - origin)
    }

    /// Unit direction.
    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    /// Replace the direction; it is normalized.
    pub fn set_direction(&mut self, direction: Vec2) {
        self.direction = direction.normalized().unwrap_or(Vec2::ZERO);
    }

    /// Point at distance `t` along the ray.
    pub fn at(&self, t: f64) -> Point {
        self.origin + self.direction * t
    }

    /// Aim the ray at `target`, keeping its origin.
    pub fn look_at(&mut self, target: Point) {
        self.set_direction(target - self.origin);
    }

    /// Move the origin `t` units along the ray.
    pub fn slide(&mut self, t: f64) {
        self.origin = self.at(t);
    }

    /// Signed distance along the ray to the foot of the perpendicular from `p`.
    pub fn project_distance(&self, p: Point) -> f64 {
        (p - self.origin).dot(self.direction)
    }

    /// Foot of the perpendicular from `p`, or `None` when it lies behind the origin.
    pub fn project_point(&self, p: Point) -> Option<Point> {
        let t = self.project_distance(p);
        (t >= 0.0).then(|| self.at(t))
    }

    /// Squared distance from `p` to the closest point on the ray.
    pub fn distance_sq_to_point(&self, p: Point) -> f64 {
        match self.project_point(p) {
            Some(foot) => (p - foot).hypot2(),
            None => (p - self.origin).hypot2(),
        }
    }

    /// Bounce: a ray starting at `point` with the direction mirrored about `normal`.
    #[must_use]
    pub fn reflect(&self, point: Point, normal: Vec2) -> Self {
        let n = normal.normalized().unwrap_or(Vec2::ZERO);
        let d = self.direction;
        Self::new(point, d - n * (2.0 * d.dot(n)))
    }

    /// Ray mapped through `affine`; the direction is renormalized.
    #[must_use]
    pub fn transformed(&self, affine: Affine) -> Self {
        Self::new(affine * self.origin, transform_vector(affine, self.direction))
    }

    /// Same origin, opposite direction.
    #[must_use]
    pub fn inverted(&self) -> Self {
        Self {
            origin: self.origin,
            direction: -self.direction,
        }
    }

    /// Intersection with an infinite line, `None` if parallel or behind the origin.
    pub fn intersect_line(&self, line: &LineEq) -> Option<Point> {
        let own = LineEq::through(self.origin, self.origin + self.direction);
        let p = own.intersect(line)?;
        ((p - self.origin).dot(self.direction) >= 0.0).then_some(p)
    }

    /// Intersection with the front face of a segment.
    ///
    /// Hits from the side the segment normal points away from are rejected.
    pub fn intersect_segment(&self, seg: &Segment) -> Option<Point> {
        if seg.vector().cross(self.direction) < 0.0 {
            return None;
        }
        self.intersect_segment_two_sided(seg)
    }

    /// Intersection with a segment from either side.
    pub fn intersect_segment_two_sided(&self, seg: &Segment) -> Option<Point> {
        let p = self.intersect_line(&seg.line())?;
        seg.contains_collinear(p).then_some(p)
    }

    /// Intersection with the facing side of an arc.
    ///
    /// Clockwise arcs face outward and are only hit from outside the circle;
    /// counter-clockwise arcs face inward. At most one point is returned.
    pub fn intersect_arc(&self, arc: &Arc) -> Option<Point> {
        let c = arc.center;
        let r_sq = arc.radius * arc.radius;
        if (c - self.origin).hypot2() < r_sq {
            if !arc.ccw {
                return None;
            }
            let foot = self.at(self.project_distance(c));
            let b_sq = (foot - c).hypot2();
            let exit = foot + self.direction * (r_sq - b_sq).max(0.0).sqrt();
            return arc.contains_direction_to(exit).then_some(exit);
        }

        let foot = self.project_point(c)?;
        let b_sq = (foot - c).hypot2();
        if b_sq > r_sq {
            return None;
        }
        if b_sq == r_sq {
            return arc.contains_direction_to(foot).then_some(foot);
        }
        let d = (r_sq - b_sq).sqrt();
        let facing = if arc.ccw { -1.0 } else { 1.0 };
        [foot + self.direction * d, foot - self.direction * d]
            .into_iter()
            .find(|&p| {
                arc.contains_direction_to(p) && (c - p).dot(self.direction) * facing > 0.0
            })
    }

    /// Nearest intersection with an arc from either side.
    pub fn intersect_arc_two_sided(&self, arc: &Arc) -> Option<Point> {
        let c = arc.center;
        let r_sq = arc.radius * arc.radius;
        let t = self.project_distance(c);
        let foot = self.at(t);
        let b_sq = (foot - c).hypot2();
        if b_sq > r_sq {
            return None;
        }
        let d = (r_sq - b_sq).sqrt();
        [t - d, t + d]
            .into_iter()
            .filter(|&s| s >= 0.0)
            .map(|s| self.at(s))
            .find(|&p| arc.contains_direction_to(p))
    }

    /// Conservative broad-phase test against a box.
    ///
    /// Axis-aligned rays use a direct interval check. Other rays intersect their line
    /// with the four edge lines and compare the two resulting parameter intervals.
    /// Boundaries count as inside: rays along an edge, through a corner, or across a
    /// zero-width box pass. A `true` result only means the box may be hit.
    pub fn hits_box(&self, bbox: &BoundingBox) -> bool {
        if bbox.is_empty() {
            return false;
        }
        let (o, v) = (self.origin, self.direction);
        let (min, max) = (bbox.min, bbox.max);
        if v.x == 0.0 && v.y == 0.0 {
            return false;
        }
        if v.y == 0.0 {
            return o.y >= min.y
                && o.y <= max.y
                && ((min.x - o.x) * v.x >= 0.0 || (max.x - o.x) * v.x >= 0.0);
        }
        if v.x == 0.0 {
            return o.x >= min.x
                && o.x <= max.x
                && ((min.y - o.y) * v.y >= 0.0 || (max.y - o.y) * v.y >= 0.0);
        }

        let k = v.y / v.x;
        let b = o.y - k * o.x;
        let t_of = |p: Point| (p - o).dot(v);
        let ta0 = t_of(Point::new(min.x, k * min.x + b));
        let ta1 = t_of(Point::new(max.x, k * max.x + b));
        let tb0 = t_of(Point::new((min.y - b) / k, min.y));
        let tb1 = t_of(Point::new((max.y - b) / k, max.y));
        let lo = ta0.min(ta1).max(tb0.min(tb1));
        let hi = ta0.max(ta1).min(tb0.max(tb1));
        // Touching an edge or corner makes the interval a single point; allow rounding.
        let eps = BOX_EPSILON * (1.0 + lo.abs().max(hi.abs()));
        lo <= hi + eps && hi >= -eps
    }
}
