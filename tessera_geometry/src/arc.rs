// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Circular arcs with a winding direction.

use core::f64::consts::{FRAC_PI_2, PI};

use kurbo::{Point, Vec2};

use crate::affine::normalize_angle;
use crate::bbox::BoundingBox;

/// Circular arc between two angles.
///
/// Angles are measured from the +x axis and increase clockwise on a y-down canvas.
/// A clockwise arc sweeps from `start_angle` with increasing angle to `end_angle`; a
/// counter-clockwise arc sweeps with decreasing angle. Clockwise arcs face away from
/// the center, counter-clockwise arcs face toward it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Arc {
    /// Circle center.
    pub center: Point,
    /// Circle radius.
    pub radius: f64,
    /// Start angle in radians, normalized into `[0, 2π)`.
    pub start_angle: f64,
    /// End angle in radians, normalized into `[0, 2π)`.
    pub end_angle: f64,
    /// Winding direction.
    pub ccw: bool,
}

impl Arc {
    /// Create an arc; angles are normalized.
    pub fn new(center: Point, radius: f64, start_angle: f64, end_angle: f64, ccw: bool) -> Self {
        Self {
            center,
            radius,
            start_angle: normalize_angle(start_angle),
            end_angle: normalize_angle(end_angle),
            ccw,
        }
    }

    /// Point on the circle at `angle`.
    pub fn point_at(&self, angle: f64) -> Point {
        self.center + Vec2::from_angle(angle) * self.radius
    }

    /// First endpoint.
    pub fn start_point(&self) -> Point {
        self.point_at(self.start_angle)
    }

    /// Last endpoint.
    pub fn end_point(&self) -> Point {
        self.point_at(self.end_angle)
    }

    /// Signed sweep: positive for clockwise arcs, negative for counter-clockwise.
    pub fn sweep(&self) -> f64 {
        if self.ccw {
            -normalize_angle(self.start_angle - self.end_angle)
        } else {
            normalize_angle(self.end_angle - self.start_angle)
        }
    }

    /// Whether `angle` lies within the swept range, endpoints included.
    pub fn contains_angle(&self, angle: f64) -> bool {
        let a = normalize_angle(angle);
        let (s, e) = (self.start_angle, self.end_angle);
        match (self.ccw, s < e) {
            (false, true) => s <= a && a <= e,
            (false, false) => a <= e || a >= s,
            (true, true) => a <= s || a >= e,
            (true, false) => e <= a && a <= s,
        }
    }

    /// Whether the direction from the center to `p` lies within the swept range.
    pub fn contains_direction_to(&self, p: Point) -> bool {
        self.contains_angle((p - self.center).atan2())
    }

    /// Bounds of the endpoints plus any axis extremes inside the range.
    pub fn bounding_box(&self) -> BoundingBox {
        let mut b = BoundingBox::from_points([self.start_point(), self.end_point()]);
        for axis in [0.0, FRAC_PI_2, PI, 3.0 * FRAC_PI_2] {
            if self.contains_angle(axis) {
                b.expand_point(self.point_at(axis));
            }
        }
        b
    }

    /// As a kurbo arc, for path building.
    pub fn to_kurbo(&self) -> kurbo::Arc {
        kurbo::Arc {
            center: self.center,
            radii: Vec2::new(self.radius, self.radius),
            start_angle: self.start_angle,
            sweep_angle: self.sweep(),
            x_rotation: 0.0,
        }
    }
}
