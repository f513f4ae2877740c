// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag math: a drag start/end pair in parent space becomes a new node transform.
//!
//! Every function here is relative to the transform captured when the drag began, so
//! re-applying with a different end point or pivot never accumulates error.

use kurbo::{Point, Vec2};
use tessera_geometry::{Transform, VecExt};

use crate::frame::ControlState;

// Axis components smaller than this cannot produce a stable ratio.
const RATIO_EPSILON: f64 = 1e-9;

/// Inputs for one application of a drag.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragGesture {
    /// Mode selected when the drag began.
    pub state: ControlState,
    /// Transform at drag start.
    pub snapshot: Transform,
    /// Fixed point for scale and rotation, in parent space.
    pub pivot: Point,
    /// Pointer at drag start, in parent space.
    pub start: Point,
    /// Current pointer, in parent space.
    pub end: Point,
}

/// New transform for an unconstrained drag, or `None` when the gesture is degenerate.
pub fn apply(g: &DragGesture) -> Option<Transform> {
    transform(g, None)
}

/// New transform with the shift constraint applied.
///
/// Moves lock to the dominant axis, corner scales become uniform, edge scales apply to
/// both axes, and rotations snap their total angle to multiples of `rotation_snap`.
pub fn apply_constrained(g: &DragGesture, rotation_snap: f64) -> Option<Transform> {
    transform(g, Some(rotation_snap))
}

fn transform(g: &DragGesture, snap: Option<f64>) -> Option<Transform> {
    let constrained = snap.is_some();
    match (g.state, constrained) {
        (ControlState::Move, false) => Some(translated(&g.snapshot, g.end - g.start)),
        (ControlState::Move, true) => Some(translated(&g.snapshot, axis_lock(g.end - g.start))),
        (ControlState::Scale, false) => {
            let (rx, ry) = axis_ratios(g);
            if rx.is_none() && ry.is_none() {
                return None;
            }
            Some(scaled(g, Vec2::new(rx.unwrap_or(1.0), ry.unwrap_or(1.0))))
        }
        (ControlState::Scale, true) => {
            let k = uniform_ratio(g)?;
            Some(scaled(g, Vec2::new(k, k)))
        }
        (ControlState::ScaleX, false) => Some(scaled(g, Vec2::new(axis_ratios(g).0?, 1.0))),
        (ControlState::ScaleX, true) => {
            let r = axis_ratios(g).0?;
            Some(scaled(g, Vec2::new(r, r)))
        }
        (ControlState::ScaleY, false) => Some(scaled(g, Vec2::new(1.0, axis_ratios(g).1?))),
        (ControlState::ScaleY, true) => {
            let r = axis_ratios(g).1?;
            Some(scaled(g, Vec2::new(r, r)))
        }
        (ControlState::Rotate, _) => {
            let mut theta = drag_angle(g)?;
            if let Some(step) = snap.filter(|s| *s > 0.0) {
                let total = g.snapshot.rotation + theta;
                theta = (total / step).round() * step - g.snapshot.rotation;
            }
            Some(rotated(g, theta))
        }
    }
}

fn translated(snapshot: &Transform, delta: Vec2) -> Transform {
    Transform {
        position: snapshot.position + delta,
        ..*snapshot
    }
}

fn axis_lock(d: Vec2) -> Vec2 {
    if d.x.abs() >= d.y.abs() {
        Vec2::new(d.x, 0.0)
    } else {
        Vec2::new(0.0, d.y)
    }
}

/// Start and end offsets from the pivot, expressed along the node's rotated axes.
fn local_offsets(g: &DragGesture) -> (Vec2, Vec2) {
    let rot = g.snapshot.rotation;
    (
        (g.start - g.pivot).rotated(-rot),
        (g.end - g.pivot).rotated(-rot),
    )
}

fn axis_ratios(g: &DragGesture) -> (Option<f64>, Option<f64>) {
    let (s, e) = local_offsets(g);
    let ratio = |s: f64, e: f64| (s.abs() > RATIO_EPSILON).then(|| e / s);
    (ratio(s.x, e.x), ratio(s.y, e.y))
}

fn uniform_ratio(g: &DragGesture) -> Option<f64> {
    let (s, e) = local_offsets(g);
    let len_sq = s.hypot2();
    (len_sq > RATIO_EPSILON).then(|| e.dot(s) / len_sq)
}

fn scaled(g: &DragGesture, ratio: Vec2) -> Transform {
    let snap = &g.snapshot;
    let rot = snap.rotation;
    let offset = (snap.position.to_point() - g.pivot).rotated(-rot);
    let position = g.pivot + offset.mul_components(ratio).rotated(rot);
    Transform {
        position: position.to_vec2(),
        rotation: rot,
        scale: snap.scale.mul_components(ratio),
    }
}

fn drag_angle(g: &DragGesture) -> Option<f64> {
    let s = g.start - g.pivot;
    let e = g.end - g.pivot;
    if s.hypot2() <= RATIO_EPSILON || e.hypot2() <= RATIO_EPSILON {
        return None;
    }
    Some(s.cross(e).atan2(s.dot(e)))
}

fn rotated(g: &DragGesture, theta: f64) -> Transform {
    let snap = &g.snapshot;
    let offset = (snap.position.to_point() - g.pivot).rotated(theta);
    Transform {
        position: (g.pivot + offset).to_vec2(),
        rotation: snap.rotation + theta,
        scale: snap.scale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    fn gesture(state: ControlState, pivot: Point, start: Point, end: Point) -> DragGesture {
        DragGesture {
            state,
            snapshot: Transform::IDENTITY,
            pivot,
            start,
            end,
        }
    }

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).hypot() < 1e-9
    }

    #[test]
    fn move_adds_pointer_delta() {
        let g = gesture(
            ControlState::Move,
            Point::ZERO,
            Point::new(10.0, 10.0),
            Point::new(25.0, 14.0),
        );
        assert_eq!(apply(&g).unwrap().position, Vec2::new(15.0, 4.0));
        assert_eq!(apply_constrained(&g, PI).unwrap().position, Vec2::new(15.0, 0.0));
    }

    #[test]
    fn corner_scale_keeps_pivot_fixed() {
        let g = gesture(
            ControlState::Scale,
            Point::ZERO,
            Point::new(100.0, 50.0),
            Point::new(150.0, 150.0),
        );
        let t = apply(&g).unwrap();
        assert!(close(t.scale, Vec2::new(1.5, 3.0)));
        assert!(close(t.position, Vec2::ZERO));

        let u = apply_constrained(&g, PI).unwrap();
        // (150*100 + 150*50) / (100^2 + 50^2) = 1.8
        assert!(close(u.scale, Vec2::new(1.8, 1.8)));
    }

    #[test]
    fn scale_about_off_origin_pivot_moves_position() {
        let g = gesture(
            ControlState::Scale,
            Point::new(50.0, 25.0),
            Point::new(100.0, 50.0),
            Point::new(150.0, 75.0),
        );
        let t = apply(&g).unwrap();
        assert!(close(t.scale, Vec2::new(2.0, 2.0)));
        assert!(close(t.position, Vec2::new(-50.0, -25.0)));
    }

    #[test]
    fn edge_scales_touch_one_axis_unless_constrained() {
        let g = gesture(
            ControlState::ScaleX,
            Point::new(0.0, 25.0),
            Point::new(100.0, 25.0),
            Point::new(150.0, 40.0),
        );
        let t = apply(&g).unwrap();
        assert!(close(t.scale, Vec2::new(1.5, 1.0)));
        assert!(close(t.position, Vec2::ZERO));

        let u = apply_constrained(&g, PI).unwrap();
        assert!(close(u.scale, Vec2::new(1.5, 1.5)));
        assert!(close(u.position, Vec2::new(0.0, -12.5)));

        // A y-edge drag that starts level with the pivot has no usable ratio.
        let flat = gesture(
            ControlState::ScaleY,
            Point::new(0.0, 25.0),
            Point::new(100.0, 25.0),
            Point::new(100.0, 80.0),
        );
        assert!(apply(&flat).is_none());
    }

    #[test]
    fn scale_follows_node_rotation() {
        let mut g = gesture(
            ControlState::ScaleX,
            Point::ZERO,
            Point::new(0.0, 100.0),
            Point::new(0.0, 200.0),
        );
        g.snapshot.rotation = FRAC_PI_2;
        let t = apply(&g).unwrap();
        assert!(close(t.scale, Vec2::new(2.0, 1.0)));
        assert_eq!(t.rotation, FRAC_PI_2);
    }

    #[test]
    fn rotation_about_pivot() {
        let mut g = gesture(
            ControlState::Rotate,
            Point::new(200.0, 100.0),
            Point::new(270.0, 100.0),
            Point::new(200.0, 170.0),
        );
        g.snapshot.position = Vec2::new(200.0, 100.0);
        let t = apply(&g).unwrap();
        assert!((t.rotation - FRAC_PI_2).abs() < 1e-12);
        assert!(close(t.position, Vec2::new(200.0, 100.0)));

        // Off-center position orbits the pivot.
        g.snapshot.position = Vec2::new(210.0, 100.0);
        let t = apply(&g).unwrap();
        assert!(close(t.position, Vec2::new(200.0, 110.0)));
    }

    #[test]
    fn constrained_rotation_snaps_total_angle() {
        let mut g = gesture(
            ControlState::Rotate,
            Point::ZERO,
            Point::new(10.0, 0.0),
            Point::new(10.0, 9.0),
        );
        g.snapshot.rotation = 0.1;
        let t = apply_constrained(&g, FRAC_PI_4).unwrap();
        // 0.1 + atan(0.9) ≈ 0.83 rounds to π/4.
        assert!((t.rotation - FRAC_PI_4).abs() < 1e-12);
    }

    #[test]
    fn rotation_from_pivot_is_degenerate() {
        let g = gesture(ControlState::Rotate, Point::ZERO, Point::ZERO, Point::new(1.0, 0.0));
        assert!(apply(&g).is_none());
    }
}
