// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Control frame: eight handles around a node's local bounds.
//!
//! Handles are numbered clockwise from the top-left corner:
//!
//! ```text
//! 0 --- 1 --- 2
//! |           |
//! 7     c     3
//! |           |
//! 6 --- 5 --- 4
//! ```
//!
//! Even indices are corners, odd indices are edge midpoints. The opposite of handle `h`
//! is `(h + 4) % 8`.

use kurbo::{Affine, BezPath, Point, Rect, Shape};
use tessera_geometry::{BoundingBox, Polygon, Segment};
use tessera_scene::{NodeId, Scene, Surface};

use crate::config::ControllerConfig;

/// Drag mode selected by a frame hit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ControlState {
    /// Scale both axes from a corner.
    Scale,
    /// Scale the node's x axis from the left or right edge.
    ScaleX,
    /// Scale the node's y axis from the top or bottom edge.
    ScaleY,
    /// Translate.
    Move,
    /// Rotate about the center.
    Rotate,
}

/// Result of [`ControlFrame::hit_test`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FrameHit {
    /// Mode a drag from here would use.
    pub state: ControlState,
    /// Handle index for scale modes.
    pub handle: Option<usize>,
}

/// Index of the handle across the frame from `handle`.
pub const fn opposite_handle(handle: usize) -> usize {
    (handle + 4) % 8
}

// (from, to, state, handle) per edge, in hit-test order.
const EDGES: [(usize, usize, ControlState, usize); 4] = [
    (0, 2, ControlState::ScaleY, 1),
    (4, 6, ControlState::ScaleY, 5),
    (6, 0, ControlState::ScaleX, 7),
    (2, 4, ControlState::ScaleX, 3),
];

/// Handles of a node's local bounds, mapped into query space.
#[derive(Clone, Debug, PartialEq)]
pub struct ControlFrame {
    local: [Point; 8],
    points: [Point; 8],
    handle_radius: f64,
}

impl ControlFrame {
    /// Frame around `bounds` (node-local) viewed through `view`. `None` for empty bounds.
    pub fn new(bounds: BoundingBox, view: Affine, config: &ControllerConfig) -> Option<Self> {
        let r = bounds.to_rect()?;
        let (xm, ym) = ((r.x0 + r.x1) / 2.0, (r.y0 + r.y1) / 2.0);
        let local = [
            Point::new(r.x0, r.y0),
            Point::new(xm, r.y0),
            Point::new(r.x1, r.y0),
            Point::new(r.x1, ym),
            Point::new(r.x1, r.y1),
            Point::new(xm, r.y1),
            Point::new(r.x0, r.y1),
            Point::new(r.x0, ym),
        ];
        let points = local.map(|p| view * p);
        let diag = (points[0] - points[4]).hypot();
        let handle_radius = config
            .max_handle_radius
            .min(diag / config.handle_radius_divisor);
        Some(Self {
            local,
            points,
            handle_radius,
        })
    }

    /// Frame for a scene node using its local bounds and view matrix.
    pub fn for_node(scene: &Scene, id: NodeId, config: &ControllerConfig) -> Option<Self> {
        Self::new(scene.local_bounds(id), scene.view_matrix(id)?, config)
    }

    /// Handle `i` in node-local space.
    pub fn local_handle(&self, i: usize) -> Point {
        self.local[i % 8]
    }

    /// Handle `i` in query space.
    pub fn handle(&self, i: usize) -> Point {
        self.points[i % 8]
    }

    /// All handles in query space.
    pub fn handles(&self) -> &[Point; 8] {
        &self.points
    }

    /// Center in node-local space.
    pub fn local_center(&self) -> Point {
        self.local[0].midpoint(self.local[4])
    }

    /// Center in query space.
    pub fn center(&self) -> Point {
        self.points[0].midpoint(self.points[4])
    }

    /// Hit radius for handles.
    pub fn handle_radius(&self) -> f64 {
        self.handle_radius
    }

    /// Frame outline through the four corners, in query space.
    pub fn outline(&self) -> Polygon {
        Polygon::closed([0, 2, 4, 6].map(|i| self.points[i]))
    }

    fn edge(&self, a: usize, b: usize) -> Segment {
        Segment::new(self.points[a], self.points[b])
    }

    /// Which drag mode starts at `p`.
    ///
    /// Corners are tested first (within the handle radius), then the top and bottom edges,
    /// then the left and right edges (within half the handle radius), then the interior,
    /// then a band of `rotate_band_width` centered on the outline.
    pub fn hit_test(&self, p: Point, config: &ControllerConfig) -> Option<FrameHit> {
        let r = self.handle_radius;
        for i in [0, 2, 4, 6] {
            if (p - self.points[i]).hypot() < r {
                return Some(FrameHit {
                    state: ControlState::Scale,
                    handle: Some(i),
                });
            }
        }
        for (a, b, state, handle) in EDGES {
            if self.edge(a, b).distance_to(p) <= r / 2.0 {
                return Some(FrameHit {
                    state,
                    handle: Some(handle),
                });
            }
        }
        if self.outline().contains(p) {
            return Some(FrameHit {
                state: ControlState::Move,
                handle: None,
            });
        }
        let band = config.rotate_band_width / 2.0;
        let near_outline = EDGES
            .iter()
            .any(|&(a, b, _, _)| self.edge(a, b).distance_to(p) <= band);
        near_outline.then_some(FrameHit {
            state: ControlState::Rotate,
            handle: None,
        })
    }

    /// Paint the outline, handle squares, and center dot in query space.
    pub fn draw(&self, surface: &mut impl Surface, config: &ControllerConfig) {
        let style = config.frame_style;
        surface.save();
        surface.set_transform(Affine::IDENTITY);
        surface.stroke(&self.outline().to_path(), style.stroke, style.line_width);
        let half = config.handle_size / 2.0;
        for p in self.points {
            let square: BezPath = Rect::new(p.x - half, p.y - half, p.x + half, p.y + half)
                .to_path(0.1);
            surface.fill(&square, style.fill);
            surface.stroke(&square, style.stroke, style.line_width);
        }
        let dot = kurbo::Circle::new(self.center(), config.center_radius).to_path(0.1);
        surface.fill(&dot, style.stroke);
        surface.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Vec2;
    use tessera_scene::Recorder;

    fn frame() -> ControlFrame {
        let b = BoundingBox::new(Point::new(0.0, 0.0), Point::new(100.0, 50.0));
        ControlFrame::new(b, Affine::IDENTITY, &ControllerConfig::default()).unwrap()
    }

    fn hit(p: Point) -> Option<FrameHit> {
        frame().hit_test(p, &ControllerConfig::default())
    }

    #[test]
    fn handles_follow_ring_order() {
        let f = frame();
        assert_eq!(f.handle(1), Point::new(50.0, 0.0));
        assert_eq!(f.handle(3), Point::new(100.0, 25.0));
        assert_eq!(f.handle(7), Point::new(0.0, 25.0));
        assert_eq!(f.center(), Point::new(50.0, 25.0));
        assert_eq!(opposite_handle(1), 5);
        assert_eq!(opposite_handle(6), 2);
        // Diagonal is ~111.8, so the cap applies.
        assert_eq!(f.handle_radius(), 24.0);
    }

    #[test]
    fn small_frames_shrink_the_handle_radius() {
        let b = BoundingBox::new(Point::ZERO, Point::new(30.0, 40.0));
        let f = ControlFrame::new(b, Affine::IDENTITY, &ControllerConfig::default()).unwrap();
        assert!((f.handle_radius() - 50.0 / 3.0).abs() < 1e-12);
        let empty = ControlFrame::new(
            BoundingBox::EMPTY,
            Affine::IDENTITY,
            &ControllerConfig::default(),
        );
        assert!(empty.is_none());
    }

    #[test]
    fn hit_test_priorities() {
        let corner = hit(Point::new(104.0, 53.0)).unwrap();
        assert_eq!(corner.state, ControlState::Scale);
        assert_eq!(corner.handle, Some(4));

        let right = hit(Point::new(105.0, 25.0)).unwrap();
        assert_eq!((right.state, right.handle), (ControlState::ScaleX, Some(3)));
        let top = hit(Point::new(50.0, -6.0)).unwrap();
        assert_eq!((top.state, top.handle), (ControlState::ScaleY, Some(1)));
        let bottom = hit(Point::new(50.0, 55.0)).unwrap();
        assert_eq!(bottom.handle, Some(5));

        assert_eq!(hit(Point::new(40.0, 20.0)).unwrap().state, ControlState::Move);
        assert_eq!(hit(Point::new(135.0, 25.0)).unwrap().state, ControlState::Rotate);
        assert!(hit(Point::new(150.0, 25.0)).is_none());
    }

    #[test]
    fn frame_follows_view_matrix() {
        let b = BoundingBox::new(Point::new(-10.0, -10.0), Point::new(10.0, 10.0));
        let view = Affine::translate(Vec2::new(100.0, 100.0)) * Affine::scale(2.0);
        let f = ControlFrame::new(b, view, &ControllerConfig::default()).unwrap();
        assert_eq!(f.handle(0), Point::new(80.0, 80.0));
        assert_eq!(f.local_handle(0), Point::new(-10.0, -10.0));
        assert_eq!(f.center(), Point::new(100.0, 100.0));
        assert_eq!(f.local_center(), Point::ZERO);
    }

    #[test]
    fn draw_emits_outline_handles_and_dot() {
        let mut rec = Recorder::default();
        frame().draw(&mut rec, &ControllerConfig::default());
        // Outline stroke, fill and stroke per handle, center dot.
        assert_eq!(rec.paint_count(), 1 + 8 * 2 + 1);
    }
}
