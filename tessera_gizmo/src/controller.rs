// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer-driven transform controller.
//!
//! The controller owns a selection and a drag session; the scene is passed into each
//! call so the host keeps ownership. Pointer positions are in query space, the same
//! space [`Scene::view_matrix`] maps into.
//!
//! A drag captures the target's transform when it begins. Every pointer move computes
//! the new transform from that snapshot, and `Escape` restores it.

use kurbo::{Affine, Point};
use tessera_geometry::{Transform, try_invert};
use tessera_scene::{Listeners, NodeId, Scene, Surface};
use tracing::{debug, warn};

use crate::config::ControllerConfig;
use crate::frame::{ControlFrame, ControlState, FrameHit, opposite_handle};
use crate::transformer::{self, DragGesture};

bitflags::bitflags! {
    /// Modifier keys the controller reacts to.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Pivot on the center instead of the opposite handle.
        const ALT = 1 << 0;
        /// Constrain the active drag.
        const SHIFT = 1 << 1;
    }
}

/// Keys with controller bindings.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Cancel the drag and deselect.
    Escape,
    /// Commit and deselect.
    Enter,
    /// Remove the target from the scene.
    Delete,
    /// Modifier.
    Alt,
    /// Modifier.
    Shift,
}

/// Notifications emitted by the controller.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ControllerEvent {
    /// Something visible about the controller changed; redraw.
    Change,
    /// A node became the target.
    Selected(NodeId),
    /// The target's transform was written.
    Transformed(NodeId),
}

#[derive(Copy, Clone, Debug)]
struct Drag {
    hit: FrameHit,
    snapshot: Transform,
    // Maps query space into the target's parent space.
    to_parent: Affine,
    start: Point,
    end: Point,
    pivot: Point,
}

/// Move/scale/rotate state machine for a single selected node.
#[derive(Debug, Default)]
pub struct TransformController {
    config: ControllerConfig,
    target: Option<NodeId>,
    frame: Option<ControlFrame>,
    hover: Option<FrameHit>,
    drag: Option<Drag>,
    modifiers: Modifiers,
    events: Listeners<ControllerEvent>,
}

impl TransformController {
    /// Create an idle controller.
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Event listeners.
    pub fn events_mut(&mut self) -> &mut Listeners<ControllerEvent> {
        &mut self.events
    }

    /// Currently selected node.
    pub fn target(&self) -> Option<NodeId> {
        self.target
    }

    /// Frame around the target as of the last update.
    pub fn frame(&self) -> Option<&ControlFrame> {
        self.frame.as_ref()
    }

    /// What the pointer is over when no drag is active.
    pub fn hover(&self) -> Option<FrameHit> {
        self.hover
    }

    /// Mode of the active drag.
    pub fn active_state(&self) -> Option<ControlState> {
        self.drag.map(|d| d.hit.state)
    }

    /// Returns true while a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Pivot of the active drag, in the target's parent space.
    pub fn pivot(&self) -> Option<Point> {
        self.drag.map(|d| d.pivot)
    }

    /// Held modifiers.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Select `id`, or clear the selection with `None`.
    pub fn select(&mut self, scene: &Scene, id: Option<NodeId>) {
        let Some(id) = id.filter(|id| scene.is_alive(*id)) else {
            self.deselect();
            return;
        };
        if self.target != Some(id) {
            self.drag = None;
            self.hover = None;
            self.target = Some(id);
            debug!(?id, "controller: select");
            self.events.emit(&ControllerEvent::Selected(id));
        }
        self.refresh_frame(scene);
        self.events.emit(&ControllerEvent::Change);
    }

    /// Drop the selection and any drag without touching the scene.
    pub fn deselect(&mut self) {
        let had_target = self.target.take().is_some();
        self.frame = None;
        self.hover = None;
        self.drag = None;
        if had_target {
            debug!("controller: deselect");
            self.events.emit(&ControllerEvent::Change);
        }
    }

    /// Recompute the frame from the scene, dropping a target that no longer exists.
    pub fn refresh_frame(&mut self, scene: &Scene) {
        match self.target {
            Some(id) if scene.is_alive(id) => {
                self.frame = ControlFrame::for_node(scene, id, &self.config);
            }
            Some(_) => self.deselect(),
            None => self.frame = None,
        }
    }

    fn hit_test(&self, p: Point) -> Option<FrameHit> {
        self.frame
            .as_ref()
            .and_then(|f| f.hit_test(p, &self.config))
    }

    /// Pointer pressed at `p`.
    ///
    /// When `p` misses the current frame, `candidate` (typically the topmost node under
    /// the pointer) becomes the selection. A drag then starts if `p` hits the frame.
    pub fn pointer_down(&mut self, scene: &mut Scene, p: Point, candidate: Option<NodeId>) {
        self.refresh_frame(scene);
        let mut hit = self.hit_test(p);
        if hit.is_none() {
            self.select(scene, candidate);
            if self.target.is_none() {
                return;
            }
            hit = self.hit_test(p);
        }
        self.hover = hit;
        if let Some(hit) = hit {
            self.begin_drag(scene, hit, p);
        }
    }

    fn begin_drag(&mut self, scene: &Scene, hit: FrameHit, p: Point) {
        let Some(id) = self.target else {
            return;
        };
        let (Some(snapshot), Some(parent_view)) =
            (scene.transform(id), scene.parent_view_matrix(id))
        else {
            return;
        };
        let Some(to_parent) = try_invert(parent_view) else {
            warn!(?id, "controller: parent view matrix is not invertible; drag skipped");
            return;
        };
        let start = to_parent * p;
        let mut drag = Drag {
            hit,
            snapshot,
            to_parent,
            start,
            end: start,
            pivot: start,
        };
        drag.pivot = self.pivot_for(&drag);
        debug!(?id, state = ?hit.state, handle = ?hit.handle, "controller: drag start");
        self.drag = Some(drag);
        self.events.emit(&ControllerEvent::Change);
    }

    fn pivot_for(&self, drag: &Drag) -> Point {
        let Some(frame) = &self.frame else {
            return drag.snapshot.position.to_point();
        };
        let centered =
            self.modifiers.contains(Modifiers::ALT) || drag.hit.state == ControlState::Rotate;
        let local = match drag.hit.handle {
            Some(h) if !centered => frame.local_handle(opposite_handle(h)),
            _ => frame.local_center(),
        };
        drag.snapshot.to_affine() * local
    }

    /// Pointer moved to `p`: updates the drag, or the hover state when idle.
    pub fn pointer_move(&mut self, scene: &mut Scene, p: Point) {
        if let Some(drag) = &mut self.drag {
            drag.end = drag.to_parent * p;
            self.apply(scene);
            return;
        }
        let hover = self.hit_test(p);
        if hover != self.hover {
            self.hover = hover;
            self.events.emit(&ControllerEvent::Change);
        }
    }

    /// Pointer released: ends the drag and forgets its snapshot.
    pub fn pointer_up(&mut self, scene: &Scene) {
        if self.drag.take().is_some() {
            debug!(node = ?self.target, "controller: drag end");
            self.refresh_frame(scene);
            self.events.emit(&ControllerEvent::Change);
        }
    }

    /// Key pressed.
    pub fn key_down(&mut self, scene: &mut Scene, key: Key) {
        match key {
            Key::Escape => {
                if let (Some(drag), Some(id)) = (self.drag.take(), self.target) {
                    scene.set_transform(id, drag.snapshot);
                    debug!(?id, "controller: drag cancelled");
                    self.events.emit(&ControllerEvent::Transformed(id));
                }
                self.deselect();
            }
            Key::Enter => self.deselect(),
            Key::Delete => {
                if let Some(id) = self.target {
                    debug!(?id, "controller: delete target");
                    scene.remove(id);
                }
                self.deselect();
            }
            Key::Alt => self.set_modifiers(scene, self.modifiers | Modifiers::ALT),
            Key::Shift => self.set_modifiers(scene, self.modifiers | Modifiers::SHIFT),
        }
    }

    /// Key released.
    pub fn key_up(&mut self, scene: &mut Scene, key: Key) {
        match key {
            Key::Alt => self.set_modifiers(scene, self.modifiers - Modifiers::ALT),
            Key::Shift => self.set_modifiers(scene, self.modifiers - Modifiers::SHIFT),
            Key::Escape | Key::Enter | Key::Delete => {}
        }
    }

    /// Replace the held modifiers and re-apply an active drag.
    ///
    /// Toggling alt mid-drag moves the pivot between the opposite handle and the center.
    pub fn set_modifiers(&mut self, scene: &mut Scene, modifiers: Modifiers) {
        if modifiers == self.modifiers {
            return;
        }
        self.modifiers = modifiers;
        let Some(mut drag) = self.drag else {
            return;
        };
        drag.pivot = self.pivot_for(&drag);
        self.drag = Some(drag);
        self.apply(scene);
    }

    fn apply(&mut self, scene: &mut Scene) {
        let (Some(drag), Some(id)) = (self.drag, self.target) else {
            return;
        };
        let gesture = DragGesture {
            state: drag.hit.state,
            snapshot: drag.snapshot,
            pivot: drag.pivot,
            start: drag.start,
            end: drag.end,
        };
        let next = if self.modifiers.contains(Modifiers::SHIFT) {
            transformer::apply_constrained(&gesture, self.config.rotation_snap)
        } else {
            transformer::apply(&gesture)
        };
        let Some(next) = next else {
            debug!(?id, state = ?drag.hit.state, "controller: degenerate drag, transform kept");
            return;
        };
        scene.set_transform(id, next);
        self.refresh_frame(scene);
        self.events.emit(&ControllerEvent::Transformed(id));
        self.events.emit(&ControllerEvent::Change);
    }

    /// Paint the frame for the current target, if any.
    pub fn draw(&self, surface: &mut impl Surface) {
        if let Some(frame) = &self.frame {
            frame.draw(surface, &self.config);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::FRAC_PI_2;
    use std::cell::RefCell;
    use std::rc::Rc;

    use kurbo::{Size, Vec2};
    use tessera_geometry::{Geometry, RectShape};
    use tessera_scene::{LocalNode, Recorder, Style};

    fn rect_node(origin: Point, w: f64, h: f64) -> LocalNode {
        let g = Geometry::Rect(RectShape::new(origin, Size::new(w, h)));
        LocalNode::graph(g, Style::fill(tessera_scene::Rgba::BLACK))
    }

    fn scene_with_rect() -> (Scene, NodeId) {
        let mut scene = Scene::new();
        let root = scene.root();
        let id = scene
            .spawn(root, rect_node(Point::ZERO, 100.0, 50.0))
            .unwrap();
        (scene, id)
    }

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).hypot() < 1e-9
    }

    #[test]
    fn pointer_down_selects_candidate_then_moves() {
        let (mut scene, id) = scene_with_rect();
        let mut c = TransformController::default();
        c.pointer_down(&mut scene, Point::new(40.0, 20.0), Some(id));
        assert_eq!(c.target(), Some(id));
        assert_eq!(c.active_state(), Some(ControlState::Move));

        c.pointer_move(&mut scene, Point::new(50.0, 35.0));
        assert_eq!(scene.transform(id).unwrap().position, Vec2::new(10.0, 15.0));
        c.pointer_up(&scene);
        assert!(!c.is_dragging());
        assert_eq!(c.frame().unwrap().handle(0), Point::new(10.0, 15.0));
    }

    #[test]
    fn missing_with_no_candidate_deselects() {
        let (mut scene, id) = scene_with_rect();
        let mut c = TransformController::default();
        c.select(&scene, Some(id));
        c.pointer_down(&mut scene, Point::new(500.0, 500.0), None);
        assert_eq!(c.target(), None);
        assert!(c.frame().is_none());
    }

    #[test]
    fn corner_scale_pivots_on_opposite_corner() {
        let (mut scene, id) = scene_with_rect();
        let mut c = TransformController::default();
        c.pointer_down(&mut scene, Point::new(100.0, 50.0), Some(id));
        assert_eq!(c.active_state(), Some(ControlState::Scale));
        assert_eq!(c.pivot(), Some(Point::ZERO));

        c.pointer_move(&mut scene, Point::new(200.0, 100.0));
        let t = scene.transform(id).unwrap();
        assert!(close(t.scale, Vec2::new(2.0, 2.0)));
        assert!(close(t.position, Vec2::ZERO));
    }

    #[test]
    fn alt_moves_pivot_to_center_mid_drag() {
        let (mut scene, id) = scene_with_rect();
        let mut c = TransformController::default();
        c.pointer_down(&mut scene, Point::new(100.0, 50.0), Some(id));
        c.pointer_move(&mut scene, Point::new(150.0, 75.0));
        assert!(close(scene.transform(id).unwrap().position, Vec2::ZERO));

        c.key_down(&mut scene, Key::Alt);
        assert_eq!(c.pivot(), Some(Point::new(50.0, 25.0)));
        let t = scene.transform(id).unwrap();
        assert!(close(t.scale, Vec2::new(2.0, 2.0)));
        assert!(close(t.position, Vec2::new(-50.0, -25.0)));

        c.key_up(&mut scene, Key::Alt);
        assert_eq!(c.pivot(), Some(Point::ZERO));
        assert!(close(scene.transform(id).unwrap().position, Vec2::ZERO));
    }

    #[test]
    fn edge_drag_scales_one_axis_and_shift_scales_both() {
        let (mut scene, id) = scene_with_rect();
        let mut c = TransformController::default();
        c.pointer_down(&mut scene, Point::new(100.0, 25.0), Some(id));
        assert_eq!(c.active_state(), Some(ControlState::ScaleX));
        c.pointer_move(&mut scene, Point::new(150.0, 25.0));
        assert!(close(scene.transform(id).unwrap().scale, Vec2::new(1.5, 1.0)));

        c.key_down(&mut scene, Key::Shift);
        let t = scene.transform(id).unwrap();
        assert!(close(t.scale, Vec2::new(1.5, 1.5)));
        assert!(close(t.position, Vec2::new(0.0, -12.5)));
    }

    #[test]
    fn rotate_band_rotates_about_center() {
        let mut scene = Scene::new();
        let root = scene.root();
        let id = scene
            .spawn(
                root,
                rect_node(Point::new(-50.0, -25.0), 100.0, 50.0)
                    .with_position(Vec2::new(200.0, 100.0)),
            )
            .unwrap();
        let mut c = TransformController::default();
        c.key_down(&mut scene, Key::Alt);
        c.pointer_down(&mut scene, Point::new(270.0, 100.0), Some(id));
        assert_eq!(c.active_state(), Some(ControlState::Rotate));
        c.pointer_move(&mut scene, Point::new(200.0, 170.0));

        let t = scene.transform(id).unwrap();
        assert!((t.rotation - FRAC_PI_2).abs() < 1e-12);
        assert!(close(t.position, Vec2::new(200.0, 100.0)), "center pivot keeps position");
        assert!(close(t.scale, Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn escape_restores_snapshot_and_deselects() {
        let (mut scene, id) = scene_with_rect();
        scene.set_rotation(id, 0.3);
        let before = scene.transform(id).unwrap();
        let mut c = TransformController::default();
        c.select(&scene, Some(id));
        let corner = c.frame().unwrap().handle(4);
        c.pointer_down(&mut scene, corner, None);
        c.pointer_move(&mut scene, corner + Vec2::new(40.0, 30.0));
        assert_ne!(scene.transform(id).unwrap(), before);

        c.key_down(&mut scene, Key::Escape);
        assert_eq!(scene.transform(id).unwrap(), before, "escape should restore the snapshot");
        assert_eq!(c.target(), None);
    }

    #[test]
    fn enter_keeps_changes_and_delete_removes() {
        let (mut scene, id) = scene_with_rect();
        let mut c = TransformController::default();
        c.pointer_down(&mut scene, Point::new(40.0, 20.0), Some(id));
        c.pointer_move(&mut scene, Point::new(45.0, 20.0));
        c.key_down(&mut scene, Key::Enter);
        assert_eq!(c.target(), None);
        assert_eq!(scene.transform(id).unwrap().position, Vec2::new(5.0, 0.0));

        c.select(&scene, Some(id));
        c.key_down(&mut scene, Key::Delete);
        assert!(!scene.is_alive(id));
        assert_eq!(c.target(), None);
    }

    #[test]
    fn singular_parent_skips_drag() {
        let mut scene = Scene::new();
        let root = scene.root();
        let group = scene.spawn(root, LocalNode::group()).unwrap();
        scene.set_scale(group, Vec2::new(0.0, 1.0));
        let id = scene
            .spawn(group, rect_node(Point::ZERO, 100.0, 50.0))
            .unwrap();
        let mut c = TransformController::default();
        c.select(&scene, Some(id));
        // The collapsed frame still reports a left-edge hit.
        c.pointer_down(&mut scene, Point::new(0.0, 20.0), None);
        assert_eq!(c.target(), Some(id));
        assert!(!c.is_dragging());
    }

    #[test]
    fn events_report_selection_and_transforms() {
        let (mut scene, id) = scene_with_rect();
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut c = TransformController::default();
        let sink = Rc::clone(&log);
        c.events_mut().subscribe(move |e| sink.borrow_mut().push(*e));

        c.pointer_down(&mut scene, Point::new(40.0, 20.0), Some(id));
        c.pointer_move(&mut scene, Point::new(41.0, 20.0));
        let log = log.borrow();
        assert_eq!(log[0], ControllerEvent::Selected(id));
        assert!(log.contains(&ControllerEvent::Transformed(id)));
    }

    #[test]
    fn hover_tracks_pointer_when_idle() {
        let (mut scene, id) = scene_with_rect();
        let mut c = TransformController::default();
        c.select(&scene, Some(id));
        c.pointer_move(&mut scene, Point::new(130.0, 25.0));
        assert_eq!(c.hover().map(|h| h.state), Some(ControlState::Rotate));
        c.pointer_move(&mut scene, Point::new(400.0, 25.0));
        assert_eq!(c.hover(), None);

        let mut rec = Recorder::default();
        c.draw(&mut rec);
        assert!(rec.paint_count() > 0);
    }
}
