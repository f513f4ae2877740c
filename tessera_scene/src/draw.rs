// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing contract between the scene and a rendering backend.

use kurbo::{Affine, BezPath};

use crate::scene::Scene;
use crate::types::{NodeId, PaintOp, Rgba};

/// A render target that the scene paints into.
///
/// Paths are given in the node's local space; the current transform maps them to the
/// surface.
pub trait Surface {
    /// Push the current state.
    fn save(&mut self);
    /// Pop to the last saved state.
    fn restore(&mut self);
    /// Replace the current transform.
    fn set_transform(&mut self, transform: Affine);
    /// Fill a path.
    fn fill(&mut self, path: &BezPath, color: Rgba);
    /// Stroke a path.
    fn stroke(&mut self, path: &BezPath, color: Rgba, width: f64);
}

/// Paint one drawable node with its view matrix. Groups and stale ids draw nothing.
pub fn draw_node(scene: &Scene, id: NodeId, surface: &mut impl Surface) {
    let (Some(geometry), Some(style), Some(view)) =
        (scene.geometry(id), scene.style(id), scene.view_matrix(id))
    else {
        return;
    };
    let path = geometry.to_path();
    surface.save();
    surface.set_transform(view);
    for op in style.paint_ops() {
        match op {
            PaintOp::Fill => {
                if let Some(c) = style.fill {
                    surface.fill(&path, c);
                }
            }
            PaintOp::Stroke => {
                if let Some(c) = style.stroke {
                    surface.stroke(&path, c, style.line_width);
                }
            }
        }
    }
    surface.restore();
}

/// Paint the visible part of the scene in draw order.
pub fn draw(scene: &Scene, surface: &mut impl Surface) {
    scene.traverse_visible(scene.root(), &mut |id| draw_node(scene, id, &mut *surface));
}

/// One recorded [`Surface`] call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// [`Surface::save`].
    Save,
    /// [`Surface::restore`].
    Restore,
    /// [`Surface::set_transform`].
    SetTransform(Affine),
    /// [`Surface::fill`].
    Fill(BezPath, Rgba),
    /// [`Surface::stroke`].
    Stroke(BezPath, Rgba, f64),
}

/// Surface that records every call, for tests and headless inspection.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    /// Calls in order.
    pub commands: Vec<DrawCommand>,
}

impl Recorder {
    /// Number of fill and stroke calls.
    pub fn paint_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Fill(..) | DrawCommand::Stroke(..)))
            .count()
    }
}

impl Surface for Recorder {
    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn set_transform(&mut self, transform: Affine) {
        self.commands.push(DrawCommand::SetTransform(transform));
    }

    fn fill(&mut self, path: &BezPath, color: Rgba) {
        self.commands.push(DrawCommand::Fill(path.clone(), color));
    }

    fn stroke(&mut self, path: &BezPath, color: Rgba, width: f64) {
        self.commands
            .push(DrawCommand::Stroke(path.clone(), color, width));
    }
}
