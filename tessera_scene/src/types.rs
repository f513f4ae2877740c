// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the scene: node identifiers, flags, styles, and per-node data.

use kurbo::{Affine, Vec2};
use tessera_geometry::{Geometry, Transform};

/// Identifier for a node in the scene.
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `NodeId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// Use [`Scene::is_alive`](crate::Scene::is_alive) to check liveness. Every accessor
/// treats a stale id as "no node".
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Node flags controlling visibility and picking.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node is visible (drawn, and its subtree is walked by visible traversal).
        const VISIBLE  = 0b0000_0001;
        /// Node is pickable (returned by [`Scene::pickable_nodes`](crate::Scene::pickable_nodes)).
        const PICKABLE = 0b0000_0010;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::PICKABLE
    }
}

/// 8-bit RGBA color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rgba {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(0xff, 0xff, 0xff);

    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    /// Opaque color from `0xRRGGBB`.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Each channel is truncated to its low 8 bits."
    )]
    pub const fn from_hex(rgb: u32) -> Self {
        Self::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }
}

/// A paint step of a [`Style`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PaintOp {
    /// Fill the path's interior.
    Fill,
    /// Stroke the path's outline.
    Stroke,
}

/// How a geometry is painted.
#[derive(Clone, Debug, PartialEq)]
pub struct Style {
    /// Fill color, `None` to skip filling.
    pub fill: Option<Rgba>,
    /// Stroke color, `None` to skip stroking.
    pub stroke: Option<Rgba>,
    /// Stroke width in the node's local units.
    pub line_width: f64,
    /// Paint steps in order.
    pub order: [PaintOp; 2],
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: Some(Rgba::BLACK),
            stroke: None,
            line_width: 1.0,
            order: [PaintOp::Fill, PaintOp::Stroke],
        }
    }
}

impl Style {
    /// Fill-only style.
    pub fn fill(color: Rgba) -> Self {
        Self {
            fill: Some(color),
            ..Default::default()
        }
    }

    /// Stroke-only style.
    pub fn stroke(color: Rgba, line_width: f64) -> Self {
        Self {
            fill: None,
            stroke: Some(color),
            line_width,
            ..Default::default()
        }
    }

    /// Paint steps that have a color, in order.
    pub fn paint_ops(&self) -> impl Iterator<Item = PaintOp> + '_ {
        self.order.iter().copied().filter(|op| match op {
            PaintOp::Fill => self.fill.is_some(),
            PaintOp::Stroke => self.stroke.is_some(),
        })
    }
}

/// What a node holds.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    /// Drawable leaf owning one geometry.
    Graph {
        /// Geometry in local space.
        geometry: Geometry,
        /// Paint style.
        style: Style,
    },
    /// Ordered container of child nodes.
    Group,
}

/// Per-node local data.
#[derive(Clone, Debug, PartialEq)]
pub struct LocalNode {
    /// Optional lookup name.
    pub name: Option<String>,
    /// Position, rotation, and scale relative to the parent.
    pub transform: Transform,
    /// Sort key among siblings; lower draws first. Ties keep insertion order.
    pub draw_order: i32,
    /// Visibility and picking flags.
    pub flags: NodeFlags,
    /// Leaf geometry or group.
    pub kind: NodeKind,
}

impl Default for LocalNode {
    fn default() -> Self {
        Self::group()
    }
}

impl LocalNode {
    /// Empty group at the identity transform.
    pub fn group() -> Self {
        Self {
            name: None,
            transform: Transform::IDENTITY,
            draw_order: 0,
            flags: NodeFlags::default(),
            kind: NodeKind::Group,
        }
    }

    /// Drawable leaf at the identity transform.
    pub fn graph(geometry: impl Into<Geometry>, style: Style) -> Self {
        Self {
            kind: NodeKind::Graph {
                geometry: geometry.into(),
                style,
            },
            ..Self::group()
        }
    }

    /// Builder: set the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder: set the position.
    #[must_use]
    pub fn with_position(mut self, position: Vec2) -> Self {
        self.transform.position = position;
        self
    }

    /// Builder: set the draw order.
    #[must_use]
    pub fn with_draw_order(mut self, draw_order: i32) -> Self {
        self.draw_order = draw_order;
        self
    }

    /// True for groups.
    pub fn is_group(&self) -> bool {
        matches!(self.kind, NodeKind::Group)
    }
}

/// 2D camera: a pan followed by a uniform zoom.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    /// World point shown at the view origin.
    pub position: Vec2,
    /// Zoom factor; 1 is unscaled.
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Camera {
    /// World to view: translate by `-position`, then scale by `zoom`.
    pub fn view_projection(&self) -> Affine {
        Affine::scale(self.zoom) * Affine::translate(-self.position)
    }
}
