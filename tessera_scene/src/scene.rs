// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core scene implementation: structure, transforms, traversal.

use kurbo::{Affine, Vec2};
use tessera_geometry::{BoundingBox, Geometry, Transform, decompose};

use crate::error::SceneError;
use crate::events::{Listeners, SceneEvent};
use crate::types::{Camera, LocalNode, NodeFlags, NodeId, NodeKind, Style};

/// Scene graph: an arena of nodes hanging off a root group.
///
/// Matrices are never stored. Local, world, and view matrices are recomputed from the
/// parent chain on every access, so they can never be stale.
pub struct Scene {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    root: NodeId,
    camera: Option<Camera>,
    events: Listeners<SceneEvent>,
}

impl core::fmt::Debug for Scene {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Scene")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("root", &self.root)
            .field("camera", &self.camera)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    local: LocalNode,
}

impl Node {
    fn new(generation: u32, local: LocalNode) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            local,
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create a scene holding only its root group, with no camera.
    pub fn new() -> Self {
        let mut scene = Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            root: NodeId::new(0, 0),
            camera: None,
            events: Listeners::default(),
        };
        scene.root = scene.insert(LocalNode::group().with_name("scene"));
        scene
    }

    /// The root group.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Camera applied to nodes under the root.
    pub fn camera(&self) -> Option<&Camera> {
        self.camera.as_ref()
    }

    /// Set or clear the camera.
    pub fn set_camera(&mut self, camera: Option<Camera>) {
        self.camera = camera;
    }

    /// Structural event listeners.
    pub fn events_mut(&mut self) -> &mut Listeners<SceneEvent> {
        &mut self.events
    }

    /// Allocate a detached node. Attach it with [`Scene::add`].
    #[allow(
        clippy::cast_possible_truncation,
        reason = "NodeId uses 32-bit indices by design."
    )]
    pub fn insert(&mut self, local: LocalNode) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, local));
            (idx, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, local)));
            self.generations.push(generation);
            (self.nodes.len() - 1, generation)
        };
        NodeId::new(idx as u32, generation)
    }

    /// Allocate a node and attach it under `parent` in one step.
    pub fn spawn(&mut self, parent: NodeId, local: LocalNode) -> Result<NodeId, SceneError> {
        let id = self.insert(local);
        match self.add(parent, id) {
            Ok(()) => Ok(id),
            Err(e) => {
                self.free_subtree(id);
                Err(e)
            }
        }
    }

    /// Attach `child` under the group `parent`.
    ///
    /// A child that already has a parent is detached from it first. Siblings are then
    /// re-sorted by draw order. On error the scene is left untouched and the error is
    /// logged.
    pub fn add(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        let result = self.check_add(parent, child);
        if let Err(e) = result {
            tracing::error!(?parent, ?child, error = %e, "rejected scene add");
            return Err(e);
        }
        self.detach(child);
        self.link_parent(child, parent);
        self.sort(parent);
        self.events.emit(&SceneEvent::Added { parent, child });
        Ok(())
    }

    fn check_add(&self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        let Some(p) = self.node(parent) else {
            return Err(SceneError::DeadNode(parent));
        };
        if !self.is_alive(child) {
            return Err(SceneError::DeadNode(child));
        }
        if !p.local.is_group() {
            return Err(SceneError::NotAGroup(parent));
        }
        if self.ancestors_inclusive(parent).any(|a| a == child) {
            return Err(SceneError::Cycle { parent, child });
        }
        Ok(())
    }

    /// Detach a node from its parent, keeping it (and its subtree) alive.
    ///
    /// Returns false for stale ids and nodes without a parent.
    pub fn detach(&mut self, id: NodeId) -> bool {
        let Some(parent) = self.node(id).and_then(|n| n.parent) else {
            return false;
        };
        self.unlink_parent(id, parent);
        self.events.emit(&SceneEvent::Removed { parent, child: id });
        true
    }

    /// Remove a node and its subtree, freeing their slots.
    ///
    /// The root group cannot be removed.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) || id == self.root {
            return;
        }
        self.detach(id);
        self.free_subtree(id);
    }

    fn free_subtree(&mut self, id: NodeId) {
        let Some(node) = self.nodes[id.idx()].take() else {
            return;
        };
        self.free_list.push(id.idx());
        for child in node.children {
            self.free_subtree(child);
        }
    }

    /// Returns true if `id` refers to a live node.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        if let Some(p) = self.node_opt_mut(parent) {
            p.children.push(id);
        }
        if let Some(n) = self.node_opt_mut(id) {
            n.parent = Some(parent);
        }
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        if let Some(p) = self.node_opt_mut(parent) {
            p.children.retain(|c| *c != id);
        }
        if let Some(n) = self.node_opt_mut(id) {
            n.parent = None;
        }
    }

    // --- accessors ---

    /// Local data of a node.
    pub fn local(&self, id: NodeId) -> Option<&LocalNode> {
        self.node(id).map(|n| &n.local)
    }

    /// Parent of a node, `None` for detached nodes and the root.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.parent
    }

    /// Children in draw order. Empty for stale ids and leaves.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Name of a node.
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.node(id)?.local.name.as_deref()
    }

    /// Decomposed local transform.
    pub fn transform(&self, id: NodeId) -> Option<Transform> {
        self.node(id).map(|n| n.local.transform)
    }

    /// Geometry of a drawable node.
    pub fn geometry(&self, id: NodeId) -> Option<&Geometry> {
        match &self.node(id)?.local.kind {
            NodeKind::Graph { geometry, .. } => Some(geometry),
            NodeKind::Group => None,
        }
    }

    /// Style of a drawable node.
    pub fn style(&self, id: NodeId) -> Option<&Style> {
        match &self.node(id)?.local.kind {
            NodeKind::Graph { style, .. } => Some(style),
            NodeKind::Group => None,
        }
    }

    /// True for live groups.
    pub fn is_group(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(|n| n.local.is_group())
    }

    /// True for live nodes with [`NodeFlags::VISIBLE`].
    pub fn is_visible(&self, id: NodeId) -> bool {
        self.node(id)
            .is_some_and(|n| n.local.flags.contains(NodeFlags::VISIBLE))
    }

    /// Flags of a node.
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        self.node(id).map(|n| n.local.flags)
    }

    /// Draw order of a node.
    pub fn draw_order(&self, id: NodeId) -> Option<i32> {
        self.node(id).map(|n| n.local.draw_order)
    }

    // --- setters ---

    /// Replace the whole local transform.
    pub fn set_transform(&mut self, id: NodeId, transform: Transform) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.transform = transform;
        }
    }

    /// Update the position.
    pub fn set_position(&mut self, id: NodeId, position: Vec2) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.transform.position = position;
        }
    }

    /// Update the rotation in radians.
    pub fn set_rotation(&mut self, id: NodeId, rotation: f64) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.transform.rotation = rotation;
        }
    }

    /// Update the scale.
    pub fn set_scale(&mut self, id: NodeId, scale: Vec2) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.transform.scale = scale;
        }
    }

    /// Update the name.
    pub fn set_name(&mut self, id: NodeId, name: Option<String>) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.name = name;
        }
    }

    /// Update node flags.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.flags = flags;
        }
    }

    /// Show or hide a node.
    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.flags.set(NodeFlags::VISIBLE, visible);
        }
    }

    /// Update the draw order and re-sort the siblings.
    pub fn set_draw_order(&mut self, id: NodeId, draw_order: i32) {
        let Some(n) = self.node_opt_mut(id) else {
            return;
        };
        n.local.draw_order = draw_order;
        let parent = n.parent;
        if let Some(p) = parent {
            self.sort(p);
        }
    }

    /// Replace the geometry of a drawable node. Ignored for groups.
    pub fn set_geometry(&mut self, id: NodeId, new: Geometry) {
        if let Some(Node {
            local: LocalNode {
                kind: NodeKind::Graph { geometry, .. },
                ..
            },
            ..
        }) = self.node_opt_mut(id)
        {
            *geometry = new;
        }
    }

    /// Replace the style of a drawable node. Ignored for groups.
    pub fn set_style(&mut self, id: NodeId, new: Style) {
        if let Some(Node {
            local: LocalNode {
                kind: NodeKind::Graph { style, .. },
                ..
            },
            ..
        }) = self.node_opt_mut(id)
        {
            *style = new;
        }
    }

    /// Stable sort of `id`'s children by draw order, recursing into nested groups.
    pub fn sort(&mut self, id: NodeId) {
        let Some(n) = self.node(id) else {
            return;
        };
        let mut children = n.children.clone();
        children.sort_by_key(|c| self.draw_order(*c).unwrap_or(0));
        for c in &children {
            if self.is_group(*c) {
                self.sort(*c);
            }
        }
        if let Some(n) = self.node_opt_mut(id) {
            n.children = children;
        }
    }

    // --- matrices ---

    /// `compose(position, rotation, scale)`.
    pub fn local_matrix(&self, id: NodeId) -> Option<Affine> {
        self.node(id).map(|n| n.local.transform.to_affine())
    }

    /// Parent world matrix times local matrix, up to the topmost ancestor.
    pub fn world_matrix(&self, id: NodeId) -> Option<Affine> {
        let mut m = self.local_matrix(id)?;
        let mut cur = self.parent(id);
        while let Some(p) = cur {
            m = self.local_matrix(p)? * m;
            cur = self.parent(p);
        }
        Some(m)
    }

    /// Camera view-projection times world matrix.
    ///
    /// The camera only applies when the node's topmost ancestor is this scene's root
    /// and a camera is set; otherwise this is the world matrix.
    pub fn view_matrix(&self, id: NodeId) -> Option<Affine> {
        let world = self.world_matrix(id)?;
        Some(self.camera_for(id) * world)
    }

    /// View matrix of the space a node's transform is expressed in.
    ///
    /// This is the parent's view matrix, the camera for the root itself, or identity
    /// for a detached node.
    pub fn parent_view_matrix(&self, id: NodeId) -> Option<Affine> {
        if !self.is_alive(id) {
            return None;
        }
        match self.parent(id) {
            Some(p) => self.view_matrix(p),
            None => Some(self.camera_for(id)),
        }
    }

    fn camera_for(&self, id: NodeId) -> Affine {
        match &self.camera {
            Some(c) if self.topmost(id) == Some(self.root) => c.view_projection(),
            _ => Affine::IDENTITY,
        }
    }

    /// The node itself followed by each ancestor up to the topmost.
    pub fn ancestors_inclusive(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        core::iter::successors(self.is_alive(id).then_some(id), move |n| self.parent(*n))
    }

    fn topmost(&self, id: NodeId) -> Option<NodeId> {
        self.ancestors_inclusive(id).last()
    }

    /// Decomposed scale of the world matrix.
    pub fn world_scale(&self, id: NodeId) -> Option<Vec2> {
        self.world_matrix(id).map(|m| decompose(m).scale)
    }

    // --- bounds ---

    /// Bounds in the node's own space: the geometry's box, or for groups the union of
    /// the children's boxes mapped through their local matrices.
    pub fn local_bounds(&self, id: NodeId) -> BoundingBox {
        let Some(n) = self.node(id) else {
            return BoundingBox::EMPTY;
        };
        match &n.local.kind {
            NodeKind::Graph { geometry, .. } => geometry.bounding_box(),
            NodeKind::Group => n.children.iter().fold(BoundingBox::EMPTY, |acc, c| {
                let m = self.local_matrix(*c).unwrap_or(Affine::IDENTITY);
                acc.union(&self.local_bounds(*c).transformed(m))
            }),
        }
    }

    /// Geometry mapped through the world matrix.
    pub fn world_geometry(&self, id: NodeId) -> Option<Geometry> {
        let m = self.world_matrix(id)?;
        self.geometry(id).map(|g| g.transformed(m))
    }

    /// Tight world-space box: the transformed geometry's box, or the union over a group.
    pub fn world_bounds(&self, id: NodeId) -> BoundingBox {
        if self.is_group(id) {
            return self
                .children(id)
                .iter()
                .fold(BoundingBox::EMPTY, |acc, c| acc.union(&self.world_bounds(*c)));
        }
        self.world_geometry(id)
            .map(|g| g.bounding_box())
            .unwrap_or(BoundingBox::EMPTY)
    }

    // --- traversal ---

    /// Pre-order walk: the node, then each child subtree in draw order.
    pub fn traverse(&self, id: NodeId, f: &mut impl FnMut(NodeId)) {
        if !self.is_alive(id) {
            return;
        }
        f(id);
        for c in self.children(id) {
            self.traverse(*c, f);
        }
    }

    /// Walk that skips hidden nodes.
    ///
    /// Stops at `id` if it is hidden. Hidden direct children are skipped. Visible child
    /// groups are then walked with [`Scene::traverse`], which does not re-check
    /// visibility below them.
    pub fn traverse_visible(&self, id: NodeId, f: &mut impl FnMut(NodeId)) {
        if !self.is_visible(id) {
            return;
        }
        f(id);
        for &c in self.children(id) {
            if !self.is_visible(c) {
                continue;
            }
            if self.is_group(c) {
                self.traverse(c, f);
            } else {
                f(c);
            }
        }
    }

    /// First node under the root, in pre-order, with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        let mut found = None;
        self.traverse(self.root, &mut |id| {
            if found.is_none() && self.name(id) == Some(name) {
                found = Some(id);
            }
        });
        found
    }

    /// Visible, pickable drawable nodes under the root, in draw order.
    pub fn pickable_nodes(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.traverse_visible(self.root, &mut |id| {
            if !self.is_group(id)
                && self
                    .flags(id)
                    .is_some_and(|f| f.contains(NodeFlags::VISIBLE | NodeFlags::PICKABLE))
            {
                out.push(id);
            }
        });
        out
    }
}
