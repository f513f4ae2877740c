// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Binary bounding volume hierarchy generic over scalar `T: Scalar` and payload `P`.
//!
//! The hierarchy is built in one pass by recursive median splits and is never
//! updated incrementally. Rebuilding produces a fresh value that replaces the old
//! tree wholesale.

use core::fmt::Debug;

use crate::types::{Aabb2D, Axis, Scalar, union_aabb};

/// Default leaf threshold: sets of this size or smaller stop splitting.
pub const DEFAULT_MIN_NUM: usize = 4;

/// A target stored in a leaf: the payload and its bounding box.
pub type Target<T, P> = (P, Aabb2D<T>);

/// Bounding volume hierarchy with median splits along the longer axis.
pub struct Bvh<T: Scalar, P> {
    min_num: usize,
    len: usize,
    root: Option<NodeIdx>,
    arena: Vec<Node<T, P>>,
}

enum Kind<T: Scalar, P> {
    Leaf(Vec<Target<T, P>>),
    Internal { left: NodeIdx, right: NodeIdx },
}

struct Node<T: Scalar, P> {
    bbox: Aabb2D<T>,
    kind: Kind<T, P>,
    parent: Option<NodeIdx>,
    depth: usize,
}

/// Index of a node inside a [`Bvh`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeIdx(usize);

impl NodeIdx {
    const fn get(self) -> usize {
        self.0
    }
}

impl<T: Scalar, P> Default for Bvh<T, P> {
    fn default() -> Self {
        Self {
            min_num: DEFAULT_MIN_NUM,
            len: 0,
            root: None,
            arena: Vec::new(),
        }
    }
}

impl<T: Scalar, P> Bvh<T, P> {
    /// Build a hierarchy over targets whose boxes are already known.
    ///
    /// Nodes holding `min_num` targets or fewer become leaves.
    /// An empty target list yields an empty hierarchy with no root.
    pub fn build(targets: Vec<Target<T, P>>, min_num: usize) -> Self {
        let mut bvh = Self {
            min_num,
            len: targets.len(),
            root: None,
            arena: Vec::new(),
        };
        if !targets.is_empty() {
            bvh.root = Some(bvh.divide(targets, None, 0));
        }
        tracing::trace!(
            targets = bvh.len,
            nodes = bvh.arena.len(),
            min_num,
            "built bvh"
        );
        bvh
    }

    /// Build a hierarchy over bare payloads, deriving each box with `bounds_of`.
    pub fn build_by<F>(payloads: Vec<P>, min_num: usize, mut bounds_of: F) -> Self
    where
        F: FnMut(&P) -> Aabb2D<T>,
    {
        let targets = payloads
            .into_iter()
            .map(|p| {
                let b = bounds_of(&p);
                (p, b)
            })
            .collect();
        Self::build(targets, min_num)
    }

    fn bbox_items(items: &[Target<T, P>]) -> Aabb2D<T> {
        items
            .iter()
            .fold(Aabb2D::empty(), |acc, (_, b)| union_aabb(acc, *b))
    }

    fn divide(
        &mut self,
        targets: Vec<Target<T, P>>,
        parent: Option<NodeIdx>,
        depth: usize,
    ) -> NodeIdx {
        let bbox = Self::bbox_items(&targets);
        let idx = NodeIdx(self.arena.len());
        self.arena.push(Node {
            bbox,
            kind: Kind::Leaf(Vec::new()),
            parent,
            depth,
        });
        if targets.len() <= self.min_num {
            self.arena[idx.get()].kind = Kind::Leaf(targets);
            return idx;
        }

        // Ties go to the vertical axis.
        let axis = if bbox.width() > bbox.height() {
            Axis::X
        } else {
            Axis::Y
        };
        let pos = bbox.mid(axis);
        let (a, b): (Vec<_>, Vec<_>) = targets
            .into_iter()
            .partition(|(_, bb)| bb.mid(axis) < pos);

        // Every item on one side: splitting again would never terminate.
        if a.is_empty() || b.is_empty() {
            let mut all = a;
            all.extend(b);
            self.arena[idx.get()].kind = Kind::Leaf(all);
            return idx;
        }

        let left = self.divide(a, Some(idx), depth + 1);
        let right = self.divide(b, Some(idx), depth + 1);
        self.arena[idx.get()].kind = Kind::Internal { left, right };
        idx
    }

    /// Leaf threshold this hierarchy was built with.
    pub fn min_num(&self) -> usize {
        self.min_num
    }

    /// Number of targets stored in the hierarchy.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if the hierarchy holds no targets.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of nodes (leaves and internal nodes).
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// The root node, if any.
    pub fn root(&self) -> Option<NodeRef<'_, T, P>> {
        self.root.map(|idx| NodeRef { bvh: self, idx })
    }

    /// Union box of every target, or `None` when empty.
    pub fn bbox(&self) -> Option<Aabb2D<T>> {
        self.root().map(|r| r.bbox())
    }

    /// Look up a node by index.
    pub fn node(&self, idx: NodeIdx) -> Option<NodeRef<'_, T, P>> {
        (idx.get() < self.arena.len()).then_some(NodeRef { bvh: self, idx })
    }

    /// Depth-first pre-order traversal.
    ///
    /// `descend` is evaluated on each node before it is visited; when it returns
    /// false neither that node nor its subtree is visited.
    pub fn traverse<V, D>(&self, mut visit: V, mut descend: D)
    where
        V: FnMut(NodeRef<'_, T, P>),
        D: FnMut(NodeRef<'_, T, P>) -> bool,
    {
        let Some(root) = self.root else {
            return;
        };
        let mut stack = vec![root];
        while let Some(idx) = stack.pop() {
            let node = NodeRef { bvh: self, idx };
            if !descend(node) {
                continue;
            }
            visit(node);
            if let Kind::Internal { left, right } = self.arena[idx.get()].kind {
                stack.push(right);
                stack.push(left);
            }
        }
    }

    /// Visit every node without pruning.
    pub fn traverse_all<V>(&self, visit: V)
    where
        V: FnMut(NodeRef<'_, T, P>),
    {
        self.traverse(visit, |_| true);
    }

    /// Payloads whose box contains the point.
    pub fn query_point(&self, x: T, y: T) -> impl Iterator<Item = &P> + '_ {
        let p = Aabb2D::new(x, y, x, y);
        self.query_rect(p)
    }

    /// Payloads whose box intersects the rectangle.
    pub fn query_rect(&self, rect: Aabb2D<T>) -> impl Iterator<Item = &P> + '_ {
        let mut out = Vec::new();
        if let Some(root_idx) = self.root {
            let mut stack = vec![root_idx];
            while let Some(i) = stack.pop() {
                let n = &self.arena[i.get()];
                if !n.bbox.overlaps(&rect) {
                    continue;
                }
                match &n.kind {
                    Kind::Leaf(items) => {
                        for (p, b) in items {
                            if b.overlaps(&rect) {
                                out.push(p);
                            }
                        }
                    }
                    Kind::Internal { left, right } => {
                        stack.push(*right);
                        stack.push(*left);
                    }
                }
            }
        }
        out.into_iter()
    }
}

/// Borrowed view of one hierarchy node.
pub struct NodeRef<'a, T: Scalar, P> {
    bvh: &'a Bvh<T, P>,
    idx: NodeIdx,
}

impl<T: Scalar, P> Clone for NodeRef<'_, T, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Scalar, P> Copy for NodeRef<'_, T, P> {}

impl<'a, T: Scalar, P> NodeRef<'a, T, P> {
    fn raw(&self) -> &'a Node<T, P> {
        &self.bvh.arena[self.idx.get()]
    }

    /// Index of this node.
    pub fn idx(&self) -> NodeIdx {
        self.idx
    }

    /// Union box of this subtree.
    pub fn bbox(&self) -> Aabb2D<T> {
        self.raw().bbox
    }

    /// Distance from the root (root is 0).
    pub fn depth(&self) -> usize {
        self.raw().depth
    }

    /// True if this node stores targets rather than children.
    pub fn is_leaf(&self) -> bool {
        matches!(self.raw().kind, Kind::Leaf(_))
    }

    /// Targets stored in this node; empty for internal nodes.
    pub fn targets(&self) -> &'a [Target<T, P>] {
        match &self.raw().kind {
            Kind::Leaf(items) => items,
            Kind::Internal { .. } => &[],
        }
    }

    /// The two children of an internal node.
    pub fn children(&self) -> Option<(Self, Self)> {
        match self.raw().kind {
            Kind::Leaf(_) => None,
            Kind::Internal { left, right } => Some((
                Self {
                    bvh: self.bvh,
                    idx: left,
                },
                Self {
                    bvh: self.bvh,
                    idx: right,
                },
            )),
        }
    }

    /// The parent node, `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        self.raw().parent.map(|idx| Self { bvh: self.bvh, idx })
    }
}

impl<T: Scalar, P> Debug for NodeRef<'_, T, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NodeRef")
            .field("idx", &self.idx)
            .field("bbox", &self.bbox())
            .field("depth", &self.depth())
            .field("leaf", &self.is_leaf())
            .finish_non_exhaustive()
    }
}

impl<T: Scalar, P> Debug for Bvh<T, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Bvh")
            .field("min_num", &self.min_num)
            .field("targets", &self.len)
            .field("arena_nodes", &self.arena.len())
            .field("has_root", &self.root.is_some())
            .finish_non_exhaustive()
    }
}

/// BVH with f32 coordinates.
pub type BvhF32<P> = Bvh<f32, P>;

/// BVH with f64 coordinates.
pub type BvhF64<P> = Bvh<f64, P>;

#[cfg(test)]
mod tests {
    use super::*;

    fn row(n: usize) -> Vec<Target<f64, usize>> {
        (0..n)
            .map(|i| {
                let x0 = i as f64 * 20.0;
                (i, Aabb2D::new(x0, 0.0, x0 + 10.0, 10.0))
            })
            .collect()
    }

    #[test]
    fn empty_build_has_no_root() {
        let b: BvhF64<u32> = Bvh::build(Vec::new(), DEFAULT_MIN_NUM);
        assert!(b.is_empty());
        assert!(b.root().is_none());
        assert!(b.bbox().is_none());
        assert_eq!(b.query_point(0.0, 0.0).count(), 0);
        let mut visited = 0;
        b.traverse_all(|_| visited += 1);
        assert_eq!(visited, 0);
    }

    #[test]
    fn small_set_is_single_leaf() {
        let b = Bvh::build(row(4), 4);
        let root = b.root().expect("root exists");
        assert!(root.is_leaf());
        assert_eq!(root.targets().len(), 4);
        assert_eq!(root.bbox(), Aabb2D::new(0.0, 0.0, 70.0, 10.0));
    }

    #[test]
    fn splits_along_longer_axis_at_midpoint() {
        let b = Bvh::build(row(12), 4);
        let root = b.root().expect("root exists");
        let (left, right) = root.children().expect("root must split");
        // Union spans x in [0, 230]; midpoint 115 separates centers 5..105 from 125..225.
        assert!(left.bbox().max_x <= 115.0);
        assert!(left.bbox().max_x < right.bbox().min_x);
        assert_eq!(left.parent().map(|p| p.idx()), Some(root.idx()));
        assert_eq!(right.depth(), 1);
    }

    #[test]
    fn coincident_centers_stop_splitting() {
        let targets: Vec<_> = (0..10_u32)
            .map(|i| (i, Aabb2D::new(0.0, 0.0, 10.0, 10.0)))
            .collect();
        let b = Bvh::build(targets, 2);
        let root = b.root().expect("root exists");
        assert!(root.is_leaf(), "degenerate split must produce a leaf");
        assert_eq!(root.targets().len(), 10);
        assert_eq!(b.node_count(), 1);
    }

    #[test]
    fn every_target_lands_in_exactly_one_leaf() {
        let b = Bvh::build(row(37), 3);
        let mut seen = vec![0_u32; 37];
        b.traverse_all(|n| {
            for (p, _) in n.targets() {
                seen[*p] += 1;
            }
            if let Some((l, r)) = n.children() {
                assert!(n.targets().is_empty(), "internal nodes hold no targets");
                let u = l.bbox().union(&r.bbox());
                assert_eq!(u, n.bbox(), "node box is the union of its children");
            } else {
                assert!(n.targets().len() <= 3);
            }
        });
        assert!(seen.iter().all(|c| *c == 1));
    }

    #[test]
    fn pruned_subtrees_are_not_visited() {
        let b = Bvh::build(row(16), 2);
        let mut leaves = Vec::new();
        let mut visited_min = Vec::new();
        b.traverse(
            |n| {
                visited_min.push(n.bbox().min_x);
                for (p, _) in n.targets() {
                    leaves.push(*p);
                }
            },
            |n| n.bbox().min_x < 100.0,
        );
        assert!(visited_min.iter().all(|&x| x < 100.0));
        assert!(leaves.contains(&0));
        assert!(!leaves.contains(&15), "far right leaf must be pruned");
    }

    #[test]
    fn queries_match_brute_force() {
        let mut s = 0x9E37_79B9_7F4A_7C15_u64;
        let mut next = || {
            s ^= s << 13;
            s ^= s >> 7;
            s ^= s << 17;
            (s >> 11) as f64 / (1_u64 << 53) as f64
        };
        let mut targets = Vec::new();
        for i in 0..200_usize {
            let x = next() * 1000.0;
            let y = next() * 1000.0;
            let w = 1.0 + next() * 40.0;
            let h = 1.0 + next() * 40.0;
            targets.push((i, Aabb2D::<f64>::from_xywh(x, y, w, h)));
        }
        let b = Bvh::build(targets.clone(), DEFAULT_MIN_NUM);
        for q in [
            Aabb2D::new(100.0, 100.0, 300.0, 250.0),
            Aabb2D::new(0.0, 0.0, 1.0, 1.0),
            Aabb2D::new(-10.0, -10.0, 2000.0, 2000.0),
        ] {
            let mut got: Vec<usize> = b.query_rect(q).copied().collect();
            let mut want: Vec<usize> = targets
                .iter()
                .filter(|(_, bb)| bb.overlaps(&q))
                .map(|(i, _)| *i)
                .collect();
            got.sort_unstable();
            want.sort_unstable();
            assert_eq!(got, want);
        }
    }

    #[test]
    fn build_by_derives_boxes() {
        let b: BvhF32<(f32, f32)> =
            Bvh::build_by(vec![(0.0, 0.0), (50.0, 50.0)], 1, |&(x, y)| {
                Aabb2D::new(x - 1.0, y - 1.0, x + 1.0, y + 1.0)
            });
        assert_eq!(b.len(), 2);
        let hits: Vec<_> = b.query_point(50.5, 49.5).collect();
        assert_eq!(hits, vec![&(50.0, 50.0)]);
    }
}
