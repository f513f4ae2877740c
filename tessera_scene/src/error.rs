// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors for structural scene edits.

use crate::types::NodeId;

/// Why a structural edit was rejected. The scene is unchanged when one is returned.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    /// The id is stale or was never issued by this scene.
    #[error("node {0:?} is not alive")]
    DeadNode(NodeId),
    /// Only groups can hold children.
    #[error("node {0:?} is not a group and cannot hold children")]
    NotAGroup(NodeId),
    /// The child is the parent or one of its ancestors.
    #[error("adding {child:?} under {parent:?} would make it its own ancestor")]
    Cycle {
        /// Requested parent.
        parent: NodeId,
        /// Node being added.
        child: NodeId,
    },
}
