// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversions between geometry boxes and index boxes.

use kurbo::Point;
use tessera_geometry::BoundingBox;
use tessera_index::Aabb2D;

/// Geometry box to index box. The empty box maps to the inverted index box.
pub(crate) fn bbox_to_aabb(b: BoundingBox) -> Aabb2D<f64> {
    Aabb2D::new(b.min.x, b.min.y, b.max.x, b.max.y)
}

/// Index box to geometry box.
pub(crate) fn aabb_to_bbox(a: Aabb2D<f64>) -> BoundingBox {
    BoundingBox {
        min: Point::new(a.min_x, a.min_y),
        max: Point::new(a.max_x, a.max_y),
    }
}
