// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Translate/rotate/scale decomposition on top of [`kurbo::Affine`].

use core::f64::consts::TAU;

use kurbo::{Affine, Point, Vec2};

/// Normalize an angle in radians into `[0, 2π)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    // `rem_euclid` can round up to exactly TAU for tiny negative inputs.
    if a >= TAU { 0.0 } else { a }
}

/// Vector operations that kurbo does not provide.
pub trait VecExt {
    /// Rotate by `angle` radians (positive is clockwise on a y-down canvas).
    fn rotated(self, angle: f64) -> Self;
    /// Angle of the vector from the +x axis, normalized into `[0, 2π)`.
    fn angle(self) -> f64;
    /// Component-wise product.
    fn mul_components(self, other: Self) -> Self;
    /// Unit vector, or `None` for the zero vector.
    fn normalized(self) -> Option<Self>
    where
        Self: Sized;
}

impl VecExt for Vec2 {
    fn rotated(self, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(self.x * c - self.y * s, self.x * s + self.y * c)
    }

    fn angle(self) -> f64 {
        normalize_angle(self.atan2())
    }

    fn mul_components(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y)
    }

    fn normalized(self) -> Option<Self> {
        let len = self.hypot();
        (len > 0.0 && len.is_finite()).then(|| self / len)
    }
}

/// Decomposed affine: scale first, then rotation, then translation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform {
    /// Translation.
    pub position: Vec2,
    /// Rotation in radians.
    pub rotation: f64,
    /// Non-uniform scale, applied about the local origin.
    pub scale: Vec2,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// No translation, no rotation, unit scale.
    pub const IDENTITY: Self = Self {
        position: Vec2::ZERO,
        rotation: 0.0,
        scale: Vec2::new(1.0, 1.0),
    };

    /// Create a transform from its parts.
    pub const fn new(position: Vec2, rotation: f64, scale: Vec2) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Compose into a matrix: `T * R * S`.
    pub fn to_affine(&self) -> Affine {
        compose(self.position, self.rotation, self.scale)
    }

    /// Decompose a matrix. See [`decompose`].
    pub fn from_affine(affine: Affine) -> Self {
        decompose(affine)
    }
}

/// Build `translate(position) * rotate(rotation) * scale(scale)`.
pub fn compose(position: Vec2, rotation: f64, scale: Vec2) -> Affine {
    Affine::translate(position)
        * Affine::rotate(rotation)
        * Affine::scale_non_uniform(scale.x, scale.y)
}

/// Split a matrix back into position, rotation, and scale.
///
/// Translation is read directly. The x scale is the length of the first basis
/// column and carries no sign; a reflection shows up as a negative y scale.
/// Rotation is the angle of the first basis column in `(-π, π]`.
pub fn decompose(affine: Affine) -> Transform {
    let [a, b, c, d, e, f] = affine.as_coeffs();
    let det = a * d - b * c;
    let sx = a.hypot(b);
    let sy = c.hypot(d).copysign(if det < 0.0 { -1.0 } else { 1.0 });
    Transform {
        position: Vec2::new(e, f),
        rotation: b.atan2(a),
        scale: Vec2::new(sx, sy),
    }
}

/// Invert a matrix, or `None` when it is singular or not finite.
pub fn try_invert(affine: Affine) -> Option<Affine> {
    let det = affine.determinant();
    if det == 0.0 || !det.is_finite() {
        return None;
    }
    let inv = affine.inverse();
    inv.is_finite().then_some(inv)
}

/// Apply only the linear part of `affine` to a vector.
pub fn transform_vector(affine: Affine, v: Vec2) -> Vec2 {
    let [a, b, c, d, _, _] = affine.as_coeffs();
    Vec2::new(a * v.x + c * v.y, b * v.x + d * v.y)
}

/// Linear interpolation between two points.
pub fn lerp(a: Point, b: Point, t: f64) -> Point {
    a.lerp(b, t)
}
