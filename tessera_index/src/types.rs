// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive box types and scalar helpers.

use core::cmp::Ordering;
use core::fmt::Debug;

/// Axis-aligned bounding box in 2D.
///
/// The empty box is inverted (`min = +inf`, `max = -inf`) so that growing it by
/// points or boxes is a plain union.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb2D<T> {
    /// Minimum x (left)
    pub min_x: T,
    /// Minimum y (top)
    pub min_y: T,
    /// Maximum x (right)
    pub max_x: T,
    /// Maximum y (bottom)
    pub max_y: T,
}

impl<T> Aabb2D<T> {
    /// Create a new AABB from min/max corners.
    pub const fn new(min_x: T, min_y: T, max_x: T, max_y: T) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

impl<T: Scalar> Aabb2D<T> {
    /// The empty (inverted) box, identity for [`Aabb2D::union`].
    pub fn empty() -> Self {
        Self::new(T::infinity(), T::infinity(), T::neg_infinity(), T::neg_infinity())
    }

    /// Whether this AABB contains the point (inclusive edges).
    pub fn contains_point(&self, x: T, y: T) -> bool {
        le(self.min_x, x) && le(self.min_y, y) && le(x, self.max_x) && le(y, self.max_y)
    }

    /// The intersection of two AABBs. May be empty.
    pub fn intersect(&self, other: &Self) -> Self {
        Self {
            min_x: max_t(self.min_x, other.min_x),
            min_y: max_t(self.min_y, other.min_y),
            max_x: min_t(self.max_x, other.max_x),
            max_y: min_t(self.max_y, other.max_y),
        }
    }

    /// Whether the two boxes share at least one point.
    pub fn overlaps(&self, other: &Self) -> bool {
        !self.intersect(other).is_empty()
    }

    /// The smallest box containing both boxes.
    pub fn union(&self, other: &Self) -> Self {
        union_aabb(*self, *other)
    }

    /// Grow the box to include a point.
    pub fn expand_point(&mut self, x: T, y: T) {
        self.min_x = min_t(self.min_x, x);
        self.min_y = min_t(self.min_y, y);
        self.max_x = max_t(self.max_x, x);
        self.max_y = max_t(self.max_y, y);
    }

    /// Return true if the AABB is empty or inverted (no area). Assumes no NaN.
    pub fn is_empty(&self) -> bool {
        lt(self.max_x, self.min_x) || lt(self.max_y, self.min_y)
    }

    /// Width of the box, zero when empty.
    pub fn width(&self) -> T {
        T::max_zero(T::sub(self.max_x, self.min_x))
    }

    /// Height of the box, zero when empty.
    pub fn height(&self) -> T {
        T::max_zero(T::sub(self.max_y, self.min_y))
    }

    /// Midpoint along the given axis.
    pub fn mid(&self, axis: Axis) -> T {
        match axis {
            Axis::X => T::mid(self.min_x, self.max_x),
            Axis::Y => T::mid(self.min_y, self.max_y),
        }
    }
}

impl Aabb2D<f32> {
    /// Create an AABB from origin and size in f32.
    pub const fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x + w,
            max_y: y + h,
        }
    }
}

impl Aabb2D<f64> {
    /// Create an AABB from origin and size in f64.
    pub const fn from_xywh(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x + w,
            max_y: y + h,
        }
    }
}

/// Split axis of a hierarchy node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal axis.
    X,
    /// Vertical axis.
    Y,
}

/// Numeric scalar abstraction for 2D AABBs used by the hierarchy.
///
/// Only floating-point scalars are supported since the empty box relies on infinities.
pub trait Scalar: Copy + PartialOrd + Debug {
    /// Subtract two scalar values: a - b.
    fn sub(a: Self, b: Self) -> Self;

    /// Positive infinity.
    fn infinity() -> Self;

    /// Negative infinity.
    fn neg_infinity() -> Self;

    /// Max of the scalar value and zero.
    fn max_zero(v: Self) -> Self;

    /// Midpoint between a and b (used for centroid ordering).
    fn mid(a: Self, b: Self) -> Self;
}

macro_rules! impl_float_scalar {
    ($t:ty) => {
        impl Scalar for $t {
            #[inline]
            fn sub(a: Self, b: Self) -> Self {
                a - b
            }

            #[inline]
            fn infinity() -> Self {
                <$t>::INFINITY
            }

            #[inline]
            fn neg_infinity() -> Self {
                <$t>::NEG_INFINITY
            }

            #[inline]
            fn max_zero(v: Self) -> Self {
                v.max(0.0)
            }

            #[inline]
            fn mid(a: Self, b: Self) -> Self {
                0.5 * (a + b)
            }
        }
    };
}

impl_float_scalar!(f32);
impl_float_scalar!(f64);

pub(crate) fn min_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Greater) => b,
        _ => a,
    }
}

pub(crate) fn max_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Less) => b,
        _ => a,
    }
}

pub(crate) fn le<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o != Ordering::Greater)
        .unwrap_or(false)
}

pub(crate) fn lt<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o == Ordering::Less)
        .unwrap_or(false)
}

pub(crate) fn union_aabb<T: PartialOrd + Copy>(a: Aabb2D<T>, b: Aabb2D<T>) -> Aabb2D<T> {
    Aabb2D {
        min_x: min_t(a.min_x, b.min_x),
        min_y: min_t(a.min_y, b.min_y),
        max_x: max_t(a.max_x, b.max_x),
        max_y: max_t(a.max_y, b.max_y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_union_identity() {
        let e = Aabb2D::<f64>::empty();
        assert!(e.is_empty());
        let b = Aabb2D::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(e.union(&b), b);
        assert_eq!(b.union(&e), b);
    }

    #[test]
    fn expand_point_is_idempotent() {
        let mut b = Aabb2D::<f64>::empty();
        b.expand_point(1.0, 1.0);
        b.expand_point(-1.0, 3.0);
        let once = b;
        b.expand_point(-1.0, 3.0);
        assert_eq!(b, once);
        assert_eq!(b, Aabb2D::new(-1.0, 1.0, 1.0, 3.0));
        assert_eq!(b.width(), 2.0);
        assert_eq!(b.height(), 2.0);
    }

    #[test]
    fn overlap_and_containment() {
        let a = Aabb2D::<f32>::from_xywh(0.0, 0.0, 10.0, 10.0);
        let b = Aabb2D::<f32>::from_xywh(10.0, 10.0, 5.0, 5.0);
        let c = Aabb2D::<f32>::from_xywh(11.0, 0.0, 5.0, 5.0);
        assert!(a.overlaps(&b), "touching corners share a point");
        assert!(!a.overlaps(&c));
        assert!(a.contains_point(10.0, 0.0));
        assert!(!a.contains_point(10.5, 0.0));
        assert_eq!(a.mid(Axis::X), 5.0);
    }
}
