//! Simple math utilities.

use std::fmt::Debug;
use std::ops::{Add, Mul, Sub};

/// Simple two-dimensional vector of any numerical type.
/// Supports only few mathematical operations
/// as this is used mainly as data struct.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Vec2<T>(pub T, pub T);

impl<T> Vec2<T> {
    /// Returns the vector with the maximum of either coordinates.
    pub fn max(self, other: Self) -> Self
    where
        T: Ord,
    {
        Vec2(self.0.max(other.0), self.1.max(other.1))
    }

    /// Returns the vector with the minimum of either coordinates.
    pub fn min(self, other: Self) -> Self
    where
        T: Ord,
    {
        Vec2(self.0.min(other.0), self.1.min(other.1))
    }

    /// Seeing this vector as a dimension or size (width and height),
    /// this returns the area that this dimensions contains (`width * height`).
    #[inline]
    pub fn area(self) -> T
    where
        T: Mul<T, Output = T>,
    {
        self.0 * self.1
    }

    /// The first component of this 2D vector.
    #[inline]
    pub fn x(self) -> T {
        self.0
    }

    /// The second component of this 2D vector.
    #[inline]
    pub fn y(self) -> T {
        self.1
    }

    /// The first component of this 2D vector.
    #[inline]
    pub fn width(self) -> T {
        self.0
    }

    /// The second component of this 2D vector.
    #[inline]
    pub fn height(self) -> T {
        self.1
    }

    /// Convert this two-dimensional coordinate to an index suited for one-dimensional flattened image arrays.
    /// Works for images that store the pixels row by row, one after another, in a single array.
    /// In debug mode, panics for an index out of bounds.
    #[inline]
    pub fn flat_index_for_size(self, resolution: Vec2<T>) -> T
    where
        T: Copy + Debug + Ord + Mul<Output = T> + Add<Output = T>,
    {
        debug_assert!(
            self.x() < resolution.width() && self.y() < resolution.height(),
            "Vec2 index {:?} is invalid for resolution {:?}",
            self,
            resolution
        );

        let Vec2(x, y) = self;
        y * resolution.width() + x
    }
}

impl<T: Sub<T>> Sub<Vec2<T>> for Vec2<T> {
    type Output = Vec2<T::Output>;
    fn sub(self, other: Vec2<T>) -> Self::Output {
        Vec2(self.0 - other.0, self.1 - other.1)
    }
}

impl<T> From<(T, T)> for Vec2<T> {
    fn from((x, y): (T, T)) -> Self {
        Vec2(x, y)
    }
}

impl<T> From<Vec2<T>> for (T, T) {
    fn from(vec2: Vec2<T>) -> Self {
        (vec2.0, vec2.1)
    }
}
