//! Core types for isosurface extraction.
//!
//! Provides the 3D point type used for vertex geometry and the integer grid
//! coordinate used to address samples in a cubic volume.

use core::ops::{Add, Div, Mul, Sub};

/// A 3D point with named fields for clarity.
///
/// Provides the arithmetic needed by edge interpolation and normal
/// computation, and conversions to/from arrays.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3 {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
    /// Z coordinate.
    pub z: f32,
}

impl Point3 {
    /// Create a new Point3.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Create a Point3 with all components set to the same value.
    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v, z: v }
    }

    /// Convert to an array.
    #[inline]
    pub const fn as_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Linear interpolation between two points.
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            z: self.z + (other.z - self.z) * t,
        }
    }

    /// Dot product with another point (treating both as vectors).
    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product with another point (treating both as vectors).
    #[inline]
    pub fn cross(self, other: Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Squared length of the vector.
    #[inline]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    /// Length (magnitude) of the vector.
    #[inline]
    pub fn length(self) -> f32 {
        libm::sqrtf(self.length_squared())
    }

    /// Normalize the vector to unit length.
    /// Returns a zero vector if the length is zero.
    #[inline]
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len == 0.0 {
            Self::splat(0.0)
        } else {
            self / len
        }
    }

    /// Component-wise minimum.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Self {
            x: if self.x < other.x { self.x } else { other.x },
            y: if self.y < other.y { self.y } else { other.y },
            z: if self.z < other.z { self.z } else { other.z },
        }
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self {
            x: if self.x > other.x { self.x } else { other.x },
            y: if self.y > other.y { self.y } else { other.y },
            z: if self.z > other.z { self.z } else { other.z },
        }
    }
}

impl From<[f32; 3]> for Point3 {
    #[inline]
    fn from(arr: [f32; 3]) -> Self {
        Self {
            x: arr[0],
            y: arr[1],
            z: arr[2],
        }
    }
}

impl From<Point3> for [f32; 3] {
    #[inline]
    fn from(p: Point3) -> Self {
        p.as_array()
    }
}

impl Add for Point3 {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Point3 {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f32> for Point3 {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

impl Div<f32> for Point3 {
    type Output = Self;

    #[inline]
    fn div(self, scalar: f32) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
            z: self.z / scalar,
        }
    }
}

/// Integer coordinate of a grid point in a cubic `dim³` volume.
///
/// Component `i` varies slowest in sample storage, matching the nested
/// order of the volume file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridCoord {
    /// Slowest-varying coordinate.
    pub i: usize,
    /// Middle coordinate.
    pub j: usize,
    /// Fastest-varying coordinate.
    pub k: usize,
}

impl GridCoord {
    /// Create a new GridCoord.
    #[inline]
    pub const fn new(i: usize, j: usize, k: usize) -> Self {
        Self { i, j, k }
    }

    /// Compute the flat index into a `dim³` sample buffer.
    /// Uses the storage order `i * dim² + j * dim + k`.
    #[inline]
    pub const fn flat_index(&self, dim: usize) -> usize {
        (self.i * dim + self.j) * dim + self.k
    }

    /// The grid point displaced by a corner offset.
    #[inline]
    pub const fn offset(&self, (di, dj, dk): (usize, usize, usize)) -> Self {
        Self {
            i: self.i + di,
            j: self.j + dj,
            k: self.k + dk,
        }
    }

    /// World-space position of this grid point for a given cell size.
    #[inline]
    pub fn position(&self, cell_size: f32) -> Point3 {
        Point3::new(
            self.i as f32 * cell_size,
            self.j as f32 * cell_size,
            self.k as f32 * cell_size,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point3_arithmetic() {
        let a = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::new(4.0, 5.0, 6.0);

        assert_eq!(a + b, Point3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Point3::new(3.0, 3.0, 3.0));
        assert_eq!(a * 2.0, Point3::new(2.0, 4.0, 6.0));
        assert_eq!(b / 2.0, Point3::new(2.0, 2.5, 3.0));
    }

    #[test]
    fn test_point3_dot_cross() {
        let a = Point3::new(1.0, 0.0, 0.0);
        let b = Point3::new(0.0, 1.0, 0.0);

        assert_eq!(a.dot(b), 0.0);
        assert_eq!(a.dot(a), 1.0);
        assert_eq!(a.cross(b), Point3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_point3_length_normalize() {
        let p = Point3::new(3.0, 4.0, 0.0);
        assert_eq!(p.length(), 5.0);

        let unit = p.normalize();
        assert!((unit.length() - 1.0).abs() < 1e-6);

        // Zero-length input stays at the origin
        assert_eq!(Point3::splat(0.0).normalize(), Point3::splat(0.0));
    }

    #[test]
    fn test_point3_lerp() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(10.0, 10.0, 10.0);

        assert_eq!(a.lerp(b, 0.5), Point3::new(5.0, 5.0, 5.0));
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
    }

    #[test]
    fn test_point3_min_max() {
        let a = Point3::new(1.0, 5.0, 3.0);
        let b = Point3::new(2.0, 4.0, 3.0);

        assert_eq!(a.min(b), Point3::new(1.0, 4.0, 3.0));
        assert_eq!(a.max(b), Point3::new(2.0, 5.0, 3.0));
    }

    #[test]
    fn test_grid_coord_flat_index() {
        let dim = 4usize;

        assert_eq!(GridCoord::new(0, 0, 0).flat_index(dim), 0);
        assert_eq!(GridCoord::new(0, 0, 1).flat_index(dim), 1);
        assert_eq!(GridCoord::new(0, 1, 0).flat_index(dim), 4);
        assert_eq!(GridCoord::new(1, 0, 0).flat_index(dim), 16);

        // Distinct coordinates map to distinct indices
        let mut seen = std::vec::Vec::new();
        for i in 0..dim {
            for j in 0..dim {
                for k in 0..dim {
                    let idx = GridCoord::new(i, j, k).flat_index(dim);
                    assert!(!seen.contains(&idx));
                    seen.push(idx);
                }
            }
        }
    }

    #[test]
    fn test_grid_coord_offset() {
        let c = GridCoord::new(2, 3, 4);
        assert_eq!(c.offset((1, 0, 1)), GridCoord::new(3, 3, 5));
        assert_eq!(c.offset((0, 0, 0)), c);
    }

    #[test]
    fn test_grid_coord_position() {
        let p = GridCoord::new(1, 2, 3).position(0.5);
        assert_eq!(p, Point3::new(0.5, 1.0, 1.5));
    }
}
