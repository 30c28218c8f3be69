//! Vector math for the geometry pipeline
//!
//! 2D screen points, 3D model/world points and homogeneous 4D points.
//! Everything is `Copy` and passed by value.

use std::ops::{Add, Mul, Neg, Sub};

/// Tolerance used by the approximate comparisons in this module
pub const EPSILON: f32 = 1e-5;

/// Approximate float equality
#[inline]
pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

// ============================================================================
// Vec2
// ============================================================================

/// 2D Vector (screen-space points)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit vector in the same direction. A zero vector is returned unchanged.
    #[inline]
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 0.0 {
            Self {
                x: self.x / len,
                y: self.y / len,
            }
        } else {
            *self
        }
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// z component of the 3D cross product; twice the signed area of the
    /// parallelogram spanned by `self` and `other`
    #[inline]
    pub fn cross(&self, other: &Self) -> f32 {
        self.x * other.y - self.y * other.x
    }

    /// `dx/dy` of the segment from `self` to `other`, 0 for a horizontal segment
    #[inline]
    pub fn inv_gradient(&self, other: &Self) -> f32 {
        let dy = other.y - self.y;
        if dy == 0.0 {
            0.0
        } else {
            (other.x - self.x) / dy
        }
    }

    /// Approximate equality check for floating point comparison
    #[inline]
    pub fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon && (self.y - other.y).abs() < epsilon
    }
}

impl Add for Vec2 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Vec2 {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

// ============================================================================
// Vec3
// ============================================================================

/// 3D Vector
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v, z: v }
    }

    #[inline]
    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Unit vector in the same direction.
    ///
    /// A zero-length vector has no direction; it is returned unchanged instead
    /// of dividing by zero, so the result is still the zero vector.
    #[inline]
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 0.0 {
            Self {
                x: self.x / len,
                y: self.y / len,
                z: self.z / len,
            }
        } else {
            *self
        }
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn cross(&self, other: &Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Drop z
    #[inline]
    pub const fn xy(&self) -> Vec2 {
        Vec2 {
            x: self.x,
            y: self.y,
        }
    }

    /// Approximate equality check for floating point comparison
    #[inline]
    pub fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon
            && (self.y - other.y).abs() < epsilon
            && (self.z - other.z).abs() < epsilon
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self { x, y, z }
    }
}

impl Add for Vec3 {
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

impl Sub for Vec3 {
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

impl Neg for Vec3 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl Mul<f32> for Vec3 {
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

impl Mul<Vec3> for f32 {
    type Output = Vec3;
    #[inline]
    fn mul(self, v: Vec3) -> Vec3 {
        v * self
    }
}

// ============================================================================
// Vec4
// ============================================================================

/// Homogeneous point. After projection `w` holds the camera-space depth,
/// which the texture mapper reuses for perspective correction.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Promote a point to homogeneous coordinates (`w = 1`)
    #[inline]
    pub const fn from_point(v: Vec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
            w: 1.0,
        }
    }

    /// Perspective division. Coordinates are left as they are when `w == 0`.
    #[inline]
    pub fn to_vec3(&self) -> Vec3 {
        if self.w == 0.0 {
            Vec3::new(self.x, self.y, self.z)
        } else {
            Vec3::new(self.x / self.w, self.y / self.w, self.z / self.w)
        }
    }

    /// x and y without any division
    #[inline]
    pub const fn xy(&self) -> Vec2 {
        Vec2 {
            x: self.x,
            y: self.y,
        }
    }
}

impl From<Vec3> for Vec4 {
    fn from(v: Vec3) -> Self {
        Self::from_point(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_idempotent() {
        let samples = [
            Vec3::new(3.0, 4.0, 0.0),
            Vec3::new(-1.0, 2.0, -7.5),
            Vec3::new(0.001, 0.0, 0.002),
            Vec3::new(1000.0, -250.0, 12.0),
        ];
        for v in samples {
            let once = v.normalize();
            let twice = once.normalize();
            assert!(once.approx_eq(&twice, EPSILON), "{:?} vs {:?}", once, twice);
            assert!(approx_eq(once.length(), 1.0));
        }
    }

    #[test]
    fn test_normalize_zero_is_finite() {
        let n = Vec3::zero().normalize();
        assert_eq!(n, Vec3::zero());
        assert!(n.x.is_finite() && n.y.is_finite() && n.z.is_finite());
    }

    #[test]
    fn test_cross_right_handed() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let y = Vec3::new(0.0, 1.0, 0.0);
        assert!(x.cross(&y).approx_eq(&Vec3::new(0.0, 0.0, 1.0), EPSILON));
        assert!(y.cross(&x).approx_eq(&Vec3::new(0.0, 0.0, -1.0), EPSILON));
    }

    #[test]
    fn test_dot() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert!((a.dot(&b) - 32.0).abs() < 0.001);
    }

    #[test]
    fn test_inv_gradient_horizontal_is_zero() {
        let a = Vec2::new(0.0, 5.0);
        let b = Vec2::new(10.0, 5.0);
        assert_eq!(a.inv_gradient(&b), 0.0);
        assert_eq!(Vec2::new(0.0, 0.0).inv_gradient(&Vec2::new(4.0, 2.0)), 2.0);
    }

    #[test]
    fn test_perspective_divide_skips_zero_w() {
        let v = Vec4::new(2.0, 4.0, 6.0, 0.0);
        assert_eq!(v.to_vec3(), Vec3::new(2.0, 4.0, 6.0));

        let v = Vec4::new(2.0, 4.0, 6.0, 2.0);
        assert_eq!(v.to_vec3(), Vec3::new(1.0, 2.0, 3.0));
    }
}
