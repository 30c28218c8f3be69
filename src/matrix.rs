//! 4x4 transform matrices
//!
//! Row-major, column vectors: `m * v` transforms `v`, and `a * b` applies `b`
//! first. Matrices are only built by the named constructors below or by
//! multiplying two of them.

use std::ops::Mul;

use crate::math3d::{Vec3, Vec4};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    m: [[f32; 4]; 4],
}

impl Mat4 {
    pub const IDENTITY: Self = Self {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// ```text
    /// | sx  0  0  0 |
    /// |  0 sy  0  0 |
    /// |  0  0 sz  0 |
    /// |  0  0  0  1 |
    /// ```
    pub fn scale(sx: f32, sy: f32, sz: f32) -> Self {
        let mut m = Self::IDENTITY.m;
        m[0][0] = sx;
        m[1][1] = sy;
        m[2][2] = sz;
        Self { m }
    }

    /// ```text
    /// |  1  0  0 tx |
    /// |  0  1  0 ty |
    /// |  0  0  1 tz |
    /// |  0  0  0  1 |
    /// ```
    pub fn translation(tx: f32, ty: f32, tz: f32) -> Self {
        let mut m = Self::IDENTITY.m;
        m[0][3] = tx;
        m[1][3] = ty;
        m[2][3] = tz;
        Self { m }
    }

    pub fn rotation_x(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        let mut m = Self::IDENTITY.m;
        m[1][1] = cos;
        m[1][2] = -sin;
        m[2][1] = sin;
        m[2][2] = cos;
        Self { m }
    }

    pub fn rotation_y(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        let mut m = Self::IDENTITY.m;
        m[0][0] = cos;
        m[0][2] = sin;
        m[2][0] = -sin;
        m[2][2] = cos;
        Self { m }
    }

    pub fn rotation_z(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        let mut m = Self::IDENTITY.m;
        m[0][0] = cos;
        m[0][1] = -sin;
        m[1][0] = sin;
        m[1][1] = cos;
        Self { m }
    }

    /// Perspective projection.
    ///
    /// - `fov`: vertical field of view in radians
    /// - `aspect`: height / width of the viewport
    ///
    /// ```text
    /// | aspect*cot(fov/2)           0           0                 0 |
    /// |                 0  cot(fov/2)           0                 0 |
    /// |                 0           0  zf/(zf-zn)  -(zf*zn)/(zf-zn) |
    /// |                 0           0           1                 0 |
    /// ```
    ///
    /// The bottom row copies camera-space z into w for the perspective divide.
    pub fn perspective(fov: f32, aspect: f32, znear: f32, zfar: f32) -> Self {
        let cot_half_fov = 1.0 / (fov / 2.0).tan();
        let dz = zfar - znear;
        let mut m = [[0.0; 4]; 4];
        m[0][0] = aspect * cot_half_fov;
        m[1][1] = cot_half_fov;
        m[2][2] = zfar / dz;
        m[2][3] = -(zfar * znear) / dz;
        m[3][2] = 1.0;
        Self { m }
    }

    /// Element at `row`, `col`
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.m[row][col]
    }

    /// Transform a point (`w = 1`) and drop the resulting w
    #[inline]
    pub fn transform_point(&self, v: Vec3) -> Vec3 {
        (*self * Vec4::from_point(v)).to_vec3()
    }

    /// Project a camera-space point.
    ///
    /// x, y and z come back divided by w (normalized device coordinates);
    /// w itself is kept, so it still holds the camera-space depth.
    #[inline]
    pub fn project(&self, v: Vec3) -> Vec4 {
        let clip = *self * Vec4::from_point(v);
        let ndc = clip.to_vec3();
        Vec4::new(ndc.x, ndc.y, ndc.z, clip.w)
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Mat4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let mut m = [[0.0; 4]; 4];
        for (i, row) in m.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.m[i][k] * rhs.m[k][j]).sum();
            }
        }
        Self { m }
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    #[inline]
    fn mul(self, v: Vec4) -> Vec4 {
        let row = |r: [f32; 4]| r[0] * v.x + r[1] * v.y + r[2] * v.z + r[3] * v.w;
        Vec4::new(row(self.m[0]), row(self.m[1]), row(self.m[2]), row(self.m[3]))
    }
}
