//! Mesh and face model
//!
//! A mesh owns its vertex and face lists plus the rotation/scale/translation
//! that place it in world space. Faces refer to vertices by 1-based index;
//! index 0 is never valid.

use crate::color::Color;
use crate::math3d::Vec3;
use crate::matrix::Mat4;

/// Texture coordinate
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Tex2 {
    pub u: f32,
    pub v: f32,
}

impl Tex2 {
    #[inline]
    pub const fn new(u: f32, v: f32) -> Self {
        Self { u, v }
    }
}

/// A triangular face: three 1-based vertex indices, their UVs and a flat color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    pub a: usize,
    pub b: usize,
    pub c: usize,
    pub uvs: [Tex2; 3],
    pub color: Color,
}

impl Face {
    /// White face with zeroed UVs
    pub const fn new(a: usize, b: usize, c: usize) -> Self {
        Self {
            a,
            b,
            c,
            uvs: [Tex2::new(0.0, 0.0); 3],
            color: Color::WHITE,
        }
    }

    pub const fn with_uvs(mut self, uvs: [Tex2; 3]) -> Self {
        self.uvs = uvs;
        self
    }

    pub const fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[inline]
    pub const fn indices(&self) -> [usize; 3] {
        [self.a, self.b, self.c]
    }
}

/// A face resolved against the mesh that owns it
#[derive(Debug, Clone, Copy)]
pub struct FaceRef<'a> {
    mesh: &'a Mesh,
    index: usize,
}

impl<'a> FaceRef<'a> {
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn face(&self) -> &'a Face {
        &self.mesh.faces[self.index]
    }

    /// Model-space vertices, or `None` if any index is outside `[1, vertex_count]`
    pub fn vertices(&self) -> Option<[Vec3; 3]> {
        let [a, b, c] = self.face().indices();
        Some([
            self.mesh.vertex(a)?,
            self.mesh.vertex(b)?,
            self.mesh.vertex(c)?,
        ])
    }
}

#[derive(Debug, Clone)]
pub struct Mesh {
    pub vertices: Vec<Vec3>,
    pub faces: Vec<Face>,
    pub rotation: Vec3,
    pub scale: Vec3,
    pub translation: Vec3,
}

impl Mesh {
    /// Empty mesh at the origin with unit scale
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
            rotation: Vec3::zero(),
            scale: Vec3::splat(1.0),
            translation: Vec3::zero(),
        }
    }

    pub fn from_parts(vertices: Vec<Vec3>, faces: Vec<Face>) -> Self {
        Self {
            vertices,
            faces,
            ..Self::new()
        }
    }

    /// The 2x2x2 cube centred on the origin, one color per side
    pub fn cube() -> Self {
        let vertices = vec![
            Vec3::new(-1.0, -1.0, -1.0), // 1
            Vec3::new(-1.0, 1.0, -1.0),  // 2
            Vec3::new(1.0, 1.0, -1.0),   // 3
            Vec3::new(1.0, -1.0, -1.0),  // 4
            Vec3::new(1.0, 1.0, 1.0),    // 5
            Vec3::new(1.0, -1.0, 1.0),   // 6
            Vec3::new(-1.0, 1.0, 1.0),   // 7
            Vec3::new(-1.0, -1.0, 1.0),  // 8
        ];

        let upper = [Tex2::new(0.0, 0.0), Tex2::new(0.0, 1.0), Tex2::new(1.0, 1.0)];
        let lower = [Tex2::new(0.0, 0.0), Tex2::new(1.0, 1.0), Tex2::new(1.0, 0.0)];
        let side = |a, b, c, d, color| {
            [
                Face::new(a, b, c).with_uvs(upper).with_color(color),
                Face::new(a, c, d).with_uvs(lower).with_color(color),
            ]
        };

        let faces = [
            side(1, 2, 3, 4, Color::RED),     // front
            side(4, 3, 5, 6, Color::GREEN),   // right
            side(6, 5, 7, 8, Color::BLUE),    // back
            side(8, 7, 2, 1, Color::YELLOW),  // left
            side(2, 7, 5, 3, Color::MAGENTA), // top
            side(6, 8, 1, 4, Color::CYAN),    // bottom
        ]
        .concat();

        Self::from_parts(vertices, faces)
    }

    /// Vertex by 1-based index
    #[inline]
    pub fn vertex(&self, index: usize) -> Option<Vec3> {
        index
            .checked_sub(1)
            .and_then(|i| self.vertices.get(i))
            .copied()
    }

    pub fn face(&self, index: usize) -> Option<FaceRef<'_>> {
        (index < self.faces.len()).then_some(FaceRef { mesh: self, index })
    }

    pub fn face_refs(&self) -> impl Iterator<Item = FaceRef<'_>> {
        (0..self.faces.len()).map(move |index| FaceRef { mesh: self, index })
    }

    /// Index of the first face with a vertex index outside `[1, vertex_count]`
    pub fn first_invalid_face(&self) -> Option<usize> {
        self.face_refs()
            .find(|f| f.vertices().is_none())
            .map(|f| f.index())
    }

    /// Model to world: scale, then rotate about z, y and x, then translate
    pub fn world_matrix(&self) -> Mat4 {
        let scale = Mat4::scale(self.scale.x, self.scale.y, self.scale.z);
        let rotation = Mat4::rotation_x(self.rotation.x)
            * Mat4::rotation_y(self.rotation.y)
            * Mat4::rotation_z(self.rotation.z);
        let translation =
            Mat4::translation(self.translation.x, self.translation.y, self.translation.z);
        translation * rotation * scale
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_shape() {
        let cube = Mesh::cube();
        assert_eq!(cube.vertices.len(), 8);
        assert_eq!(cube.faces.len(), 12);
        assert_eq!(cube.first_invalid_face(), None);
        assert_eq!(cube.scale, Vec3::splat(1.0));
    }

    #[test]
    fn test_vertex_is_one_based() {
        let cube = Mesh::cube();
        assert_eq!(cube.vertex(0), None);
        assert_eq!(cube.vertex(1), Some(Vec3::new(-1.0, -1.0, -1.0)));
        assert_eq!(cube.vertex(8), Some(Vec3::new(-1.0, -1.0, 1.0)));
        assert_eq!(cube.vertex(9), None);
    }

    #[test]
    fn test_face_ref_resolves_against_mesh() {
        let mut mesh = Mesh::cube();
        mesh.faces.push(Face::new(1, 2, 42));
        let face = mesh.face(0).map(|f| f.vertices());
        assert_eq!(
            face,
            Some(Some([
                Vec3::new(-1.0, -1.0, -1.0),
                Vec3::new(-1.0, 1.0, -1.0),
                Vec3::new(1.0, 1.0, -1.0),
            ]))
        );
        assert_eq!(mesh.face(12).and_then(|f| f.vertices()), None);
        assert_eq!(mesh.first_invalid_face(), Some(12));
        assert!(mesh.face(13).is_none());
    }

    #[test]
    fn test_world_matrix_scales_before_translating() {
        let mut mesh = Mesh::cube();
        mesh.scale = Vec3::splat(2.0);
        mesh.translation = Vec3::new(0.0, 0.0, 5.0);
        let v = mesh.world_matrix().transform_point(Vec3::new(1.0, 1.0, 1.0));
        assert!(v.approx_eq(&Vec3::new(2.0, 2.0, 7.0), 1e-5));
    }

    #[test]
    fn test_world_matrix_rotates_about_local_origin() {
        let mut mesh = Mesh::cube();
        mesh.rotation = Vec3::new(0.0, 0.0, std::f32::consts::PI);
        mesh.translation = Vec3::new(10.0, 0.0, 0.0);
        let v = mesh.world_matrix().transform_point(Vec3::new(1.0, 0.0, 0.0));
        assert!(v.approx_eq(&Vec3::new(9.0, 0.0, 0.0), 1e-5));
    }
}
