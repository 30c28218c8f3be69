//! Per-face visibility and lighting
//!
//! All functions take world-space vertices. The camera sits at
//! `camera_position` with no view rotation, so world space doubles as
//! camera space.

use crate::color::Color;
use crate::math3d::Vec3;

/// A single directional light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub direction: Vec3,
}

impl Light {
    pub const fn new(direction: Vec3) -> Self {
        Self { direction }
    }
}

impl Default for Light {
    /// Shining back toward a camera at the origin looking down +z
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, -1.0))
    }
}

/// Unit normal of triangle `a, b, c` from `ab x ac`.
///
/// Points toward the viewer when the vertices wind clockwise as seen from
/// the camera (left-handed, +z into the screen).
pub fn face_normal(vertices: &[Vec3; 3]) -> Vec3 {
    let [a, b, c] = *vertices;
    let ab = (b - a).normalize();
    let ac = (c - a).normalize();
    ab.cross(&ac).normalize()
}

/// True when the face points away from the camera or is seen edge-on
pub fn should_cull(vertices: &[Vec3; 3], camera_position: Vec3) -> bool {
    let normal = face_normal(vertices);
    let to_camera = camera_position - vertices[0];
    normal.dot(&to_camera) <= 0.0
}

/// Flat-shade `color` by how directly the face is turned toward the light.
/// Faces turned away go black.
pub fn illuminate(vertices: &[Vec3; 3], light: &Light, color: Color) -> Color {
    let normal = face_normal(vertices);
    let toward_light = (light.direction.normalize() - vertices[0].normalize()).normalize();
    color.with_intensity(normal.dot(&toward_light).max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Mesh;

    const TOL: f32 = 1e-5;

    /// Front side of the unit cube pushed to z = 5
    fn front_face() -> [Vec3; 3] {
        [
            Vec3::new(-1.0, -1.0, 4.0),
            Vec3::new(-1.0, 1.0, 4.0),
            Vec3::new(1.0, 1.0, 4.0),
        ]
    }

    #[test]
    fn test_normal_faces_camera() {
        let n = face_normal(&front_face());
        assert!(n.approx_eq(&Vec3::new(0.0, 0.0, -1.0), TOL));
    }

    #[test]
    fn test_normal_of_degenerate_face_is_finite() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        let n = face_normal(&[p, p, p]);
        assert!(n.x.is_finite() && n.y.is_finite() && n.z.is_finite());
    }

    #[test]
    fn test_cull_front_and_back() {
        let camera = Vec3::zero();
        let front = front_face();
        assert!(!should_cull(&front, camera));
        let back = [front[0], front[2], front[1]];
        assert!(should_cull(&back, camera));
    }

    #[test]
    fn test_cull_edge_on() {
        // Plane x = 0 contains the camera
        let face = [
            Vec3::new(0.0, -1.0, 4.0),
            Vec3::new(0.0, 1.0, 4.0),
            Vec3::new(0.0, 1.0, 6.0),
        ];
        assert!(should_cull(&face, Vec3::zero()));
    }

    #[test]
    fn test_cull_invariant_under_camera_scaling() {
        let mut cube = Mesh::cube();
        cube.translation = Vec3::new(1.5, -2.0, 6.0);
        cube.rotation = Vec3::new(0.3, 0.7, -0.2);
        let world = cube.world_matrix();

        let cameras = [
            Vec3::new(0.5, 0.25, -1.0),
            Vec3::new(-2.0, 1.0, 0.5),
            Vec3::new(0.1, -0.3, 0.2),
        ];
        for face in cube.face_refs() {
            let vertices = face.vertices().unwrap().map(|v| world.transform_point(v));
            for camera in cameras {
                let expected = should_cull(&vertices, camera);
                for k in [0.5_f32, 2.0, 10.0] {
                    // Scaling about the face keeps the camera on the same side
                    let scaled = vertices[0] + (camera - vertices[0]) * k;
                    assert_eq!(should_cull(&vertices, scaled), expected);
                }
            }
        }
    }

    #[test]
    fn test_cull_invariant_under_origin_scaling_for_cube() {
        // Camera positions scaled about the origin, cube in front of it
        let mut cube = Mesh::cube();
        cube.translation = Vec3::new(0.0, 0.0, 5.0);
        let world = cube.world_matrix();
        let camera = Vec3::new(0.0, 0.0, 0.5);
        for face in cube.face_refs() {
            let vertices = face.vertices().unwrap().map(|v| world.transform_point(v));
            let expected = should_cull(&vertices, camera);
            for k in [0.25_f32, 1.0, 2.0, 4.0] {
                assert_eq!(should_cull(&vertices, camera * k), expected);
            }
        }
    }

    #[test]
    fn test_illuminate_facing_light() {
        let lit = illuminate(&front_face(), &Light::default(), Color::RED);
        assert!(lit.r() > 200, "{:?}", lit);
        assert_eq!((lit.g(), lit.b(), lit.a()), (0, 0, 255));
    }

    #[test]
    fn test_illuminate_away_from_light_is_black() {
        let light = Light::new(Vec3::new(0.0, 0.0, 1.0));
        let dark = illuminate(&front_face(), &light, Color::WHITE);
        assert_eq!(dark, Color::BLACK);
    }
}
