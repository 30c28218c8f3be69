//! Mesh animation
//!
//! Spins, grows and drifts the mesh at fixed per-second rates while holding
//! it at a set distance in front of the camera.

use serde::{Deserialize, Serialize};

use crate::math3d::Vec3;
use crate::mesh::Mesh;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Animation {
    /// Radians per second about x, y and z
    pub rotation_speed: [f32; 3],
    /// Scale units per second
    pub scale_speed: [f32; 3],
    /// World units per second; z is ignored, see `distance`
    pub translation_speed: [f32; 3],
    /// Fixed world z of the mesh origin
    pub distance: f32,
}

impl Default for Animation {
    fn default() -> Self {
        Self {
            rotation_speed: [1.5, 1.5, 1.5],
            scale_speed: [0.0; 3],
            translation_speed: [0.0; 3],
            distance: 5.0,
        }
    }
}

impl Animation {
    /// Put the mesh at its starting distance without moving it otherwise
    pub fn place(&self, mesh: &mut Mesh) {
        mesh.translation.z = self.distance;
    }

    /// Advance the mesh by `dt` seconds
    pub fn advance(&self, mesh: &mut Mesh, dt: f32) {
        mesh.rotation = mesh.rotation + Vec3::from(self.rotation_speed) * dt;
        mesh.scale = mesh.scale + Vec3::from(self.scale_speed) * dt;

        let drift = Vec3::from(self.translation_speed) * dt;
        mesh.translation.x += drift.x;
        mesh.translation.y += drift.y;
        self.place(mesh);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_scales_with_dt() {
        let anim = Animation {
            rotation_speed: [1.0, 2.0, 3.0],
            scale_speed: [0.5, 0.0, 0.0],
            translation_speed: [0.25, 0.0, 9.0],
            distance: 8.0,
        };
        let mut mesh = Mesh::cube();
        anim.advance(&mut mesh, 0.5);
        anim.advance(&mut mesh, 0.5);

        assert!(mesh.rotation.approx_eq(&Vec3::new(1.0, 2.0, 3.0), 1e-5));
        assert!(mesh.scale.approx_eq(&Vec3::new(1.5, 1.0, 1.0), 1e-5));
        assert!(mesh.translation.approx_eq(&Vec3::new(0.25, 0.0, 8.0), 1e-5));
    }

    #[test]
    fn test_place_only_sets_distance() {
        let mut mesh = Mesh::cube();
        mesh.translation.x = 2.0;
        Animation::default().place(&mut mesh);
        assert_eq!(mesh.translation, Vec3::new(2.0, 0.0, 5.0));
        assert_eq!(mesh.rotation, Vec3::zero());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let anim: Animation = serde_json::from_str(r#"{"distance": 12.0}"#).unwrap();
        assert_eq!(anim.distance, 12.0);
        assert_eq!(anim.rotation_speed, Animation::default().rotation_speed);
    }
}
