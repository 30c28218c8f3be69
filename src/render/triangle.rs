use crate::color::Color;
use crate::math3d::{Vec2, Vec4};
use crate::mesh::Tex2;

/// A face after transform and projection, ready to rasterize.
///
/// `points` hold screen x/y, normalized device z and the camera-space
/// depth in `w` (needed for perspective-correct texturing).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub points: [Vec4; 3],
    pub uvs: [Tex2; 3],
    pub color: Color,
    /// Outline color for the wireframe modes; the fill color when `None`
    pub border: Option<Color>,
    /// Mean camera-space z of the three vertices; sort key only
    pub avg_depth: f32,
}

impl Triangle {
    #[inline]
    pub fn screen_points(&self) -> [Vec2; 3] {
        self.points.map(|p| p.xy())
    }

    #[inline]
    pub fn border_color(&self) -> Color {
        self.border.unwrap_or(self.color)
    }
}

/// Order triangles nearest first. Draw with `.iter().rev()` for the
/// painter's algorithm.
pub fn sort_by_depth(triangles: &mut [Triangle]) {
    triangles.sort_unstable_by(|a, b| a.avg_depth.total_cmp(&b.avg_depth));
}
