//! Geometry pipeline and per-frame render state
//!
//! `Renderer::update` turns a mesh into a depth-sorted list of screen-space
//! triangles; `Renderer::render` paints that list farthest first through the
//! rasterizer, honoring the active [`RenderMode`].

mod pipeline;
mod renderer;
mod triangle;

pub use pipeline::{face_normal, illuminate, should_cull, Light};
pub use renderer::{render_triangle, FrameStats, Renderer};
pub use triangle::{sort_by_depth, Triangle};

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::math3d::Vec3;

/// What gets drawn for each triangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    Vertices,
    Wireframe,
    WireframeVertices,
    Filled,
    #[default]
    FilledWireframe,
    Textured,
    TexturedWireframe,
}

impl RenderMode {
    /// In key order: `1` selects the first entry
    pub const ALL: [Self; 7] = [
        Self::Vertices,
        Self::Wireframe,
        Self::WireframeVertices,
        Self::Filled,
        Self::FilledWireframe,
        Self::Textured,
        Self::TexturedWireframe,
    ];

    /// Mode bound to number key `digit` (1-7)
    pub fn from_digit(digit: u8) -> Option<Self> {
        digit
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i as usize))
            .copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Vertices => "vertices",
            Self::Wireframe => "wireframe",
            Self::WireframeVertices => "wireframe + vertices",
            Self::Filled => "filled",
            Self::FilledWireframe => "filled + wireframe",
            Self::Textured => "textured",
            Self::TexturedWireframe => "textured + wireframe",
        }
    }

    pub fn draws_vertices(&self) -> bool {
        matches!(self, Self::Vertices | Self::WireframeVertices)
    }

    pub fn draws_wireframe(&self) -> bool {
        matches!(
            self,
            Self::Wireframe | Self::WireframeVertices | Self::FilledWireframe | Self::TexturedWireframe
        )
    }

    pub fn draws_fill(&self) -> bool {
        matches!(self, Self::Filled | Self::FilledWireframe)
    }

    pub fn draws_texture(&self) -> bool {
        matches!(self, Self::Textured | Self::TexturedWireframe)
    }
}

/// Snapshot of the user-controlled state for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderContext {
    pub mode: RenderMode,
    pub culling: bool,
    pub lighting: bool,
    pub camera_position: Vec3,
    pub light: Light,
    /// Wireframe color; each face's own color when `None`
    pub wire_color: Option<Color>,
    pub vertex_color: Color,
    pub grid: bool,
    pub background: Color,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self {
            mode: RenderMode::default(),
            culling: true,
            lighting: true,
            camera_position: Vec3::zero(),
            light: Light::default(),
            wire_color: Some(Color::WHITE),
            vertex_color: Color::RED,
            grid: false,
            background: Color::BLACK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_digits() {
        assert_eq!(RenderMode::from_digit(0), None);
        assert_eq!(RenderMode::from_digit(1), Some(RenderMode::Vertices));
        assert_eq!(RenderMode::from_digit(4), Some(RenderMode::Filled));
        assert_eq!(RenderMode::from_digit(7), Some(RenderMode::TexturedWireframe));
        assert_eq!(RenderMode::from_digit(8), None);
    }

    #[test]
    fn test_modes_are_exclusive_fills() {
        for mode in RenderMode::ALL {
            assert!(!(mode.draws_fill() && mode.draws_texture()), "{:?}", mode);
        }
        assert!(RenderMode::WireframeVertices.draws_vertices());
        assert!(RenderMode::WireframeVertices.draws_wireframe());
        assert!(!RenderMode::Vertices.draws_wireframe());
    }

    #[test]
    fn test_mode_serde_names() {
        let mode: RenderMode = serde_json::from_str("\"textured_wireframe\"").unwrap();
        assert_eq!(mode, RenderMode::TexturedWireframe);
        assert_eq!(serde_json::to_string(&RenderMode::Filled).unwrap(), "\"filled\"");
    }
}
