//! Frame loop state shared by the windowed and headless front ends

use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};

use crate::animation::Animation;
use crate::color::Color;
use crate::config::Config;
use crate::control::Controls;
use crate::display::ColorBuffer;
use crate::mesh::Mesh;
use crate::obj::load_obj;
use crate::render::{FrameStats, Renderer};
use crate::texture::Texture;

/// Size and tile of the texture used when none is configured
const CHECKER_SIZE: u32 = 64;
const CHECKER_TILE: u32 = 8;

pub struct App {
    pub mesh: Mesh,
    pub texture: Texture,
    pub renderer: Renderer,
    pub buffer: ColorBuffer,
    pub animation: Animation,
    pub controls: Controls,
}

impl App {
    /// Load the configured mesh and texture and set up the pipeline
    pub fn new(config: &Config) -> Result<Self> {
        let mut mesh = match &config.mesh {
            Some(path) => load_obj(path)?,
            None => Mesh::cube(),
        };
        info!(
            "Mesh: {} vertices, {} faces",
            mesh.vertices.len(),
            mesh.faces.len()
        );

        let texture = match &config.texture {
            Some(path) => Texture::from_png(path).unwrap_or_else(|e| {
                warn!("{:#}; using checkerboard", e);
                default_texture()
            }),
            None => default_texture(),
        };

        let animation = config.animation;
        animation.place(&mut mesh);

        Ok(Self {
            mesh,
            texture,
            renderer: Renderer::new(
                config.width,
                config.height,
                config.fov_radians(),
                config.znear,
                config.zfar,
            ),
            buffer: ColorBuffer::new(config.width, config.height),
            animation,
            controls: Controls::new(config.render_context()),
        })
    }

    /// Animate by `dt` seconds (unless paused) and draw one frame
    pub fn step(&mut self, dt: f32) -> FrameStats {
        if !self.controls.paused {
            self.animation.advance(&mut self.mesh, dt);
        }
        let ctx = self.controls.ctx;
        let stats = self.renderer.update(&self.mesh, &ctx);
        self.renderer
            .draw_frame(&mut self.buffer, &ctx, Some(&self.texture));
        stats
    }

    /// Render `frames` frames at a fixed `1 / fps` step and save the last as PNG
    pub fn run_headless(&mut self, frames: u32, fps: u32, output: &Path) -> Result<()> {
        let dt = 1.0 / fps.max(1) as f32;
        let mut stats = FrameStats::default();
        for _ in 0..frames {
            stats = self.step(dt);
        }
        info!(
            "Rendered {} frames; last frame drew {} of {} faces",
            frames, stats.emitted, stats.faces
        );

        self.buffer
            .to_rgba_image()
            .save(output)
            .with_context(|| format!("failed to write {}", output.display()))?;
        info!("Saved {}", output.display());
        Ok(())
    }
}

fn default_texture() -> Texture {
    Texture::checkerboard(CHECKER_SIZE, CHECKER_TILE, Color::SILVER, Color::GRID)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderMode;

    fn small_config() -> Config {
        Config {
            width: 64,
            height: 48,
            ..Config::default()
        }
    }

    #[test]
    fn test_default_app_draws_cube() {
        let mut app = App::new(&small_config()).unwrap();
        assert_eq!(app.mesh.translation.z, 5.0);
        let stats = app.step(0.0);
        assert_eq!(stats.faces, 12);
        assert!(stats.emitted > 0);
        // Something other than the background landed in the middle
        assert_ne!(app.buffer.get_pixel(32, 24), Some(Color::BLACK));
    }

    #[test]
    fn test_pause_freezes_mesh() {
        let mut app = App::new(&small_config()).unwrap();
        app.controls.paused = true;
        app.step(1.0);
        assert_eq!(app.mesh.rotation, crate::math3d::Vec3::zero());
        app.controls.paused = false;
        app.step(1.0);
        assert_ne!(app.mesh.rotation, crate::math3d::Vec3::zero());
    }

    #[test]
    fn test_missing_texture_falls_back() {
        let config = Config {
            texture: Some("/no/such/texture.png".into()),
            render_mode: RenderMode::Textured,
            ..small_config()
        };
        let app = App::new(&config).unwrap();
        assert_eq!(app.texture.width(), CHECKER_SIZE);
    }

    #[test]
    fn test_missing_mesh_is_an_error() {
        let config = Config {
            mesh: Some("/no/such/mesh.obj".into()),
            ..small_config()
        };
        assert!(App::new(&config).is_err());
    }

    #[test]
    fn test_headless_writes_png() {
        let dir = std::env::temp_dir().join(format!("scanline3d-app-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let output = dir.join("frame.png");

        let mut app = App::new(&small_config()).unwrap();
        app.run_headless(3, 30, &output).unwrap();

        let img = image::open(&output).unwrap();
        assert_eq!((img.width(), img.height()), (64, 48));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
