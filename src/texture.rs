//! Texel buffers for textured rendering
//!
//! Packed ARGB texels, decoded from PNG or generated procedurally.

use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::color::Color;

/// A texture stored as packed ARGB texels, row-major from the top-left
#[derive(Debug, Clone)]
pub struct Texture {
    width: u32,
    height: u32,
    texels: Vec<Color>,
}

impl Texture {
    /// Create texture from raw ARGB texels
    pub fn from_argb(width: u32, height: u32, texels: Vec<Color>) -> Result<Self> {
        if width == 0 || height == 0 {
            bail!("texture must not be empty ({}x{})", width, height);
        }
        let expected = width as usize * height as usize;
        if texels.len() != expected {
            bail!(
                "expected {} texels for a {}x{} texture, got {}",
                expected,
                width,
                height,
                texels.len()
            );
        }
        Ok(Self {
            width,
            height,
            texels,
        })
    }

    /// Decode a PNG (or any format the `image` build supports) into ARGB texels
    pub fn from_png(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let img = image::open(path)
            .with_context(|| format!("failed to load texture {}", path.display()))?
            .to_rgba8();
        let (width, height) = img.dimensions();
        let texels = img
            .pixels()
            .map(|p| Color::from_argb(p[3], p[0], p[1], p[2]))
            .collect();
        Self::from_argb(width, height, texels)
            .with_context(|| format!("invalid texture {}", path.display()))
    }

    /// Generate a checkerboard pattern
    pub fn checkerboard(size: u32, tile_size: u32, c1: Color, c2: Color) -> Self {
        let tile_size = tile_size.max(1);
        let size = size.max(1);
        let texels = (0..size)
            .flat_map(|y| (0..size).map(move |x| (x, y)))
            .map(|(x, y)| {
                if ((x / tile_size) + (y / tile_size)) % 2 == 0 {
                    c1
                } else {
                    c2
                }
            })
            .collect();
        Self {
            width: size,
            height: size,
            texels,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Texel at integer coordinates, `None` outside `[0, width) x [0, height)`
    #[inline]
    pub fn texel(&self, x: i64, y: i64) -> Option<Color> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        self.texels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }
}
