use image::RgbaImage;

use crate::color::Color;
use crate::raster::Surface;

/// Grid line spacing in pixels for `draw_grid`
pub const GRID_SPACING_PX: u32 = 10;

/// Packed ARGB color buffer.
///
/// This is the canvas the rasterizer writes into each frame; the display
/// uploads it as an ARGB8888 streaming texture.
pub struct ColorBuffer {
    pixels: Vec<u32>,
    width: u32,
    height: u32,
}

impl ColorBuffer {
    /// Create a buffer of `width * height` black pixels
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![Color::BLACK.0; width as usize * height as usize],
            width,
            height,
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

    /// Check if coordinates are within bounds
    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Overwrite every pixel
    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color.0);
    }

    /// Set a single pixel (bounds checked)
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32);
            self.pixels[idx] = color.0;
        }
    }

    /// Read a pixel, `None` if out of bounds
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Color> {
        if self.in_bounds(x, y) {
            Some(Color(self.pixels[self.pixel_index(x as u32, y as u32)]))
        } else {
            None
        }
    }

    /// Fill a rectangle; parts outside the buffer are dropped
    pub fn draw_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) {
        for row in y..y + h as i32 {
            for col in x..x + w as i32 {
                self.set_pixel(col, row, color);
            }
        }
    }

    /// Background grid: every pixel on a row or column divisible by `spacing`
    pub fn draw_grid(&mut self, spacing: u32, color: Color) {
        let spacing = spacing.max(1);
        for y in 0..self.height {
            for x in 0..self.width {
                if x % spacing == 0 || y % spacing == 0 {
                    let idx = self.pixel_index(x, y);
                    self.pixels[idx] = color.0;
                }
            }
        }
    }

    /// Packed pixels, row-major
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Raw bytes for the streaming texture upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Copy into an RGBA image for saving snapshots
    pub fn to_rgba_image(&self) -> RgbaImage {
        let bytes = self
            .pixels
            .iter()
            .flat_map(|&p| Color(p).to_rgba_bytes())
            .collect();
        // Length is width * height * 4 by construction
        RgbaImage::from_raw(self.width, self.height, bytes)
            .unwrap_or_else(|| RgbaImage::new(self.width, self.height))
    }
}

impl Surface for ColorBuffer {
    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        Self::set_pixel(self, x, y, color);
    }
}
