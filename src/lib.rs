//! Software 3D rasterizer
//!
//! Transforms a triangle mesh through world and perspective projection,
//! culls back faces, flat-shades, depth-sorts and scan-converts the result
//! into a packed ARGB color buffer.

pub mod animation;
pub mod app;
pub mod color;
pub mod config;
pub mod control;
pub mod display;
pub mod math3d;
pub mod matrix;
pub mod mesh;
pub mod obj;
pub mod raster;
pub mod render;
pub mod texture;
pub mod util;
