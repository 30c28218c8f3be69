mod color_buffer;
#[cfg(feature = "sdl")]
mod sdl;

pub use color_buffer::{ColorBuffer, GRID_SPACING_PX};
#[cfg(feature = "sdl")]
pub use sdl::{Display, InputEvent, RenderTarget};
