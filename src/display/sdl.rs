//! SDL2 window and presentation
//!
//! The color buffer is uploaded each frame into a streaming texture whose
//! pixel format matches it byte for byte, then stretched over the window.

use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};
use sdl2::EventPump;

use super::ColorBuffer;

/// SDL reports most failures as displayable errors of assorted types
fn sdl_err(e: impl ToString) -> String {
    e.to_string()
}

#[derive(Debug, Clone)]
pub enum InputEvent {
    Quit,
    KeyDown(Keycode),
}

pub struct Display {
    canvas: Canvas<Window>,
    events: EventPump,
    size: (u32, u32),
}

impl Display {
    /// Open a centred window of the given size.
    ///
    /// VSync stays off; the frame loop does its own pacing. The returned
    /// creator outlives the [`RenderTarget`] built from it.
    pub fn new(
        title: &str,
        width: u32,
        height: u32,
    ) -> Result<(Self, TextureCreator<WindowContext>), String> {
        let sdl = sdl2::init()?;
        let window = sdl
            .video()?
            .window(title, width, height)
            .position_centered()
            .build()
            .map_err(sdl_err)?;
        let canvas = window.into_canvas().accelerated().build().map_err(sdl_err)?;
        let creator = canvas.texture_creator();
        let events = sdl.event_pump()?;

        let display = Self {
            canvas,
            events,
            size: (width, height),
        };
        Ok((display, creator))
    }

    pub fn width(&self) -> u32 {
        self.size.0
    }

    pub fn height(&self) -> u32 {
        self.size.1
    }

    /// Upload `buffer` and flip
    pub fn present(&mut self, target: &mut RenderTarget, buffer: &ColorBuffer) -> Result<(), String> {
        let size = (buffer.width(), buffer.height());
        if size != target.size {
            return Err(format!(
                "color buffer is {}x{}, render target is {}x{}",
                size.0, size.1, target.size.0, target.size.1
            ));
        }
        let pitch = size.0 as usize * 4;
        target
            .texture
            .update(None, buffer.as_bytes(), pitch)
            .map_err(sdl_err)?;
        self.canvas.copy(&target.texture, None, None)?;
        self.canvas.present();
        Ok(())
    }

    /// Drain pending events. Key repeats are dropped so toggles flip once.
    pub fn poll_events(&mut self) -> Vec<InputEvent> {
        self.events
            .poll_iter()
            .filter_map(|event| match event {
                Event::Quit { .. } => Some(InputEvent::Quit),
                Event::KeyDown {
                    keycode: Some(key),
                    repeat: false,
                    ..
                } => Some(InputEvent::KeyDown(key)),
                _ => None,
            })
            .collect()
    }
}

/// Streaming ARGB8888 texture, the layout of `ColorBuffer`
pub struct RenderTarget<'a> {
    texture: Texture<'a>,
    size: (u32, u32),
}

impl<'a> RenderTarget<'a> {
    pub fn new(
        creator: &'a TextureCreator<WindowContext>,
        width: u32,
        height: u32,
    ) -> Result<Self, String> {
        let texture = creator
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(sdl_err)?;
        Ok(Self {
            texture,
            size: (width, height),
        })
    }
}
