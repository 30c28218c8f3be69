//! Keyboard controls
//!
//! Keys map to [`Command`]s, which flip the toggles held in [`Controls`].
//! Keys are matched by their SDL key name so the mapping works without a
//! window.

use log::info;

use crate::render::{RenderContext, RenderMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Mode(RenderMode),
    ToggleCulling,
    ToggleLighting,
    ToggleGrid,
    TogglePause,
    ToggleFps,
    Quit,
}

impl Command {
    /// Command bound to a key, by SDL key name ("1", "C", "Escape", ...)
    pub fn from_key_name(name: &str) -> Option<Self> {
        let command = match name {
            "Escape" => Self::Quit,
            "C" => Self::ToggleCulling,
            "L" => Self::ToggleLighting,
            "G" => Self::ToggleGrid,
            "P" => Self::TogglePause,
            "F" => Self::ToggleFps,
            digit => {
                let d = digit.parse::<u8>().ok()?;
                Self::Mode(RenderMode::from_digit(d)?)
            },
        };
        Some(command)
    }
}

pub const KEY_HELP: &[(&str, &str)] = &[
    ("1", "Vertices"),
    ("2", "Wireframe"),
    ("3", "Wireframe + vertices"),
    ("4", "Filled"),
    ("5", "Filled + wireframe"),
    ("6", "Textured"),
    ("7", "Textured + wireframe"),
    ("C", "Toggle back-face culling"),
    ("L", "Toggle lighting"),
    ("G", "Toggle grid"),
    ("P", "Pause animation"),
    ("F", "Toggle FPS log"),
    ("Escape", "Quit"),
];

/// Toggle state driven by the keyboard
#[derive(Debug, Clone)]
pub struct Controls {
    pub ctx: RenderContext,
    pub paused: bool,
    pub show_fps: bool,
    pub running: bool,
}

impl Controls {
    pub fn new(ctx: RenderContext) -> Self {
        Self {
            ctx,
            paused: false,
            show_fps: false,
            running: true,
        }
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Mode(mode) => {
                self.ctx.mode = mode;
                info!("Render mode: {}", mode.name());
            },
            Command::ToggleCulling => {
                self.ctx.culling = !self.ctx.culling;
                info!("Back-face culling: {}", on_off(self.ctx.culling));
            },
            Command::ToggleLighting => {
                self.ctx.lighting = !self.ctx.lighting;
                info!("Lighting: {}", on_off(self.ctx.lighting));
            },
            Command::ToggleGrid => {
                self.ctx.grid = !self.ctx.grid;
                info!("Grid: {}", on_off(self.ctx.grid));
            },
            Command::TogglePause => {
                self.paused = !self.paused;
                info!("Animation: {}", if self.paused { "paused" } else { "running" });
            },
            Command::ToggleFps => {
                self.show_fps = !self.show_fps;
                info!("FPS log: {}", on_off(self.show_fps));
            },
            Command::Quit => self.running = false,
        }
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "ON"
    } else {
        "OFF"
    }
}
