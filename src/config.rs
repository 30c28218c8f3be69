//! Startup configuration
//!
//! A JSON document (every field optional) overlaid by command-line flags.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::animation::Animation;
use crate::color::Color;
use crate::math3d::Vec3;
use crate::render::{Light, RenderContext, RenderMode};

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;
pub const DEFAULT_OUTPUT: &str = "frame.png";
/// Largest accepted width or height
pub const MAX_DIMENSION: u32 = 16384;

pub const USAGE: &str = "\
Usage: scanline3d [OPTIONS]

Options:
  --config PATH             Load settings from a JSON file
  --width W, -w W           Window width in pixels (default: 800)
  --height H, -h H          Window height in pixels (default: 600)
  --resolution WxH, -r WxH  Set both (e.g. 1280x720)
  --mesh PATH               OBJ mesh to render (default: built-in cube)
  --texture PATH            PNG texture (default: checkerboard)
  --headless N              Render N frames off-screen and save the last one
  --output PATH             Snapshot path for --headless (default: frame.png)
  --help                    Show this help message";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub fov_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
    pub mesh: Option<PathBuf>,
    pub texture: Option<PathBuf>,
    pub render_mode: RenderMode,
    pub culling: bool,
    pub lighting: bool,
    pub light_direction: [f32; 3],
    pub camera_position: [f32; 3],
    /// Packed `0xAARRGGBB`
    pub background: Color,
    pub grid: bool,
    /// Packed `0xAARRGGBB`; `null` outlines each face in its own color
    pub wire_color: Option<Color>,
    pub animation: Animation,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            fps: 30,
            fov_degrees: 60.0,
            znear: 0.1,
            zfar: 100.0,
            mesh: None,
            texture: None,
            render_mode: RenderMode::default(),
            culling: true,
            lighting: true,
            light_direction: [0.0, 0.0, -1.0],
            camera_position: [0.0, 0.0, 0.0],
            background: Color::BLACK,
            grid: false,
            wire_color: Some(Color::WHITE),
            animation: Animation::default(),
        }
    }
}

impl Config {
    /// Load from a JSON file; missing fields take their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        serde_json::from_str(&json).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("failed to write config {}", path.display()))
    }

    /// Config file named by `--config` (or defaults), then the other flags on top
    pub fn from_args(args: &Args) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_args(args);
        config.validate()?;
        Ok(config)
    }

    pub fn apply_args(&mut self, args: &Args) {
        if let Some(width) = args.width {
            self.width = width;
        }
        if let Some(height) = args.height {
            self.height = height;
        }
        if let Some(mesh) = &args.mesh {
            self.mesh = Some(mesh.clone());
        }
        if let Some(texture) = &args.texture {
            self.texture = Some(texture.clone());
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            bail!("resolution must be non-zero, got {}x{}", self.width, self.height);
        }
        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            bail!(
                "resolution {}x{} exceeds {} pixels per side",
                self.width,
                self.height,
                MAX_DIMENSION
            );
        }
        if self.fps == 0 {
            bail!("fps must be at least 1");
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            bail!("fov_degrees must be between 0 and 180, got {}", self.fov_degrees);
        }
        if !(self.znear > 0.0 && self.zfar > self.znear) {
            bail!(
                "clip planes need 0 < znear < zfar, got znear={} zfar={}",
                self.znear,
                self.zfar
            );
        }
        Ok(())
    }

    #[inline]
    pub fn fov_radians(&self) -> f32 {
        self.fov_degrees.to_radians()
    }

    /// Initial per-frame render state
    pub fn render_context(&self) -> RenderContext {
        RenderContext {
            mode: self.render_mode,
            culling: self.culling,
            lighting: self.lighting,
            camera_position: Vec3::from(self.camera_position),
            light: Light::new(Vec3::from(self.light_direction)),
            wire_color: self.wire_color,
            grid: self.grid,
            background: self.background,
            ..RenderContext::default()
        }
    }
}

// ============================================================================
// Command line
// ============================================================================

/// Parsed command-line flags
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    pub config: Option<PathBuf>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub mesh: Option<PathBuf>,
    pub texture: Option<PathBuf>,
    /// Frames to render without a window
    pub headless: Option<u32>,
    pub output: Option<PathBuf>,
    pub help: bool,
}

impl Args {
    /// Parse flags, excluding the program name
    pub fn parse<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = Self::default();
        let mut args = args.into_iter();

        while let Some(flag) = args.next() {
            let mut value = || {
                args.next()
                    .ok_or_else(|| anyhow!("{} needs a value", flag))
            };
            match flag.as_str() {
                "--config" => parsed.config = Some(value()?.into()),
                "--width" | "-w" => parsed.width = Some(parse_number(&value()?, "width")?),
                "--height" | "-h" => parsed.height = Some(parse_number(&value()?, "height")?),
                "--resolution" | "-r" => {
                    let (w, h) = parse_resolution(&value()?)?;
                    parsed.width = Some(w);
                    parsed.height = Some(h);
                },
                "--mesh" => parsed.mesh = Some(value()?.into()),
                "--texture" => parsed.texture = Some(value()?.into()),
                "--headless" => parsed.headless = Some(parse_number(&value()?, "frame count")?),
                "--output" => parsed.output = Some(value()?.into()),
                "--help" => parsed.help = true,
                other => bail!("unknown option {:?} (try --help)", other),
            }
        }

        Ok(parsed)
    }

    /// Snapshot path for headless runs
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }
}

fn parse_number(value: &str, what: &str) -> Result<u32> {
    value
        .parse()
        .with_context(|| format!("invalid {} {:?}", what, value))
}

/// `WxH`, e.g. `1920x1080`
fn parse_resolution(value: &str) -> Result<(u32, u32)> {
    let (w, h) = value
        .split_once('x')
        .ok_or_else(|| anyhow!("resolution must look like WxH, got {:?}", value))?;
    Ok((parse_number(w, "width")?, parse_number(h, "height")?))
}
