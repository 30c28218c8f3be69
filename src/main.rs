use anyhow::{anyhow, Result};

use scanline3d::app::App;
use scanline3d::config::{Args, Config, USAGE};
use scanline3d::control::KEY_HELP;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse(std::env::args().skip(1))?;
    if args.help {
        println!("{}", USAGE);
        return Ok(());
    }

    let config = Config::from_args(&args)?;
    let mut app = App::new(&config)?;

    match args.headless {
        Some(frames) => app.run_headless(frames, config.fps, &args.output_path()),
        None => run_windowed(&mut app, &config),
    }
}

#[cfg(feature = "sdl")]
fn run_windowed(app: &mut App, config: &Config) -> Result<()> {
    use log::info;
    use scanline3d::control::Command;
    use scanline3d::display::{Display, InputEvent, RenderTarget};
    use scanline3d::util::{FpsCounter, FramePacer};

    let (mut display, texture_creator) =
        Display::new("scanline3d", config.width, config.height).map_err(|e| anyhow!(e))?;
    let mut target = RenderTarget::new(&texture_creator, display.width(), display.height())
        .map_err(|e| anyhow!(e))?;

    let mut pacer = FramePacer::new(config.fps);
    let mut fps_counter = FpsCounter::new(60);
    let mut frame: u64 = 0;

    println!("=== scanline3d ===");
    println!("Resolution: {}x{} @ {} fps", config.width, config.height, config.fps);
    println!("Use --help for command line options.");
    println!("Controls:");
    for (key, action) in KEY_HELP {
        println!("  {:<10} - {}", key, action);
    }

    while app.controls.running {
        for event in display.poll_events() {
            let command = match event {
                InputEvent::Quit => Some(Command::Quit),
                InputEvent::KeyDown(key) => Command::from_key_name(&key.name()),
            };
            if let Some(command) = command {
                app.controls.apply(command);
            }
        }

        let dt = pacer.wait();
        let avg_fps = fps_counter.record(dt);
        app.step(dt);
        display
            .present(&mut target, &app.buffer)
            .map_err(|e| anyhow!(e))?;

        frame += 1;
        if app.controls.show_fps && frame % config.fps.max(1) as u64 == 0 {
            let (min, max) = fps_counter.min_max_fps();
            info!(
                "FPS: {:.1} (min {:.1}, max {:.1}), {:.2} ms/frame",
                avg_fps,
                min,
                max,
                fps_counter.avg_frame_time_ms()
            );
        }
    }

    Ok(())
}

#[cfg(not(feature = "sdl"))]
fn run_windowed(_app: &mut App, _config: &Config) -> Result<()> {
    Err(anyhow!(
        "built without the `sdl` feature; use --headless N to render to a file"
    ))
}
