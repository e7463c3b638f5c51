//! Terminal 3D scene demo.
//!
//! Controls:
//! - Up/Down arrows: rotation speed
//! - Left/Right arrows: bounce speed
//! - T: toggle the ASCII render effect
//! - R: reset scene and controls
//! - Q or Escape: quit
//!
//! Usage:
//!   ascii-scene            - run interactive mode
//!   ascii-scene --debug    - render frames to ./debug/ files and exit

use anyhow::Context;
use ascii_scene::effect::{EffectPipeline, RenderPath};
use ascii_scene::motion::{self, Controls};
use ascii_scene::renderer::Renderer;
use ascii_scene::scene::Scene;
use ascii_scene::stats::FrameStats;
use ascii_scene::terminal::{parse_key_event, Action, TerminalDisplay};
use clap::Parser;
use log::{debug, info};
use std::fs;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(name = "ascii-scene", version, about = "Terminal 3D scene demo with a toggleable ASCII effect")]
struct Args {
    /// Render frames to ./debug/ files instead of running interactively
    #[arg(long)]
    debug: bool,

    /// Number of frames to render in debug mode
    #[arg(long, default_value_t = 10)]
    frames: u32,

    /// Start on the ASCII render path
    #[arg(long)]
    ascii: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.debug {
        run_debug(&args)
    } else {
        run_interactive(&args)
    }
}

fn run_interactive(args: &Args) -> anyhow::Result<()> {
    let mut terminal = TerminalDisplay::new().context("failed to initialize terminal")?;

    // Framebuffer is two pixels per character row (half-block rendering).
    let (cols, rows) = terminal.size();
    let mut renderer = Renderer::new(cols.max(10), (rows * 2).max(10));
    info!("viewport {}x{} cells", cols, rows);

    let mut scene = Scene::demo();
    let mut controls = Controls::default();
    let mut pipeline = EffectPipeline::new(if args.ascii {
        RenderPath::Ascii
    } else {
        RenderPath::Color
    });
    let mut stats = FrameStats::new();

    let frame_time = Duration::from_millis(33);
    let mut started = Instant::now();
    let mut last_tick = started;

    loop {
        if terminal.check_resize() {
            let (cols, rows) = terminal.size();
            renderer.resize(cols.max(10), (rows * 2).max(10));
            debug!("resized to {}x{} cells", cols, rows);
        }

        if let Some(key_event) = terminal.poll_input(Duration::from_millis(8))? {
            match parse_key_event(key_event) {
                Action::Quit => break,
                Action::ToggleEffect => {
                    pipeline.toggle();
                    info!("render path: {}", pipeline.active());
                }
                Action::RotationUp => controls.adjust_rotation(1),
                Action::RotationDown => controls.adjust_rotation(-1),
                Action::BounceUp => controls.adjust_bouncing(1),
                Action::BounceDown => controls.adjust_bouncing(-1),
                Action::Reset => {
                    scene = Scene::demo();
                    controls = Controls::default();
                    started = Instant::now();
                    last_tick = started;
                }
                Action::None => {}
            }
        }

        if last_tick.elapsed() < frame_time {
            continue;
        }

        stats.begin_frame();

        let now = Instant::now();
        let delta = now.duration_since(last_tick).as_secs_f32();
        let elapsed = now.duration_since(started).as_secs_f32();
        last_tick = now;

        motion::advance(&mut scene, &controls, delta, elapsed);
        renderer.render(&scene);
        let frame = pipeline.compose(&renderer);

        let status = format!(
            "{:>5.1} fps {:>6.1} ms | rotation {:.2} | bounce {:.3} | path {} | \
             [up/down] rotation  [left/right] bounce  [t]oggle ascii  [r]eset  [q]uit",
            stats.fps(),
            stats.frame_ms(),
            controls.rotation_speed(),
            controls.bouncing_speed(),
            pipeline.active(),
        );

        if let Err(e) = terminal.paint(&frame, &status) {
            if e.kind() == std::io::ErrorKind::BrokenPipe {
                break;
            }
            return Err(e).context("failed to paint frame");
        }

        stats.end_frame();
    }

    Ok(())
}

/// Render a fixed number of frames of both paths to ./debug/ and exit.
fn run_debug(args: &Args) -> anyhow::Result<()> {
    fs::create_dir_all("debug").context("failed to create debug directory")?;

    let (width, height) = match crossterm::terminal::size() {
        Ok((w, h)) => ((w as usize).max(10), ((h.saturating_sub(2) as usize) * 2).max(10)),
        Err(e) => {
            info!("no terminal size ({}), using 120x72", e);
            (120, 72)
        }
    };

    let mut renderer = Renderer::new(width, height);
    let mut scene = Scene::demo();
    let controls = Controls::default();

    let delta = 1.0 / 30.0;
    for frame in 0..args.frames {
        let elapsed = frame as f32 * delta;
        motion::advance(&mut scene, &controls, delta, elapsed);
        renderer.render(&scene);

        let ascii_path = format!("debug/frame_{:03}.txt", frame);
        fs::write(&ascii_path, renderer.to_ascii())
            .with_context(|| format!("failed to write {}", ascii_path))?;

        let color_path = format!("debug/frame_{:03}.ansi", frame);
        fs::write(&color_path, renderer.to_halfblock())
            .with_context(|| format!("failed to write {}", color_path))?;
    }

    println!("wrote {} frames to ./debug/", args.frames);
    Ok(())
}
