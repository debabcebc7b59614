// MView6 -- High-performance PDF and photo viewer built with Rust and GTK4
//
// Copyright (c) 2024-2025 Martin van der Werff <github (at) newinnovations.nl>
//
// This file is part of MView6.
//
// MView6 is free software: you can redistribute it and/or modify it under the terms of
// the GNU Affero General Public License as published by the Free Software Foundation, either
// version 3 of the License, or (at your option) any later version.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS" AND ANY EXPRESS OR
// IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE IMPLIED WARRANTIES OF MERCHANTABILITY AND
// FITNESS FOR A PARTICULAR PURPOSE ARE DISCLAIMED. IN NO EVENT SHALL THE AUTHOR BE LIABLE FOR ANY
// DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT
// LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR
// BUSINESS INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT,
// STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
// OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use mview_viewport::{
    rect::{PointD, SizeD},
    view::{DisplaySurface, RedrawReason},
    ViewerConfig, ViewportState, ZoomEngine, ZoomMode,
};

#[derive(Parser)]
#[command(name = "mview-zoom", about = "Zoom and pan calculator of the MView6 viewer")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a zoom mode for an image and viewport size
    Resolve(ResolveArgs),
    /// Apply a zoom mode and follow it with mouse wheel steps
    Wheel(WheelArgs),
    /// Show the effective configuration
    Config,
}

#[derive(Args)]
struct SceneArgs {
    /// Natural image size, e.g. 800x600
    #[arg(long, value_parser = parse_size)]
    image: SizeD,

    /// Viewport size, e.g. 400x400
    #[arg(long, value_parser = parse_size)]
    viewport: SizeD,

    /// Zoom mode (defaults to the configured mode)
    #[arg(long)]
    mode: Option<ZoomMode>,

    /// Degrade clipping fit modes to fit-to-screen
    #[arg(long)]
    aspect_safety: bool,

    /// Pinned zoom percentage used by the custom zoom modes
    #[arg(long)]
    percentage: Option<f64>,
}

#[derive(Args)]
struct ResolveArgs {
    #[command(flatten)]
    scene: SceneArgs,
}

#[derive(Args)]
struct WheelArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Cursor position in the viewport, e.g. 120,80
    #[arg(long, value_parser = parse_point)]
    cursor: PointD,

    /// Number of wheel notches
    #[arg(long, default_value_t = 1)]
    steps: u32,

    /// Zoom out instead of in
    #[arg(long)]
    out: bool,

    /// Disable cursor anchoring
    #[arg(long)]
    no_anchor: bool,
}

/// Display surface without a window, redraw requests are only logged
struct HeadlessSurface {
    size: SizeD,
}

impl DisplaySurface for HeadlessSurface {
    fn viewport_size(&self) -> SizeD {
        self.size
    }

    fn request_redraw(&mut self, state: &ViewportState, reason: RedrawReason) {
        debug!("redraw {reason:?}: {}", state.status_label());
    }

    fn clear(&mut self) {
        debug!("clear");
    }
}

fn parse_pair(value: &str, separator: char) -> Result<(f64, f64)> {
    let (a, b) = value
        .split_once(separator)
        .with_context(|| format!("expected two numbers separated by '{separator}'"))?;
    Ok((a.trim().parse()?, b.trim().parse()?))
}

fn parse_size(value: &str) -> Result<SizeD> {
    let (width, height) = parse_pair(value, 'x')?;
    Ok(SizeD::new(width, height))
}

fn parse_point(value: &str) -> Result<PointD> {
    let (x, y) = parse_pair(value, ',')?;
    Ok(PointD::new(x, y))
}

fn build_engine(scene: &SceneArgs, config: &ViewerConfig) -> Result<ZoomEngine<HeadlessSurface>> {
    let mut config = config.clone();
    config.aspect_safety |= scene.aspect_safety;
    if let Some(percentage) = scene.percentage {
        if !percentage.is_finite() || percentage <= 0.0 {
            bail!("invalid zoom percentage {percentage}");
        }
        config.custom_zoom_percentage = percentage;
    }
    if let Some(mode) = scene.mode {
        config.zoom_mode = mode;
    }

    let surface = HeadlessSurface {
        size: scene.viewport,
    };
    let mut engine = ZoomEngine::from_config(surface, &config);
    engine.set_image(Some(scene.image));
    if engine.has_pending() {
        bail!("viewport {:?} has no usable size", scene.viewport);
    }
    Ok(engine)
}

fn print_state(engine: &ZoomEngine<HeadlessSurface>) {
    let state = engine.state();
    let offset = state.pan_offset_px();
    println!(
        "mode={} zoom={:.6} ({:.1}%) pan=({}, {})",
        state.zoom_mode(),
        state.zoom_factor(),
        state.zoom_percentage(),
        offset.x(),
        offset.y()
    );
    if let Some(rect) = engine.image_rect() {
        let (x0, y0, x1, y1) = rect.round();
        println!("image at ({x0}, {y0}) - ({x1}, {y1})");
    }
}

fn resolve(args: &ResolveArgs, config: &ViewerConfig) -> Result<()> {
    let engine = build_engine(&args.scene, config)?;
    print_state(&engine);
    Ok(())
}

fn wheel(args: &WheelArgs, config: &ViewerConfig) -> Result<()> {
    let mut engine = build_engine(&args.scene, config)?;
    engine.set_manual_zoom_enabled(true);
    engine.set_cursor_anchored_zoom_enabled(!args.no_anchor);
    print_state(&engine);
    let direction = if args.out { -1 } else { 1 };
    for _ in 0..args.steps {
        engine.adjust_zoom_by_wheel(direction, args.cursor);
        print_state(&engine);
    }
    Ok(())
}

fn show_config(config: &ViewerConfig) -> Result<()> {
    match ViewerConfig::config_file() {
        Ok(path) => println!("# {}", path.display()),
        Err(e) => println!("# {e}"),
    }
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ViewerConfig::load();

    match &cli.command {
        Commands::Resolve(args) => resolve(args, &config),
        Commands::Wheel(args) => wheel(args, &config),
        Commands::Config => show_config(&config),
    }
}
