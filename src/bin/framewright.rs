use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing::Level;

use framewright::{
    Canvas, CompositionId, Fps, FrameIndex, ImageStore, Preset, Rasterizer, RenderThreading,
    RenderToMp4Opts, Timeline,
};

#[derive(Parser, Debug)]
#[command(name = "framewright", version, about = "Deterministic looping scene renderer")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Animate a still image with a camera preset into an MP4 (requires `ffmpeg` on PATH).
    Animate(AnimateArgs),
    /// Render a single frame of a composition as PNG or SVG.
    Frame(FrameArgs),
    /// Render a composition to an MP4 (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// List the available animation presets.
    Presets,
}

#[derive(Args, Debug, Clone, Copy)]
struct TimelineArgs {
    /// Duration in seconds.
    #[arg(long, default_value_t = 5.0)]
    duration: f64,

    /// Frames per second.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Output width in pixels.
    #[arg(long, default_value_t = 1920)]
    width: u32,

    /// Output height in pixels.
    #[arg(long, default_value_t = 1080)]
    height: u32,
}

impl TimelineArgs {
    fn timeline(self) -> anyhow::Result<Timeline> {
        if !(self.duration.is_finite() && self.duration > 0.0) {
            anyhow::bail!("--duration must be a positive number of seconds");
        }
        let fps = Fps::new(self.fps, 1)?;
        Ok(Timeline::new(
            fps.secs_to_frames_round(self.duration),
            fps,
            Canvas {
                width: self.width,
                height: self.height,
            },
        )?)
    }
}

#[derive(Args, Debug, Clone, Copy)]
struct ThreadingArgs {
    /// Render frames in parallel.
    #[arg(long)]
    parallel: bool,

    /// Worker threads for parallel rendering (defaults to all cores).
    #[arg(long)]
    threads: Option<usize>,

    /// Frames rendered per batch.
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,
}

impl From<ThreadingArgs> for RenderThreading {
    fn from(a: ThreadingArgs) -> Self {
        Self {
            parallel: a.parallel,
            chunk_size: a.chunk_size,
            threads: a.threads,
        }
    }
}

#[derive(Parser, Debug)]
struct AnimateArgs {
    /// Still image to animate.
    #[arg(long)]
    image: PathBuf,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Camera preset (see `framewright presets`).
    #[arg(long, default_value = "ken-burns")]
    preset: String,

    #[command(flatten)]
    timeline: TimelineArgs,

    #[command(flatten)]
    threading: ThreadingArgs,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Composition name.
    #[arg(long)]
    composition: String,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output path; `.svg` writes the scene graph, anything else a PNG.
    #[arg(long)]
    out: PathBuf,

    /// Composition parameters as a JSON file.
    #[arg(long)]
    params: Option<PathBuf>,

    #[command(flatten)]
    timeline: TimelineArgs,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Composition name.
    #[arg(long)]
    composition: String,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Composition parameters as a JSON file.
    #[arg(long)]
    params: Option<PathBuf>,

    #[command(flatten)]
    timeline: TimelineArgs,

    #[command(flatten)]
    threading: ThreadingArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Animate(args) => cmd_animate(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
        Command::Presets => {
            cmd_presets();
            Ok(())
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

/// Parameter bag plus the directory relative image paths resolve against.
fn read_params(path: Option<&Path>) -> anyhow::Result<(serde_json::Value, PathBuf)> {
    let Some(path) = path else {
        return Ok((serde_json::Value::Null, PathBuf::from(".")));
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read parameters '{}'", path.display()))?;
    let params = serde_json::from_str(&text)
        .with_context(|| format!("parse parameters JSON '{}'", path.display()))?;
    let root = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    Ok((params, root))
}

fn cmd_animate(args: AnimateArgs) -> anyhow::Result<()> {
    let preset: Preset = args.preset.parse()?;
    let timeline = args.timeline.timeline()?;
    if !args.image.is_file() {
        anyhow::bail!("image '{}' does not exist", args.image.display());
    }
    let href = args.image.to_string_lossy().into_owned();
    let params = serde_json::json!({ "image": href, "preset": preset });

    let comp = framewright::mount(CompositionId::ImageAnimation, timeline, &params)?;
    let images = ImageStore::prepare(comp.image_hrefs(), ".")?;
    let frames = framewright::render_to_mp4(
        comp.as_ref(),
        &args.out,
        RenderToMp4Opts {
            threading: args.threading.into(),
            ..Default::default()
        },
        &Rasterizer::new(),
        &images,
    )?;

    eprintln!("wrote {} ({frames} frames, {preset})", args.out.display());
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let id: CompositionId = args.composition.parse()?;
    let timeline = args.timeline.timeline()?;
    let (params, root) = read_params(args.params.as_deref())?;

    let comp = framewright::mount(id, timeline, &params)?;
    let scene = framewright::render_mounted(comp.as_ref(), FrameIndex(args.frame))?;
    framewright::ensure_parent_dir(&args.out)?;

    let is_svg = args
        .out
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
    if is_svg {
        std::fs::write(&args.out, scene.to_svg())
            .with_context(|| format!("write svg '{}'", args.out.display()))?;
    } else {
        let images = ImageStore::prepare_scene(&scene, root)?;
        let frame = Rasterizer::new().render(&scene, &images)?;
        frame.save_png(&args.out)?;
    }

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let id: CompositionId = args.composition.parse()?;
    let timeline = args.timeline.timeline()?;
    let (params, root) = read_params(args.params.as_deref())?;

    let comp = framewright::mount(id, timeline, &params)?;
    let images = ImageStore::prepare(comp.image_hrefs(), root)?;
    let frames = framewright::render_to_mp4(
        comp.as_ref(),
        &args.out,
        RenderToMp4Opts {
            threading: args.threading.into(),
            ..Default::default()
        },
        &Rasterizer::new(),
        &images,
    )?;

    eprintln!("wrote {} ({frames} frames)", args.out.display());
    Ok(())
}

fn cmd_presets() {
    for preset in Preset::ALL {
        let m = preset.motion();
        println!(
            "{:<10}  scale {:.2}->{:.2}  x {:+}%->{:+}%  y {:+}%->{:+}%  {}",
            preset.name(),
            m.scale.0,
            m.scale.1,
            m.offset_x.0,
            m.offset_x.1,
            m.offset_y.0,
            m.offset_y.1,
            preset.describe()
        );
    }
}
