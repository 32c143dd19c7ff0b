use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use shoreline::{
    DrawingSurface, ExecutionHost, FrameBudget, HostCapabilities, HostOpts, Launch,
    PixmapSurface, PngSequenceSink, Settings, StrategyPreference, SurfaceSize, entropy_rng,
    seeded_rng,
};

#[derive(Parser, Debug)]
#[command(name = "shoreline", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the scene after N frames and write the last one as a PNG.
    Frame(FrameArgs),
    /// Render a numbered PNG sequence.
    Frames(FramesArgs),
    /// Print the default settings as JSON.
    Defaults,
}

#[derive(Parser, Debug)]
struct SceneArgs {
    /// Settings JSON; partial configs are merged onto the defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Surface width in pixels (overrides the config).
    #[arg(long)]
    width: Option<u32>,

    /// Surface height in pixels (overrides the config).
    #[arg(long)]
    height: Option<u32>,

    /// Seed for reproducible output. Omit for a fresh scene every run.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Number of frames to simulate before capturing.
    #[arg(long, default_value_t = 1)]
    frames: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Number of frames to write.
    #[arg(long)]
    count: u64,

    /// Output directory.
    #[arg(long)]
    out_dir: PathBuf,

    /// File name prefix.
    #[arg(long, default_value = "frame")]
    prefix: String,

    /// Where frames are drawn.
    #[arg(long, value_enum, default_value_t = StrategyArg::Auto)]
    strategy: StrategyArg,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StrategyArg {
    Auto,
    Foreground,
    Background,
}

impl From<StrategyArg> for StrategyPreference {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Auto => Self::Auto,
            StrategyArg::Foreground => Self::Foreground,
            StrategyArg::Background => Self::Background,
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Defaults => cmd_defaults(),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("SHORELINE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_scene(args: &SceneArgs) -> anyhow::Result<(Settings, SurfaceSize)> {
    let mut settings = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("read config '{}'", path.display()))?;
            Settings::from_json_str(&raw)?
        }
        None => Settings::default(),
    };
    if let Some(w) = args.width {
        settings.width = w;
    }
    if let Some(h) = args.height {
        settings.height = h;
    }
    let size = SurfaceSize::new(settings.width, settings.height)?;
    Ok((settings, size))
}

fn rng_for(args: &SceneArgs) -> shoreline::EngineRng {
    match args.seed {
        Some(seed) => seeded_rng(seed),
        None => entropy_rng(),
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (settings, size) = load_scene(&args.scene)?;
    let surface = PixmapSurface::new(size)?;
    let mut engine = shoreline::Engine::new(surface, settings, rng_for(&args.scene));
    for _ in 0..args.frames.max(1) {
        engine.try_frame()?;
    }
    let frame = engine.surface().snapshot();

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    shoreline::write_png(&args.out, &frame)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let (settings, size) = load_scene(&args.scene)?;
    let sink = PngSequenceSink::new(&args.out_dir, args.prefix.clone());
    let surface = PixmapSurface::new(size)?.with_sink(Box::new(sink));

    let launch = Launch {
        surface,
        settings,
        rng: rng_for(&args.scene),
        scheduler: Box::new(FrameBudget::frames(args.count)),
    };
    let opts = HostOpts {
        preference: args.strategy.into(),
        capabilities: HostCapabilities::detect(),
    };
    let host = ExecutionHost::start(launch, opts)?;
    let strategy = host.strategy();
    let mut surface = host
        .join()
        .context("render thread did not return the surface")?;
    surface.finish()?;

    eprintln!(
        "wrote {} frame(s) at {}x{} to {} ({strategy:?})",
        surface.frames_presented(),
        surface.size().width,
        surface.size().height,
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_defaults() -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&Settings::default())?;
    println!("{json}");
    Ok(())
}
