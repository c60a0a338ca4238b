use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "riverglyph", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the aggregated continents as JSON.
    Summary(SummaryArgs),
    /// Render the frame drawn at a given tick as a PNG.
    Frame(FrameArgs),
    /// Render the whole animation as a numbered PNG sequence.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct DataArgs {
    /// Input CSV with `continent`, `name`, `length` and `area` columns.
    #[arg(long)]
    data: PathBuf,

    /// Optional JSON configuration.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SummaryArgs {
    #[command(flatten)]
    data: DataArgs,

    /// Pretty-print the JSON.
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

#[derive(Parser, Debug)]
struct ViewArgs {
    /// Viewport width in pixels.
    #[arg(long, default_value_t = 1300.0)]
    width: f64,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 900.0)]
    height: f64,

    /// Font file for labels (overrides the config's `font`).
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    data: DataArgs,

    #[command(flatten)]
    view: ViewArgs,

    /// Number of ticks to advance before drawing (0-based frame index).
    #[arg(long, default_value_t = 0)]
    tick: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    data: DataArgs,

    #[command(flatten)]
    view: ViewArgs,

    /// Output directory for `frame_NNNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Resize before a tick, as `TICK:WIDTHxHEIGHT`. May be repeated.
    #[arg(long = "resize-at", value_parser = parse_resize)]
    resize_at: Vec<riverglyph::ScheduledResize>,

    /// Stop after this many ticks even if the animation is still running.
    #[arg(long, default_value_t = 10_000)]
    max_frames: u64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Summary(args) => cmd_summary(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn parse_resize(s: &str) -> Result<riverglyph::ScheduledResize, String> {
    let (tick, size) = s
        .split_once(':')
        .ok_or_else(|| format!("expected TICK:WIDTHxHEIGHT, got '{s}'"))?;
    let before_frame = tick
        .trim()
        .parse::<u64>()
        .map_err(|e| format!("invalid tick '{tick}': {e}"))?;
    let viewport = riverglyph::Viewport::parse(size).map_err(|e| e.to_string())?;
    Ok(riverglyph::ScheduledResize {
        before_frame,
        viewport,
    })
}

fn load_config(args: &DataArgs) -> anyhow::Result<riverglyph::InfographicConfig> {
    match &args.config {
        Some(path) => riverglyph::InfographicConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display())),
        None => Ok(riverglyph::InfographicConfig::default()),
    }
}

fn load_session(
    args: &DataArgs,
    view: &ViewArgs,
) -> anyhow::Result<(riverglyph::Infographic, riverglyph::CpuSurface)> {
    let mut config = load_config(args)?;
    if let Some(font) = &view.font {
        config.font = Some(font.clone());
    }

    let viewport = riverglyph::Viewport::new(view.width, view.height)?;
    let session = riverglyph::Infographic::from_csv_path(&args.data, viewport, config)
        .with_context(|| format!("load dataset '{}'", args.data.display()))?;

    let surface = riverglyph::CpuSurface::new(riverglyph::CpuSurfaceOpts::default());
    let surface = match &session.config().font {
        Some(font) => surface
            .with_font_path(font)
            .with_context(|| format!("load font '{}'", font.display()))?,
        None => surface,
    };
    Ok((session, surface))
}

fn cmd_summary(args: SummaryArgs) -> anyhow::Result<()> {
    let config = load_config(&args.data)?;
    let table = riverglyph::CsvTable::from_path(&args.data.data)
        .with_context(|| format!("load dataset '{}'", args.data.data.display()))?;
    let rows = riverglyph::parse_rows(&table)?;
    let continents = riverglyph::aggregate(&rows, &config.aggregate);

    let json = if args.pretty {
        serde_json::to_string_pretty(&continents)
    } else {
        serde_json::to_string(&continents)
    }
    .context("serialize continents")?;
    println!("{json}");
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (mut session, mut surface) = load_session(&args.data, &args.view)?;
    session.skip_ticks(args.tick);
    let (_, frame) = session.render_cpu_frame(&mut surface)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    riverglyph::write_png(&args.out, &frame)
        .with_context(|| format!("write frame '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let (mut session, mut surface) = load_session(&args.data, &args.view)?;
    let mut sink = riverglyph::PngSequenceSink::new(&args.out_dir);
    let stats = session.run(&mut surface, &mut sink, args.max_frames, &args.resize_at)?;

    eprintln!(
        "wrote {} frames to {} ({})",
        stats.frames,
        args.out_dir.display(),
        if stats.completed {
            "complete"
        } else {
            "frame limit reached"
        }
    );
    Ok(())
}
