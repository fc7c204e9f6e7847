use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

use surfkit::{
    Argb, BlitOutcome, BlitRequest, DrawingArea, EditMode, Handle, HandleLayout, PixelSurface,
    Point3, RenderConfig, RenderContext, ShapeBox,
};

#[derive(Parser, Debug)]
#[command(name = "surfkit", version)]
struct Cli {
    /// JSON render config; `SURFKIT_*` environment variables override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite an overlay PNG onto a base PNG.
    Composite(CompositeArgs),
    /// Mirror a PNG horizontally and/or vertically.
    Mirror(MirrorArgs),
    /// Fill a rectangle of a PNG with a solid color.
    Fill(FillArgs),
    /// Print the handle layout for a box as JSON.
    Handles(HandlesArgs),
}

#[derive(Parser, Debug)]
struct CompositeArgs {
    /// Base (destination) PNG.
    #[arg(long)]
    base: PathBuf,

    /// Overlay (source) PNG.
    #[arg(long)]
    overlay: PathBuf,

    /// Target x of the overlay's left edge.
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    x: i32,

    /// Target y of the overlay's top edge.
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    y: i32,

    /// Per-surface opacity of the overlay (0-255).
    #[arg(long, default_value_t = 255)]
    alpha: u8,

    /// Key out the configured transparency color.
    #[arg(long)]
    mask: bool,

    /// Overlay sub-rectangle `x,y,length,height`.
    #[arg(long, allow_hyphen_values = true)]
    source: Option<DrawingArea>,

    /// Target-space clip rectangle `x,y,length,height`.
    #[arg(long, allow_hyphen_values = true)]
    clip: Option<DrawingArea>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct MirrorArgs {
    /// Input PNG.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Flip left-right.
    #[arg(long)]
    horizontal: bool,

    /// Flip top-bottom.
    #[arg(long)]
    vertical: bool,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct FillArgs {
    /// Input PNG.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Area `x,y,length,height`.
    #[arg(long, allow_hyphen_values = true)]
    area: DrawingArea,

    /// Color as `RRGGBB` or `AARRGGBB` hex.
    #[arg(long, value_parser = surfkit::parse_argb)]
    color: Argb,

    /// Clip rectangle `x,y,length,height`.
    #[arg(long, allow_hyphen_values = true)]
    clip: Option<DrawingArea>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct HandlesArgs {
    /// Box minimum `x,y,z`.
    #[arg(long, allow_hyphen_values = true)]
    min: Point3,

    /// Box maximum `x,y,z`.
    #[arg(long, allow_hyphen_values = true)]
    max: Point3,

    /// Screen anchor x.
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    anchor_x: i32,

    /// Screen anchor y.
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    anchor_y: i32,

    /// Integer zoom factor.
    #[arg(long, default_value_t = 1)]
    scale: i32,

    /// Handle set to lay out.
    #[arg(long, value_enum, default_value_t = ModeChoice::Bbox)]
    mode: ModeChoice,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeChoice {
    Bbox,
    Points,
}

#[derive(serde::Serialize)]
struct HandlesReport<'a> {
    mode: EditMode,
    scale: i32,
    handle_size: i32,
    handles: &'a [Handle],
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => RenderConfig::from_json_path(path)?,
        None => RenderConfig::default(),
    }
    .with_env_overrides()?;
    let ctx = RenderContext::new(config)?;

    match cli.cmd {
        Command::Composite(args) => cmd_composite(&ctx, args),
        Command::Mirror(args) => cmd_mirror(&ctx, args),
        Command::Fill(args) => cmd_fill(&ctx, args),
        Command::Handles(args) => cmd_handles(&ctx, args),
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        tracing::Level::ERROR
    } else {
        match verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_png(ctx: &RenderContext, path: &Path) -> anyhow::Result<PixelSurface> {
    let f = File::open(path).with_context(|| format!("open png '{}'", path.display()))?;
    let mut surface = PixelSurface::with_trans_color(ctx.trans_color());
    if !surface.decode_png(BufReader::new(f)) {
        anyhow::bail!("decode png '{}'", path.display());
    }
    Ok(surface)
}

fn write_png(surface: &PixelSurface, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let f = File::create(path).with_context(|| format!("create png '{}'", path.display()))?;
    if !surface.encode_png(BufWriter::new(f)) {
        anyhow::bail!("write png '{}'", path.display());
    }
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_composite(ctx: &RenderContext, args: CompositeArgs) -> anyhow::Result<()> {
    let mut base = read_png(ctx, &args.base)?;
    let mut overlay = read_png(ctx, &args.overlay)?;
    overlay.set_mask(args.mask);
    overlay.set_alpha(args.alpha, false);

    let mut req = BlitRequest::at(args.x, args.y);
    req.source_area = args.source;
    req.clip = args.clip;

    match surfkit::blit(&mut base, &overlay, &req) {
        BlitOutcome::Drawn { path, isolated, .. } => {
            tracing::info!(?path, isolated, "overlay composited");
        }
        BlitOutcome::Skipped(reason) => {
            tracing::warn!(?reason, "overlay not drawn");
        }
    }
    write_png(&base, &args.out)
}

fn cmd_mirror(ctx: &RenderContext, args: MirrorArgs) -> anyhow::Result<()> {
    let mut surface = read_png(ctx, &args.in_path)?;
    surface.mirror(args.horizontal, args.vertical);
    write_png(&surface, &args.out)
}

fn cmd_fill(ctx: &RenderContext, args: FillArgs) -> anyhow::Result<()> {
    let mut surface = read_png(ctx, &args.in_path)?;
    if surfkit::fill_rect(&mut surface, args.area, args.color, args.clip).is_none() {
        tracing::warn!(area = ?args.area, "fill area is empty");
    }
    write_png(&surface, &args.out)
}

fn cmd_handles(ctx: &RenderContext, args: HandlesArgs) -> anyhow::Result<()> {
    let shape = ShapeBox::from_extents(args.min, args.max)?;
    let mode = match args.mode {
        ModeChoice::Bbox => EditMode::BoundingBox,
        ModeChoice::Points => EditMode::Points,
    };
    let mut layout = HandleLayout::from_config(mode, ctx.config());
    layout.compute(&shape, args.anchor_x, args.anchor_y, args.scale);

    let report = HandlesReport {
        mode,
        scale: layout.scale(),
        handle_size: layout.handle_size(),
        handles: layout.handles(),
    };
    let stdout = std::io::stdout();
    serde_json::to_writer_pretty(stdout.lock(), &report).context("write handles json")?;
    println!();
    Ok(())
}
