use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use mazetrace::{
    Algorithm, Canvas, CompareOutcome, CpuCanvas, Engine, EngineOpts, FixtureMazeService, Maze,
    MazeConfig, MazeService, PlaybackState, Speed, StartOutcome, SystemClock, FRAME_INTERVAL,
};

#[derive(Parser, Debug)]
#[command(name = "mazetrace", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a maze JSON as a PNG.
    Frame(FrameArgs),
    /// Solve a maze and animate the run headless, then write the final frame.
    Play(PlayArgs),
    /// Solve the maze with every algorithm and print a comparison table.
    Compare(CompareArgs),
}

#[derive(Args, Debug)]
struct SurfaceArgs {
    /// Canvas width in pixels.
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = 800)]
    height: u32,

    /// Engine options JSON (speed, clear color, theme directory).
    #[arg(long)]
    opts: Option<PathBuf>,

    /// Theme texture directory; overrides the one in `--opts`.
    #[arg(long)]
    theme: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Maze JSON to use instead of generating one.
    #[arg(long)]
    maze: Option<PathBuf>,

    /// Fixture directory (`maze.json` plus `<algorithm>.json` step files) standing in for the
    /// maze service.
    #[arg(long, conflicts_with = "service")]
    fixtures: Option<PathBuf>,

    /// Maze service base URL.
    #[arg(long, default_value = "http://127.0.0.1:8000")]
    service: String,

    /// Generation config JSON; defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input maze JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    surface: SurfaceArgs,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    #[command(flatten)]
    source: SourceArgs,

    #[command(flatten)]
    surface: SurfaceArgs,

    /// Algorithm (wire name or alias such as `bfs`, `astar`).
    #[arg(long, default_value = "bfs")]
    algorithm: Algorithm,

    /// Playback speed in [1, 100]; overrides the one in `--opts`.
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
    speed: Option<u8>,

    /// Output PNG path for the final frame.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct CompareArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Print rows as JSON instead of a table.
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Play(args) => cmd_play(args),
        Command::Compare(args) => cmd_compare(args),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("MAZETRACE_LOG")
        .or_else(|_| tracing_subscriber::EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn engine_opts(surface: &SurfaceArgs) -> anyhow::Result<EngineOpts> {
    let mut opts = match &surface.opts {
        Some(path) => EngineOpts::from_path(path)?,
        None => EngineOpts::default(),
    };
    if let Some(dir) = &surface.theme {
        opts.theme_dir = Some(dir.clone());
    }
    Ok(opts)
}

fn service(source: &SourceArgs) -> anyhow::Result<Box<dyn MazeService>> {
    if let Some(dir) = &source.fixtures {
        return Ok(Box::new(FixtureMazeService::from_dir(dir)?));
    }
    http_service(&source.service)
}

#[cfg(feature = "http")]
fn http_service(url: &str) -> anyhow::Result<Box<dyn MazeService>> {
    Ok(Box::new(mazetrace::HttpMazeService::new(url)?))
}

#[cfg(not(feature = "http"))]
fn http_service(url: &str) -> anyhow::Result<Box<dyn MazeService>> {
    anyhow::bail!("built without the `http` feature; use --fixtures instead of {url}")
}

fn read_maze(path: &Path) -> anyhow::Result<Maze> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read maze '{}'", path.display()))?;
    Ok(Maze::from_json(&text)?)
}

fn load_or_generate<S, T>(engine: &mut Engine<S, T>, source: &SourceArgs) -> anyhow::Result<()>
where
    S: MazeService,
    T: mazetrace::RenderTarget,
{
    let outcome = match &source.maze {
        Some(path) => engine.load_maze(read_maze(path)?)?,
        None => {
            let config = match &source.config {
                Some(path) => MazeConfig::from_path(path)?,
                None => MazeConfig::default(),
            };
            engine.generate(&config)?
        }
    };
    anyhow::ensure!(
        outcome == StartOutcome::Accepted,
        "maze was not accepted: {outcome:?}"
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let maze = read_maze(&args.in_path)?;
    let canvas = CpuCanvas::new(Canvas::new(args.surface.width, args.surface.height)?)?;
    let mut engine = Engine::new(
        FixtureMazeService::new(),
        canvas,
        engine_opts(&args.surface)?,
    );
    engine.load_maze(maze)?;

    engine.target().save_png(&args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let mut opts = engine_opts(&args.surface)?;
    if let Some(v) = args.speed {
        opts.speed = Speed::new(v)?;
    }
    let canvas = CpuCanvas::new(Canvas::new(args.surface.width, args.surface.height)?)?;
    let mut engine = Engine::new(service(&args.source)?, canvas, opts);
    load_or_generate(&mut engine, &args.source)?;

    let outcome = engine.start(args.algorithm)?;
    anyhow::ensure!(
        outcome == StartOutcome::Accepted,
        "run was not started: {outcome:?}"
    );

    let mut clock = SystemClock::new();
    let mut ticks = 0u64;
    let end = mazetrace::drive(&mut engine, &mut clock, FRAME_INTERVAL, |_, _| ticks += 1)?;

    let stats = engine.observed_stats();
    println!("algorithm:      {}", args.algorithm);
    println!("state:          {end:?}");
    println!("ticks:          {ticks}");
    println!("nodes expanded: {}", stats.nodes_expanded);
    println!(
        "success:        {}",
        match stats.success {
            Some(true) => "YES",
            Some(false) => "NO",
            None => "-",
        }
    );
    println!(
        "path length:    {}",
        stats
            .path_length
            .map_or_else(|| "-".to_owned(), |l| l.to_string())
    );

    if let Some(out) = &args.out {
        engine.target().save_png(out)?;
        eprintln!("wrote {}", out.display());
    }
    anyhow::ensure!(end == PlaybackState::Finished, "playback ended in {end:?}");
    Ok(())
}

fn cmd_compare(args: CompareArgs) -> anyhow::Result<()> {
    let canvas = mazetrace::RecordingTarget::new(Canvas::new(1, 1)?);
    let mut engine = Engine::new(service(&args.source)?, canvas, EngineOpts::default());
    load_or_generate(&mut engine, &args.source)?;

    let rows = match engine.compare_all() {
        CompareOutcome::Completed(rows) => rows,
        CompareOutcome::Rejected(reason) => anyhow::bail!("comparison rejected: {reason:?}"),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!(
        "{:<26} {:>7} {:>11} {:>8} {:>7}",
        "algorithm", "success", "path length", "nodes", "steps"
    );
    for row in &rows {
        if let Some(err) = &row.error {
            println!("{:<26} error: {err}", row.algorithm.wire_name());
            continue;
        }
        println!(
            "{:<26} {:>7} {:>11} {:>8} {:>7}",
            row.algorithm.wire_name(),
            if row.success { "YES" } else { "NO" },
            row.path_length
                .map_or_else(|| "-".to_owned(), |l| l.to_string()),
            row.nodes_expanded,
            row.steps
        );
    }
    Ok(())
}
