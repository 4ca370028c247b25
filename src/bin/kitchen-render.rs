use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use kitchen_render::{GraphicPipeline, PipelineOpts, RenderMode, WorldSnapshot};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "kitchen-render", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single snapshot as a PNG.
    Frame(FrameArgs),
    /// Render every snapshot in a directory as `t=NNN.png` frames.
    Record(RecordArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// World snapshot JSON.
    #[arg(long)]
    snapshot: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Pipeline options JSON; defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RecordArgs {
    /// Directory of world snapshot JSON files.
    #[arg(long)]
    snapshots: PathBuf,

    /// Pipeline options JSON; defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured record directory.
    #[arg(long)]
    record_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Record(args) => cmd_record(args),
    }
}

fn load_opts(path: Option<&Path>) -> anyhow::Result<PipelineOpts> {
    match path {
        Some(p) => PipelineOpts::from_json_path(p)
            .with_context(|| format!("load pipeline options '{}'", p.display())),
        None => Ok(PipelineOpts::default()),
    }
}

fn load_snapshot(path: &Path) -> anyhow::Result<WorldSnapshot> {
    WorldSnapshot::from_json_path(path)
        .with_context(|| format!("load snapshot '{}'", path.display()))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let opts = load_opts(args.config.as_deref())?;
    let world = load_snapshot(&args.snapshot)?;

    let mut pipeline = GraphicPipeline::for_world(&world, opts)?;
    pipeline.initialize()?;
    pipeline.render(&world, RenderMode::Human)?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let frame = pipeline
        .frame()
        .context("pipeline has no frame after render")?;
    frame.save_png(&args.out)?;
    pipeline.shutdown()?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn snapshot_paths(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("read snapshot dir '{}'", dir.display()))?
    {
        let path = entry
            .with_context(|| format!("read snapshot dir '{}'", dir.display()))?
            .path();
        if path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

fn cmd_record(args: RecordArgs) -> anyhow::Result<()> {
    let mut opts = load_opts(args.config.as_deref())?;
    if let Some(dir) = args.record_dir {
        opts.record_dir = dir;
    }

    let paths = snapshot_paths(&args.snapshots)?;
    let Some(first) = paths.first() else {
        anyhow::bail!("no *.json snapshots in '{}'", args.snapshots.display());
    };

    let mut pipeline = GraphicPipeline::for_world(&load_snapshot(first)?, opts)?;
    pipeline.initialize()?;
    for path in &paths {
        let world = load_snapshot(path)?;
        let out = pipeline.export_frame(&world, world.t)?;
        eprintln!("wrote {}", out.display());
    }
    pipeline.shutdown()?;
    Ok(())
}
