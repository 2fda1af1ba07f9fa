use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "cardfx", version)]
struct Cli {
    /// Log at info level (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a scene up to one instant and dump every host's output.
    Snapshot(SnapshotArgs),
    /// Replay a scene and dump a numbered output sequence.
    Play(PlayArgs),
}

#[derive(Parser, Debug)]
struct SnapshotArgs {
    /// Scene JSON.
    #[arg(long)]
    scene: PathBuf,

    /// Scene time in milliseconds.
    #[arg(long)]
    at: f64,

    /// Output directory.
    #[arg(long)]
    out: PathBuf,

    /// Override the scene's config block with a config JSON file.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Scene JSON.
    #[arg(long)]
    scene: PathBuf,

    /// Sampling interval in milliseconds.
    #[arg(long, default_value_t = 100.0)]
    every: f64,

    /// Last sample time in milliseconds. Defaults to the end of the script plus one second.
    #[arg(long)]
    until: Option<f64>,

    /// Output directory.
    #[arg(long)]
    out: PathBuf,

    /// Override the scene's config block with a config JSON file.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "cardfx=info"
    } else {
        "cardfx=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.cmd {
        Command::Snapshot(args) => cmd_snapshot(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn load_scene(path: &Path, config: Option<&Path>) -> anyhow::Result<cardfx::ScenePlayer> {
    let mut scene = cardfx::SceneDef::from_path(path)
        .with_context(|| format!("load scene '{}'", path.display()))?;
    if let Some(cfg) = config {
        scene.config = cardfx::FxConfig::from_path(cfg)
            .with_context(|| format!("load config '{}'", cfg.display()))?;
    }
    Ok(cardfx::ScenePlayer::new(scene)?)
}

fn cmd_snapshot(args: SnapshotArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.at >= 0.0, "--at must be >= 0");
    let mut player = load_scene(&args.scene, args.config.as_deref())?;
    player.advance_to(args.at);
    let written = write_snapshot(&player.snapshot(), &args.out, None)?;
    eprintln!("wrote {written} file(s) to {}", args.out.display());
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.every > 0.0, "--every must be > 0");
    let mut player = load_scene(&args.scene, args.config.as_deref())?;
    let until = args.until.unwrap_or(player.script_end_ms() + 1000.0);
    anyhow::ensure!(until >= 0.0, "--until must be >= 0");

    let mut written = 0usize;
    let mut index = 0u32;
    loop {
        let t = f64::from(index) * args.every;
        if t > until {
            break;
        }
        player.advance_to(t);
        written += write_snapshot(&player.snapshot(), &args.out, Some(index))?;
        index += 1;
    }
    eprintln!(
        "wrote {written} file(s) for {index} sample(s) to {}",
        args.out.display()
    );
    Ok(())
}

fn write_snapshot(
    snap: &cardfx::Snapshot,
    out_dir: &Path,
    index: Option<u32>,
) -> anyhow::Result<usize> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("create output dir '{}'", out_dir.display()))?;

    for frame in &snap.frames {
        let stem = match index {
            Some(i) => format!("{}_{i:05}", frame.key),
            None => frame.key.clone(),
        };
        match &frame.content {
            cardfx::FrameContent::Text(text) => {
                let path = out_dir.join(format!("{stem}.txt"));
                std::fs::write(&path, text)
                    .with_context(|| format!("write text '{}'", path.display()))?;
            }
            cardfx::FrameContent::Raster {
                width,
                height,
                rgba,
            } => {
                let path = out_dir.join(format!("{stem}.png"));
                image::save_buffer_with_format(
                    &path,
                    rgba,
                    *width,
                    *height,
                    image::ColorType::Rgba8,
                    image::ImageFormat::Png,
                )
                .with_context(|| format!("write png '{}'", path.display()))?;
            }
        }
    }
    Ok(snap.frames.len())
}
