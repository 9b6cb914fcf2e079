use std::{
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "panecast", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the header and per-frame statistics of a frame-data file.
    Probe(ProbeArgs),
    /// Rasterize a single frame as a PNG.
    Frame(FrameArgs),
    /// Play headlessly in real time and print the playback report.
    Play(PlayArgs),
}

#[derive(Parser, Debug)]
struct ProbeArgs {
    /// Input frame-data file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Surface pool capacity used for the over-capacity count.
    #[arg(long, default_value_t = panecast::DEFAULT_POOL_CAPACITY)]
    capacity: usize,

    /// Read only the fixed-size header.
    #[arg(long, default_value_t = false)]
    header_only: bool,

    /// Print JSON instead of text.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input frame-data file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Fit the frame to this screen size (WxH) instead of rendering at video size.
    #[arg(long)]
    screen: Option<panecast::ScreenMetrics>,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Directory holding `video.bin` and `bgm.wav`.
    #[arg(long, conflicts_with_all = ["in_path", "audio"], required_unless_present = "in_path")]
    assets: Option<PathBuf>,

    /// Input frame-data file.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Background track to pair with `--in`.
    #[arg(long)]
    audio: Option<PathBuf>,

    /// Skip the background track.
    #[arg(long, default_value_t = false)]
    no_audio: bool,

    /// Player options JSON; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Screen size as WxH.
    #[arg(long)]
    screen: Option<panecast::ScreenMetrics>,

    /// Surface pool capacity.
    #[arg(long)]
    capacity: Option<usize>,

    /// Refresh rate to pace surface updates against (0 disables pacing).
    #[arg(long)]
    refresh_hz: Option<u32>,

    /// Stop after this many seconds.
    #[arg(long)]
    max_secs: Option<f64>,

    /// Write the last overlay frame to this PNG when playback stops.
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Probe(args) => cmd_probe(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_video(path: &Path) -> anyhow::Result<panecast::VideoModel> {
    let bytes = std::fs::read(path).with_context(|| format!("read '{}'", path.display()))?;
    panecast::decode_video(&bytes).with_context(|| format!("decode '{}'", path.display()))
}

fn cmd_probe(args: ProbeArgs) -> anyhow::Result<()> {
    if args.header_only {
        let bytes = std::fs::read(&args.in_path)
            .with_context(|| format!("read '{}'", args.in_path.display()))?;
        let header = panecast::probe_header(&bytes)?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&header)?);
        } else {
            println!(
                "{}x{} @ {} fps, {} frame(s)",
                header.width, header.height, header.fps, header.frame_count
            );
        }
        return Ok(());
    }

    let video = read_video(&args.in_path)?;
    let header = video.header();
    let stats = video.stats(args.capacity);

    if args.json {
        let out = serde_json::json!({
            "header": header,
            "duration_secs": video.duration_secs(),
            "stats": stats,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!(
        "{}x{} @ {} fps, {} frame(s), {:.2}s",
        header.width,
        header.height,
        header.fps,
        header.frame_count,
        video.duration_secs()
    );
    println!(
        "rects: {} total, {} max/frame; runs: {} total, {} max/frame",
        stats.total_rects, stats.max_rects_per_frame, stats.total_runs, stats.max_runs_per_frame
    );
    println!(
        "frames over capacity {}: {}; out-of-bounds records: {}",
        args.capacity, stats.frames_over_capacity, stats.out_of_bounds_records
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let video = read_video(&args.in_path)?;
    let frame = video
        .frame(panecast::FrameIndex(args.frame))
        .with_context(|| {
            format!(
                "frame {} out of range ({} frame(s))",
                args.frame,
                video.frame_count()
            )
        })?;

    let transform = match args.screen {
        Some(screen) => panecast::DisplayTransform::fit(screen, video.width, video.height)?,
        None => panecast::DisplayTransform::identity(video.width, video.height),
    };
    let mut raster = panecast::CpuRasterizer::new(
        transform.out_width,
        transform.out_height,
        panecast::RasterStyle::default(),
    )?;
    let fills = panecast::draw_frame(
        &mut raster,
        frame,
        video.width,
        video.height,
        transform.scale,
    )?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    raster.save_png(&args.out, [0, 0, 0])?;

    eprintln!("wrote {} ({fills} fill(s))", args.out.display());
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let mut opts = match &args.config {
        Some(path) => panecast::PlayerOpts::from_path(path)?,
        None => panecast::PlayerOpts::default(),
    }
    .with_env_overrides();
    if let Some(screen) = args.screen {
        opts.screen = screen;
    }
    if let Some(capacity) = args.capacity {
        opts.pool_capacity = capacity;
    }
    if let Some(hz) = args.refresh_hz {
        opts.refresh_hz = (hz > 0).then_some(hz);
    }
    if args.no_audio || (args.in_path.is_some() && args.audio.is_none()) {
        opts.audio = false;
    }

    let resources: Box<dyn panecast::ResourceProvider> = match (&args.assets, &args.in_path) {
        (Some(dir), _) => Box::new(panecast::DirResources::new(dir)),
        (None, Some(video)) => Box::new(panecast::FileResources {
            video: video.clone(),
            audio: args.audio.clone(),
        }),
        (None, None) => anyhow::bail!("either --assets or --in is required"),
    };

    let host = panecast::HeadlessHost::with_refresh_hz(opts.refresh_hz);
    let mut events: Box<dyn panecast::HostEvents> = match args.max_secs {
        Some(secs) => {
            let limit = Duration::try_from_secs_f64(secs)
                .with_context(|| format!("invalid --max-secs {secs}"))?;
            Box::new(panecast::QuitAt(Instant::now() + limit))
        }
        None => Box::new(panecast::NoEvents),
    };

    let mut session = panecast::PlaybackSession::prepare(
        &opts,
        &*resources,
        host,
        events.as_mut(),
        panecast::SystemClock,
    )?;
    let mut audio = panecast::SilentAudio::default();
    let report = session.run(&mut audio)?;

    if let Some(path) = &args.snapshot {
        session
            .compositor()
            .rasterizer()
            .save_png(path, [0, 0, 0])?;
        eprintln!("wrote {}", path.display());
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
