use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "lottieseq",
    version,
    about = "Convert per-frame SVG drawings into a Lottie animation"
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON.
    #[arg(long, global = true)]
    json_logs: bool,

    /// Config file (defaults to $XDG_CONFIG_HOME/lottieseq/config.json when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a frame range and write a Lottie JSON document.
    Convert(ConvertArgs),
    /// Report which SVG optimizers are available.
    Check,
    /// Summarize a Lottie document produced by `convert`.
    Inspect(InspectArgs),
    /// Print the configuration (file values over defaults), or write it to the config file.
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// Output Lottie JSON path.
    #[arg(long)]
    out: PathBuf,

    /// Directory containing one pre-rendered SVG per frame.
    #[arg(long, conflicts_with = "render_cmd", required_unless_present = "render_cmd")]
    frames_dir: Option<PathBuf>,

    /// File name pattern inside --frames-dir; `{frame}` or `{frame:04}` is the frame number.
    #[arg(long, default_value = "{frame}.svg")]
    pattern: String,

    /// Program run once per frame to render it; see --render-arg.
    #[arg(long)]
    render_cmd: Option<PathBuf>,

    /// Argument for --render-cmd (repeatable); `{frame}` and `{out}` are substituted.
    #[arg(long = "render-arg", allow_hyphen_values = true, requires = "render_cmd")]
    render_args: Vec<String>,

    /// Lottie frame rate.
    #[arg(long)]
    fps: Option<u32>,

    /// First frame (inclusive).
    #[arg(long)]
    start: Option<u64>,

    /// Last frame (inclusive).
    #[arg(long)]
    end: Option<u64>,

    /// SVG optimizer; `none` disables optimization.
    #[arg(long, value_enum)]
    optimizer: Option<OptimizerChoice>,
}

#[derive(Args, Debug)]
struct InspectArgs {
    /// Lottie JSON document.
    path: PathBuf,

    /// Print the summary as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct ConfigArgs {
    /// Write the configuration to --config (or the default location) instead of printing it.
    #[arg(long)]
    write: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OptimizerChoice {
    None,
    Scour,
    Usvg,
    Auto,
}

impl From<OptimizerChoice> for lottieseq::OptimizerKind {
    fn from(choice: OptimizerChoice) -> Self {
        match choice {
            OptimizerChoice::None => Self::None,
            OptimizerChoice::Scour => Self::Scour,
            OptimizerChoice::Usvg => Self::Usvg,
            OptimizerChoice::Auto => Self::Auto,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let writing_config = matches!(cli.cmd, Command::Config(ConfigArgs { write: true }));
    let file_config = match &cli.config {
        Some(path) if writing_config && !path.exists() => lottieseq::AppConfig::default(),
        Some(path) => lottieseq::AppConfig::from_file(path)?,
        None => lottieseq::AppConfig::load(),
    };

    let mut config = file_config.clone();
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    if cli.json_logs {
        config.logging.json = true;
    }
    lottieseq::logging::init_logging(&config.logging);

    match cli.cmd {
        Command::Convert(args) => cmd_convert(args, config),
        Command::Check => cmd_check(),
        Command::Inspect(args) => cmd_inspect(args),
        Command::Config(args) => cmd_config(args, cli.config, &file_config),
    }
}

fn make_renderer(args: &ConvertArgs) -> anyhow::Result<Box<dyn lottieseq::FrameRenderer>> {
    if let Some(program) = &args.render_cmd {
        return Ok(Box::new(lottieseq::CommandRenderer::new(
            program,
            args.render_args.clone(),
        )));
    }
    let dir = args
        .frames_dir
        .as_ref()
        .context("either --frames-dir or --render-cmd is required")?;
    let pattern = lottieseq::FramePattern::parse(&args.pattern)?;
    Ok(Box::new(lottieseq::DirectoryRenderer::new(dir, pattern)))
}

fn cmd_convert(args: ConvertArgs, config: lottieseq::AppConfig) -> anyhow::Result<()> {
    let mut params = config.params;
    if let Some(fps) = args.fps {
        params.frame_rate = fps;
    }
    if let Some(start) = args.start {
        params.frame_start = start;
    }
    if let Some(end) = args.end {
        params.frame_end = end;
    }

    let kind = args
        .optimizer
        .map(lottieseq::OptimizerKind::from)
        .unwrap_or(config.optimizer);
    if args.optimizer.is_some() {
        params.optimize = kind != lottieseq::OptimizerKind::None;
    }
    let optimizer = if params.optimize { kind.create() } else { None };

    let mut renderer = make_renderer(&args)?;
    let report = lottieseq::convert(
        &params,
        &args.out,
        renderer.as_mut(),
        optimizer.as_deref(),
        &lottieseq::CancelToken::new(),
    )?;

    eprintln!(
        "wrote {} ({} frames, {}x{})",
        report.output.display(),
        report.frame_count,
        report.canvas.width,
        report.canvas.height
    );
    Ok(())
}

fn cmd_check() -> anyhow::Result<()> {
    println!("optimizers:");
    match lottieseq::scour_version() {
        Some(version) => println!("  scour: OK ({version})"),
        None => println!("  scour: not installed"),
    }
    println!("  usvg:  OK (built in)");
    Ok(())
}

fn cmd_config(
    args: ConfigArgs,
    path: Option<PathBuf>,
    config: &lottieseq::AppConfig,
) -> anyhow::Result<()> {
    if !args.write {
        println!("{}", serde_json::to_string_pretty(config)?);
        return Ok(());
    }
    let path = path.unwrap_or_else(lottieseq::config::config_file_path);
    config.save(&path)?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let doc = read_document(&args.path)?;
    let summary = lottieseq::summarize(&doc)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}:", args.path.display());
    println!("  version:  {}", summary.version);
    println!("  fps:      {}", summary.frame_rate);
    println!("  range:    {}..{}", summary.in_point, summary.out_point);
    println!(
        "  canvas:   {}x{}",
        summary.canvas.width, summary.canvas.height
    );
    println!("  frames:   {}", summary.frames.len());
    for f in &summary.frames {
        println!(
            "    {} [{}, {}) st={:.4}s {}x{} {} bytes sha256={}",
            f.asset_id,
            f.in_point,
            f.out_point,
            f.start_time,
            f.size.width,
            f.size.height,
            f.payload_bytes,
            f.payload_sha256
        );
    }
    Ok(())
}

fn read_document(path: &Path) -> anyhow::Result<lottieseq::LottieDocument> {
    let bytes =
        std::fs::read(path).with_context(|| format!("open lottie document '{}'", path.display()))?;
    Ok(lottieseq::LottieDocument::from_json(&bytes)?)
}
