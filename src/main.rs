use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crispscale::models::{AppConfig, ResizeConfig};
use crispscale::services::{AddOutcome, BatchResizer, Exporter, ImageLibrary, ProcessedImage};
use nearest_resample::ResamplePlan;

#[derive(Parser)]
#[command(name = "crispscale")]
#[command(about = "Pixel-perfect resizing for pixel art")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Resize image files and write the results as PNG
    Resize(ResizeArgs),
    /// Show the target and intermediate size for a resize without running it
    Plan {
        /// Source size as WIDTHxHEIGHT (e.g. 64x48)
        #[arg(long)]
        source: SourceSize,

        #[command(flatten)]
        size: SizeArgs,
    },
}

#[derive(Args)]
struct ResizeArgs {
    /// Image files to resize (PNG, JPEG, GIF, BMP, ICO, WebP)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    #[command(flatten)]
    size: SizeArgs,

    /// Output directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output filename template ({filename}, {width}, {height}, {scale}, {date}, {mode})
    #[arg(short, long)]
    template: Option<String>,

    /// Write one zip archive instead of individual files, optionally naming it
    #[arg(long, num_args = 0..=1, value_name = "NAME")]
    zip: Option<Option<String>>,

    /// Config file (defaults to $CONFIG_FILE)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum number of images resized at once
    #[arg(short, long)]
    jobs: Option<usize>,
}

#[derive(Args)]
struct SizeArgs {
    /// Integer scale factor
    #[arg(short, long, conflicts_with_all = ["width", "height"])]
    scale: Option<u32>,

    /// Target width in pixels (height follows the aspect ratio unless given)
    #[arg(long)]
    width: Option<u32>,

    /// Target height in pixels (width follows the aspect ratio unless given)
    #[arg(long)]
    height: Option<u32>,
}

impl SizeArgs {
    /// Resize settings from the command line, if any were given
    fn resize_config(&self) -> Option<ResizeConfig> {
        match (self.scale, self.width, self.height) {
            (Some(factor), _, _) => Some(ResizeConfig::scale(factor)),
            (None, None, None) => None,
            (None, width, height) => Some(ResizeConfig::dimensions(width, height)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct SourceSize {
    width: u32,
    height: u32,
}

impl FromStr for SourceSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(|c: char| c == 'x' || c == 'X')
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<u32>()
                .map_err(|e| format!("invalid dimension '{v}': {e}"))
        };
        Ok(Self {
            width: parse(w)?,
            height: parse(h)?,
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Resize(args)) => run_resize_command(args).await,
        Some(Commands::Plan { source, size }) => run_plan_command(source, &size),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crispscale=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

fn config_path(flag: Option<&Path>) -> Option<PathBuf> {
    flag.map(Path::to_path_buf)
        .or_else(|| std::env::var("CONFIG_FILE").ok().map(PathBuf::from))
}

/// Load, resize and export a set of image files
async fn run_resize_command(args: ResizeArgs) -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load(config_path(args.config.as_deref()).as_deref());
    let resize = args
        .size
        .resize_config()
        .unwrap_or_else(|| config.resize.clone());

    let mut library = ImageLibrary::new();
    for path in &args.inputs {
        match library.add_file(path) {
            Ok(AddOutcome::Added { .. }) => {}
            Ok(AddOutcome::SkippedDuplicate { stem }) => {
                println!(
                    "Skipped {}: an image named '{stem}' is already loaded",
                    path.display()
                );
            }
            Err(e) => eprintln!("Skipped {}: {e}", path.display()),
        }
    }
    if library.is_empty() {
        anyhow::bail!("none of the {} input files could be loaded", args.inputs.len());
    }

    let batch = BatchResizer::new(args.jobs.unwrap_or(config.max_concurrency));
    let failures = library.resize_all(&batch, resize.request()).await;
    for (stem, e) in &failures {
        eprintln!("Failed {stem}: {e}");
    }

    let images: Vec<(&str, &ProcessedImage)> = library
        .resized()
        .map(|(entry, image)| (entry.stem.as_str(), image))
        .collect();
    if images.is_empty() {
        anyhow::bail!("no image could be resized");
    }

    let output_dir = args
        .output
        .clone()
        .or_else(|| config.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    let template = args
        .template
        .clone()
        .unwrap_or_else(|| config.filename_template(resize.mode()).to_string());
    let exporter = Exporter::new(output_dir, template, resize.mode());

    match &args.zip {
        Some(name) => {
            let archive_template = name
                .as_deref()
                .map(|n| n.strip_suffix(".zip").unwrap_or(n).to_string())
                .unwrap_or_else(|| config.archive_name.clone());
            let path = exporter.write_archive(&archive_template, &images)?;
            println!("Wrote {}", path.display());
        }
        None => {
            for path in exporter.write_files(&images)? {
                println!("Wrote {}", path.display());
            }
        }
    }

    println!(
        "Resized {} of {} images ({} mode)",
        images.len(),
        args.inputs.len(),
        resize.mode()
    );
    Ok(())
}

/// Print the resolved target and intermediate size for a source size
fn run_plan_command(source: SourceSize, size: &SizeArgs) -> anyhow::Result<()> {
    let Some(resize) = size.resize_config() else {
        anyhow::bail!("one of --scale, --width or --height is required");
    };
    let request = resize.request();
    let target = request.resolve(source.width, source.height)?;
    let plan = ResamplePlan::new(source.width, source.height, target.width, target.height)?;

    println!("Source:       {}x{}", source.width, source.height);
    println!(
        "Intermediate: {}x{} (x{})",
        plan.intermediate_width, plan.intermediate_height, plan.upscale_factor
    );
    println!("Target:       {}x{}", target.width, target.height);
    if plan.is_exact() {
        println!("The integer upscale produces the target exactly.");
    }
    Ok(())
}

/// Display version and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config_file = std::env::var("CONFIG_FILE").ok();

    println!("Crispscale v{VERSION}");
    println!("Pixel-perfect resizing for pixel art\n");

    println!("Environment Variables:");
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  RUST_LOG    = {}",
        std::env::var("RUST_LOG").as_deref().unwrap_or("crispscale=info (default)")
    );

    let config_source = match config_file {
        Some(ref path) if Path::new(path).exists() => path.to_string(),
        Some(_) => "defaults (file not found)".to_string(),
        None => "defaults".to_string(),
    };
    let config = AppConfig::load(config_file.as_deref().map(Path::new));
    println!("\nConfiguration ({config_source}):");
    println!("  Mode:            {}", config.resize.mode());
    println!(
        "  Filename:        {}",
        config.filename_template(config.resize.mode())
    );
    println!("  Archive:         {}.zip", config.archive_name);
    println!("  Max concurrency: {}", config.max_concurrency);

    println!("\nCommands:");
    println!("  crispscale resize <FILES>... --scale 4        Resize by an integer factor");
    println!("  crispscale resize <FILES>... --width 800      Resize to a width, keeping aspect");
    println!("  crispscale resize <FILES>... --zip            Package results into one archive");
    println!("  crispscale plan --source 64x48 --width 300   Show the resize plan");
    println!("  crispscale --help                             Show all options");
}
