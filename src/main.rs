use clap::{ArgAction, Parser, Subcommand};
use memories::config::{self, MediaLayout, MemoriesConfig};
use memories::imaging::{RustBackend, TranscodeConfig};
use memories::slideshow::{self, HeadlessPlayback, SlideshowController, Status, WebRootSource};
use memories::{manifest, optimize, output, scan};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{Level, error, warn};
use tracing_subscriber::EnvFilter;

/// Shared flags for commands that transcode images.
#[derive(clap::Args, Clone)]
struct CacheArgs {
    /// Disable the optimizer cache: re-encode every image
    #[arg(long)]
    no_cache: bool,
}

#[derive(Parser)]
#[command(name = "memories")]
#[command(about = "Photo and video slideshow from a folder of memories")]
#[command(long_about = "\
Photo and video slideshow from a folder of memories

Drop photos and videos into the media folder, build the manifest, and serve
the web root with any static file server.

Web root layout:

  public/
  ├── memories.toml            # Optional settings
  ├── memories.json            # Manifest (generated)
  ├── index.html               # Slideshow page (generated by 'render')
  └── memories/
      ├── beach.jpg            # Images: jpg, jpeg, png, webp, gif
      ├── party.mp4            # Videos: mp4, mov
      └── optimized/           # AVIF copies (generated by 'optimize')

Entries are ordered by file modification time, oldest first.

'scan' lists the originals as they are. 'optimize' transcodes photos to
AVIF (max 1920x1080, quality 80) and points the manifest at the copies;
unchanged photos are not re-encoded on later runs.

Run 'memories gen-config' to generate a documented memories.toml.")]
#[command(version = env!("MEMORIES_VERSION"))]
struct Cli {
    /// Web root directory
    #[arg(long, default_value = "public", global = true)]
    root: PathBuf,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the media folder into a manifest pointing at the originals
    Scan,
    /// Transcode photos and write a manifest pointing at the copies
    Optimize(CacheArgs),
    /// Render the slideshow page from the manifest
    Render {
        /// Output file (default: <root>/index.html)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Validate the manifest without changing anything
    Check,
    /// Print a stock memories.toml with all options documented
    GenConfig,
}

fn init_tracing(verbosity: u8) -> Result<(), Box<dyn std::error::Error>> {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter =
        EnvFilter::from_default_env().add_directive(format!("memories={}", level).parse()?);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match cli.command {
        Command::Scan => {
            let (_, layout) = load_layout(&cli.root)?;
            let entries = scan::scan(&layout).inspect_err(|e| {
                error!(error = %e, "scan failed, manifest not written");
            })?;
            manifest::write_manifest(&layout.manifest_path, &entries)?;
            output::print_scan_output(&entries, &layout.manifest_path);
        }
        Command::Optimize(cache_args) => {
            let (config, layout) = load_layout(&cli.root)?;
            let backend = RustBackend::new();
            let settings = TranscodeConfig::from_optimize_config(&config.optimize);
            let report = optimize::optimize(&backend, &layout, &settings, !cache_args.no_cache)
                .inspect_err(|e| {
                    error!(error = %e, "optimize failed, manifest not written");
                })?;
            manifest::write_manifest(&layout.manifest_path, &report.entries)?;
            output::print_optimize_output(&report, &layout.manifest_path);
        }
        Command::Render { out } => {
            let (config, layout) = load_layout(&cli.root)?;
            let out = out.unwrap_or_else(|| layout.web_root.join("index.html"));
            let source = WebRootSource::from_layout(&layout);
            let controller = SlideshowController::load(
                &source,
                &config.slideshow,
                HeadlessPlayback,
                Instant::now(),
            );
            if let Status::Failed(e) = controller.status() {
                warn!(error = %e, "rendering the load instruction instead of slides");
            }
            let html = slideshow::render_page(&controller).into_string();
            std::fs::write(&out, html)?;
            println!("{}", output::format_render_output(controller.slides().len(), &out));
        }
        Command::Check => {
            let (_, layout) = load_layout(&cli.root)?;
            let entries = manifest::read_manifest(&layout.manifest_path)?;
            let problems = manifest::check_manifest(&entries, &layout);
            output::print_check_output(&entries, &problems, &layout.manifest_path);
            if !problems.is_empty() {
                let message = format!(
                    "{} problem(s) in {}",
                    problems.len(),
                    layout.manifest_path.display()
                );
                return Err(message.into());
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load `memories.toml` from the web root and derive the on-disk layout.
fn load_layout(root: &Path) -> Result<(MemoriesConfig, MediaLayout), config::ConfigError> {
    let config = config::load_config(root)?;
    let layout = MediaLayout::new(root, &config);
    Ok((config, layout))
}
