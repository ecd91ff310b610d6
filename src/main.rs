use clap::Parser;
use imgslim::profile::DEFAULT_SIZE_CEILING;
use imgslim::{batch, output};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "imgslim")]
#[command(about = "Shrink images to fit under a byte-size ceiling")]
#[command(long_about = "\
Shrink images to fit under a byte-size ceiling

Each image is re-encoded at descending resize scales; at every scale a
six-step binary search over the quality axis finds the highest quality that
still fits the ceiling. The first candidate that is strictly smaller than
the original and decodes cleanly wins. Files that cannot be improved are
kept byte-identical — the output is never larger than the input.

What happens to each input:

  photo.jpg      → photo.slim.jpg     (same format, smaller)
  photo.jpg      → photo.slim.webp    (with --webp)
  diagram.png    → diagram.slim.png   (conservative, text-safe profile)
  animation.gif  → copied untouched   (resampling would drop frames)
  photo.heic     → skipped            (unrecognized extension)

Directories are walked recursively; the declared image type is taken from
the file extension (png, jpg, jpeg, webp, gif — case-insensitive).")]
#[command(version = version_string())]
struct Cli {
    /// Files or directories to optimize
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Convert every optimized image to WebP
    #[arg(long)]
    webp: bool,

    /// Target byte-size ceiling per image
    #[arg(long, default_value_t = DEFAULT_SIZE_CEILING)]
    ceiling: usize,

    /// Write results into this directory instead of next to the inputs
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Worker threads (defaults to all cores; capped at core count)
    #[arg(long)]
    jobs: Option<usize>,

    /// Emit the per-file reports as a JSON array
    #[arg(long)]
    json: bool,

    /// Suppress per-file and summary output (errors still go to stderr)
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    init_thread_pool(cli.jobs);

    let options = batch::BatchOptions {
        convert_to_webp: cli.webp,
        ceiling: Some(cli.ceiling),
        out_dir: cli.out_dir.clone(),
    };
    let summary = batch::run_batch(&cli.paths, &options)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary.reports)?);
    } else if cli.quiet {
        output::print_errors(&summary);
    } else {
        output::print_reports(&summary);
        output::print_summary(&summary);
    }

    if summary.has_errors() {
        std::process::exit(1);
    }
    Ok(())
}

/// Initialize the rayon thread pool from the `--jobs` flag.
///
/// Caps at the number of available CPU cores — user can constrain down, not up.
fn init_thread_pool(jobs: Option<usize>) {
    rayon::ThreadPoolBuilder::new()
        .num_threads(batch::effective_jobs(jobs))
        .build_global()
        .ok();
}
