use clap::{Parser, Subcommand};
use photo_normalize::config::{self, RunConfig};
use photo_normalize::imaging::RustBackend;
use photo_normalize::process::{self, ProcessOptions};
use photo_normalize::{center, output};
use std::path::PathBuf;

mod logging;

#[derive(Parser)]
#[command(name = "photo-normalize")]
#[command(about = "Normalize a folder of photos: rotation, color, thumbnails, canvas size")]
#[command(long_about = "\
Normalize a folder of photos: rotation, color, thumbnails, canvas size

Folder layout:

  photos/
  ├── config.toml        # Settings (optional, see gen-config)
  ├── a.jpg              # Originals (.jpg, .jpeg, .png)
  ├── b.png
  └── thumb/             # Thumbnails, same file names
      ├── a.jpg
      └── b.png

The thumbnails command rotates 4000px-wide landscape captures to portrait,
applies white balance and auto levels to images that have no thumbnail yet,
and (re)creates thumbnails at 20% of the original size. Corrected originals
are overwritten in place.

Run 'photo-normalize gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Photos directory
    #[arg(long, default_value = "photos", global = true)]
    photos: PathBuf,

    /// Thumbnail directory [default: <photos>/thumb]
    #[arg(long, global = true)]
    thumbs: Option<PathBuf>,

    /// Log every correction step to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rotate, color-correct and create or fix thumbnails
    Thumbnails {
        /// Also write the per-image report as JSON
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Show what `thumbnails` would do without writing anything
    Check,
    /// Center one image on the folder's canonical canvas
    Center {
        /// File name of the image inside the photos directory
        filename: String,
    },
    /// Print the canonical canvas size of the photos directory
    Canvas,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Command::Thumbnails { report } => {
            let run = RunConfig::load(&cli.photos, cli.thumbs)?;
            let result = run_process(&run, ProcessOptions { dry_run: false })?;
            output::print_summary(&result.summary);
            if let Some(report_path) = report {
                let json = serde_json::to_string_pretty(&result)?;
                std::fs::write(&report_path, json)?;
            }
        }
        Command::Check => {
            let run = RunConfig::load(&cli.photos, cli.thumbs)?;
            let result = run_process(&run, ProcessOptions { dry_run: true })?;
            output::print_summary(&result.summary);
        }
        Command::Center { filename } => {
            let run = RunConfig::load(&cli.photos, cli.thumbs)?;
            let outcome = center::center(&run, &filename)?;
            output::print_center_output(&outcome);
        }
        Command::Canvas => {
            let run = RunConfig::load(&cli.photos, cli.thumbs)?;
            let canvas = center::canonical_canvas_for(&RustBackend::new(), &run)?;
            output::print_canvas(canvas);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Run the thumbnail workflow, printing progress on a separate thread.
fn run_process(
    run: &RunConfig,
    options: ProcessOptions,
) -> Result<process::ProcessReport, Box<dyn std::error::Error>> {
    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            for line in output::format_process_event(&event) {
                println!("{}", line);
            }
        }
    });
    let result = process::process(run, options, Some(tx));
    printer
        .join()
        .map_err(|_| "progress printer thread panicked")?;
    Ok(result?)
}
