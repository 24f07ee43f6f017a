//! seamcarve - content-aware image resizing from the command line.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use image::{Rgb, RgbImage};
use itertools::Itertools;
use log::{info, LevelFilter};
use seamcarve::{
    compare_strategies, energy_heatmap, parse_seam_count, CarveOptions, CarveOutput, DrawSeams,
    ProtectRegion, SeamCarver, SeamCarveError, Strategy,
};
use std::fs;
use std::path::{Path, PathBuf};

const SEAM_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// Seam carving image resizer
#[derive(Parser, Debug)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    /// Log every removed seam
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Carve an image down to an exact size
    Resize {
        #[arg(value_hint = clap::ValueHint::FilePath)]
        image: PathBuf,

        /// Target width in pixels
        width: u32,

        /// Target height in pixels
        height: u32,

        /// Seam search strategy: greedy or dp
        #[arg(value_parser = parse_strategy)]
        algorithm: Strategy,

        #[command(flatten)]
        output: OutputArgs,

        /// Protect a rectangle given as X,Y,W,H
        #[arg(long, value_parser = parse_region)]
        protect: Option<ProtectRegion>,

        /// Refuse resizes needing more seam removals than this
        #[arg(long)]
        max_seams: Option<usize>,
    },

    /// Remove a number of seams along each axis
    Seams {
        #[arg(value_hint = clap::ValueHint::FilePath)]
        image: PathBuf,

        /// Vertical seams to remove (narrows the image)
        vertical: String,

        /// Horizontal seams to remove (lowers the image)
        horizontal: String,

        /// Seam search strategy: greedy or dp
        #[arg(short, long, default_value = "greedy", value_parser = parse_strategy)]
        algorithm: Strategy,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Remove the same vertical seams with both strategies
    Compare {
        #[arg(value_hint = clap::ValueHint::FilePath)]
        image: PathBuf,

        /// Vertical seams to remove
        count: String,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(clap::Args, Debug)]
struct OutputArgs {
    /// Directory receiving the output folders
    #[arg(short, long, default_value = ".", value_hint = clap::ValueHint::DirPath)]
    out: PathBuf,
}

fn parse_strategy(s: &str) -> std::result::Result<Strategy, SeamCarveError> {
    s.parse()
}

fn parse_region(s: &str) -> std::result::Result<ProtectRegion, String> {
    let parts = s
        .split(',')
        .map(|part| part.trim().parse::<u32>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|err| format!("expected X,Y,W,H: {}", err))?;

    let count = parts.len();
    parts
        .into_iter()
        .collect_tuple()
        .map(|(x, y, width, height)| ProtectRegion::new(x, y, width, height))
        .ok_or_else(|| format!("expected 4 values X,Y,W,H, got {}", count))
}

/// `--verbose` adds the per-seam `debug` records
fn log_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(log_level(cli.verbose))
        .init();

    match cli.command {
        Commands::Resize {
            image,
            width,
            height,
            algorithm,
            output,
            protect,
            max_seams,
        } => {
            let source = open_rgb(&image)?;
            let mut options = CarveOptions::default().with_strategy(algorithm);
            if let Some(limit) = max_seams {
                options = options.with_max_seams(limit);
            }

            let mut carver: SeamCarver<'_, Rgb<u8>> = SeamCarver::new(options);
            if let Some(region) = protect.as_ref() {
                carver = carver.with_segmenter(region);
            }
            let carved = carver.carve(&source, width, height)?;
            write_outputs(&output.out, &stem(&image), &source, &carved)
        }
        Commands::Seams {
            image,
            vertical,
            horizontal,
            algorithm,
            output,
        } => {
            let source = open_rgb(&image)?;
            let vertical = parse_seam_count(&vertical);
            let horizontal = parse_seam_count(&horizontal);

            let carved = SeamCarver::new(CarveOptions::default().with_strategy(algorithm))
                .carve_seams(&source, vertical, horizontal)?;
            write_outputs(&output.out, &stem(&image), &source, &carved)
        }
        Commands::Compare {
            image,
            count,
            output,
        } => {
            let source = open_rgb(&image)?;
            let count = parse_seam_count(&count);
            let stem = stem(&image);

            let comparison = compare_strategies(&source, count, 0, &CarveOptions::default())?;
            let processed = ensure_dir(&output.out.join("processed-images"))?;
            let overlays = ensure_dir(&output.out.join("seam-visualization"))?;

            for (name, carved) in [
                (Strategy::Greedy.name(), &comparison.greedy),
                (Strategy::ExactDp.name(), &comparison.exact),
            ] {
                save(&carved.image, &processed.join(format!("{}_{}.png", stem, name)))?;
                let overlay = source.draw_seams(&carved.trail, SEAM_COLOR)?;
                save(&overlay, &overlays.join(format!("{}_{}_seams.png", stem, name)))?;
                info!(
                    "{}: removed seam energy {:.1}",
                    name,
                    carved.trail.total_cost()
                );
            }
            Ok(())
        }
    }
}

fn open_rgb(path: &Path) -> Result<RgbImage> {
    let image = image::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    Ok(image.to_rgb8())
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string())
}

fn ensure_dir(dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    Ok(dir.to_path_buf())
}

fn save(image: &RgbImage, path: &Path) -> Result<()> {
    image
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))
}

/// Writes the carved image, its energy heatmap and the seam overlay
fn write_outputs(
    out: &Path,
    stem: &str,
    source: &RgbImage,
    carved: &CarveOutput<Rgb<u8>>,
) -> Result<()> {
    let resized =
        ensure_dir(&out.join("processed-images"))?.join(format!("{}_resized_image.png", stem));
    let energy = ensure_dir(&out.join("energy-maps"))?.join(format!("{}_energy_map.png", stem));
    let seams = ensure_dir(&out.join("seam-visualization"))?.join(format!("{}_seams.png", stem));

    save(&carved.image, &resized)?;
    energy_heatmap(&carved.energy)
        .save(&energy)
        .with_context(|| format!("failed to write {}", energy.display()))?;
    save(&source.draw_seams(&carved.trail, SEAM_COLOR)?, &seams)?;

    let (width, height) = carved.image.dimensions();
    info!("wrote {}x{} image to {}", width, height, resized.display());
    Ok(())
}
