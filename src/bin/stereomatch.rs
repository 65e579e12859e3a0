//! stereomatch CLI: compute a disparity map from a rectified stereo pair.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use cv_blockmatch::prelude::*;

#[derive(Parser)]
#[command(name = "stereomatch")]
#[command(about = "Compute a block-matching disparity map from a rectified stereo pair")]
#[command(version)]
struct Cli {
    /// Path to the left image.
    left: PathBuf,

    /// Path to the right image.
    right: PathBuf,

    /// Path to write the disparity map to, scaled for dataset comparison. When omitted the
    /// map is computed but not saved.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Side length of the square comparison window. Must be odd.
    #[arg(long, default_value = "7")]
    neighbourhood: usize,

    /// Exclusive upper bound on the disparity search range.
    #[arg(long, default_value = "70")]
    max_disparity: usize,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let left = image::open(&cli.left)
        .with_context(|| format!("Failed to open left image {}", cli.left.display()))?;
    let right = image::open(&cli.right)
        .with_context(|| format!("Failed to open right image {}", cli.right.display()))?;

    let left = GrayFloatImage::from_dynamic(&left);
    let right = GrayFloatImage::from_dynamic(&right);

    let start = Instant::now();
    let map = compute_disparity_map(&left, &right, cli.neighbourhood, cli.max_disparity)?;
    let elapsed = start.elapsed();

    info!(
        "Computed {}x{} disparity map in {:.2} s",
        map.width(),
        map.height(),
        elapsed.as_secs_f64()
    );

    if let Some(path) = cli.output {
        map.to_luma_scaled(DISPARITY_SCALE)
            .save(&path)
            .with_context(|| format!("Failed to save disparity map to {}", path.display()))?;

        info!("Disparity map saved to {}", path.display());
    }

    Ok(())
}
