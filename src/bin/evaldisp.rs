//! evaldisp CLI: score an estimated disparity map against dataset ground truth.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use cv_blockmatch::prelude::*;

#[derive(Parser)]
#[command(name = "evaldisp")]
#[command(about = "Score a scaled disparity image against ground truth over an occlusion mask")]
#[command(version)]
struct Cli {
    /// Path to the ground-truth disparity image.
    ground_truth: PathBuf,

    /// Path to the occlusion mask. Zero pixels are excluded from scoring.
    mask: PathBuf,

    /// Path to the estimated disparity image.
    estimate: PathBuf,
}

fn open_luma(path: &Path) -> Result<image::GrayImage> {
    Ok(image::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?
        .to_luma8())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let ground_truth = open_luma(&cli.ground_truth)?;
    let mask = open_luma(&cli.mask)?;
    let estimate = open_luma(&cli.estimate)?;

    let eval = evaluate(&ground_truth, &mask, &estimate)?;

    println!("Mean disparity error = {:.2} px", eval.mean_abs_error);
    println!("Errors > 1 px = {:.2} %", eval.pct_over_1px * 100.0);
    println!("Errors > 2 px = {:.2} %", eval.pct_over_2px * 100.0);

    Ok(())
}
