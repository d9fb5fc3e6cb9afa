//! Cropstress CLI - crop stress analysis from multispectral scenes

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use cropstress_algorithms::pipeline::analyze;
use cropstress_algorithms::classify::StressClassifier;
use cropstress_core::band::{BandKind, BandSet};
use cropstress_core::io::{read_band_stack, write_raster};

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "cropstress")]
#[command(author, version, about = "Crop stress detection from multispectral imagery", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show information about a 6-band scene
    Info {
        /// Input scene (multi-directory TIFF, bands in order
        /// blue, green, red, red_edge, nir, swir)
        input: PathBuf,
    },
    /// Analyze a scene and report stress analytics
    Analyze {
        /// Input scene (6-band TIFF)
        input: PathBuf,
        /// Trained classifier artifact (JSON). Without it the NDVI
        /// heuristic fallback is used.
        #[arg(short, long)]
        model: Option<PathBuf>,
        /// Seed for the forecast random walk (deterministic output)
        #[arg(long)]
        seed: Option<u64>,
        /// Write the JSON report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Also write the stress probability map as a float TIFF
        #[arg(long)]
        stress_map: Option<PathBuf>,
    },
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn read_scene(path: &PathBuf) -> Result<BandSet> {
    let pb = spinner("Reading scene...");
    let bands = read_band_stack(path).context("Failed to read scene")?;
    pb.finish_and_clear();
    let (rows, cols) = bands.shape();
    info!("Input: {} x {}, 6 bands", cols, rows);
    Ok(bands)
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        // ── Info ─────────────────────────────────────────────────────
        Commands::Info { input } => {
            let bands = read_scene(&input)?;
            let (rows, cols) = bands.shape();

            println!("File: {}", input.display());
            println!(
                "Dimensions: {} x {} ({} pixels per band)",
                cols,
                rows,
                bands.n_pixels()
            );
            println!("\nPer-band statistics:");
            for kind in BandKind::ALL {
                let stats = bands.band(kind).statistics();
                println!(
                    "  {:<9} min {:>8.4}  max {:>8.4}  mean {:>8.4}",
                    kind.name(),
                    stats.min.unwrap_or(f64::NAN),
                    stats.max.unwrap_or(f64::NAN),
                    stats.mean.unwrap_or(f64::NAN),
                );
            }
        }

        // ── Analyze ──────────────────────────────────────────────────
        Commands::Analyze {
            input,
            model,
            seed,
            output,
            stress_map,
        } => {
            let bands = read_scene(&input)?;

            let classifier = StressClassifier::from_artifact_or_fallback(model.as_deref())
                .context("Failed to load classifier artifact")?;
            if classifier.is_fallback() {
                if model.is_some() {
                    warn!("Artifact not found; falling back to the NDVI heuristic");
                } else {
                    info!("No artifact given; using the NDVI heuristic");
                }
            } else {
                info!("Model: {}", classifier.model_name());
            }

            let pb = spinner("Analyzing...");
            let start = Instant::now();
            let report = match seed {
                Some(s) => {
                    let mut rng = ChaCha8Rng::seed_from_u64(s);
                    analyze(&bands, &classifier, &mut rng)
                }
                None => {
                    let mut rng = rand::rng();
                    analyze(&bands, &classifier, &mut rng)
                }
            }
            .context("Analysis failed")?;
            let elapsed = start.elapsed();
            pb.finish_and_clear();

            info!(
                "Stress {:.2}% ({}), processed in {:.2?}",
                report.stress_percentage, report.alert_level, elapsed
            );

            if let Some(path) = stress_map {
                write_raster(&report.stress_map, &path).context("Failed to write stress map")?;
                println!("Stress map saved to: {}", path.display());
            }

            let json = serde_json::to_string_pretty(&report).context("Failed to encode report")?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json).context("Failed to write report")?;
                    println!("Report saved to: {}", path.display());
                }
                None => println!("{}", json),
            }
        }
    }

    Ok(())
}
