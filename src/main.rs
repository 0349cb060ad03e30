//! pattern-ingest - CLI tool to load a directory of garment pattern PDFs.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use jersey_patterns::{
    validate_pattern_set, validate_size_coverage, CurvePolicy, DuplicateSizePolicy, LoaderConfig,
    PatternLoader,
};

/// Load per-size garment pattern PDFs and report what is available.
#[derive(Parser, Debug)]
#[command(name = "pattern-ingest")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory containing one pattern PDF per size
    #[arg(short, long)]
    dir: PathBuf,

    /// Sizes that must be covered (comma separated, e.g. S,M,L)
    #[arg(short, long, value_delimiter = ',')]
    sizes: Vec<String>,

    /// Sample each curve with this many segments instead of keeping its end point
    #[arg(long)]
    curve_samples: Option<usize>,

    /// Keep the first document when two resolve to the same size
    #[arg(long)]
    keep_first: bool,

    /// Validate only, don't print the size summary
    #[arg(long)]
    validate: bool,

    /// Output the loaded patterns as JSON
    #[arg(long)]
    debug: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let mut config = LoaderConfig::new();
    if let Some(segments) = args.curve_samples {
        if segments == 0 {
            warn!("--curve-samples 0 is treated as 1");
        }
        config = config.with_curve_policy(CurvePolicy::Sampled { segments });
    }
    if args.keep_first {
        config = config.with_duplicate_policy(DuplicateSizePolicy::KeepFirst);
    }

    let loader = PatternLoader::new(&args.dir).with_config(config);
    info!("Processing: {}", loader.dir().display());
    debug!("Loader config: {:?}", loader.config());

    // Load the pattern directory
    let load = loader
        .load()
        .with_context(|| format!("Failed to load patterns from {}", loader.dir().display()))?;

    info!("Loaded {} size(s)", load.patterns.len());

    // Validate
    let mut validation = load.report;
    validation.merge(validate_pattern_set(&load.patterns));
    if !args.sizes.is_empty() {
        validation.merge(validate_size_coverage(&load.patterns, &args.sizes));
    }

    for warning in &validation.warnings {
        warn!("{}", warning);
    }

    for err in &validation.errors {
        error!("{}", err);
    }

    // Debug output
    if args.debug {
        let json = serde_json::to_string_pretty(&load.patterns)?;
        println!("{}", json);
    } else if !args.validate {
        for (size, garment) in load.patterns.iter() {
            println!(
                "{:<6} {:>2} pieces  {:>8.3} m²  {}",
                size,
                garment.pieces().len(),
                garment.total_area() / 1_000_000.0,
                if garment.is_complete() {
                    "complete"
                } else {
                    "incomplete"
                }
            );
        }
    }

    if !validation.passed {
        anyhow::bail!("Validation failed");
    }

    info!("Validation passed");

    Ok(())
}
