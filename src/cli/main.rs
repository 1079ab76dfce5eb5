use anyhow::Context;
use clap::Parser;
use quake_alert::{config::Config, dataset::Dataset, logging::init_tracing, ml};
use std::path::PathBuf;

/// Train the alert-level classifier from historical readings
#[derive(Parser)]
#[command(name = "quake-train", version)]
#[command(about = "Train the earthquake alert-level model", long_about = None)]
struct Cli {
    /// Configuration file layered over the built-in defaults
    #[arg(short, long, env = "QUAKE_ALERT_CONFIG")]
    config: Option<PathBuf>,

    /// Historical earthquake CSV
    #[arg(short, long)]
    dataset: Option<PathBuf>,

    /// Where to write the fitted model
    #[arg(long)]
    model_out: Option<PathBuf>,

    /// Where to write the label encoder
    #[arg(long)]
    encoder_out: Option<PathBuf>,

    /// Fraction of rows held out for evaluation
    #[arg(long)]
    test_size: Option<f64>,

    #[arg(long)]
    seed: Option<u64>,

    /// Number of trees in the forest
    #[arg(long)]
    trees: Option<u16>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("loading configuration")?;

    init_tracing(&config.observability);

    if let Some(path) = cli.dataset {
        config.paths.dataset = path;
    }
    if let Some(path) = cli.model_out {
        config.paths.model = path;
    }
    if let Some(path) = cli.encoder_out {
        config.paths.encoder = path;
    }
    if let Some(test_size) = cli.test_size {
        config.training.test_size = test_size;
    }
    if let Some(seed) = cli.seed {
        config.training.seed = seed;
    }
    if let Some(trees) = cli.trees {
        config.training.n_trees = trees;
    }

    let dataset = Dataset::load(&config.paths.dataset)
        .with_context(|| format!("loading dataset {}", config.paths.dataset.display()))?;
    tracing::info!(rows = dataset.len(), "Dataset loaded");

    let trained = ml::train(&dataset, &config.training).context("training model")?;
    let report = &trained.report;

    println!(
        "Trained on {} rows ({} train / {} test)",
        report.n_samples, report.n_train, report.n_test
    );
    println!("Accuracy: {:.4}", report.metrics.accuracy);
    println!("{}", report.metrics.report());

    trained
        .save(&config.paths.model, &config.paths.encoder)
        .context("saving artifacts")?;
    println!("✅ Model saved to {}", config.paths.model.display());
    println!("✅ Label encoder saved to {}", config.paths.encoder.display());

    Ok(())
}
