use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use tansy_eval::{
    Accuracy, BalancedAccuracy, Experiments, F1Score, Reporter, ScoreDistribution, Scorer,
};
use tansy_io::{DatasetReader, ExperimentArtifact, ExperimentName, ResultWriter, read_experiments};
use tansy_model::{ModelFamily, ModelSpec};
use tansy_sample::{BalanceConfig, ResampleScope};

#[derive(Parser)]
#[command(name = "tansy")]
#[command(about = "Seeded churn-model experiments: rebalance, cross-validate, report")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose (debug-level) logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Number of threads for parallel computation (defaults to all cores)
    #[arg(long, global = true)]
    threads: Option<usize>,
}

#[derive(Subcommand)]
enum Command {
    /// Run one experiment per seed and write scores plus charts
    Run {
        /// Path to the input CSV file (account_id,<features...>,churned)
        #[arg(long)]
        data: PathBuf,

        /// Model family: "majority", "logistic", or "knn"
        #[arg(long, default_value = "logistic")]
        model: String,

        /// Model hyperparameter as key=value (repeatable)
        #[arg(long = "model-arg")]
        model_args: Vec<String>,

        /// Scoring function: "accuracy", "f1", or "balanced-accuracy"
        #[arg(long, default_value = "accuracy")]
        metric: String,

        /// Comma-separated trial seeds
        #[arg(long, value_delimiter = ',', default_value = "0,1,2,3,4")]
        seeds: Vec<u64>,

        /// Number of cross-validation folds per trial
        #[arg(long, default_value_t = 5)]
        kfolds: usize,

        /// Fraction of each class reserved for the holdout partition
        #[arg(long, default_value_t = 0.1)]
        holdout_fraction: f64,

        /// Minority neighbours for SMOTE interpolation
        #[arg(long, default_value_t = 5)]
        smote_neighbors: usize,

        /// Neighbours consulted by the ENN cleaning pass
        #[arg(long, default_value_t = 3)]
        enn_neighbors: usize,

        /// Resampling scope: "full" (historical behaviour) or "train-only"
        #[arg(long, default_value = "full")]
        resample_scope: String,

        /// Experiment name for output files (must match [a-zA-Z0-9_-]+)
        #[arg(long)]
        experiment: String,

        /// Output directory for result files
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,

        /// Render diagnostic charts alongside the JSON artifact
        #[arg(long, default_value_t = false)]
        viz: bool,
    },

    /// Re-render charts and summary from a stored experiment artifact
    Report {
        /// Path to a previously written experiments JSON file
        #[arg(long)]
        scores: PathBuf,

        /// Experiment name for output files
        #[arg(long)]
        experiment: String,

        /// Output directory for chart files
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
    },
}

// --- JSON stdout output structs ---

#[derive(Serialize)]
struct RunOutput {
    experiment: String,
    n_accounts: usize,
    n_features: usize,
    model: String,
    metric: String,
    n_seeds: usize,
    scores: Vec<f64>,
    mean: Option<f64>,
    std_dev: Option<f64>,
}

#[derive(Serialize)]
struct ReportOutput {
    experiment: String,
    n_scores: usize,
    mean: Option<f64>,
    median: Option<f64>,
    std_dev: Option<f64>,
    min: Option<f64>,
    max: Option<f64>,
}

fn parse_model_family(s: &str) -> Result<ModelFamily> {
    match s {
        "majority" => Ok(ModelFamily::Majority),
        "logistic" => Ok(ModelFamily::Logistic),
        "knn" => Ok(ModelFamily::Knn),
        other => anyhow::bail!("unknown model family: {other} (expected majority, logistic, or knn)"),
    }
}

fn parse_metric(s: &str) -> Result<Box<dyn Scorer>> {
    match s {
        "accuracy" => Ok(Box::new(Accuracy)),
        "f1" => Ok(Box::new(F1Score)),
        "balanced-accuracy" => Ok(Box::new(BalancedAccuracy)),
        other => {
            anyhow::bail!("unknown metric: {other} (expected accuracy, f1, or balanced-accuracy)")
        }
    }
}

fn parse_resample_scope(s: &str) -> Result<ResampleScope> {
    match s {
        "full" => Ok(ResampleScope::FullDataset),
        "train-only" => Ok(ResampleScope::TrainOnly),
        other => anyhow::bail!("unknown resample scope: {other} (expected full or train-only)"),
    }
}

fn parse_model_args(pairs: &[String], family: ModelFamily) -> Result<ModelSpec> {
    let mut spec = ModelSpec::new(family);
    for pair in pairs {
        let (key, raw) = pair
            .split_once('=')
            .with_context(|| format!("model arg '{pair}' is not key=value"))?;
        let value: f64 = raw
            .parse()
            .with_context(|| format!("model arg '{key}' has non-numeric value '{raw}'"))?;
        spec = spec.with_arg(key, value);
    }
    Ok(spec)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Configure Rayon thread pool
    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure thread pool")?;
        info!(threads, "thread pool configured");
    }

    match cli.command {
        Command::Run {
            data,
            model,
            model_args,
            metric,
            seeds,
            kfolds,
            holdout_fraction,
            smote_neighbors,
            enn_neighbors,
            resample_scope,
            experiment,
            output_dir,
            viz,
        } => {
            let experiment_name = ExperimentName::new(experiment.clone())?;

            // Read dataset
            let dataset = DatasetReader::new(&data)
                .read()
                .context("failed to read input CSV")?;
            info!(
                n_accounts = dataset.n_samples(),
                n_features = dataset.n_features(),
                "dataset loaded"
            );

            // Build model spec and scorer
            let family = parse_model_family(&model)?;
            let spec = parse_model_args(&model_args, family)?;
            let scorer = parse_metric(&metric)?;

            // Build balance config
            let balance = BalanceConfig::new()
                .with_holdout_fraction(holdout_fraction)
                .with_smote_neighbors(smote_neighbors)
                .with_enn_neighbors(enn_neighbors)
                .with_resample_scope(parse_resample_scope(&resample_scope)?);

            // Run the suite
            let dist = Experiments::new(seeds.clone(), spec)
                .with_kfolds(kfolds)
                .with_balance(balance)
                .run(dataset.features(), dataset.labels(), scorer.as_ref())
                .context("experiment run failed")?;

            if viz {
                let reporter = Reporter::new(&output_dir, experiment_name.as_str())?;
                reporter.render(&dist).context("chart rendering failed")?;
            }

            // Write JSON artifact
            let writer = ResultWriter::new(&output_dir, experiment_name)?;
            let artifact = ExperimentArtifact {
                experiment: experiment.clone(),
                model: family.name().to_string(),
                metric: metric.clone(),
                n_folds: kfolds,
                holdout_fraction,
                seeds,
                scores: dist.scores().to_vec(),
                summary: dist.summary(),
            };
            writer.write_experiments(&artifact)?;

            // Build and print stdout summary
            let summary = dist.summary();
            let output = RunOutput {
                experiment,
                n_accounts: dataset.n_samples(),
                n_features: dataset.n_features(),
                model: artifact.model,
                metric,
                n_seeds: artifact.seeds.len(),
                scores: artifact.scores,
                mean: summary.as_ref().map(|s| s.mean),
                std_dev: summary.as_ref().map(|s| s.std_dev),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Command::Report {
            scores,
            experiment,
            output_dir,
        } => {
            let experiment_name = ExperimentName::new(experiment.clone())?;

            let artifact = read_experiments(&scores).context("failed to load experiment artifact")?;
            info!(n_scores = artifact.scores.len(), "artifact loaded");

            let dist = ScoreDistribution::new(artifact.scores);
            let reporter = Reporter::new(&output_dir, experiment_name.as_str())?;
            reporter.render(&dist).context("chart rendering failed")?;

            let summary = dist.summary();
            let output = ReportOutput {
                experiment,
                n_scores: dist.len(),
                mean: summary.as_ref().map(|s| s.mean),
                median: summary.as_ref().map(|s| s.median),
                std_dev: summary.as_ref().map(|s| s.std_dev),
                min: summary.as_ref().map(|s| s.min),
                max: summary.as_ref().map(|s| s.max),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
