//! Diagnostic charts and summary statistics for a score distribution.

use std::fs;
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use tracing::{info, instrument};

use crate::distribution::ScoreDistribution;
use crate::error::EvalError;

/// Renders a score distribution as SVG charts plus a logged summary.
///
/// Creates the output directory on construction if it does not exist.
/// Chart files are named `{stem}_scores.svg`, `{stem}_density.svg`, and
/// `{stem}_box.svg`. The distribution is only read, never modified.
pub struct Reporter {
    output_dir: PathBuf,
    stem: String,
}

impl Reporter {
    /// Create a reporter targeting the given directory and file stem.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::ChartDir`] if the directory cannot be created.
    pub fn new(output_dir: &Path, stem: &str) -> Result<Self, EvalError> {
        fs::create_dir_all(output_dir).map_err(|e| EvalError::ChartDir {
            path: output_dir.to_path_buf(),
            source: e,
        })?;
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            stem: stem.to_string(),
        })
    }

    /// Render all charts and log the summary statistics.
    ///
    /// An empty distribution renders nothing and is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::Render`] if a chart cannot be written.
    #[instrument(skip_all, fields(n_scores = dist.len()))]
    pub fn render(&self, dist: &ScoreDistribution) -> Result<(), EvalError> {
        let Some(summary) = dist.summary() else {
            info!("no scores to report");
            return Ok(());
        };

        self.draw_bar_chart(dist.scores())?;
        self.draw_density(dist.scores(), summary.std_dev)?;
        self.draw_box_plot(dist.scores())?;

        info!(
            mean = summary.mean,
            median = summary.median,
            std_dev = summary.std_dev,
            min = summary.min,
            max = summary.max,
            "experiment summary"
        );
        Ok(())
    }

    fn chart_path(&self, suffix: &str) -> PathBuf {
        self.output_dir.join(format!("{}_{suffix}.svg", self.stem))
    }

    /// One bar per experiment, in seed order.
    fn draw_bar_chart(&self, scores: &[f64]) -> Result<(), EvalError> {
        let path = self.chart_path("scores");
        let result = (|| -> Result<(), Box<dyn std::error::Error>> {
            let root = SVGBackend::new(&path, (640, 360)).into_drawing_area();
            root.fill(&WHITE)?;

            let y_max = scores.iter().copied().fold(0.0f64, f64::max).max(1.0) * 1.05;
            let mut chart = ChartBuilder::on(&root)
                .caption("Experiment Scores", ("sans-serif", 20))
                .margin(10)
                .x_label_area_size(35)
                .y_label_area_size(45)
                .build_cartesian_2d(0f64..scores.len() as f64, 0f64..y_max)?;
            chart
                .configure_mesh()
                .x_desc("Experiment")
                .y_desc("Score")
                .draw()?;

            chart.draw_series(scores.iter().enumerate().map(|(i, &s)| {
                Rectangle::new(
                    [(i as f64 + 0.15, 0.0), (i as f64 + 0.85, s)],
                    BLUE.mix(0.6).filled(),
                )
            }))?;
            root.present()?;
            Ok(())
        })();
        result.map_err(|e| EvalError::Render {
            path,
            message: e.to_string(),
        })
    }

    /// Gaussian kernel density estimate with Silverman's bandwidth.
    fn draw_density(&self, scores: &[f64], std_dev: f64) -> Result<(), EvalError> {
        let path = self.chart_path("density");
        let result = (|| -> Result<(), Box<dyn std::error::Error>> {
            let n = scores.len() as f64;
            let bandwidth = (1.06 * std_dev * n.powf(-0.2)).max(1e-3);
            let lo = scores.iter().copied().fold(f64::INFINITY, f64::min) - 3.0 * bandwidth;
            let hi = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max) + 3.0 * bandwidth;

            let points: Vec<(f64, f64)> = (0..=200)
                .map(|step| {
                    let x = lo + (hi - lo) * step as f64 / 200.0;
                    let density = scores
                        .iter()
                        .map(|&s| {
                            let z = (x - s) / bandwidth;
                            (-0.5 * z * z).exp()
                        })
                        .sum::<f64>()
                        / (n * bandwidth * (2.0 * std::f64::consts::PI).sqrt());
                    (x, density)
                })
                .collect();
            let y_max = points.iter().map(|&(_, d)| d).fold(0.0f64, f64::max) * 1.1;

            let root = SVGBackend::new(&path, (640, 360)).into_drawing_area();
            root.fill(&WHITE)?;
            let mut chart = ChartBuilder::on(&root)
                .caption("Score Distribution", ("sans-serif", 20))
                .margin(10)
                .x_label_area_size(35)
                .y_label_area_size(45)
                .build_cartesian_2d(lo..hi, 0f64..y_max)?;
            chart
                .configure_mesh()
                .x_desc("Score")
                .y_desc("Density")
                .draw()?;

            chart.draw_series(LineSeries::new(points, &RED))?;
            root.present()?;
            Ok(())
        })();
        result.map_err(|e| EvalError::Render {
            path,
            message: e.to_string(),
        })
    }

    fn draw_box_plot(&self, scores: &[f64]) -> Result<(), EvalError> {
        let path = self.chart_path("box");
        let result = (|| -> Result<(), Box<dyn std::error::Error>> {
            let values: Vec<f32> = scores.iter().map(|&s| s as f32).collect();
            let quartiles = Quartiles::new(&values);

            let lo = values.iter().copied().fold(f32::INFINITY, f32::min);
            let hi = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
            let pad = ((hi - lo) * 0.2).max(0.05);

            let root = SVGBackend::new(&path, (320, 360)).into_drawing_area();
            root.fill(&WHITE)?;
            let mut chart = ChartBuilder::on(&root)
                .caption("Score Box Plot", ("sans-serif", 20))
                .margin(10)
                .x_label_area_size(35)
                .y_label_area_size(45)
                .build_cartesian_2d((0i32..2i32).into_segmented(), (lo - pad)..(hi + pad))?;
            chart.configure_mesh().y_desc("Score").draw()?;

            chart.draw_series(std::iter::once(Boxplot::new_vertical(
                SegmentValue::CenterOf(1),
                &quartiles,
            )))?;
            root.present()?;
            Ok(())
        })();
        result.map_err(|e| EvalError::Render {
            path,
            message: e.to_string(),
        })
    }
}
