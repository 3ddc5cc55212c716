// THEORY:
// The `pipeline` module is the top-level driver API. It wires the partitioner
// and the worker pool together behind a single entry point: configure a
// transform and a worker count once, then process rasters (or files) through
// it. The binaries are thin shells over this module.

use crate::core_modules::partitioner::partitioner::partition;
use crate::core_modules::raster::raster::Raster;
use crate::core_modules::utils::image_helper::image_helper;
use crate::error::PipelineError;
use crate::parallel_pipeline::{self, WorkerReport, critical_path};
use log::info;
use std::path::Path;
use std::time::Duration;

// Re-export the pieces callers need alongside the pipeline.
pub use crate::core_modules::transform::transform::Transform;

/// Configuration for one pipeline: which transform to apply and across how
/// many workers. The worker count is taken as given; oversubscription is
/// allowed and only affects speed.
#[derive(Debug, Clone, Copy)]
pub struct PipelineConfig {
    pub transform: Transform,
    pub workers: usize,
}

/// Result of processing one raster in memory.
pub struct ProcessOutcome {
    pub raster: Raster,
    pub worker_reports: Vec<WorkerReport>,
}

impl ProcessOutcome {
    /// The slowest worker's elapsed time, the run's latency proxy.
    pub fn processing_time(&self) -> Duration {
        critical_path(&self.worker_reports)
    }
}

/// Result of a file-to-file run, after the output image has been persisted.
#[derive(Debug, Clone)]
pub struct JobSummary {
    pub width: u32,
    pub height: u32,
    pub processing_time: Duration,
}

/// The top-level driver: partition, fork, join, report.
pub struct ImagePipeline {
    config: PipelineConfig,
}

impl ImagePipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Applies the configured transform to `input`, returning the new raster
    /// and the per-worker timing reports.
    pub fn process(&self, input: &Raster) -> Result<ProcessOutcome, PipelineError> {
        let ranges = partition(input.width(), input.height(), self.config.workers);
        let mut output = Raster::new(input.width(), input.height());
        let worker_reports =
            parallel_pipeline::run(&ranges, self.config.transform, input, &mut output)?;

        info!(
            "{:?} over {}x{} with {} workers ({} active): {:?} critical path",
            self.config.transform,
            input.width(),
            input.height(),
            self.config.workers,
            worker_reports.len(),
            critical_path(&worker_reports),
        );

        Ok(ProcessOutcome {
            raster: output,
            worker_reports,
        })
    }

    /// Loads `input_path`, processes it, and persists the result to
    /// `output_path`. Nothing is written when the run fails.
    pub fn process_file(
        &self,
        input_path: &Path,
        output_path: &Path,
    ) -> Result<JobSummary, PipelineError> {
        let input = image_helper::load(input_path)?;
        let outcome = self.process(&input)?;
        image_helper::save(&outcome.raster, output_path)?;

        Ok(JobSummary {
            width: input.width(),
            height: input.height(),
            processing_time: outcome.processing_time(),
        })
    }
}
