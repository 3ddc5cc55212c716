use thiserror::Error;

/// Failures a run can surface to the caller. Argument problems are caught
/// earlier, in `cli`, before any image is touched.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Decode, encode, or file I/O failure from the image boundary.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// A worker faulted while processing its range. The run is reported as
    /// failed; the partially written output raster is never persisted.
    #[error("worker {worker} failed: {message}")]
    Worker { worker: usize, message: String },
}
