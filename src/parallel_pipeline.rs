// THEORY:
// The `parallel_pipeline` module is the fork-join worker pool. It takes the
// partitioner's ranges, forks one OS thread per non-empty range, and blocks at
// a join barrier until every worker has terminated. There is no work stealing,
// no rebalancing, and no cancellation: a run either completes all workers or
// fails as a whole.
//
// Key architectural principles:
// 1.  **Disjoint writes by construction**: Before any thread is spawned, the
//     output raster's backing slice is split into per-range `&mut` sub-slices.
//     Each worker owns exactly its own slice, so no lock, atomic, or unsafe
//     block appears anywhere in the pool.
// 2.  **Determinism**: Workers read only the input raster and each output cell
//     is a pure function of (input, x, y, transform). The final image is
//     bit-identical for any worker count and any scheduling order.
// 3.  **No silent faults**: Every join result is inspected after all workers
//     have finished. A panicking worker becomes `PipelineError::Worker`
//     instead of a quietly incomplete image.
// 4.  **Timing as data**: Each worker returns its elapsed compute time in a
//     `WorkerReport`. The slowest worker bounds the end-to-end latency, so the
//     caller reduces the reports with `critical_path`.

use crate::core_modules::partitioner::partitioner::PixelRange;
use crate::core_modules::raster::raster::Raster;
use crate::core_modules::transform::transform::Transform;
use crate::error::PipelineError;
use log::debug;
use std::any::Any;
use std::thread;
use std::time::{Duration, Instant};

/// Diagnostic result of one worker. Never consulted for correctness.
#[derive(Debug, Clone)]
pub struct WorkerReport {
    pub worker: usize,
    pub pixels: usize,
    pub elapsed: Duration,
}

/// The slowest worker's elapsed time, the run's latency proxy, since
/// workers execute concurrently.
pub fn critical_path(reports: &[WorkerReport]) -> Duration {
    reports.iter().map(|report| report.elapsed).max().unwrap_or_default()
}

/// Applies `transform` over every range, one worker per range, writing into
/// `output`. Blocks until all workers have finished, then surfaces the first
/// captured worker fault, if any.
///
/// `ranges` must be the exact scan-order cover produced by
/// `partitioner::partition` for the input's dimensions.
pub fn run(
    ranges: &[PixelRange],
    transform: Transform,
    input: &Raster,
    output: &mut Raster,
) -> Result<Vec<WorkerReport>, PipelineError> {
    assert_eq!(
        (input.width(), input.height()),
        (output.width(), output.height()),
        "Output raster dimensions must match the input."
    );

    let width = input.width();

    // Carve the output into per-range slices while we still hold the only
    // reference. Ranges are contiguous and ascending, so each split peels off
    // exactly one worker's cells.
    let mut tasks = Vec::with_capacity(ranges.len());
    let mut rest = output.cells_mut();
    for range in ranges {
        let (cells, tail) = rest.split_at_mut(range.pixel_count(width));
        tasks.push((range, cells));
        rest = tail;
    }
    assert!(
        rest.is_empty(),
        "Ranges must cover the output raster exactly."
    );

    let results: Vec<thread::Result<WorkerReport>> = thread::scope(|scope| {
        let handles: Vec<_> = tasks
            .into_iter()
            .enumerate()
            .map(|(worker, (range, cells))| {
                scope.spawn(move || {
                    let started = Instant::now();
                    let pixels = cells.len();
                    for (cell, (x, y)) in cells.iter_mut().zip(range.coordinates(width)) {
                        *cell = transform.apply(input, x, y);
                    }
                    WorkerReport {
                        worker,
                        pixels,
                        elapsed: started.elapsed(),
                    }
                })
            })
            .collect();

        // Join barrier: every worker is joined before any result is judged.
        handles.into_iter().map(|handle| handle.join()).collect()
    });

    let mut reports = Vec::with_capacity(results.len());
    for (worker, result) in results.into_iter().enumerate() {
        match result {
            Ok(report) => {
                debug!(
                    "worker {} processed {} pixels in {:?}",
                    report.worker, report.pixels, report.elapsed
                );
                reports.push(report);
            }
            Err(payload) => {
                return Err(PipelineError::Worker {
                    worker,
                    message: panic_message(payload),
                });
            }
        }
    }
    Ok(reports)
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        String::from("worker panicked")
    }
}

#[cfg(test)]
mod tests {
    use super::{critical_path, run};
    use crate::core_modules::partitioner::partitioner::partition;
    use crate::core_modules::pixel::pixel::Pixel;
    use crate::core_modules::raster::raster::Raster;
    use crate::core_modules::transform::transform::Transform;

    fn scrambled_raster(width: u32, height: u32) -> Raster {
        let cells = (0..width as usize * height as usize)
            .map(|i| ((i as u32).wrapping_mul(2654435761)) & 0xFF_FFFF)
            .collect();
        Raster::from_cells(width, height, cells)
    }

    fn run_with_workers(input: &Raster, transform: Transform, workers: usize) -> Raster {
        let ranges = partition(input.width(), input.height(), workers);
        let mut output = Raster::new(input.width(), input.height());
        run(&ranges, transform, input, &mut output).expect("Pool run failed.");
        output
    }

    #[test]
    fn two_by_two_invert_matches_the_expected_image() {
        let input = Raster::from_cells(
            2,
            2,
            vec![
                Pixel::new(255, 0, 0).pack(),
                Pixel::new(0, 255, 0).pack(),
                Pixel::new(0, 0, 255).pack(),
                Pixel::new(255, 255, 255).pack(),
            ],
        );
        let output = run_with_workers(&input, Transform::Invert, 2);
        assert_eq!(
            output.cells(),
            &[
                Pixel::new(0, 255, 255).pack(),
                Pixel::new(255, 0, 255).pack(),
                Pixel::new(255, 255, 0).pack(),
                Pixel::new(0, 0, 0).pack(),
            ]
        );
    }

    #[test]
    fn invert_output_is_independent_of_worker_count() {
        let input = scrambled_raster(13, 9);
        let total = input.pixel_count();
        let reference = run_with_workers(&input, Transform::Invert, 1);
        for workers in [2usize, 7, total + 5, num_cpus::get()] {
            let output = run_with_workers(&input, Transform::Invert, workers);
            assert_eq!(output.cells(), reference.cells(), "workers = {workers}");
        }
    }

    #[test]
    fn oil_output_is_independent_of_worker_count() {
        let input = scrambled_raster(11, 8);
        let total = input.pixel_count();
        let transform = Transform::OilEffect { radius: 2 };
        let reference = run_with_workers(&input, transform, 1);
        for workers in [2usize, 7, total + 5, num_cpus::get()] {
            let output = run_with_workers(&input, transform, workers);
            assert_eq!(output.cells(), reference.cells(), "workers = {workers}");
        }
    }

    #[test]
    fn a_faulting_worker_is_surfaced_after_every_join() {
        use crate::core_modules::partitioner::partitioner::PixelRange;
        use crate::error::PipelineError;

        let input = scrambled_raster(2, 2);
        let mut output = Raster::new(2, 2);

        // The second range's coordinates lie outside the raster, so its worker
        // panics on the lookup; the first range is well-formed.
        let ranges = [
            PixelRange {
                start_x: 0,
                start_y: 0,
                end_x: 1,
                end_y: 0,
            },
            PixelRange {
                start_x: 0,
                start_y: 2,
                end_x: 1,
                end_y: 2,
            },
        ];

        let error = run(&ranges, Transform::Invert, &input, &mut output)
            .expect_err("A worker fault must fail the run.");
        assert!(matches!(error, PipelineError::Worker { worker: 1, .. }));

        // The healthy worker ran to completion before the fault was raised.
        assert_eq!(
            output.cells()[0],
            Transform::Invert.apply(&input, 0, 0)
        );
        assert_eq!(
            output.cells()[1],
            Transform::Invert.apply(&input, 1, 0)
        );
    }

    #[test]
    fn one_report_per_non_empty_range() {
        let input = scrambled_raster(3, 2);
        let ranges = partition(3, 2, 10);
        let mut output = Raster::new(3, 2);
        let reports = run(&ranges, Transform::Invert, &input, &mut output).expect("Pool run failed.");

        // 6 pixels, 10 requested workers: only 6 ranges materialize.
        assert_eq!(reports.len(), 6);
        assert_eq!(reports.iter().map(|r| r.pixels).sum::<usize>(), 6);
        for (index, report) in reports.iter().enumerate() {
            assert_eq!(report.worker, index);
        }
    }

    #[test]
    fn critical_path_is_the_maximum_elapsed() {
        use super::WorkerReport;
        use std::time::Duration;

        let reports = vec![
            WorkerReport { worker: 0, pixels: 10, elapsed: Duration::from_millis(3) },
            WorkerReport { worker: 1, pixels: 10, elapsed: Duration::from_millis(9) },
            WorkerReport { worker: 2, pixels: 10, elapsed: Duration::from_millis(5) },
        ];
        assert_eq!(critical_path(&reports), Duration::from_millis(9));
        assert_eq!(critical_path(&[]), Duration::ZERO);
    }
}
