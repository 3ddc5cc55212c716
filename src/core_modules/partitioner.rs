// THEORY:
// The `Partitioner` module decides which worker owns which pixels. It splits
// the image's row-major scan sequence into contiguous, non-overlapping ranges,
// one per worker, computed once up front. There is no dynamic rebalancing
// anywhere in the engine.
//
// Key architectural principles:
// 1.  **Even shares**: With T pixels and N workers, the first `T % N` workers
//     get `T / N + 1` pixels and the rest get `T / N`. Every share is within
//     one pixel of every other, which is as even as a static split can be.
// 2.  **Scan-interval ranges, not rectangles**: A `PixelRange` is an interval
//     of scan positions. Its endpoints are stored as inclusive `(x, y)`
//     coordinates, but a range routinely wraps across row boundaries.
// 3.  **Empty shares are no-ops**: When N exceeds T, the surplus workers have
//     nothing to do. `partition` simply materializes no range for them; the
//     full N-length allocation remains visible through `share_sizes`.

pub mod partitioner {
    /// A contiguous interval of row-major scan positions, endpoints inclusive.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PixelRange {
        pub start_x: u32,
        pub start_y: u32,
        pub end_x: u32,
        pub end_y: u32,
    }

    impl PixelRange {
        /// Scan position of the first pixel, `y * width + x`.
        pub fn start_position(&self, width: u32) -> usize {
            self.start_y as usize * width as usize + self.start_x as usize
        }

        /// Scan position of the last pixel, inclusive.
        pub fn end_position(&self, width: u32) -> usize {
            self.end_y as usize * width as usize + self.end_x as usize
        }

        pub fn pixel_count(&self, width: u32) -> usize {
            self.end_position(width) - self.start_position(width) + 1
        }

        /// The range's coordinates in scan order, wrapping across rows.
        pub fn coordinates(&self, width: u32) -> impl Iterator<Item = (u32, u32)> + use<> {
            let start = self.start_position(width);
            let end = self.end_position(width);
            (start..=end).map(move |position| {
                (
                    (position % width as usize) as u32,
                    (position / width as usize) as u32,
                )
            })
        }
    }

    /// Per-worker pixel allocation: `base = total / workers` each, with the
    /// remainder spread one pixel at a time over the first workers.
    pub fn share_sizes(total_pixels: usize, workers: usize) -> Vec<usize> {
        assert!(workers >= 1, "Cannot partition work across zero workers.");
        let base = total_pixels / workers;
        let remainder = total_pixels % workers;
        (0..workers)
            .map(|worker| if worker < remainder { base + 1 } else { base })
            .collect()
    }

    /// Carves the image's scan sequence into one contiguous range per
    /// non-empty share, in increasing scan order. Workers whose share is zero
    /// (more workers than pixels) get no range.
    pub fn partition(width: u32, height: u32, workers: usize) -> Vec<PixelRange> {
        let total = width as usize * height as usize;
        let shares = share_sizes(total, workers);

        let mut ranges = Vec::with_capacity(workers.min(total));
        let mut cursor = 0usize;
        for share in shares {
            if share == 0 {
                continue;
            }
            let start = cursor;
            let end = cursor + share - 1;
            ranges.push(PixelRange {
                start_x: (start % width as usize) as u32,
                start_y: (start / width as usize) as u32,
                end_x: (end % width as usize) as u32,
                end_y: (end / width as usize) as u32,
            });
            cursor = end + 1;
        }
        // Postcondition, kept in release builds: the ranges must account for
        // every pixel exactly once before any worker trusts them.
        assert_eq!(
            cursor, total,
            "Partition did not cover the image exactly once."
        );
        ranges
    }
}
