// THEORY:
// The `Raster` module is the data container for a whole image: width, height,
// and a flat, row-major vector of packed RGB cells. Like `Pixel`, it is a
// "dumb" container: it holds cells and knows its own indexing math, nothing
// about transforms or workers.
//
// Key architectural principles:
// 1.  **Row-major scan order**: Cell `(x, y)` lives at index `y * width + x`.
//     The partitioner, the worker pool, and the I/O helper all rely on this
//     single definition of scan order.
// 2.  **Ownership by partition**: The only mutable access is `cells_mut`, a
//     view of the whole backing slice. The worker pool splits that slice into
//     disjoint per-range sub-slices before any worker starts, so exclusive
//     ownership of output cells is enforced by the borrow checker, not by a
//     lock or a runtime guard.

pub mod raster {
    use crate::core_modules::pixel::pixel::{PackedRgb, Pixel};

    /// A W×H grid of packed RGB cells in row-major scan order.
    pub struct Raster {
        width: u32,
        height: u32,
        cells: Vec<PackedRgb>,
    }

    impl Raster {
        /// Creates a zero-filled (black) raster, the blank output canvas a
        /// run writes into exactly once per cell.
        pub fn new(width: u32, height: u32) -> Self {
            Self {
                width,
                height,
                cells: vec![0; width as usize * height as usize],
            }
        }

        pub fn from_cells(width: u32, height: u32, cells: Vec<PackedRgb>) -> Self {
            if cells.len() != width as usize * height as usize {
                panic!(
                    "Cannot build a {width}x{height} raster from {} cells.",
                    cells.len()
                );
            }
            Self {
                width,
                height,
                cells,
            }
        }

        pub fn width(&self) -> u32 {
            self.width
        }

        pub fn height(&self) -> u32 {
            self.height
        }

        /// Total number of pixels, the `T` every partition is computed over.
        pub fn pixel_count(&self) -> usize {
            self.cells.len()
        }

        fn index(&self, x: u32, y: u32) -> usize {
            debug_assert!(x < self.width && y < self.height);
            y as usize * self.width as usize + x as usize
        }

        pub fn get(&self, x: u32, y: u32) -> PackedRgb {
            self.cells[self.index(x, y)]
        }

        pub fn pixel(&self, x: u32, y: u32) -> Pixel {
            Pixel::unpack(self.get(x, y))
        }

        pub fn cells(&self) -> &[PackedRgb] {
            &self.cells
        }

        /// Mutable view of the full backing slice, in scan order. The worker
        /// pool carves this into disjoint per-range slices before forking.
        pub fn cells_mut(&mut self) -> &mut [PackedRgb] {
            &mut self.cells
        }
    }
}
