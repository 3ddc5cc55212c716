pub mod partitioner;
pub mod pixel;
pub mod raster;
pub mod transform;
pub mod utils;
