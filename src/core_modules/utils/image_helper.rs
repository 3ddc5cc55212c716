// The engine's only file-format boundary. Everything behind this module works
// on `Raster`; decoding and encoding of compressed formats is delegated to the
// `image` crate.

pub mod image_helper {
    use crate::core_modules::pixel::pixel::Pixel;
    use crate::core_modules::raster::raster::Raster;
    use image::{Rgb, RgbImage};
    use std::path::Path;

    /// Decodes an image file into a packed-RGB raster. Any alpha channel is
    /// dropped by the RGB8 conversion.
    pub fn load(path: &Path) -> Result<Raster, image::ImageError> {
        let decoded = image::open(path)?.to_rgb8();
        let (width, height) = decoded.dimensions();
        let cells = decoded
            .pixels()
            .map(|rgb| Pixel::new(rgb[0], rgb[1], rgb[2]).pack())
            .collect();
        Ok(Raster::from_cells(width, height, cells))
    }

    /// Encodes a raster to `path`; the format is chosen from the file
    /// extension.
    pub fn save(raster: &Raster, path: &Path) -> Result<(), image::ImageError> {
        let buffer = RgbImage::from_fn(raster.width(), raster.height(), |x, y| {
            let pixel = raster.pixel(x, y);
            Rgb([pixel.red, pixel.green, pixel.blue])
        });
        buffer.save(path)
    }
}
