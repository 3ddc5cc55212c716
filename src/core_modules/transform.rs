// THEORY:
// The `Transform` module is the per-pixel algorithm family. A transform is a
// pure function of `(input raster, x, y)`: it never reads the output raster,
// never touches a neighbor's result, and carries no mutable state. That purity
// is what lets the worker pool evaluate pixels in any order, on any number of
// threads, and still produce a bit-identical image.
//
// Key architectural principles:
// 1.  **Input-only reads**: `OilEffect` samples its window from the input
//     raster exclusively. Reading partially written output would make the
//     result depend on worker scheduling.
// 2.  **Deterministic ties**: The mode of a channel window is computed with a
//     fixed 256-slot counting array scanned in ascending index order, so equal
//     frequencies always resolve to the smallest channel value. The result
//     cannot vary with iteration order or thread count.
// 3.  **Per-channel independence**: Each of R, G, B is transformed on its own;
//     the output pixel for the oil filter is generally a color that appears
//     nowhere in the window.

pub mod transform {
    use crate::core_modules::pixel::pixel::{CHANNEL_MAX, CHANNELS, Channel, PackedRgb, Pixel};
    use crate::core_modules::raster::raster::Raster;

    /// Number of representable channel values, the size of a counting array.
    const CHANNEL_VALUES: usize = CHANNEL_MAX as usize + 1;

    /// The per-pixel transform family. Stateless and `Copy`: every worker
    /// carries its own copy into its range.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Transform {
        /// Replaces each channel c with `255 - c`. Involutive.
        Invert,
        /// Replaces each channel with the most frequent value of that channel
        /// inside the square window of the given radius, clipped to the image.
        OilEffect { radius: u32 },
    }

    impl Transform {
        /// Computes the output cell for coordinate `(x, y)` from the input
        /// raster alone.
        pub fn apply(&self, input: &Raster, x: u32, y: u32) -> PackedRgb {
            match *self {
                Transform::Invert => invert(input.pixel(x, y)).pack(),
                Transform::OilEffect { radius } => oil(input, x, y, radius).pack(),
            }
        }
    }

    fn invert(pixel: Pixel) -> Pixel {
        Pixel::new(
            CHANNEL_MAX - pixel.red,
            CHANNEL_MAX - pixel.green,
            CHANNEL_MAX - pixel.blue,
        )
    }

    /// Mode filter over the clipped window `[x-radius, x+radius] x
    /// [y-radius, y+radius]`, one channel at a time. `radius == 0` degenerates
    /// to the pixel itself, making the transform the identity.
    fn oil(input: &Raster, x: u32, y: u32, radius: u32) -> Pixel {
        let mut counts = [[0u32; CHANNEL_VALUES]; CHANNELS];

        // Saturating on both ends: a radius up to u32::MAX is a valid argument
        // and must clip to the image, not wrap.
        let x_min = x.saturating_sub(radius);
        let y_min = y.saturating_sub(radius);
        let x_max = x.saturating_add(radius).min(input.width() - 1);
        let y_max = y.saturating_add(radius).min(input.height() - 1);

        // One pass over the window feeds all three counting arrays.
        for wy in y_min..=y_max {
            for wx in x_min..=x_max {
                let sample = input.pixel(wx, wy);
                for (channel, slots) in counts.iter_mut().enumerate() {
                    slots[sample.channel(channel) as usize] += 1;
                }
            }
        }

        let [red, green, blue] = counts.map(|slots| most_common(&slots));
        Pixel::new(red, green, blue)
    }

    /// Ascending scan with a strict `>` comparison: on a tie for the maximum
    /// frequency, the smallest channel value wins.
    fn most_common(slots: &[u32; CHANNEL_VALUES]) -> Channel {
        let mut best_value = 0usize;
        let mut best_count = slots[0];
        for (value, &count) in slots.iter().enumerate().skip(1) {
            if count > best_count {
                best_value = value;
                best_count = count;
            }
        }
        best_value as Channel
    }
}

#[cfg(test)]
mod tests {
    use super::transform::Transform;
    use crate::core_modules::pixel::pixel::Pixel;
    use crate::core_modules::raster::raster::Raster;

    /// Deterministic pseudo-random raster for identity checks.
    fn scrambled_raster(width: u32, height: u32) -> Raster {
        let cells = (0..width as usize * height as usize)
            .map(|i| {
                let i = i as u32;
                (i.wrapping_mul(2654435761)) & 0xFF_FFFF
            })
            .collect();
        Raster::from_cells(width, height, cells)
    }

    #[test]
    fn invert_is_involutive() {
        let raster = scrambled_raster(16, 16);
        for y in 0..16 {
            for x in 0..16 {
                let once = Transform::Invert.apply(&raster, x, y);
                let flipped = Raster::from_cells(1, 1, vec![once]);
                let twice = Transform::Invert.apply(&flipped, 0, 0);
                assert_eq!(twice, raster.get(x, y));
            }
        }
    }

    #[test]
    fn invert_matches_channel_arithmetic() {
        let raster = Raster::from_cells(1, 1, vec![Pixel::new(255, 0, 17).pack()]);
        let inverted = Pixel::unpack(Transform::Invert.apply(&raster, 0, 0));
        assert_eq!(inverted, Pixel::new(0, 255, 238));
    }

    #[test]
    fn oil_with_zero_radius_is_identity() {
        let raster = scrambled_raster(9, 7);
        let transform = Transform::OilEffect { radius: 0 };
        for y in 0..7 {
            for x in 0..9 {
                assert_eq!(transform.apply(&raster, x, y), raster.get(x, y));
            }
        }
    }

    #[test]
    fn oil_on_uniform_raster_returns_the_uniform_color() {
        let color = Pixel::new(40, 90, 200).pack();
        let raster = Raster::from_cells(3, 3, vec![color; 9]);
        let transform = Transform::OilEffect { radius: 1 };
        assert_eq!(transform.apply(&raster, 1, 1), color);
        // Border pixels see a clipped window of the same uniform color.
        assert_eq!(transform.apply(&raster, 0, 0), color);
        assert_eq!(transform.apply(&raster, 2, 2), color);
    }

    #[test]
    fn oil_tie_break_picks_the_smallest_value() {
        // A 2x1 raster: the radius-1 window around either pixel contains both
        // cells, so every channel ties 1-1 and the smaller value must win.
        let low = Pixel::new(5, 80, 200).pack();
        let high = Pixel::new(9, 70, 210).pack();
        let raster = Raster::from_cells(2, 1, vec![low, high]);
        let transform = Transform::OilEffect { radius: 1 };

        let expected = Pixel::new(5, 70, 200).pack();
        assert_eq!(transform.apply(&raster, 0, 0), expected);
        assert_eq!(transform.apply(&raster, 1, 0), expected);
    }

    #[test]
    fn oil_majority_beats_the_center_pixel() {
        // Center pixel is an outlier; the window majority takes over.
        let majority = Pixel::new(10, 10, 10).pack();
        let outlier = Pixel::new(250, 250, 250).pack();
        let mut cells = vec![majority; 9];
        cells[4] = outlier;
        let raster = Raster::from_cells(3, 3, cells);

        let transform = Transform::OilEffect { radius: 1 };
        assert_eq!(transform.apply(&raster, 1, 1), majority);
    }

    #[test]
    fn oil_with_the_maximum_radius_clips_instead_of_wrapping() {
        // u32::MAX is accepted by the CLI; the window arithmetic must saturate
        // and behave exactly like any other whole-image window.
        let raster = scrambled_raster(2, 1);
        let whole_image = Transform::OilEffect { radius: 10 };
        let extreme = Transform::OilEffect { radius: u32::MAX };
        for x in 0..2 {
            assert_eq!(
                extreme.apply(&raster, x, 0),
                whole_image.apply(&raster, x, 0)
            );
        }
    }

    #[test]
    fn oil_window_is_clipped_at_the_border() {
        // Radius larger than the image: every pixel sees the whole raster and
        // the filter must not index out of bounds.
        let raster = scrambled_raster(3, 2);
        let transform = Transform::OilEffect { radius: 10 };
        let reference = transform.apply(&raster, 0, 0);
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(transform.apply(&raster, x, y), reference);
            }
        }
    }
}
