//! Mean brightness of grayscale bitmaps on a fixed integer scale.

use image::{GenericImageView, Luma};

/// Luminance of a pure white bitmap. Pure black is 0.
pub const SCALE_MAX: Luminance = 10_000;

/// Normalized brightness in `0..=SCALE_MAX`.
pub type Luminance = u16;

/// Mean brightness of `bitmap`, scaled to `0..=SCALE_MAX` and truncated.
///
/// Works on whole bitmaps as well as borrowed region views. The bitmap must
/// have a non-zero area: debug builds assert it, release builds return 0 for
/// an empty bitmap.
pub fn mean_luminance<I>(bitmap: &I) -> Luminance
where
    I: GenericImageView<Pixel = Luma<u8>>,
{
    let (w, h) = bitmap.dimensions();
    let area = u64::from(w) * u64::from(h);
    debug_assert!(area > 0, "luminance of an empty bitmap is undefined");

    let sum: u64 = bitmap.pixels().map(|(_, _, p)| u64::from(p.0[0])).sum();
    (sum * u64::from(SCALE_MAX) / (area.max(1) * 255)) as Luminance
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GrayImage;

    #[test]
    fn white_is_scale_max() {
        let img = GrayImage::from_pixel(7, 3, Luma([255]));
        assert_eq!(mean_luminance(&img), SCALE_MAX);
    }

    #[test]
    fn black_is_zero() {
        let img = GrayImage::from_pixel(50, 50, Luma([0]));
        assert_eq!(mean_luminance(&img), 0);
    }

    #[test]
    fn half_covered_truncates() {
        // 1 white pixel out of 3: 3333.33.. truncates to 3333
        let img = GrayImage::from_fn(3, 1, |x, _| Luma([if x == 0 { 255 } else { 0 }]));
        assert_eq!(mean_luminance(&img), 3333);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "empty bitmap")]
    fn empty_bitmap_trips_debug_assertion() {
        mean_luminance(&GrayImage::new(0, 4));
    }

    #[test]
    fn measures_region_views() {
        let img = GrayImage::from_fn(4, 4, |x, _| Luma([if x < 2 { 0 } else { 255 }]));
        assert_eq!(mean_luminance(&*img.view(0, 0, 2, 4)), 0);
        assert_eq!(mean_luminance(&*img.view(2, 0, 2, 4)), SCALE_MAX);
        assert_eq!(mean_luminance(&*img.view(1, 0, 2, 2)), SCALE_MAX / 2);
    }
}
