//! Whole-image filters used by the extractor.
//!
//! Each function borrows its input and returns a new owned buffer, so the
//! caller's scope decides how long an intermediate image lives.

use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, GrayImage, Luma, Rgb, RgbImage, RgbaImage};
use imageproc::morphology::{self, Mask};
use imageproc::{edges, filter};

#[cfg(test)]
#[path = "raster_test.rs"]
mod raster_test;

/// Dimensions that fit `width` × `height` inside a `max` × `max` square.
///
/// Aspect ratio is preserved up to integer truncation and the image is never
/// enlarged. The longer side becomes exactly `max`; neither side drops below 1.
#[must_use]
pub fn fit_dimensions(width: u32, height: u32, max: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest <= max || max == 0 {
        return (width, height);
    }
    let fit = |side: u32| {
        let scaled = u64::from(side) * u64::from(max) / u64::from(longest);
        u32::try_from(scaled).unwrap_or(max).max(1)
    };
    (fit(width), fit(height))
}

/// Resize `image` to fit within `max` pixels on its longer side.
#[must_use]
pub fn resize_to_fit(image: &DynamicImage, max: u32) -> RgbaImage {
    let (width, height) = image.dimensions();
    let (fit_w, fit_h) = fit_dimensions(width, height, max);
    if (fit_w, fit_h) == (width, height) {
        return image.to_rgba8();
    }
    imageops::resize(&image.to_rgba8(), fit_w, fit_h, FilterType::Triangle)
}

/// Composite an RGBA image over an opaque white background.
#[must_use]
pub fn flatten_on_white(image: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let px = image.get_pixel(x, y);
        let alpha = u16::from(px[3]);
        let blend = |channel: u8| {
            let mixed = (u16::from(channel) * alpha + 255 * (255 - alpha) + 127) / 255;
            u8::try_from(mixed).unwrap_or(u8::MAX)
        };
        Rgb([blend(px[0]), blend(px[1]), blend(px[2])])
    })
}

/// Luma conversion.
#[must_use]
pub fn grayscale(image: &RgbImage) -> GrayImage {
    imageops::grayscale(image)
}

/// Gaussian blur. A non-positive sigma returns an unblurred copy.
#[must_use]
pub fn blur(image: &GrayImage, sigma: f32) -> GrayImage {
    if sigma > 0.0 {
        filter::gaussian_blur_f32(image, sigma)
    } else {
        image.clone()
    }
}

/// Binary threshold against a Gaussian-weighted local mean.
///
/// A pixel becomes 255 when it is brighter than `local_mean - offset`,
/// otherwise 0.
#[must_use]
pub fn adaptive_threshold(image: &GrayImage, sigma: f32, offset: i16) -> GrayImage {
    let local_mean = blur(image, sigma);
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let value = i16::from(image.get_pixel(x, y)[0]);
        let threshold = i16::from(local_mean.get_pixel(x, y)[0]) - offset;
        Luma([if value > threshold { 255 } else { 0 }])
    })
}

/// Morphological open followed by close with a 2×2 structuring element.
///
/// Removes single-pixel specks and fills single-pixel gaps while keeping
/// 2×2 features. The element covers the pixel and its up-left neighbours;
/// dilation uses the mirrored element so the result does not drift.
#[must_use]
pub fn open_close(binary: &GrayImage) -> GrayImage {
    let block = GrayImage::from_pixel(2, 2, Luma([255]));
    let element = Mask::from_image(&block, 1, 1);
    let mirrored = Mask::from_image(&block, 0, 0);

    let opened = morphology::grayscale_dilate(&morphology::grayscale_erode(binary, &element), &mirrored);
    morphology::grayscale_erode(&morphology::grayscale_dilate(&opened, &mirrored), &element)
}

/// Canny edge map: 255 on edges, 0 elsewhere.
#[must_use]
pub fn canny(image: &GrayImage, low: f32, high: f32) -> GrayImage {
    edges::canny(image, low, high)
}
