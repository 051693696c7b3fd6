use super::*;

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};

fn square_on_white(canvas: u32, x0: u32, side: u32) -> DynamicImage {
    let mut image = RgbaImage::from_pixel(canvas, canvas, Rgba([255, 255, 255, 255]));
    for y in x0..x0 + side {
        for x in x0..x0 + side {
            image.put_pixel(x, y, Rgba([0, 0, 0, 255]));
        }
    }
    DynamicImage::ImageRgba8(image)
}

fn bounds(contour: &Contour) -> (f64, f64, f64, f64) {
    let xs = contour.points.iter().map(|p| p.x);
    let ys = contour.points.iter().map(|p| p.y);
    (
        xs.clone().fold(f64::INFINITY, f64::min),
        ys.clone().fold(f64::INFINITY, f64::min),
        xs.fold(f64::NEG_INFINITY, f64::max),
        ys.fold(f64::NEG_INFINITY, f64::max),
    )
}

// --- trace ---

#[test]
fn black_square_yields_exactly_one_contour() {
    let image = square_on_white(200, 50, 100);
    let set = trace(&image, &ExtractConfig::default()).expect("trace");
    assert_eq!((set.width, set.height), (200, 200));
    assert_eq!(set.contours.len(), 1);

    let (min_x, min_y, max_x, max_y) = bounds(&set.contours[0]);
    assert!((min_x - 50.0).abs() <= 3.0, "min_x {min_x}");
    assert!((min_y - 50.0).abs() <= 3.0, "min_y {min_y}");
    assert!((max_x - 150.0).abs() <= 3.0, "max_x {max_x}");
    assert!((max_y - 150.0).abs() <= 3.0, "max_y {max_y}");
}

#[test]
fn blank_image_yields_no_contours() {
    let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(64, 64, Rgba([255, 255, 255, 255])));
    let set = trace(&image, &ExtractConfig::default()).expect("trace");
    assert!(set.contours.is_empty());
}

#[test]
fn fully_transparent_image_is_treated_as_white() {
    let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(64, 64, Rgba([0, 0, 0, 0])));
    let set = trace(&image, &ExtractConfig::default()).expect("trace");
    assert!(set.contours.is_empty());
}

#[test]
fn large_image_is_traced_at_capped_size() {
    let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(1024, 512, Rgba([255, 255, 255, 255])));
    let set = trace(&image, &ExtractConfig::default()).expect("trace");
    assert_eq!((set.width, set.height), (512, 256));
}

#[test]
fn zero_sized_image_is_rejected() {
    let image = DynamicImage::ImageRgba8(RgbaImage::new(0, 10));
    assert!(matches!(trace(&image, &ExtractConfig::default()), Err(ExtractError::EmptyImage)));
}

#[test]
fn surviving_contours_meet_minimum_area() {
    let mut image = RgbaImage::from_pixel(120, 120, Rgba([255, 255, 255, 255]));
    for (x, y) in [(10, 10), (60, 20), (90, 90), (30, 70)] {
        image.put_pixel(x, y, Rgba([0, 0, 0, 255]));
    }
    for y in 40..60 {
        for x in 40..70 {
            image.put_pixel(x, y, Rgba([0, 0, 0, 255]));
        }
    }
    let config = ExtractConfig { min_area_ratio: 0.001, ..ExtractConfig::default() };
    let set = trace(&DynamicImage::ImageRgba8(image), &config).expect("trace");
    let min_area = 0.001 * 120.0 * 120.0;
    assert!(!set.contours.is_empty());
    assert!(set.contours.iter().all(|c| c.area >= min_area));
}

#[test]
fn thresholded_and_cleaned_sources_still_find_the_square() {
    let image = square_on_white(120, 30, 60);
    for edge_source in [EdgeSource::Thresholded, EdgeSource::Cleaned] {
        let config = ExtractConfig { edge_source, ..ExtractConfig::default() };
        let set = trace(&image, &config).expect("trace");
        assert!(!set.contours.is_empty(), "{edge_source:?}");
    }
}

#[test]
fn trace_does_not_mutate_source() {
    let image = square_on_white(80, 20, 40);
    let before = image.clone();
    trace(&image, &ExtractConfig::default()).expect("trace");
    assert_eq!(image, before);
}

// --- extract / extract_bytes ---

#[test]
fn extract_sizes_document_to_processed_raster() {
    let image = square_on_white(200, 50, 100);
    let doc = extract(&image, &ExtractConfig::default()).expect("extract");
    assert_eq!((doc.width, doc.height), (200.0, 200.0));
    assert_eq!(doc.paths.len(), 1);
    assert!(doc.paths[0].subpaths[0].closed);
    assert_eq!(doc.paths[0].fill, "black");
}

#[test]
fn extract_bytes_decodes_png() {
    let mut bytes = Vec::new();
    square_on_white(100, 25, 50)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("encode");
    let doc = extract_bytes(&bytes, &ExtractConfig::default()).expect("extract");
    assert_eq!(doc.paths.len(), 1);
}

#[test]
fn extract_bytes_rejects_garbage() {
    let result = extract_bytes(b"definitely not an image", &ExtractConfig::default());
    assert!(matches!(result, Err(ExtractError::Decode(_))));
}
