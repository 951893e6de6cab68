use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{imageops::FilterType, DynamicImage, ImageOutputFormat};
use std::io::Cursor;
use thiserror::Error;

/// Neither output dimension exceeds this bound; no upscaling.
pub const MAX_DIMENSION: u32 = 1000;
pub const JPEG_QUALITY: u8 = 60;

const DATA_URI_MARKER: &str = ";base64,";
const OUTPUT_PREFIX: &str = "data:image/jpeg;base64,";

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("payload is not a base64 image data URI")]
    InvalidDataUri,
    #[error("could not decode uploaded image: {0}")]
    Decode(image::ImageError),
    #[error("could not re-encode image: {0}")]
    Encode(image::ImageError),
}

/// Decodes an uploaded data URI, fits it inside the bounding box and
/// re-encodes it as a JPEG data URI. Undecodable payloads fail outright.
pub fn normalize(data_uri: &str) -> Result<String, ImageError> {
    let bytes = decode_data_uri(data_uri)?;
    let image = image::load_from_memory(&bytes).map_err(ImageError::Decode)?;
    let (width, height) = (image.width(), image.height());
    let (target_w, target_h) = bounded_dimensions(width, height);
    let resized = if (target_w, target_h) == (width, height) {
        image
    } else {
        image.resize_exact(target_w, target_h, FilterType::Triangle)
    };
    encode_jpeg(&resized)
}

/// Width-major rule: the larger axis is clamped to the bound, the other
/// follows proportionally. Dimensions already inside the box pass through.
fn bounded_dimensions(width: u32, height: u32) -> (u32, u32) {
    if width >= height {
        let target = width.min(MAX_DIMENSION);
        let scaled = (height as f64 * target as f64 / width as f64).round() as u32;
        (target, scaled.max(1))
    } else {
        let target = height.min(MAX_DIMENSION);
        let scaled = (width as f64 * target as f64 / height as f64).round() as u32;
        (scaled.max(1), target)
    }
}

fn decode_data_uri(data_uri: &str) -> Result<Vec<u8>, ImageError> {
    let payload = data_uri
        .split_once(DATA_URI_MARKER)
        .map(|(_, rest)| rest)
        .ok_or(ImageError::InvalidDataUri)?;
    STANDARD
        .decode(payload.trim())
        .map_err(|_| ImageError::InvalidDataUri)
}

fn encode_jpeg(image: &DynamicImage) -> Result<String, ImageError> {
    // JPEG has no alpha; flatten first
    let flattened = DynamicImage::ImageRgb8(image.to_rgb8());
    let mut buffer = Cursor::new(Vec::new());
    flattened
        .write_to(&mut buffer, ImageOutputFormat::Jpeg(JPEG_QUALITY))
        .map_err(ImageError::Encode)?;
    Ok(format!(
        "{}{}",
        OUTPUT_PREFIX,
        STANDARD.encode(buffer.into_inner())
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn png_data_uri(width: u32, height: u32) -> String {
        let image = DynamicImage::ImageRgb8(RgbImage::new(width, height));
        let mut buffer = Cursor::new(Vec::new());
        image
            .write_to(&mut buffer, ImageOutputFormat::Png)
            .unwrap();
        format!("data:image/png;base64,{}", STANDARD.encode(buffer.into_inner()))
    }

    fn dimensions_of(data_uri: &str) -> (u32, u32) {
        let bytes = decode_data_uri(data_uri).unwrap();
        let image = image::load_from_memory(&bytes).unwrap();
        (image.width(), image.height())
    }

    #[test]
    fn wide_image_is_clamped_on_width() {
        let out = normalize(&png_data_uri(2000, 1000)).unwrap();
        assert!(out.starts_with(OUTPUT_PREFIX));
        assert_eq!(dimensions_of(&out), (1000, 500));
    }

    #[test]
    fn tall_image_is_clamped_on_height() {
        let out = normalize(&png_data_uri(1000, 2000)).unwrap();
        assert_eq!(dimensions_of(&out), (500, 1000));
    }

    #[test]
    fn small_image_is_never_upscaled() {
        let out = normalize(&png_data_uri(320, 240)).unwrap();
        assert_eq!(dimensions_of(&out), (320, 240));
        // Stable once inside the bound: a second pass keeps the size.
        let again = normalize(&out).unwrap();
        assert_eq!(dimensions_of(&again), (320, 240));
    }

    #[test]
    fn square_at_the_bound_passes_through() {
        let out = normalize(&png_data_uri(1000, 1000)).unwrap();
        assert_eq!(dimensions_of(&out), (1000, 1000));
    }

    #[test]
    fn missing_base64_marker_is_rejected() {
        assert!(matches!(
            normalize("not a data uri"),
            Err(ImageError::InvalidDataUri)
        ));
    }

    #[test]
    fn garbage_payload_is_a_decode_error_not_a_hang() {
        let uri = format!("data:image/png;base64,{}", STANDARD.encode(b"not an image"));
        assert!(matches!(normalize(&uri), Err(ImageError::Decode(_))));
    }

    #[test]
    fn bounded_dimensions_follow_the_width_major_rule() {
        assert_eq!(bounded_dimensions(2000, 1000), (1000, 500));
        assert_eq!(bounded_dimensions(1000, 2000), (500, 1000));
        assert_eq!(bounded_dimensions(320, 240), (320, 240));
        assert_eq!(bounded_dimensions(3000, 3000), (1000, 1000));
        assert_eq!(bounded_dimensions(5000, 1), (1000, 1));
    }
}
