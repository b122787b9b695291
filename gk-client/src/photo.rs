use anyhow::{anyhow, ensure, Result};
use image::DynamicImage;

use crate::config::PhotoConfig;

/// Validate a picked photo and turn it into a lossy webp ready for hosting.
///
/// Anything the image crate can decode is accepted. Photos larger than
/// `max_dimension` on either side are scaled down, keeping their aspect ratio.
pub fn prepare_photo(bytes: &[u8], config: &PhotoConfig) -> Result<Vec<u8>> {
    ensure!(
        bytes.len() < config.max_bytes,
        "Photo is too large ({} bytes)",
        bytes.len()
    );
    let mut img = image::load_from_memory(bytes)?;
    if img.width() > config.max_dimension || img.height() > config.max_dimension {
        img = img.resize(
            config.max_dimension,
            config.max_dimension,
            image::imageops::FilterType::Lanczos3,
        );
    }
    // The webp encoder only takes 8-bit RGB and RGBA
    if !matches!(img, DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_)) {
        img = DynamicImage::ImageRgba8(img.to_rgba8());
    }
    convert_to_webp(&img, config.quality)
}

/// Save a DynamicImage as a webp vector.
///
/// The image crate only writes lossless webp, the webp crate does lossy.
pub fn convert_to_webp(img: &DynamicImage, quality: f32) -> Result<Vec<u8>> {
    let img_webp = webp::Encoder::from_image(img)
        .map_err(|st| anyhow!("Webp encoder error: {}", st))?
        .encode(quality);
    Ok(img_webp.to_vec())
}
