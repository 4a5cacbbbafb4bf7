//! Candidate selection, skip rule and the actual WebP re-encode.

use std::fs;
use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::{DynamicImage, ImageDecoder, ImageReader};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("failed to read image file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode image: {0}")]
    Image(#[from] image::ImageError),
}

/// Raster uploads eligible for conversion, by extension, case-insensitive.
pub fn is_candidate(path: &Path) -> bool {
    matches!(
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref(),
        Some("png" | "jpg" | "jpeg")
    )
}

/// The `.webp` file written next to a source image.
pub fn webp_sibling(path: &Path) -> PathBuf {
    path.with_extension("webp")
}

/// Idempotence rule: skip when a non-empty sibling already exists with a
/// modification time at or after the source's. This keeps repeated runs
/// cheap and safe without any locking.
pub fn should_skip(source: &Path, target: &Path) -> bool {
    let Ok(target_meta) = fs::metadata(target) else {
        return false;
    };
    if target_meta.len() == 0 {
        return false;
    }
    let Ok(source_meta) = fs::metadata(source) else {
        return false;
    };
    match (target_meta.modified(), source_meta.modified()) {
        (Ok(target_mtime), Ok(source_mtime)) => target_mtime >= source_mtime,
        _ => false,
    }
}

/// Decode the source, orient it upright, downscale to `max_width` if it is
/// wider (never upscale), and write a lossy WebP at `quality` next to it.
pub fn convert_to_webp(
    source: &Path,
    target: &Path,
    max_width: u32,
    quality: f32,
) -> Result<(), ConvertError> {
    let mut decoder = ImageReader::open(source)?
        .with_guessed_format()?
        .into_decoder()?;
    let orientation = decoder
        .orientation()
        .unwrap_or(image::metadata::Orientation::NoTransforms);
    let mut img = DynamicImage::from_decoder(decoder)?;
    img.apply_orientation(orientation);

    if img.width() > max_width {
        let height = ((u64::from(img.height()) * u64::from(max_width)) / u64::from(img.width()))
            .max(1) as u32;
        img = img.resize_exact(max_width, height, FilterType::Lanczos3);
    }

    let rgba = img.to_rgba8();
    let encoded = webp::Encoder::from_rgba(&rgba, rgba.width(), rgba.height()).encode(quality);
    fs::write(target, &*encoded)?;
    Ok(())
}
