//! Production codec — pure Rust decoders plus libwebp for lossy WebP.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (PNG, JPEG, GIF, WebP) | `image` crate, format sniffed from magic bytes |
//! | Resample | `image::DynamicImage::resize_exact` with `Lanczos3` filter |
//! | Encode → PNG | `image` crate (lossless; quality parameter ignored) |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` with mapped quality |
//! | Encode → WebP | `webp` crate (the `image` crate only encodes lossless WebP) |

use super::gateway::{Codec, CodecError, PixelSurface};
use crate::format::OutputFormat;
use crate::profile::Quality;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;

/// Codec built on the `image` and `webp` crates.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct NativeCodec;

impl NativeCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NativeCodec {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a [0,1] quality to the JPEG encoder's 1-100 scale.
fn jpeg_quality(quality: Quality) -> u8 {
    ((quality.value() * 100.0).round() as u8).clamp(1, 100)
}

/// Map a [0,1] quality to libwebp's 0-100 scale.
fn webp_quality(quality: Quality) -> f32 {
    (quality.value() * 100.0) as f32
}

fn encode_png(img: &DynamicImage) -> Result<Vec<u8>, CodecError> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(|e| CodecError::Encode(format!("PNG encode failed: {}", e)))?;
    Ok(buf)
}

fn encode_jpeg(img: &DynamicImage, quality: Quality) -> Result<Vec<u8>, CodecError> {
    // JPEG has no alpha channel; flatten unconditionally
    let rgb = img.to_rgb8();
    let mut buf = Vec::new();
    let encoder =
        image::codecs::jpeg::JpegEncoder::new_with_quality(Cursor::new(&mut buf), jpeg_quality(quality));
    rgb.write_with_encoder(encoder)
        .map_err(|e| CodecError::Encode(format!("JPEG encode failed: {}", e)))?;
    Ok(buf)
}

fn encode_webp(img: &DynamicImage, quality: Quality) -> Result<Vec<u8>, CodecError> {
    let rgba = img.to_rgba8();
    let encoder = webp::Encoder::from_rgba(rgba.as_raw(), rgba.width(), rgba.height());
    let encoded = encoder
        .encode_simple(false, webp_quality(quality))
        .map_err(|e| CodecError::Encode(format!("WebP encode failed: {:?}", e)))?;
    Ok(encoded.to_vec())
}

impl Codec for NativeCodec {
    fn decode(&self, bytes: &[u8]) -> Result<PixelSurface, CodecError> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| CodecError::Decode(format!("Failed to decode image: {}", e)))?;
        Ok(PixelSurface::new(img))
    }

    fn encode(
        &self,
        surface: &PixelSurface,
        width: u32,
        height: u32,
        format: OutputFormat,
        quality: Quality,
    ) -> Result<Vec<u8>, CodecError> {
        let scaled;
        let img = if width == surface.width() && height == surface.height() {
            surface.image()
        } else {
            scaled = surface
                .image()
                .resize_exact(width, height, FilterType::Lanczos3);
            &scaled
        };

        match format {
            OutputFormat::Png => encode_png(img),
            OutputFormat::Jpeg => encode_jpeg(img, quality),
            OutputFormat::WebP => encode_webp(img, quality),
        }
    }
}
