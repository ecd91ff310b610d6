//! Codec gateway trait and shared types.
//!
//! The [`Codec`] trait defines the two operations the optimizer needs from
//! any codec: decode bytes into a [`PixelSurface`], and encode a surface
//! (resampled to target dimensions) into bytes at a given quality.
//!
//! The production implementation is
//! [`NativeCodec`](super::native::NativeCodec) — pure Rust plus libwebp,
//! statically linked into the binary. The search and pipeline code only ever
//! sees this trait, so tests drive the whole algorithm with scripted sizes
//! and no real pixel work.

use crate::format::OutputFormat;
use crate::profile::Quality;
use image::DynamicImage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("decode failed: {0}")]
    Decode(String),
    #[error("encode failed: {0}")]
    Encode(String),
}

/// A decoded image: owned pixels plus dimensions.
///
/// Exclusively owned by one optimization call and read-only once decoded.
/// Dropping it releases the pixel buffer, so no exit path can leak one.
#[derive(Debug)]
pub struct PixelSurface {
    image: DynamicImage,
}

impl PixelSurface {
    pub fn new(image: DynamicImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Borrow the underlying pixels for encoding.
    pub fn image(&self) -> &DynamicImage {
        &self.image
    }
}

/// Trait for image codecs.
///
/// Both operations work on in-memory buffers; the gateway does no file I/O.
/// `Sync` so independent optimization calls can share one codec across
/// rayon workers.
pub trait Codec: Sync {
    /// Decode raw bytes into a pixel surface, sniffing the container format.
    fn decode(&self, bytes: &[u8]) -> Result<PixelSurface, CodecError>;

    /// Resample `surface` to `width`×`height` and encode it as `format`.
    ///
    /// `quality` is ignored by formats without a lossy parameter (PNG).
    fn encode(
        &self,
        surface: &PixelSurface,
        width: u32,
        height: u32,
        format: OutputFormat,
        quality: Quality,
    ) -> Result<Vec<u8>, CodecError>;
}
