//! Pixel codec layer — the only place raw image bytes are decoded or encoded.
//!
//! The module is split into:
//! - **Gateway**: [`Codec`] trait + [`PixelSurface`] pixel buffer
//! - **Native**: [`NativeCodec`], the production implementation
//!
//! Everything above this layer (quality search, the optimize pipeline) talks
//! to the [`Codec`] trait, so tests script byte sizes without touching real
//! encoders.

pub mod gateway;
pub mod native;

pub use gateway::{Codec, CodecError, PixelSurface};
pub use native::NativeCodec;

#[cfg(test)]
pub use gateway::tests::MockCodec;
