//! The optimization pipeline and public entry points.
//!
//! [`optimize`] is the whole API for library callers: bytes in, bytes out,
//! never an error. Every failure category (unsupported type, undecodable
//! input, nothing beat the original) collapses to "original bytes back,
//! `success = false`", so callers branch on one flag instead of an error
//! taxonomy.

use crate::codec::{Codec, NativeCodec};
use crate::format::{Classification, classify};
use crate::profile::DEFAULT_SIZE_CEILING;
use crate::search::run_ladder;
use tracing::{debug, warn};

/// Outcome of one optimization call.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationResult {
    /// The bytes to keep: a re-encoded candidate, or the original input.
    pub bytes: Vec<u8>,
    /// Lowercased declared MIME type, or `image/webp` when conversion
    /// produced the returned bytes.
    pub mime_type: String,
    /// True only when the returned bytes are strictly smaller than the input
    /// and re-decoded successfully.
    pub success: bool,
}

/// The original bytes, unchanged. Every non-compressing exit ends here.
fn fallback(bytes: &[u8], mime_type: String) -> OptimizationResult {
    OptimizationResult {
        bytes: bytes.to_vec(),
        mime_type,
        success: false,
    }
}

/// Optimize one image with the built-in codec.
///
/// `declared_mime` is trusted as-is (case-insensitive); no content sniffing
/// happens at this layer. `convert_to_webp` forces WebP output for every
/// compressible input. `ceiling` is the target byte size, defaulting to
/// [`DEFAULT_SIZE_CEILING`].
///
/// The returned bytes are never larger than the input.
pub fn optimize(
    bytes: &[u8],
    declared_mime: &str,
    convert_to_webp: bool,
    ceiling: Option<usize>,
) -> OptimizationResult {
    optimize_with(&NativeCodec::new(), bytes, declared_mime, convert_to_webp, ceiling)
}

/// [`optimize`] with an explicit codec, for tests and embedders.
pub fn optimize_with(
    codec: &impl Codec,
    bytes: &[u8],
    declared_mime: &str,
    convert_to_webp: bool,
    ceiling: Option<usize>,
) -> OptimizationResult {
    let ceiling = ceiling.unwrap_or(DEFAULT_SIZE_CEILING);
    let declared = declared_mime.to_ascii_lowercase();

    let (family, output) = match classify(declared_mime, convert_to_webp, bytes.len(), ceiling) {
        Classification::AlreadyFits => {
            debug!(size = bytes.len(), ceiling, "already under ceiling, untouched");
            return fallback(bytes, declared);
        }
        Classification::Verbatim | Classification::Unsupported => {
            debug!(mime = %declared, "kept verbatim");
            return fallback(bytes, declared);
        }
        Classification::Compress { family, output } => (family, output),
    };

    let surface = match codec.decode(bytes) {
        Ok(surface) => surface,
        Err(e) => {
            warn!(mime = %declared, error = %e, "decode failed, returning original");
            return fallback(bytes, declared);
        }
    };

    debug!(
        mime = %declared,
        width = surface.width(),
        height = surface.height(),
        size = bytes.len(),
        ceiling,
        ?family,
        "optimizing"
    );

    let profile = family.profile();
    match run_ladder(codec, &surface, bytes.len(), output, ceiling, &profile) {
        Some(candidate) => OptimizationResult {
            bytes: candidate,
            mime_type: if convert_to_webp {
                output.mime_type().to_string()
            } else {
                declared
            },
            success: true,
        },
        None => {
            debug!("no candidate beat the original");
            fallback(bytes, declared)
        }
    }
}
