//! Quality search and the downscale ladder.
//!
//! These functions combine the pure scale math from [`crate::scaling`] with
//! codec execution. They only ever see encoded byte lengths and the [`Codec`]
//! trait, so the whole strategy is testable with a scripted mock.

use crate::codec::{Codec, PixelSurface};
use crate::format::OutputFormat;
use crate::profile::{CompressionProfile, Quality};
use crate::scaling::{forced_scale, initial_scale, ladder_scale, scaled_dimensions};
use tracing::debug;

/// Number of encode probes per quality search.
///
/// A fixed cost bound rather than a convergence loop: six bisections of the
/// quality interval give roughly 1.3% granularity, which is below what the
/// encoders themselves can resolve.
pub const BINARY_SEARCH_ITERATIONS: u32 = 6;

/// Binary-search the quality axis at a fixed target resolution.
///
/// Probes exactly [`BINARY_SEARCH_ITERATIONS`] qualities between the
/// profile's floor and ceiling. A probe that lands at or under `ceiling`
/// raises the lower bound and becomes the remembered best; an oversized probe
/// lowers the upper bound. Returns the last remembered best, or `None` when
/// every probe came out too large.
///
/// A failed encode skips that probe; the bounds stay put and the remaining
/// iterations run as usual.
pub fn quality_search(
    codec: &impl Codec,
    surface: &PixelSurface,
    width: u32,
    height: u32,
    format: OutputFormat,
    ceiling: usize,
    profile: &CompressionProfile,
) -> Option<Vec<u8>> {
    let mut low = profile.quality_floor.value();
    let mut high = profile.quality_ceiling.value();
    let mut best = None;

    for iteration in 0..BINARY_SEARCH_ITERATIONS {
        let quality = Quality::new((low + high) / 2.0);
        let bytes = match codec.encode(surface, width, height, format, quality) {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!(iteration, error = %e, "encode probe failed, skipped");
                continue;
            }
        };

        debug!(
            iteration,
            quality = quality.value(),
            size = bytes.len(),
            fits = bytes.len() <= ceiling,
            "quality probe"
        );

        if bytes.len() > ceiling {
            high = quality.value();
        } else {
            low = quality.value();
            best = Some(bytes);
        }
    }

    best
}

/// A candidate survives only when strictly smaller than the original and
/// re-decodable. The size check runs first so rejected candidates cost no
/// decode.
fn accept(codec: &impl Codec, candidate: Vec<u8>, original_size: usize) -> Option<Vec<u8>> {
    if candidate.len() >= original_size {
        debug!(
            size = candidate.len(),
            original_size, "candidate not smaller than original, rejected"
        );
        return None;
    }
    if codec.decode(&candidate).is_err() {
        debug!("candidate failed decode validation, rejected");
        return None;
    }
    Some(candidate)
}

/// Walk resize scales downward, running a quality search at each step, and
/// return the first candidate that survives [`accept`].
///
/// The starting scale is derived from the size ratio (see
/// [`crate::scaling::initial_scale`]); each following attempt multiplies it by
/// the profile's step factor. When every ladder step fails, one last encode
/// runs at the profile's forced scale and forced quality with no search; its
/// candidate goes through the same acceptance check. `None` means nothing
/// beat the original.
pub fn run_ladder(
    codec: &impl Codec,
    surface: &PixelSurface,
    original_size: usize,
    format: OutputFormat,
    ceiling: usize,
    profile: &CompressionProfile,
) -> Option<Vec<u8>> {
    let initial = initial_scale(original_size, ceiling, profile);

    for attempt in 0..=profile.max_downscale_attempts {
        let scale = ladder_scale(initial, profile.step_factor, attempt);
        if scale <= 0.0 {
            break;
        }
        let (width, height) = scaled_dimensions(surface.width(), surface.height(), scale);
        debug!(attempt, scale, width, height, "ladder attempt");

        if let Some(best) = quality_search(codec, surface, width, height, format, ceiling, profile)
        {
            if let Some(accepted) = accept(codec, best, original_size) {
                debug!(attempt, size = accepted.len(), "ladder candidate accepted");
                return Some(accepted);
            }
        }
    }

    // No ladder step fit. One forced attempt at the floor of the profile,
    // trading quality for a last chance to shrink the file.
    let scale = forced_scale(initial, profile);
    let (width, height) = scaled_dimensions(surface.width(), surface.height(), scale);
    debug!(scale, width, height, "forced final attempt");

    if let Ok(bytes) = codec.encode(surface, width, height, format, profile.forced_quality) {
        if let Some(accepted) = accept(codec, bytes, original_size) {
            debug!(size = accepted.len(), "forced candidate accepted");
            return Some(accepted);
        }
    }

    None
}
