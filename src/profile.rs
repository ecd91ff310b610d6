//! Compression tuning profiles.
//!
//! These types describe *how aggressively* to compress, not *how* to encode.
//! They are the interface between the [`optimize`](crate::optimize) pipeline
//! (which picks a profile per format family) and the [`search`](crate::search)
//! module (which consumes the numbers). Modeling the tuning as plain data
//! keeps it testable in isolation and rules out mid-call mutation of knobs.
//!
//! ## Types
//!
//! - [`Quality`] — Lossy encoding quality (0.0–1.0, default 0.92). Clamped on construction.
//! - [`CompressionProfile`] — Full tuning set for one format family: scale bounds,
//!   ladder step, attempt count, quality bounds, forced-attempt parameters.
//!
//! Two built-in profiles exist: [`LOSSY`] for photographic formats and
//! [`NEAR_LOSSLESS`] for text-sensitive ones (PNG), where aggressive
//! resampling destroys legibility.

/// Default byte-size ceiling when the caller does not supply one (1 MB).
pub const DEFAULT_SIZE_CEILING: usize = 1_000_000;

/// Quality setting for lossy image encoding (0.0-1.0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quality(pub f64);

impl Quality {
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        // 0.92 is where most encoders stop gaining fidelity per byte
        Self(0.92)
    }
}

/// Tuning parameters for one format family's compression pipeline.
///
/// The scale ladder and quality search read everything they need from here;
/// the pipeline never adjusts a profile mid-call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressionProfile {
    /// Lower clamp on the first ladder scale.
    pub min_initial_scale: f64,
    /// Upper clamp on the first ladder scale (1.0 = original size).
    pub max_initial_scale: f64,
    /// Geometric decay applied to the scale per ladder attempt.
    pub step_factor: f64,
    /// Ladder steps before the final forced attempt.
    pub max_downscale_attempts: u32,
    /// Lower clamp on the final forced attempt's scale.
    pub min_forced_scale: f64,
    /// Quality used by the final forced attempt (single encode, no search).
    pub forced_quality: Quality,
    /// Lower bound of the quality binary search.
    pub quality_floor: Quality,
    /// Upper bound of the quality binary search.
    pub quality_ceiling: Quality,
}

/// Standard aggressive profile for photographic formats (JPEG, WebP).
pub const LOSSY: CompressionProfile = CompressionProfile {
    min_initial_scale: 0.2,
    max_initial_scale: 1.0,
    step_factor: 0.85,
    max_downscale_attempts: 6,
    min_forced_scale: 0.05,
    forced_quality: Quality(0.05),
    quality_floor: Quality(0.1),
    quality_ceiling: Quality(0.92),
};

/// Conservative profile for text-sensitive formats (PNG).
///
/// Higher scale and quality floors, fewer ladder steps, gentler forced
/// quality: screenshots and diagrams lose legibility long before photos do.
pub const NEAR_LOSSLESS: CompressionProfile = CompressionProfile {
    min_initial_scale: 0.5,
    max_initial_scale: 1.0,
    step_factor: 0.85,
    max_downscale_attempts: 4,
    min_forced_scale: 0.25,
    forced_quality: Quality(0.35),
    quality_floor: Quality(0.6),
    quality_ceiling: Quality(0.92),
};
