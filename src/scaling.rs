//! Pure calculation functions for the scale ladder.
//!
//! All functions here are pure and testable without any codec or pixel data.
//! The ladder geometry: the first scale estimates how much area reduction
//! the byte budget needs (`sqrt` of the size ratio, since bytes track area),
//! then each attempt decays it geometrically until a candidate fits.

use crate::profile::CompressionProfile;

/// Calculate the first ladder scale from the size ratio.
///
/// Byte size tracks pixel area, so the square root of the target ratio
/// approximates the linear scale that would hit the ceiling. The result is
/// clamped to the profile's initial-scale bounds.
///
/// # Arguments
/// * `original_size` - Input byte length
/// * `ceiling` - Target byte-size ceiling
/// * `profile` - Tuning profile supplying the clamp bounds
///
/// # Returns
/// * Scale factor in `[min_initial_scale, max_initial_scale]`
///
/// # Examples
/// ```
/// # use imgslim::scaling::initial_scale;
/// # use imgslim::profile::LOSSY;
/// // 4 MB source, 1 MB ceiling → sqrt(1/4) = 0.5
/// assert_eq!(initial_scale(4_000_000, 1_000_000, &LOSSY), 0.5);
///
/// // Already under the ceiling → clamped to full scale
/// assert_eq!(initial_scale(500_000, 1_000_000, &LOSSY), 1.0);
///
/// // Extreme ratio → clamped to the profile floor
/// assert_eq!(initial_scale(1_000_000_000, 1_000_000, &LOSSY), 0.2);
/// ```
pub fn initial_scale(original_size: usize, ceiling: usize, profile: &CompressionProfile) -> f64 {
    let ratio = ceiling as f64 / original_size as f64;
    ratio
        .sqrt()
        .clamp(profile.min_initial_scale, profile.max_initial_scale)
}

/// Calculate the scale for one ladder attempt.
///
/// # Arguments
/// * `initial` - The clamped initial scale
/// * `step_factor` - Geometric decay per attempt
/// * `attempt` - Zero-based attempt index
///
/// # Examples
/// ```
/// # use imgslim::scaling::ladder_scale;
/// assert_eq!(ladder_scale(1.0, 0.85, 0), 1.0);
/// assert_eq!(ladder_scale(1.0, 0.85, 1), 0.85);
/// ```
pub fn ladder_scale(initial: f64, step_factor: f64, attempt: u32) -> f64 {
    initial * step_factor.powi(attempt as i32)
}

/// Calculate the scale for the final forced attempt.
///
/// One step below the last ladder rung, clamped to the profile's forced
/// floor so the image never collapses entirely.
///
/// # Examples
/// ```
/// # use imgslim::scaling::forced_scale;
/// # use imgslim::profile::LOSSY;
/// // Small initial scale bottoms out at the profile floor
/// assert_eq!(forced_scale(0.1, &LOSSY), 0.05);
/// ```
pub fn forced_scale(initial: f64, profile: &CompressionProfile) -> f64 {
    let decayed = initial
        * profile
            .step_factor
            .powi(profile.max_downscale_attempts as i32 + 1);
    decayed.max(profile.min_forced_scale)
}

/// Calculate attempt dimensions from the original dimensions and a scale.
///
/// Rounds to the nearest pixel and never returns a zero axis.
///
/// # Examples
/// ```
/// # use imgslim::scaling::scaled_dimensions;
/// assert_eq!(scaled_dimensions(1000, 800, 0.5), (500, 400));
/// assert_eq!(scaled_dimensions(1000, 800, 0.0001), (1, 1));
/// ```
pub fn scaled_dimensions(width: u32, height: u32, scale: f64) -> (u32, u32) {
    let w = ((width as f64 * scale).round() as u32).max(1);
    let h = ((height as f64 * scale).round() as u32).max(1);
    (w, h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{LOSSY, NEAR_LOSSLESS};

    // =========================================================================
    // initial_scale tests
    // =========================================================================

    #[test]
    fn initial_scale_exact_quarter_ratio() {
        assert_eq!(initial_scale(4_000_000, 1_000_000, &LOSSY), 0.5);
    }

    #[test]
    fn initial_scale_clamps_to_profile_floor() {
        // sqrt(1/1000) ≈ 0.032, below the lossy floor of 0.2
        assert_eq!(initial_scale(1_000_000_000, 1_000_000, &LOSSY), 0.2);
    }

    #[test]
    fn initial_scale_near_lossless_floor_is_higher() {
        assert_eq!(initial_scale(1_000_000_000, 1_000_000, &NEAR_LOSSLESS), 0.5);
    }

    #[test]
    fn initial_scale_caps_at_full_size() {
        // Input already under the ceiling: never upscale
        assert_eq!(initial_scale(250_000, 1_000_000, &LOSSY), 1.0);
    }

    #[test]
    fn initial_scale_zero_size_input() {
        // ratio is +inf, clamped to full scale; decode fails upstream anyway
        assert_eq!(initial_scale(0, 1_000_000, &LOSSY), 1.0);
    }

    // =========================================================================
    // ladder_scale tests
    // =========================================================================

    #[test]
    fn ladder_scale_first_attempt_is_initial() {
        assert_eq!(ladder_scale(0.7, 0.85, 0), 0.7);
    }

    #[test]
    fn ladder_scale_decays_monotonically() {
        let scales: Vec<f64> = (0..7).map(|i| ladder_scale(1.0, 0.85, i)).collect();
        for pair in scales.windows(2) {
            assert!(pair[1] < pair[0], "scale must strictly decrease per attempt");
        }
    }

    #[test]
    fn ladder_scale_stays_positive() {
        assert!(ladder_scale(0.2, 0.85, 6) > 0.0);
    }

    // =========================================================================
    // forced_scale tests
    // =========================================================================

    #[test]
    fn forced_scale_below_last_ladder_rung() {
        let last_rung = ladder_scale(1.0, LOSSY.step_factor, LOSSY.max_downscale_attempts);
        assert!(forced_scale(1.0, &LOSSY) < last_rung);
    }

    #[test]
    fn forced_scale_clamps_to_floor() {
        assert_eq!(forced_scale(0.05, &LOSSY), 0.05);
        assert_eq!(forced_scale(0.5, &NEAR_LOSSLESS), 0.25);
    }

    #[test]
    fn forced_scale_above_floor_when_initial_large() {
        // 1.0 × 0.85^7 ≈ 0.32, above the 0.05 floor
        let s = forced_scale(1.0, &LOSSY);
        assert!(s > 0.3 && s < 0.33);
    }

    // =========================================================================
    // scaled_dimensions tests
    // =========================================================================

    #[test]
    fn dimensions_half_scale() {
        assert_eq!(scaled_dimensions(1000, 800, 0.5), (500, 400));
    }

    #[test]
    fn dimensions_round_to_nearest() {
        // 999 × 0.5 = 499.5 → 500
        assert_eq!(scaled_dimensions(999, 333, 0.5), (500, 167));
    }

    #[test]
    fn dimensions_never_zero() {
        assert_eq!(scaled_dimensions(10, 10, 0.001), (1, 1));
        assert_eq!(scaled_dimensions(1, 1, 0.05), (1, 1));
    }

    #[test]
    fn dimensions_full_scale_identity() {
        assert_eq!(scaled_dimensions(1920, 1080, 1.0), (1920, 1080));
    }

    #[test]
    fn dimensions_preserve_extreme_aspect() {
        let (w, h) = scaled_dimensions(10_000, 10, 0.1);
        assert_eq!((w, h), (1000, 1));
    }
}
