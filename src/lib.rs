//! # imgslim
//!
//! Adaptive image re-encoding under a byte-size ceiling. Feed it image bytes
//! and a declared MIME type; it returns either a genuinely smaller re-encoded
//! image or the original bytes, never anything larger and never an error.
//!
//! # Architecture: Classify, Search, Arbitrate
//!
//! Every call runs the same three-phase pipeline:
//!
//! ```text
//! 1. Classify   declared MIME + flags  →  fast path | lossy | near-lossless | verbatim
//! 2. Search     decode once, then descending resize scales,
//!               each probed by a six-step quality binary search
//! 3. Arbitrate  surviving candidate vs original  →  bytes + success flag
//! ```
//!
//! The phases are kept in separate modules for two reasons:
//!
//! - **Testability**: classification and scale math are pure functions, and
//!   the search only sees the [`codec::Codec`] trait, so the whole strategy is
//!   unit-tested with scripted byte sizes instead of real encoders.
//! - **Predictable cost**: the search budget is fixed up front (attempts ×
//!   six probes), never a convergence loop that depends on image content.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`format`] | MIME classification into pipelines, format families, extension mapping |
//! | [`profile`] | `Quality` newtype and the per-family compression profiles |
//! | [`scaling`] | Pure scale math: initial scale, ladder steps, forced floor, dimensions |
//! | [`codec`] | `Codec` trait + `PixelSurface`, with the `image`/`webp` implementation |
//! | [`search`] | Quality binary search, downscale ladder, candidate validation |
//! | [`optimize`] | Classifier dispatch, result arbitration, the public API |
//! | [`batch`] | CLI batch layer — file collection, parallel jobs, reports |
//! | [`output`] | CLI output formatting for reports and totals |
//!
//! # Design Decisions
//!
//! ## One Flag Instead of an Error Taxonomy
//!
//! [`optimize::optimize`] is infallible. Unsupported formats, undecodable
//! bytes, and searches that never beat the original all collapse to "original
//! bytes back, `success = false`". Callers branch on one boolean; the worst
//! case is always "nothing happened", which is exactly what a caller would do
//! with an error anyway.
//!
//! ## Fixed Six-Probe Quality Search
//!
//! At each scale the quality axis is bisected exactly six times rather than
//! iterating to convergence. Six probes narrow a [0.1, 0.92] window to about
//! 1.3% quality granularity, which is finer than the encoders themselves
//! resolve, and they bound the cost of a pathological image to a known number
//! of encode calls.
//!
//! ## Strictly Smaller or Nothing
//!
//! A candidate is accepted only when it is strictly smaller than the original
//! **and** decodes cleanly. There is no "close enough": a 2 MB input that
//! re-encodes to 2 MB stays the original, and a candidate that fails decode
//! validation is treated as if the attempt never happened. The returned bytes
//! are never larger than the input.
//!
//! ## Per-Family Profiles, Not Scattered Constants
//!
//! PNG inputs (diagrams, screenshots, text) degrade badly under aggressive
//! resampling, so they run a conservative profile: higher scale floor, fewer
//! ladder steps, higher quality floor. JPEG and WebP run the aggressive
//! profile. All tuning lives in two [`profile::CompressionProfile`] constants
//! instead of magic numbers inside the search.
//!
//! ## Pure-Rust Codecs (No ImageMagick, No FFmpeg)
//!
//! Decoding and PNG/JPEG encoding use the `image` crate; lossy WebP encoding
//! uses the `webp` crate (the `image` crate only writes lossless WebP).
//! Everything is statically linked: no `apt install`, no version conflicts,
//! one self-contained binary.

pub mod batch;
pub mod codec;
pub mod format;
pub mod optimize;
pub mod output;
pub mod profile;
pub mod scaling;
pub mod search;
