//! Format classification by declared MIME type.
//!
//! The optimizer trusts the declared type (the original caller supplied it
//! from the file picker; the CLI derives it from the file extension) and
//! never sniffs bytes. Classification decides which pipeline handles an
//! input and which tuning profile applies:
//!
//! - PNG is text-sensitive: screenshots and diagrams blur into illegibility
//!   under aggressive resampling, so it gets the conservative profile and a
//!   fast path that leaves already-small files untouched.
//! - JPEG and WebP are photographic: the standard aggressive profile.
//! - GIF passes through verbatim — re-encoding a frame would discard
//!   animation.
//! - Anything else is unsupported and passes through verbatim too.

use crate::profile::{CompressionProfile, LOSSY, NEAR_LOSSLESS};
use std::path::Path;

/// Encoded format the codec gateway can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
    WebP,
}

impl OutputFormat {
    /// Canonical MIME type for this format.
    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::WebP => "image/webp",
        }
    }

    /// File extension (without dot) for this format.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
            OutputFormat::WebP => "webp",
        }
    }
}

/// Input format family, selecting the tuning profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    /// Text-sensitive formats (PNG): conservative tuning.
    NearLossless,
    /// Photographic formats (JPEG, WebP): aggressive tuning.
    Lossy,
}

impl Family {
    pub fn profile(self) -> CompressionProfile {
        match self {
            Family::NearLossless => NEAR_LOSSLESS,
            Family::Lossy => LOSSY,
        }
    }
}

/// Pipeline decision for one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// PNG at or under the ceiling, no conversion requested: nothing to do.
    AlreadyFits,
    /// Run the scale ladder with `family`'s profile, encoding to `output`.
    Compress { family: Family, output: OutputFormat },
    /// GIF: kept byte-identical, animation frames survive.
    Verbatim,
    /// Declared type is not one the optimizer knows.
    Unsupported,
}

/// Classify an input by declared MIME type (case-insensitive).
///
/// `size` and `ceiling` only matter for the PNG fast path; every other
/// branch depends on the type and the conversion flag alone. The conversion
/// flag never promotes an unsupported or verbatim input into the compress
/// pipeline.
pub fn classify(
    declared_mime: &str,
    convert_to_webp: bool,
    size: usize,
    ceiling: usize,
) -> Classification {
    let mime = declared_mime.to_ascii_lowercase();
    match mime.as_str() {
        "image/png" => {
            if size <= ceiling && !convert_to_webp {
                Classification::AlreadyFits
            } else {
                Classification::Compress {
                    family: Family::NearLossless,
                    output: if convert_to_webp {
                        OutputFormat::WebP
                    } else {
                        OutputFormat::Png
                    },
                }
            }
        }
        // `image/jpg` is nonstandard but common enough to honor
        "image/jpeg" | "image/jpg" => Classification::Compress {
            family: Family::Lossy,
            output: if convert_to_webp {
                OutputFormat::WebP
            } else {
                OutputFormat::Jpeg
            },
        },
        "image/webp" => Classification::Compress {
            family: Family::Lossy,
            output: OutputFormat::WebP,
        },
        "image/gif" => Classification::Verbatim,
        _ => Classification::Unsupported,
    }
}

/// Map a file extension to the declared MIME type the optimizer expects.
///
/// Returns `None` for extensions the optimizer does not recognize; the CLI
/// uses this both to filter directory walks and to declare types.
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}
