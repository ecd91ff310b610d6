//! End-to-end optimization through the real codec.
//!
//! These tests build synthetic images in memory (noise compresses poorly, so
//! size relationships are predictable), run them through the public API, and
//! check the contract: output never larger than input, `success` only for a
//! strictly smaller decodable result, passthrough kept byte-identical.

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, RgbImage};
use imgslim::batch::{self, BatchOptions};
use imgslim::codec::{Codec, NativeCodec};
use imgslim::optimize::optimize;
use std::io::Cursor;
use tempfile::TempDir;

/// Pseudo-random RGB noise, deterministic per (x, y).
fn noise_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let mut v = x
            .wrapping_mul(31)
            .wrapping_add(y.wrapping_mul(17))
            .wrapping_add(0x9E37_79B9);
        v ^= v << 13;
        v ^= v >> 17;
        v ^= v << 5;
        image::Rgb([(v & 0xFF) as u8, ((v >> 8) & 0xFF) as u8, ((v >> 16) & 0xFF) as u8])
    })
}

fn noise_png(width: u32, height: u32) -> Vec<u8> {
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(noise_image(width, height))
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}

fn noise_jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = noise_image(width, height);
    let mut buf = Vec::new();
    let encoder = JpegEncoder::new_with_quality(Cursor::new(&mut buf), 90);
    img.write_with_encoder(encoder).unwrap();
    buf
}

fn flat_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, image::Rgb([90, 120, 150]));
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}

fn decoded_dimensions(bytes: &[u8]) -> (u32, u32) {
    let surface = NativeCodec::new().decode(bytes).unwrap();
    (surface.width(), surface.height())
}

#[test]
fn small_png_is_returned_byte_identical() {
    let input = flat_png(32, 32);

    let result = optimize(&input, "image/png", false, None);

    assert_eq!(result.bytes, input);
    assert_eq!(result.mime_type, "image/png");
    assert!(!result.success);
}

#[test]
fn oversized_png_shrinks_and_stays_png() {
    let input = noise_png(400, 300);
    assert!(input.len() > 100_000, "noise PNG should dwarf the ceiling");

    let result = optimize(&input, "image/png", false, Some(100_000));

    assert!(result.success);
    assert!(result.bytes.len() < input.len());
    assert_eq!(result.mime_type, "image/png");
    assert_eq!(&result.bytes[1..4], b"PNG");

    // The winning candidate was resampled down and still decodes.
    let (w, h) = decoded_dimensions(&result.bytes);
    assert!(w < 400 && h < 300);
}

#[test]
fn jpeg_shrinks_and_stays_jpeg() {
    let input = noise_jpeg(400, 300);
    assert!(input.len() > 10_000);

    let result = optimize(&input, "image/jpeg", false, Some(10_000));

    assert!(result.success);
    assert!(result.bytes.len() < input.len());
    assert_eq!(result.mime_type, "image/jpeg");
    assert_eq!(&result.bytes[..2], &[0xFF, 0xD8]);

    let (w, h) = decoded_dimensions(&result.bytes);
    assert!(w < 400 && h < 300);
}

#[test]
fn conversion_produces_real_webp() {
    let input = noise_jpeg(400, 300);

    let result = optimize(&input, "image/jpeg", true, Some(10_000));

    assert!(result.success);
    assert!(result.bytes.len() < input.len());
    assert_eq!(result.mime_type, "image/webp");
    assert_eq!(&result.bytes[..4], b"RIFF");
    assert_eq!(&result.bytes[8..12], b"WEBP");
    assert!(NativeCodec::new().decode(&result.bytes).is_ok());
}

#[test]
fn gif_bytes_pass_through_untouched() {
    // The verbatim path never decodes, so the content can be anything.
    let input = vec![0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 1, 2, 3];

    let result = optimize(&input, "image/gif", true, None);

    assert_eq!(result.bytes, input);
    assert_eq!(result.mime_type, "image/gif");
    assert!(!result.success);
}

#[test]
fn unsupported_declared_type_passes_through() {
    // Valid PNG bytes, but the declared type rules: no sniffing happens.
    let input = noise_png(100, 80);

    let result = optimize(&input, "image/heic", false, Some(100));

    assert_eq!(result.bytes, input);
    assert_eq!(result.mime_type, "image/heic");
    assert!(!result.success);
}

#[test]
fn empty_input_comes_back_empty() {
    let result = optimize(&[], "image/jpeg", false, None);

    assert!(result.bytes.is_empty());
    assert!(!result.success);
}

#[test]
fn output_is_never_larger_than_input() {
    // Inputs chosen so re-encoding has nothing to gain: a tiny flat PNG with
    // an impossible ceiling, and a tiny JPEG with a 1-byte ceiling.
    let png = flat_png(50, 50);
    let result = optimize(&png, "image/png", false, Some(10));
    assert!(result.bytes.len() <= png.len());

    let jpeg = noise_jpeg(40, 30);
    let result = optimize(&jpeg, "image/jpeg", false, Some(1));
    assert!(result.bytes.len() <= jpeg.len());
}

#[test]
fn declared_type_is_case_insensitive() {
    let input = noise_jpeg(400, 300);

    let result = optimize(&input, "IMAGE/JPEG", false, Some(10_000));

    assert!(result.success);
    assert_eq!(result.mime_type, "image/jpeg");
}

#[test]
fn batch_compresses_files_on_disk() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("noise.jpg");
    let input = noise_jpeg(400, 300);
    std::fs::write(&source, &input).unwrap();

    let options = BatchOptions {
        ceiling: Some(10_000),
        ..BatchOptions::default()
    };
    let summary = batch::run_batch(&[tmp.path().to_path_buf()], &options).unwrap();

    assert_eq!(summary.reports.len(), 1);
    assert_eq!(summary.compressed_count(), 1);
    assert!(!summary.has_errors());

    let written = std::fs::read(tmp.path().join("noise.slim.jpg")).unwrap();
    assert!(written.len() < input.len());
    assert_eq!(summary.reports[0].output_size, written.len());
}

#[test]
fn batch_conversion_writes_webp_files() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("noise.jpg");
    std::fs::write(&source, noise_jpeg(400, 300)).unwrap();

    let options = BatchOptions {
        convert_to_webp: true,
        ceiling: Some(10_000),
        ..BatchOptions::default()
    };
    let summary = batch::run_batch(&[source], &options).unwrap();

    assert_eq!(summary.compressed_count(), 1);
    let written = std::fs::read(tmp.path().join("noise.slim.webp")).unwrap();
    assert_eq!(&written[..4], b"RIFF");
}
