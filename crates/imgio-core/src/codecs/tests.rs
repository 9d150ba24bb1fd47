//! Tests for codec adapters

use super::*;
use crate::error::{ErrorKind, Operation};
use tempfile::tempdir;

#[test]
fn test_gray8_passes_through() {
    let buf: Vec<u8> = (0..=255).collect();
    let gray = to_gray8(&buf, 16, 16, 1).unwrap();
    assert_eq!(gray, buf);
}

#[test]
fn test_gray16_keeps_high_byte() {
    let buf = [0u16, 257, 0x8080, 65535];
    let gray = to_gray8(&buf, 2, 2, 1).unwrap();
    assert_eq!(gray, vec![0, 1, 128, 255]);
}

#[test]
fn test_rgb_luma_weights() {
    let buf = [
        255u8, 0, 0, // red
        0, 255, 0, // green
        0, 0, 255, // blue
        200, 200, 200, // gray
    ];
    let gray = to_gray8(&buf, 4, 1, 3).unwrap();
    assert_eq!(gray, vec![77, 150, 28, 200]);
}

#[test]
fn test_alpha_is_dropped() {
    let gray = to_gray8(&[10u8, 0, 250, 255], 2, 1, 2).unwrap();
    assert_eq!(gray, vec![10, 250]);

    let rgba = to_gray8(&[100u8, 100, 100, 0], 1, 1, 4).unwrap();
    assert_eq!(rgba, vec![100]);
}

#[test]
fn test_float_samples_clamped() {
    let gray = to_gray8(&[-0.5f32, 0.0, 0.5, 2.0], 4, 1, 1).unwrap();
    assert_eq!(gray, vec![0, 0, 128, 255]);
}

#[test]
fn test_size_mismatch_is_error() {
    let err = to_gray8(&[0u8; 5], 2, 2, 1).unwrap_err();
    assert!(err.contains("expected 4, got 5"));
    assert!(to_gray8(&[0u8; 20], 2, 2, 5).is_err());
}

#[test]
fn test_decoded_image_region_copy() {
    let img = DecodedImage::Float(FloatImage {
        width: 3,
        height: 2,
        data: vec![0.5, 1.5, 2.5, 3.5, 4.5, 5.5],
    });
    assert_eq!(img.dimensions(), (3, 2));

    let mut dst = [0.0f32; 2];
    img.copy_region_into(Region::new(1, 0, 1, 2), &mut dst, Layout::Right);
    assert_eq!(dst, [1.5, 4.5]);
}

#[test]
fn test_tiff_gray8_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ramp.tif");
    let image = Gray8Image {
        width: 5,
        height: 3,
        data: (0..15).map(|v| v * 17).collect(),
    };

    tiff::write_gray8(&path, &image).unwrap();

    let limits = tiff::decoder_limits(1 << 20);
    assert_eq!(tiff::read_dimensions(&path, &limits).unwrap(), (5, 3));
    let back = tiff::read_gray8(&path, &limits, Operation::Read).unwrap();
    assert_eq!(back, image);
}

#[test]
fn test_tiff_rgb8_reads_as_luma() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("color.tif");
    let rgb = [255u8, 0, 0, 0, 0, 255];

    tiff::write_rgb8(&path, 2, 1, &rgb).unwrap();

    let limits = tiff::decoder_limits(1 << 20);
    let back = tiff::read_gray8(&path, &limits, Operation::Read).unwrap();
    assert_eq!(back.data, vec![77, 28]);
}

#[test]
fn test_tiff_missing_file_is_io_error() {
    let limits = tiff::decoder_limits(1 << 20);
    let err = tiff::read_dimensions(std::path::Path::new("/nonexistent/a.tif"), &limits)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn test_tiff_garbage_is_codec_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("junk.tif");
    std::fs::write(&path, b"definitely not a tiff").unwrap();

    let limits = tiff::decoder_limits(1 << 20);
    let err = tiff::read_gray8(&path, &limits, Operation::Read).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Codec);
}

#[cfg(feature = "png")]
#[test]
fn test_png_gray8_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ramp.png");
    let image = Gray8Image {
        width: 4,
        height: 4,
        data: (0..16).map(|v| v * 16 + 15).collect(),
    };

    png::write_gray8(&path, &image).unwrap();

    assert_eq!(png::read_dimensions(&path).unwrap(), (4, 4));
    assert_eq!(png::read_gray8(&path, Operation::Read).unwrap(), image);
}

#[cfg(feature = "jpeg")]
#[test]
fn test_jpeg_flat_image_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("flat.jpg");
    let image = Gray8Image {
        width: 16,
        height: 8,
        data: vec![128; 128],
    };

    jpeg::write_gray8(&path, &image, 95).unwrap();

    assert_eq!(jpeg::read_dimensions(&path).unwrap(), (16, 8));
    let back = jpeg::read_gray8(&path, Operation::Read).unwrap();
    assert_eq!(back.data.len(), 128);
    // lossy, but a flat field stays flat
    assert!(back.data.iter().all(|&v| v.abs_diff(128) <= 2));
}

#[test]
fn test_rawi_adapter_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("field.rawi");

    rawi::write_field(&path, 2, 2, vec![0.125, -7.0, 1e-3, 42.0]).unwrap();

    assert_eq!(rawi::read_dimensions(&path).unwrap(), (2, 2));
    let back = rawi::read_field(&path, Operation::Read).unwrap();
    assert_eq!(back.data, vec![0.125, -7.0, 1e-3, 42.0]);
}

#[test]
fn test_rawi_adapter_maps_errors() {
    let err = rawi::read_dimensions(std::path::Path::new("/nonexistent/x.rawi")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);

    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.rawi");
    let err = rawi::write_field(&path, 3, 3, vec![0.0; 4]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Codec);
}

#[test]
fn test_rawi_corrupt_header_is_codec_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("corrupt.rawi");
    let mut bytes = Vec::new();
    for word in [u32::MAX, u32::MAX, 8] {
        bytes.extend_from_slice(&word.to_le_bytes());
    }
    std::fs::write(&path, bytes).unwrap();

    let err = rawi::read_dimensions(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Codec);
    let err = rawi::read_field(&path, Operation::Read).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Codec);
}
