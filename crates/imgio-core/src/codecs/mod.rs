//! Codec adapters
//!
//! Each format module wraps one codec library and returns either an 8-bit
//! grayscale raster or a floating-point field. Pixel layout handling and
//! rescaling live in the dispatcher, not here.

#[cfg(feature = "jpeg")]
pub(crate) mod jpeg;
#[cfg(feature = "netcdf")]
pub(crate) mod netcdf;
#[cfg(feature = "png")]
pub(crate) mod png;
pub(crate) mod rawi;
pub(crate) mod tiff;

#[cfg(test)]
mod tests;

use crate::layout::{copy_region_into, Layout, Region};

/// Row-major 8-bit grayscale raster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gray8Image {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Row-major floating-point intensity field
#[derive(Debug, Clone, PartialEq)]
pub struct FloatImage {
    pub width: u32,
    pub height: u32,
    pub data: Vec<f32>,
}

/// Image decoded by any codec, before transfer into a caller buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedImage {
    Gray8(Gray8Image),
    Float(FloatImage),
}

impl DecodedImage {
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            DecodedImage::Gray8(img) => (img.width, img.height),
            DecodedImage::Float(img) => (img.width, img.height),
        }
    }

    /// Copy `region` into `dst`. The region must already be validated.
    pub fn copy_region_into(&self, region: Region, dst: &mut [f32], layout: Layout) {
        match self {
            DecodedImage::Gray8(img) => copy_region_into(&img.data, img.width, region, dst, layout),
            DecodedImage::Float(img) => copy_region_into(&img.data, img.width, region, dst, layout),
        }
    }
}

/// Sample types a codec may hand back, normalized to `[0, 1]`.
pub(crate) trait Sample: Copy {
    fn to_unit(self) -> f32;
}

impl Sample for u8 {
    #[inline]
    fn to_unit(self) -> f32 {
        self as f32 / 255.0
    }
}

impl Sample for u16 {
    #[inline]
    fn to_unit(self) -> f32 {
        self as f32 / 65535.0
    }
}

impl Sample for u32 {
    #[inline]
    fn to_unit(self) -> f32 {
        (self as f64 / u32::MAX as f64) as f32
    }
}

impl Sample for u64 {
    #[inline]
    fn to_unit(self) -> f32 {
        (self as f64 / u64::MAX as f64) as f32
    }
}

impl Sample for f32 {
    #[inline]
    fn to_unit(self) -> f32 {
        self
    }
}

impl Sample for f64 {
    #[inline]
    fn to_unit(self) -> f32 {
        self as f32
    }
}

// Luma weights of the classic RGB to gray conversion.
const LUMA_R: f32 = 0.30;
const LUMA_G: f32 = 0.59;
const LUMA_B: f32 = 0.11;

#[inline]
fn unit_to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Convert interleaved samples with `channels` per pixel to 8-bit gray.
///
/// 1 = gray, 2 = gray + alpha, 3 = RGB, 4 = RGBA. Alpha is dropped.
pub(crate) fn to_gray8<T: Sample>(
    buf: &[T],
    width: u32,
    height: u32,
    channels: usize,
) -> Result<Vec<u8>, String> {
    let expected = width as usize * height as usize * channels;
    if buf.len() != expected {
        return Err(format!(
            "sample buffer size mismatch: expected {}, got {}",
            expected,
            buf.len()
        ));
    }

    let gray = match channels {
        1 | 2 => buf
            .chunks_exact(channels)
            .map(|px| unit_to_u8(px[0].to_unit()))
            .collect(),
        3 | 4 => buf
            .chunks_exact(channels)
            .map(|px| {
                let luma = LUMA_R * px[0].to_unit()
                    + LUMA_G * px[1].to_unit()
                    + LUMA_B * px[2].to_unit();
                unit_to_u8(luma)
            })
            .collect(),
        n => return Err(format!("unsupported channel count: {}", n)),
    };
    Ok(gray)
}
