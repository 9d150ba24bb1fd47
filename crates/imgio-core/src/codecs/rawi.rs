//! RAWI (delegates to imgio-rawi)

use std::path::Path;

use imgio_rawi::{RawiError, RawiImage};

use super::FloatImage;
use crate::error::{ImageIoError, Operation, Result};

fn map_err(path: &Path, op: Operation) -> impl FnOnce(RawiError) -> ImageIoError + '_ {
    move |err| match err {
        RawiError::Io { source, .. } => ImageIoError::io(path, source),
        other => ImageIoError::codec(path, op, other),
    }
}

pub(crate) fn read_dimensions(path: &Path) -> Result<(u32, u32)> {
    imgio_rawi::read_dimensions(path).map_err(map_err(path, Operation::Dimensions))
}

pub(crate) fn read_field(path: &Path, op: Operation) -> Result<FloatImage> {
    let raw = imgio_rawi::read_rawi(path).map_err(map_err(path, op))?;
    Ok(FloatImage {
        width: raw.width,
        height: raw.height,
        data: raw.data,
    })
}

/// Write row-major samples unscaled.
pub(crate) fn write_field(path: &Path, width: u32, height: u32, data: Vec<f32>) -> Result<()> {
    let op = Operation::Write;
    let image = RawiImage::new(width, height, data).map_err(map_err(path, op))?;
    imgio_rawi::write_rawi(path, &image).map_err(map_err(path, op))
}
