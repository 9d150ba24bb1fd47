//! JPEG via the `image` crate's codec

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use image::codecs::jpeg::{JpegDecoder, JpegEncoder};
use image::{DynamicImage, ExtendedColorType, ImageDecoder, ImageEncoder};

use super::{to_gray8, Gray8Image};
use crate::error::{ImageIoError, Operation, Result};

fn open_decoder(path: &Path, op: Operation) -> Result<JpegDecoder<BufReader<File>>> {
    let file = File::open(path).map_err(|e| ImageIoError::io(path, e))?;
    JpegDecoder::new(BufReader::new(file))
        .map_err(|e| ImageIoError::codec(path, op, format!("failed to read JPEG header: {}", e)))
}

pub(crate) fn read_dimensions(path: &Path) -> Result<(u32, u32)> {
    Ok(open_decoder(path, Operation::Dimensions)?.dimensions())
}

pub(crate) fn read_gray8(path: &Path, op: Operation) -> Result<Gray8Image> {
    let decoder = open_decoder(path, op)?;
    let image = DynamicImage::from_decoder(decoder)
        .map_err(|e| ImageIoError::codec(path, op, format!("failed to decode JPEG: {}", e)))?;

    let (width, height) = (image.width(), image.height());
    let data = match image {
        DynamicImage::ImageLuma8(gray) => gray.into_raw(),
        other => {
            let rgb = other.into_rgb8();
            to_gray8(rgb.as_raw(), width, height, 3)
                .map_err(|msg| ImageIoError::codec(path, op, msg))?
        }
    };

    Ok(Gray8Image {
        width,
        height,
        data,
    })
}

pub(crate) fn write_gray8(path: &Path, image: &Gray8Image, quality: u8) -> Result<()> {
    let op = Operation::Write;
    let file = File::create(path).map_err(|e| ImageIoError::io(path, e))?;
    let mut writer = BufWriter::new(file);

    JpegEncoder::new_with_quality(&mut writer, quality)
        .write_image(&image.data, image.width, image.height, ExtendedColorType::L8)
        .map_err(|e| ImageIoError::codec(path, op, format!("failed to encode JPEG: {}", e)))?;
    writer.flush().map_err(|e| ImageIoError::io(path, e))
}
