//! PNG via the `png` crate

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use super::{to_gray8, Gray8Image};
use crate::error::{ImageIoError, Operation, Result};

fn open_reader(path: &Path, op: Operation) -> Result<png::Reader<BufReader<File>>> {
    let file = File::open(path).map_err(|e| ImageIoError::io(path, e))?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    // palette and sub-byte depths come out as 8-bit samples
    decoder.set_transformations(png::Transformations::EXPAND);
    decoder
        .read_info()
        .map_err(|e| ImageIoError::codec(path, op, format!("failed to read PNG info: {}", e)))
}

pub(crate) fn read_dimensions(path: &Path) -> Result<(u32, u32)> {
    let reader = open_reader(path, Operation::Dimensions)?;
    let info = reader.info();
    Ok((info.width, info.height))
}

pub(crate) fn read_gray8(path: &Path, op: Operation) -> Result<Gray8Image> {
    let mut reader = open_reader(path, op)?;

    let buffer_size = reader
        .output_buffer_size()
        .ok_or_else(|| ImageIoError::codec(path, op, "failed to determine PNG buffer size"))?;
    let mut buf = vec![0u8; buffer_size];
    let frame = reader
        .next_frame(&mut buf)
        .map_err(|e| ImageIoError::codec(path, op, format!("failed to read PNG frame: {}", e)))?;
    let bytes = &buf[..frame.buffer_size()];
    let (width, height) = (frame.width, frame.height);

    let (color_type, bit_depth) = reader.output_color_type();
    let channels = match color_type {
        png::ColorType::Grayscale => 1,
        png::ColorType::GrayscaleAlpha => 2,
        png::ColorType::Rgb => 3,
        png::ColorType::Rgba => 4,
        png::ColorType::Indexed => {
            return Err(ImageIoError::codec(path, op, "indexed PNG was not expanded"));
        }
    };

    let gray = match bit_depth {
        png::BitDepth::Eight => to_gray8(bytes, width, height, channels),
        png::BitDepth::Sixteen => {
            // PNG 16-bit is big-endian
            let samples: Vec<u16> = bytes
                .chunks_exact(2)
                .map(|b| u16::from_be_bytes([b[0], b[1]]))
                .collect();
            to_gray8(&samples, width, height, channels)
        }
        other => Err(format!("unsupported PNG bit depth: {:?}", other)),
    }
    .map_err(|msg| ImageIoError::codec(path, op, msg))?;

    Ok(Gray8Image {
        width,
        height,
        data: gray,
    })
}

pub(crate) fn write_gray8(path: &Path, image: &Gray8Image) -> Result<()> {
    let op = Operation::Write;
    let file = File::create(path).map_err(|e| ImageIoError::io(path, e))?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), image.width, image.height);
    encoder.set_color(png::ColorType::Grayscale);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| ImageIoError::codec(path, op, format!("failed to write PNG header: {}", e)))?;
    writer
        .write_image_data(&image.data)
        .map_err(|e| ImageIoError::codec(path, op, format!("failed to write PNG data: {}", e)))?;
    writer
        .finish()
        .map_err(|e| ImageIoError::codec(path, op, format!("failed to finish PNG: {}", e)))
}
