//! TIFF via the `tiff` crate

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use tiff::decoder::{Decoder, DecodingResult, Limits};
use tiff::encoder::{colortype, TiffEncoder};
use tiff::ColorType;

use super::{to_gray8, Gray8Image};
use crate::error::{ImageIoError, Operation, Result};

/// Decoder limits, built once per dispatcher.
pub(crate) fn decoder_limits(max_decode_bytes: usize) -> Limits {
    let mut limits = Limits::default();
    limits.decoding_buffer_size = max_decode_bytes;
    limits.ifd_value_size = max_decode_bytes;
    limits.intermediate_buffer_size = max_decode_bytes;
    limits
}

fn open_decoder(path: &Path, limits: &Limits, op: Operation) -> Result<Decoder<BufReader<File>>> {
    let file = File::open(path).map_err(|e| ImageIoError::io(path, e))?;
    let decoder = Decoder::new(BufReader::new(file))
        .map_err(|e| ImageIoError::codec(path, op, format!("failed to create TIFF decoder: {}", e)))?
        .with_limits(limits.clone());
    Ok(decoder)
}

pub(crate) fn read_dimensions(path: &Path, limits: &Limits) -> Result<(u32, u32)> {
    let mut decoder = open_decoder(path, limits, Operation::Dimensions)?;
    decoder.dimensions().map_err(|e| {
        ImageIoError::codec(path, Operation::Dimensions, format!("failed to read TIFF dimensions: {}", e))
    })
}

/// Decode the first image in the file and convert it to 8-bit gray.
pub(crate) fn read_gray8(path: &Path, limits: &Limits, op: Operation) -> Result<Gray8Image> {
    let mut decoder = open_decoder(path, limits, op)?;
    let codec_err = |what: &str, e: tiff::TiffError| {
        ImageIoError::codec(path, op, format!("failed to {}: {}", what, e))
    };

    let (width, height) = decoder
        .dimensions()
        .map_err(|e| codec_err("read TIFF dimensions", e))?;
    let color_type = decoder
        .colortype()
        .map_err(|e| codec_err("read TIFF color type", e))?;
    let channels = match color_type {
        ColorType::Gray(_) => 1,
        ColorType::GrayA(_) => 2,
        ColorType::RGB(_) => 3,
        ColorType::RGBA(_) => 4,
        other => {
            return Err(ImageIoError::codec(
                path,
                op,
                format!("unsupported TIFF color type: {:?}", other),
            ))
        }
    };

    let image = decoder
        .read_image()
        .map_err(|e| codec_err("read TIFF image data", e))?;

    let gray = match image {
        DecodingResult::U8(buf) => to_gray8(&buf, width, height, channels),
        DecodingResult::U16(buf) => to_gray8(&buf, width, height, channels),
        DecodingResult::U32(buf) => to_gray8(&buf, width, height, channels),
        DecodingResult::U64(buf) => to_gray8(&buf, width, height, channels),
        DecodingResult::F32(buf) => to_gray8(&buf, width, height, channels),
        DecodingResult::F64(buf) => to_gray8(&buf, width, height, channels),
        DecodingResult::F16(buf) => {
            let widened: Vec<f32> = buf.iter().map(|&v| v.to_f32()).collect();
            to_gray8(&widened, width, height, channels)
        }
        DecodingResult::I8(_)
        | DecodingResult::I16(_)
        | DecodingResult::I32(_)
        | DecodingResult::I64(_) => Err("signed integer TIFF samples not supported".to_string()),
    }
    .map_err(|msg| ImageIoError::codec(path, op, msg))?;

    Ok(Gray8Image {
        width,
        height,
        data: gray,
    })
}

/// Create `path`, run `encode` against a TIFF encoder on it, then flush.
fn encode_to<F>(path: &Path, op: Operation, encode: F) -> Result<()>
where
    F: FnOnce(&mut TiffEncoder<&mut BufWriter<File>>) -> tiff::TiffResult<()>,
{
    let file = File::create(path).map_err(|e| ImageIoError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    {
        let mut encoder = TiffEncoder::new(&mut writer).map_err(|e| {
            ImageIoError::codec(path, op, format!("failed to create TIFF encoder: {}", e))
        })?;
        encode(&mut encoder)
            .map_err(|e| ImageIoError::codec(path, op, format!("failed to write TIFF image: {}", e)))?;
    }
    writer.flush().map_err(|e| ImageIoError::io(path, e))
}

pub(crate) fn write_gray8(path: &Path, image: &Gray8Image) -> Result<()> {
    encode_to(path, Operation::Write, |encoder| {
        encoder.write_image::<colortype::Gray8>(image.width, image.height, &image.data)
    })
}

/// Write interleaved RGB8 pixels.
pub(crate) fn write_rgb8(path: &Path, width: u32, height: u32, rgb: &[u8]) -> Result<()> {
    encode_to(path, Operation::WriteOverlay, |encoder| {
        encoder.write_image::<colortype::RGB8>(width, height, rgb)
    })
}
