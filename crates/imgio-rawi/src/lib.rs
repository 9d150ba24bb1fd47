//! RAWI image files
//!
//! RAWI is an uncompressed floating-point image format. It keeps full
//! intensity precision, so nothing is quantized on the way in or out.
//!
//! Layout (all fields little-endian):
//!
//! ```text
//! u32 width
//! u32 height
//! u32 bytes per sample (4 = f32, 8 = f64)
//! width * height samples, row-major
//! ```
//!
//! This crate is kept separate from the dispatcher so the format can be
//! reused by tools that never touch the raster codecs.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Size of the fixed header in bytes.
pub const HEADER_LEN: usize = 12;

const F32_SAMPLE: u32 = 4;
const F64_SAMPLE: u32 = 8;

/// Errors raised while reading or writing RAWI files.
#[derive(Error, Debug)]
pub enum RawiError {
    /// Underlying file I/O failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The header names a sample width this reader does not understand.
    #[error("unsupported sample size {bytes} in {path} (expected 4 or 8)")]
    SampleSize { path: PathBuf, bytes: u32 },

    /// The file ends before the payload announced by the header.
    #[error("truncated RAWI payload in {path}: expected {expected} bytes, got {actual}")]
    Truncated {
        path: PathBuf,
        expected: usize,
        actual: usize,
    },

    /// The header announces a payload too large to address.
    #[error("RAWI header in {path} is too large: {width}x{height} with {sample_bytes}-byte samples")]
    Oversized {
        path: PathBuf,
        width: u32,
        height: u32,
        sample_bytes: u32,
    },

    /// Sample count does not match width * height.
    #[error("RAWI image is {width}x{height} but holds {len} samples")]
    DimensionMismatch { width: u32, height: u32, len: usize },
}

/// Result type for RAWI operations.
pub type Result<T> = std::result::Result<T, RawiError>;

/// Decoded RAWI image
#[derive(Debug, Clone, PartialEq)]
pub struct RawiImage {
    /// Image width in pixels
    pub width: u32,

    /// Image height in pixels
    pub height: u32,

    /// Intensities in row-major order
    pub data: Vec<f32>,
}

impl RawiImage {
    /// Wrap a row-major buffer, checking that it covers `width * height`.
    pub fn new(width: u32, height: u32, data: Vec<f32>) -> Result<Self> {
        if data.len() != pixel_count(width, height) {
            return Err(RawiError::DimensionMismatch {
                width,
                height,
                len: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct Header {
    width: u32,
    height: u32,
    sample_bytes: u32,
}

impl Header {
    /// Payload size in bytes, or `Oversized` when it doesn't fit a `usize`.
    fn payload_len(&self, path: &Path) -> Result<usize> {
        usize::try_from(self.width)
            .ok()
            .and_then(|w| w.checked_mul(usize::try_from(self.height).ok()?))
            .and_then(|n| n.checked_mul(self.sample_bytes as usize))
            .ok_or_else(|| RawiError::Oversized {
                path: path.to_path_buf(),
                width: self.width,
                height: self.height,
                sample_bytes: self.sample_bytes,
            })
    }
}

fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> RawiError + '_ {
    move |source| RawiError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn read_header<R: Read>(reader: &mut R, path: &Path) -> Result<Header> {
    let mut bytes = [0u8; HEADER_LEN];
    reader.read_exact(&mut bytes).map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            RawiError::Truncated {
                path: path.to_path_buf(),
                expected: HEADER_LEN,
                actual: 0,
            }
        } else {
            io_err(path)(e)
        }
    })?;

    let word = |i: usize| u32::from_le_bytes([bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]]);
    let header = Header {
        width: word(0),
        height: word(4),
        sample_bytes: word(8),
    };

    if header.sample_bytes != F32_SAMPLE && header.sample_bytes != F64_SAMPLE {
        return Err(RawiError::SampleSize {
            path: path.to_path_buf(),
            bytes: header.sample_bytes,
        });
    }
    Ok(header)
}

/// Read the header and check the file is long enough to hold the payload
/// it announces. Returns the header and the payload size in bytes.
fn open_checked(path: &Path) -> Result<(BufReader<File>, Header, usize)> {
    let file = File::open(path).map_err(io_err(path))?;
    let file_len = file.metadata().map_err(io_err(path))?.len();
    let mut reader = BufReader::new(file);
    let header = read_header(&mut reader, path)?;

    let expected = header.payload_len(path)?;
    let available = file_len.saturating_sub(HEADER_LEN as u64);
    if (available as u128) < expected as u128 {
        return Err(RawiError::Truncated {
            path: path.to_path_buf(),
            expected,
            actual: usize::try_from(available).unwrap_or(usize::MAX),
        });
    }
    Ok((reader, header, expected))
}

/// Read only the header and return `(width, height)`.
///
/// Fails if the file is too short for the payload the header announces.
pub fn read_dimensions<P: AsRef<Path>>(path: P) -> Result<(u32, u32)> {
    let path = path.as_ref();
    let (_, header, _) = open_checked(path)?;
    Ok((header.width, header.height))
}

/// Read a whole RAWI file. `f64` payloads are narrowed to `f32`.
pub fn read_rawi<P: AsRef<Path>>(path: P) -> Result<RawiImage> {
    let path = path.as_ref();
    let (reader, header, expected) = open_checked(path)?;

    // bounded by the file length checked above
    let mut payload = Vec::with_capacity(expected);
    reader
        .take(expected as u64)
        .read_to_end(&mut payload)
        .map_err(io_err(path))?;
    if payload.len() != expected {
        return Err(RawiError::Truncated {
            path: path.to_path_buf(),
            expected,
            actual: payload.len(),
        });
    }

    let data: Vec<f32> = match header.sample_bytes {
        F32_SAMPLE => payload
            .chunks_exact(4)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect(),
        _ => payload
            .chunks_exact(8)
            .map(|b| {
                f64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]]) as f32
            })
            .collect(),
    };

    log::trace!(
        "read RAWI {} ({}x{}, {}-byte samples)",
        path.display(),
        header.width,
        header.height,
        header.sample_bytes
    );

    Ok(RawiImage {
        width: header.width,
        height: header.height,
        data,
    })
}

/// Write an image as RAWI with `f32` samples.
pub fn write_rawi<P: AsRef<Path>>(path: P, image: &RawiImage) -> Result<()> {
    let path = path.as_ref();
    if image.data.len() != pixel_count(image.width, image.height) {
        return Err(RawiError::DimensionMismatch {
            width: image.width,
            height: image.height,
            len: image.data.len(),
        });
    }

    let file = File::create(path).map_err(io_err(path))?;
    let mut writer = BufWriter::new(file);

    let mut header = [0u8; HEADER_LEN];
    header[0..4].copy_from_slice(&image.width.to_le_bytes());
    header[4..8].copy_from_slice(&image.height.to_le_bytes());
    header[8..12].copy_from_slice(&F32_SAMPLE.to_le_bytes());
    writer.write_all(&header).map_err(io_err(path))?;

    for &v in &image.data {
        writer.write_all(&v.to_le_bytes()).map_err(io_err(path))?;
    }
    writer.flush().map_err(io_err(path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn raw_file(width: u32, height: u32, sample_bytes: u32, payload: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&width.to_le_bytes());
        bytes.extend_from_slice(&height.to_le_bytes());
        bytes.extend_from_slice(&sample_bytes.to_le_bytes());
        bytes.extend_from_slice(payload);
        bytes
    }

    #[test]
    fn test_write_then_read_preserves_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("field.rawi");
        let image = RawiImage::new(3, 2, vec![-1.5, 0.0, 0.25, 1e6, 3.75, -0.001]).unwrap();

        write_rawi(&path, &image).unwrap();
        let back = read_rawi(&path).unwrap();

        assert_eq!(back, image);
        assert_eq!(read_dimensions(&path).unwrap(), (3, 2));
        let len = fs::metadata(&path).unwrap().len() as usize;
        assert_eq!(len, HEADER_LEN + 6 * 4);
    }

    #[test]
    fn test_read_f64_payload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("wide.rawi");
        let mut payload = Vec::new();
        for v in [1.0f64, 2.5, -4.0, 8.125] {
            payload.extend_from_slice(&v.to_le_bytes());
        }
        fs::write(&path, raw_file(2, 2, 8, &payload)).unwrap();

        let image = read_rawi(&path).unwrap();
        assert_eq!(image.data, vec![1.0, 2.5, -4.0, 8.125]);
    }

    #[test]
    fn test_rejects_unknown_sample_size() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("odd.rawi");
        fs::write(&path, raw_file(1, 1, 2, &[0, 0])).unwrap();

        let err = read_rawi(&path).unwrap_err();
        assert!(matches!(err, RawiError::SampleSize { bytes: 2, .. }));
    }

    #[test]
    fn test_truncated_payload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("short.rawi");
        fs::write(&path, raw_file(2, 2, 4, &[0u8; 8])).unwrap();

        match read_rawi(&path) {
            Err(RawiError::Truncated {
                expected, actual, ..
            }) => {
                assert_eq!(expected, 16);
                assert_eq!(actual, 8);
            }
            other => panic!("expected truncation error, got {:?}", other),
        }
    }

    #[test]
    fn test_overflowing_header_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("huge.rawi");
        fs::write(&path, raw_file(u32::MAX, u32::MAX, 8, &[])).unwrap();

        assert!(matches!(
            read_rawi(&path),
            Err(RawiError::Oversized { sample_bytes: 8, .. })
        ));
        assert!(matches!(
            read_dimensions(&path),
            Err(RawiError::Oversized { .. })
        ));
    }

    #[test]
    fn test_large_header_without_payload_is_truncated() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.rawi");
        fs::write(&path, raw_file(60000, 60000, 4, &[])).unwrap();

        match read_rawi(&path) {
            Err(RawiError::Truncated {
                expected, actual, ..
            }) => {
                assert_eq!(expected as u64, 60000u64 * 60000 * 4);
                assert_eq!(actual, 0);
            }
            other => panic!("expected truncation error, got {:?}", other),
        }
        assert!(matches!(
            read_dimensions(&path),
            Err(RawiError::Truncated { .. })
        ));
    }

    #[test]
    fn test_truncated_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stub.rawi");
        fs::write(&path, [1u8, 0, 0]).unwrap();

        assert!(matches!(
            read_dimensions(&path),
            Err(RawiError::Truncated { .. })
        ));
    }

    #[test]
    fn test_dimension_mismatch_on_construct() {
        let err = RawiImage::new(4, 4, vec![0.0; 15]).unwrap_err();
        assert!(err.to_string().contains("4x4"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_dimensions("/nonexistent/dir/x.rawi").unwrap_err();
        assert!(matches!(err, RawiError::Io { .. }));
    }
}
