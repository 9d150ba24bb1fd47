//! File-name based format detection.
//!
//! Detection is plain substring matching on the file name, tried in a fixed
//! priority order. File contents are never inspected, so a name such as
//! `scan.tiff.bak` is treated as TIFF.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Image file formats known to the dispatcher, in detection priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Rawi,
    Tiff,
    Jpeg,
    Png,
    NetCdf,
}

impl FileFormat {
    /// All formats, in detection priority order.
    pub const ALL: [FileFormat; 5] = [
        FileFormat::Rawi,
        FileFormat::Tiff,
        FileFormat::Jpeg,
        FileFormat::Png,
        FileFormat::NetCdf,
    ];

    /// Substrings that select this format.
    pub fn patterns(self) -> &'static [&'static str] {
        match self {
            FileFormat::Rawi => &[".rawi"],
            FileFormat::Tiff => &["tif", "tiff"],
            FileFormat::Jpeg => &["jpg", "jpeg"],
            FileFormat::Png => &["png"],
            FileFormat::NetCdf => &[".nc"],
        }
    }

    /// Whether the codec for this format was compiled into this build.
    pub fn is_compiled(self) -> bool {
        match self {
            FileFormat::Rawi | FileFormat::Tiff => true,
            FileFormat::Jpeg => cfg!(feature = "jpeg"),
            FileFormat::Png => cfg!(feature = "png"),
            FileFormat::NetCdf => cfg!(feature = "netcdf"),
        }
    }

    /// Formats whose pixels are quantized to 8 bits on the way through.
    pub fn is_8bit_raster(self) -> bool {
        matches!(self, FileFormat::Tiff | FileFormat::Jpeg | FileFormat::Png)
    }

    /// Match the file name against every format, ignoring availability.
    pub fn detect<P: AsRef<Path>>(file_name: P) -> Option<FileFormat> {
        classify_with(file_name, |_| true)
    }

    pub fn name(self) -> &'static str {
        match self {
            FileFormat::Rawi => "RAWI",
            FileFormat::Tiff => "TIFF",
            FileFormat::Jpeg => "JPEG",
            FileFormat::Png => "PNG",
            FileFormat::NetCdf => "NetCDF",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify a file name, attempting only the formats `available` accepts.
///
/// The first format in priority order whose pattern occurs anywhere in the
/// name wins. RAWI and TIFF are always attempted.
pub fn classify_with<P, F>(file_name: P, available: F) -> Option<FileFormat>
where
    P: AsRef<Path>,
    F: Fn(FileFormat) -> bool,
{
    let name = file_name.as_ref().to_string_lossy();
    FileFormat::ALL.into_iter().find(|&format| {
        let attempted = matches!(format, FileFormat::Rawi | FileFormat::Tiff) || available(format);
        attempted && format.patterns().iter().any(|p| name.contains(p))
    })
}
