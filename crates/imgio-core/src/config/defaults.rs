//! Default codec settings and their sanitization.

use serde::Deserialize;

/// Runtime toggles for the optional codecs.
///
/// A format is only usable when it is both compiled in and enabled here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormatToggles {
    pub jpeg: bool,
    pub png: bool,
    pub netcdf: bool,
}

impl Default for FormatToggles {
    fn default() -> Self {
        Self {
            jpeg: true,
            png: true,
            netcdf: true,
        }
    }
}

/// TIFF decoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TiffSettings {
    /// Upper bound on decoder buffers, in bytes
    pub max_decode_bytes: usize,
}

impl Default for TiffSettings {
    fn default() -> Self {
        Self {
            max_decode_bytes: 1024 * 1024 * 1024,
        }
    }
}

/// JPEG encoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct JpegSettings {
    /// Encoder quality, 1-100
    pub quality: u8,
}

impl Default for JpegSettings {
    fn default() -> Self {
        Self { quality: 90 }
    }
}

/// NetCDF reader settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NetCdfSettings {
    /// Name of the variable holding the intensity field
    pub variable: String,
}

impl Default for NetCdfSettings {
    fn default() -> Self {
        Self {
            variable: "intensities".to_string(),
        }
    }
}

/// Complete configuration file structure.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct ImageIoConfig {
    pub formats: FormatToggles,
    pub tiff: TiffSettings,
    pub jpeg: JpegSettings,
    pub netcdf: NetCdfSettings,
}

impl ImageIoConfig {
    /// Clamp out-of-range values, returning a note for each correction.
    pub fn sanitize(&mut self) -> Vec<String> {
        let mut notes = Vec::new();

        if !(1..=100).contains(&self.jpeg.quality) {
            let clamped = self.jpeg.quality.clamp(1, 100);
            notes.push(format!(
                "jpeg.quality {} out of range, using {}",
                self.jpeg.quality, clamped
            ));
            self.jpeg.quality = clamped;
        }

        if self.tiff.max_decode_bytes == 0 {
            let fallback = TiffSettings::default().max_decode_bytes;
            notes.push(format!(
                "tiff.max_decode_bytes must be positive, using {}",
                fallback
            ));
            self.tiff.max_decode_bytes = fallback;
        }

        if self.netcdf.variable.trim().is_empty() {
            notes.push("netcdf.variable is empty, using \"intensities\"".to_string());
            self.netcdf.variable = NetCdfSettings::default().variable;
        }

        notes
    }
}
