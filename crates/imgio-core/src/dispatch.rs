//! The image I/O dispatcher.
//!
//! [`ImageIo`] picks a codec from the file name and moves intensities between
//! caller-owned buffers and that codec. Every check on names, regions and
//! buffer sizes happens before the codec is touched.

use std::path::Path;

use crate::codecs::{self, DecodedImage, Gray8Image};
use crate::config::{ConfigHandle, ImageIoConfig};
use crate::error::{ImageIoError, Operation, Result};
use crate::format::{classify_with, FileFormat};
use crate::layout::{gather_row_major, Layout, Region};
use crate::rescale::{IntensityRange, LinearScale, HALF_8BIT};
use crate::Intensity;

/// Format-sniffing image reader and writer.
///
/// Codec settings are resolved once, when the dispatcher is built.
#[derive(Debug, Clone)]
pub struct ImageIo {
    config: ImageIoConfig,
    tiff_limits: tiff::decoder::Limits,
}

impl Default for ImageIo {
    fn default() -> Self {
        Self::new(ImageIoConfig::default())
    }
}

impl ImageIo {
    pub fn new(mut config: ImageIoConfig) -> Self {
        for note in config.sanitize() {
            log::warn!("config: {}", note);
        }
        let tiff_limits = codecs::tiff::decoder_limits(config.tiff.max_decode_bytes);

        let io = Self {
            config,
            tiff_limits,
        };
        log::debug!(
            "image I/O ready, formats: {}",
            FileFormat::ALL
                .iter()
                .filter(|f| io.is_format_supported(**f))
                .map(|f| f.name())
                .collect::<Vec<_>>()
                .join(", ")
        );
        io
    }

    /// Build from a loaded config handle.
    pub fn from_handle(handle: &ConfigHandle) -> Self {
        Self::new(handle.config.clone())
    }

    pub fn config(&self) -> &ImageIoConfig {
        &self.config
    }

    /// Whether `format` is compiled into this build and enabled in config.
    pub fn is_format_supported(&self, format: FileFormat) -> bool {
        let enabled = match format {
            FileFormat::Rawi | FileFormat::Tiff => true,
            FileFormat::Jpeg => self.config.formats.jpeg,
            FileFormat::Png => self.config.formats.png,
            FileFormat::NetCdf => self.config.formats.netcdf,
        };
        enabled && format.is_compiled()
    }

    /// Classify a file name, attempting only supported formats.
    pub fn classify<P: AsRef<Path>>(&self, file_name: P) -> Option<FileFormat> {
        classify_with(file_name, |f| self.is_format_supported(f))
    }

    /// Classify or explain why the name can't be handled.
    fn resolve(&self, path: &Path, op: Operation) -> Result<FileFormat> {
        if let Some(format) = self.classify(path) {
            log::debug!("{}: {} as {}", op, path.display(), format);
            return Ok(format);
        }
        match FileFormat::detect(path) {
            Some(format) => Err(ImageIoError::unsupported(
                path,
                op,
                format!("{} is not available in this build", format),
            )),
            None => Err(ImageIoError::UnrecognizedFormat {
                file: path.to_path_buf(),
            }),
        }
    }

    /// Width and height of the image in `file_name`.
    pub fn dimensions<P: AsRef<Path>>(&self, file_name: P) -> Result<(u32, u32)> {
        let path = file_name.as_ref();
        match self.resolve(path, Operation::Dimensions)? {
            FileFormat::Rawi => codecs::rawi::read_dimensions(path),
            FileFormat::Tiff => codecs::tiff::read_dimensions(path, &self.tiff_limits),
            #[cfg(feature = "jpeg")]
            FileFormat::Jpeg => codecs::jpeg::read_dimensions(path),
            #[cfg(feature = "png")]
            FileFormat::Png => codecs::png::read_dimensions(path),
            #[cfg(feature = "netcdf")]
            FileFormat::NetCdf => {
                codecs::netcdf::read_dimensions(path, &self.config.netcdf.variable)
            }
            #[allow(unreachable_patterns)]
            other => Err(not_compiled(path, Operation::Dimensions, other)),
        }
    }

    fn decode(&self, path: &Path, format: FileFormat, op: Operation) -> Result<DecodedImage> {
        let decoded = match format {
            FileFormat::Rawi => DecodedImage::Float(codecs::rawi::read_field(path, op)?),
            FileFormat::Tiff => {
                DecodedImage::Gray8(codecs::tiff::read_gray8(path, &self.tiff_limits, op)?)
            }
            #[cfg(feature = "jpeg")]
            FileFormat::Jpeg => DecodedImage::Gray8(codecs::jpeg::read_gray8(path, op)?),
            #[cfg(feature = "png")]
            FileFormat::Png => DecodedImage::Gray8(codecs::png::read_gray8(path, op)?),
            #[cfg(feature = "netcdf")]
            FileFormat::NetCdf => DecodedImage::Float(codecs::netcdf::read_field(
                path,
                &self.config.netcdf.variable,
                op,
            )?),
            #[allow(unreachable_patterns)]
            other => return Err(not_compiled(path, op, other)),
        };
        Ok(decoded)
    }

    /// Read the whole image into `buffer`, which must hold `width * height`
    /// samples laid out as `layout`.
    ///
    /// RAWI and NetCDF intensities are copied as stored. TIFF, JPEG and PNG
    /// images are converted to 8-bit gray first.
    pub fn read<P: AsRef<Path>>(
        &self,
        file_name: P,
        buffer: &mut [Intensity],
        layout: Layout,
    ) -> Result<()> {
        let path = file_name.as_ref();
        let op = Operation::Read;
        let format = self.resolve(path, op)?;
        let image = self.decode(path, format, op)?;

        let (width, height) = image.dimensions();
        let region = Region::full(width, height);
        check_buffer_len(path, op, buffer.len(), region.pixel_count(), width, height)?;

        image.copy_region_into(region, buffer, layout);
        Ok(())
    }

    /// Read only `region` of the image into `buffer`, which must hold
    /// `region.width * region.height` samples laid out as `layout`.
    ///
    /// RAWI files can't be read partially.
    pub fn read_region<P: AsRef<Path>>(
        &self,
        file_name: P,
        region: Region,
        buffer: &mut [Intensity],
        layout: Layout,
    ) -> Result<()> {
        let path = file_name.as_ref();
        let op = Operation::ReadRegion;
        let format = self.resolve(path, op)?;
        if format == FileFormat::Rawi {
            return Err(ImageIoError::unsupported(
                path,
                op,
                "reading only a portion of an image is not supported for RAWI",
            ));
        }
        check_buffer_len(
            path,
            op,
            buffer.len(),
            region.pixel_count(),
            region.width,
            region.height,
        )?;

        let image = self.decode(path, format, op)?;
        let (width, height) = image.dimensions();
        if !region.fits_within(width, height) {
            return Err(ImageIoError::precondition(
                path,
                op,
                format!(
                    "region {}x{} at ({}, {}) exceeds image extent {}x{}",
                    region.width, region.height, region.x, region.y, width, height
                ),
            ));
        }

        image.copy_region_into(region, buffer, layout);
        Ok(())
    }

    /// Write a `width` x `height` buffer laid out as `layout`.
    ///
    /// RAWI stores the samples unscaled. TIFF, JPEG and PNG store 8-bit gray:
    /// with `scale_to_8_bit` the buffer's min..max is stretched onto 0..255,
    /// otherwise samples are floored and saturated as they are.
    pub fn write<P: AsRef<Path>>(
        &self,
        file_name: P,
        width: u32,
        height: u32,
        buffer: &[Intensity],
        layout: Layout,
        scale_to_8_bit: bool,
    ) -> Result<()> {
        let path = file_name.as_ref();
        let op = Operation::Write;
        let format = self.resolve(path, op)?;
        check_nonempty(path, op, width, height)?;
        let expected = width as usize * height as usize;
        check_buffer_len(path, op, buffer.len(), expected, width, height)?;

        if format == FileFormat::Rawi {
            let samples = gather_row_major(buffer, width, height, layout, |v| v);
            return codecs::rawi::write_field(path, width, height, samples);
        }
        if !format.is_8bit_raster() {
            return Err(ImageIoError::unsupported(
                path,
                op,
                format!("writing {} files is not supported", format),
            ));
        }

        let scale = LinearScale::for_write(buffer, scale_to_8_bit);
        let image = Gray8Image {
            width,
            height,
            data: gather_row_major(buffer, width, height, layout, |v| scale.quantize(v)),
        };

        match format {
            FileFormat::Tiff => codecs::tiff::write_gray8(path, &image),
            #[cfg(feature = "jpeg")]
            FileFormat::Jpeg => codecs::jpeg::write_gray8(path, &image, self.config.jpeg.quality),
            #[cfg(feature = "png")]
            FileFormat::Png => codecs::png::write_gray8(path, &image),
            other => Err(not_compiled(path, op, other)),
        }
    }

    /// Write a false-color TIFF showing two row-major fields on top of each
    /// other: `bottom` in red, `top` in green.
    ///
    /// Each field is stretched independently onto half the 8-bit range. The
    /// output is always TIFF, whatever the file name says.
    pub fn write_overlay<P: AsRef<Path>>(
        &self,
        file_name: P,
        width: u32,
        height: u32,
        bottom: &[Intensity],
        top: &[Intensity],
    ) -> Result<()> {
        let path = file_name.as_ref();
        let op = Operation::WriteOverlay;
        check_nonempty(path, op, width, height)?;
        let expected = width as usize * height as usize;
        check_buffer_len(path, op, bottom.len(), expected, width, height)?;
        check_buffer_len(path, op, top.len(), expected, width, height)?;

        let bottom_scale = LinearScale::to_target(IntensityRange::of(bottom), HALF_8BIT);
        let top_scale = LinearScale::to_target(IntensityRange::of(top), HALF_8BIT);

        let mut rgb = Vec::with_capacity(expected * 3);
        for (&b, &t) in bottom.iter().zip(top) {
            rgb.push(bottom_scale.quantize(b));
            rgb.push(top_scale.quantize(t));
            rgb.push(0);
        }

        codecs::tiff::write_rgb8(path, width, height, &rgb)
    }
}

fn not_compiled(path: &Path, op: Operation, format: FileFormat) -> ImageIoError {
    ImageIoError::unsupported(path, op, format!("{} is not available in this build", format))
}

fn check_buffer_len(
    path: &Path,
    op: Operation,
    actual: usize,
    expected: usize,
    width: u32,
    height: u32,
) -> Result<()> {
    if actual != expected {
        return Err(ImageIoError::precondition(
            path,
            op,
            format!(
                "buffer holds {} samples, {}x{} needs {}",
                actual, width, height, expected
            ),
        ));
    }
    Ok(())
}

fn check_nonempty(path: &Path, op: Operation, width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(ImageIoError::precondition(
            path,
            op,
            format!("image must not be empty, got {}x{}", width, height),
        ));
    }
    Ok(())
}
