//! imgio core library
//!
//! File-name driven image I/O. A file name selects the codec (RAWI, TIFF,
//! JPEG, PNG or NetCDF), and intensities move between that codec and flat
//! caller-owned `f32` buffers in row-major or column-major order.
//!
//! ```no_run
//! use imgio_core::{ImageIo, Layout};
//!
//! let io = ImageIo::default();
//! let (w, h) = io.dimensions("frame_0001.tif")?;
//! let mut intensities = vec![0.0f32; (w * h) as usize];
//! io.read("frame_0001.tif", &mut intensities, Layout::Right)?;
//! io.write("frame_0001.rawi", w, h, &intensities, Layout::Right, false)?;
//! # Ok::<(), imgio_core::ImageIoError>(())
//! ```

pub mod codecs;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod format;
pub mod layout;
pub mod rescale;

/// Floating-point pixel sample, before any quantization.
pub type Intensity = f32;

// Re-export commonly used types
pub use config::{load_config, ConfigHandle, ImageIoConfig};
pub use dispatch::ImageIo;
pub use error::{ErrorKind, ImageIoError, Operation, Result};
pub use format::FileFormat;
pub use layout::{Layout, Region};
