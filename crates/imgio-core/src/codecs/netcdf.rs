//! NetCDF intensity fields via the `netcdf` crate
//!
//! The field is a variable whose last two dimensions are `(y, x)`. Any
//! leading dimensions (time, band) are indexed at 0.

use std::path::Path;

use super::FloatImage;
use crate::error::{ImageIoError, Operation, Result};

struct Shape {
    width: u32,
    height: u32,
}

fn field_shape(path: &Path, var: &netcdf::Variable<'_>, op: Operation) -> Result<Shape> {
    let dims = var.dimensions();
    if dims.len() < 2 {
        return Err(ImageIoError::codec(
            path,
            op,
            format!(
                "variable '{}' has {} dimensions, need at least 2",
                var.name(),
                dims.len()
            ),
        ));
    }
    let to_u32 = |len: usize| {
        u32::try_from(len)
            .map_err(|_| ImageIoError::codec(path, op, format!("dimension {} too large", len)))
    };
    Ok(Shape {
        height: to_u32(dims[dims.len() - 2].len())?,
        width: to_u32(dims[dims.len() - 1].len())?,
    })
}

fn open_variable<'f>(
    path: &Path,
    file: &'f netcdf::File,
    variable: &str,
    op: Operation,
) -> Result<netcdf::Variable<'f>> {
    file.variable(variable).ok_or_else(|| {
        ImageIoError::codec(path, op, format!("variable '{}' not found", variable))
    })
}

fn open_file(path: &Path, op: Operation) -> Result<netcdf::File> {
    netcdf::open(path)
        .map_err(|e| ImageIoError::codec(path, op, format!("failed to open NetCDF file: {}", e)))
}

pub(crate) fn read_dimensions(path: &Path, variable: &str) -> Result<(u32, u32)> {
    let op = Operation::Dimensions;
    let file = open_file(path, op)?;
    let var = open_variable(path, &file, variable, op)?;
    let shape = field_shape(path, &var, op)?;
    Ok((shape.width, shape.height))
}

pub(crate) fn read_field(path: &Path, variable: &str, op: Operation) -> Result<FloatImage> {
    let file = open_file(path, op)?;
    let var = open_variable(path, &file, variable, op)?;
    let shape = field_shape(path, &var, op)?;

    let mut values: Vec<f32> = var
        .get_values::<f32, _>(..)
        .map_err(|e| ImageIoError::codec(path, op, format!("failed to read '{}': {}", variable, e)))?;

    let frame = shape.width as usize * shape.height as usize;
    if values.len() < frame {
        return Err(ImageIoError::codec(
            path,
            op,
            format!("expected {} values, got {}", frame, values.len()),
        ));
    }
    values.truncate(frame);

    Ok(FloatImage {
        width: shape.width,
        height: shape.height,
        data: values,
    })
}
