use std::path::Path;

use anyhow::{bail, Context, Result};
use imgio_core::{ImageIo, Intensity, Layout, Region};

fn read_field(io: &ImageIo, path: &Path) -> Result<(u32, u32, Vec<Intensity>)> {
    let (width, height) = io
        .dimensions(path)
        .with_context(|| format!("Failed to inspect {}", path.display()))?;
    let mut buffer: Vec<Intensity> = vec![0.0; Region::full(width, height).pixel_count()];
    io.read(path, &mut buffer, Layout::Right)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok((width, height, buffer))
}

/// Overlay `bottom` (red) and `top` (green) into an RGB TIFF at `output`.
pub fn cmd_overlay(io: &ImageIo, bottom: &Path, top: &Path, output: &Path) -> Result<()> {
    let (width, height, bottom_field) = read_field(io, bottom)?;
    let (top_width, top_height, top_field) = read_field(io, top)?;

    if (width, height) != (top_width, top_height) {
        bail!(
            "Image sizes differ: {} is {}x{}, {} is {}x{}",
            bottom.display(),
            width,
            height,
            top.display(),
            top_width,
            top_height
        );
    }

    io.write_overlay(output, width, height, &bottom_field, &top_field)
        .with_context(|| format!("Failed to write overlay {}", output.display()))?;

    println!("Wrote overlay {} ({}x{})", output.display(), width, height);
    Ok(())
}
