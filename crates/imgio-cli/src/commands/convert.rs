use std::path::Path;

use anyhow::{Context, Result};
use imgio_core::{ImageIo, Intensity, Layout, Region};

/// Read `input` (optionally only `region`) and write it to `output`.
///
/// The buffer round-trips through `layout`, so the pixels land where they
/// started whichever layout is chosen.
pub fn cmd_convert(
    io: &ImageIo,
    input: &Path,
    output: &Path,
    region: Option<Region>,
    scale_to_8_bit: bool,
    layout: Layout,
) -> Result<()> {
    let (width, height, buffer) = match region {
        Some(region) => {
            let mut buffer: Vec<Intensity> = vec![0.0; region.pixel_count()];
            io.read_region(input, region, &mut buffer, layout)
                .with_context(|| format!("Failed to read region of {}", input.display()))?;
            (region.width, region.height, buffer)
        }
        None => {
            let (width, height) = io
                .dimensions(input)
                .with_context(|| format!("Failed to inspect {}", input.display()))?;
            let mut buffer: Vec<Intensity> = vec![0.0; Region::full(width, height).pixel_count()];
            io.read(input, &mut buffer, layout)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            (width, height, buffer)
        }
    };

    log::info!(
        "{} -> {} ({}x{}, {:?} layout)",
        input.display(),
        output.display(),
        width,
        height,
        layout
    );

    io.write(output, width, height, &buffer, layout, scale_to_8_bit)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("Wrote {} ({}x{})", output.display(), width, height);
    Ok(())
}
