use anyhow::Result;
use imgio_core::{FileFormat, ImageIo};

/// Print every known format, its name patterns and whether it is usable.
pub fn cmd_formats(io: &ImageIo) -> Result<()> {
    println!("{:<8} {:<9} {:<10} PATTERNS", "FORMAT", "COMPILED", "SUPPORTED");
    for format in FileFormat::ALL {
        println!(
            "{:<8} {:<9} {:<10} {}",
            format.name(),
            yes_no(format.is_compiled()),
            yes_no(io.is_format_supported(format)),
            format.patterns().join(" ")
        );
    }
    Ok(())
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}
