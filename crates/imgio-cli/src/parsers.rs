//! Parsing functions for CLI arguments.

use imgio_core::{Layout, Region};

/// Parse a region in format "x,y,width,height"
pub fn parse_region(region_str: &str) -> Result<Region, String> {
    let parts: Vec<&str> = region_str.split(',').collect();
    if parts.len() != 4 {
        return Err(format!(
            "Region must be in format x,y,width,height, got: {}",
            region_str
        ));
    }

    let names = ["x offset", "y offset", "width", "height"];
    let mut values = [0u32; 4];
    for ((value, part), name) in values.iter_mut().zip(&parts).zip(names) {
        *value = part
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("Invalid {}: {}", name, part))?;
    }

    let [x, y, width, height] = values;
    if width == 0 || height == 0 {
        return Err(format!("Region must not be empty, got: {}", region_str));
    }

    Ok(Region::new(x, y, width, height))
}

/// Parse a buffer layout: "right" (row-major) or "left" (column-major)
pub fn parse_layout(layout_str: &str) -> Result<Layout, String> {
    match layout_str.trim().to_ascii_lowercase().as_str() {
        "right" | "row-major" => Ok(Layout::Right),
        "left" | "column-major" => Ok(Layout::Left),
        other => Err(format!(
            "Unknown layout '{}'. Valid options: right, left",
            other
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_region() {
        assert_eq!(parse_region("1,2,30,40"), Ok(Region::new(1, 2, 30, 40)));
        assert_eq!(parse_region(" 0, 0 ,5,5 "), Ok(Region::new(0, 0, 5, 5)));
    }

    #[test]
    fn test_parse_region_rejects_bad_input() {
        assert!(parse_region("1,2,3").is_err());
        assert!(parse_region("1,2,3,4,5").is_err());
        assert!(parse_region("a,2,3,4").unwrap_err().contains("x offset"));
        assert!(parse_region("0,0,-3,4").unwrap_err().contains("width"));
        assert!(parse_region("0,0,0,4").unwrap_err().contains("empty"));
    }

    #[test]
    fn test_parse_layout() {
        assert_eq!(parse_layout("right"), Ok(Layout::Right));
        assert_eq!(parse_layout("Left"), Ok(Layout::Left));
        assert_eq!(parse_layout("column-major"), Ok(Layout::Left));
        assert!(parse_layout("diagonal").is_err());
    }
}
