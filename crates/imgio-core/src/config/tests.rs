//! Tests for config loading

use super::*;
use tempfile::tempdir;

#[test]
fn test_defaults() {
    let config = ImageIoConfig::default();
    assert!(config.formats.jpeg && config.formats.png && config.formats.netcdf);
    assert_eq!(config.jpeg.quality, 90);
    assert_eq!(config.tiff.max_decode_bytes, 1024 * 1024 * 1024);
    assert_eq!(config.netcdf.variable, "intensities");
}

#[test]
fn test_parse_partial_yaml() {
    let yaml = "formats:\n  png: false\njpeg:\n  quality: 75\n";
    let (config, notes) = parse_config(yaml).unwrap();

    assert!(!config.formats.png);
    assert!(config.formats.jpeg);
    assert_eq!(config.jpeg.quality, 75);
    assert_eq!(config.netcdf.variable, "intensities");
    assert!(notes.is_empty());
}

#[test]
fn test_parse_empty_document() {
    let (config, notes) = parse_config("  \n").unwrap();
    assert_eq!(config, ImageIoConfig::default());
    assert!(notes.is_empty());
}

#[test]
fn test_sanitize_out_of_range() {
    let yaml = "jpeg:\n  quality: 0\ntiff:\n  max_decode_bytes: 0\nnetcdf:\n  variable: \"\"\n";
    let (config, notes) = parse_config(yaml).unwrap();

    assert_eq!(config.jpeg.quality, 1);
    assert_eq!(config.tiff.max_decode_bytes, 1024 * 1024 * 1024);
    assert_eq!(config.netcdf.variable, "intensities");
    assert_eq!(notes.len(), 3);
}

#[test]
fn test_load_explicit_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("imgio.yml");
    fs::write(&path, "formats:\n  jpeg: false\n").unwrap();

    let handle = load_from_candidates(vec![path.clone()]);
    assert!(!handle.config.formats.jpeg);
    assert!(handle.source.is_some());
    assert!(handle.warnings.is_empty());
}

#[test]
fn test_load_malformed_falls_back() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("imgio.yml");
    fs::write(&path, "formats: [not, a, map]\n").unwrap();

    let handle = load_from_candidates(vec![path]);
    assert_eq!(handle.config, ImageIoConfig::default());
    assert!(handle.source.is_none());
    assert!(handle.warnings[0].contains("Failed to parse config"));
    assert!(handle.warnings.last().unwrap().contains("built-in defaults"));
}

#[test]
fn test_missing_candidates_use_defaults() {
    let handle = load_from_candidates(vec![PathBuf::from("/nonexistent/imgio.yml")]);
    assert_eq!(handle.config, ImageIoConfig::default());
    assert_eq!(handle.warnings.len(), 1);
}

#[test]
fn test_candidates_start_with_custom_path() {
    let custom = Path::new("/tmp/custom-imgio.yml");
    let candidates = config_candidates(Some(custom));
    assert_eq!(candidates[0], custom);
}
