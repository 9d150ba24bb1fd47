use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use imgio_core::{FileFormat, ImageIo};
use serde::Serialize;

/// What `imgio info` reports for one file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileInfo {
    pub file: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<FileFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Classify `path` and query its dimensions, keeping any failure as text.
pub fn inspect(io: &ImageIo, path: &Path) -> FileInfo {
    let format = io.classify(path);
    let (width, height, error) = match io.dimensions(path) {
        Ok((w, h)) => (Some(w), Some(h), None),
        Err(err) => (None, None, Some(err.to_string())),
    };
    FileInfo {
        file: path.to_path_buf(),
        format,
        width,
        height,
        error,
    }
}

pub fn cmd_info(io: &ImageIo, files: &[PathBuf], json: bool) -> Result<()> {
    let infos: Vec<FileInfo> = files.iter().map(|f| inspect(io, f)).collect();

    if json {
        let out = serde_json::to_string_pretty(&infos).context("Failed to encode JSON")?;
        println!("{}", out);
    } else {
        for info in &infos {
            match (&info.format, info.width, info.height, &info.error) {
                (Some(format), Some(w), Some(h), None) => {
                    println!("{}: {} {}x{}", info.file.display(), format, w, h)
                }
                (_, _, _, Some(err)) => println!("{}: error: {}", info.file.display(), err),
                _ => println!("{}: unknown", info.file.display()),
            }
        }
    }

    let failed = infos.iter().filter(|i| i.error.is_some()).count();
    if failed > 0 {
        bail!("{} of {} file(s) could not be inspected", failed, infos.len());
    }
    Ok(())
}
