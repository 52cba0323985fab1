//! File access for the bump pipeline.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::BumpError;

pub fn read_file(path: &Path) -> Result<String, BumpError> {
    std::fs::read_to_string(path).map_err(|e| BumpError::ReadFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Replace `path` with `content` atomically.
///
/// Writes to a temp file in the same directory, then renames it over the target,
/// so a failed write never leaves a truncated file behind.
pub fn write_file(path: &Path, content: &str) -> Result<(), BumpError> {
    let write_failed = |e: std::io::Error| BumpError::WriteFailed {
        path: path.to_path_buf(),
        source: e,
    };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_failed)?;
    tmp.write_all(content.as_bytes()).map_err(write_failed)?;
    tmp.flush().map_err(write_failed)?;

    if let Ok(metadata) = std::fs::metadata(path) {
        tmp.as_file()
            .set_permissions(metadata.permissions())
            .map_err(write_failed)?;
    }

    tmp.persist(path).map_err(|e| write_failed(e.error))?;

    Ok(())
}
