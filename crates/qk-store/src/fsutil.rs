//! JSON file helpers shared by the repositories.

use std::fs;
use std::io::Write;
use std::path::Path;

use log::{debug, warn};
use serde::Serialize;
use serde_json::Value;
use tempfile::NamedTempFile;

use crate::error::StoreResult;

/// Read a JSON file. A missing or blank file reads as `None`.
///
/// Bytes that are not valid UTF-8 surface as a JSON error, so callers
/// treat them like any other corrupt file.
pub(crate) fn read_json(path: &Path) -> StoreResult<Option<Value>> {
    let content = match fs::read(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    if content.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    Ok(Some(serde_json::from_slice(&content)?))
}

/// Write pretty JSON to `path` through a temporary file in the same
/// directory, then rename it into place.
pub(crate) fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, data: &T) -> StoreResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    serde_json::to_writer_pretty(&mut tmp, data)?;
    tmp.write_all(b"\n")?;
    tmp.flush()?;
    if let Err(e) = tmp.as_file().sync_all() {
        warn!("fsync of {} failed: {e}", path.display());
    }
    tmp.persist(path).map_err(|e| e.error)?;

    debug!("wrote {}", path.display());
    Ok(())
}
