use std::path::{Path, PathBuf};

use finboard_core::fixture::RecordStore;

/// Load and validate the record store from a fixture path.
pub fn read_store(path: &str) -> Result<RecordStore, Box<dyn std::error::Error>> {
    let resolved = resolve_path(path)?;
    Ok(RecordStore::from_file(&resolved)?)
}

/// Resolve a possibly-relative path and check it points at a file.
fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let resolved = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !resolved.exists() {
        return Err(format!("File not found: {}", resolved.display()).into());
    }

    if !resolved.is_file() {
        return Err(format!("Not a file: {}", resolved.display()).into());
    }

    Ok(resolved)
}
