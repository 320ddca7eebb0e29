use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::Path;

/// Replace `path` with `contents` atomically.
///
/// Readers see either the old file or the new one, never a partial write.
/// Parent directories are created as needed.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    file.write_all(contents)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    file.commit()
        .with_context(|| format!("Failed to save {}", path.display()))?;

    Ok(())
}

/// Write `contents` only when they differ from what is on disk.
/// Returns whether the file changed.
pub fn write_if_changed(path: &Path, contents: &str) -> Result<bool> {
    if let Ok(existing) = std::fs::read_to_string(path) {
        if existing == contents {
            return Ok(false);
        }
    }
    write_atomic(path, contents.as_bytes())?;
    Ok(true)
}
