// ddc-core/src/infrastructure/fs.rs

use crate::infrastructure::error::InfrastructureError;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Writes `content` to `path` only if `path` does not exist yet.
///
/// The content goes to a temporary file in the same directory first and is
/// then linked into place without clobbering, so a reader never sees a
/// half-written check and an existing file is never replaced.
/// Returns `false` when the file already existed.
pub fn create_new_atomic<P: AsRef<Path>, C: AsRef<[u8]>>(
    path: P,
    content: C,
) -> Result<bool, InfrastructureError> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(false);
    }

    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)?;

    let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
    temp_file.write_all(content.as_ref())?;

    match temp_file.persist_noclobber(path) {
        Ok(_) => Ok(true),
        Err(e) if e.error.kind() == std::io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(InfrastructureError::Io(e.error)),
    }
}
