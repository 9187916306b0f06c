//! Static asset copying.

use std::fs;
use std::path::Path;

use crate::error::SiteError;

/// Replaces `dst` with a recursive copy of `src`.
///
/// Returns `Ok(false)` without touching `dst` when `src` does not exist.
///
/// # Errors
///
/// Returns [`SiteError::Io`] if any file or directory operation fails.
pub fn copy_static_dir(src: &Path, dst: &Path) -> Result<bool, SiteError> {
    if !src.is_dir() {
        return Ok(false);
    }
    if dst.exists() {
        fs::remove_dir_all(dst).map_err(SiteError::io(dst))?;
    }
    copy_tree(src, dst)?;
    Ok(true)
}

fn copy_tree(src: &Path, dst: &Path) -> Result<(), SiteError> {
    fs::create_dir_all(dst).map_err(SiteError::io(dst))?;
    for entry in fs::read_dir(src).map_err(SiteError::io(src))? {
        let entry = entry.map_err(SiteError::io(src))?;
        let from = entry.path();
        let to = dst.join(entry.file_name());
        let file_type = entry.file_type().map_err(SiteError::io(&from))?;
        if file_type.is_dir() {
            copy_tree(&from, &to)?;
        } else {
            fs::copy(&from, &to).map_err(SiteError::io(&to))?;
        }
    }
    Ok(())
}
