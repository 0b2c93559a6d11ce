//! Permission inspection and modification.
//!
//! Modes are plain `u32` values in the Unix layout. On other platforms only
//! the read-only bit is observable, so the mode is synthesized from it and
//! `set_mode` maps "no write bit at all" to read-only.

use std::fs;
use std::path::Path;

use super::error::{FilesystemError, Result};

/// Return the mode of `path` as reported by `stat`, type bits included.
pub fn get_mode(path: &Path) -> Result<u32> {
    let md = fs::metadata(path).map_err(|e| FilesystemError::io("stat", path, e))?;
    Ok(mode_of(&md))
}

/// Apply `mode` to an existing file or directory.
pub fn set_mode(path: &Path, mode: u32) -> Result<()> {
    tracing::debug!(path = %path.display(), mode = %format!("{:o}", mode), "chmod");
    fs::set_permissions(path, permissions_from_mode(path, mode)?)
        .map_err(|e| FilesystemError::io("chmod", path, e))
}

#[cfg(unix)]
fn mode_of(md: &fs::Metadata) -> u32 {
    use std::os::unix::fs::MetadataExt;
    md.mode()
}

#[cfg(not(unix))]
fn mode_of(md: &fs::Metadata) -> u32 {
    let perm = if md.permissions().readonly() { 0o444 } else { 0o666 };
    if md.is_dir() {
        0o040000 | perm | 0o111
    } else {
        0o100000 | perm
    }
}

#[cfg(unix)]
fn permissions_from_mode(_path: &Path, mode: u32) -> Result<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Ok(fs::Permissions::from_mode(mode & 0o7777))
}

#[cfg(not(unix))]
fn permissions_from_mode(path: &Path, mode: u32) -> Result<fs::Permissions> {
    let mut perms = fs::metadata(path)
        .map_err(|e| FilesystemError::io("chmod", path, e))?
        .permissions();
    perms.set_readonly(mode & 0o222 == 0);
    Ok(perms)
}
