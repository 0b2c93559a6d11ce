use std::fs;
use std::io;
use std::path::Path;

use super::error::{FilesystemError, Result};
use super::permissions::set_mode;
use super::stat::is_dir;

/// Create `path` and every missing ancestor, applying `mode` to each
/// directory this call creates.
///
/// The mode is re-applied with `chmod` after each `mkdir` so the result does
/// not depend on the process umask. Ancestors that already exist are left
/// untouched. Fails if `path` itself already exists.
pub fn create_dir_with_mode(path: &Path, mode: u32) -> Result<()> {
    let mut missing = Vec::new();
    let mut cur = Some(path);
    while let Some(p) = cur {
        if p.as_os_str().is_empty() || fs::symlink_metadata(p).is_ok() {
            break;
        }
        missing.push(p);
        cur = p.parent();
    }

    if missing.is_empty() {
        return Err(FilesystemError::io(
            "mkdir",
            path,
            io::Error::new(io::ErrorKind::AlreadyExists, "File exists"),
        ));
    }

    tracing::debug!(path = %path.display(), mode = %format!("{:o}", mode), created = missing.len(), "mkdir -p");

    // Outermost first.
    for dir in missing.into_iter().rev() {
        let mut builder = fs::DirBuilder::new();
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(mode);
        }
        match builder.create(dir) {
            Ok(()) => {}
            // Lost a race on an ancestor; another process made it for us.
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists && dir != path && is_dir(dir) => {
                continue;
            }
            Err(e) => {
                tracing::debug!(path = %dir.display(), error = %e, "mkdir failed");
                return Err(FilesystemError::io("mkdir", dir, e));
            }
        }
        set_mode(dir, mode)?;
    }
    Ok(())
}

/// Make sure the directory that will hold `file_path` exists.
///
/// No-op when the parent is already a directory; otherwise it is created
/// (with ancestors) using `mode`.
pub fn ensure_parent_dir(file_path: &Path, mode: u32) -> Result<()> {
    let parent = match file_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => return Ok(()),
    };
    if is_dir(parent) {
        return Ok(());
    }
    create_dir_with_mode(parent, mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn creates_nested_directories() {
        let td = tempdir().unwrap();
        let dir = td.path().join("a/b/c");
        create_dir_with_mode(&dir, 0o755).unwrap();
        assert!(dir.is_dir());
        assert!(td.path().join("a/b").is_dir());
    }

    #[test]
    fn existing_directory_is_an_error() {
        let td = tempdir().unwrap();
        let dir = td.path().join("once");
        create_dir_with_mode(&dir, 0o755).unwrap();
        let err = create_dir_with_mode(&dir, 0o755).unwrap_err();
        assert!(err.message().starts_with("mkdir("), "unexpected: {}", err);
    }

    #[test]
    fn existing_file_blocks_creation() {
        let td = tempdir().unwrap();
        let f = td.path().join("f");
        fs::write(&f, b"x").unwrap();
        assert!(create_dir_with_mode(&f, 0o755).is_err());
        assert!(create_dir_with_mode(&f.join("child"), 0o755).is_err());
    }

    #[test]
    fn ensure_parent_is_noop_when_present() {
        let td = tempdir().unwrap();
        let file = td.path().join("x.txt");
        ensure_parent_dir(&file, 0o700).unwrap();
        assert!(td.path().is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn every_created_level_gets_the_mode() {
        use crate::fs_op::permissions::get_mode;
        use crate::fs_op::path::mode_to_octal;

        let td = tempdir().unwrap();
        let file = td.path().join("p/q/file.txt");
        ensure_parent_dir(&file, 0o777).unwrap();
        assert_eq!(mode_to_octal(get_mode(&td.path().join("p")).unwrap()), "0777");
        assert_eq!(mode_to_octal(get_mode(&td.path().join("p/q")).unwrap()), "0777");
    }
}
