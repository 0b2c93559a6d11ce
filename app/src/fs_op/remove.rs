use std::fs;
use std::io;
use std::path::Path;

use walkdir::WalkDir;

use super::error::{FilesystemError, Result};
use super::stat::is_dir;

/// Unlink a single file. Missing paths are an error.
pub fn remove_file(path: &Path) -> Result<()> {
    tracing::debug!(path = %path.display(), "unlink");
    fs::remove_file(path).map_err(|e| FilesystemError::io("unlink", path, e))
}

/// Remove an empty directory.
pub fn remove_empty_dir(path: &Path) -> Result<()> {
    fs::remove_dir(path).map_err(|e| FilesystemError::io("rmdir", path, e))
}

/// Remove the directory at `path` together with everything below it.
///
/// Entries are visited children-first, so each directory is already empty
/// by the time `rmdir` reaches it. Symlinks are unlinked, never followed.
/// The first failure aborts the walk and whatever was removed so far stays
/// removed.
pub fn remove_dir_tree(path: &Path) -> Result<()> {
    if !is_dir(path) {
        return Err(FilesystemError::new("The specified path is not a directory."));
    }
    tracing::debug!(path = %path.display(), "rm -r");

    for entry in WalkDir::new(path)
        .min_depth(1)
        .follow_links(false)
        .contents_first(true)
    {
        let entry = entry.map_err(|e| {
            let at = e.path().unwrap_or(path).to_path_buf();
            let ioe = e.into_io_error().unwrap_or_else(|| io::Error::other("filesystem loop"));
            FilesystemError::io("readdir", &at, ioe)
        })?;
        tracing::trace!(path = %entry.path().display(), "removing");
        if entry.file_type().is_dir() {
            remove_empty_dir(entry.path())?;
        } else {
            remove_file(entry.path())?;
        }
    }

    remove_empty_dir(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn remove_nested_tree() {
        let td = tempdir().expect("create temp dir");
        let root = td.path().join("root");
        fs::create_dir_all(root.join("a/b/c")).expect("create tree");
        fs::create_dir_all(root.join("empty")).expect("create empty");
        fs::write(root.join("top.txt"), b"1").expect("write");
        fs::write(root.join("a/mid.txt"), b"2").expect("write");
        fs::write(root.join("a/b/c/deep.txt"), b"3").expect("write");

        remove_dir_tree(&root).expect("remove tree");
        assert!(!root.exists(), "root should be removed");
        assert!(td.path().exists(), "parent must survive");
    }

    #[test]
    fn remove_tree_rejects_files_and_missing_paths() {
        let td = tempdir().expect("tempdir");
        let f = td.path().join("file.txt");
        fs::write(&f, b"x").expect("write");

        let err = remove_dir_tree(&f).unwrap_err();
        assert_eq!(err.message(), "The specified path is not a directory.");
        assert!(f.exists());

        assert!(remove_dir_tree(&td.path().join("nope")).is_err());
    }

    #[test]
    fn remove_missing_file_is_an_error() {
        let td = tempdir().expect("tempdir");
        let err = remove_file(&td.path().join("nope")).unwrap_err();
        assert!(err.message().starts_with("unlink("));
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directory_is_unlinked_not_followed() {
        let td = tempdir().expect("tempdir");
        let outside = td.path().join("outside");
        fs::create_dir(&outside).expect("mkdir");
        fs::write(outside.join("keep.txt"), b"keep").expect("write");

        let root = td.path().join("root");
        fs::create_dir(&root).expect("mkdir");
        std::os::unix::fs::symlink(&outside, root.join("link")).expect("symlink");

        remove_dir_tree(&root).expect("remove tree");
        assert!(!root.exists());
        assert!(outside.join("keep.txt").exists(), "link target must be untouched");
    }
}
