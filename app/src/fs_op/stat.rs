use std::path::Path;

/// Lightweight classification of a filesystem path's kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathType {
    /// The path does not exist or could not be inspected.
    NotFound,
    /// The path exists and is a directory.
    Directory,
    /// The path exists and is a regular file.
    File,
    /// The path exists but is neither a regular file nor a directory
    /// (socket, FIFO, device node, ...).
    Other,
}

impl PathType {
    /// Classify `path`, following symlinks.
    ///
    /// Any error from the underlying `stat` (missing path, permission denied
    /// on a parent, dangling link) classifies as `NotFound`.
    pub fn of<P: AsRef<Path>>(path: P) -> Self {
        match std::fs::metadata(path.as_ref()) {
            Err(_) => PathType::NotFound,
            Ok(md) if md.is_dir() => PathType::Directory,
            Ok(md) if md.is_file() => PathType::File,
            Ok(_) => PathType::Other,
        }
    }
}

/// Return `true` if `path` is a directory.
pub fn is_dir<P: AsRef<Path>>(path: P) -> bool {
    PathType::of(path) == PathType::Directory
}

/// Return `true` if `path` is a regular file.
pub fn is_file<P: AsRef<Path>>(path: P) -> bool {
    PathType::of(path) == PathType::File
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn path_type_nonexistent() {
        let tmp = tempdir().unwrap();
        let p = tmp.path().join("no_such_file_hopefully");
        assert_eq!(PathType::of(&p), PathType::NotFound);
        assert!(!is_file(&p));
        assert!(!is_dir(&p));
    }

    #[test]
    fn path_type_file_and_dir() {
        let tmp = tempdir().unwrap();
        let file = tmp.path().join("a.txt");
        fs::write(&file, b"hello").unwrap();
        assert_eq!(PathType::of(&file), PathType::File);
        assert!(is_file(&file));
        assert!(!is_dir(&file));

        let dir = tmp.path().join("subdir");
        fs::create_dir(&dir).unwrap();
        assert_eq!(PathType::of(&dir), PathType::Directory);
        assert!(is_dir(&dir));
        assert!(!is_file(&dir));
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_is_not_found() {
        let tmp = tempdir().unwrap();
        let link = tmp.path().join("dangling");
        std::os::unix::fs::symlink(tmp.path().join("gone"), &link).unwrap();
        assert_eq!(PathType::of(&link), PathType::NotFound);
    }
}
