//! Single-file primitives: open/write/read/copy/rename.
//!
//! Each helper maps to one OS call and turns its `io::Error` into a
//! `FilesystemError` naming that call.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, Read, Write};
use std::path::Path;

use super::error::{FilesystemError, Result};

/// How an existing file is treated when it is opened for writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Create or truncate.
    #[default]
    Truncate,
    /// Create or append to the end.
    Append,
    /// Create; fail if the file already exists.
    CreateNew,
}

impl WriteMode {
    fn open_options(self) -> OpenOptions {
        let mut opts = OpenOptions::new();
        opts.write(true);
        match self {
            WriteMode::Truncate => opts.create(true).truncate(true),
            WriteMode::Append => opts.create(true).append(true),
            WriteMode::CreateNew => opts.create_new(true),
        };
        opts
    }
}

fn open_for_write(path: &Path, mode: WriteMode) -> Result<File> {
    mode.open_options()
        .open(path)
        .map_err(|e| FilesystemError::io("open", path, e))
}

/// Write `data` to `path`, returning the number of bytes written.
pub fn write_bytes(path: &Path, data: &[u8], mode: WriteMode) -> Result<u64> {
    tracing::debug!(path = %path.display(), bytes = data.len(), ?mode, "write");
    let mut f = open_for_write(path, mode)?;
    f.write_all(data)
        .and_then(|_| f.flush())
        .map_err(|e| FilesystemError::io("write", path, e))?;
    Ok(data.len() as u64)
}

/// Drain `reader` into `path`, returning the number of bytes written.
///
/// A read error from the source is reported against the destination path,
/// since that is the only path this helper knows about.
pub fn write_from_reader<R: Read>(path: &Path, reader: &mut R, mode: WriteMode) -> Result<u64> {
    tracing::debug!(path = %path.display(), ?mode, "write stream");
    let mut f = open_for_write(path, mode)?;
    let n = io::copy(reader, &mut f).map_err(|e| FilesystemError::io("write", path, e))?;
    f.flush().map_err(|e| FilesystemError::io("write", path, e))?;
    Ok(n)
}

/// Read the whole file.
pub fn read_all(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| FilesystemError::io("read", path, e))
}

/// Read the whole file as UTF-8.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| FilesystemError::io("read", path, e))
}

/// Open `path` for buffered binary reading. The caller owns the handle.
pub fn open_stream(path: &Path) -> Result<BufReader<File>> {
    let f = File::open(path).map_err(|e| FilesystemError::io("open", path, e))?;
    Ok(BufReader::new(f))
}

/// Copy the contents of `src` to `dst`, returning the bytes copied.
pub fn copy_file(src: &Path, dst: &Path) -> Result<u64> {
    tracing::debug!(src = %src.display(), dst = %dst.display(), "copy");
    fs::copy(src, dst).map_err(|e| FilesystemError::io2("copy", src, dst, e))
}

/// Rename `src` to `dst`. Cross-device moves fail as the OS reports them.
pub fn rename_file(src: &Path, dst: &Path) -> Result<()> {
    tracing::debug!(src = %src.display(), dst = %dst.display(), "rename");
    fs::rename(src, dst).map_err(|e| FilesystemError::io2("rename", src, dst, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    #[test]
    fn truncate_append_and_create_new() {
        let td = tempdir().unwrap();
        let f = td.path().join("f.txt");

        write_bytes(&f, b"hello", WriteMode::Truncate).unwrap();
        write_bytes(&f, b" world", WriteMode::Append).unwrap();
        assert_eq!(read_to_string(&f).unwrap(), "hello world");

        write_bytes(&f, b"x", WriteMode::Truncate).unwrap();
        assert_eq!(read_all(&f).unwrap(), b"x");

        assert!(write_bytes(&f, b"y", WriteMode::CreateNew).is_err());
        let fresh = td.path().join("fresh.txt");
        write_bytes(&fresh, b"y", WriteMode::CreateNew).unwrap();
        assert_eq!(read_all(&fresh).unwrap(), b"y");
    }

    #[test]
    fn write_from_reader_copies_everything() {
        let td = tempdir().unwrap();
        let f = td.path().join("stream.bin");
        let data: Vec<u8> = (0..=255u8).cycle().take(200_000).collect();
        let n = write_from_reader(&f, &mut Cursor::new(&data), WriteMode::Truncate).unwrap();
        assert_eq!(n, data.len() as u64);
        assert_eq!(read_all(&f).unwrap(), data);
    }

    #[test]
    fn failing_reader_is_reported() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::other("source went away"))
            }
        }
        let td = tempdir().unwrap();
        let err = write_from_reader(&td.path().join("x"), &mut Broken, WriteMode::Truncate).unwrap_err();
        assert!(err.to_string().contains("source went away"));
    }

    #[test]
    fn missing_sources_error() {
        let td = tempdir().unwrap();
        let missing = td.path().join("missing");
        assert!(read_all(&missing).is_err());
        assert!(open_stream(&missing).is_err());
        assert!(copy_file(&missing, &td.path().join("c")).is_err());
        assert!(rename_file(&missing, &td.path().join("r")).is_err());
    }

    #[test]
    fn stream_reads_back_content() {
        let td = tempdir().unwrap();
        let f = td.path().join("s.txt");
        fs::write(&f, b"streamed").unwrap();
        let mut s = String::new();
        open_stream(&f).unwrap().read_to_string(&mut s).unwrap();
        assert_eq!(s, "streamed");
    }
}
