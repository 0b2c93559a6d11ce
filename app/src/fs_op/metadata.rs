//! Read-only metadata queries: size, modification time and content type.

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use filetime::FileTime;

use super::error::{FilesystemError, Result};

/// Bytes sniffed from the head of a file for content-type detection.
const SNIFF_LEN: u64 = 8192;

/// Size of the file at `path` in bytes.
pub fn file_size(path: &Path) -> Result<u64> {
    let md = fs::metadata(path).map_err(|e| FilesystemError::io("stat", path, e))?;
    Ok(md.len())
}

/// Last modification time of `path` in whole seconds since the Unix epoch.
pub fn modified_unix(path: &Path) -> Result<i64> {
    let md = fs::metadata(path).map_err(|e| FilesystemError::io("stat", path, e))?;
    Ok(FileTime::from_last_modification_time(&md).unix_seconds())
}

/// Guess the MIME type of `path` from its content.
///
/// Known binary signatures win; otherwise empty files are
/// `application/x-empty`, UTF-8 text is `text/plain` and anything else is
/// `application/octet-stream`. Directories report `directory`.
pub fn mime_type(path: &Path) -> Result<String> {
    let md = fs::metadata(path).map_err(|e| FilesystemError::io("stat", path, e))?;
    if md.is_dir() {
        return Ok("directory".to_string());
    }

    let mut head = Vec::with_capacity(SNIFF_LEN as usize);
    File::open(path)
        .and_then(|f| f.take(SNIFF_LEN).read_to_end(&mut head))
        .map_err(|e| FilesystemError::io("read", path, e))?;

    Ok(sniff(&head).to_string())
}

fn sniff(head: &[u8]) -> &'static str {
    if let Some(kind) = infer::get(head) {
        return kind.mime_type();
    }
    if head.is_empty() {
        return "application/x-empty";
    }
    match std::str::from_utf8(head) {
        Ok(_) => "text/plain",
        // The sniff window may cut a multi-byte character in half.
        Err(e) if e.error_len().is_none() => "text/plain",
        Err(_) => "application/octet-stream",
    }
}
