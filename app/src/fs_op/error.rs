use std::io;
use std::path::Path;
use thiserror::Error;

/// The single error produced by every fallible filesystem operation.
///
/// The message is assembled where the failure happens and normally names the
/// failing primitive, the path it was given and the OS description, e.g.
/// `mkdir(/srv/data/a): File exists (os error 17)`. There is no sub-typing by
/// cause; the underlying `io::Error` (when there is one) is available through
/// `std::error::Error::source`.
#[derive(Error, Debug)]
#[error("Local filesystem error: {message}")]
pub struct FilesystemError {
    message: String,
    #[source]
    source: Option<io::Error>,
}

/// Convenience alias used throughout `fs_op`.
pub type Result<T> = std::result::Result<T, FilesystemError>;

impl FilesystemError {
    /// Error with a plain message and no OS cause.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            "unknown error".to_string()
        } else {
            message
        };
        FilesystemError { message, source: None }
    }

    /// Wrap an OS error raised by primitive `op` while working on `path`.
    pub fn io(op: &str, path: &Path, err: io::Error) -> Self {
        FilesystemError {
            message: format!("{}({}): {}", op, path.display(), err),
            source: Some(err),
        }
    }

    /// Same as [`FilesystemError::io`] for two-path primitives (copy, rename).
    pub fn io2(op: &str, from: &Path, to: &Path, err: io::Error) -> Self {
        FilesystemError {
            message: format!("{}({},{}): {}", op, from.display(), to.display(), err),
            source: Some(err),
        }
    }

    /// Message without the `Local filesystem error:` prefix.
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn display_is_prefixed() {
        let e = FilesystemError::new("boom");
        assert_eq!(e.to_string(), "Local filesystem error: boom");
        assert!(e.source().is_none());
    }

    #[test]
    fn empty_message_becomes_unknown_error() {
        let e = FilesystemError::new("  ");
        assert_eq!(e.message(), "unknown error");
    }

    #[test]
    fn io_error_keeps_source_and_path() {
        let err = io::Error::new(io::ErrorKind::NotFound, "No such file or directory");
        let e = FilesystemError::io("unlink", Path::new("/tmp/x"), err);
        assert_eq!(
            e.to_string(),
            "Local filesystem error: unlink(/tmp/x): No such file or directory"
        );
        assert!(e.source().is_some());
    }
}
