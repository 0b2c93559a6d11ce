//! Path-scoped access to the local filesystem.
//!
//! [`LocalFilesystem`] binds a root directory and a pair of default modes,
//! resolves every relative path against that root and wraps each OS call so
//! that failures come back as a single [`FilesystemError`].
//!
//! ```no_run
//! use localfs::{LocalFilesystem, WriteOptions};
//!
//! let fs = LocalFilesystem::new("/srv/data");
//! fs.write_to_file("reports/today.txt", "ok", &WriteOptions::default())?;
//! assert!(fs.file_exists("reports/today.txt"));
//! # Ok::<(), localfs::FilesystemError>(())
//! ```

pub mod config;
pub mod filesystem;
pub mod fs_op;
pub mod logging;

pub use crate::config::FilesystemConfig;
pub use crate::filesystem::LocalFilesystem;
pub use crate::fs_op::error::{FilesystemError, Result};
pub use crate::fs_op::files::WriteMode;
pub use crate::fs_op::glob::GlobFlags;
pub use crate::fs_op::options::{
    DefaultPermissions, TransferOptions, WriteOptions, DEFAULT_DIRECTORY_PERMISSIONS,
    DEFAULT_FILE_PERMISSIONS,
};
pub use crate::fs_op::path::{mode_to_octal, normalize_path};
