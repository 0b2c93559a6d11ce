//! Filesystem primitives used by [`crate::LocalFilesystem`].
//!
//! Each submodule wraps one family of OS calls and reports failures as
//! [`error::FilesystemError`]. The helpers take absolute paths; resolving
//! relative paths against a root is the facade's job.

pub mod create;
pub mod error;
pub mod files;
pub mod glob;
pub mod metadata;
pub mod options;
pub mod path;
pub mod permissions;
pub mod remove;
pub mod stat;
