//! `LocalFilesystem`: every operation scoped to one root directory.
//!
//! Paths handed to the facade are always relative to its `location`; they
//! are joined onto it and separator-normalized before any OS call. The
//! facade holds no state besides its root and default modes, so it is cheap
//! to clone and safe to share between threads. It performs no locking of
//! its own.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use crate::config::FilesystemConfig;
use crate::fs_op::error::{FilesystemError, Result};
use crate::fs_op::glob::{self, GlobFlags};
use crate::fs_op::options::{
    DefaultPermissions, PermissionOverrides, TransferOptions, WriteOptions,
    DEFAULT_DIRECTORY_PERMISSIONS, DEFAULT_FILE_PERMISSIONS,
};
use crate::fs_op::{create, files, metadata, path, permissions, remove, stat};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFilesystem {
    location: PathBuf,
    default_directory_permissions: u32,
    default_file_permissions: u32,
}

impl LocalFilesystem {
    /// Facade rooted at `location` with the stock `0755`/`0644` defaults.
    pub fn new(location: impl Into<PathBuf>) -> Self {
        Self::with_permissions(location, DefaultPermissions::default())
    }

    /// Facade rooted at `location`; unset entries of `defaults` fall back to
    /// `0755` for directories and `0644` for files.
    pub fn with_permissions(location: impl Into<PathBuf>, defaults: DefaultPermissions) -> Self {
        LocalFilesystem {
            location: location.into(),
            default_directory_permissions: defaults.directory.unwrap_or(DEFAULT_DIRECTORY_PERMISSIONS),
            default_file_permissions: defaults.file.unwrap_or(DEFAULT_FILE_PERMISSIONS),
        }
    }

    pub fn from_config(config: &FilesystemConfig) -> Self {
        Self::with_permissions(config.location.clone(), config.default_permissions)
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    pub fn default_directory_permissions(&self) -> u32 {
        self.default_directory_permissions
    }

    pub fn default_file_permissions(&self) -> u32 {
        self.default_file_permissions
    }

    /// Absolute, normalized form of `relative` under this facade's root.
    ///
    /// ```
    /// use localfs::LocalFilesystem;
    /// let fs = LocalFilesystem::new("/srv/data");
    /// # #[cfg(unix)]
    /// assert_eq!(fs.resolve_path("a\\b//c.txt"), std::path::PathBuf::from("/srv/data/a/b/c.txt"));
    /// ```
    pub fn resolve_path(&self, relative: &str) -> PathBuf {
        path::resolve_against(&self.location, relative)
    }

    pub fn file_exists(&self, relative: &str) -> bool {
        stat::is_file(self.resolve_path(relative))
    }

    pub fn directory_exists(&self, relative: &str) -> bool {
        stat::is_dir(self.resolve_path(relative))
    }

    /// Mode of `relative` including file-type bits. Use
    /// [`crate::mode_to_octal`] to render only the permission part.
    pub fn get_permissions(&self, relative: &str) -> Result<u32> {
        permissions::get_mode(&self.resolve_path(relative))
    }

    pub fn set_permissions(&self, relative: &str, mode: u32) -> Result<()> {
        permissions::set_mode(&self.resolve_path(relative), mode)
    }

    /// Expand a glob `pattern` relative to the root. Results are absolute.
    ///
    /// The pattern goes through the same join-then-normalize step as
    /// [`LocalFilesystem::resolve_path`]; only the part after the root is
    /// expanded.
    pub fn list_pathnames(&self, pattern: &str, flags: GlobFlags) -> Result<Vec<PathBuf>> {
        let base = path::collapse_separators(self.location.to_string_lossy().trim_start());
        let full = self.resolve_path(pattern);
        let full = full.to_string_lossy();
        let relative = full.strip_prefix(base.as_str()).unwrap_or(full.as_ref());
        glob::expand(Path::new(&base), relative, flags)
    }

    /// Write `content` to `relative`, creating missing parent directories.
    ///
    /// The resolved file mode is applied after every successful write, even
    /// when the file already existed.
    pub fn write_to_file(
        &self,
        relative: &str,
        content: impl AsRef<[u8]>,
        options: &WriteOptions,
    ) -> Result<()> {
        let target = self.prepare_target(relative, options)?;
        files::write_bytes(&target, content.as_ref(), options.mode)?;
        permissions::set_mode(&target, self.resolve_file_mode(options))
    }

    /// Streaming variant of [`LocalFilesystem::write_to_file`]: drains
    /// `reader` into the file. Returns the number of bytes written.
    pub fn write_stream_to_file<R: Read>(
        &self,
        relative: &str,
        mut reader: R,
        options: &WriteOptions,
    ) -> Result<u64> {
        let target = self.prepare_target(relative, options)?;
        let written = files::write_from_reader(&target, &mut reader, options.mode)?;
        permissions::set_mode(&target, self.resolve_file_mode(options))?;
        Ok(written)
    }

    pub fn read_file(&self, relative: &str) -> Result<Vec<u8>> {
        files::read_all(&self.resolve_path(relative))
    }

    pub fn read_file_to_string(&self, relative: &str) -> Result<String> {
        files::read_to_string(&self.resolve_path(relative))
    }

    /// Open `relative` for buffered reading. The handle is closed when the
    /// caller drops it.
    pub fn read_file_as_stream(&self, relative: &str) -> Result<BufReader<File>> {
        files::open_stream(&self.resolve_path(relative))
    }

    pub fn get_file_size(&self, relative: &str) -> Result<u64> {
        metadata::file_size(&self.resolve_path(relative))
    }

    pub fn get_file_mime_type(&self, relative: &str) -> Result<String> {
        metadata::mime_type(&self.resolve_path(relative))
    }

    /// Modification time in seconds since the Unix epoch.
    pub fn get_file_last_modified_time(&self, relative: &str) -> Result<i64> {
        metadata::modified_unix(&self.resolve_path(relative))
    }

    pub fn delete_file(&self, relative: &str) -> Result<()> {
        remove::remove_file(&self.resolve_path(relative))
    }

    /// Copy `old` to `new`, creating `new`'s parent directory if needed and
    /// then applying the resolved file mode to `new`.
    pub fn copy_file(&self, old: &str, new: &str, options: &TransferOptions) -> Result<()> {
        let target = self.prepare_target(new, options)?;
        files::copy_file(&self.resolve_path(old), &target)?;
        permissions::set_mode(&target, self.resolve_file_mode(options))
    }

    /// Rename `old` to `new` with the same parent-creation and mode handling
    /// as [`LocalFilesystem::copy_file`].
    pub fn move_file(&self, old: &str, new: &str, options: &TransferOptions) -> Result<()> {
        let target = self.prepare_target(new, options)?;
        files::rename_file(&self.resolve_path(old), &target)?;
        permissions::set_mode(&target, self.resolve_file_mode(options))
    }

    /// Create `relative` and any missing ancestors. Fails if it already
    /// exists.
    pub fn create_directory(&self, relative: &str, mode: Option<u32>) -> Result<()> {
        create::create_dir_with_mode(
            &self.resolve_path(relative),
            mode.unwrap_or(self.default_directory_permissions),
        )
    }

    /// Remove the directory `relative` and everything beneath it.
    pub fn delete_directory(&self, relative: &str) -> Result<()> {
        remove::remove_dir_tree(&self.resolve_path(relative)).inspect_err(|e| {
            tracing::debug!(path = relative, error = %e, "delete_directory failed");
        })
    }

    fn prepare_target(&self, relative: &str, options: &impl PermissionOverrides) -> Result<PathBuf> {
        let target = self.resolve_path(relative);
        create::ensure_parent_dir(&target, self.resolve_directory_mode(options))?;
        Ok(target)
    }

    fn resolve_directory_mode(&self, options: &impl PermissionOverrides) -> u32 {
        options
            .directory_override()
            .unwrap_or(self.default_directory_permissions)
    }

    fn resolve_file_mode(&self, options: &impl PermissionOverrides) -> u32 {
        options.file_override().unwrap_or(self.default_file_permissions)
    }
}

impl TryFrom<&Path> for LocalFilesystem {
    type Error = FilesystemError;

    /// Load a TOML config file and build the facade it describes.
    fn try_from(config_path: &Path) -> Result<Self> {
        FilesystemConfig::load(config_path).map(|c| LocalFilesystem::from_config(&c))
    }
}
