use serde::{Deserialize, Serialize};

use super::files::WriteMode;

/// Mode applied to directories created without an explicit override.
pub const DEFAULT_DIRECTORY_PERMISSIONS: u32 = 0o755;
/// Mode applied to written/copied/moved files without an explicit override.
pub const DEFAULT_FILE_PERMISSIONS: u32 = 0o644;

/// Optional overrides for the facade-wide default modes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultPermissions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<u32>,
}

impl DefaultPermissions {
    pub fn directory(mut self, mode: u32) -> Self {
        self.directory = Some(mode);
        self
    }

    pub fn file(mut self, mode: u32) -> Self {
        self.file = Some(mode);
        self
    }
}

/// Per-call options for `write_to_file` / `write_stream_to_file`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Mode for any parent directories the write has to create.
    pub directory_permissions: Option<u32>,
    /// Mode applied to the file after every successful write.
    pub file_permissions: Option<u32>,
    pub mode: WriteMode,
}

impl WriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn directory_permissions(mut self, mode: u32) -> Self {
        self.directory_permissions = Some(mode);
        self
    }

    pub fn file_permissions(mut self, mode: u32) -> Self {
        self.file_permissions = Some(mode);
        self
    }

    pub fn append(mut self) -> Self {
        self.mode = WriteMode::Append;
        self
    }

    pub fn create_new(mut self) -> Self {
        self.mode = WriteMode::CreateNew;
        self
    }
}

/// Per-call options for `copy_file` / `move_file`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransferOptions {
    pub directory_permissions: Option<u32>,
    pub file_permissions: Option<u32>,
}

impl TransferOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn directory_permissions(mut self, mode: u32) -> Self {
        self.directory_permissions = Some(mode);
        self
    }

    pub fn file_permissions(mut self, mode: u32) -> Self {
        self.file_permissions = Some(mode);
        self
    }
}

/// Anything carrying optional directory/file mode overrides.
pub(crate) trait PermissionOverrides {
    fn directory_override(&self) -> Option<u32>;
    fn file_override(&self) -> Option<u32>;
}

impl PermissionOverrides for WriteOptions {
    fn directory_override(&self) -> Option<u32> {
        self.directory_permissions
    }
    fn file_override(&self) -> Option<u32> {
        self.file_permissions
    }
}

impl PermissionOverrides for TransferOptions {
    fn directory_override(&self) -> Option<u32> {
        self.directory_permissions
    }
    fn file_override(&self) -> Option<u32> {
        self.file_permissions
    }
}
