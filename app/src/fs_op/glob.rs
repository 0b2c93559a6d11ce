//! Glob-style pathname expansion under a fixed base directory.
//!
//! The pattern is expanded one path component at a time, the way POSIX
//! `glob(3)` does it: wildcards never match a separator, a leading `.` in a
//! name has to be matched by a leading `.` in the pattern, and intermediate
//! components only ever match directories. The base directory itself is
//! taken literally, so metacharacters in it are not expanded.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::ops::{BitOr, BitOrAssign};
use std::path::{Path, PathBuf, MAIN_SEPARATOR, MAIN_SEPARATOR_STR};

use globset::{GlobBuilder, GlobMatcher};

use super::error::{FilesystemError, Result};
use super::path::resolve_against;
use super::stat::is_dir;

/// Flags controlling [`expand`]. Bit values follow the usual `glob.h` layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GlobFlags(u32);

impl GlobFlags {
    pub const NONE: GlobFlags = GlobFlags(0);
    /// Stop at the first unreadable directory instead of skipping it.
    pub const ERR: GlobFlags = GlobFlags(1 << 0);
    /// Append a separator to every directory in the result.
    pub const MARK: GlobFlags = GlobFlags(1 << 1);
    /// Return matches in directory order instead of sorting them.
    pub const NOSORT: GlobFlags = GlobFlags(1 << 2);
    /// When nothing matches, return the pattern itself.
    pub const NOCHECK: GlobFlags = GlobFlags(1 << 4);
    /// Treat backslashes literally. Patterns are separator-normalized before
    /// expansion, so this never changes the result.
    pub const NOESCAPE: GlobFlags = GlobFlags(1 << 6);
    /// Expand `{a,b}` alternations.
    pub const BRACE: GlobFlags = GlobFlags(1 << 10);
    /// Only return directories.
    pub const ONLYDIR: GlobFlags = GlobFlags(1 << 13);

    const KNOWN: u32 = Self::ERR.0
        | Self::MARK.0
        | Self::NOSORT.0
        | Self::NOCHECK.0
        | Self::NOESCAPE.0
        | Self::BRACE.0
        | Self::ONLYDIR.0;

    /// Wrap raw bits without checking them. Unknown bits are rejected by
    /// [`expand`].
    pub const fn from_bits_retain(bits: u32) -> Self {
        GlobFlags(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: GlobFlags) -> bool {
        self.0 & other.0 == other.0
    }

    fn validate(self) -> Result<Self> {
        let unknown = self.0 & !Self::KNOWN;
        if unknown != 0 {
            return Err(FilesystemError::new(format!(
                "glob(): invalid flags 0x{:x} (unknown bits 0x{:x})",
                self.0, unknown
            )));
        }
        Ok(self)
    }
}

impl BitOr for GlobFlags {
    type Output = GlobFlags;
    fn bitor(self, rhs: GlobFlags) -> GlobFlags {
        GlobFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for GlobFlags {
    fn bitor_assign(&mut self, rhs: GlobFlags) {
        self.0 |= rhs.0;
    }
}

enum Segment {
    Literal(String),
    Pattern { matcher: GlobMatcher, dotted: bool },
}

impl Segment {
    fn compile(raw: &str, flags: GlobFlags) -> Result<Segment> {
        let braces = flags.contains(GlobFlags::BRACE);
        let is_pattern = raw.contains(['*', '?', '['])
            || (braces && raw.contains('{'));
        if !is_pattern {
            return Ok(Segment::Literal(raw.to_string()));
        }

        let source = if braces {
            raw.to_string()
        } else {
            raw.replace('{', "[{]").replace('}', "[}]")
        };
        let matcher = GlobBuilder::new(&source)
            .literal_separator(true)
            .backslash_escape(!flags.contains(GlobFlags::NOESCAPE))
            .build()
            .map_err(|e| FilesystemError::new(format!("glob(): invalid pattern '{}': {}", raw, e)))?
            .compile_matcher();
        Ok(Segment::Pattern {
            matcher,
            dotted: raw.starts_with('.'),
        })
    }
}

/// Expand `pattern` (relative, already separator-normalized) under `base`.
///
/// Returns the matching paths, sorted unless [`GlobFlags::NOSORT`] is set.
/// No match is an empty vector, not an error. Unknown flag bits and
/// malformed patterns are errors, as are unreadable directories when
/// [`GlobFlags::ERR`] is set.
pub fn expand(base: &Path, pattern: &str, flags: GlobFlags) -> Result<Vec<PathBuf>> {
    let flags = flags.validate()?;

    let trailing_sep = pattern.ends_with(MAIN_SEPARATOR);
    let segments = pattern
        .split(MAIN_SEPARATOR)
        .filter(|s| !s.is_empty())
        .map(|s| Segment::compile(s, flags))
        .collect::<Result<Vec<_>>>()?;

    let mut current = vec![base.to_path_buf()];
    for (idx, segment) in segments.iter().enumerate() {
        let last = idx + 1 == segments.len();
        let mut next = Vec::new();
        for dir in &current {
            match segment {
                Segment::Literal(name) => {
                    let p = dir.join(name);
                    if fs::symlink_metadata(&p).is_ok() && (last || is_dir(&p)) {
                        next.push(p);
                    }
                }
                Segment::Pattern { matcher, dotted } => {
                    scan_dir(dir, matcher, *dotted, !last, flags, &mut next)?;
                }
            }
        }
        current = next;
        if current.is_empty() {
            break;
        }
    }

    let only_dirs = trailing_sep || flags.contains(GlobFlags::ONLYDIR);
    let mut out: Vec<PathBuf> = current
        .into_iter()
        .filter(|p| !only_dirs || is_dir(p))
        .collect();

    if !flags.contains(GlobFlags::NOSORT) {
        out.sort();
    }
    if flags.contains(GlobFlags::MARK) {
        out = out.into_iter().map(mark_if_dir).collect();
    }
    if out.is_empty() && flags.contains(GlobFlags::NOCHECK) {
        out.push(resolve_against(base, pattern));
    }
    tracing::debug!(base = %base.display(), pattern, flags = flags.bits(), matches = out.len(), "glob");
    Ok(out)
}

fn scan_dir(
    dir: &Path,
    matcher: &GlobMatcher,
    dotted: bool,
    dirs_only: bool,
    flags: GlobFlags,
    out: &mut Vec<PathBuf>,
) -> Result<()> {
    let entries = match fs::read_dir(dir) {
        Ok(rd) => rd,
        Err(e) => return skip_or_fail(dir, e, flags),
    };
    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                skip_or_fail(dir, e, flags)?;
                continue;
            }
        };
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with('.') && !dotted {
            continue;
        }
        if !matcher.is_match(&*name) {
            continue;
        }
        let p = entry.path();
        if dirs_only && !is_dir(&p) {
            continue;
        }
        out.push(p);
    }
    Ok(())
}

fn skip_or_fail(dir: &Path, err: io::Error, flags: GlobFlags) -> Result<()> {
    if flags.contains(GlobFlags::ERR) && err.kind() != io::ErrorKind::NotFound {
        return Err(FilesystemError::io("glob", dir, err));
    }
    tracing::trace!(dir = %dir.display(), error = %err, "glob skipped unreadable directory");
    Ok(())
}

fn mark_if_dir(p: PathBuf) -> PathBuf {
    if !is_dir(&p) {
        return p;
    }
    let mut s: OsString = p.into_os_string();
    s.push(MAIN_SEPARATOR_STR);
    PathBuf::from(s)
}
