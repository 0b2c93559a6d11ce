use std::path::{Path, PathBuf, MAIN_SEPARATOR};

/// Normalize separators in `path`.
///
/// Surrounding whitespace is trimmed, both `/` and `\` become the platform
/// separator, and any run of separators (`//`, `\\`, `/\`, ...) collapses to
/// a single one. The result is a fixed point: normalizing it again returns
/// the same string.
pub fn normalize_path(path: &str) -> String {
    collapse_separators(path.trim())
}

/// Separator half of [`normalize_path`], without the whitespace trim.
pub fn collapse_separators(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut prev_sep = false;
    for c in path.chars() {
        if c == '/' || c == '\\' {
            if !prev_sep {
                out.push(MAIN_SEPARATOR);
            }
            prev_sep = true;
        } else {
            out.push(c);
            prev_sep = false;
        }
    }
    out
}

/// Join `relative` onto `base` with a separator and normalize the result.
///
/// `relative` is always treated as relative: a leading separator does not
/// escape `base`, it simply collapses into the joining separator.
pub fn resolve_against(base: &Path, relative: &str) -> PathBuf {
    let joined = format!("{}{}{}", base.to_string_lossy(), MAIN_SEPARATOR, relative);
    PathBuf::from(normalize_path(&joined))
}

/// Render the permission part of `mode` as four octal digits.
///
/// Type bits reported by `stat` are dropped, so a regular file with mode
/// `0o100644` renders as `"0644"`.
pub fn mode_to_octal(mode: u32) -> String {
    format!("{:04o}", mode & 0o7777)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sep(s: &str) -> String {
        s.replace('/', &MAIN_SEPARATOR.to_string())
    }

    #[test]
    fn mixed_separators_collapse() {
        assert_eq!(normalize_path("a/b\\c//d\\\\e"), sep("a/b/c/d/e"));
        assert_eq!(normalize_path("/var\\/www//\\html"), sep("/var/www/html"));
    }

    #[test]
    fn collapsing_keeps_whitespace() {
        assert_eq!(collapse_separators(" a//b "), sep(" a/b "));
    }

    #[test]
    fn whitespace_is_trimmed() {
        assert_eq!(normalize_path("  dir/file.txt \n"), sep("dir/file.txt"));
    }

    #[test]
    fn normalization_is_idempotent() {
        for p in ["", "/", "a//b", "\\\\x\\\\y", " a /b ", "a///b////c", "x\\/\\/y"] {
            let once = normalize_path(p);
            assert_eq!(normalize_path(&once), once, "not idempotent for {:?}", p);
        }
    }

    #[test]
    fn joiner_variants_reach_same_location() {
        let variants = ["root/dir/f", "root\\dir\\f", "root//dir//f", "root\\\\dir\\\\f"];
        let first = normalize_path(variants[0]);
        for v in variants {
            assert_eq!(normalize_path(v), first);
        }
    }

    #[test]
    fn resolve_against_keeps_relative_under_base() {
        let got = resolve_against(Path::new("/srv/data"), "/sub//file.txt");
        assert_eq!(got, PathBuf::from(sep("/srv/data/sub/file.txt")));
    }

    #[test]
    fn octal_rendering_drops_type_bits() {
        assert_eq!(mode_to_octal(0o100644), "0644");
        assert_eq!(mode_to_octal(0o40777), "0777");
        assert_eq!(mode_to_octal(0o4755), "4755");
        assert_eq!(mode_to_octal(0), "0000");
    }
}
