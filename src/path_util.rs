//! Pure path and filename string operations.
//! - Separator normalization and filename comparison per platform rules.
//! - Sanitizing arbitrary strings into valid filenames.
//! - Deterministic unique-name probing inside a directory.
//! - Lexical path expansion against an explicit base (no hidden cwd state).

use std::path::{Component, Path, PathBuf};

#[cfg(windows)]
const ALT_SEPARATOR: char = '/';
#[cfg(not(windows))]
const ALT_SEPARATOR: char = '\\';

/// Characters that cannot appear in a filename on at least one supported
/// platform. The full portable set is applied everywhere so produced names
/// remain valid when a tree is later copied across systems.
const ILLEGAL_FILENAME_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Rewrite all alternate separators to the platform's canonical separator,
/// in place, single pass. Idempotent.
pub fn normalize_path_separators(path: &mut String) {
    // Both separator styles are single-byte ASCII, so a byte-level rewrite
    // keeps the buffer valid UTF-8.
    let bytes = unsafe { path.as_mut_vec() };
    for b in bytes.iter_mut() {
        if *b == ALT_SEPARATOR as u8 {
            *b = std::path::MAIN_SEPARATOR as u8;
        }
    }
}

/// Borrowed view of the final path component; never allocates.
/// Accepts either separator style so un-normalized input still works.
pub fn base_file_name(path: &str) -> &str {
    match path.rfind(['/', '\\']) {
        Some(pos) => &path[pos + 1..],
        None => path,
    }
}

/// Compare two filenames under the platform's case rule for filenames
/// (case-insensitive on Windows, case-sensitive elsewhere), after
/// normalizing separators on both sides.
pub fn same_filename(a: &str, b: &str) -> bool {
    let mut a = a.to_string();
    let mut b = b.to_string();
    normalize_path_separators(&mut a);
    normalize_path_separators(&mut b);

    #[cfg(windows)]
    {
        a.eq_ignore_ascii_case(&b)
    }
    #[cfg(not(windows))]
    {
        a == b
    }
}

/// Replace every character illegal in a filename with `replacement`.
/// With `allow_separators` the path separators survive, so the result may be
/// a relative path rather than a single component. Control characters are
/// always replaced.
pub fn make_valid_filename(name: &str, replacement: char, allow_separators: bool) -> String {
    let out: String = name
        .chars()
        .map(|c| {
            if c.is_control() {
                replacement
            } else if c == '/' || c == '\\' {
                if allow_separators { c } else { replacement }
            } else if ILLEGAL_FILENAME_CHARS.contains(&c) {
                replacement
            } else {
                c
            }
        })
        .collect();

    // Windows rejects names ending in dots or spaces.
    #[cfg(windows)]
    let out = {
        let mut out = out;
        while out.ends_with('.') || out.ends_with(' ') {
            out.pop();
        }
        out
    };

    out
}

/// Probe `dir` for a free name derived from `basename`: the base itself,
/// then `stem(1).ext`, `stem(2).ext`, ... Deterministic — probing twice
/// without creating the first result yields the same answer. Races with
/// concurrent creators are tolerated by existence re-checks, not locks.
pub fn make_unique_filename(dir: &Path, basename: &str) -> PathBuf {
    let candidate = dir.join(basename);
    if !candidate.exists() {
        return candidate;
    }

    // Split off the extension; a leading dot alone (dotfiles) is not one.
    let (stem, ext) = match basename.rsplit_once('.') {
        Some((s, e)) if !s.is_empty() => (s, Some(e)),
        _ => (basename, None),
    };

    for n in 1u32.. {
        let name = match ext {
            Some(e) => format!("{stem}({n}).{e}"),
            None => format!("{stem}({n})"),
        };
        let probe = dir.join(&name);
        if !probe.exists() {
            return probe;
        }
    }
    unreachable!("unique-name probing exhausted u32 space");
}

/// Substitute a leading `~` with the user's home directory.
#[cfg(unix)]
pub fn expand_home_path(filename: &str) -> PathBuf {
    let home = dirs::home_dir();
    match home {
        Some(home) if filename == "~" => home,
        Some(home) => match filename.strip_prefix("~/") {
            Some(rest) => home.join(rest),
            None => PathBuf::from(filename),
        },
        None => PathBuf::from(filename),
    }
}

/// Resolve `path` against the absolute `base` into an absolute, lexically
/// normalized form (`.`/`..`/redundant separators removed). Pure function of
/// its arguments: the process cwd is never consulted. The target need not
/// exist. A leading `~` is expanded first on POSIX.
pub fn expand_file_name(path: &Path, base: &Path) -> PathBuf {
    #[cfg(unix)]
    let path = match path.to_str() {
        Some(s) if s.starts_with('~') => expand_home_path(s),
        _ => path.to_path_buf(),
    };
    #[cfg(not(unix))]
    let path = path.to_path_buf();

    let joined = if path.is_absolute() {
        path
    } else {
        base.join(path)
    };

    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::Prefix(..) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                // `pop` refuses to remove the root, which is what we want for
                // paths like `/..`.
                let _ = out.pop();
            }
            Component::Normal(c) => out.push(c),
        }
    }
    out
}

/// Canonical absolute form of an existing path. On Windows the result avoids
/// the verbose `\\?\` prefix.
pub fn canonical_path(path: &Path) -> std::io::Result<PathBuf> {
    dunce::canonicalize(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn normalize_is_idempotent() {
        let mut p = format!("a{0}b{0}c", ALT_SEPARATOR);
        normalize_path_separators(&mut p);
        let once = p.clone();
        normalize_path_separators(&mut p);
        assert_eq!(p, once);
        assert!(!p.contains(ALT_SEPARATOR));
    }

    #[test]
    fn base_file_name_borrows_tail() {
        assert_eq!(base_file_name("/a/b/c.txt"), "c.txt");
        assert_eq!(base_file_name("c.txt"), "c.txt");
        assert_eq!(base_file_name("a\\b\\d.bin"), "d.bin");
        assert_eq!(base_file_name("/trailing/"), "");
    }

    #[test]
    fn same_filename_reflexive() {
        assert!(same_filename("A.txt", "A.txt"));
    }

    #[test]
    fn same_filename_platform_case_rule() {
        let equal = same_filename("A.txt", "a.txt");
        #[cfg(windows)]
        assert!(equal);
        #[cfg(not(windows))]
        assert!(!equal);
    }

    #[test]
    fn same_filename_across_separator_styles() {
        assert!(same_filename("a/b.txt", "a\\b.txt"));
    }

    #[test]
    fn valid_filename_replaces_illegal_chars() {
        let got = make_valid_filename("a:b*c?.txt", '_', false);
        assert_eq!(got, "a_b_c_.txt");
    }

    #[test]
    fn valid_filename_separator_flag() {
        let strict = make_valid_filename("a/b", '_', false);
        assert_eq!(strict, "a_b");
        let relaxed = make_valid_filename("a/b", '_', true);
        assert_eq!(relaxed, "a/b");
    }

    #[test]
    fn valid_filename_strips_control_chars() {
        let got = make_valid_filename("a\x01b\nc", '_', false);
        assert_eq!(got, "a_b_c");
    }

    #[test]
    fn unique_filename_free_name_unchanged() {
        let td = tempdir().unwrap();
        let got = make_unique_filename(td.path(), "report.txt");
        assert_eq!(got, td.path().join("report.txt"));
    }

    #[test]
    fn unique_filename_probes_numbered() {
        let td = tempdir().unwrap();
        fs::write(td.path().join("report.txt"), b"x").unwrap();
        let got = make_unique_filename(td.path(), "report.txt");
        assert_eq!(got, td.path().join("report(1).txt"));

        // Deterministic: probing again without creating the result agrees.
        let again = make_unique_filename(td.path(), "report.txt");
        assert_eq!(again, got);

        fs::write(&got, b"x").unwrap();
        let third = make_unique_filename(td.path(), "report.txt");
        assert_eq!(third, td.path().join("report(2).txt"));
    }

    #[test]
    fn unique_filename_no_extension() {
        let td = tempdir().unwrap();
        fs::write(td.path().join("LICENSE"), b"x").unwrap();
        let got = make_unique_filename(td.path(), "LICENSE");
        assert_eq!(got, td.path().join("LICENSE(1)"));
    }

    #[test]
    fn expand_resolves_dots_lexically() {
        let base = if cfg!(windows) { Path::new("C:\\base\\dir") } else { Path::new("/base/dir") };
        let got = expand_file_name(Path::new("../other/./x.txt"), base);
        let want = if cfg!(windows) {
            PathBuf::from("C:\\base\\other\\x.txt")
        } else {
            PathBuf::from("/base/other/x.txt")
        };
        assert_eq!(got, want);
    }

    #[test]
    fn expand_absolute_input_ignores_base() {
        let base = if cfg!(windows) { Path::new("C:\\unused") } else { Path::new("/unused") };
        let abs = if cfg!(windows) { Path::new("C:\\a\\b") } else { Path::new("/a/b") };
        assert_eq!(expand_file_name(abs, base), abs.to_path_buf());
    }

    #[test]
    fn expand_is_pure_of_process_cwd() {
        let base = if cfg!(windows) { Path::new("C:\\fixed") } else { Path::new("/fixed") };
        let a = expand_file_name(Path::new("rel.txt"), base);
        let b = expand_file_name(Path::new("rel.txt"), base);
        assert_eq!(a, b);
    }

    #[test]
    fn canonical_path_resolves_existing() {
        let td = tempdir().unwrap();
        let f = td.path().join("real.txt");
        fs::write(&f, b"x").unwrap();
        let canon = canonical_path(&f).unwrap();
        assert!(canon.is_absolute());
        assert!(canon.ends_with("real.txt"));
    }

    #[cfg(unix)]
    #[test]
    fn home_expansion_prefix_only() {
        let expanded = expand_home_path("~/notes.txt");
        assert!(expanded.is_absolute() || dirs::home_dir().is_none());
        // A tilde that is not a prefix stays untouched.
        assert_eq!(expand_home_path("a~b"), PathBuf::from("a~b"));
    }
}
