//! Filename agreement: a declaration of `a.b.Foo` must live in a file
//! whose path ends with `a/b/Foo.aidl`.

use std::path::Path;

use aidl_ir::{Diagnostics, Document};
use tracing::debug;

pub const AIDL_EXTENSION: &str = ".aidl";

/// How path suffixes are compared. Resolved once from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilenameCase {
    Sensitive,
    Insensitive,
}

impl FilenameCase {
    /// Linux filesystems are case-sensitive; macOS and Windows default
    /// to case-insensitive.
    pub fn host() -> Self {
        if cfg!(target_os = "linux") {
            FilenameCase::Sensitive
        } else {
            FilenameCase::Insensitive
        }
    }
}

impl Default for FilenameCase {
    fn default() -> Self {
        Self::host()
    }
}

/// `a.b` + `Foo.Inner` → `a/b/Foo.aidl`.
pub fn expected_relative_path(package: &str, name: &str) -> String {
    let mut expected = String::new();
    if !package.is_empty() {
        expected.push_str(&package.replace('.', "/"));
        expected.push('/');
    }
    let stem = name.split('.').next().unwrap_or(name);
    expected.push_str(stem);
    expected.push_str(AIDL_EXTENSION);
    expected
}

/// Normalize separators so Windows paths compare against `/` suffixes.
fn normalize(path: &Path) -> String {
    let s = path.to_string_lossy();
    if std::path::MAIN_SEPARATOR == '/' {
        s.into_owned()
    } else {
        s.replace(std::path::MAIN_SEPARATOR, "/")
    }
}

pub fn path_has_suffix(path: &str, expected: &str, case: FilenameCase) -> bool {
    if path.len() < expected.len() {
        return false;
    }
    let Some(tail) = path.get(path.len() - expected.len()..) else {
        return false;
    };
    match case {
        FilenameCase::Sensitive => tail == expected,
        FilenameCase::Insensitive => tail.eq_ignore_ascii_case(expected),
    }
}

/// Check one declaration. Relative `filename`s are taken relative to
/// `cwd`, so `Foo.aidl` run from `/src/a/b` still matches `a/b/Foo.aidl`.
#[allow(clippy::too_many_arguments)]
pub fn check_filename(
    filename: &str,
    cwd: &Path,
    kind: &str,
    package: &str,
    name: &str,
    line: u32,
    case: FilenameCase,
    diags: &mut Diagnostics,
) -> bool {
    let path = Path::new(filename);
    let full = if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&cwd.join(path))
    };

    let expected = expected_relative_path(package, name);
    if path_has_suffix(&full, &expected, case) {
        return true;
    }
    debug!("{} does not end with {} ({:?})", full, expected, case);

    diags.error(
        filename,
        line,
        format!(
            "{} {} should be declared in a file called {}.",
            kind, name, expected
        ),
    );
    false
}

/// Check every declaration in a parsed document. All parcelables are
/// checked even after one fails.
pub fn check_document_filenames(
    filename: &str,
    cwd: &Path,
    document: &Document,
    case: FilenameCase,
    diags: &mut Diagnostics,
) -> bool {
    match document {
        Document::Interface(iface) => check_filename(
            filename,
            cwd,
            "interface",
            &iface.package,
            &iface.name,
            iface.line,
            case,
            diags,
        ),
        Document::Parcelables(items) => {
            let mut ok = true;
            for p in items {
                ok &= check_filename(
                    filename,
                    cwd,
                    "parcelable",
                    &p.package,
                    &p.name,
                    p.line,
                    case,
                    diags,
                );
            }
            ok
        }
    }
}
