//! Maps an imported type name to the file expected to declare it.

use std::path::{Path, PathBuf};

use aidl_validate::AIDL_EXTENSION;
use tracing::debug;

use crate::io::FileAccess;

/// Searches import directories in order; the first hit wins.
pub struct ImportResolver<'a> {
    io: &'a dyn FileAccess,
    import_paths: &'a [PathBuf],
}

impl<'a> ImportResolver<'a> {
    pub fn new(io: &'a dyn FileAccess, import_paths: &'a [PathBuf]) -> Self {
        Self { io, import_paths }
    }

    /// `a.b.Foo` → `a/b/Foo.aidl`.
    pub fn relative_path_for(canonical_name: &str) -> PathBuf {
        let mut relative = PathBuf::new();
        let mut segments = canonical_name.split('.').peekable();
        while let Some(segment) = segments.next() {
            if segments.peek().is_some() {
                relative.push(segment);
            } else {
                relative.push(format!("{}{}", segment, AIDL_EXTENSION));
            }
        }
        relative
    }

    /// Path of the file declaring `canonical_name`, or `None` if no
    /// import directory contains it. No parsing happens here.
    pub fn find_import_file(&self, canonical_name: &str) -> Option<PathBuf> {
        let relative = Self::relative_path_for(canonical_name);
        let found = self
            .import_paths
            .iter()
            .map(|dir| join(dir, &relative))
            .find(|candidate| self.io.file_exists(candidate));

        match &found {
            Some(path) => debug!("import {} -> {}", canonical_name, path.display()),
            None => debug!("import {} not found in {} paths", canonical_name, self.import_paths.len()),
        }
        found
    }
}

/// An empty directory means "relative to the working directory".
fn join(dir: &Path, relative: &Path) -> PathBuf {
    if dir.as_os_str().is_empty() {
        relative.to_path_buf()
    } else {
        dir.join(relative)
    }
}
