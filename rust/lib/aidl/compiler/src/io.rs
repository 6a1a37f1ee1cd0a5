//! File and path access capability.
//!
//! The pipeline never touches `std::fs` directly; it goes through
//! [`FileAccess`] so hosts and tests can substitute the filesystem.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

pub trait FileAccess {
    fn read_file(&self, path: &Path) -> io::Result<String>;

    fn file_exists(&self, path: &Path) -> bool;

    /// Directory relative paths are resolved against.
    fn current_dir(&self) -> io::Result<PathBuf>;

    /// Create or truncate `path` with `contents`.
    fn write_file(&self, path: &Path, contents: &str) -> io::Result<()>;

    /// Make sure every directory above `path` exists.
    fn create_parent_dirs(&self, path: &Path) -> io::Result<()>;
}

/// [`FileAccess`] backed by the real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsFileAccess;

impl FileAccess for FsFileAccess {
    fn read_file(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        std::env::current_dir()
    }

    fn write_file(&self, path: &Path, contents: &str) -> io::Result<()> {
        debug!("writing {}", path.display());
        fs::write(path, contents)
    }

    fn create_parent_dirs(&self, path: &Path) -> io::Result<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
            _ => Ok(()),
        }
    }
}

/// In-memory [`FileAccess`] with a fixed working directory.
///
/// Paths are matched exactly as given. Written files become readable.
#[derive(Debug)]
pub struct MemoryFileAccess {
    files: RefCell<BTreeMap<PathBuf, String>>,
    cwd: PathBuf,
}

impl Default for MemoryFileAccess {
    fn default() -> Self {
        Self::new("/")
    }
}

impl MemoryFileAccess {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            files: RefCell::new(BTreeMap::new()),
            cwd: cwd.into(),
        }
    }

    pub fn add_file(&self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.files.borrow_mut().insert(path.into(), contents.into());
    }

    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.borrow().get(path.as_ref()).cloned()
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.files.borrow().keys().cloned().collect()
    }
}

impl FileAccess for MemoryFileAccess {
    fn read_file(&self, path: &Path) -> io::Result<String> {
        self.files.borrow().get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )
        })
    }

    fn file_exists(&self, path: &Path) -> bool {
        self.files.borrow().contains_key(path)
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        Ok(self.cwd.clone())
    }

    fn write_file(&self, path: &Path, contents: &str) -> io::Result<()> {
        self.add_file(path, contents);
        Ok(())
    }

    fn create_parent_dirs(&self, _path: &Path) -> io::Result<()> {
        Ok(())
    }
}
