//! Import IR: a type one file needs from another declaration file.

use serde::Serialize;

/// An `import a.b.Foo;` statement.
///
/// Starts unresolved; the pipeline sets `filename` at most once when the
/// declaring file is found.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Import {
    /// Fully qualified name of the needed type.
    pub needed_class: String,

    /// File containing the import statement.
    pub file_from: String,

    pub line: u32,

    /// Path of the file declaring `needed_class`, once resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl Import {
    pub fn new(needed_class: impl Into<String>, file_from: impl Into<String>, line: u32) -> Self {
        Self {
            needed_class: needed_class.into(),
            file_from: file_from.into(),
            line,
            filename: None,
        }
    }

    pub fn key(&self) -> ImportKey {
        ImportKey {
            needed_class: self.needed_class.clone(),
            file_from: self.file_from.clone(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.filename.is_some()
    }

    /// Record the declaring file. Returns false (and keeps the first
    /// path) if the import was already resolved.
    pub fn set_filename(&mut self, filename: impl Into<String>) -> bool {
        if self.filename.is_some() {
            return false;
        }
        self.filename = Some(filename.into());
        true
    }
}

/// Identity of an import within one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImportKey {
    pub needed_class: String,
    pub file_from: String,
}
