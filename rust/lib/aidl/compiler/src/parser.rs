//! Boundary to the external `.aidl` grammar.

use aidl_ir::{Diagnostics, Document, Import};

use crate::io::FileAccess;

/// What the grammar produces for one file.
#[derive(Debug, Default)]
pub struct ParsedFile {
    /// `None` for a file with no declarations.
    pub document: Option<Document>,

    /// `import` statements in source order.
    pub imports: Vec<Import>,
}

impl ParsedFile {
    pub fn new(document: Document) -> Self {
        Self {
            document: Some(document),
            imports: Vec::new(),
        }
    }

    pub fn with_import(mut self, import: Import) -> Self {
        self.imports.push(import);
        self
    }
}

/// Turns a file into a [`ParsedFile`].
///
/// Returns `None` when the file cannot be read or parsed, after
/// reporting why to `diags`.
pub trait DocumentParser {
    fn parse_file(
        &self,
        path: &str,
        io: &dyn FileAccess,
        diags: &mut Diagnostics,
    ) -> Option<ParsedFile>;
}
